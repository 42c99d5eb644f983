mod collectors;
mod config;
mod models;
mod parser;
mod util;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use collectors::process::{Runner, SystemRunner};
use collectors::smartctl::Smartctl;
use config::Config;
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "Usage: smart-info [--list] [--device /dev/sda] [--json] [--include-raw]";

#[derive(Parser, Debug)]
#[command(name = "smart-info", about = "SMART/Health digest via smartctl", version = "0.1", disable_help_flag = true)]
struct Cli {
    /// List devices reported by `smartctl --scan` and exit
    #[arg(long)]
    list: bool,

    /// Device handle to inspect, e.g. /dev/sda or /dev/nvme0
    #[arg(long, value_name = "PATH")]
    device: Option<String>,

    /// Emit JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// Include the full smartctl report under "raw" (JSON only)
    #[arg(long)]
    include_raw: bool,

    /// Use this smartctl executable instead of searching PATH
    #[arg(long, value_name = "PATH")]
    smartctl: Option<String>,

    /// Read configuration from this file
    #[arg(long, value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// Print config file path and effective values, then exit
    #[arg(long)]
    show_config: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,

    /// Extra diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Print usage and exit
    #[arg(short = 'h', long)]
    help: bool,
}

/// Conditions that end the run with exit status 2.
#[derive(Debug)]
enum UsageError {
    SmartctlMissing,
    NoTarget,
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::SmartctlMissing => write!(f, "smartctl not found. Install smartmontools."),
            UsageError::NoTarget        => write!(f, "Please specify --device or --list"),
        }
    }
}

impl std::error::Error for UsageError {}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli, &SystemRunner) {
        Ok(())  => ExitCode::SUCCESS,
        Err(e)  => match e.downcast_ref::<UsageError>() {
            Some(usage) => {
                eprintln!("{}", usage);
                ExitCode::from(2)
            }
            None => {
                eprintln!("error: {:#}", e);
                ExitCode::from(1)
            }
        },
    }
}

fn run(cli: Cli, runner: &dyn Runner) -> Result<()> {
    if cli.help {
        return emit(&format!("{}\n", USAGE));
    }
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "smart-info", &mut io::stdout());
        return Ok(());
    }

    let cfg = Config::load(cli.config_file.as_deref());
    if cli.show_config {
        return run_print_config(&cfg, cli.config_file.clone());
    }

    let json        = cli.json || cfg.output.json;
    let include_raw = cli.include_raw || cfg.output.include_raw;

    let explicit = cli.smartctl.as_deref().or(cfg.smartctl_path());
    let smartctl = Smartctl::locate(runner, explicit).ok_or(UsageError::SmartctlMissing)?;
    if cli.verbose {
        eprintln!("smartctl: {}", smartctl.path);
    }

    if cli.list {
        return run_list(&smartctl, runner, json, cli.verbose);
    }

    let device = cli.device.as_deref().ok_or(UsageError::NoTarget)?;
    run_device(&smartctl, runner, device, json, include_raw, cli.verbose)
}

fn run_list(smartctl: &Smartctl, runner: &dyn Runner, json: bool, verbose: bool) -> Result<()> {
    if verbose {
        eprintln!("running: {} --scan", smartctl.path);
    }
    let devices = smartctl.list_devices(runner);
    if verbose {
        eprintln!("scan found {} device(s)", devices.len());
    }
    if json {
        emit(&format!("{}\n", util::json::device_list(&devices)?))
    } else {
        emit(&util::report::device_list(&devices))
    }
}

fn run_device(
    smartctl:    &Smartctl,
    runner:      &dyn Runner,
    device:      &str,
    json:        bool,
    include_raw: bool,
    verbose:     bool,
) -> Result<()> {
    if verbose {
        eprintln!("running: {} -a {}", smartctl.path, device);
    }
    let capture = smartctl.read_report(runner, device);
    if verbose {
        eprintln!("captured {} byte(s)", capture.text.len());
        match capture.exit_code {
            Some(0)    => {}
            Some(code) => eprintln!("smartctl exited with status {}", code),
            None       => eprintln!("smartctl did not run to completion"),
        }
    }

    let report = parser::parse_report(&capture.text);
    if verbose && report.is_empty() {
        eprintln!("no recognizable fields in report for {}", device);
    }

    if json {
        let raw = include_raw.then_some(capture.text.as_str());
        emit(&format!("{}\n", util::json::generate(&report, raw)?))
    } else {
        emit(&util::report::generate(device, &report))
    }
}

fn run_print_config(cfg: &Config, explicit: Option<PathBuf>) -> Result<()> {
    let path = explicit
        .or_else(Config::config_path)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    let smartctl = cfg.smartctl_path().unwrap_or("(search PATH)");

    let mut out = String::new();
    out.push_str(&format!("Config: {}\n\n", path));
    out.push_str("[smartctl]\n");
    out.push_str(&format!("  path        = {}\n\n", smartctl));
    out.push_str("[output]\n");
    out.push_str(&format!("  json        = {}\n", cfg.output.json));
    out.push_str(&format!("  include_raw = {}\n", cfg.output.include_raw));
    emit(&out)
}

fn emit(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes()).context("writing to stdout")?;
    stdout.flush().context("flushing stdout")?;
    Ok(())
}
