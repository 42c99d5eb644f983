use super::process::{Capture, Runner};

/// A resolved `smartctl` executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Smartctl {
    pub path: String,
}

impl Smartctl {
    /// Use an explicit path when one is configured, otherwise ask the shell
    /// (`command -v smartctl`). Returns None when nothing was found.
    pub fn locate(runner: &dyn Runner, explicit: Option<&str>) -> Option<Self> {
        if let Some(p) = explicit.map(str::trim).filter(|p| !p.is_empty()) {
            return Some(Self { path: p.to_string() });
        }
        let out  = runner.capture("sh", &["-c", "command -v smartctl 2>/dev/null"], false);
        let path = out.text.trim_end();
        if path.is_empty() {
            None
        } else {
            Some(Self { path: path.to_string() })
        }
    }

    /// `smartctl --scan` → device handles, in scan order.
    pub fn list_devices(&self, runner: &dyn Runner) -> Vec<String> {
        let out = runner.capture(&self.path, &["--scan"], false);
        parse_scan(&out.text)
    }

    /// `smartctl -a <device>` with stderr folded in.
    pub fn read_report(&self, runner: &dyn Runner, device: &str) -> Capture {
        runner.capture(&self.path, &["-a", device], true)
    }
}

/// First whitespace-delimited token of every non-blank line.
///
/// `/dev/sda -d sat # /dev/sda [SAT], ATA device` → `/dev/sda`
pub fn parse_scan(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|l| l.split_whitespace().next())
        .map(str::to_string)
        .collect()
}
