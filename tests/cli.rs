#![cfg(unix)]

use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

const FAKE_SMARTCTL: &str = r#"#!/bin/sh
case "$1" in
  --scan)
    printf '/dev/sda -d scsi\n\n/dev/nvme0 -d nvme\n'
    ;;
  -a)
    case "$2" in
      /dev/nvme0)
        cat <<'EOF'
smartctl 7.4 2023-08-01 r5530 [x86_64-linux-6.8.0] (local build)

=== START OF INFORMATION SECTION ===
Model Number:  Samsung SSD 980 1TB
Serial Number: S5GXNX0R123456
Firmware Version: 1B4QFXO7
=== START OF SMART DATA SECTION ===
SMART/Health Information (NVMe Log 0x02)
Critical Warning:                   0x00
Temperature:                        42 Celsius
Available Spare:                    100%
Data Units Read:                    1,234,567 [632 GB]
Power On Hours:                     1,024
Error Information (NVMe Log 0x01, 16 of 64 entries)
No Errors Logged
EOF
        ;;
      /dev/sda)
        cat <<'EOF'
=== START OF INFORMATION SECTION ===
Device Model:     ST2000DM008-2FR102
Serial Number:    ZFL0ABCD
Firmware Version: 0001
=== START OF READ SMART DATA SECTION ===
SMART overall-health self-assessment test result: PASSED
EOF
        echo "Warning: ATA error count 2 inconsistent" >&2
        exit 4
        ;;
      /dev/crossing)
        cat <<'EOF'
Firmware Version: 1.0.0
SMART/Health Information (NVMe Log 0x02)
Firmware Version: 9.9.9
Power Cycles: 73
Self-test Log (NVMe Log 0x06)
EOF
        ;;
      *)
        exit 2
        ;;
    esac
    ;;
esac
"#;

fn tmp_root() -> PathBuf {
    PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("smart-info-cli")
}

/// Directory holding the fake `smartctl`. Written once, before any test
/// spawns a process from it.
fn fake_bin() -> &'static Path {
    static DIR: OnceLock<PathBuf> = OnceLock::new();
    DIR.get_or_init(|| {
        let dir = tmp_root().join("bin");
        fs::create_dir_all(&dir).unwrap();
        fs::create_dir_all(tmp_root().join("empty")).unwrap();
        fs::create_dir_all(tmp_root().join("home")).unwrap();
        let script = dir.join("smartctl");
        fs::write(&script, FAKE_SMARTCTL).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        dir
    })
}

fn base_cmd(path_env: &str) -> assert_cmd::Command {
    let home = tmp_root().join("home");
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_smart-info")));
    cmd.env_clear()
        .env("PATH", path_env)
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", &home);
    cmd
}

/// Discovery goes through PATH with the fake smartctl first.
fn cmd() -> assert_cmd::Command {
    let path = format!("{}:/usr/bin:/bin", fake_bin().display());
    base_cmd(&path)
}

fn stdout_json(args: &[&str]) -> Value {
    let out = cmd().args(args).output().unwrap();
    assert!(out.status.success());
    serde_json::from_slice(&out.stdout).unwrap()
}

#[test]
fn help_is_one_line() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout("Usage: smart-info [--list] [--device /dev/sda] [--json] [--include-raw]\n");
}

#[test]
fn list_plain() {
    cmd().arg("--list").assert().success().stdout("/dev/sda\n/dev/nvme0\n");
}

#[test]
fn list_ignores_device() {
    cmd()
        .args(["--list", "--device", "/dev/nvme0"])
        .assert()
        .success()
        .stdout("/dev/sda\n/dev/nvme0\n");
}

#[test]
fn list_json() {
    assert_eq!(stdout_json(&["--list", "--json"]), json!({"devices": ["/dev/sda", "/dev/nvme0"]}));
}

#[test]
fn nvme_plain_text() {
    cmd()
        .args(["--device", "/dev/nvme0"])
        .assert()
        .success()
        .stdout(
            "Device: /dev/nvme0\n\
             Model: Samsung SSD 980 1TB\n\
             Serial: S5GXNX0R123456\n\
             Firmware: 1B4QFXO7\n\
             \n\
             NVMe SMART/Health:\n\
             available_spare: 100%\n\
             critical_warning: 0x00\n\
             data_units_read: 1,234,567 [632 GB]\n\
             power_on_hours: 1,024\n\
             temperature: 42 Celsius\n",
        );
}

#[test]
fn nvme_json() {
    let v = stdout_json(&["--device", "/dev/nvme0", "--json"]);
    assert_eq!(v["model"], "Samsung SSD 980 1TB");
    assert_eq!(v["nvme_health"]["temperature"], json!({"raw": "42 Celsius", "value": 42, "unit": "Celsius"}));
    assert_eq!(
        v["nvme_health"]["data_units_read"],
        json!({"raw": "1,234,567 [632 GB]", "value": 1234567, "unit": "632 GB"})
    );
    assert_eq!(v["nvme_health"]["power_on_hours"], json!({"raw": "1,024", "value": 1024}));
    assert_eq!(v["nvme_health"]["available_spare"], json!({"raw": "100%", "value": 100, "unit": "%"}));
    assert_eq!(v["nvme_health"]["critical_warning"], json!({"raw": "0x00"}));
    assert!(v.get("raw").is_none());
}

#[test]
fn json_is_reproducible() {
    let a = cmd().args(["--device", "/dev/nvme0", "--json"]).output().unwrap();
    let b = cmd().args(["--device", "/dev/nvme0", "--json"]).output().unwrap();
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn ata_device_has_no_nvme_section() {
    let v = stdout_json(&["--device", "/dev/sda", "--json"]);
    assert_eq!(v["model"], "ST2000DM008-2FR102");
    assert_eq!(v["health"], "PASSED");
    assert!(v.get("nvme_health").is_none());
}

#[test]
fn nonzero_smartctl_status_is_still_success() {
    cmd()
        .args(["--device", "/dev/sda"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Model: ST2000DM008-2FR102\n"))
        .stdout(predicate::str::contains("Health: PASSED\n"))
        .stdout(predicate::str::contains("NVMe SMART/Health").not());
}

#[test]
fn include_raw_embeds_merged_report() {
    let v = stdout_json(&["--device", "/dev/sda", "--json", "--include-raw"]);
    let raw = v["raw"].as_str().unwrap();
    assert!(raw.contains("Device Model:     ST2000DM008-2FR102"));
    assert!(raw.contains("Warning: ATA error count 2 inconsistent"));
}

#[test]
fn include_raw_ignored_in_plain_mode() {
    cmd()
        .args(["--device", "/dev/sda", "--include-raw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Warning: ATA").not());
}

#[test]
fn empty_report_prints_na() {
    cmd()
        .args(["--device", "/dev/empty"])
        .assert()
        .success()
        .stdout("Device: /dev/empty\nModel: n/a\nSerial: n/a\nFirmware: n/a\n");
}

#[test]
fn empty_report_json_is_empty_object() {
    assert_eq!(stdout_json(&["--device", "/dev/empty", "--json"]), json!({}));
}

#[test]
fn firmware_inside_health_block_is_ignored() {
    cmd()
        .args(["--device", "/dev/crossing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Firmware: 1.0.0\n"))
        .stdout(predicate::str::contains("firmware_version: 9.9.9\n"));
}

#[test]
fn smartctl_missing_exits_2() {
    fake_bin();
    let empty = tmp_root().join("empty");
    base_cmd(&empty.display().to_string())
        .args(["--device", "/dev/nvme0"])
        .assert()
        .code(2)
        .stdout("")
        .stderr("smartctl not found. Install smartmontools.\n");
}

#[test]
fn no_device_or_list_exits_2() {
    cmd()
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("--device or --list"));
}

#[test]
fn explicit_smartctl_flag_skips_path_lookup() {
    let script = fake_bin().join("smartctl");
    let empty = tmp_root().join("empty");
    base_cmd(&empty.display().to_string())
        .args(["--smartctl", script.to_str().unwrap(), "--list"])
        .assert()
        .success()
        .stdout("/dev/sda\n/dev/nvme0\n");
}

#[test]
fn config_file_turns_on_json() {
    let cfg = tmp_root().join("json-on.toml");
    fs::create_dir_all(tmp_root()).unwrap();
    fs::write(&cfg, "[output]\njson = true\n").unwrap();
    let out = cmd()
        .args(["--config-file", cfg.to_str().unwrap(), "--list"])
        .output()
        .unwrap();
    let v: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v, json!({"devices": ["/dev/sda", "/dev/nvme0"]}));
}

#[test]
fn broken_config_warns_and_continues() {
    let cfg = tmp_root().join("broken.toml");
    fs::create_dir_all(tmp_root()).unwrap();
    fs::write(&cfg, "[output\n").unwrap();
    cmd()
        .args(["--config-file", cfg.to_str().unwrap(), "--list"])
        .assert()
        .success()
        .stdout("/dev/sda\n/dev/nvme0\n")
        .stderr(predicate::str::starts_with("warning: ignoring config"));
}

#[test]
fn show_config_prints_values() {
    cmd()
        .arg("--show-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("json        = false"))
        .stdout(predicate::str::contains("(search PATH)"));
}

#[test]
fn verbose_reports_smartctl_status() {
    cmd()
        .args(["--device", "/dev/sda", "--verbose"])
        .assert()
        .success()
        .stderr(predicate::str::contains("smartctl exited with status 4"));
}

#[test]
fn unknown_flag_is_usage_error() {
    cmd().arg("--bogus").assert().code(2);
}

#[test]
fn completions_are_generated() {
    cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("smart-info"));
}
