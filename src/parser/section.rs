use super::value::{decompose, normalize_key};
use crate::models::report::ParsedReport;

const HEALTH_MARKER: &str = "SMART/Health Information";
const HEALTH_TERMINATORS: [&str; 3] = ["Error Information", "Self-test Log", "==="];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    NvmeHealth,
}

#[derive(Debug, Clone, Copy)]
enum Identity {
    Model,
    Serial,
    Firmware,
    Health,
}

const IDENTITY_PREFIXES: [(&str, Identity); 5] = [
    ("Device Model:",     Identity::Model),
    ("Model Number:",     Identity::Model),
    ("Serial Number:",    Identity::Serial),
    ("Firmware Version:", Identity::Firmware),
    ("SMART overall-health self-assessment test result:", Identity::Health),
];

/// Parse the text of `smartctl -a <device>`.
///
/// Never fails: lines that mean nothing to us are skipped, so an empty or
/// garbled report simply produces an empty `ParsedReport`.
pub fn parse_report(text: &str) -> ParsedReport {
    let mut report  = ParsedReport::default();
    let mut section = Section::Header;
    // Identity lines are only trusted in the device header, before any
    // SMART/Health block has been seen.
    let mut header_closed = false;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match section {
            Section::Header => {
                if line.starts_with(HEALTH_MARKER) {
                    section = Section::NvmeHealth;
                    header_closed = true;
                } else if !header_closed {
                    capture_identity(&mut report, line);
                }
            }
            Section::NvmeHealth => {
                if HEALTH_TERMINATORS.iter().any(|t| line.starts_with(*t)) {
                    section = Section::Header;
                } else {
                    capture_attribute(&mut report, line);
                }
            }
        }
    }
    report
}

fn capture_identity(report: &mut ParsedReport, line: &str) {
    let Some((_, kind)) = IDENTITY_PREFIXES.iter().find(|(p, _)| line.starts_with(*p)) else {
        return;
    };
    let value = match line.split_once(':') {
        Some((_, v)) => v.trim().to_string(),
        None         => return,
    };
    let slot = match kind {
        Identity::Model    => &mut report.model,
        Identity::Serial   => &mut report.serial,
        Identity::Firmware => &mut report.firmware,
        Identity::Health   => &mut report.health,
    };
    *slot = Some(value);
}

fn capture_attribute(report: &mut ParsedReport, line: &str) {
    let Some((key, val)) = line.split_once(':') else { return };
    let val = val.trim();
    if val.is_empty() {
        return;
    }
    report.nvme.insert(normalize_key(key.trim()), decompose(val));
}
