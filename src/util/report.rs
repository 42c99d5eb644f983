use crate::models::report::ParsedReport;

/// Render a parsed report as the plain-text digest.
pub fn generate(device: &str, report: &ParsedReport) -> String {
    let na = |v: &Option<String>| v.as_deref().unwrap_or("n/a").to_string();
    let mut out = String::new();

    out.push_str(&format!("Device: {}\n", device));
    out.push_str(&format!("Model: {}\n", na(&report.model)));
    out.push_str(&format!("Serial: {}\n", na(&report.serial)));
    out.push_str(&format!("Firmware: {}\n", na(&report.firmware)));
    if let Some(health) = &report.health {
        out.push_str(&format!("Health: {}\n", health));
    }

    if !report.nvme.is_empty() {
        out.push_str("\nNVMe SMART/Health:\n");
        for (key, field) in &report.nvme {
            out.push_str(&format!("{}: {}\n", key, field.raw));
        }
    }
    out
}

/// One device handle per line.
pub fn device_list(devices: &[String]) -> String {
    devices.iter().map(|d| format!("{}\n", d)).collect()
}
