use crate::models::report::{Field, ParsedReport};
use anyhow::Result;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

/// JSON shape of one device digest. Field order here is the output order.
#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model:       Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    serial:      Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    firmware:    Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    health:      Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nvme_health: Option<&'a BTreeMap<String, Field>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw:         Option<&'a str>,
}

/// Render a parsed report as a JSON document.
/// `raw` is the captured smartctl text, included only when given.
pub fn generate(report: &ParsedReport, raw: Option<&str>) -> Result<String> {
    let doc = JsonReport {
        model:       report.model.as_deref(),
        serial:      report.serial.as_deref(),
        firmware:    report.firmware.as_deref(),
        health:      report.health.as_deref(),
        nvme_health: Some(&report.nvme).filter(|m| !m.is_empty()),
        raw,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// `{"devices": [...]}` for `--list --json`.
pub fn device_list(devices: &[String]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&json!({ "devices": devices }))?)
}
