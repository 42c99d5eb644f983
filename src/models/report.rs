use serde::Serialize;
use std::collections::BTreeMap;

/// One NVMe SMART/Health attribute, split into its raw text and whatever
/// number/unit could be read from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub raw:   String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit:  Option<String>,
}

impl Field {
    pub fn raw_only(raw: impl Into<String>) -> Self {
        Self { raw: raw.into(), value: None, unit: None }
    }
}

/// Everything we pull out of one `smartctl -a` report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReport {
    pub model:    Option<String>,
    pub serial:   Option<String>,
    pub firmware: Option<String>,
    /// "SMART overall-health self-assessment test result" (PASSED / FAILED!).
    pub health:   Option<String>,
    /// Normalized key → field. BTreeMap keeps emission order sorted.
    pub nvme:     BTreeMap<String, Field>,
}

impl ParsedReport {
    pub fn is_empty(&self) -> bool {
        self.model.is_none()
            && self.serial.is_none()
            && self.firmware.is_none()
            && self.health.is_none()
            && self.nvme.is_empty()
    }
}
