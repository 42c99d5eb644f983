//! Text parser for `smartctl -a` output.
//!
//! Only the device header (model / serial / firmware / overall health) and
//! the NVMe SMART/Health Information block are structured; everything else
//! in the report is ignored.

pub mod section;
pub mod value;

pub use section::parse_report;
