pub mod process;
pub mod smartctl;
