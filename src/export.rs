use anyhow::{bail, Result};

pub mod csv_writer;
pub mod json_writer;
pub mod markdown;

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,       // flat record list
    GroupsJson, // title -> records
    Csv,
    Markdown, // one document per title
}

impl ExportFormat {
    pub fn of(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "groups-json" => Ok(Self::GroupsJson),
            "csv" => Ok(Self::Csv),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => bail!("Unknown export format: {}", name),
        }
    }
}
