//! JSON export of a finished run
//!
//! ```json
//! {
//!   "generated_at": "2026-10-16T09:30:00.000Z",
//!   "summary": { "min_price": 0, "max_price": 100000, "total": 2500, ... },
//!   "records": [ { "id": "...", "price": 42 }, ... ]
//! }
//! ```

use chrono::Utc;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use pricesweep_core::{Record, RunReport, RunSummary};

#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub generated_at: String,
    pub summary: RunSummary,
    pub records: &'a [Record],
}

impl<'a> ExportDocument<'a> {
    pub fn from_report(report: &'a RunReport) -> Self {
        Self {
            generated_at: Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            summary: report.summary(),
            records: &report.records,
        }
    }
}

/// Write `report` to `path`, creating parent directories as needed
pub fn write_export(path: &Path, report: &RunReport, pretty: bool) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let document = ExportDocument::from_report(report);
    let mut writer = BufWriter::new(File::create(path)?);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, &document)?;
    } else {
        serde_json::to_writer(&mut writer, &document)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()
}
