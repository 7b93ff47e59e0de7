//! Writing generated tables to files
//!
//! CSV is the format of the reference datasets. Parquet is also
//! available for loading the data into other tools.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use datafusion::arrow::csv;
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::parquet::arrow::arrow_writer::ArrowWriter;
use log::debug;
use serde::Deserialize;

use crate::error::IcuError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Parquet,
}

impl FromStr for OutputFormat {
    type Err = IcuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "parquet" => Ok(Self::Parquet),
            other => Err(IcuError::invalid(format!(
                "unknown output format {other} (expected csv or parquet)"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("csv"),
            Self::Parquet => f.write_str("parquet"),
        }
    }
}

/// Write the batch as CSV with a header row. The file is flushed
/// before returning; on error it is closed when the writer drops.
fn save_csv(path: &Path, batch: &RecordBatch) -> Result<(), IcuError> {
    let mut file = BufWriter::new(File::create(path)?);
    {
        let mut writer = csv::Writer::new(&mut file);
        writer.write(batch)?;
    }
    file.flush()?;
    Ok(())
}

fn save_parquet(path: &Path, batch: &RecordBatch) -> Result<(), IcuError> {
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}

/// Write a whole table to `path` in the given format, replacing
/// any existing file.
pub fn save_record_batch(
    path: &Path,
    batch: &RecordBatch,
    format: OutputFormat,
) -> Result<(), IcuError> {
    match format {
        OutputFormat::Csv => save_csv(path, batch)?,
        OutputFormat::Parquet => save_parquet(path, batch)?,
    }
    debug!(
        "Wrote {} rows to {} ({format})",
        batch.num_rows(),
        path.display()
    );
    Ok(())
}
