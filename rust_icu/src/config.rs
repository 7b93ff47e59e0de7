//! Generator configuration
//!
//! Every setting has a default that reproduces the reference datasets,
//! so an empty configuration file (or none at all) is valid. Example:
//!
//! ```yaml
//! seed: 42
//! format: csv
//! patients:
//!   count: 1500
//!   start_date: 2026-01-01
//!   output_path: synthetic_icu_dataset_1500.csv
//! beds:
//!   count: 60
//!   output_path: icu_infrastructure_dataset_60beds.csv
//! ```

use std::io::Read;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::bed::DEFAULT_BED_COUNT;
use crate::error::IcuError;
use crate::output::OutputFormat;
use crate::patient::DEFAULT_PATIENT_COUNT;
use crate::seeded_rng::DEFAULT_SEED;

/// Format of the start date in configuration and on the command line
pub const START_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatientDatasetConfig {
    pub count: usize,
    /// First day of the arrival window (YYYY-MM-DD)
    pub start_date: String,
    pub output_path: PathBuf,
}

impl Default for PatientDatasetConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_PATIENT_COUNT,
            start_date: String::from("2026-01-01"),
            output_path: PathBuf::from("synthetic_icu_dataset_1500.csv"),
        }
    }
}

impl PatientDatasetConfig {
    /// The parsed start date, or InvalidArgument if it is malformed
    pub fn start_date(&self) -> Result<NaiveDate, IcuError> {
        NaiveDate::parse_from_str(&self.start_date, START_DATE_FORMAT).map_err(|e| {
            IcuError::invalid(format!(
                "start date {:?} is not YYYY-MM-DD: {e}",
                self.start_date
            ))
        })
    }

    pub fn validate(&self) -> Result<(), IcuError> {
        if self.count == 0 {
            return Err(IcuError::invalid("patients.count must be positive"));
        }
        self.start_date()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BedDatasetConfig {
    pub count: usize,
    pub output_path: PathBuf,
}

impl Default for BedDatasetConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_BED_COUNT,
            output_path: PathBuf::from("icu_infrastructure_dataset_60beds.csv"),
        }
    }
}

impl BedDatasetConfig {
    pub fn validate(&self) -> Result<(), IcuError> {
        if self.count == 0 {
            return Err(IcuError::invalid("beds.count must be positive"));
        }
        Ok(())
    }
}

/// Settings for both datasets
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Global seed that every dataset's random source is derived from
    pub seed: u64,
    pub format: OutputFormat,
    pub patients: PatientDatasetConfig,
    pub beds: BedDatasetConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            format: OutputFormat::default(),
            patients: PatientDatasetConfig::default(),
            beds: BedDatasetConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Read a configuration from a byte source (e.g. the result
    /// of std::fs::File::open() on a yaml file). Missing fields
    /// take their default values.
    pub fn from_reader<R>(reader: R) -> Result<Self, IcuError>
    where
        R: Read,
    {
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Check both dataset sections
    pub fn validate(&self) -> Result<(), IcuError> {
        self.patients.validate()?;
        self.beds.validate()
    }
}
