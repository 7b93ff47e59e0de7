//! The two generated datasets, from configuration to table
//!
//! Each dataset gets its own random source derived from the global
//! seed and the dataset name, so the datasets can be generated in
//! any order (or only one of them) without changing either.

use std::fmt;

use datafusion::arrow::record_batch::RecordBatch;
use log::debug;

use crate::bed::make_beds;
use crate::config::{BedDatasetConfig, PatientDatasetConfig};
use crate::error::IcuError;
use crate::patient::make_patients;
use crate::seeded_rng::make_rng;
use crate::table::{beds_to_record_batch, patients_to_record_batch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Patients,
    Beds,
}

impl Dataset {
    /// Name used for reporting and for deriving the dataset's
    /// random source. Changing it changes the generated data.
    pub fn name(self) -> &'static str {
        match self {
            Dataset::Patients => "icu_patient_dataset",
            Dataset::Beds => "icu_bed_dataset",
        }
    }

    /// The column holding the category of each record
    pub fn category_column(self) -> &'static str {
        match self {
            Dataset::Patients => "severity",
            Dataset::Beds => "bed_type",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validate the patient settings and generate the patient table
pub fn build_patient_dataset(
    global_seed: u64,
    config: &PatientDatasetConfig,
) -> Result<RecordBatch, IcuError> {
    config.validate()?;
    let start_date = config.start_date()?;
    let mut rng = make_rng(global_seed, Dataset::Patients.name());
    let patients = make_patients(&mut rng, config.count, start_date)?;
    debug!("Building {} table", Dataset::Patients);
    Ok(patients_to_record_batch(&patients)?)
}

/// Validate the bed settings and generate the bed table
pub fn build_bed_dataset(
    global_seed: u64,
    config: &BedDatasetConfig,
) -> Result<RecordBatch, IcuError> {
    config.validate()?;
    let mut rng = make_rng(global_seed, Dataset::Beds.name());
    let beds = make_beds(&mut rng, config.count)?;
    debug!("Building {} table", Dataset::Beds);
    Ok(beds_to_record_batch(&beds)?)
}
