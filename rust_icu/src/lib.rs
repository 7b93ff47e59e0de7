//! Synthetic ICU datasets
//!
//! Generates simulated ICU patient admissions and ICU bed inventory
//! from a seeded random source, and writes them as CSV (or parquet).
//! The two datasets are generated independently and are not linked.

pub use datafusion::arrow::record_batch::RecordBatch;

pub use bed::{make_beds, BedRecord, BedType};
pub use config::{BedDatasetConfig, GeneratorConfig, PatientDatasetConfig};
pub use dataset::{build_bed_dataset, build_patient_dataset, Dataset};
pub use error::IcuError;
pub use output::{save_record_batch, OutputFormat};
pub use patient::{make_patients, PatientRecord, Severity};
pub use seeded_rng::make_rng;
pub use summary::category_counts;

pub mod bed;
pub mod categorical;
pub mod config;
pub mod dataset;
mod error;
pub mod output;
pub mod patient;
pub mod seeded_rng;
pub mod summary;
pub mod table;
