//! Conversion of generated records into arrow tables
//!
//! The column order is the column order of the output files. Flags
//! are stored as 0/1 integers rather than booleans so that the CSV
//! output contains literal `0` and `1`.

use std::sync::Arc;

use datafusion::arrow::array::{StringArray, UInt32Array, UInt8Array};
use datafusion::arrow::{error::ArrowError, record_batch::RecordBatch};

use crate::bed::BedRecord;
use crate::patient::{PatientRecord, ARRIVAL_TIME_FORMAT};

/// Header of the patient dataset
pub const PATIENT_COLUMNS: [&str; 7] = [
    "patient_id",
    "severity",
    "is_emergency",
    "predicted_stay_days",
    "ventilator_needed",
    "dialysis_needed",
    "arrival_time",
];

/// Header of the bed dataset
pub const BED_COLUMNS: [&str; 5] = [
    "bed_id",
    "bed_type",
    "ventilator_available",
    "dialysis_available",
    "is_available",
];

fn flag(value: bool) -> u8 {
    u8::from(value)
}

pub fn patients_to_record_batch(patients: &[PatientRecord]) -> Result<RecordBatch, ArrowError> {
    let mut patient_id = Vec::with_capacity(patients.len());
    let mut severity = Vec::with_capacity(patients.len());
    let mut is_emergency = Vec::with_capacity(patients.len());
    let mut predicted_stay_days = Vec::with_capacity(patients.len());
    let mut ventilator_needed = Vec::with_capacity(patients.len());
    let mut dialysis_needed = Vec::with_capacity(patients.len());
    let mut arrival_time = Vec::with_capacity(patients.len());

    for patient in patients {
        patient_id.push(patient.patient_id.as_str());
        severity.push(patient.severity.as_str());
        is_emergency.push(flag(patient.is_emergency));
        predicted_stay_days.push(patient.predicted_stay_days);
        ventilator_needed.push(flag(patient.ventilator_needed));
        dialysis_needed.push(flag(patient.dialysis_needed));
        arrival_time.push(patient.arrival_time.format(ARRIVAL_TIME_FORMAT).to_string());
    }

    RecordBatch::try_from_iter([
        (PATIENT_COLUMNS[0], Arc::new(StringArray::from(patient_id)) as _),
        (PATIENT_COLUMNS[1], Arc::new(StringArray::from(severity)) as _),
        (PATIENT_COLUMNS[2], Arc::new(UInt8Array::from(is_emergency)) as _),
        (
            PATIENT_COLUMNS[3],
            Arc::new(UInt32Array::from(predicted_stay_days)) as _,
        ),
        (
            PATIENT_COLUMNS[4],
            Arc::new(UInt8Array::from(ventilator_needed)) as _,
        ),
        (PATIENT_COLUMNS[5], Arc::new(UInt8Array::from(dialysis_needed)) as _),
        (PATIENT_COLUMNS[6], Arc::new(StringArray::from(arrival_time)) as _),
    ])
}

pub fn beds_to_record_batch(beds: &[BedRecord]) -> Result<RecordBatch, ArrowError> {
    let mut bed_id = Vec::with_capacity(beds.len());
    let mut bed_type = Vec::with_capacity(beds.len());
    let mut ventilator_available = Vec::with_capacity(beds.len());
    let mut dialysis_available = Vec::with_capacity(beds.len());
    let mut is_available = Vec::with_capacity(beds.len());

    for bed in beds {
        bed_id.push(bed.bed_id.as_str());
        bed_type.push(bed.bed_type.as_str());
        ventilator_available.push(flag(bed.ventilator_available));
        dialysis_available.push(flag(bed.dialysis_available));
        is_available.push(flag(bed.is_available));
    }

    RecordBatch::try_from_iter([
        (BED_COLUMNS[0], Arc::new(StringArray::from(bed_id)) as _),
        (BED_COLUMNS[1], Arc::new(StringArray::from(bed_type)) as _),
        (
            BED_COLUMNS[2],
            Arc::new(UInt8Array::from(ventilator_available)) as _,
        ),
        (BED_COLUMNS[3], Arc::new(UInt8Array::from(dialysis_available)) as _),
        (BED_COLUMNS[4], Arc::new(UInt8Array::from(is_available)) as _),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bed::make_beds;
    use crate::patient::{default_start_date, make_patients};
    use crate::seeded_rng::make_rng;
    use datafusion::arrow::array::Array;

    fn column_names(batch: &RecordBatch) -> Vec<String> {
        batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    #[test]
    fn patient_table_has_header_columns() {
        let mut rng = make_rng(42, "icu_patient_dataset");
        let patients = make_patients(&mut rng, 25, default_start_date()).unwrap();
        let batch = patients_to_record_batch(&patients).unwrap();
        assert_eq!(batch.num_rows(), 25);
        assert_eq!(column_names(&batch), PATIENT_COLUMNS);

        let arrival = batch
            .column(6)
            .as_any()
            .downcast_ref::<StringArray>()
            .expect("Should be a string column");
        assert_eq!(
            arrival.value(0),
            patients[0].arrival_time.format("%Y-%m-%d %H:%M:%S").to_string()
        );
        assert_eq!(arrival.value(0).len(), "2026-01-01 00:00:00".len());
    }

    #[test]
    fn bed_table_has_header_columns() {
        let mut rng = make_rng(42, "icu_bed_dataset");
        let beds = make_beds(&mut rng, 10).unwrap();
        let batch = beds_to_record_batch(&beds).unwrap();
        assert_eq!(batch.num_rows(), 10);
        assert_eq!(column_names(&batch), BED_COLUMNS);

        let is_available = batch
            .column(4)
            .as_any()
            .downcast_ref::<UInt8Array>()
            .expect("Should be a UInt8 column");
        assert!(is_available.values().iter().all(|v| *v == 1));
        assert_eq!(is_available.null_count(), 0);
    }
}
