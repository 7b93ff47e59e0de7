//! Synthetic ICU patient admissions
//!
//! Each patient is generated in one pass: a severity is drawn first,
//! and everything else about the admission (whether it is an emergency,
//! how long the stay is predicted to be, which equipment is needed) is
//! drawn from the parameters of that severity. Finally an arrival time
//! is picked in a 60 day window after the start date.
//!
//! The order of the draws is fixed, so the same random source always
//! produces the same admissions:
//!
//! * severity
//! * emergency flag
//! * predicted stay
//! * ventilator (only drawn for High and Critical)
//! * dialysis (only drawn for Critical)
//! * arrival day, hour and minute
//!
//! The ventilator and dialysis draws are independent, so a Critical
//! patient may need dialysis without needing a ventilator.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;
use rand::distributions::Distribution;
use rand::Rng;

use crate::categorical::{draw_flag, Categorical};
use crate::error::IcuError;

/// Number of patients in the reference dataset
pub const DEFAULT_PATIENT_COUNT: usize = 1500;

/// Length of the window that arrival times fall in
pub const ARRIVAL_WINDOW_DAYS: i64 = 60;

/// Format of arrival times in the output files
pub const ARRIVAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Start of the arrival window in the reference dataset
pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).expect("2026-01-01 is a valid date")
}

/// Acuity of an admission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// The parameters that every other field of a patient is
/// drawn from, once the severity is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityProfile {
    /// Weight of this severity in the severity draw
    pub weight: f64,
    /// Probability that the admission is an emergency
    pub emergency_probability: f64,
    /// Inclusive range of the predicted stay in days
    pub stay_days: (u32, u32),
    /// Probability of needing a ventilator (0 means never, and
    /// nothing is drawn)
    pub ventilator_probability: f64,
    /// Probability of needing dialysis (0 means never, and
    /// nothing is drawn)
    pub dialysis_probability: f64,
}

impl Severity {
    /// All severities, in the order used by the severity draw
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn profile(self) -> SeverityProfile {
        match self {
            Severity::Low => SeverityProfile {
                weight: 0.2,
                emergency_probability: 0.15,
                stay_days: (1, 3),
                ventilator_probability: 0.0,
                dialysis_probability: 0.0,
            },
            Severity::Medium => SeverityProfile {
                weight: 0.4,
                emergency_probability: 0.15,
                stay_days: (2, 5),
                ventilator_probability: 0.0,
                dialysis_probability: 0.0,
            },
            Severity::High => SeverityProfile {
                weight: 0.25,
                emergency_probability: 0.4,
                stay_days: (4, 8),
                ventilator_probability: 0.7,
                dialysis_probability: 0.0,
            },
            Severity::Critical => SeverityProfile {
                weight: 0.15,
                emergency_probability: 0.4,
                stay_days: (7, 14),
                ventilator_probability: 0.7,
                dialysis_probability: 0.4,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    /// The weighted severity draw
    pub fn distribution() -> Result<Categorical<Severity>, IcuError> {
        Categorical::new(Self::ALL.map(|s| (s, s.profile().weight)))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One synthetic ICU admission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRecord {
    /// "P" followed by the zero-padded sequence number (P0001)
    pub patient_id: String,
    pub severity: Severity,
    pub is_emergency: bool,
    pub predicted_stay_days: u32,
    pub ventilator_needed: bool,
    pub dialysis_needed: bool,
    /// Arrival, to the minute (seconds are always zero)
    pub arrival_time: NaiveDateTime,
}

/// Patient id for the n-th patient, starting at 1
pub fn make_patient_id(n: usize) -> String {
    format!("P{n:04}")
}

/// Arrival at a uniformly random day, hour and minute (three separate
/// draws) after the start of the window.
fn make_arrival_time<R: Rng + ?Sized>(rng: &mut R, start: NaiveDateTime) -> NaiveDateTime {
    let days = rng.gen_range(0..ARRIVAL_WINDOW_DAYS);
    let hours = rng.gen_range(0..=23);
    let minutes = rng.gen_range(0..=59);
    start + Duration::days(days) + Duration::hours(hours) + Duration::minutes(minutes)
}

fn make_patient<R: Rng + ?Sized>(
    rng: &mut R,
    severities: &Categorical<Severity>,
    n: usize,
    start: NaiveDateTime,
) -> PatientRecord {
    let severity = severities.sample(rng);
    let profile = severity.profile();

    let is_emergency = draw_flag(rng, profile.emergency_probability);
    let (min_stay, max_stay) = profile.stay_days;
    let predicted_stay_days = rng.gen_range(min_stay..=max_stay);
    let ventilator_needed = draw_flag(rng, profile.ventilator_probability);
    let dialysis_needed = draw_flag(rng, profile.dialysis_probability);
    let arrival_time = make_arrival_time(rng, start);

    PatientRecord {
        patient_id: make_patient_id(n),
        severity,
        is_emergency,
        predicted_stay_days,
        ventilator_needed,
        dialysis_needed,
        arrival_time,
    }
}

/// Generate `count` patients with ids P0001, P0002, ... whose arrival
/// times fall in the 60 days from midnight on `start_date`.
///
/// The random source is owned by the caller. Generating n patients
/// always gives the first n patients of a longer run from the same
/// source state.
pub fn make_patients<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    start_date: NaiveDate,
) -> Result<Vec<PatientRecord>, IcuError> {
    if count == 0 {
        return Err(IcuError::invalid("patient count must be positive"));
    }
    let severities = Severity::distribution()?;
    let start = start_date.and_time(NaiveTime::MIN);

    let patients: Vec<_> = (1..=count)
        .map(|n| make_patient(rng, &severities, n, start))
        .collect();

    debug!("Generated {} patients from {}", patients.len(), start_date);
    Ok(patients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeded_rng::make_rng;
    use std::collections::HashSet;

    fn reference_patients() -> Vec<PatientRecord> {
        let mut rng = make_rng(42, "icu_patient_dataset");
        make_patients(&mut rng, DEFAULT_PATIENT_COUNT, default_start_date()).unwrap()
    }

    #[test]
    fn zero_count_is_rejected() {
        let mut rng = make_rng(42, "icu_patient_dataset");
        assert!(matches!(
            make_patients(&mut rng, 0, default_start_date()),
            Err(IcuError::InvalidArgument(_))
        ));
    }

    #[test]
    fn ids_are_sequential_and_unique() {
        let patients = reference_patients();
        assert_eq!(patients.len(), 1500);
        assert_eq!(patients[0].patient_id, "P0001");
        assert_eq!(patients[1499].patient_id, "P1500");
        for (n, patient) in patients.iter().enumerate() {
            assert_eq!(patient.patient_id, make_patient_id(n + 1));
        }
        let ids: HashSet<_> = patients.iter().map(|p| &p.patient_id).collect();
        assert_eq!(ids.len(), patients.len());
    }

    #[test]
    fn same_seed_gives_same_patients() {
        assert_eq!(reference_patients(), reference_patients());
    }

    #[test]
    fn different_seed_gives_different_patients() {
        let mut rng = make_rng(7, "icu_patient_dataset");
        let other = make_patients(&mut rng, DEFAULT_PATIENT_COUNT, default_start_date()).unwrap();
        assert_ne!(reference_patients(), other);
    }

    #[test]
    fn equipment_follows_severity() {
        for patient in reference_patients() {
            if patient.ventilator_needed {
                assert!(matches!(
                    patient.severity,
                    Severity::High | Severity::Critical
                ));
            }
            if patient.dialysis_needed {
                assert_eq!(patient.severity, Severity::Critical);
            }
        }
    }

    #[test]
    fn stay_is_within_severity_range() {
        for patient in reference_patients() {
            let (min_stay, max_stay) = patient.severity.profile().stay_days;
            assert!(
                (min_stay..=max_stay).contains(&patient.predicted_stay_days),
                "{patient:?}"
            );
        }
    }

    #[test]
    fn arrival_is_within_window() {
        let start = default_start_date().and_time(NaiveTime::MIN);
        let end = start + Duration::days(ARRIVAL_WINDOW_DAYS);
        for patient in reference_patients() {
            assert!(patient.arrival_time >= start);
            assert!(patient.arrival_time < end);
            assert_eq!(patient.arrival_time.format("%S").to_string(), "00");
        }
    }

    #[test]
    fn every_severity_occurs_in_reference_run() {
        let severities: HashSet<_> = reference_patients().iter().map(|p| p.severity).collect();
        assert_eq!(severities.len(), Severity::ALL.len());
    }

    fn expected_patient(
        patient_id: &str,
        severity: Severity,
        is_emergency: bool,
        predicted_stay_days: u32,
        ventilator_needed: bool,
        dialysis_needed: bool,
        arrival_time: &str,
    ) -> PatientRecord {
        PatientRecord {
            patient_id: String::from(patient_id),
            severity,
            is_emergency,
            predicted_stay_days,
            ventilator_needed,
            dialysis_needed,
            arrival_time: NaiveDateTime::parse_from_str(arrival_time, ARRIVAL_TIME_FORMAT)
                .unwrap(),
        }
    }

    /// Seed 42 with three patients. The values are the ChaCha8 trace
    /// for the "icu_patient_dataset" stream, so any change to the draw
    /// order (or to the generator) shows up here.
    #[test]
    fn seed_42_three_patients() {
        let mut rng = make_rng(42, "icu_patient_dataset");
        let patients = make_patients(&mut rng, 3, default_start_date()).unwrap();
        let expected = vec![
            expected_patient("P0001", Severity::High, false, 6, true, false, "2026-01-22 13:06:00"),
            expected_patient("P0002", Severity::High, false, 7, true, false, "2026-02-09 23:32:00"),
            expected_patient("P0003", Severity::Medium, false, 5, false, false, "2026-02-22 06:55:00"),
        ];
        assert_eq!(patients, expected);
    }

    #[test]
    fn short_run_is_prefix_of_full_run() {
        let mut rng = make_rng(42, "icu_patient_dataset");
        let short = make_patients(&mut rng, 3, default_start_date()).unwrap();
        assert_eq!(short, reference_patients()[..3]);
    }

    #[test]
    fn severity_weights_sum_to_one() {
        let total: f64 = Severity::ALL.iter().map(|s| s.profile().weight).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn low_and_medium_never_draw_equipment() {
        for severity in [Severity::Low, Severity::Medium] {
            let profile = severity.profile();
            assert_eq!(profile.ventilator_probability, 0.0);
            assert_eq!(profile.dialysis_probability, 0.0);
        }
        assert_eq!(Severity::High.profile().dialysis_probability, 0.0);
    }
}
