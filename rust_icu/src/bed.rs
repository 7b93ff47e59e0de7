//! Synthetic ICU bed inventory
//!
//! A bed type is drawn for each bed, and the equipment of the bed
//! follows from the type: General beds have none, Critical beds always
//! have a ventilator and usually dialysis, and Advanced beds sometimes
//! have a ventilator. Every bed starts out available.

use std::fmt;

use log::debug;
use rand::distributions::Distribution;
use rand::Rng;

use crate::categorical::{draw_flag, Categorical};
use crate::error::IcuError;

/// Number of beds in the reference dataset
pub const DEFAULT_BED_COUNT: usize = 60;

/// Capability tier of a bed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BedType {
    General,
    Advanced,
    Critical,
}

/// How the equipment of a bed is chosen, given its type.
///
/// A probability of 1 means the equipment is always present and
/// a probability of 0 means it never is; in both cases nothing
/// is drawn from the random source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BedProfile {
    pub weight: f64,
    pub ventilator_probability: f64,
    pub dialysis_probability: f64,
}

impl BedType {
    pub const ALL: [BedType; 3] = [BedType::General, BedType::Advanced, BedType::Critical];

    pub fn profile(self) -> BedProfile {
        match self {
            BedType::General => BedProfile {
                weight: 0.5,
                ventilator_probability: 0.0,
                dialysis_probability: 0.0,
            },
            BedType::Advanced => BedProfile {
                weight: 0.3,
                ventilator_probability: 0.6,
                dialysis_probability: 0.0,
            },
            BedType::Critical => BedProfile {
                weight: 0.2,
                ventilator_probability: 1.0,
                dialysis_probability: 0.7,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BedType::General => "General",
            BedType::Advanced => "Advanced",
            BedType::Critical => "Critical",
        }
    }

    /// The weighted bed type draw
    pub fn distribution() -> Result<Categorical<BedType>, IcuError> {
        Categorical::new(Self::ALL.map(|t| (t, t.profile().weight)))
    }
}

impl fmt::Display for BedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bed in the synthetic inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedRecord {
    /// "B" followed by the zero-padded sequence number (B001)
    pub bed_id: String,
    pub bed_type: BedType,
    pub ventilator_available: bool,
    pub dialysis_available: bool,
    /// Always true when the inventory is generated
    pub is_available: bool,
}

/// Bed id for the n-th bed, starting at 1
pub fn make_bed_id(n: usize) -> String {
    format!("B{n:03}")
}

fn make_bed<R: Rng + ?Sized>(rng: &mut R, bed_types: &Categorical<BedType>, n: usize) -> BedRecord {
    let bed_type = bed_types.sample(rng);
    let profile = bed_type.profile();
    let ventilator_available = draw_flag(rng, profile.ventilator_probability);
    let dialysis_available = draw_flag(rng, profile.dialysis_probability);
    BedRecord {
        bed_id: make_bed_id(n),
        bed_type,
        ventilator_available,
        dialysis_available,
        is_available: true,
    }
}

/// Generate `count` beds with ids B001, B002, ...
pub fn make_beds<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Result<Vec<BedRecord>, IcuError> {
    if count == 0 {
        return Err(IcuError::invalid("bed count must be positive"));
    }
    let bed_types = BedType::distribution()?;
    let beds: Vec<_> = (1..=count).map(|n| make_bed(rng, &bed_types, n)).collect();
    debug!("Generated {} beds", beds.len());
    Ok(beds)
}
