//! Weighted categorical draws shared by the patient and bed generators.
//!
//! A `Categorical` is built once from a table of (outcome, weight) pairs
//! and sampled as often as needed. Sampling consumes exactly one value
//! from the random source, and the weights do not need to sum to 1
//! (they are normalised by the cumulative total).

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::error::IcuError;

/// A finite set of outcomes with a selection weight for each
#[derive(Debug, Clone)]
pub struct Categorical<T> {
    outcomes: Vec<T>,
    index: WeightedIndex<f64>,
}

impl<T: Copy> Categorical<T> {
    /// Build the distribution from (outcome, weight) pairs. The order of
    /// the pairs matters for reproducibility: the same seed only picks
    /// the same outcomes if the table order is unchanged.
    ///
    /// Fails if there are no outcomes, if a weight is negative or not
    /// finite, or if all the weights are zero.
    pub fn new<I>(table: I) -> Result<Self, IcuError>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let (outcomes, weights): (Vec<T>, Vec<f64>) = table.into_iter().unzip();
        let index = WeightedIndex::new(&weights)
            .map_err(|e| IcuError::invalid(format!("weight table {weights:?}: {e}")))?;
        Ok(Self { outcomes, index })
    }

    /// The outcomes in table order
    pub fn outcomes(&self) -> &[T] {
        &self.outcomes
    }
}

impl<T: Copy> Distribution<T> for Categorical<T> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.outcomes[self.index.sample(rng)]
    }
}

/// Draw true with probability p.
///
/// Certain outcomes (p of 0 or 1) do not consume a draw, so a field
/// that is fixed for some categories leaves the random sequence of
/// the following fields unchanged.
pub fn draw_flag<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    if p <= 0.0 {
        false
    } else if p >= 1.0 {
        true
    } else {
        rng.gen_bool(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeded_rng::make_rng;

    #[test]
    fn empty_table_is_rejected() {
        let table: Vec<(u8, f64)> = Vec::new();
        assert!(matches!(
            Categorical::new(table),
            Err(IcuError::InvalidArgument(_))
        ));
    }

    #[test]
    fn all_zero_weights_are_rejected() {
        assert!(matches!(
            Categorical::new([('a', 0.0), ('b', 0.0)]),
            Err(IcuError::InvalidArgument(_))
        ));
    }

    #[test]
    fn negative_weight_is_rejected() {
        assert!(matches!(
            Categorical::new([('a', 1.0), ('b', -0.5)]),
            Err(IcuError::InvalidArgument(_))
        ));
    }

    #[test]
    fn zero_weight_outcome_is_never_drawn() {
        let dist = Categorical::new([('a', 0.0), ('b', 1.0), ('c', 0.0)]).unwrap();
        let mut rng = make_rng(1, "categorical");
        for _ in 0..1000 {
            assert_eq!(dist.sample(&mut rng), 'b');
        }
    }

    #[test]
    fn every_positive_weight_outcome_can_be_drawn() {
        let dist = Categorical::new([(1, 0.2), (2, 0.4), (3, 0.25), (4, 0.15)]).unwrap();
        let mut rng = make_rng(42, "categorical");
        let mut seen = [false; 4];
        for _ in 0..1000 {
            let x: usize = dist.sample(&mut rng);
            seen[x - 1] = true;
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn certain_flags_consume_no_draw() {
        let mut rng = make_rng(3, "draws");
        let mut untouched = make_rng(3, "draws");
        assert!(!draw_flag(&mut rng, 0.0));
        assert!(draw_flag(&mut rng, 1.0));
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn uncertain_flag_consumes_one_draw() {
        let mut rng = make_rng(3, "draws");
        let mut untouched = make_rng(3, "draws");
        draw_flag(&mut rng, 0.5);
        untouched.gen::<u64>();
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn outcomes_keep_table_order() {
        let dist = Categorical::new([("x", 2.0), ("y", 1.0)]).unwrap();
        assert_eq!(dist.outcomes(), &["x", "y"]);
    }
}
