//! Per-condition probability estimates.
//!
//! Without observations the estimate is a surrogate built from how far the
//! location is from the equator plus a bounded random perturbation. With
//! observations it is the share of samples on the adverse side of the
//! threshold. Both are reported in whole percentage points in
//! [`MIN_PROBABILITY`, `MAX_PROBABILITY`].

use awp_core::{condition::Condition, location::Location};
use awp_stats::Statistics;
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Lowest probability ever reported.
pub const MIN_PROBABILITY: u8 = 5;

/// Highest probability ever reported.
pub const MAX_PROBABILITY: u8 = 95;

/// Where an estimate came from.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum EstimateSource {
    /// Latitude heuristic plus random perturbation
    Surrogate,
    /// Threshold crossings in caller-supplied observations
    Observed(Statistics),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Estimate {
    pub probability: u8,
    pub source: EstimateSource,
}

/// Estimates condition probabilities from an injected random source.
///
/// Production code seeds from OS entropy via [`ProbabilityModel::from_entropy`];
/// tests and reproducible runs use [`ProbabilityModel::seeded`].
#[derive(Debug, Clone)]
pub struct ProbabilityModel<R> {
    rng: R,
}

impl ProbabilityModel<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ProbabilityModel<R> {
    pub fn new(rng: R) -> Self {
        ProbabilityModel { rng }
    }

    /// Estimate the probability of `condition` at `location`.
    ///
    /// `samples`, when present and non-empty, replaces the surrogate.
    pub fn estimate(
        &mut self,
        location: &Location,
        condition: Condition,
        threshold: f64,
        samples: Option<&[f64]>,
    ) -> Estimate {
        match samples.filter(|values| !values.is_empty()) {
            Some(values) => {
                let statistics = Statistics::calculate(values, threshold);
                let percent = adverse_share(condition, &statistics);
                let probability = to_probability(percent / 100.0);
                debug!(
                    "{condition}: {probability}% from {} samples against {threshold}",
                    statistics.count
                );
                Estimate {
                    probability,
                    source: EstimateSource::Observed(statistics),
                }
            }
            None => {
                let probability = to_probability(self.surrogate_base(location, condition));
                debug!("{condition}: {probability}% from surrogate");
                Estimate {
                    probability,
                    source: EstimateSource::Surrogate,
                }
            }
        }
    }

    /// Surrogate base probability before scaling and clamping. The draw is
    /// in [0, 1), but after floating point rounding the base can reach its
    /// upper bound (0.7 for very-hot at the equator).
    ///
    /// Longitude does not take part. Every condition has its own formula;
    /// a condition added without one would get `U(0, 0.5)`.
    pub fn surrogate_base(&mut self, location: &Location, condition: Condition) -> f64 {
        let lat_factor = location.latitude().abs() / 90.0;
        match condition {
            Condition::VeryHot => (1.0 - lat_factor) * 0.4 + self.uniform(0.3),
            Condition::VeryCold => lat_factor * 0.4 + self.uniform(0.3),
            Condition::VeryWindy => 0.2 + self.uniform(0.4),
            Condition::VeryWet => (1.0 - lat_factor) * 0.3 + self.uniform(0.3),
            Condition::PoorAirQuality => 0.1 + self.uniform(0.3),
        }
    }

    /// Uniform draw in [0, upper).
    fn uniform(&mut self, upper: f64) -> f64 {
        self.rng.random::<f64>() * upper
    }
}

/// Percentage of samples on the adverse side of the threshold. Cold is
/// adverse at or below its threshold, every other condition strictly above.
///
/// Cold deliberately uses the below share rather than the above share, so a
/// reading equal to the cold threshold counts as adverse.
fn adverse_share(condition: Condition, statistics: &Statistics) -> f64 {
    match condition {
        Condition::VeryCold => statistics.probability_below_threshold,
        _ => statistics.probability_above_threshold,
    }
}

/// Scale a [0, 1] fraction to whole percent, rounding half to even, and
/// clamp into [`MIN_PROBABILITY`, `MAX_PROBABILITY`].
pub fn to_probability(fraction: f64) -> u8 {
    let percent = (fraction * 100.0).round_ties_even();
    percent.clamp(f64::from(MIN_PROBABILITY), f64::from(MAX_PROBABILITY)) as u8
}

#[cfg(test)]
mod tests {
    use super::{
        to_probability, EstimateSource, ProbabilityModel, MAX_PROBABILITY, MIN_PROBABILITY,
    };
    use awp_core::{condition::Condition, location::Location};
    use rand::RngCore;

    /// Yields the same word on every draw.
    struct FixedRng(u64);

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            (self.0 >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for (i, byte) in dst.iter_mut().enumerate() {
                *byte = self.0.to_le_bytes()[i % 8];
            }
        }
    }

    fn quito() -> Location {
        Location::new("Quito", -0.22, -78.51, "search").unwrap()
    }

    /// A generator whose every `f64` draw is 0.
    fn zero_rng() -> FixedRng {
        FixedRng(0)
    }

    /// A generator whose every `f64` draw is just below 1.
    fn max_rng() -> FixedRng {
        FixedRng(u64::MAX)
    }

    #[test]
    fn test_to_probability_clamps() {
        assert_eq!(to_probability(0.0), MIN_PROBABILITY);
        assert_eq!(to_probability(0.01), MIN_PROBABILITY);
        assert_eq!(to_probability(0.5), 50);
        assert_eq!(to_probability(0.99), MAX_PROBABILITY);
        assert_eq!(to_probability(1.0), MAX_PROBABILITY);
    }

    #[test]
    fn test_to_probability_rounds_half_to_even() {
        assert_eq!(to_probability(0.125), 12);
        assert_eq!(to_probability(0.375), 38);
    }

    #[test]
    fn test_surrogate_lower_bounds_with_zero_draw() {
        let mut model = ProbabilityModel::new(zero_rng());
        let equator = Location::new("Equator", 0.0, 0.0, "map").unwrap();
        let pole = Location::new("Pole", 90.0, 0.0, "map").unwrap();
        assert!((model.surrogate_base(&equator, Condition::VeryHot) - 0.4).abs() < 1e-12);
        assert!((model.surrogate_base(&pole, Condition::VeryHot)).abs() < 1e-12);
        assert!((model.surrogate_base(&pole, Condition::VeryCold) - 0.4).abs() < 1e-12);
        assert!((model.surrogate_base(&equator, Condition::VeryWindy) - 0.2).abs() < 1e-12);
        assert!((model.surrogate_base(&equator, Condition::VeryWet) - 0.3).abs() < 1e-12);
        assert!((model.surrogate_base(&pole, Condition::PoorAirQuality) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_surrogate_upper_bounds_with_max_draw() {
        let mut model = ProbabilityModel::new(max_rng());
        let equator = Location::new("Equator", 0.0, 0.0, "map").unwrap();
        let hot = model.surrogate_base(&equator, Condition::VeryHot);
        assert!(hot <= 0.7 && hot > 0.69, "{hot}");
        let windy = model.surrogate_base(&equator, Condition::VeryWindy);
        assert!(windy <= 0.6 && windy > 0.59, "{windy}");
    }

    #[test]
    fn test_quito_very_hot_top_draw_rounds_to_70() {
        let mut model = ProbabilityModel::new(max_rng());
        let estimate = model.estimate(&quito(), Condition::VeryHot, 90.0, None);
        assert_eq!(estimate.probability, 70);
    }

    #[test]
    fn test_every_condition_has_its_own_formula() {
        let equator = Location::new("Equator", 0.0, 0.0, "map").unwrap();
        let floors = [0.4, 0.0, 0.2, 0.3, 0.1];
        let spans = [0.3, 0.3, 0.4, 0.3, 0.3];
        for (i, condition) in Condition::ALL.into_iter().enumerate() {
            let low = ProbabilityModel::new(zero_rng()).surrogate_base(&equator, condition);
            let high = ProbabilityModel::new(max_rng()).surrogate_base(&equator, condition);
            assert!((low - floors[i]).abs() < 1e-12, "{condition}: {low}");
            assert!((high - floors[i] - spans[i]).abs() < 1e-9, "{condition}: {high}");
        }
    }

    #[test]
    fn test_longitude_does_not_matter() {
        let west = Location::new("West", 45.0, -170.0, "map").unwrap();
        let east = Location::new("East", 45.0, 170.0, "map").unwrap();
        for condition in Condition::ALL {
            let a = ProbabilityModel::seeded(7).surrogate_base(&west, condition);
            let b = ProbabilityModel::seeded(7).surrogate_base(&east, condition);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_estimates_stay_in_range() {
        let mut model = ProbabilityModel::seeded(2024);
        for lat in [-90.0, -45.0, -0.22, 0.0, 23.5, 66.5, 90.0] {
            let location = Location::new("Somewhere", lat, 10.0, "map").unwrap();
            for condition in Condition::ALL {
                for _ in 0..50 {
                    let estimate = model.estimate(&location, condition, 0.0, None);
                    assert!((MIN_PROBABILITY..=MAX_PROBABILITY).contains(&estimate.probability));
                }
            }
        }
    }

    #[test]
    fn test_quito_very_hot_range() {
        let mut model = ProbabilityModel::from_entropy();
        for _ in 0..200 {
            let estimate = model.estimate(&quito(), Condition::VeryHot, 90.0, None);
            assert!((40..=70).contains(&estimate.probability), "{}", estimate.probability);
            assert_eq!(estimate.source, EstimateSource::Surrogate);
        }
    }

    #[test]
    fn test_quito_very_hot_is_exact_with_pinned_draw() {
        let mut model = ProbabilityModel::new(zero_rng());
        let estimate = model.estimate(&quito(), Condition::VeryHot, 90.0, None);
        // (1 - 0.22 / 90) * 0.4 = 0.39902.. -> 40
        assert_eq!(estimate.probability, 40);
    }

    #[test]
    fn test_seeded_models_agree() {
        let mut a = ProbabilityModel::seeded(99);
        let mut b = ProbabilityModel::seeded(99);
        for condition in Condition::ALL {
            assert_eq!(
                a.estimate(&quito(), condition, 0.0, None),
                b.estimate(&quito(), condition, 0.0, None)
            );
        }
    }

    #[test]
    fn test_samples_replace_surrogate() {
        let mut model = ProbabilityModel::new(zero_rng());
        let samples = [85.0, 92.0, 95.0, 70.0];
        let estimate = model.estimate(&quito(), Condition::VeryHot, 90.0, Some(&samples));
        assert_eq!(estimate.probability, 50);
        match estimate.source {
            EstimateSource::Observed(stats) => assert_eq!(stats.count, 4),
            EstimateSource::Surrogate => panic!("expected observed estimate"),
        }
    }

    #[test]
    fn test_cold_samples_count_below_threshold() {
        let mut model = ProbabilityModel::new(zero_rng());
        let samples = [20.0, 30.0, 32.0, 40.0];
        let estimate = model.estimate(&quito(), Condition::VeryCold, 32.0, Some(&samples));
        // 32.0 sits on the threshold and counts as cold
        assert_eq!(estimate.probability, 75);
    }

    #[test]
    fn test_observed_estimate_is_clamped() {
        let mut model = ProbabilityModel::new(zero_rng());
        let samples = [100.0, 101.0];
        let estimate = model.estimate(&quito(), Condition::VeryHot, 90.0, Some(&samples));
        assert_eq!(estimate.probability, MAX_PROBABILITY);
    }

    #[test]
    fn test_empty_samples_fall_back_to_surrogate() {
        let mut model = ProbabilityModel::new(zero_rng());
        let estimate = model.estimate(&quito(), Condition::VeryHot, 90.0, Some(&[]));
        assert_eq!(estimate.source, EstimateSource::Surrogate);
    }
}
