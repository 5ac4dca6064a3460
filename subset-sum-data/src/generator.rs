//! Seeded random instance generation.
//!
//! Dense instances draw their elements from a tenth of the value range, so
//! many sub-collections collide on the same sums; sparse instances use the
//! whole range. Generation is reproducible for a fixed seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use subset_sum_core::{Density, Instance, InstanceError, InstanceSource};
use thiserror::Error;

/// How a generated instance's target is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetStyle {
    /// A uniformly drawn 40% to 60% of the set total.
    #[default]
    Fraction,
    /// Half the set total, rounded down.
    Partition,
    /// The same target for every instance.
    Fixed(u64),
}

/// Configuration for [`InstanceGenerator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Smallest set size, inclusive.
    pub min_size: usize,
    /// Largest set size, inclusive.
    pub max_size: usize,
    /// Largest element value for sparse instances.
    pub max_value: u64,
    /// Value range used for elements.
    pub density: Density,
    /// Target selection rule.
    pub target_style: TargetStyle,
    /// Seed for the random number generator.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_size: 10,
            max_size: 20,
            max_value: 1_000,
            density: Density::Sparse,
            target_style: TargetStyle::Fraction,
            seed: 42,
        }
    }
}

/// Errors raised when a [`GeneratorConfig`] cannot produce valid instances.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorConfigError {
    /// The size range is empty.
    #[error("minimum size {min_size} exceeds maximum size {max_size}")]
    InvertedSizeRange {
        /// Configured minimum.
        min_size: usize,
        /// Configured maximum.
        max_size: usize,
    },
    /// Elements must be at least 1.
    #[error("maximum element value must be at least 1")]
    ZeroMaxValue,
    /// The largest possible set could sum past `u64::MAX`.
    #[error("{max_size} elements of up to {max_value} could overflow the set total")]
    TotalOverflow {
        /// Configured maximum size.
        max_size: usize,
        /// Configured maximum value.
        max_value: u64,
    },
}

impl GeneratorConfig {
    /// Check that every instance this config can produce is valid.
    ///
    /// # Errors
    ///
    /// Returns a [`GeneratorConfigError`] naming the offending fields.
    pub fn validate(&self) -> Result<(), GeneratorConfigError> {
        if self.min_size > self.max_size {
            return Err(GeneratorConfigError::InvertedSizeRange {
                min_size: self.min_size,
                max_size: self.max_size,
            });
        }
        if self.max_value == 0 {
            return Err(GeneratorConfigError::ZeroMaxValue);
        }
        u64::try_from(self.max_size)
            .ok()
            .and_then(|size| size.checked_mul(self.max_value))
            .ok_or(GeneratorConfigError::TotalOverflow {
                max_size: self.max_size,
                max_value: self.max_value,
            })?;
        Ok(())
    }

    /// Largest element drawn for this config's density.
    #[must_use]
    #[expect(
        clippy::integer_division,
        reason = "dense instances use a tenth of the range, rounded down"
    )]
    pub fn value_ceiling(&self) -> u64 {
        match self.density {
            Density::Dense => (self.max_value / 10).max(1),
            Density::Sparse => self.max_value,
        }
    }
}

/// Seeded [`InstanceSource`] drawing random sets.
///
/// # Examples
///
/// ```
/// use subset_sum_core::InstanceSource;
/// use subset_sum_data::{GeneratorConfig, InstanceGenerator};
///
/// let config = GeneratorConfig::default();
/// let mut first = InstanceGenerator::new(config.clone()).unwrap();
/// let mut second = InstanceGenerator::new(config).unwrap();
/// assert_eq!(first.generate().unwrap(), second.generate().unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct InstanceGenerator {
    config: GeneratorConfig,
    rng: ChaCha8Rng,
}

impl InstanceGenerator {
    /// Validate `config` and seed the generator.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorConfigError`] when the config is invalid.
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorConfigError> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self { config, rng })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

impl InstanceSource for InstanceGenerator {
    type Error = InstanceError;

    fn generate(&mut self) -> Result<Instance, Self::Error> {
        let size = self
            .rng
            .gen_range(self.config.min_size..=self.config.max_size);
        let ceiling = self.config.value_ceiling();
        let set: Vec<u64> = (0..size)
            .map(|_| self.rng.gen_range(1..=ceiling))
            .collect();
        let total = set
            .iter()
            .try_fold(0_u64, |acc, &value| acc.checked_add(value))
            .ok_or(InstanceError::SumOverflow)?;
        let target = match self.config.target_style {
            TargetStyle::Fraction => permille_of(total, self.rng.gen_range(400..=600)),
            TargetStyle::Partition => permille_of(total, 500),
            TargetStyle::Fixed(target) => target,
        };
        Instance::new(set, target)
    }

    fn density(&self) -> Option<Density> {
        Some(self.config.density)
    }
}

/// `total * permille / 1000`, rounded down.
#[expect(
    clippy::integer_division,
    reason = "targets are whole numbers, rounded down"
)]
fn permille_of(total: u64, permille: u64) -> u64 {
    let scaled = u128::from(total) * u128::from(permille) / 1_000;
    u64::try_from(scaled).unwrap_or(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn generator(config: GeneratorConfig) -> InstanceGenerator {
        InstanceGenerator::new(config).expect("valid config")
    }

    fn draw(generator: &mut InstanceGenerator, count: usize) -> Vec<Instance> {
        (0..count)
            .map(|_| generator.generate().expect("valid instance"))
            .collect()
    }

    #[rstest]
    fn same_seed_reproduces_instances() {
        let config = GeneratorConfig::default();
        let first = draw(&mut generator(config.clone()), 5);
        let second = draw(&mut generator(config), 5);
        assert_eq!(first, second);
    }

    #[rstest]
    fn different_seeds_diverge() {
        let first = draw(&mut generator(GeneratorConfig::default()), 5);
        let second = draw(
            &mut generator(GeneratorConfig {
                seed: 7,
                ..GeneratorConfig::default()
            }),
            5,
        );
        assert_ne!(first, second);
    }

    #[rstest]
    #[case(Density::Dense, 100)]
    #[case(Density::Sparse, 1_000)]
    fn elements_respect_size_and_value_range(#[case] density: Density, #[case] ceiling: u64) {
        let mut source = generator(GeneratorConfig {
            min_size: 3,
            max_size: 8,
            density,
            ..GeneratorConfig::default()
        });
        assert_eq!(source.density(), Some(density));
        for instance in draw(&mut source, 20) {
            assert!((3..=8).contains(&instance.len()));
            assert!(instance.set().iter().all(|&value| (1..=ceiling).contains(&value)));
        }
    }

    #[rstest]
    fn dense_ceiling_never_drops_below_one() {
        let config = GeneratorConfig {
            max_value: 5,
            density: Density::Dense,
            ..GeneratorConfig::default()
        };
        assert_eq!(config.value_ceiling(), 1);
    }

    #[rstest]
    fn fraction_targets_fall_between_forty_and_sixty_percent() {
        for instance in draw(&mut generator(GeneratorConfig::default()), 20) {
            let total = instance.total();
            assert!(instance.target() >= permille_of(total, 400));
            assert!(instance.target() <= permille_of(total, 600));
        }
    }

    #[rstest]
    #[case(TargetStyle::Partition)]
    #[case(TargetStyle::Fixed(77))]
    fn explicit_target_styles(#[case] style: TargetStyle) {
        let mut source = generator(GeneratorConfig {
            target_style: style,
            ..GeneratorConfig::default()
        });
        for instance in draw(&mut source, 5) {
            let expected = match style {
                TargetStyle::Fixed(target) => target,
                _ => instance.total() / 2,
            };
            assert_eq!(instance.target(), expected);
        }
    }

    #[rstest]
    #[case(
        GeneratorConfig { min_size: 5, max_size: 4, ..GeneratorConfig::default() },
        GeneratorConfigError::InvertedSizeRange { min_size: 5, max_size: 4 }
    )]
    #[case(
        GeneratorConfig { max_value: 0, ..GeneratorConfig::default() },
        GeneratorConfigError::ZeroMaxValue
    )]
    #[case(
        GeneratorConfig { max_value: u64::MAX, ..GeneratorConfig::default() },
        GeneratorConfigError::TotalOverflow { max_size: 20, max_value: u64::MAX }
    )]
    fn rejects_invalid_configs(
        #[case] config: GeneratorConfig,
        #[case] expected: GeneratorConfigError,
    ) {
        assert_eq!(InstanceGenerator::new(config).map(|_| ()), Err(expected));
    }
}
