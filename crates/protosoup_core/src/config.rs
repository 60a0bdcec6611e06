//! Configuration management for simulation parameters.
//!
//! Strongly-typed configuration that maps to an optional `config.toml`.
//! Defaults carry the canonical soup constants; a config file only needs to
//! name the values it overrides.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 800
//! height = 600
//! temperature = 300.0
//! seed = 42
//!
//! [kinetics]
//! mutation_rate = 0.01
//! max_chains = 50
//! ```

use serde::{Deserialize, Serialize};

/// The bounded plane and its ambient conditions.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    /// Kelvin-scaled; drives movement magnitude.
    pub temperature: f64,
    /// Reserved. No operator reads it yet.
    pub ph: f64,
    /// Chains scattered across the soup at construction.
    pub initial_chains: usize,
    /// Fixed RNG seed for reproducible runs; OS entropy when unset.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            temperature: 300.0,
            ph: 7.0,
            initial_chains: 20,
            seed: None,
        }
    }
}

/// Per-tick stochastic rates and limits of the step pipeline.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct KineticsConfig {
    /// Probability per tick of synthesizing one new chain.
    pub generation_rate: f64,
    /// Probability per chain per tick of one mutation operator firing.
    pub mutation_rate: f64,
    /// Probability per sampled pair per tick of a crossover.
    pub combination_rate: f64,
    /// Hard cap on the number of chains alive at once.
    pub max_chains: usize,
    /// Crossover pair samples per tick.
    pub max_combinations: usize,
    /// Base movement speed before temperature scaling.
    pub movement_speed: f64,
    /// Length bounds for freshly generated chains, inclusive.
    pub spawn_min_len: usize,
    pub spawn_max_len: usize,
}

impl Default for KineticsConfig {
    fn default() -> Self {
        Self {
            generation_rate: 0.005,
            mutation_rate: 0.01,
            combination_rate: 0.01,
            max_chains: 50,
            max_combinations: 10,
            movement_speed: 2.0,
            spawn_min_len: 1,
            spawn_max_len: 3,
        }
    }
}

/// Optional reaction passes recovered from earlier engine revisions.
/// All disabled by default; the shipped pipeline never ran them.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ExtensionsConfig {
    /// Enables the chain degradation pass.
    pub degradation: bool,
    /// Enables the abiotic synthesis pass (H2O + CH4 -> CH3OH).
    pub synthesis: bool,
    /// Base per-tick degradation probability, scaled up by chain length.
    pub degradation_rate: f64,
    /// Minimum energy both partners need to react.
    pub reaction_threshold: f64,
    /// Maximum distance between synthesis partners.
    pub reaction_radius: f64,
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        Self {
            degradation: false,
            synthesis: false,
            degradation_rate: 0.05,
            reaction_threshold: 0.7,
            reaction_radius: 5.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SoupConfig {
    pub world: WorldConfig,
    pub kinetics: KineticsConfig,
    pub extensions: ExtensionsConfig,
}

impl SoupConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` describing
    /// the first violation.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.world.width > 0, "World width must be positive");
        anyhow::ensure!(self.world.height > 0, "World height must be positive");
        anyhow::ensure!(
            self.world.temperature >= 0.0,
            "Temperature must be non-negative"
        );

        anyhow::ensure!(
            (0.0..=1.0).contains(&self.kinetics.generation_rate),
            "Generation rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.kinetics.mutation_rate),
            "Mutation rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.kinetics.combination_rate),
            "Combination rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.kinetics.max_chains > 0,
            "Chain cap must be positive"
        );
        anyhow::ensure!(
            self.kinetics.movement_speed >= 0.0,
            "Movement speed must be non-negative"
        );
        anyhow::ensure!(
            self.kinetics.spawn_min_len >= 1,
            "Spawned chains must have at least one residue"
        );
        anyhow::ensure!(
            self.kinetics.spawn_min_len <= self.kinetics.spawn_max_len,
            "Spawn length bounds are inverted"
        );

        anyhow::ensure!(
            (0.0..=1.0).contains(&self.extensions.degradation_rate),
            "Degradation rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.extensions.reaction_radius >= 0.0,
            "Reaction radius must be non-negative"
        );

        Ok(())
    }

    /// Loads and validates configuration from TOML content.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(SoupConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_world_width() {
        let config = SoupConfig {
            world: WorldConfig {
                width: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_mutation_rate() {
        let config = SoupConfig {
            kinetics: KineticsConfig {
                mutation_rate: 1.5,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_spawn_bounds() {
        let config = SoupConfig {
            kinetics: KineticsConfig {
                spawn_min_len: 4,
                spawn_max_len: 2,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_temperature_rejected() {
        let config = SoupConfig {
            world: WorldConfig {
                temperature: -1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SoupConfig::from_toml("[world]\nwidth = 400\nseed = 9\n").unwrap();
        assert_eq!(config.world.width, 400);
        assert_eq!(config.world.seed, Some(9));
        assert_eq!(config.world.height, 600);
        assert_eq!(config.kinetics.max_chains, 50);
    }

    #[test]
    fn test_invalid_toml_value_rejected() {
        assert!(SoupConfig::from_toml("[kinetics]\nmutation_rate = 2.0\n").is_err());
    }
}
