use std::{fs, path::Path, time::Duration};

use anyhow::{ensure, Context, Result as AnyResult};
use serde::{Deserialize, Serialize};
use tallgrass_system_encounter::EncounterTuning;
use tallgrass_world::WorldConfig;

/// Settings that drive a headless session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SessionSettings {
    /// Simulated milliseconds that elapse per tick.
    pub(crate) tick_ms: u64,
    /// Minimum number of ticks to simulate, even after the script runs out.
    pub(crate) ticks: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            ticks: 0,
        }
    }
}

impl SessionSettings {
    /// Simulated time advanced by one tick.
    #[must_use]
    pub(crate) const fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Full configuration file layout.
///
/// Every table is optional; missing values fall back to the defaults of the
/// owning crate.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GameConfig {
    /// World and terrain tuning.
    pub(crate) world: WorldConfig,
    /// Encounter and catch odds.
    pub(crate) encounter: EncounterTuning,
    /// Headless session settings.
    pub(crate) session: SessionSettings,
}

impl GameConfig {
    /// Parses a configuration from TOML text and validates it.
    pub(crate) fn from_toml(contents: &str) -> AnyResult<Self> {
        let config: Self =
            toml::from_str(contents).context("failed to parse game configuration toml contents")?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects probabilities and speeds that the simulation cannot use.
    pub(crate) fn validate(&self) -> AnyResult<()> {
        let probabilities = [
            ("world.terrain.path.turn_chance", self.world.terrain.path.turn_chance),
            (
                "world.terrain.trees.placement_chance",
                self.world.terrain.trees.placement_chance,
            ),
            ("encounter.encounter_probability", self.encounter.encounter_probability),
            ("encounter.catch_chance", self.encounter.catch_chance),
        ];
        for (name, value) in probabilities {
            ensure!(
                value.is_finite() && (0.0..=1.0).contains(&value),
                "{name} must be a probability between 0 and 1, got {value}"
            );
        }

        let lengths = [
            ("world.walk_speed", self.world.walk_speed),
            ("world.run_speed", self.world.run_speed),
            ("world.terrain.tile_size", self.world.terrain.tile_size),
        ];
        for (name, value) in lengths {
            ensure!(
                value.is_finite() && value > 0.0,
                "{name} must be a positive number, got {value}"
            );
        }
        Ok(())
    }

    /// Loads a configuration file.
    pub(crate) fn load(path: &Path) -> AnyResult<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::GameConfig;

    #[test]
    fn empty_file_yields_defaults() {
        let config = GameConfig::from_toml("").expect("empty configuration parses");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn nested_tables_override_single_values() {
        let config = GameConfig::from_toml(
            r#"
            [world]
            seed = 42

            [world.terrain]
            columns = 16

            [encounter]
            encounter_probability = 0.25
            species = ["Mew"]

            [session]
            ticks = 90
            "#,
        )
        .expect("configuration parses");

        assert_eq!(config.world.seed, 42);
        assert_eq!(config.world.terrain.columns, 16);
        assert_eq!(config.world.terrain.rows, 12, "untouched values keep defaults");
        assert!((config.encounter.encounter_probability - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.encounter.species.len(), 1);
        assert_eq!(config.encounter.species[0].as_str(), "mew");
        assert_eq!(config.session.ticks, 90);
        assert_eq!(config.session.tick_ms, 16);
    }

    #[test]
    fn non_finite_probabilities_are_rejected() {
        for contents in [
            "[world.terrain.path]\nturn_chance = nan",
            "[world.terrain.trees]\nplacement_chance = inf",
            "[encounter]\ncatch_chance = 1.5",
        ] {
            let error = GameConfig::from_toml(contents).expect_err("invalid probability");
            assert!(
                error.to_string().contains("probability"),
                "unexpected error for {contents:?}: {error}"
            );
        }
    }

    #[test]
    fn speeds_must_be_positive() {
        assert!(GameConfig::from_toml("[world]\nwalk_speed = -1.0").is_err());
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn malformed_toml_is_reported() {
        assert!(GameConfig::from_toml("[world\nseed = 1").is_err());
    }
}
