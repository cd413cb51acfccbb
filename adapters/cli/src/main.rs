#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Tallgrass headlessly from a key script.

mod ascii;
mod config;
mod script;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result as AnyResult};
use clap::Parser;
use tallgrass_persistence::{load_or_seed, JsonFileStore};
use tallgrass_rendering::draw_scene;
use tallgrass_world::query;

use crate::{ascii::AsciiRenderer, config::GameConfig, script::Script, session::Session};

/// Command-line arguments accepted by the Tallgrass driver.
#[derive(Debug, Parser)]
#[command(name = "tallgrass", about = "Explore procedurally generated tall grass")]
struct CliArgs {
    /// TOML file overriding world, encounter and session settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// World seed; overrides the configuration file.
    #[arg(long)]
    seed: Option<u64>,
    /// Chance in `[0, 1]` that a grass step starts an encounter.
    #[arg(long, value_name = "PROBABILITY")]
    encounter_rate: Option<f64>,
    /// Key script replayed one key per tick.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,
    /// Directory holding the saved party and dex.
    #[arg(long, value_name = "DIR", default_value = "tallgrass-save")]
    save_dir: PathBuf,
    /// Minimum number of ticks to simulate.
    #[arg(long)]
    ticks: Option<u32>,
}

/// Entry point for the Tallgrass command-line interface.
fn main() -> AnyResult<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let args = CliArgs::parse();
    let config = resolve_config(&args)?;
    let mut script = match &args.script {
        Some(path) => Script::from_file(path)?,
        None => Script::default(),
    };

    let mut store = JsonFileStore::new(&args.save_dir);
    let collection = load_or_seed(&mut store).with_context(|| {
        format!("failed to load the collection from {}", args.save_dir.display())
    })?;
    log::info!(
        "starting with {} party members and {} species in the dex",
        collection.party.len(),
        collection.pokedex.len()
    );

    let total_ticks = script.len().max(config.session.ticks as usize);
    let mut session = Session::new(&config, collection, store);
    for _ in 0..total_ticks {
        let _ = session.step(script.next_step())?;
    }

    let mut renderer = AsciiRenderer::new();
    draw_scene(&mut renderer, &session.scene()?)?;
    print!("{}", renderer.frame());

    let stats = session.stats();
    println!(
        "ticks {} | steps {} (blocked {}) | areas {} | encounters {} | caught {} | fled {} \
         | saves {} | ignored {}",
        stats.ticks,
        stats.steps,
        stats.blocked_steps,
        stats.areas_entered,
        stats.encounters,
        stats.catches,
        stats.escapes,
        stats.saves,
        stats.ignored_commands,
    );
    println!(
        "party: {}",
        query::party(session.world())
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}

fn resolve_config(args: &CliArgs) -> AnyResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }
    if let Some(rate) = args.encounter_rate {
        anyhow::ensure!(
            (0.0..=1.0).contains(&rate),
            "encounter rate {rate} must lie between 0 and 1"
        );
        config.encounter.encounter_probability = rate;
    }
    if let Some(ticks) = args.ticks {
        config.session.ticks = ticks;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::{resolve_config, CliArgs};
    use clap::Parser;

    #[test]
    fn flags_override_the_defaults() {
        let args = CliArgs::parse_from([
            "tallgrass",
            "--seed",
            "7",
            "--encounter-rate",
            "0.5",
            "--ticks",
            "30",
        ]);
        let config = resolve_config(&args).expect("valid flags");
        assert_eq!(config.world.seed, 7);
        assert!((config.encounter.encounter_probability - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.session.ticks, 30);
    }

    #[test]
    fn encounter_rate_outside_unit_range_is_rejected() {
        let args = CliArgs::parse_from(["tallgrass", "--encounter-rate", "1.5"]);
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
