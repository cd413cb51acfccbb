#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure encounter system that rolls wild encounters and catch attempts.
//!
//! The system watches for steps that end in grass and for catch requests,
//! rolls the configured odds through a [`Dice`] implementation, and answers
//! with `StartEncounter` and `ResolveCatch` commands.

mod species;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tallgrass_core::{Command, Event, SpeciesId};

pub use species::DEFAULT_SPECIES;

/// Source of the random rolls consumed by the encounter system.
pub trait Dice {
    /// Uniform roll in `[0, 1)`.
    fn roll(&mut self) -> f64;

    /// Uniform index in `[0, len)`; `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Deterministic dice backed by a seeded ChaCha stream.
#[derive(Clone, Debug)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    /// Creates dice that replay the same rolls for the same seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Dice for SeededDice {
    fn roll(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Odds and vocabulary used by the encounter system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterTuning {
    /// Chance that a step ending in grass starts an encounter.
    pub encounter_probability: f64,
    /// Chance that a thrown ball catches the wild species.
    pub catch_chance: f64,
    /// Species that may appear in the wild.
    pub species: Vec<SpeciesId>,
}

impl Default for EncounterTuning {
    fn default() -> Self {
        Self {
            encounter_probability: 0.10,
            catch_chance: 0.5,
            species: DEFAULT_SPECIES.iter().copied().map(SpeciesId::new).collect(),
        }
    }
}

/// Encounter system that turns grass steps and catch requests into commands.
#[derive(Clone, Debug, Default)]
pub struct Encounters {
    tuning: EncounterTuning,
}

impl Encounters {
    /// Creates the system with the provided odds.
    #[must_use]
    pub fn new(tuning: EncounterTuning) -> Self {
        Self { tuning }
    }

    /// Odds currently in use.
    #[must_use]
    pub fn tuning(&self) -> &EncounterTuning {
        &self.tuning
    }

    /// Consumes world events and emits encounter commands.
    ///
    /// At most one encounter is started per batch of events, however many
    /// grass steps the batch contains.
    pub fn handle<D>(&mut self, events: &[Event], dice: &mut D, out: &mut Vec<Command>)
    where
        D: Dice + ?Sized,
    {
        let mut encounter_started = false;

        for event in events {
            match event {
                Event::PlayerMoved { in_grass: true, .. } if !encounter_started => {
                    if self.tuning.species.is_empty() {
                        continue;
                    }
                    if dice.roll() < self.tuning.encounter_probability {
                        let index = dice.pick(self.tuning.species.len());
                        if let Some(species) = self.tuning.species.get(index) {
                            log::debug!("grass step triggered an encounter with {species}");
                            out.push(Command::StartEncounter {
                                species: species.clone(),
                            });
                            encounter_started = true;
                        }
                    }
                }
                Event::CatchRequested { species } => {
                    let caught = dice.roll() < self.tuning.catch_chance;
                    log::debug!("catch roll for {species}: {caught}");
                    out.push(Command::ResolveCatch { caught });
                }
                _ => {}
            }
        }
    }
}
