#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state for Tallgrass.
//!
//! The [`World`] owns the active area, the player, the world and panel
//! modes, and the collection. [`apply`] is the only way to mutate it; every
//! observable change is reported back as an [`Event`]. Commands that make no
//! sense in the current mode degrade to "no state change" and, where useful,
//! an [`Event::CommandIgnored`] explaining why.

mod area;
mod collision;
mod roster;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tallgrass_core::{
    Aabb, ActorSnapshot, AreaCoordinate, Command, Direction, EncounterOutcome, EncounterPhase,
    Event, PanelMode, RejectionReason, Size, SpeciesId, WorldMode, WorldPoint, MAX_PARTY_SIZE,
};
use tallgrass_system_terrain::TerrainTuning;

pub use area::AreaModel;
pub use collision::{can_move, CollisionIndex};
pub use roster::{PartyRoster, Pokedex};

const DEFAULT_SEED: u64 = 0x7a11_9a55_5eed_0001;

/// Tunable parameters of the world simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Terrain generation knobs applied to every area.
    pub terrain: TerrainTuning,
    /// Seed mixed with each area coordinate to generate its layout.
    pub seed: u64,
    /// Collision extents of the player.
    pub actor_size: Size,
    /// Distance covered per step while walking.
    pub walk_speed: f32,
    /// Distance covered per step while running.
    pub run_speed: f32,
    /// Largest number of party members.
    pub party_capacity: usize,
    /// Time the catch result stays on screen before exploration resumes.
    pub catch_display_delay_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            terrain: TerrainTuning::default(),
            seed: DEFAULT_SEED,
            actor_size: Size::new(32.0, 48.0),
            walk_speed: 1.5,
            run_speed: 2.0,
            party_capacity: MAX_PARTY_SIZE,
            catch_display_delay_ms: 1500,
        }
    }
}

impl WorldConfig {
    /// Delay between a successful catch and the return to exploration.
    #[must_use]
    pub const fn catch_display_delay(&self) -> Duration {
        Duration::from_millis(self.catch_display_delay_ms)
    }
}

#[derive(Clone, Copy, Debug)]
struct Actor {
    position: WorldPoint,
    size: Size,
    facing: Direction,
    moving: bool,
}

impl Actor {
    fn bounds_at(&self, center: WorldPoint) -> Aabb {
        Aabb::from_center(center, self.size)
    }

    fn snapshot(&self) -> ActorSnapshot {
        ActorSnapshot {
            position: self.position,
            size: self.size,
            facing: self.facing,
            moving: self.moving,
        }
    }
}

/// Represents the authoritative Tallgrass game state.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    area: AreaModel,
    actor: Actor,
    mode: WorldMode,
    panel: PanelMode,
    party: PartyRoster,
    pokedex: Pokedex,
    message: Option<String>,
    tick_index: u64,
}

impl World {
    /// Creates a world with an empty collection.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        Self::with_collection(config, Vec::new(), Vec::new())
    }

    /// Creates a world whose party and dex start from stored lists.
    #[must_use]
    pub fn with_collection(
        config: WorldConfig,
        party: Vec<SpeciesId>,
        pokedex: Vec<SpeciesId>,
    ) -> Self {
        let area = AreaModel::generate(AreaCoordinate::ORIGIN, &config.terrain, config.seed);
        let start = area.layout().start_tile().center(area.layout().tile_size());
        let actor = Actor {
            position: start,
            size: config.actor_size,
            facing: Direction::Down,
            moving: false,
        };
        Self {
            party: PartyRoster::from_members(party, config.party_capacity),
            pokedex: Pokedex::from_species(pokedex),
            config,
            area,
            actor,
            mode: WorldMode::Exploring,
            panel: PanelMode::Main,
            message: None,
            tick_index: 0,
        }
    }

    fn step_player(&mut self, direction: Direction, running: bool, out_events: &mut Vec<Event>) {
        if !self.mode.accepts_movement() {
            out_events.push(Event::CommandIgnored {
                reason: RejectionReason::WrongMode,
            });
            return;
        }

        self.actor.facing = direction;
        self.actor.moving = true;

        let speed = if running {
            self.config.run_speed
        } else {
            self.config.walk_speed
        };
        let (dx, dy) = direction.offset();
        let from = self.actor.position;
        let proposed = from.translated(dx as f32 * speed, dy as f32 * speed);
        let bounds = self.actor.bounds_at(proposed);

        if !self.area.obstacles().can_move(&bounds) {
            out_events.push(Event::PlayerBlocked {
                attempted: proposed,
            });
            return;
        }

        if let Some(edge) = self.area.exit_direction(proposed) {
            self.change_area(edge, proposed, out_events);
            return;
        }

        self.actor.position = proposed;
        out_events.push(Event::PlayerMoved {
            from,
            to: proposed,
            in_grass: self.area.overlaps_grass(&bounds),
        });
    }

    fn change_area(&mut self, edge: Direction, proposed: WorldPoint, out_events: &mut Vec<Event>) {
        let previous = self.area.coordinate();
        self.set_mode(WorldMode::Transitioning, out_events);
        out_events.push(Event::AreaExited {
            area: previous,
            direction: edge,
        });

        let next = previous.step(edge);
        self.area = AreaModel::generate(next, &self.config.terrain, self.config.seed);
        let spawn = self.area.entry_point(
            edge,
            proposed,
            self.actor.size.width / 2.0,
            self.actor.size.height / 2.0,
        );
        self.actor.position = spawn;
        log::debug!("player left area {previous} heading {}", edge.as_str());

        out_events.push(Event::AreaEntered { area: next, spawn });
        self.set_mode(WorldMode::Exploring, out_events);
    }

    fn start_encounter(&mut self, species: SpeciesId, out_events: &mut Vec<Event>) {
        if self.mode != WorldMode::Exploring {
            out_events.push(Event::CommandIgnored {
                reason: RejectionReason::WrongMode,
            });
            return;
        }

        log::info!("a wild {species} appeared");
        self.actor.moving = false;
        out_events.push(Event::EncounterStarted {
            species: species.clone(),
        });
        let text = format!("A wild {} appeared!", species.display_name());
        self.post_message(text, out_events);
        self.set_mode(
            WorldMode::Encounter {
                species,
                phase: EncounterPhase::Active,
            },
            out_events,
        );
        self.set_panel(PanelMode::BattleMenu, out_events);
    }

    fn active_species(&self) -> Option<SpeciesId> {
        match &self.mode {
            WorldMode::Encounter {
                species,
                phase: EncounterPhase::Active,
            } => Some(species.clone()),
            _ => None,
        }
    }

    fn throw_ball(&mut self, out_events: &mut Vec<Event>) {
        match self.active_species() {
            Some(species) => {
                let text = format!("You threw a ball at {}!", species.display_name());
                self.post_message(text, out_events);
                out_events.push(Event::CatchRequested { species });
            }
            None => out_events.push(Event::CommandIgnored {
                reason: RejectionReason::WrongMode,
            }),
        }
    }

    fn resolve_catch(&mut self, caught: bool, out_events: &mut Vec<Event>) {
        let Some(species) = self.active_species() else {
            out_events.push(Event::CommandIgnored {
                reason: RejectionReason::WrongMode,
            });
            return;
        };

        if !caught {
            out_events.push(Event::CatchFailed {
                species: species.clone(),
            });
            let text = format!("{} broke free!", species.display_name());
            self.post_message(text, out_events);
            return;
        }

        if self.pokedex.add(species.clone()) {
            out_events.push(Event::PokedexChanged {
                species: self.pokedex.to_vec(),
            });
        }
        let added_to_party = self.party.add(species.clone());
        if added_to_party {
            out_events.push(Event::PartyChanged {
                members: self.party.members().to_vec(),
            });
        }
        log::info!("caught {species} (joined party: {added_to_party})");

        out_events.push(Event::SpeciesCaught {
            species: species.clone(),
            added_to_party,
        });
        let message = if added_to_party {
            format!("Caught {}!", species.display_name())
        } else {
            format!("Caught {}! It was sent to the dex.", species.display_name())
        };
        self.post_message(message, out_events);

        let delay = self.config.catch_display_delay();
        if delay.is_zero() {
            self.end_encounter(EncounterOutcome::Caught, out_events);
        } else {
            self.set_mode(
                WorldMode::Encounter {
                    species,
                    phase: EncounterPhase::Departing { remaining: delay },
                },
                out_events,
            );
        }
    }

    fn advance_encounter(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let WorldMode::Encounter {
            phase: EncounterPhase::Departing { remaining },
            ..
        } = &mut self.mode
        else {
            return;
        };

        *remaining = remaining.saturating_sub(dt);
        if remaining.is_zero() {
            self.end_encounter(EncounterOutcome::Caught, out_events);
        }
    }

    fn flee(&mut self, out_events: &mut Vec<Event>) {
        if self.active_species().is_none() {
            out_events.push(Event::CommandIgnored {
                reason: RejectionReason::WrongMode,
            });
            return;
        }
        self.post_message(String::from("Got away safely!"), out_events);
        self.end_encounter(EncounterOutcome::Fled, out_events);
    }

    fn end_encounter(&mut self, outcome: EncounterOutcome, out_events: &mut Vec<Event>) {
        let Some(species) = self.mode.encounter_species().cloned() else {
            return;
        };
        log::info!("encounter with {species} ended: {outcome:?}");
        out_events.push(Event::EncounterEnded { species, outcome });
        self.set_mode(WorldMode::Exploring, out_events);
        self.set_panel(PanelMode::Main, out_events);
    }

    fn navigate_panel(&mut self, target: PanelMode, out_events: &mut Vec<Event>) {
        if target == self.panel {
            return;
        }

        let rejection = match &self.mode {
            WorldMode::Transitioning => Some(RejectionReason::WrongMode),
            WorldMode::Encounter { .. } if !target.is_battle() => Some(RejectionReason::WrongMode),
            WorldMode::Exploring | WorldMode::PanelOverlay if target.is_battle() => {
                Some(RejectionReason::WrongMode)
            }
            _ if !self.panel.can_navigate_to(target) => {
                Some(RejectionReason::InvalidPanelTransition)
            }
            _ => match target {
                PanelMode::SlotOptions { slot }
                | PanelMode::DexSwitch { slot }
                | PanelMode::SlotSwap { slot }
                    if slot >= self.party.len() =>
                {
                    Some(RejectionReason::SlotOutOfRange)
                }
                _ => None,
            },
        };
        if let Some(reason) = rejection {
            out_events.push(Event::CommandIgnored { reason });
            return;
        }

        self.set_panel(target, out_events);
        if !target.is_battle() {
            if target == PanelMode::Main {
                self.set_mode(WorldMode::Exploring, out_events);
            } else {
                self.actor.moving = false;
                self.set_mode(WorldMode::PanelOverlay, out_events);
            }
        }
    }

    fn edit_party<F>(&mut self, edit: F, out_events: &mut Vec<Event>)
    where
        F: FnOnce(&mut PartyRoster, &Pokedex) -> Result<(), RejectionReason>,
    {
        if self.mode != WorldMode::PanelOverlay {
            out_events.push(Event::CommandIgnored {
                reason: RejectionReason::WrongMode,
            });
            return;
        }

        let before = self.party.clone();
        match edit(&mut self.party, &self.pokedex) {
            Ok(()) => {
                if self.party != before {
                    out_events.push(Event::PartyChanged {
                        members: self.party.members().to_vec(),
                    });
                }
                self.set_panel(PanelMode::PartyList, out_events);
            }
            Err(reason) => out_events.push(Event::CommandIgnored { reason }),
        }
    }

    fn post_message(&mut self, text: String, out_events: &mut Vec<Event>) {
        self.message = Some(text.clone());
        out_events.push(Event::MessagePosted { text });
    }

    fn set_mode(&mut self, mode: WorldMode, out_events: &mut Vec<Event>) {
        if self.mode != mode {
            self.mode = mode.clone();
            out_events.push(Event::WorldModeChanged { mode });
        }
    }

    fn set_panel(&mut self, mode: PanelMode, out_events: &mut Vec<Event>) {
        if self.panel != mode {
            self.panel = mode;
            out_events.push(Event::PanelModeChanged { mode });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
            world.advance_encounter(dt, out_events);
        }
        Command::StepPlayer { direction, running } => {
            world.step_player(direction, running, out_events);
        }
        Command::HaltPlayer => world.actor.moving = false,
        Command::StartEncounter { species } => world.start_encounter(species, out_events),
        Command::ThrowBall => world.throw_ball(out_events),
        Command::ResolveCatch { caught } => world.resolve_catch(caught, out_events),
        Command::Flee => world.flee(out_events),
        Command::SetPanelMode { mode } => world.navigate_panel(mode, out_events),
        Command::ReplacePartySlot { slot, species } => world.edit_party(
            |party, pokedex| {
                if pokedex.contains(&species) {
                    party.replace(slot, species)
                } else {
                    Err(RejectionReason::UnknownSpecies)
                }
            },
            out_events,
        ),
        Command::SwapPartySlots { first, second } => {
            world.edit_party(|party, _| party.swap(first, second), out_events);
        }
        Command::RemovePartySlot { slot } => {
            world.edit_party(|party, _| party.remove(slot).map(|_| ()), out_events);
        }
        Command::PostMessage { text } => world.post_message(text, out_events),
        Command::RequestSave => out_events.push(Event::SaveRequested),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use tallgrass_core::{
        ActorSnapshot, AreaCoordinate, PanelMode, PanelView, SpeciesId, WorldMode,
    };

    use super::{AreaModel, World, WorldConfig};

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &WorldConfig {
        &world.config
    }

    /// Coordinate of the active area.
    #[must_use]
    pub fn area_coordinate(world: &World) -> AreaCoordinate {
        world.area.coordinate()
    }

    /// The active area, including its layout and obstacles.
    #[must_use]
    pub fn area(world: &World) -> &AreaModel {
        &world.area
    }

    /// Snapshot of the player.
    #[must_use]
    pub fn actor(world: &World) -> ActorSnapshot {
        world.actor.snapshot()
    }

    /// Current world mode.
    #[must_use]
    pub fn mode(world: &World) -> &WorldMode {
        &world.mode
    }

    /// Mode shown by the side panel.
    #[must_use]
    pub fn panel_mode(world: &World) -> PanelMode {
        world.panel
    }

    /// Party members in slot order.
    #[must_use]
    pub fn party(world: &World) -> &[SpeciesId] {
        world.party.members()
    }

    /// Every caught species in sorted order.
    #[must_use]
    pub fn pokedex(world: &World) -> Vec<SpeciesId> {
        world.pokedex.to_vec()
    }

    /// Message currently displayed by the panel.
    #[must_use]
    pub fn message(world: &World) -> Option<&str> {
        world.message.as_deref()
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Everything the side panel needs to build its menus.
    #[must_use]
    pub fn panel_view(world: &World) -> PanelView {
        let encounter_active = matches!(
            world.mode,
            WorldMode::Encounter {
                phase: tallgrass_core::EncounterPhase::Active,
                ..
            }
        );
        PanelView {
            mode: world.panel,
            party: world.party.members().to_vec(),
            pokedex: world.pokedex.to_vec(),
            encounter: world.mode.encounter_species().cloned(),
            encounter_active,
            message: world.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::with_collection(
            WorldConfig::default(),
            vec![SpeciesId::new("bulbasaur"), SpeciesId::new("charmander")],
            vec![
                SpeciesId::new("bulbasaur"),
                SpeciesId::new("charmander"),
                SpeciesId::new("squirtle"),
            ],
        )
    }

    fn step(world: &mut World, direction: Direction) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::StepPlayer {
                direction,
                running: false,
            },
            &mut events,
        );
        events
    }

    fn walk_until_area_changes(world: &mut World, direction: Direction) -> Vec<Event> {
        for _ in 0..64 {
            let events = step(world, direction);
            if events
                .iter()
                .any(|event| matches!(event, Event::AreaEntered { .. }))
            {
                return events;
            }
            assert!(
                events
                    .iter()
                    .all(|event| !matches!(event, Event::PlayerBlocked { .. })),
                "the border strip must be free of obstacles"
            );
        }
        panic!("player never left the area");
    }

    #[test]
    fn leaving_left_then_right_returns_to_the_origin() {
        let mut world = world();
        let origin_layout = world.area.layout().clone();
        world.actor.position = WorldPoint::new(17.0, 300.0);

        let events = walk_until_area_changes(&mut world, Direction::Left);
        assert_eq!(query::area_coordinate(&world), AreaCoordinate::new(-1, 0));
        assert!(events.contains(&Event::AreaExited {
            area: AreaCoordinate::ORIGIN,
            direction: Direction::Left,
        }));
        let actor = query::actor(&world);
        assert_eq!(actor.position.x, 768.0 - 16.0);
        assert_eq!(actor.position.y, 300.0);
        assert_eq!(query::mode(&world), &WorldMode::Exploring);

        let _ = walk_until_area_changes(&mut world, Direction::Right);
        assert_eq!(query::area_coordinate(&world), AreaCoordinate::ORIGIN);
        assert_eq!(query::actor(&world).position, WorldPoint::new(16.0, 300.0));
        assert_eq!(world.area.layout(), &origin_layout);
    }

    #[test]
    fn transition_reports_mode_changes_in_order() {
        let mut world = world();
        world.actor.position = WorldPoint::new(400.0, 24.5);
        let events = walk_until_area_changes(&mut world, Direction::Up);
        let modes: Vec<&WorldMode> = events
            .iter()
            .filter_map(|event| match event {
                Event::WorldModeChanged { mode } => Some(mode),
                _ => None,
            })
            .collect();
        assert_eq!(modes, vec![&WorldMode::Transitioning, &WorldMode::Exploring]);
        assert_eq!(query::area_coordinate(&world), AreaCoordinate::new(0, -1));
        assert_eq!(query::actor(&world).position.y, 768.0 - 24.0);
    }

    #[test]
    fn obstacles_veto_the_whole_step() {
        let mut world = world();
        world.area = AreaModel::generate(AreaCoordinate::ORIGIN, &world.config.terrain, 3);
        let Some(obstacle) = world.area.obstacles().obstacles().first().copied() else {
            return;
        };
        world.actor.position =
            WorldPoint::new(obstacle.x - 16.5, obstacle.y + obstacle.height / 2.0);
        let before = world.actor.position;

        let events = step(&mut world, Direction::Right);
        assert!(matches!(events.as_slice(), [Event::PlayerBlocked { .. }]));
        assert_eq!(world.actor.position, before);
        assert_eq!(world.actor.facing, Direction::Right);
    }

    #[test]
    fn running_covers_more_ground() {
        let mut world = world();
        world.area = AreaModel::generate(
            AreaCoordinate::ORIGIN,
            &TerrainTuning {
                trees: tallgrass_system_terrain::TreeTuning {
                    patches: 0,
                    ..Default::default()
                },
                rocks: tallgrass_system_terrain::RockTuning {
                    min_rocks: 0,
                    max_rocks: 0,
                    ..Default::default()
                },
                ..TerrainTuning::default()
            },
            1,
        );
        world.actor.position = WorldPoint::new(300.0, 300.0);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::StepPlayer {
                direction: Direction::Down,
                running: true,
            },
            &mut events,
        );
        assert_eq!(world.actor.position, WorldPoint::new(300.0, 302.0));
    }

    #[test]
    fn movement_is_ignored_outside_exploration() {
        let mut world = world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::StartEncounter {
                species: SpeciesId::new("pikachu"),
            },
            &mut events,
        );
        let before = world.actor.position;
        let events = step(&mut world, Direction::Left);
        assert_eq!(
            events,
            vec![Event::CommandIgnored {
                reason: RejectionReason::WrongMode
            }]
        );
        assert_eq!(world.actor.position, before);
    }

    #[test]
    fn encounter_forces_the_battle_menu_and_restores_main() {
        let mut world = world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::StartEncounter {
                species: SpeciesId::new("pikachu"),
            },
            &mut events,
        );
        assert_eq!(query::panel_mode(&world), PanelMode::BattleMenu);
        assert_eq!(query::message(&world), Some("A wild Pikachu appeared!"));

        apply(&mut world, Command::Flee, &mut events);
        assert_eq!(query::mode(&world), &WorldMode::Exploring);
        assert_eq!(query::panel_mode(&world), PanelMode::Main);
        assert!(events.contains(&Event::EncounterEnded {
            species: SpeciesId::new("pikachu"),
            outcome: EncounterOutcome::Fled,
        }));
    }

    #[test]
    fn departing_encounter_waits_for_the_delay() {
        let mut world = world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::StartEncounter {
                species: SpeciesId::new("pikachu"),
            },
            &mut events,
        );
        apply(&mut world, Command::ResolveCatch { caught: true }, &mut events);

        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(1000),
            },
            &mut events,
        );
        assert!(matches!(
            query::mode(&world),
            WorldMode::Encounter {
                phase: EncounterPhase::Departing { .. },
                ..
            }
        ));
        let blocked = step(&mut world, Direction::Up);
        assert_eq!(
            blocked,
            vec![Event::CommandIgnored {
                reason: RejectionReason::WrongMode
            }]
        );

        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(500),
            },
            &mut events,
        );
        assert_eq!(query::mode(&world), &WorldMode::Exploring);
    }

    #[test]
    fn opening_a_menu_pauses_exploration() {
        let mut world = world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetPanelMode {
                mode: PanelMode::PartyList,
            },
            &mut events,
        );
        assert_eq!(query::mode(&world), &WorldMode::PanelOverlay);
        assert!(!query::mode(&world).accepts_movement());

        apply(
            &mut world,
            Command::SetPanelMode {
                mode: PanelMode::Main,
            },
            &mut events,
        );
        assert_eq!(query::mode(&world), &WorldMode::Exploring);
    }

    #[test]
    fn panel_rejects_edges_missing_from_the_menu_graph() {
        let mut world = world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetPanelMode {
                mode: PanelMode::SlotSwap { slot: 0 },
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::CommandIgnored {
                reason: RejectionReason::InvalidPanelTransition
            }]
        );

        events.clear();
        apply(
            &mut world,
            Command::SetPanelMode {
                mode: PanelMode::PartyList,
            },
            &mut events,
        );
        events.clear();
        apply(
            &mut world,
            Command::SetPanelMode {
                mode: PanelMode::SlotOptions { slot: 5 },
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::CommandIgnored {
                reason: RejectionReason::SlotOutOfRange
            }]
        );
        assert_eq!(query::panel_mode(&world), PanelMode::PartyList);
    }

    #[test]
    fn party_edits_require_a_caught_species() {
        let mut world = world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetPanelMode {
                mode: PanelMode::PartyList,
            },
            &mut events,
        );
        events.clear();

        apply(
            &mut world,
            Command::ReplacePartySlot {
                slot: 0,
                species: SpeciesId::new("mewtwo"),
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::CommandIgnored {
                reason: RejectionReason::UnknownSpecies
            }]
        );

        events.clear();
        apply(
            &mut world,
            Command::ReplacePartySlot {
                slot: 0,
                species: SpeciesId::new("squirtle"),
            },
            &mut events,
        );
        assert_eq!(
            query::party(&world),
            &[SpeciesId::new("squirtle"), SpeciesId::new("charmander")]
        );
        assert!(events.contains(&Event::PartyChanged {
            members: vec![SpeciesId::new("squirtle"), SpeciesId::new("charmander")],
        }));
    }

    #[test]
    fn save_requests_are_forwarded() {
        let mut world = world();
        let mut events = Vec::new();
        apply(&mut world, Command::RequestSave, &mut events);
        assert_eq!(events, vec![Event::SaveRequested]);
    }
}
