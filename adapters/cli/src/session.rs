use std::time::Duration;

use anyhow::{Context, Result as AnyResult};
use tallgrass_core::{Command, Event, InputSnapshot, RejectionReason};
use tallgrass_persistence::{save_collection, sync_events, Collection, ListStore};
use tallgrass_rendering::{
    ActorPresentation, FeaturePresentation, GridPresentation, PanelEntry, PanelPresentation, Scene,
};
use tallgrass_system_encounter::{Encounters, SeededDice};
use tallgrass_system_exploration::Exploration;
use tallgrass_system_panel::{menu, Panel, PanelAction};
use tallgrass_world::{apply, query, World};

use crate::{
    config::GameConfig,
    script::{ScriptStep, Shortcut},
};

/// Message posted after the collection has been written to the store.
const SAVED_MESSAGE: &str = "Game saved.";

/// Running totals reported at the end of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SessionStats {
    /// Ticks simulated so far.
    pub(crate) ticks: u64,
    /// Steps the player completed.
    pub(crate) steps: u64,
    /// Steps vetoed by obstacles.
    pub(crate) blocked_steps: u64,
    /// Areas entered through an edge.
    pub(crate) areas_entered: u64,
    /// Wild encounters started.
    pub(crate) encounters: u64,
    /// Successful catches.
    pub(crate) catches: u64,
    /// Encounters the player ran from.
    pub(crate) escapes: u64,
    /// Lists written to the store.
    pub(crate) saves: u64,
    /// Commands the world refused.
    pub(crate) ignored_commands: u64,
}

impl SessionStats {
    fn record(&mut self, event: &Event) {
        match event {
            Event::PlayerMoved { .. } => self.steps += 1,
            Event::PlayerBlocked { .. } => self.blocked_steps += 1,
            Event::AreaEntered { .. } => self.areas_entered += 1,
            Event::EncounterStarted { .. } => self.encounters += 1,
            Event::SpeciesCaught { .. } => self.catches += 1,
            Event::EncounterEnded {
                outcome: tallgrass_core::EncounterOutcome::Fled,
                ..
            } => self.escapes += 1,
            Event::CommandIgnored { .. } => self.ignored_commands += 1,
            _ => {}
        }
    }
}

/// Headless game loop that wires the world to its systems and a store.
#[derive(Debug)]
pub(crate) struct Session<S: ListStore> {
    world: World,
    exploration: Exploration,
    encounters: Encounters,
    panel: Panel,
    dice: SeededDice,
    store: S,
    tick: Duration,
    unseen: Vec<Event>,
    stats: SessionStats,
}

impl<S: ListStore> Session<S> {
    /// Creates a session from a configuration and the stored collection.
    pub(crate) fn new(config: &GameConfig, collection: Collection, store: S) -> Self {
        let world =
            World::with_collection(config.world.clone(), collection.party, collection.pokedex);
        Self {
            world,
            exploration: Exploration::new(),
            encounters: Encounters::new(config.encounter.clone()),
            panel: Panel::new(),
            dice: SeededDice::new(config.world.seed),
            store,
            tick: config.session.tick(),
            unseen: Vec::new(),
            stats: SessionStats::default(),
        }
    }

    /// Authoritative world state.
    #[must_use]
    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Totals gathered so far.
    #[must_use]
    pub(crate) fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Backing store of the collection.
    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// Advances the game by one tick using the provided scripted input.
    ///
    /// The tick command and any panel action apply first, followed by the
    /// movement the exploration system derives from the held input and
    /// finally the encounter rolls triggered by the resulting events.
    pub(crate) fn step(&mut self, step: Option<ScriptStep>) -> AnyResult<Vec<Event>> {
        let input = step.map_or(
            InputSnapshot {
                direction: None,
                run: false,
            },
            ScriptStep::input,
        );

        let mut commands = vec![Command::Tick { dt: self.tick }];
        if let Some(step) = step {
            self.queue_panel_action(step, &mut commands);
        }
        let mut events = Vec::new();
        self.apply_all(&mut commands, &mut events);

        let mut observed = std::mem::take(&mut self.unseen);
        observed.extend(events.iter().cloned());
        self.exploration.handle(&observed, input, &mut commands);
        let explored = events.len();
        self.apply_all(&mut commands, &mut events);

        self.encounters.handle(&events, &mut self.dice, &mut commands);
        self.apply_all(&mut commands, &mut events);

        if events.contains(&Event::SaveRequested) {
            self.save()?;
            let mut confirmation = vec![Command::PostMessage {
                text: String::from(SAVED_MESSAGE),
            }];
            self.apply_all(&mut confirmation, &mut events);
        }

        let saved = sync_events(&mut self.store, &events).context("failed to store collection")?;
        self.stats.saves += saved as u64;

        self.unseen = events[explored..].to_vec();
        self.stats.ticks += 1;
        for event in &events {
            self.stats.record(event);
            log_event(event);
        }
        Ok(events)
    }

    /// Describes the current frame for a renderer.
    pub(crate) fn scene(&self) -> AnyResult<Scene> {
        let area = query::area(&self.world);
        let layout = area.layout();
        let grid = GridPresentation::new(layout.columns(), layout.rows(), layout.tile_size())?;

        let features = layout
            .path()
            .iter()
            .map(|segment| FeaturePresentation::from_path_segment(segment, layout.tile_size()))
            .chain(layout.features().map(FeaturePresentation::from_scatter))
            .collect();

        let view = query::panel_view(&self.world);
        let entries = menu(&view)
            .iter()
            .map(|node| PanelEntry {
                label: node.label.clone(),
                enabled: node.is_enabled(&view),
            })
            .collect();
        let panel = PanelPresentation {
            mode: view.mode,
            entries,
            message: view.message.clone(),
            battle_species: view.encounter.clone(),
        };

        Ok(Scene::new(
            area.coordinate(),
            grid,
            features,
            ActorPresentation::from(query::actor(&self.world)),
            panel,
        ))
    }

    fn queue_panel_action(&mut self, step: ScriptStep, out: &mut Vec<Command>) {
        let view = query::panel_view(&self.world);
        let action: Option<PanelAction> = match step {
            ScriptStep::Choose(index) => self.panel.nth(&view, index),
            ScriptStep::Shortcut(shortcut) => resolve_shortcut(&self.panel, &view, shortcut),
            ScriptStep::Move { .. } | ScriptStep::Wait => return,
        };
        match action {
            Some(action) => self.panel.handle(&view, &action, out),
            None => log::warn!("{step:?} has no enabled entry on the {:?} panel", view.mode),
        }
    }

    fn apply_all(&mut self, commands: &mut Vec<Command>, events: &mut Vec<Event>) {
        for command in commands.drain(..) {
            apply(&mut self.world, command, events);
        }
    }

    fn save(&mut self) -> AnyResult<()> {
        let pokedex = query::pokedex(&self.world);
        save_collection(&mut self.store, query::party(&self.world), &pokedex)
            .context("failed to save collection")?;
        self.stats.saves += 2;
        Ok(())
    }
}

fn resolve_shortcut(
    panel: &Panel,
    view: &tallgrass_core::PanelView,
    shortcut: Shortcut,
) -> Option<PanelAction> {
    shortcut.tags().iter().find_map(|tag| panel.find(view, *tag))
}

fn log_event(event: &Event) {
    match event {
        Event::AreaEntered { area, .. } => log::info!("entered area {area}"),
        Event::CatchFailed { species } => log::info!("{species} broke free"),
        Event::MessagePosted { text } => log::debug!("message: {text}"),
        Event::CommandIgnored {
            reason: RejectionReason::WrongMode,
        } => log::trace!("command ignored in the current mode"),
        Event::CommandIgnored { reason } => log::debug!("command ignored: {reason:?}"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::{Session, SAVED_MESSAGE};
    use crate::{
        config::GameConfig,
        script::{Script, ScriptStep},
    };
    use tallgrass_core::{Event, PanelMode, SpeciesId};
    use tallgrass_persistence::{load_or_seed, ListStore, MemoryStore, PARTY_KEY};
    use tallgrass_world::query;

    fn session(config: &GameConfig) -> Session<MemoryStore> {
        let mut store = MemoryStore::new();
        let collection = load_or_seed(&mut store).expect("memory store never fails");
        Session::new(config, collection, store)
    }

    fn run(session: &mut Session<MemoryStore>, source: &str) -> Vec<Event> {
        let mut script = Script::parse(source).expect("valid script");
        let mut events = Vec::new();
        while let Some(step) = script.next_step() {
            events.extend(session.step(Some(step)).expect("step succeeds"));
        }
        events
    }

    fn quiet_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.encounter.encounter_probability = 0.0;
        config
    }

    #[test]
    fn held_direction_moves_the_player() {
        let mut session = session(&quiet_config());
        let _ = run(&mut session, "W*3 S*3 A*3 D*3");

        assert!(
            session.stats().steps + session.stats().blocked_steps > 0,
            "held input should either move the player or be blocked"
        );
        assert_eq!(session.stats().ticks, 12);
    }

    #[test]
    fn saving_from_the_main_menu_writes_the_collection() {
        let mut session = session(&quiet_config());
        let events = run(&mut session, "v");

        assert!(events.contains(&Event::SaveRequested));
        assert_eq!(query::message(session.world()), Some(SAVED_MESSAGE));
        assert_eq!(
            session.store().load_list(PARTY_KEY).expect("load"),
            query::party(session.world())
        );
        assert_eq!(session.stats().saves, 2);
    }

    #[test]
    fn menu_choices_navigate_the_panel() {
        let mut session = session(&quiet_config());
        let _ = run(&mut session, "1");
        assert_eq!(query::panel_mode(session.world()), PanelMode::PartyList);

        let _ = run(&mut session, "b");
        assert_eq!(query::panel_mode(session.world()), PanelMode::Main);
    }

    #[test]
    fn unavailable_shortcuts_are_skipped() {
        let mut session = session(&quiet_config());
        let events = run(&mut session, "c");
        assert_eq!(query::panel_mode(session.world()), PanelMode::Main);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::CatchRequested { .. })));
    }

    #[test]
    fn certain_encounters_start_in_grass_and_can_be_fled() {
        let mut config = GameConfig::default();
        config.encounter.encounter_probability = 1.0;
        config.encounter.species = vec![SpeciesId::new("zubat")];
        let mut session = session(&config);

        let mut script = String::new();
        for _ in 0..6 {
            script.push_str("d*40 s*40 a*40 w*40 ");
        }
        let events = run(&mut session, &script);
        if session.stats().encounters == 0 {
            assert!(
                !events
                    .iter()
                    .any(|event| matches!(event, Event::PlayerMoved { in_grass: true, .. })),
                "a grass step with certain odds always starts an encounter"
            );
            return;
        }

        assert_eq!(
            query::mode(session.world()).encounter_species(),
            Some(&SpeciesId::new("zubat"))
        );
        let _ = run(&mut session, "r");
        assert!(query::mode(session.world()).accepts_movement());
        assert_eq!(session.stats().escapes, 1);
    }

    #[test]
    fn scene_mirrors_the_world() {
        let session = session(&quiet_config());
        let scene = session.scene().expect("scene builds");
        let layout = query::area(session.world()).layout();

        assert_eq!(scene.grid.columns, layout.columns());
        assert_eq!(
            scene.features.len(),
            layout.path().len() + layout.features().count()
        );
        assert_eq!(scene.panel.mode, PanelMode::Main);
        assert!(scene.panel.battle_species.is_none());
    }

    #[test]
    fn idle_ticks_advance_time() {
        let mut session = session(&quiet_config());
        let _ = session.step(None).expect("idle tick");
        let _ = session.step(Some(ScriptStep::Wait)).expect("wait tick");
        assert_eq!(query::tick_index(session.world()), 2);
    }
}
