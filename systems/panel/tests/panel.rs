use tallgrass_core::{Command, PanelMode, PanelView, SpeciesId};
use tallgrass_system_panel::{menu, ActionTag, Panel, PanelAction};
use tallgrass_world::{apply, query, World, WorldConfig};

fn species(names: &[&str]) -> Vec<SpeciesId> {
    names.iter().copied().map(SpeciesId::new).collect()
}

fn view(mode: PanelMode, party: &[&str], pokedex: &[&str]) -> PanelView {
    PanelView {
        mode,
        party: species(party),
        pokedex: species(pokedex),
        ..PanelView::default()
    }
}

fn choose(world: &mut World, panel: &mut Panel, action: PanelAction) {
    let mut commands = Vec::new();
    panel.handle(&query::panel_view(world), &action, &mut commands);
    let mut events = Vec::new();
    for command in commands {
        apply(world, command, &mut events);
    }
}

#[test]
fn main_grid_offers_party_dex_bag_and_save() {
    let nodes = menu(&view(PanelMode::Main, &["pikachu"], &["pikachu"]));
    let ids: Vec<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
    assert_eq!(ids, vec!["pkmn", "dex", "bag", "save"]);
}

#[test]
fn lone_member_cannot_be_moved_or_removed() {
    let current = view(PanelMode::SlotOptions { slot: 0 }, &["pikachu"], &["pikachu"]);
    let nodes = menu(&current);
    for id in ["move", "remove", "switch"] {
        let node = nodes
            .iter()
            .find(|node| node.id == id)
            .expect("slot options list every action");
        assert!(!node.is_enabled(&current), "{id} should be disabled");
    }
}

#[test]
fn disabled_actions_are_dropped() {
    let current = view(PanelMode::SlotOptions { slot: 0 }, &["pikachu"], &["pikachu"]);
    let mut commands = Vec::new();
    Panel::new().handle(
        &current,
        &PanelAction::slot(ActionTag::RemoveSlot, 0),
        &mut commands,
    );
    assert!(commands.is_empty());
}

#[test]
fn actions_from_other_screens_are_dropped() {
    let current = view(PanelMode::Main, &["pikachu"], &["pikachu"]);
    let mut commands = Vec::new();
    Panel::new().handle(&current, &PanelAction::plain(ActionTag::Catch), &mut commands);
    assert!(commands.is_empty(), "catch is only offered in battle");
}

#[test]
fn dex_switch_only_offers_species_outside_the_party() {
    let current = view(
        PanelMode::DexSwitch { slot: 0 },
        &["pikachu", "eevee"],
        &["eevee", "mew", "pikachu"],
    );
    let enabled: Vec<String> = menu(&current)
        .into_iter()
        .filter(|node| node.is_enabled(&current))
        .map(|node| node.id)
        .collect();
    assert_eq!(enabled, vec!["mew".to_owned(), "back".to_owned()]);
}

#[test]
fn battle_menu_maps_catch_and_run() {
    let mut current = view(PanelMode::BattleMenu, &["pikachu"], &["pikachu"]);
    current.encounter = Some(SpeciesId::new("zubat"));
    current.encounter_active = true;

    let panel = Panel::new();
    assert_eq!(
        panel.find(&current, ActionTag::Catch),
        Some(PanelAction::plain(ActionTag::Catch))
    );

    let mut commands = Vec::new();
    let mut dispatcher = panel;
    dispatcher.handle(&current, &PanelAction::plain(ActionTag::Catch), &mut commands);
    dispatcher.handle(&current, &PanelAction::plain(ActionTag::Run), &mut commands);
    assert_eq!(commands, vec![Command::ThrowBall, Command::Flee]);
}

#[test]
fn departing_encounter_disables_battle_commands() {
    let mut current = view(PanelMode::BattleMenu, &["pikachu"], &["pikachu"]);
    current.encounter = Some(SpeciesId::new("zubat"));
    current.encounter_active = false;
    assert_eq!(Panel::new().find(&current, ActionTag::Catch), None);
}

#[test]
fn switching_a_slot_from_the_dex_walks_the_menu_graph() {
    let starters = species(&["bulbasaur", "charmander"]);
    let dex = species(&["bulbasaur", "charmander", "squirtle"]);
    let mut world = World::with_collection(WorldConfig::default(), starters, dex);
    let mut panel = Panel::new();

    choose(&mut world, &mut panel, PanelAction::plain(ActionTag::OpenParty));
    assert_eq!(query::panel_mode(&world), PanelMode::PartyList);

    choose(&mut world, &mut panel, PanelAction::slot(ActionTag::SelectSlot, 1));
    assert_eq!(query::panel_mode(&world), PanelMode::SlotOptions { slot: 1 });

    choose(&mut world, &mut panel, PanelAction::slot(ActionTag::SwitchFromDex, 1));
    assert_eq!(query::panel_mode(&world), PanelMode::DexSwitch { slot: 1 });

    choose(
        &mut world,
        &mut panel,
        PanelAction::species(ActionTag::ChooseSpecies, SpeciesId::new("squirtle")),
    );
    assert_eq!(query::party(&world), species(&["bulbasaur", "squirtle"]).as_slice());
    assert_eq!(query::panel_mode(&world), PanelMode::PartyList);

    choose(&mut world, &mut panel, PanelAction::plain(ActionTag::Back));
    assert_eq!(query::panel_mode(&world), PanelMode::Main);
    assert!(query::mode(&world).accepts_movement());
}

#[test]
fn moving_a_slot_swaps_members() {
    let starters = species(&["bulbasaur", "charmander", "squirtle"]);
    let mut world = World::with_collection(WorldConfig::default(), starters.clone(), starters);
    let mut panel = Panel::new();

    choose(&mut world, &mut panel, PanelAction::plain(ActionTag::OpenParty));
    choose(&mut world, &mut panel, PanelAction::slot(ActionTag::SelectSlot, 0));
    choose(&mut world, &mut panel, PanelAction::slot(ActionTag::MoveSlot, 0));
    choose(
        &mut world,
        &mut panel,
        PanelAction::slot(ActionTag::ChooseSwapTarget, 0),
    );
    assert_eq!(
        query::panel_mode(&world),
        PanelMode::SlotSwap { slot: 0 },
        "swapping a slot with itself is not offered"
    );

    choose(
        &mut world,
        &mut panel,
        PanelAction::slot(ActionTag::ChooseSwapTarget, 2),
    );
    assert_eq!(
        query::party(&world),
        species(&["squirtle", "charmander", "bulbasaur"]).as_slice()
    );
}
