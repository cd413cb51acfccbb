#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Data-driven side-panel menus and the dispatcher that interprets them.
//!
//! Every panel screen is described by a list of [`MenuNode`] values built
//! from a [`PanelView`]. User interfaces render the nodes and send back the
//! chosen [`PanelAction`]; [`Panel::handle`] validates the action against the
//! current menu and translates it into world commands.

use tallgrass_core::{Command, PanelMode, PanelView, SpeciesId};

/// Identifies what a menu node does when chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionTag {
    /// Opens the party list from the main grid.
    OpenParty,
    /// Opens the dex list from the main grid.
    OpenDex,
    /// Opens the bag from the main grid.
    OpenBag,
    /// Saves the collection.
    Save,
    /// Opens the options of one party slot.
    SelectSlot,
    /// Opens the dex picker that replaces a slot.
    SwitchFromDex,
    /// Opens the slot picker that moves a slot.
    MoveSlot,
    /// Removes a party member.
    RemoveSlot,
    /// Picks the species that replaces a slot.
    ChooseSpecies,
    /// Picks the slot exchanged with the moving one.
    ChooseSwapTarget,
    /// Shows a short description of a species.
    Inspect,
    /// Battle command that attacks the wild species.
    Fight,
    /// Battle command that opens the bag.
    BattleBag,
    /// Battle command that lists the party.
    BattleParty,
    /// Battle command that throws a ball.
    Catch,
    /// Battle command that runs away.
    Run,
    /// Returns to the parent screen.
    Back,
}

/// Data carried by an action.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ActionPayload {
    /// The action needs no data.
    None,
    /// Party slot the action refers to.
    Slot(usize),
    /// Species the action refers to.
    Species(SpeciesId),
}

/// Selection sent back by a user interface.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PanelAction {
    /// What the action does.
    pub tag: ActionTag,
    /// Data the action refers to.
    pub payload: ActionPayload,
}

impl PanelAction {
    /// Creates an action without payload.
    #[must_use]
    pub const fn plain(tag: ActionTag) -> Self {
        Self {
            tag,
            payload: ActionPayload::None,
        }
    }

    /// Creates an action that refers to a party slot.
    #[must_use]
    pub const fn slot(tag: ActionTag, slot: usize) -> Self {
        Self {
            tag,
            payload: ActionPayload::Slot(slot),
        }
    }

    /// Creates an action that refers to a species.
    #[must_use]
    pub fn species(tag: ActionTag, species: SpeciesId) -> Self {
        Self {
            tag,
            payload: ActionPayload::Species(species),
        }
    }
}

/// Predicate deciding whether a node can be chosen in the current view.
pub type EnabledPredicate = fn(&PanelView, &PanelAction) -> bool;

/// One selectable entry of a panel screen.
#[derive(Clone, Debug)]
pub struct MenuNode {
    /// Stable identifier of the node within its screen.
    pub id: String,
    /// Human readable label.
    pub label: String,
    /// Action sent when the node is chosen.
    pub action: PanelAction,
    enabled: EnabledPredicate,
}

impl MenuNode {
    fn new(id: impl Into<String>, label: impl Into<String>, action: PanelAction) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            action,
            enabled: always,
        }
    }

    fn enabled_when(mut self, predicate: EnabledPredicate) -> Self {
        self.enabled = predicate;
        self
    }

    /// Reports whether the node can be chosen in the provided view.
    #[must_use]
    pub fn is_enabled(&self, view: &PanelView) -> bool {
        (self.enabled)(view, &self.action)
    }
}

fn always(_: &PanelView, _: &PanelAction) -> bool {
    true
}

fn encounter_active(view: &PanelView, _: &PanelAction) -> bool {
    view.encounter_active
}

fn party_has_company(view: &PanelView, _: &PanelAction) -> bool {
    view.party.len() > 1
}

fn dex_has_spare_species(view: &PanelView, _: &PanelAction) -> bool {
    view.pokedex
        .iter()
        .any(|species| !view.party.contains(species))
}

fn species_not_in_party(view: &PanelView, action: &PanelAction) -> bool {
    match &action.payload {
        ActionPayload::Species(species) => !view.party.contains(species),
        _ => false,
    }
}

fn different_slot(view: &PanelView, action: &PanelAction) -> bool {
    match (view.mode, &action.payload) {
        (PanelMode::SlotSwap { slot }, ActionPayload::Slot(target)) => slot != *target,
        _ => false,
    }
}

/// Builds the menu shown for the view's panel mode.
#[must_use]
pub fn menu(view: &PanelView) -> Vec<MenuNode> {
    let mut nodes = match view.mode {
        PanelMode::Main => vec![
            MenuNode::new("pkmn", "Pkmn", PanelAction::plain(ActionTag::OpenParty)),
            MenuNode::new("dex", "Dex", PanelAction::plain(ActionTag::OpenDex)),
            MenuNode::new("bag", "Bag", PanelAction::plain(ActionTag::OpenBag)),
            MenuNode::new("save", "Save", PanelAction::plain(ActionTag::Save)),
        ],
        PanelMode::PartyList => party_nodes(view, ActionTag::SelectSlot),
        PanelMode::SlotOptions { slot } => vec![
            MenuNode::new("switch", "Switch", PanelAction::slot(ActionTag::SwitchFromDex, slot))
                .enabled_when(dex_has_spare_species),
            MenuNode::new("move", "Move", PanelAction::slot(ActionTag::MoveSlot, slot))
                .enabled_when(party_has_company),
            MenuNode::new("remove", "Remove", PanelAction::slot(ActionTag::RemoveSlot, slot))
                .enabled_when(party_has_company),
        ],
        PanelMode::DexSwitch { .. } => view
            .pokedex
            .iter()
            .map(|species| {
                MenuNode::new(
                    species.as_str(),
                    species.display_name(),
                    PanelAction::species(ActionTag::ChooseSpecies, species.clone()),
                )
                .enabled_when(species_not_in_party)
            })
            .collect(),
        PanelMode::SlotSwap { .. } => party_nodes(view, ActionTag::ChooseSwapTarget)
            .into_iter()
            .map(|node| node.enabled_when(different_slot))
            .collect(),
        PanelMode::DexList => view
            .pokedex
            .iter()
            .map(|species| {
                MenuNode::new(
                    species.as_str(),
                    species.display_name(),
                    PanelAction::species(ActionTag::Inspect, species.clone()),
                )
            })
            .collect(),
        PanelMode::BattleMenu => vec![
            MenuNode::new("fight", "Fight", PanelAction::plain(ActionTag::Fight))
                .enabled_when(encounter_active),
            MenuNode::new("bag", "Bag", PanelAction::plain(ActionTag::BattleBag))
                .enabled_when(encounter_active),
            MenuNode::new("pkmn", "Pkmn", PanelAction::plain(ActionTag::BattleParty)),
            MenuNode::new("catch", "Catch", PanelAction::plain(ActionTag::Catch))
                .enabled_when(encounter_active),
            MenuNode::new("run", "Run", PanelAction::plain(ActionTag::Run))
                .enabled_when(encounter_active),
        ],
        PanelMode::BattlePartyList => view
            .party
            .iter()
            .map(|species| {
                MenuNode::new(
                    species.as_str(),
                    species.display_name(),
                    PanelAction::species(ActionTag::Inspect, species.clone()),
                )
            })
            .collect(),
    };

    if view.mode.parent().is_some() {
        nodes.push(MenuNode::new("back", "Back", PanelAction::plain(ActionTag::Back)));
    }
    nodes
}

fn party_nodes(view: &PanelView, tag: ActionTag) -> Vec<MenuNode> {
    view.party
        .iter()
        .enumerate()
        .map(|(slot, species)| {
            MenuNode::new(
                format!("slot-{slot}"),
                species.display_name(),
                PanelAction::slot(tag, slot),
            )
        })
        .collect()
}

/// Dispatcher that turns chosen panel actions into world commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct Panel;

impl Panel {
    /// Creates a new panel dispatcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// First enabled action with the provided tag in the current menu.
    #[must_use]
    pub fn find(&self, view: &PanelView, tag: ActionTag) -> Option<PanelAction> {
        menu(view)
            .into_iter()
            .find(|node| node.action.tag == tag && node.is_enabled(view))
            .map(|node| node.action)
    }

    /// Enabled action at `index` in the current menu.
    #[must_use]
    pub fn nth(&self, view: &PanelView, index: usize) -> Option<PanelAction> {
        menu(view)
            .into_iter()
            .nth(index)
            .filter(|node| node.is_enabled(view))
            .map(|node| node.action)
    }

    /// Validates the action against the current menu and emits the matching commands.
    ///
    /// Actions that are not on screen or not enabled are dropped.
    pub fn handle(&mut self, view: &PanelView, action: &PanelAction, out: &mut Vec<Command>) {
        let offered = menu(view)
            .iter()
            .any(|node| node.action == *action && node.is_enabled(view));
        if !offered {
            log::debug!("panel action {action:?} is not offered in {:?}", view.mode);
            return;
        }

        match (action.tag, &action.payload) {
            (ActionTag::OpenParty, _) => navigate(out, PanelMode::PartyList),
            (ActionTag::OpenDex, _) => navigate(out, PanelMode::DexList),
            (ActionTag::OpenBag | ActionTag::BattleBag, _) => {
                message(out, String::from("The bag is empty."));
            }
            (ActionTag::Save, _) => out.push(Command::RequestSave),
            (ActionTag::SelectSlot, ActionPayload::Slot(slot)) => {
                navigate(out, PanelMode::SlotOptions { slot: *slot });
            }
            (ActionTag::SwitchFromDex, ActionPayload::Slot(slot)) => {
                navigate(out, PanelMode::DexSwitch { slot: *slot });
            }
            (ActionTag::MoveSlot, ActionPayload::Slot(slot)) => {
                navigate(out, PanelMode::SlotSwap { slot: *slot });
            }
            (ActionTag::RemoveSlot, ActionPayload::Slot(slot)) => {
                out.push(Command::RemovePartySlot { slot: *slot });
            }
            (ActionTag::ChooseSpecies, ActionPayload::Species(species)) => {
                if let PanelMode::DexSwitch { slot } = view.mode {
                    out.push(Command::ReplacePartySlot {
                        slot,
                        species: species.clone(),
                    });
                }
            }
            (ActionTag::ChooseSwapTarget, ActionPayload::Slot(target)) => {
                if let PanelMode::SlotSwap { slot } = view.mode {
                    out.push(Command::SwapPartySlots {
                        first: slot,
                        second: *target,
                    });
                }
            }
            (ActionTag::Inspect, ActionPayload::Species(species)) => {
                let text = format!("{} is registered in the dex.", species.display_name());
                message(out, text);
            }
            (ActionTag::Fight, _) => {
                let foe = view
                    .encounter
                    .as_ref()
                    .map_or_else(String::new, SpeciesId::display_name);
                message(out, format!("{foe} is watching you closely."));
            }
            (ActionTag::BattleParty, _) => navigate(out, PanelMode::BattlePartyList),
            (ActionTag::Catch, _) => out.push(Command::ThrowBall),
            (ActionTag::Run, _) => out.push(Command::Flee),
            (ActionTag::Back, _) => {
                if let Some(parent) = view.mode.parent() {
                    navigate(out, parent);
                }
            }
            (tag, payload) => log::warn!("panel action {tag:?} carries unexpected {payload:?}"),
        }
    }
}

fn navigate(out: &mut Vec<Command>, mode: PanelMode) {
    out.push(Command::SetPanelMode { mode });
}

fn message(out: &mut Vec<Command>, text: String) {
    out.push(Command::PostMessage { text });
}
