#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tallgrass engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems to react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command
//! batches.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Side length of a single square tile measured in world units.
pub const TILE_SIZE: f32 = 64.0;

/// Maximum number of species the active party may hold.
pub const MAX_PARTY_SIZE: usize = 6;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the player take one step in the provided direction.
    StepPlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
        /// Whether the run modifier is held, selecting the faster speed.
        running: bool,
    },
    /// Reports that no directional input is held so the player stands idle.
    HaltPlayer,
    /// Requests that a wild encounter with the provided species begins.
    StartEncounter {
        /// Species the player confronts.
        species: SpeciesId,
    },
    /// Requests a catch attempt against the species in the active encounter.
    ThrowBall,
    /// Resolves a pending catch attempt with a pre-rolled outcome.
    ResolveCatch {
        /// Whether the catch roll succeeded.
        caught: bool,
    },
    /// Requests that the player leaves the active encounter.
    Flee,
    /// Requests that the side panel navigates to the provided mode.
    SetPanelMode {
        /// Mode the panel should display.
        mode: PanelMode,
    },
    /// Replaces the species in a party slot with a species from the dex.
    ReplacePartySlot {
        /// Zero-based index of the party slot to overwrite.
        slot: usize,
        /// Species that takes over the slot.
        species: SpeciesId,
    },
    /// Exchanges the members stored in two party slots.
    SwapPartySlots {
        /// Zero-based index of the first slot.
        first: usize,
        /// Zero-based index of the second slot.
        second: usize,
    },
    /// Removes the member stored in a party slot.
    RemovePartySlot {
        /// Zero-based index of the slot to clear.
        slot: usize,
    },
    /// Replaces the message shown by the side panel.
    PostMessage {
        /// Text to display.
        text: String,
    },
    /// Requests that the collection is flushed to persistent storage.
    RequestSave,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player moved within the current area.
    PlayerMoved {
        /// Centre of the player before the step.
        from: WorldPoint,
        /// Centre of the player after the step.
        to: WorldPoint,
        /// Whether the player's bounding box overlaps any grass after the step.
        in_grass: bool,
    },
    /// Reports that an obstacle vetoed the player's proposed step.
    PlayerBlocked {
        /// Centre the player attempted to reach.
        attempted: WorldPoint,
    },
    /// Announces that the player walked off the edge of the current area.
    AreaExited {
        /// Area the player left.
        area: AreaCoordinate,
        /// Edge the player crossed.
        direction: Direction,
    },
    /// Announces that a freshly generated area became active.
    AreaEntered {
        /// Coordinate of the new area.
        area: AreaCoordinate,
        /// Centre at which the player re-entered.
        spawn: WorldPoint,
    },
    /// Announces that the world entered a new mode.
    WorldModeChanged {
        /// Mode that became active after processing commands.
        mode: WorldMode,
    },
    /// Announces that the side panel switched to a new mode.
    PanelModeChanged {
        /// Mode now displayed by the panel.
        mode: PanelMode,
    },
    /// Confirms that a wild encounter began.
    EncounterStarted {
        /// Species the player confronts.
        species: SpeciesId,
    },
    /// Requests a catch roll for the species in the active encounter.
    CatchRequested {
        /// Species targeted by the catch attempt.
        species: SpeciesId,
    },
    /// Confirms that the wild species was caught.
    SpeciesCaught {
        /// Species that was caught.
        species: SpeciesId,
        /// Whether the species also joined the active party.
        added_to_party: bool,
    },
    /// Reports that the wild species broke free of the catch attempt.
    CatchFailed {
        /// Species that escaped the ball.
        species: SpeciesId,
    },
    /// Confirms that the encounter finished and exploration resumed.
    EncounterEnded {
        /// Species that was confronted.
        species: SpeciesId,
        /// How the encounter was resolved.
        outcome: EncounterOutcome,
    },
    /// Reports the party roster after a mutation.
    PartyChanged {
        /// Party members in slot order.
        members: Vec<SpeciesId>,
    },
    /// Reports the dex after a mutation.
    PokedexChanged {
        /// Every species caught so far, in sorted order.
        species: Vec<SpeciesId>,
    },
    /// Reports that the side panel message changed.
    MessagePosted {
        /// Text displayed by the panel.
        text: String,
    },
    /// Asks adapters to flush the collection to persistent storage.
    SaveRequested,
    /// Reports that a command was ignored without changing state.
    CommandIgnored {
        /// Specific reason the command had no effect.
        reason: RejectionReason,
    },
}

/// Reasons a command may leave the world unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionReason {
    /// The command is not accepted in the current world or panel mode.
    WrongMode,
    /// The referenced party slot does not exist.
    SlotOutOfRange,
    /// The species is already a member of the party.
    DuplicateSpecies,
    /// The species has never been caught.
    UnknownSpecies,
    /// The panel cannot navigate directly to the requested mode.
    InvalidPanelTransition,
}

/// Cardinal directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
}

impl Direction {
    /// Every direction in clockwise order starting from [`Direction::Up`].
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit offset applied to column and row indices when travelling.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Reports whether the direction travels along the column axis.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// The two directions at right angles to this one.
    #[must_use]
    pub const fn perpendicular(self) -> [Self; 2] {
        if self.is_horizontal() {
            [Self::Down, Self::Up]
        } else {
            [Self::Right, Self::Left]
        }
    }

    /// Lowercase name used for animation keys and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        }
    }
}

/// Location of a single grid tile expressed as column and row indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    column: u32,
    row: u32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two tile coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: TileCoord) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }

    /// Computes the Chebyshev distance (largest axis delta) between two tiles.
    #[must_use]
    pub fn chebyshev_distance(self, other: TileCoord) -> u32 {
        self.column
            .abs_diff(other.column)
            .max(self.row.abs_diff(other.row))
    }

    /// Offsets the coordinate, returning `None` when either index turns negative.
    #[must_use]
    pub fn offset(self, columns: i32, rows: i32) -> Option<TileCoord> {
        let column = self.column.checked_add_signed(columns)?;
        let row = self.row.checked_add_signed(rows)?;
        Some(TileCoord::new(column, row))
    }

    /// World-space centre of the tile for the provided tile size.
    #[must_use]
    pub fn center(self, tile_size: f32) -> WorldPoint {
        WorldPoint::new(
            self.column as f32 * tile_size + tile_size / 2.0,
            self.row as f32 * tile_size + tile_size / 2.0,
        )
    }
}

/// Continuous position measured in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    /// Horizontal coordinate growing to the right.
    pub x: f32,
    /// Vertical coordinate growing downward.
    pub y: f32,
}

impl WorldPoint {
    /// Creates a new world-space point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the point translated by the provided deltas.
    #[must_use]
    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Width and height measured in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// Creates a new size descriptor.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned bounding box anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Aabb {
    /// Creates a box from its top-left corner and extents.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a box centred on the provided point.
    #[must_use]
    pub fn from_center(center: WorldPoint, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    /// Right edge of the box.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge of the box.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Reports whether two boxes overlap.
    ///
    /// Each box's near edge must lie strictly before the other's far edge on
    /// both axes, so boxes that merely share an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Signed coordinate that identifies one generated area of the overworld.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AreaCoordinate {
    /// Horizontal area index; decreases when leaving through the left edge.
    pub x: i32,
    /// Vertical area index; decreases when leaving through the top edge.
    pub y: i32,
}

impl AreaCoordinate {
    /// Area in which every session begins.
    pub const ORIGIN: AreaCoordinate = AreaCoordinate::new(0, 0);

    /// Creates a new area coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring area reached by leaving through the provided edge.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl fmt::Display for AreaCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Clockwise rotation applied to a path tile sprite in quarter turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Default orientation: vertical straights, corners joining left and bottom.
    Rotate0,
    /// A quarter turn clockwise.
    Rotate90,
    /// A half turn.
    Rotate180,
    /// A quarter turn counter-clockwise.
    Rotate270,
}

impl Orientation {
    /// Rotation expressed in radians, reporting 270° as -π/2.
    #[must_use]
    pub fn radians(self) -> f32 {
        use std::f32::consts::{FRAC_PI_2, PI};
        match self {
            Self::Rotate0 => 0.0,
            Self::Rotate90 => FRAC_PI_2,
            Self::Rotate180 => PI,
            Self::Rotate270 => -FRAC_PI_2,
        }
    }
}

/// Shape of a single path tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    /// The path continues in the same direction.
    Straight,
    /// The path turns by ninety degrees on this tile.
    Corner,
}

/// One tile of a generated path, in emission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathSegment {
    /// Tile covered by the segment.
    pub tile: TileCoord,
    /// Whether the tile is a straight or a corner piece.
    pub kind: SegmentKind,
    /// Rotation applied to the tile sprite.
    pub orientation: Orientation,
}

/// Kinds of features scattered across an area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    /// Tall grass blade; never blocks movement but may trigger encounters.
    Grass,
    /// Tree whose trunk blocks movement.
    Tree,
    /// Rock that blocks movement.
    Rock {
        /// Art variant, starting at 1.
        variant: u8,
    },
}

/// Grass, tree or rock instance placed by the scatter placer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScatterFeature {
    /// Kind of feature.
    pub kind: FeatureKind,
    /// Tile the feature is anchored to.
    pub anchor: TileCoord,
    /// Sprite anchor in world units; the base of the sprite for trees.
    pub position: WorldPoint,
    /// Visual footprint of the sprite.
    pub footprint: Size,
    /// Radius of the neighbourhood the feature claimed or required.
    pub exclusion_radius: u32,
    /// Region that blocks movement, anchored at the base of the sprite.
    pub collision: Option<Aabb>,
}

impl ScatterFeature {
    /// Visual bounds of the feature in world units.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        match self.kind {
            FeatureKind::Tree => Aabb::new(
                self.position.x - self.footprint.width / 2.0,
                self.position.y - self.footprint.height,
                self.footprint.width,
                self.footprint.height,
            ),
            FeatureKind::Grass | FeatureKind::Rock { .. } => {
                Aabb::from_center(self.position, self.footprint)
            }
        }
    }

    /// Draw-order key; larger values are drawn in front.
    #[must_use]
    pub fn depth(&self) -> f32 {
        match self.kind {
            FeatureKind::Grass => 0.0,
            FeatureKind::Tree => self.position.y,
            FeatureKind::Rock { .. } => self.position.y + 0.5,
        }
    }
}

/// Opaque lowercase species identifier drawn from an external vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SpeciesId(String);

impl SpeciesId {
    /// Creates a species identifier, normalising it to a trimmed lowercase token.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    /// Borrows the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name shown to the player, with the first letter capitalised.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpeciesId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SpeciesId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<SpeciesId> for String {
    fn from(value: SpeciesId) -> Self {
        value.0
    }
}

/// Progress of an active encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterPhase {
    /// The player may fight, catch or run.
    Active,
    /// The species was caught; exploration resumes once the delay elapses.
    Departing {
        /// Display time left before exploration resumes.
        remaining: Duration,
    },
}

/// How an encounter finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterOutcome {
    /// The species was caught.
    Caught,
    /// The player ran away.
    Fled,
}

/// Top-level mode of the world state machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldMode {
    /// The player walks around the current area.
    Exploring,
    /// The world regenerates the area the player walked into.
    Transitioning,
    /// A wild species confronts the player.
    Encounter {
        /// Species the player confronts.
        species: SpeciesId,
        /// Progress of the encounter.
        phase: EncounterPhase,
    },
    /// A side-panel menu holds focus while exploring.
    PanelOverlay,
}

impl WorldMode {
    /// Reports whether movement input has any effect in this mode.
    #[must_use]
    pub const fn accepts_movement(&self) -> bool {
        matches!(self, Self::Exploring)
    }

    /// Species confronted in the active encounter, if any.
    #[must_use]
    pub fn encounter_species(&self) -> Option<&SpeciesId> {
        match self {
            Self::Encounter { species, .. } => Some(species),
            _ => None,
        }
    }
}

/// Screens shown by the side panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelMode {
    /// Root menu offering party, dex, bag and save.
    #[default]
    Main,
    /// List of party members.
    PartyList,
    /// Battle commands shown during an encounter.
    BattleMenu,
    /// Party list opened from the battle menu.
    BattlePartyList,
    /// List of every caught species.
    DexList,
    /// Actions available for one party slot.
    SlotOptions {
        /// Slot the options apply to.
        slot: usize,
    },
    /// Dex picker that replaces the species in a slot.
    DexSwitch {
        /// Slot that will be overwritten.
        slot: usize,
    },
    /// Slot picker that swaps two party members.
    SlotSwap {
        /// Slot that will be moved.
        slot: usize,
    },
}

impl PanelMode {
    /// Reports whether the mode belongs to the battle screen.
    #[must_use]
    pub const fn is_battle(self) -> bool {
        matches!(self, Self::BattleMenu | Self::BattlePartyList)
    }

    /// Mode reached by backing out of this one, if any.
    #[must_use]
    pub const fn parent(self) -> Option<PanelMode> {
        match self {
            Self::Main | Self::BattleMenu => None,
            Self::PartyList | Self::DexList => Some(Self::Main),
            Self::BattlePartyList => Some(Self::BattleMenu),
            Self::SlotOptions { .. } => Some(Self::PartyList),
            Self::DexSwitch { slot } | Self::SlotSwap { slot } => Some(Self::SlotOptions { slot }),
        }
    }

    /// Reports whether the menu graph has an edge from this mode to `target`.
    #[must_use]
    pub fn can_navigate_to(self, target: PanelMode) -> bool {
        if self.parent() == Some(target) {
            return true;
        }

        match (self, target) {
            (Self::Main, Self::PartyList | Self::DexList)
            | (Self::PartyList, Self::SlotOptions { .. })
            | (Self::BattleMenu, Self::BattlePartyList) => true,
            (Self::SlotOptions { slot }, Self::DexSwitch { slot: next })
            | (Self::SlotOptions { slot }, Self::SlotSwap { slot: next }) => slot == next,
            _ => false,
        }
    }
}

/// Polled input snapshot captured by adapters once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Directional intent held this tick, if any.
    pub direction: Option<Direction>,
    /// Whether the run modifier is held.
    pub run: bool,
}

impl InputSnapshot {
    /// Creates a snapshot holding the provided direction.
    #[must_use]
    pub const fn toward(direction: Direction, run: bool) -> Self {
        Self {
            direction: Some(direction),
            run,
        }
    }
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorSnapshot {
    /// Centre of the player.
    pub position: WorldPoint,
    /// Collision extents of the player.
    pub size: Size,
    /// Direction the player faces.
    pub facing: Direction,
    /// Whether the player is walking this tick.
    pub moving: bool,
}

impl ActorSnapshot {
    /// Bounding box derived from the player's centre and size.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.size)
    }
}

/// Read-only data the side panel needs to build and evaluate its menus.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PanelView {
    /// Mode currently shown by the panel.
    pub mode: PanelMode,
    /// Party members in slot order.
    pub party: Vec<SpeciesId>,
    /// Every caught species in sorted order.
    pub pokedex: Vec<SpeciesId>,
    /// Species confronted in the active encounter, if any.
    pub encounter: Option<SpeciesId>,
    /// Whether the encounter still accepts battle commands.
    pub encounter_active: bool,
    /// Message currently displayed by the panel.
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{
        Aabb, AreaCoordinate, Direction, Orientation, PanelMode, SpeciesId, TileCoord, WorldPoint,
    };
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn overlap_is_symmetric() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        let c = Aabb::new(30.0, 0.0, 4.0, 4.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn shared_edges_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let right = Aabb::new(10.0, 0.0, 10.0, 10.0);
        let below = Aabb::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!right.overlaps(&a));
        assert!(!a.overlaps(&below));
        assert!(!below.overlaps(&a));
    }

    #[test]
    fn centred_box_spans_half_extents() {
        let aabb = Aabb::from_center(WorldPoint::new(100.0, 50.0), super::Size::new(32.0, 48.0));
        assert_eq!(aabb, Aabb::new(84.0, 26.0, 32.0, 48.0));
    }

    #[test]
    fn area_steps_by_exactly_one() {
        let origin = AreaCoordinate::ORIGIN;
        assert_eq!(origin.step(Direction::Left), AreaCoordinate::new(-1, 0));
        assert_eq!(origin.step(Direction::Down), AreaCoordinate::new(0, 1));
        assert_eq!(origin.step(Direction::Left).step(Direction::Right), origin);
    }

    #[test]
    fn tile_offset_rejects_negative_indices() {
        let tile = TileCoord::new(0, 3);
        assert_eq!(tile.offset(-1, 0), None);
        assert_eq!(tile.offset(1, -1), Some(TileCoord::new(1, 2)));
        assert_eq!(tile.chebyshev_distance(TileCoord::new(2, 7)), 4);
    }

    #[test]
    fn species_ids_are_normalised() {
        assert_eq!(SpeciesId::new("  Pikachu "), SpeciesId::new("pikachu"));
        assert_eq!(SpeciesId::from("EEVEE").as_str(), "eevee");
    }

    #[test]
    fn display_name_capitalises_the_first_letter() {
        assert_eq!(SpeciesId::new("BULBASAUR").display_name(), "Bulbasaur");
        assert_eq!(SpeciesId::new("mr. mime").display_name(), "Mr. mime");
        assert_eq!(SpeciesId::new("   ").display_name(), "");
    }

    #[test]
    fn perpendicular_never_reverses() {
        for direction in Direction::ALL {
            for turn in direction.perpendicular() {
                assert_ne!(turn, direction);
                assert_ne!(turn, direction.opposite());
            }
        }
    }

    #[test]
    fn rotation_reports_counter_clockwise_quarter_as_negative() {
        assert!(Orientation::Rotate270.radians() < 0.0);
        assert!((Orientation::Rotate180.radians() - std::f32::consts::PI).abs() < f32::EPSILON);
    }

    #[test]
    fn panel_graph_backs_out_to_parents() {
        assert_eq!(PanelMode::PartyList.parent(), Some(PanelMode::Main));
        assert_eq!(
            PanelMode::DexSwitch { slot: 2 }.parent(),
            Some(PanelMode::SlotOptions { slot: 2 })
        );
        assert!(PanelMode::Main.can_navigate_to(PanelMode::PartyList));
        let options = PanelMode::SlotOptions { slot: 1 };
        assert!(options.can_navigate_to(PanelMode::SlotSwap { slot: 1 }));
        assert!(!options.can_navigate_to(PanelMode::SlotSwap { slot: 0 }));
        assert!(!PanelMode::Main.can_navigate_to(PanelMode::BattleMenu));
        assert!(!PanelMode::DexList.can_navigate_to(PanelMode::PartyList));
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn species_id_round_trips_through_bincode() {
        assert_round_trip(&SpeciesId::new("bulbasaur"));
    }

    #[test]
    fn panel_mode_round_trips_through_bincode() {
        assert_round_trip(&PanelMode::SlotSwap { slot: 4 });
    }
}
