#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Tallgrass adapters.
//!
//! The world never talks to a drawing library. Adapters turn world queries
//! into a [`Scene`] of plain descriptors and hand it to a [`Renderer`]
//! implementation through [`draw_scene`], which owns the depth ordering.

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::{cmp::Ordering, error::Error, fmt};
use tallgrass_core::{
    ActorSnapshot, AreaCoordinate, Direction, FeatureKind, PanelMode, PathSegment, ScatterFeature,
    SegmentKind, SpeciesId, TileCoord,
};

/// Vertical offset added to the actor's centre to derive its draw depth.
pub const ACTOR_DEPTH_OFFSET: f32 = 20.0;

/// Layers that renderers may show or hide as a whole.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderGroup {
    /// Path tiles drawn flat on the ground.
    Ground,
    /// Grass blades.
    Grass,
    /// Trees and rocks.
    Obstacles,
    /// The player sprite.
    Actor,
    /// Battle overlay shown during encounters.
    Overlay,
}

/// Art used to draw a feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    /// Straight path tile.
    PathStraight,
    /// Corner path tile.
    PathCorner,
    /// Grass blade.
    Grass,
    /// Tree.
    Tree,
    /// Rock with its art variant.
    Rock(u8),
}

impl SpriteKey {
    /// Asset name of the sprite.
    #[must_use]
    pub fn asset_name(self) -> String {
        match self {
            Self::PathStraight => String::from("main-path"),
            Self::PathCorner => String::from("corner-path"),
            Self::Grass => String::from("grass"),
            Self::Tree => String::from("tree"),
            Self::Rock(variant) => format!("rock{variant}"),
        }
    }
}

/// Tile grid of the active area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single tile expressed in world units.
    pub tile_length: f32,
}

impl GridPresentation {
    /// Creates a new grid descriptor.
    ///
    /// Returns an error when `tile_length` is not a positive finite number.
    pub fn new(
        columns: u32,
        rows: u32,
        tile_length: f32,
    ) -> std::result::Result<Self, RenderingError> {
        if !(tile_length.is_finite() && tile_length > 0.0) {
            return Err(RenderingError::InvalidTileLength { tile_length });
        }

        Ok(Self {
            columns,
            rows,
            tile_length,
        })
    }

    /// Calculates the total width of the grid.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Calculates the total height of the grid.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }

    /// Tile containing a world-space position, if the position lies on the grid.
    #[must_use]
    pub fn tile_at(&self, position: Vec2) -> Option<TileCoord> {
        if position.x < 0.0 || position.y < 0.0 {
            return None;
        }
        let column = (position.x / self.tile_length).floor() as u32;
        let row = (position.y / self.tile_length).floor() as u32;
        (column < self.columns && row < self.rows).then(|| TileCoord::new(column, row))
    }
}

/// One placed feature ready to be drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeaturePresentation {
    /// Layer the feature belongs to.
    pub group: RenderGroup,
    /// Art used to draw the feature.
    pub sprite: SpriteKey,
    /// Tile the feature is anchored to.
    pub tile: TileCoord,
    /// Sprite anchor in world units.
    pub position: Vec2,
    /// Sprite extents in world units.
    pub size: Vec2,
    /// Clockwise rotation in radians.
    pub rotation: f32,
    /// Draw-order key; larger values are drawn later.
    pub depth: f32,
}

impl FeaturePresentation {
    /// Describes a path tile; path tiles lie flat at depth zero.
    #[must_use]
    pub fn from_path_segment(segment: &PathSegment, tile_length: f32) -> Self {
        let center = segment.tile.center(tile_length);
        Self {
            group: RenderGroup::Ground,
            sprite: match segment.kind {
                SegmentKind::Straight => SpriteKey::PathStraight,
                SegmentKind::Corner => SpriteKey::PathCorner,
            },
            tile: segment.tile,
            position: Vec2::new(center.x, center.y),
            size: Vec2::splat(tile_length),
            rotation: segment.orientation.radians(),
            depth: 0.0,
        }
    }

    /// Describes a grass blade, tree or rock.
    #[must_use]
    pub fn from_scatter(feature: &ScatterFeature) -> Self {
        let (group, sprite) = match feature.kind {
            FeatureKind::Grass => (RenderGroup::Grass, SpriteKey::Grass),
            FeatureKind::Tree => (RenderGroup::Obstacles, SpriteKey::Tree),
            FeatureKind::Rock { variant } => (RenderGroup::Obstacles, SpriteKey::Rock(variant)),
        };
        Self {
            group,
            sprite,
            tile: feature.anchor,
            position: Vec2::new(feature.position.x, feature.position.y),
            size: Vec2::new(feature.footprint.width, feature.footprint.height),
            rotation: 0.0,
            depth: feature.depth(),
        }
    }
}

/// The player ready to be drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorPresentation {
    /// Centre of the player.
    pub position: Vec2,
    /// Sprite extents.
    pub size: Vec2,
    /// Direction the player faces.
    pub facing: Direction,
    /// Whether the walk animation plays.
    pub moving: bool,
}

impl ActorPresentation {
    /// Animation to play, such as `walk_left` or `idle_down`.
    #[must_use]
    pub fn animation_key(&self) -> String {
        let state = if self.moving { "walk" } else { "idle" };
        format!("{state}_{}", self.facing.as_str())
    }

    /// Draw-order key of the player.
    #[must_use]
    pub fn depth(&self) -> f32 {
        self.position.y + ACTOR_DEPTH_OFFSET
    }
}

impl From<ActorSnapshot> for ActorPresentation {
    fn from(snapshot: ActorSnapshot) -> Self {
        Self {
            position: Vec2::new(snapshot.position.x, snapshot.position.y),
            size: Vec2::new(snapshot.size.width, snapshot.size.height),
            facing: snapshot.facing,
            moving: snapshot.moving,
        }
    }
}

/// One entry of the side panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelEntry {
    /// Text shown for the entry.
    pub label: String,
    /// Whether the entry can be chosen.
    pub enabled: bool,
}

/// Side panel contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelPresentation {
    /// Screen shown by the panel.
    pub mode: PanelMode,
    /// Entries in display order.
    pub entries: Vec<PanelEntry>,
    /// Message line under the entries.
    pub message: Option<String>,
    /// Wild species drawn on the battle screen, if an encounter is running.
    pub battle_species: Option<SpeciesId>,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Coordinate of the displayed area.
    pub area: AreaCoordinate,
    /// Tile grid of the displayed area.
    pub grid: GridPresentation,
    /// Path tiles and scatter features.
    pub features: Vec<FeaturePresentation>,
    /// The player.
    pub actor: ActorPresentation,
    /// Side panel contents.
    pub panel: PanelPresentation,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        area: AreaCoordinate,
        grid: GridPresentation,
        features: Vec<FeaturePresentation>,
        actor: ActorPresentation,
        panel: PanelPresentation,
    ) -> Self {
        Self {
            area,
            grid,
            features,
            actor,
            panel,
        }
    }
}

/// Drawing capability set required by [`draw_scene`].
pub trait Renderer {
    /// Starts a frame for the provided grid.
    fn begin_frame(&mut self, area: AreaCoordinate, grid: &GridPresentation) -> AnyResult<()>;

    /// Shows or hides a whole layer for the rest of the frame.
    fn set_group_visible(&mut self, group: RenderGroup, visible: bool) -> AnyResult<()>;

    /// Draws one feature.
    fn place_feature(&mut self, feature: &FeaturePresentation) -> AnyResult<()>;

    /// Draws the player.
    fn draw_actor(&mut self, actor: &ActorPresentation) -> AnyResult<()>;

    /// Draws the wild species on the battle overlay.
    fn draw_battle_sprite(&mut self, species: &SpeciesId) -> AnyResult<()>;

    /// Draws the side panel.
    fn present_panel(&mut self, panel: &PanelPresentation) -> AnyResult<()>;

    /// Finishes the frame.
    fn end_frame(&mut self) -> AnyResult<()>;
}

enum Drawable<'a> {
    Feature(&'a FeaturePresentation),
    Actor(&'a ActorPresentation),
}

impl Drawable<'_> {
    fn depth(&self) -> f32 {
        match self {
            Self::Feature(feature) => feature.depth,
            Self::Actor(actor) => actor.depth(),
        }
    }
}

/// Draws a scene, submitting features and the actor in ascending depth order.
///
/// Items with equal depth keep their scene order, so ground tiles always
/// precede grass that shares their depth.
pub fn draw_scene<R>(renderer: &mut R, scene: &Scene) -> AnyResult<()>
where
    R: Renderer + ?Sized,
{
    renderer.begin_frame(scene.area, &scene.grid)?;
    renderer.set_group_visible(RenderGroup::Overlay, scene.panel.battle_species.is_some())?;

    let mut drawables: Vec<Drawable<'_>> = scene.features.iter().map(Drawable::Feature).collect();
    drawables.push(Drawable::Actor(&scene.actor));
    drawables.sort_by(|a, b| a.depth().partial_cmp(&b.depth()).unwrap_or(Ordering::Equal));

    for drawable in drawables {
        match drawable {
            Drawable::Feature(feature) => renderer.place_feature(feature)?,
            Drawable::Actor(actor) => renderer.draw_actor(actor)?,
        }
    }

    if let Some(species) = &scene.panel.battle_species {
        renderer.draw_battle_sprite(species)?;
    }
    renderer.present_panel(&scene.panel)?;
    renderer.end_frame()
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Tile length must be a positive finite number.
    InvalidTileLength {
        /// Provided tile length that failed validation.
        tile_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileLength { tile_length } => {
                write!(f, "tile_length must be positive (received {tile_length})")
            }
        }
    }
}

impl Error for RenderingError {}
