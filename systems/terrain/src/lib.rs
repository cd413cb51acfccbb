#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Procedural terrain generation for a single area.
//!
//! Generation runs in a fixed order against one [`GridOccupancy`]: paths
//! first, then grass clumps, tree patches and rocks. Each generator consults
//! and extends the occupancy set so later features keep their distance from
//! earlier ones. Randomness is injected through [`rand::Rng`], so replaying a
//! seed reproduces the same layout.

pub mod occupancy;
pub mod path;
pub mod scatter;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tallgrass_core::{PathSegment, ScatterFeature, TileCoord, TILE_SIZE};

pub use occupancy::GridOccupancy;
pub use path::PathTuning;
pub use scatter::{GrassTuning, RockTuning, TreeTuning};

/// Tunable parameters for generating one area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainTuning {
    /// Number of tile columns in an area.
    pub columns: u32,
    /// Number of tile rows in an area.
    pub rows: u32,
    /// Side length of a tile in world units.
    pub tile_size: f32,
    /// Path generation knobs.
    pub path: PathTuning,
    /// Grass clump knobs.
    pub grass: GrassTuning,
    /// Tree patch knobs.
    pub trees: TreeTuning,
    /// Rock knobs.
    pub rocks: RockTuning,
}

impl Default for TerrainTuning {
    fn default() -> Self {
        Self {
            columns: 12,
            rows: 12,
            tile_size: TILE_SIZE,
            path: PathTuning::default(),
            grass: GrassTuning::default(),
            trees: TreeTuning::default(),
            rocks: RockTuning::default(),
        }
    }
}

/// Everything generated for one area.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaLayout {
    columns: u32,
    rows: u32,
    tile_size: f32,
    path: Vec<PathSegment>,
    grass: Vec<ScatterFeature>,
    trees: Vec<ScatterFeature>,
    rocks: Vec<ScatterFeature>,
    start_tile: TileCoord,
    occupancy: GridOccupancy,
}

impl AreaLayout {
    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a tile in world units.
    #[must_use]
    pub const fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Width of the area in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_size
    }

    /// Height of the area in world units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// Path tiles in emission order.
    #[must_use]
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Grass blades.
    #[must_use]
    pub fn grass(&self) -> &[ScatterFeature] {
        &self.grass
    }

    /// Placed trees.
    #[must_use]
    pub fn trees(&self) -> &[ScatterFeature] {
        &self.trees
    }

    /// Placed rocks.
    #[must_use]
    pub fn rocks(&self) -> &[ScatterFeature] {
        &self.rocks
    }

    /// Tile at which a session starts: the first path tile in row-major order,
    /// or the grid centre when no path was generated.
    #[must_use]
    pub const fn start_tile(&self) -> TileCoord {
        self.start_tile
    }

    /// Occupancy left behind by the generators.
    #[must_use]
    pub fn occupancy(&self) -> &GridOccupancy {
        &self.occupancy
    }

    /// Iterates every scatter feature: grass, then trees, then rocks.
    pub fn features(&self) -> impl Iterator<Item = &ScatterFeature> {
        self.grass.iter().chain(&self.trees).chain(&self.rocks)
    }
}

/// Generates a complete area layout.
pub fn generate_area<R: Rng>(tuning: &TerrainTuning, rng: &mut R) -> AreaLayout {
    let mut occupancy = GridOccupancy::new(tuning.columns, tuning.rows);

    let path = path::generate_paths(&mut occupancy, &tuning.path, rng);
    let start_tile = occupancy
        .first_in_scan_order()
        .unwrap_or_else(|| TileCoord::new(tuning.columns / 2, tuning.rows / 2));

    let grass = scatter::place_grass(&occupancy, &tuning.grass, tuning.tile_size, rng);
    let trees = scatter::place_trees(&mut occupancy, &tuning.trees, tuning.tile_size, rng);
    let rocks = scatter::place_rocks(&mut occupancy, &tuning.rocks, tuning.tile_size, rng);

    log::debug!(
        "generated {}x{} area: {} path tiles, {} blades, {} trees, {} rocks",
        tuning.columns,
        tuning.rows,
        path.len(),
        grass.len(),
        trees.len(),
        rocks.len()
    );

    AreaLayout {
        columns: tuning.columns,
        rows: tuning.rows,
        tile_size: tuning.tile_size,
        path,
        grass,
        trees,
        rocks,
        start_tile,
        occupancy,
    }
}
