//! Constrained random placement of grass clumps, tree patches and rocks.
//!
//! All three feature kinds share [`CandidateSearch`]: draw a tile from a
//! rectangular range, test it against a spacing rule, and retry up to a
//! bound. Exhausting the retries abandons that single feature.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tallgrass_core::{Aabb, FeatureKind, ScatterFeature, Size, TileCoord, WorldPoint};

use crate::{occupancy::GridOccupancy, path::roll};

/// Bounded retry search over a rectangle of candidate tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateSearch {
    columns: RangeInclusive<u32>,
    rows: RangeInclusive<u32>,
    attempts: u32,
}

impl CandidateSearch {
    /// Creates a search over the provided column and row ranges.
    #[must_use]
    pub const fn new(
        columns: RangeInclusive<u32>,
        rows: RangeInclusive<u32>,
        attempts: u32,
    ) -> Self {
        Self {
            columns,
            rows,
            attempts,
        }
    }

    /// Creates a search over the grid inset by `margin` tiles on every side.
    ///
    /// Returns `None` when the inset leaves no candidate tile.
    #[must_use]
    pub fn inset(occupancy: &GridOccupancy, margin: u32, attempts: u32) -> Option<Self> {
        let last_column = occupancy.columns().checked_sub(margin + 1)?;
        let last_row = occupancy.rows().checked_sub(margin + 1)?;
        if last_column < margin || last_row < margin {
            return None;
        }
        Some(Self::new(margin..=last_column, margin..=last_row, attempts))
    }

    /// Draws candidates until `accept` approves one or the attempts run out.
    pub fn find<R, F>(&self, rng: &mut R, mut accept: F) -> Option<TileCoord>
    where
        R: Rng,
        F: FnMut(TileCoord) -> bool,
    {
        if self.columns.is_empty() || self.rows.is_empty() {
            return None;
        }

        (0..self.attempts).find_map(|_| {
            let candidate = TileCoord::new(
                rng.gen_range(self.columns.clone()),
                rng.gen_range(self.rows.clone()),
            );
            accept(candidate).then_some(candidate)
        })
    }
}

/// Knobs for grass clump placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrassTuning {
    /// Number of clumps attempted per area.
    pub clumps: u32,
    /// Fewest blades scattered around an accepted centre.
    pub min_blades: u32,
    /// Most blades scattered around an accepted centre.
    pub max_blades: u32,
    /// Smallest Chebyshev distance between two accepted clump centres.
    pub spacing: u32,
    /// Retries per clump.
    pub attempts: u32,
    /// Tiles kept clear of clump centres along every edge.
    pub margin: u32,
}

impl Default for GrassTuning {
    fn default() -> Self {
        Self {
            clumps: 15,
            min_blades: 3,
            max_blades: 8,
            spacing: 3,
            attempts: 50,
            margin: 1,
        }
    }
}

/// Knobs for tree patch placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeTuning {
    /// Number of patches attempted per area.
    pub patches: u32,
    /// Retries per patch.
    pub attempts: u32,
    /// Probability that a valid patch actually receives a tree.
    pub placement_chance: f64,
    /// Width of the tree sprite and of its trunk band.
    pub width: f32,
    /// Height of the tree sprite.
    pub height: f32,
    /// Share of the sprite height, measured from the base, that blocks movement.
    pub hitbox_ratio: f32,
    /// Distance the sprite base sits above the anchor tile centre.
    pub base_offset: f32,
    /// Radius of the block that must be free and is claimed on placement.
    pub exclusion_radius: u32,
    /// Tiles kept clear of trees along every edge.
    pub margin: u32,
}

impl Default for TreeTuning {
    fn default() -> Self {
        Self {
            patches: 20,
            attempts: 1,
            placement_chance: 0.5,
            width: 42.66,
            height: 64.0,
            hitbox_ratio: 0.15,
            base_offset: 20.0,
            exclusion_radius: 1,
            margin: 2,
        }
    }
}

/// Knobs for rock placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RockTuning {
    /// Fewest rocks attempted per area.
    pub min_rocks: u32,
    /// Most rocks attempted per area.
    pub max_rocks: u32,
    /// Retries per rock.
    pub attempts: u32,
    /// Radius of the block that must be free before a rock is placed.
    pub exclusion_radius: u32,
    /// Radius of the block claimed once a rock is placed.
    pub footprint_radius: u32,
    /// Side length of the rock art before scaling.
    pub art_size: f32,
    /// Scale applied to the rock art and its collision box.
    pub scale: f32,
    /// Number of art variants, numbered from 1.
    pub variants: u8,
    /// Tiles kept clear of rocks along every edge.
    pub margin: u32,
}

impl Default for RockTuning {
    fn default() -> Self {
        Self {
            min_rocks: 1,
            max_rocks: 2,
            attempts: 50,
            exclusion_radius: 2,
            footprint_radius: 1,
            art_size: 16.0,
            scale: 0.2,
            variants: 2,
            margin: 1,
        }
    }
}

/// Scatters grass clumps; blades never claim occupancy.
pub fn place_grass<R: Rng>(
    occupancy: &GridOccupancy,
    tuning: &GrassTuning,
    tile_size: f32,
    rng: &mut R,
) -> Vec<ScatterFeature> {
    let Some(search) = CandidateSearch::inset(occupancy, tuning.margin, tuning.attempts) else {
        return Vec::new();
    };

    let mut centers: Vec<TileCoord> = Vec::new();
    let mut blades = Vec::new();

    for clump in 0..tuning.clumps {
        let found = search.find(rng, |candidate| {
            !occupancy.has(candidate)
                && centers
                    .iter()
                    .all(|center| center.chebyshev_distance(candidate) >= tuning.spacing)
        });
        let Some(center) = found else {
            log::debug!("grass clump {clump} skipped after {} attempts", tuning.attempts);
            continue;
        };
        centers.push(center);

        let low = tuning.min_blades.min(tuning.max_blades);
        let count = rng.gen_range(low..=tuning.max_blades);
        for _ in 0..count {
            let dx = rng.gen_range(-1..=1);
            let dy = rng.gen_range(-1..=1);
            let Some(tile) = center.offset(dx, dy) else {
                continue;
            };
            if !occupancy.contains(tile) || occupancy.has(tile) {
                continue;
            }
            blades.push(ScatterFeature {
                kind: FeatureKind::Grass,
                anchor: tile,
                position: tile.center(tile_size),
                footprint: Size::new(tile_size, tile_size),
                exclusion_radius: 0,
                collision: None,
            });
        }
    }

    blades
}

/// Places trees on free patches, claiming each placed tree's neighbourhood.
pub fn place_trees<R: Rng>(
    occupancy: &mut GridOccupancy,
    tuning: &TreeTuning,
    tile_size: f32,
    rng: &mut R,
) -> Vec<ScatterFeature> {
    let Some(search) = CandidateSearch::inset(occupancy, tuning.margin, tuning.attempts) else {
        return Vec::new();
    };

    let mut trees = Vec::new();
    for patch in 0..tuning.patches {
        let found = search.find(rng, |candidate| {
            occupancy.neighborhood_free(candidate, tuning.exclusion_radius)
        });
        let Some(anchor) = found else {
            log::debug!("tree patch {patch} has no free neighbourhood");
            continue;
        };
        if !roll(rng, tuning.placement_chance) {
            continue;
        }

        occupancy.mark_neighborhood(anchor, tuning.exclusion_radius);
        let center = anchor.center(tile_size);
        let base = WorldPoint::new(center.x, center.y - tuning.base_offset);
        let band = tuning.height * tuning.hitbox_ratio;
        trees.push(ScatterFeature {
            kind: FeatureKind::Tree,
            anchor,
            position: base,
            footprint: Size::new(tuning.width, tuning.height),
            exclusion_radius: tuning.exclusion_radius,
            collision: Some(Aabb::new(
                base.x - tuning.width / 2.0,
                base.y - band,
                tuning.width,
                band,
            )),
        });
    }

    trees
}

/// Places rocks away from existing features, claiming a small block per rock.
pub fn place_rocks<R: Rng>(
    occupancy: &mut GridOccupancy,
    tuning: &RockTuning,
    tile_size: f32,
    rng: &mut R,
) -> Vec<ScatterFeature> {
    let Some(search) = CandidateSearch::inset(occupancy, tuning.margin, tuning.attempts) else {
        return Vec::new();
    };

    let low = tuning.min_rocks.min(tuning.max_rocks);
    let count = rng.gen_range(low..=tuning.max_rocks);
    let size = Size::new(tuning.art_size * tuning.scale, tuning.art_size * tuning.scale);

    let mut rocks = Vec::new();
    for index in 0..count {
        let found = search.find(rng, |candidate| {
            occupancy.neighborhood_free(candidate, tuning.exclusion_radius)
        });
        let Some(anchor) = found else {
            log::debug!("rock {index} skipped after {} attempts", tuning.attempts);
            continue;
        };

        occupancy.mark_neighborhood(anchor, tuning.footprint_radius);
        let variant = rng.gen_range(1..=tuning.variants.max(1));
        let position = anchor.center(tile_size);
        rocks.push(ScatterFeature {
            kind: FeatureKind::Rock { variant },
            anchor,
            position,
            footprint: size,
            exclusion_radius: tuning.exclusion_radius,
            collision: Some(Aabb::from_center(position, size)),
        });
    }

    rocks
}
