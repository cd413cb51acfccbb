//! The generated area the player currently walks through.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tallgrass_core::{Aabb, AreaCoordinate, Direction, WorldPoint};
use tallgrass_system_terrain::{generate_area, AreaLayout, TerrainTuning};

use crate::collision::CollisionIndex;

const AREA_SEED_SALT: u64 = 0xA5A5_5A5A_D3F0_1234;

/// Generated layout of one area plus the obstacles derived from it.
///
/// The model is replaced wholesale on every area transition.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaModel {
    coordinate: AreaCoordinate,
    layout: AreaLayout,
    obstacles: CollisionIndex,
}

impl AreaModel {
    /// Generates the area at `coordinate`. The same seed and coordinate always
    /// yield the same layout.
    #[must_use]
    pub fn generate(coordinate: AreaCoordinate, tuning: &TerrainTuning, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(area_seed(seed, coordinate));
        let layout = generate_area(tuning, &mut rng);
        let obstacles = CollisionIndex::from_features(layout.trees().iter().chain(layout.rocks()));
        log::debug!(
            "area {coordinate} ready with {} obstacles",
            obstacles.obstacles().len()
        );
        Self {
            coordinate,
            layout,
            obstacles,
        }
    }

    /// Coordinate of the area in the overworld.
    #[must_use]
    pub const fn coordinate(&self) -> AreaCoordinate {
        self.coordinate
    }

    /// Generated terrain.
    #[must_use]
    pub fn layout(&self) -> &AreaLayout {
        &self.layout
    }

    /// Tree and rock collision boxes.
    #[must_use]
    pub fn obstacles(&self) -> &CollisionIndex {
        &self.obstacles
    }

    /// Reports whether the box overlaps any grass blade.
    #[must_use]
    pub fn overlaps_grass(&self, bounds: &Aabb) -> bool {
        self.layout
            .grass()
            .iter()
            .any(|blade| blade.bounds().overlaps(bounds))
    }

    /// Edge crossed by a centre that left `[0, width] × [0, height]`, if any.
    #[must_use]
    pub fn exit_direction(&self, center: WorldPoint) -> Option<Direction> {
        if center.x < 0.0 {
            Some(Direction::Left)
        } else if center.x > self.layout.width() {
            Some(Direction::Right)
        } else if center.y < 0.0 {
            Some(Direction::Up)
        } else if center.y > self.layout.height() {
            Some(Direction::Down)
        } else {
            None
        }
    }

    /// Point at which an actor entering through the side opposite `travel` appears.
    ///
    /// The actor is inset by half its extent and keeps its cross-axis coordinate.
    #[must_use]
    pub fn entry_point(
        &self,
        travel: Direction,
        from: WorldPoint,
        half_width: f32,
        half_height: f32,
    ) -> WorldPoint {
        match travel {
            Direction::Left => WorldPoint::new(self.layout.width() - half_width, from.y),
            Direction::Right => WorldPoint::new(half_width, from.y),
            Direction::Up => WorldPoint::new(from.x, self.layout.height() - half_height),
            Direction::Down => WorldPoint::new(from.x, half_height),
        }
    }
}

fn area_seed(seed: u64, coordinate: AreaCoordinate) -> u64 {
    let packed = (u64::from(coordinate.x as u32) << 32) | u64::from(coordinate.y as u32);
    seed ^ packed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ AREA_SEED_SALT
}
