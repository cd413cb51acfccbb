//! Static obstacle index for the active area.

use tallgrass_core::{Aabb, ScatterFeature};

/// Collision boxes of every tree and rock in the active area.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionIndex {
    obstacles: Vec<Aabb>,
}

impl CollisionIndex {
    /// Builds the index from placed features; features without a collision box are skipped.
    #[must_use]
    pub fn from_features<'a>(features: impl IntoIterator<Item = &'a ScatterFeature>) -> Self {
        Self {
            obstacles: features
                .into_iter()
                .filter_map(|feature| feature.collision)
                .collect(),
        }
    }

    /// Reports whether a box at the proposed position overlaps no obstacle.
    #[must_use]
    pub fn can_move(&self, proposed: &Aabb) -> bool {
        can_move(proposed, &self.obstacles)
    }

    /// Obstacle boxes in placement order.
    #[must_use]
    pub fn obstacles(&self) -> &[Aabb] {
        &self.obstacles
    }
}

/// Reports whether `proposed` overlaps none of the provided obstacles.
#[must_use]
pub fn can_move(proposed: &Aabb, obstacles: &[Aabb]) -> bool {
    !obstacles.iter().any(|obstacle| proposed.overlaps(obstacle))
}
