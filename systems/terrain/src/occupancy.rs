//! Tile occupancy bookkeeping shared by every terrain generator.

use std::collections::HashSet;

use tallgrass_core::TileCoord;

/// Set of tiles already claimed by a placed feature within one area.
///
/// The set is bounded by the grid dimensions: marking a tile outside
/// `[0, columns) × [0, rows)` has no effect, and there is no removal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridOccupancy {
    columns: u32,
    rows: u32,
    tiles: HashSet<TileCoord>,
}

impl GridOccupancy {
    /// Creates an empty occupancy set for a grid of the provided dimensions.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            tiles: HashSet::new(),
        }
    }

    /// Number of columns in the bounded grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the bounded grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the tile lies inside the grid.
    #[must_use]
    pub const fn contains(&self, tile: TileCoord) -> bool {
        tile.column() < self.columns && tile.row() < self.rows
    }

    /// Reports whether a feature already claimed the tile.
    #[must_use]
    pub fn has(&self, tile: TileCoord) -> bool {
        self.tiles.contains(&tile)
    }

    /// Claims a single tile; out-of-bounds tiles are ignored.
    pub fn mark(&mut self, tile: TileCoord) {
        if self.contains(tile) {
            let _ = self.tiles.insert(tile);
        }
    }

    /// Claims the `(2 * radius + 1)²` block centred on `tile`, clipped to the grid.
    pub fn mark_neighborhood(&mut self, tile: TileCoord, radius: u32) {
        for neighbor in self.neighborhood(tile, radius) {
            self.mark(neighbor);
        }
    }

    /// Reports whether no in-bounds tile of the block centred on `tile` is claimed.
    #[must_use]
    pub fn neighborhood_free(&self, tile: TileCoord, radius: u32) -> bool {
        self.neighborhood(tile, radius).all(|neighbor| !self.has(neighbor))
    }

    /// First claimed tile in row-major scan order.
    #[must_use]
    pub fn first_in_scan_order(&self) -> Option<TileCoord> {
        self.tiles
            .iter()
            .copied()
            .min_by_key(|tile| (tile.row(), tile.column()))
    }

    /// Number of claimed tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Reports whether no tile has been claimed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterates the claimed tiles in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.tiles.iter().copied()
    }

    /// In-bounds tiles of the block centred on `center`.
    ///
    /// The block is clipped before iteration, so its cost never exceeds the grid size.
    fn neighborhood(&self, center: TileCoord, radius: u32) -> impl Iterator<Item = TileCoord> {
        let first_column = center.column().saturating_sub(radius);
        let last_column = center
            .column()
            .saturating_add(radius)
            .min(self.columns.saturating_sub(1));
        let first_row = center.row().saturating_sub(radius);
        let last_row = center
            .row()
            .saturating_add(radius)
            .min(self.rows.saturating_sub(1));
        (first_row..=last_row).flat_map(move |row| {
            (first_column..=last_column).map(move |column| TileCoord::new(column, row))
        })
    }
}
