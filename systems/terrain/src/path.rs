//! Winding path generation across the tile grid.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tallgrass_core::{Direction, Orientation, PathSegment, SegmentKind, TileCoord};

use crate::occupancy::GridOccupancy;

/// Knobs that shape the generated paths.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathTuning {
    /// Shortest target length in tiles.
    pub min_length: u32,
    /// Longest target length in tiles; no path emits more tiles than this.
    pub max_length: u32,
    /// Probability of attempting a turn on each eligible step.
    pub turn_chance: f64,
    /// Turns are only attempted once the step index exceeds this value.
    pub turn_after_step: u32,
    /// Number of paths generated per area.
    pub path_count: u32,
    /// Largest Manhattan distance between path ends that still receives a connector.
    pub connect_distance: u32,
}

impl Default for PathTuning {
    fn default() -> Self {
        Self {
            min_length: 15,
            max_length: 25,
            turn_chance: 0.30,
            turn_after_step: 2,
            path_count: 1,
            connect_distance: 5,
        }
    }
}

/// Orientation of a corner tile entered travelling `previous` and left travelling `next`.
///
/// Returns `None` when the pair is not a ninety degree turn.
#[must_use]
pub const fn corner_orientation(previous: Direction, next: Direction) -> Option<Orientation> {
    match (previous, next) {
        (Direction::Right, Direction::Down) | (Direction::Up, Direction::Left) => {
            Some(Orientation::Rotate0)
        }
        (Direction::Down, Direction::Left) | (Direction::Right, Direction::Up) => {
            Some(Orientation::Rotate90)
        }
        (Direction::Left, Direction::Up) | (Direction::Down, Direction::Right) => {
            Some(Orientation::Rotate180)
        }
        (Direction::Up, Direction::Right) | (Direction::Left, Direction::Down) => {
            Some(Orientation::Rotate270)
        }
        _ => None,
    }
}

/// Orientation of a straight tile travelled in the provided direction.
#[must_use]
pub const fn straight_orientation(direction: Direction) -> Orientation {
    if direction.is_horizontal() {
        Orientation::Rotate90
    } else {
        Orientation::Rotate0
    }
}

/// Generates one path from a random edge toward the interior, marking every tile.
///
/// The returned segments are in emission order. A grid too small to host an
/// interior edge cell yields an empty path.
pub fn generate_path<R: Rng>(
    occupancy: &mut GridOccupancy,
    tuning: &PathTuning,
    rng: &mut R,
) -> Vec<PathSegment> {
    let columns = occupancy.columns();
    let rows = occupancy.rows();
    let Some((mut current, mut direction)) = pick_start(columns, rows, rng) else {
        return Vec::new();
    };

    let low = tuning.min_length.min(tuning.max_length);
    let target_length = rng.gen_range(low..=tuning.max_length);

    let mut segments = Vec::new();
    let mut incoming: Option<Direction> = None;

    for step in 0..target_length {
        occupancy.mark(current);

        let segment = match incoming.and_then(|previous| corner_orientation(previous, direction)) {
            Some(orientation) => PathSegment {
                tile: current,
                kind: SegmentKind::Corner,
                orientation,
            },
            None => PathSegment {
                tile: current,
                kind: SegmentKind::Straight,
                orientation: straight_orientation(direction),
            },
        };
        segments.push(segment);
        incoming = Some(direction);

        // A turn shows up as a corner on the tile it leads into.
        if step > tuning.turn_after_step && roll(rng, tuning.turn_chance) {
            let candidates: Vec<Direction> = direction
                .perpendicular()
                .into_iter()
                .filter(|candidate| next_tile(current, *candidate, columns, rows).is_some())
                .collect();
            if !candidates.is_empty() {
                direction = candidates[rng.gen_range(0..candidates.len())];
            }
        }

        match next_tile(current, direction, columns, rows) {
            Some(next) if !on_border(next, columns, rows) => current = next,
            _ => break,
        }
    }

    segments
}

/// Generates `tuning.path_count` paths, joining consecutive ends that lie close together.
pub fn generate_paths<R: Rng>(
    occupancy: &mut GridOccupancy,
    tuning: &PathTuning,
    rng: &mut R,
) -> Vec<PathSegment> {
    let mut segments = generate_path(occupancy, tuning, rng);
    let mut previous_end = segments.last().map(|segment| segment.tile);

    for _ in 1..tuning.path_count {
        let next = generate_path(occupancy, tuning, rng);
        let next_end = next.last().map(|segment| segment.tile);
        if let (Some(from), Some(to)) = (previous_end, next_end) {
            let connector = connect_endpoints(occupancy, from, to, tuning.connect_distance);
            if !connector.is_empty() {
                log::debug!("joined path ends {from:?} and {to:?} with {} tiles", connector.len());
            }
            segments.extend(connector);
        }
        segments.extend(next);
        previous_end = next_end.or(previous_end);
    }

    segments
}

/// Joins two path ends with an L-shaped connector: a horizontal run, then a vertical run.
///
/// Nothing is emitted when the ends lie further apart than `max_distance`.
/// The end tiles themselves are not repeated; every emitted tile is marked.
pub fn connect_endpoints(
    occupancy: &mut GridOccupancy,
    from: TileCoord,
    to: TileCoord,
    max_distance: u32,
) -> Vec<PathSegment> {
    if from.manhattan_distance(to) > max_distance {
        return Vec::new();
    }

    let horizontal = axis_direction(from.column(), to.column(), Direction::Right, Direction::Left);
    let vertical = axis_direction(from.row(), to.row(), Direction::Down, Direction::Up);
    let elbow = TileCoord::new(to.column(), from.row());

    let mut tiles = Vec::new();
    let mut column = from.column();
    while column != to.column() {
        column = step_toward(column, to.column());
        tiles.push((TileCoord::new(column, from.row()), horizontal));
    }
    let mut row = from.row();
    while row != to.row() {
        row = step_toward(row, to.row());
        tiles.push((TileCoord::new(to.column(), row), vertical));
    }

    let mut segments = Vec::new();
    for (tile, travel) in tiles {
        if tile == to {
            continue;
        }
        occupancy.mark(tile);
        let corner = match (horizontal, vertical) {
            (Some(previous), Some(next)) if tile == elbow => corner_orientation(previous, next),
            _ => None,
        };
        segments.push(match corner {
            Some(orientation) => PathSegment {
                tile,
                kind: SegmentKind::Corner,
                orientation,
            },
            None => PathSegment {
                tile,
                kind: SegmentKind::Straight,
                orientation: travel.map_or(Orientation::Rotate0, straight_orientation),
            },
        });
    }

    segments
}

fn pick_start<R: Rng>(columns: u32, rows: u32, rng: &mut R) -> Option<(TileCoord, Direction)> {
    if columns == 0 || rows == 0 {
        return None;
    }

    let edges: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|edge| {
            let span = if edge.is_horizontal() { rows } else { columns };
            span >= 3
        })
        .collect();
    if edges.is_empty() {
        return None;
    }

    let edge = edges[rng.gen_range(0..edges.len())];
    let start = match edge {
        Direction::Up => TileCoord::new(rng.gen_range(1..columns - 1), 0),
        Direction::Down => TileCoord::new(rng.gen_range(1..columns - 1), rows - 1),
        Direction::Left => TileCoord::new(0, rng.gen_range(1..rows - 1)),
        Direction::Right => TileCoord::new(columns - 1, rng.gen_range(1..rows - 1)),
    };

    Some((start, edge.opposite()))
}

/// Bernoulli roll that treats non-finite chances as never.
pub(crate) fn roll<R: Rng>(rng: &mut R, chance: f64) -> bool {
    chance.is_finite() && rng.gen_bool(chance.clamp(0.0, 1.0))
}

fn next_tile(tile: TileCoord, direction: Direction, columns: u32, rows: u32) -> Option<TileCoord> {
    let (dx, dy) = direction.offset();
    tile.offset(dx, dy)
        .filter(|next| next.column() < columns && next.row() < rows)
}

fn on_border(tile: TileCoord, columns: u32, rows: u32) -> bool {
    tile.column() == 0
        || tile.row() == 0
        || tile.column() + 1 >= columns
        || tile.row() + 1 >= rows
}

fn axis_direction(
    from: u32,
    to: u32,
    forward: Direction,
    backward: Direction,
) -> Option<Direction> {
    match from.cmp(&to) {
        std::cmp::Ordering::Less => Some(forward),
        std::cmp::Ordering::Greater => Some(backward),
        std::cmp::Ordering::Equal => None,
    }
}

fn step_toward(value: u32, target: u32) -> u32 {
    if value < target {
        value + 1
    } else {
        value - 1
    }
}
