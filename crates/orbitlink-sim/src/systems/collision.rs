//! Collision grid: jam detection with a fixed spatial hash.
//!
//! The play area is a square of side `2 * half_extent` split into cells of
//! `cell_size`. Each cell holds up to `MAX_SHIPS_PER_CELL` ship *slot indices*
//! for the current tick; anything beyond that is dropped. Cell storage is
//! allocated once and reused, so evaluation never allocates.

use orbitlink_core::components::ShipState;
use orbitlink_core::constants::MAX_SHIPS_PER_CELL;
use orbitlink_core::types::Vec2;

/// Slot indices bucketed into one cell this tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridCell {
    indices: [u16; MAX_SHIPS_PER_CELL],
    count: u8,
}

impl GridCell {
    #[inline]
    fn clear(&mut self) {
        self.count = 0;
    }

    /// Returns false when the cell is full and the index was dropped.
    #[inline]
    fn push(&mut self, index: u16) -> bool {
        let count = self.count as usize;
        if count >= MAX_SHIPS_PER_CELL {
            return false;
        }
        self.indices[count] = index;
        self.count += 1;
        true
    }

    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices[..self.count as usize]
    }
}

/// Fixed-size spatial hash over ship positions.
#[derive(Debug)]
pub struct CollisionGrid {
    half_extent: f64,
    cell_size: f64,
    width: i64,
    height: i64,
    cells: Box<[GridCell]>,
    /// Indices dropped because their cell was full during the last evaluate.
    overflow: usize,
}

impl CollisionGrid {
    /// Grid covering `[-half_extent, half_extent]` on both axes.
    ///
    /// Slot indices are stored as `u16`, so pools above 65535 ships are not
    /// supported (config validation enforces this).
    pub fn new(half_extent: f64, cell_size: f64) -> Self {
        let cells_per_axis = ((2.0 * half_extent) / cell_size).ceil() as i64 + 1;
        let cells_per_axis = cells_per_axis.max(1);
        Self {
            half_extent,
            cell_size,
            width: cells_per_axis,
            height: cells_per_axis,
            cells: vec![GridCell::default(); (cells_per_axis * cells_per_axis) as usize]
                .into_boxed_slice(),
            overflow: 0,
        }
    }

    /// Number of indices dropped by full cells in the last evaluate.
    pub fn overflow(&self) -> usize {
        self.overflow
    }

    /// Recompute every ship's jam flag from scratch.
    ///
    /// A ship is jammed when any other bucketed ship is within `jam_radius`
    /// (inclusive). Inside the grid this is symmetric: if `a` jams `b`, `b`
    /// jams `a`. Ships outside the grid break that. They are never bucketed,
    /// so nothing sees them, yet a ship one cell past the edge still scans the
    /// edge cells. It can be jammed by an in-grid ship that stays unjammed.
    pub fn evaluate(&mut self, ships: &mut [ShipState], jam_radius: f64) {
        for cell in self.cells.iter_mut() {
            cell.clear();
        }
        self.overflow = 0;

        for (i, ship) in ships.iter().enumerate() {
            if let Some(index) = self.cell_index(ship.current_position) {
                if !self.cells[index].push(i as u16) {
                    self.overflow += 1;
                }
            }
        }

        let jam_radius_sq = jam_radius * jam_radius;

        for i in 0..ships.len() {
            let position = ships[i].current_position;
            let jammed = self.has_neighbor_within(ships, i, position, jam_radius_sq);
            ships[i].is_jammed = jammed;
        }
    }

    fn has_neighbor_within(&self, ships: &[ShipState], me: usize, position: Vec2, radius_sq: f64) -> bool {
        let Some((cx, cy)) = self.cell_coords(position) else {
            return false;
        };
        // Farther out than one cell the 3x3 scan cannot reach the grid.
        // Also keeps saturated coordinates clear of the `± 1` below.
        if cx < -1 || cy < -1 || cx > self.width || cy > self.height {
            return false;
        }

        for y in cy - 1..=cy + 1 {
            for x in cx - 1..=cx + 1 {
                let Some(index) = self.index_from_coords(x, y) else {
                    continue;
                };
                for &other in self.cells[index].indices() {
                    let other = other as usize;
                    if other == me {
                        continue;
                    }
                    if position.distance_squared(ships[other].current_position) <= radius_sq {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Unbounded cell coordinates, or `None` for non-finite positions.
    #[inline]
    fn cell_coords(&self, position: Vec2) -> Option<(i64, i64)> {
        if !position.is_finite() {
            return None;
        }
        let cx = ((position.x + self.half_extent) / self.cell_size).floor() as i64;
        let cy = ((position.y + self.half_extent) / self.cell_size).floor() as i64;
        Some((cx, cy))
    }

    #[inline]
    fn index_from_coords(&self, cx: i64, cy: i64) -> Option<usize> {
        if cx < 0 || cx >= self.width || cy < 0 || cy >= self.height {
            return None;
        }
        Some((cy * self.width + cx) as usize)
    }

    #[inline]
    fn cell_index(&self, position: Vec2) -> Option<usize> {
        let (cx, cy) = self.cell_coords(position)?;
        self.index_from_coords(cx, cy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship_at(ship_id: u64, x: f64, y: f64) -> ShipState {
        ShipState {
            ship_id,
            route_id: 101,
            current_position: Vec2::new(x, y),
            ..Default::default()
        }
    }

    #[test]
    fn cells_per_axis_follow_extent_and_cell_size() {
        let grid = CollisionGrid::new(30.0, 2.0);
        assert_eq!((grid.width, grid.height), (31, 31));
        let grid = CollisionGrid::new(10.0, 3.0);
        assert_eq!((grid.width, grid.height), (8, 8));
        assert_eq!(grid.cells.len(), 64);
    }

    #[test]
    fn nearby_ships_jam_each_other() {
        let mut grid = CollisionGrid::new(30.0, 2.0);
        let mut ships = vec![ship_at(1, 0.0, 0.0), ship_at(2, 0.5, 0.0), ship_at(3, 10.0, 10.0)];
        grid.evaluate(&mut ships, 1.0);
        assert!(ships[0].is_jammed);
        assert!(ships[1].is_jammed);
        assert!(!ships[2].is_jammed);
    }

    #[test]
    fn jam_detected_across_cell_boundary() {
        let mut grid = CollisionGrid::new(30.0, 2.0);
        // x = -0.1 and x = 0.1 fall in different cells.
        let mut ships = vec![ship_at(1, -0.1, 0.0), ship_at(2, 0.1, 0.0)];
        grid.evaluate(&mut ships, 1.0);
        assert!(ships[0].is_jammed && ships[1].is_jammed);
    }

    #[test]
    fn exact_radius_counts_as_jam() {
        let mut grid = CollisionGrid::new(30.0, 2.0);
        let mut ships = vec![ship_at(1, 2.0, 3.0), ship_at(2, 3.0, 3.0)];
        grid.evaluate(&mut ships, 1.0);
        assert!(ships[0].is_jammed && ships[1].is_jammed);
    }

    #[test]
    fn jam_state_is_not_sticky() {
        let mut grid = CollisionGrid::new(30.0, 2.0);
        let mut ships = vec![ship_at(1, 0.0, 0.0), ship_at(2, 0.2, 0.0)];
        grid.evaluate(&mut ships, 1.0);
        assert!(ships[0].is_jammed);

        ships[1].current_position = Vec2::new(5.0, 5.0);
        grid.evaluate(&mut ships, 1.0);
        assert!(!ships[0].is_jammed);
        assert!(!ships[1].is_jammed);
    }

    #[test]
    fn lone_ship_is_never_jammed() {
        let mut grid = CollisionGrid::new(30.0, 2.0);
        let mut ships = vec![ship_at(1, 0.0, 0.0)];
        ships[0].is_jammed = true;
        grid.evaluate(&mut ships, 1.0);
        assert!(!ships[0].is_jammed);
    }

    #[test]
    fn ships_outside_grid_are_not_bucketed() {
        let mut grid = CollisionGrid::new(5.0, 2.0);
        let mut ships = vec![ship_at(1, 100.0, 100.0), ship_at(2, 100.2, 100.0)];
        grid.evaluate(&mut ships, 1.0);
        assert!(!ships[0].is_jammed);
        assert!(!ships[1].is_jammed);
    }

    #[test]
    fn ship_just_past_the_edge_is_jammed_one_way() {
        // Cells cover x in [-5, 7); the first ship is bucketed, the second is not.
        let mut grid = CollisionGrid::new(5.0, 2.0);
        let mut ships = vec![ship_at(1, -4.9, 0.0), ship_at(2, -5.3, 0.0)];
        grid.evaluate(&mut ships, 1.0);
        assert!(!ships[0].is_jammed);
        assert!(ships[1].is_jammed);
    }

    #[test]
    fn huge_finite_positions_are_ignored() {
        let mut grid = CollisionGrid::new(30.0, 2.0);
        let mut ships = vec![
            ship_at(1, 1e30, 1e30),
            ship_at(2, 1e30, 1e30),
            ship_at(3, -f64::MAX, 0.0),
            ship_at(4, 0.0, f64::MAX),
            ship_at(5, 0.0, 0.0),
        ];
        grid.evaluate(&mut ships, 1.0);
        assert!(ships.iter().all(|s| !s.is_jammed));
    }

    #[test]
    fn non_finite_positions_are_ignored() {
        let mut grid = CollisionGrid::new(30.0, 2.0);
        let mut ships = vec![ship_at(1, f64::NAN, 0.0), ship_at(2, 0.0, 0.0)];
        grid.evaluate(&mut ships, 1.0);
        assert!(!ships[0].is_jammed);
        assert!(!ships[1].is_jammed);
    }

    #[test]
    fn full_cells_drop_overflow() {
        let mut grid = CollisionGrid::new(30.0, 2.0);
        let mut ships: Vec<ShipState> = (0..10).map(|i| ship_at(i, 0.1, 0.1)).collect();
        grid.evaluate(&mut ships, 1.0);
        assert_eq!(grid.overflow(), 10 - MAX_SHIPS_PER_CELL);
        // Every ship still sees at least one bucketed neighbour.
        assert!(ships.iter().all(|s| s.is_jammed));
    }

    #[test]
    fn collision_is_symmetric() {
        let mut grid = CollisionGrid::new(30.0, 2.0);
        let positions = [
            (0.0, 0.0),
            (0.7, 0.7),
            (-5.0, 3.0),
            (-5.9, 3.0),
            (12.0, -12.0),
            (20.0, 20.0),
            (20.0, 21.5),
        ];
        let mut ships: Vec<ShipState> = positions
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| ship_at(i as u64, x, y))
            .collect();
        grid.evaluate(&mut ships, 1.0);

        for a in 0..ships.len() {
            for b in 0..ships.len() {
                if a == b {
                    continue;
                }
                let d = ships[a].current_position.distance(ships[b].current_position);
                if d <= 1.0 {
                    assert!(ships[a].is_jammed && ships[b].is_jammed, "{a} and {b} at {d}");
                }
            }
        }
        assert!(!ships[4].is_jammed);
        assert!(!ships[5].is_jammed && !ships[6].is_jammed);
    }
}
