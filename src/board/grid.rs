//! Fixed-size occupancy grid over axial cells
//!
//! The grid is the authority on which combatant stands where. Every mutating
//! operation either fully applies or is rejected with an error; callers doing
//! bulk placement enumerate `free_cells` first instead of probing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::board::hex::HexCoord;
use crate::core::error::{Result, SimError};
use crate::core::types::CombatantId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HexGrid {
    cols: i32,
    rows: i32,
    occupancy: HashMap<HexCoord, CombatantId>,
}

impl HexGrid {
    pub fn new(cols: i32, rows: i32) -> Self {
        Self {
            cols,
            rows,
            occupancy: HashMap::new(),
        }
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn in_bounds(&self, coord: HexCoord) -> bool {
        coord.q >= 0 && coord.r >= 0 && coord.q < self.cols && coord.r < self.rows
    }

    pub fn occupant_at(&self, coord: HexCoord) -> Option<CombatantId> {
        self.occupancy.get(&coord).copied()
    }

    /// Reverse lookup: the cell a combatant currently occupies
    pub fn position_of(&self, id: CombatantId) -> Option<HexCoord> {
        self.occupancy
            .iter()
            .find(|(_, occupant)| **occupant == id)
            .map(|(coord, _)| *coord)
    }

    /// Bind a token to a cell. Rejected when the cell is out of bounds or
    /// already occupied.
    pub fn place(&mut self, id: CombatantId, coord: HexCoord) -> Result<()> {
        if !self.in_bounds(coord) {
            return Err(SimError::OutOfBounds(coord));
        }
        if self.occupancy.contains_key(&coord) {
            return Err(SimError::CellOccupied(coord));
        }
        self.occupancy.insert(coord, id);
        Ok(())
    }

    /// Clear a cell and return the prior occupant. Rejected when the cell is
    /// out of bounds or empty.
    pub fn remove(&mut self, coord: HexCoord) -> Result<CombatantId> {
        if !self.in_bounds(coord) {
            return Err(SimError::OutOfBounds(coord));
        }
        self.occupancy
            .remove(&coord)
            .ok_or(SimError::CellEmpty(coord))
    }

    /// Atomic remove-then-place. On any failure the source cell is left
    /// unchanged; no partial mutation is observable.
    pub fn move_token(&mut self, src: HexCoord, dest: HexCoord) -> Result<()> {
        if !self.in_bounds(src) {
            return Err(SimError::OutOfBounds(src));
        }
        if !self.in_bounds(dest) {
            return Err(SimError::OutOfBounds(dest));
        }
        if self.occupancy.contains_key(&dest) {
            return Err(SimError::CellOccupied(dest));
        }
        match self.occupancy.remove(&src) {
            Some(id) => {
                self.occupancy.insert(dest, id);
                Ok(())
            }
            None => Err(SimError::CellEmpty(src)),
        }
    }

    /// Drop a token wherever it stands. A token that is not on the board is
    /// tolerated as a no-op so stale references after a wave transition
    /// never escalate.
    pub fn clear_token(&mut self, id: CombatantId) {
        self.occupancy.retain(|_, occupant| *occupant != id);
    }

    /// The six in-bounds neighbors of a cell
    pub fn neighbors(&self, coord: HexCoord) -> Vec<HexCoord> {
        coord
            .neighbors()
            .into_iter()
            .filter(|neighbor| self.in_bounds(*neighbor))
            .collect()
    }

    /// All unoccupied cells in row-major (q, then r) order
    pub fn free_cells(&self) -> Vec<HexCoord> {
        let mut cells = Vec::new();
        for q in 0..self.cols {
            for r in 0..self.rows {
                let coord = HexCoord::new(q, r);
                if !self.occupancy.contains_key(&coord) {
                    cells.push(coord);
                }
            }
        }
        cells
    }

    pub fn occupied_count(&self) -> usize {
        self.occupancy.len()
    }

    pub fn cell_count(&self) -> usize {
        (self.cols * self.rows).max(0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_remove_round_trip() {
        let mut grid = HexGrid::new(6, 6);
        let id = CombatantId::new();
        let cell = HexCoord::new(2, 3);

        grid.place(id, cell).unwrap();
        assert_eq!(grid.occupant_at(cell), Some(id));
        assert_eq!(grid.position_of(id), Some(cell));

        let removed = grid.remove(cell).unwrap();
        assert_eq!(removed, id);
        assert_eq!(grid.occupant_at(cell), None);
    }

    #[test]
    fn test_place_rejects_occupied_cell() {
        let mut grid = HexGrid::new(6, 6);
        let cell = HexCoord::new(0, 0);
        grid.place(CombatantId::new(), cell).unwrap();

        let result = grid.place(CombatantId::new(), cell);
        assert!(matches!(result, Err(SimError::CellOccupied(_))));
    }

    #[test]
    fn test_place_rejects_out_of_bounds() {
        let mut grid = HexGrid::new(6, 6);
        let result = grid.place(CombatantId::new(), HexCoord::new(6, 0));
        assert!(matches!(result, Err(SimError::OutOfBounds(_))));

        let result = grid.place(CombatantId::new(), HexCoord::new(0, -1));
        assert!(matches!(result, Err(SimError::OutOfBounds(_))));
    }

    #[test]
    fn test_remove_rejects_empty_cell() {
        let mut grid = HexGrid::new(6, 6);
        let result = grid.remove(HexCoord::new(1, 1));
        assert!(matches!(result, Err(SimError::CellEmpty(_))));
    }

    #[test]
    fn test_move_token() {
        let mut grid = HexGrid::new(6, 6);
        let id = CombatantId::new();
        let src = HexCoord::new(0, 0);
        let dest = HexCoord::new(1, 0);

        grid.place(id, src).unwrap();
        grid.move_token(src, dest).unwrap();

        assert_eq!(grid.occupant_at(src), None);
        assert_eq!(grid.occupant_at(dest), Some(id));
    }

    #[test]
    fn test_move_into_occupied_leaves_source_unchanged() {
        let mut grid = HexGrid::new(6, 6);
        let mover = CombatantId::new();
        let blocker = CombatantId::new();
        let src = HexCoord::new(0, 0);
        let dest = HexCoord::new(1, 0);

        grid.place(mover, src).unwrap();
        grid.place(blocker, dest).unwrap();

        let result = grid.move_token(src, dest);
        assert!(matches!(result, Err(SimError::CellOccupied(_))));
        assert_eq!(grid.occupant_at(src), Some(mover));
        assert_eq!(grid.occupant_at(dest), Some(blocker));
    }

    #[test]
    fn test_clear_token_is_noop_for_absent_token() {
        let mut grid = HexGrid::new(6, 6);
        let id = CombatantId::new();
        grid.clear_token(id);
        assert_eq!(grid.occupied_count(), 0);

        grid.place(id, HexCoord::new(3, 3)).unwrap();
        grid.clear_token(id);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_neighbors_filtered_to_bounds() {
        let grid = HexGrid::new(6, 6);
        // Corner cell loses half its neighbors.
        let corner = grid.neighbors(HexCoord::new(0, 0));
        assert_eq!(corner.len(), 2);

        let center = grid.neighbors(HexCoord::new(3, 3));
        assert_eq!(center.len(), 6);
    }

    #[test]
    fn test_free_cells_shrink_with_placement() {
        let mut grid = HexGrid::new(3, 3);
        assert_eq!(grid.free_cells().len(), 9);

        grid.place(CombatantId::new(), HexCoord::new(1, 1)).unwrap();
        let free = grid.free_cells();
        assert_eq!(free.len(), 8);
        assert!(!free.contains(&HexCoord::new(1, 1)));
    }
}
