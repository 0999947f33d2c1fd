//! Occupied-cell index and collision queries.
//!
//! Each cell carries a cover count so that incremental updates stay exact when
//! blocks overlap (a snapshot may contain overlapping objects; the index never
//! drops a cell that some other block still covers).

#[cfg(test)]
#[path = "occupancy_test.rs"]
mod occupancy_test;

use std::collections::HashMap;

use crate::doc::{ObjectId, PlacedObject};
use crate::grid::{Block, Footprint, GridPosition};

/// Set of covered grid cells.
#[derive(Debug, Clone, Default)]
pub struct OccupancyIndex {
    cells: HashMap<GridPosition, u32>,
}

impl OccupancyIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every cell.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Cover all cells of the block anchored at `pos`.
    pub fn mark_occupied(&mut self, pos: GridPosition, size: Footprint) {
        for cell in Block::new(pos, size).cells() {
            *self.cells.entry(cell).or_insert(0) += 1;
        }
    }

    /// Uncover all cells of the block anchored at `pos`. Cells still covered
    /// by another block stay occupied.
    pub fn release(&mut self, pos: GridPosition, size: Footprint) {
        for cell in Block::new(pos, size).cells() {
            if let Some(count) = self.cells.get_mut(&cell) {
                *count -= 1;
                if *count == 0 {
                    self.cells.remove(&cell);
                }
            }
        }
    }

    /// Move one block from `from` to `to`.
    pub fn relocate(&mut self, from: GridPosition, to: GridPosition, size: Footprint) {
        self.release(from, size);
        self.mark_occupied(to, size);
    }

    /// Clear and replay every object's block.
    pub fn rebuild<'a>(&mut self, objects: impl IntoIterator<Item = &'a PlacedObject>) {
        self.clear();
        for obj in objects {
            self.mark_occupied(obj.position, obj.footprint());
        }
    }

    #[must_use]
    pub fn is_occupied(&self, cell: GridPosition) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Number of distinct covered cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the candidate block shares any cell with an object other than
    /// `exclude`.
    ///
    /// The flattened cell set answers the common case (nothing nearby); when
    /// any candidate cell is covered, the live object list decides so that the
    /// excluded object's own cells never count against it.
    pub fn is_collision<'a>(
        &self,
        candidate: GridPosition,
        size: Footprint,
        exclude: Option<ObjectId>,
        objects: impl IntoIterator<Item = &'a PlacedObject>,
    ) -> bool {
        let block = Block::new(candidate, size);
        if !block.cells().any(|cell| self.is_occupied(cell)) {
            return false;
        }
        objects
            .into_iter()
            .filter(|obj| Some(obj.object_id) != exclude)
            .any(|obj| obj.block().overlaps(block))
    }
}
