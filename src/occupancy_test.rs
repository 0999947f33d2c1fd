use super::*;
use crate::doc::{ObjectKind, UnitId};

fn fp(n: u32) -> Footprint {
    Footprint::new(n).unwrap()
}

fn hazard(x: i32, y: i32) -> PlacedObject {
    PlacedObject::new(GridPosition::new(x, y), ObjectKind::Hazard { index: 0 })
}

fn unit(x: i32, y: i32) -> PlacedObject {
    PlacedObject::new(
        GridPosition::new(x, y),
        ObjectKind::Unit { name: "U".into(), unit_id: UnitId::Number(1), status: None },
    )
}

fn cells_of(index: &OccupancyIndex) -> Vec<GridPosition> {
    let mut cells: Vec<_> = index.cells.keys().copied().collect();
    cells.sort_by_key(|c| (c.x, c.y));
    cells
}

// =============================================================
// Marking
// =============================================================

#[test]
fn new_index_is_empty() {
    assert!(OccupancyIndex::new().is_empty());
}

#[test]
fn mark_occupied_adds_square_block() {
    let mut index = OccupancyIndex::new();
    index.mark_occupied(GridPosition::new(2, 3), fp(3));
    assert_eq!(index.len(), 9);
    assert!(index.is_occupied(GridPosition::new(2, 3)));
    assert!(index.is_occupied(GridPosition::new(4, 5)));
    assert!(!index.is_occupied(GridPosition::new(5, 5)));
}

#[test]
fn clear_empties_index() {
    let mut index = OccupancyIndex::new();
    index.mark_occupied(GridPosition::new(0, 0), fp(2));
    index.clear();
    assert!(index.is_empty());
}

#[test]
fn rebuild_replays_every_object() {
    let objects = [hazard(0, 0), unit(5, 5)];
    let mut index = OccupancyIndex::new();
    index.mark_occupied(GridPosition::new(40, 40), fp(1));
    index.rebuild(&objects);
    assert_eq!(index.len(), 13);
    assert!(!index.is_occupied(GridPosition::new(40, 40)));
}

#[test]
fn overlapping_blocks_count_shared_cells_once() {
    let objects = [hazard(0, 0), unit(2, 2)];
    let mut index = OccupancyIndex::new();
    index.rebuild(&objects);
    // 9 + 4 - 1 shared cell.
    assert_eq!(index.len(), 12);
}

// =============================================================
// Release / relocate
// =============================================================

#[test]
fn release_removes_uncovered_cells() {
    let mut index = OccupancyIndex::new();
    index.mark_occupied(GridPosition::new(0, 0), fp(2));
    index.release(GridPosition::new(0, 0), fp(2));
    assert!(index.is_empty());
}

#[test]
fn release_keeps_cells_shared_with_other_blocks() {
    let mut index = OccupancyIndex::new();
    index.mark_occupied(GridPosition::new(0, 0), fp(3));
    index.mark_occupied(GridPosition::new(2, 2), fp(2));
    index.release(GridPosition::new(2, 2), fp(2));
    assert_eq!(index.len(), 9);
    assert!(index.is_occupied(GridPosition::new(2, 2)));
    assert!(!index.is_occupied(GridPosition::new(3, 3)));
}

#[test]
fn relocate_moves_block_cells() {
    let mut index = OccupancyIndex::new();
    index.mark_occupied(GridPosition::new(0, 0), fp(3));
    index.mark_occupied(GridPosition::new(5, 5), fp(2));
    index.relocate(GridPosition::new(5, 5), GridPosition::new(10, 0), fp(2));

    let mut expected = OccupancyIndex::new();
    expected.mark_occupied(GridPosition::new(0, 0), fp(3));
    expected.mark_occupied(GridPosition::new(10, 0), fp(2));
    assert_eq!(cells_of(&index), cells_of(&expected));
}

#[test]
fn relocate_onto_partially_own_cells() {
    let mut index = OccupancyIndex::new();
    index.mark_occupied(GridPosition::new(5, 5), fp(2));
    index.relocate(GridPosition::new(5, 5), GridPosition::new(6, 5), fp(2));
    assert_eq!(index.len(), 4);
    assert!(!index.is_occupied(GridPosition::new(5, 5)));
    assert!(index.is_occupied(GridPosition::new(7, 6)));
}

// =============================================================
// Collision
// =============================================================

#[test]
fn no_collision_on_empty_grid() {
    let index = OccupancyIndex::new();
    assert!(!index.is_collision(GridPosition::new(0, 0), fp(2), None, std::iter::empty()));
}

#[test]
fn object_never_collides_with_itself() {
    let u = unit(5, 5);
    let objects = [hazard(0, 0), u.clone()];
    let mut index = OccupancyIndex::new();
    index.rebuild(&objects);
    assert!(!index.is_collision(GridPosition::new(5, 5), fp(2), Some(u.object_id), &objects));
    // Partially over its own block is fine too.
    assert!(!index.is_collision(GridPosition::new(6, 6), fp(2), Some(u.object_id), &objects));
}

#[test]
fn single_shared_cell_is_collision() {
    let u = unit(5, 5);
    let objects = [hazard(0, 0), u.clone()];
    let mut index = OccupancyIndex::new();
    index.rebuild(&objects);
    // Block at (2,2) size 2 shares only cell (2,2) with the hazard.
    assert!(index.is_collision(GridPosition::new(2, 2), fp(2), Some(u.object_id), &objects));
}

#[test]
fn overlapping_objects_collide_for_each_other() {
    let a = unit(1, 1);
    let b = hazard(0, 0);
    let objects = [a.clone(), b.clone()];
    let mut index = OccupancyIndex::new();
    index.rebuild(&objects);
    assert!(index.is_collision(a.position, a.footprint(), Some(a.object_id), &objects));
    assert!(index.is_collision(b.position, b.footprint(), Some(b.object_id), &objects));
}

#[test]
fn adjacent_blocks_do_not_collide() {
    let u = unit(5, 5);
    let objects = [hazard(0, 0), u.clone()];
    let mut index = OccupancyIndex::new();
    index.rebuild(&objects);
    assert!(!index.is_collision(GridPosition::new(3, 0), fp(2), Some(u.object_id), &objects));
    assert!(!index.is_collision(GridPosition::new(3, 3), fp(2), Some(u.object_id), &objects));
}

#[test]
fn without_exclusion_own_block_collides() {
    let u = unit(5, 5);
    let objects = [u.clone()];
    let mut index = OccupancyIndex::new();
    index.rebuild(&objects);
    assert!(index.is_collision(GridPosition::new(5, 5), fp(2), None, &objects));
}
