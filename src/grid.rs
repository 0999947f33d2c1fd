//! Coordinate transform between integer grid cells and logical pixel space.
//!
//! The grid's Y axis points up while pixel Y points down, matching the
//! orientation of the exported map image. A block anchored at cell `(x, y)`
//! with footprint `n` covers cells `[x, x + n) × [y, y + n)`; its pixel origin
//! is the top-left corner of that block, which is why the footprint takes
//! part in the Y conversion.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CELL, HAZARD_FOOTPRINT, MAX_COORD, MAX_FOOTPRINT, UNIT_FOOTPRINT};
use crate::viewport::Point;

/// Integer cell coordinates on the placement grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates lie within `0..=MAX_COORD`.
    #[must_use]
    pub const fn is_placeable(self) -> bool {
        self.x >= 0 && self.y >= 0 && self.x <= MAX_COORD && self.y <= MAX_COORD
    }
}

/// Side length, in cells, of the square block an object covers.
///
/// Always within `1..=MAX_FOOTPRINT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Footprint(u32);

impl Footprint {
    pub const HAZARD: Self = Self(HAZARD_FOOTPRINT);
    pub const UNIT: Self = Self(UNIT_FOOTPRINT);

    /// Build a footprint, rejecting zero and anything above [`MAX_FOOTPRINT`].
    #[must_use]
    pub const fn new(cells: u32) -> Option<Self> {
        if cells == 0 || cells > MAX_FOOTPRINT { None } else { Some(Self(cells)) }
    }

    #[must_use]
    pub const fn cells(self) -> u32 {
        self.0
    }

    /// Side length in logical pixels.
    #[must_use]
    pub fn side_px(self) -> f64 {
        f64::from(self.0) * CELL
    }

    fn span(self) -> i32 {
        i32::try_from(self.0).unwrap_or(i32::MAX)
    }
}

/// An N×N block of cells anchored at its lower-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub origin: GridPosition,
    pub size: Footprint,
}

impl Block {
    #[must_use]
    pub const fn new(origin: GridPosition, size: Footprint) -> Self {
        Self { origin, size }
    }

    /// Every cell covered by the block, column by column.
    pub fn cells(self) -> impl Iterator<Item = GridPosition> {
        let n = self.size.span();
        let GridPosition { x, y } = self.origin;
        (0..n).flat_map(move |dx| (0..n).map(move |dy| GridPosition::new(x.saturating_add(dx), y.saturating_add(dy))))
    }

    #[must_use]
    pub fn contains(self, cell: GridPosition) -> bool {
        let n = self.size.span();
        let GridPosition { x, y } = self.origin;
        cell.x >= x && cell.x < x.saturating_add(n) && cell.y >= y && cell.y < y.saturating_add(n)
    }

    /// True when the two blocks share at least one cell. Edge or corner
    /// contact alone does not count.
    #[must_use]
    pub fn overlaps(self, other: Block) -> bool {
        let (a, an) = (self.origin, self.size.span());
        let (b, bn) = (other.origin, other.size.span());
        a.x < b.x.saturating_add(bn)
            && b.x < a.x.saturating_add(an)
            && a.y < b.y.saturating_add(bn)
            && b.y < a.y.saturating_add(an)
    }
}

/// Pixel-space top-left corner of the block anchored at `pos`.
#[must_use]
pub fn grid_to_pixel(pos: GridPosition, size: Footprint) -> Point {
    Point {
        x: f64::from(pos.x) * CELL,
        y: -(f64::from(pos.y) * CELL + size.side_px()),
    }
}

/// Unrounded grid coordinates for a block whose top-left corner is at `pixel`.
#[must_use]
pub fn pixel_to_grid_exact(pixel: Point, size: Footprint) -> (f64, f64) {
    (pixel.x / CELL, -pixel.y / CELL - f64::from(size.cells()))
}

/// Nearest grid cell for a block whose top-left corner is at `pixel`.
#[must_use]
pub fn pixel_to_grid(pixel: Point, size: Footprint) -> GridPosition {
    let (gx, gy) = pixel_to_grid_exact(pixel, size);
    GridPosition::new(round_cell(gx), round_cell(gy))
}

#[allow(clippy::cast_possible_truncation)]
fn round_cell(v: f64) -> i32 {
    // `as` saturates on overflow and maps NaN to 0.
    v.round() as i32
}
