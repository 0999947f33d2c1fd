//! Scene graph: one visual node per placed object plus background grid lines.
//!
//! The scene is rebuilt wholesale on every render. Visual positions live in
//! logical content pixels; the viewport transform is applied on top by the
//! host (and by [`crate::render`] on export). Paint order is the order of
//! [`Scene::visuals`], bottom first.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::Serialize;

use crate::color::{Color, LABEL_TEXT};
use crate::consts::{CAPTION_FONT_PX, CELL, GRID_MARGIN_CELLS, LABEL_FONT_PX, MAX_GRID_LINES};
use crate::doc::{ObjectId, ObjectVariant, PlacedObject};
use crate::grid::{Footprint, GridPosition, grid_to_pixel};
use crate::viewport::{Bounds, Point};

/// Font size and color the host should use for a text run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub font_px: f64,
    pub color: Color,
}

pub const LABEL_STYLE: TextStyle = TextStyle { font_px: LABEL_FONT_PX, color: LABEL_TEXT };
pub const CAPTION_STYLE: TextStyle = TextStyle { font_px: CAPTION_FONT_PX, color: LABEL_TEXT };

/// The drawable node for one placed object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visual {
    /// Source object identity.
    pub object_id: ObjectId,
    /// Source object variant.
    pub variant: ObjectVariant,
    /// Live top-left corner in content pixels. Off-grid while being dragged.
    pub origin: Point,
    /// Side length of the filled square in content pixels.
    pub side: f64,
    pub fill: Color,
    /// Centered label text.
    pub label: String,
    /// Coordinate caption text.
    pub caption: String,
    pub draggable: bool,
}

impl Visual {
    #[must_use]
    pub fn from_object(obj: &PlacedObject, draggable: bool) -> Self {
        let size = obj.footprint();
        Self {
            object_id: obj.object_id,
            variant: obj.variant(),
            origin: grid_to_pixel(obj.position, size),
            side: size.side_px(),
            fill: obj.fill(),
            label: obj.label(),
            caption: obj.caption(),
            draggable,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::square(self.origin, self.side)
    }

    /// Center point for the label.
    #[must_use]
    pub fn label_anchor(&self) -> Point {
        Point::new(self.origin.x + self.side * 0.5, self.origin.y + self.side * 0.5)
    }

    /// Bottom-center point for the caption baseline.
    #[must_use]
    pub fn caption_anchor(&self) -> Point {
        Point::new(self.origin.x + self.side * 0.5, self.origin.y + self.side - CAPTION_FONT_PX * 0.5)
    }

    /// Put the visual exactly on the cell anchor for `pos`.
    pub fn snap_to(&mut self, pos: GridPosition, size: Footprint) {
        self.origin = grid_to_pixel(pos, size);
    }
}

/// A background grid line segment in content pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridLine {
    pub from: Point,
    pub to: Point,
}

/// All visuals for the current snapshot.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    visuals: Vec<Visual>,
    grid_lines: Vec<GridLine>,
    grid_bounds: Option<Bounds>,
}

impl Scene {
    /// Build visuals for `objects` in order, with background grid lines
    /// spanning their padded union bounds.
    ///
    /// No grid lines are produced when either axis of the span would need more
    /// than [`MAX_GRID_LINES`] lines; `grid_bounds` is still reported.
    pub fn build<'a>(objects: impl IntoIterator<Item = &'a PlacedObject>, draggable: bool) -> Self {
        let visuals: Vec<Visual> = objects.into_iter().map(|obj| Visual::from_object(obj, draggable)).collect();
        let grid_bounds = union_bounds(&visuals).map(|b| snap_outward(b.padded(GRID_MARGIN_CELLS * CELL)));
        let grid_lines = grid_bounds.map(grid_lines_for).unwrap_or_default();
        Self { visuals, grid_lines, grid_bounds }
    }

    /// Visuals in paint order, bottom first.
    #[must_use]
    pub fn visuals(&self) -> &[Visual] {
        &self.visuals
    }

    #[must_use]
    pub fn grid_lines(&self) -> &[GridLine] {
        &self.grid_lines
    }

    /// Padded, cell-aligned box the grid lines span. `None` for an empty scene.
    #[must_use]
    pub fn grid_bounds(&self) -> Option<Bounds> {
        self.grid_bounds
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    #[must_use]
    pub fn visual(&self, id: &ObjectId) -> Option<&Visual> {
        self.visuals.iter().find(|v| v.object_id == *id)
    }

    pub fn visual_mut(&mut self, id: &ObjectId) -> Option<&mut Visual> {
        self.visuals.iter_mut().find(|v| v.object_id == *id)
    }

    /// Move a visual to the top of the paint order. Returns false if absent.
    pub fn raise(&mut self, id: &ObjectId) -> bool {
        let Some(idx) = self.visuals.iter().position(|v| v.object_id == *id) else {
            return false;
        };
        let visual = self.visuals.remove(idx);
        self.visuals.push(visual);
        true
    }

    /// Apply one draggability flag to every visual.
    pub fn set_draggable(&mut self, draggable: bool) {
        for v in &mut self.visuals {
            v.draggable = draggable;
        }
    }

    /// Union bounds of the visuals at their live positions.
    #[must_use]
    pub fn content_bounds(&self) -> Option<Bounds> {
        union_bounds(&self.visuals)
    }
}

fn union_bounds(visuals: &[Visual]) -> Option<Bounds> {
    visuals.iter().map(Visual::bounds).reduce(Bounds::union)
}

fn snap_outward(b: Bounds) -> Bounds {
    Bounds {
        min_x: (b.min_x / CELL).floor() * CELL,
        min_y: (b.min_y / CELL).floor() * CELL,
        max_x: (b.max_x / CELL).ceil() * CELL,
        max_y: (b.max_y / CELL).ceil() * CELL,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn grid_lines_for(b: Bounds) -> Vec<GridLine> {
    let columns = ((b.max_x - b.min_x) / CELL).round() as u32;
    let rows = ((b.max_y - b.min_y) / CELL).round() as u32;
    if columns >= MAX_GRID_LINES || rows >= MAX_GRID_LINES {
        return Vec::new();
    }
    let mut lines = Vec::with_capacity((columns + rows + 2) as usize);
    for i in 0..=columns {
        let x = b.min_x + f64::from(i) * CELL;
        lines.push(GridLine { from: Point::new(x, b.min_y), to: Point::new(x, b.max_y) });
    }
    for j in 0..=rows {
        let y = b.min_y + f64::from(j) * CELL;
        lines.push(GridLine { from: Point::new(b.min_x, y), to: Point::new(b.max_x, y) });
    }
    lines
}
