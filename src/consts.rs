//! Shared numeric constants for the layout engine.

// ── Grid ────────────────────────────────────────────────────────

/// Side length of one grid cell in logical (content-space) pixels.
pub const CELL: f64 = 50.0;

/// Largest footprint accepted from a snapshot, in cells per side.
pub const MAX_FOOTPRINT: u32 = 64;

/// Footprint of a hazard marker, in cells per side.
pub const HAZARD_FOOTPRINT: u32 = 3;

/// Footprint of a mobile unit, in cells per side.
pub const UNIT_FOOTPRINT: u32 = 2;

/// Largest cell coordinate accepted on either axis. Keeps `coord + MAX_FOOTPRINT`
/// and the matching pixel values far from integer and float precision limits.
pub const MAX_COORD: i32 = 100_000;

/// Padding around the content bounds before grid lines are drawn, in cells.
pub const GRID_MARGIN_CELLS: f64 = 2.0;

/// Grid lines are omitted when either axis of the padded span would need more
/// than this many lines.
pub const MAX_GRID_LINES: u32 = 4_096;

// ── Viewport ────────────────────────────────────────────────────

/// Lower zoom limit.
pub const MIN_SCALE: f64 = 0.25;

/// Upper zoom limit.
pub const MAX_SCALE: f64 = 4.0;

/// Multiplicative zoom step applied per wheel notch.
pub const ZOOM_STEP: f64 = 1.1;

// ── Labels ──────────────────────────────────────────────────────

/// Font size for the centered object label, in logical pixels.
pub const LABEL_FONT_PX: f64 = 14.0;

/// Font size for the coordinate caption, in logical pixels.
pub const CAPTION_FONT_PX: f64 = 10.0;

// ── Export ──────────────────────────────────────────────────────

/// Outline width drawn around each rasterized visual, in device pixels.
pub const EXPORT_OUTLINE_PX: u32 = 1;

/// Largest exported image side, in device pixels.
pub const MAX_EXPORT_DIMENSION: u32 = 16_384;
