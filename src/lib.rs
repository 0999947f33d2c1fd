//! Interactive grid layout engine for placed map objects.
//!
//! The crate owns the full lifecycle of a layout canvas: turning a map
//! snapshot into visual nodes on an integer grid, maintaining the pan/zoom
//! viewport, tracking which cells are occupied, and running the press/move/
//! release state machine that lets an operator drag an object to a new cell
//! without overlapping anything else. The host is responsible only for wiring
//! pointer events to the engine, drawing the visuals it exposes, and
//! persisting the [`engine::Action::ObjectMoved`] notifications it emits.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::Engine`] instance and host actions |
//! | [`doc`] | Snapshot wire types, placed objects, and the object store |
//! | [`grid`] | Grid cells, footprints, and grid/pixel conversions |
//! | [`occupancy`] | Occupied-cell index and collision queries |
//! | [`scene`] | Visual nodes, grid lines, and content bounds |
//! | [`viewport`] | Pan/zoom transform and screen/content conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing pointer positions against visuals |
//! | [`render`] | Rasterized image export of the current view |
//! | [`color`] | Fill palette and CSS color strings |
//! | [`config`] | Engine configuration |
//! | [`consts`] | Shared numeric constants (cell size, zoom limits, etc.) |

pub mod color;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod grid;
pub mod hit;
pub mod input;
pub mod occupancy;
pub mod render;
pub mod scene;
pub mod viewport;
