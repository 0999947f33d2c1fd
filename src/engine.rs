//! The layout engine instance.
//!
//! One [`Engine`] per canvas owns the object store, occupancy index, scene and
//! viewport. Every entry point runs to completion synchronously and returns
//! the [`Action`]s the host should apply.

use tracing::{debug, error, info, warn};

use crate::config::EngineConfig;
use crate::doc::{MapSnapshot, ObjectId, ObjectStore, PlacedObject, SnapshotError};
use crate::grid::pixel_to_grid;
use crate::hit::hit_test;
use crate::input::{Button, DragOutcome, DragSession, InputState, WheelDelta};
use crate::occupancy::OccupancyIndex;
use crate::render::{self, ExportError, ExportFormat, ImageBlob, Surface};
use crate::scene::{Scene, Visual};
use crate::viewport::{Bounds, Point, Viewport, ZoomDirection};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

pub const CURSOR_DEFAULT: &str = "default";
pub const CURSOR_GRAB: &str = "grab";
pub const CURSOR_GRABBING: &str = "grabbing";

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The host element to draw into was not found at setup.
    #[error("render target not found")]
    MissingRenderTarget,
}

/// The host element the engine draws into.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTarget {
    /// Host-side identifier of the element, for diagnostics.
    pub id: String,
    pub surface: Surface,
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A drag committed; carries the object's updated data.
    ObjectMoved(PlacedObject),
    /// Change the pointer cursor.
    SetCursor(&'static str),
    /// The visible scene or viewport changed.
    RenderNeeded,
}

/// Layout engine bound to one render target.
pub struct Engine {
    target: RenderTarget,
    config: EngineConfig,
    objects: ObjectStore,
    occupancy: OccupancyIndex,
    scene: Scene,
    viewport: Viewport,
    input: InputState,
    hover_draggable: bool,
    last_outcome: Option<DragOutcome>,
}

impl Engine {
    /// Create an engine for `target` with an empty scene centered on the surface.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingRenderTarget`] if the host could not
    /// supply a target. Nothing is constructed in that case.
    pub fn new(target: Option<RenderTarget>, config: EngineConfig) -> Result<Self, EngineError> {
        let Some(target) = target else {
            error!("layout canvas setup aborted: render target not found");
            return Err(EngineError::MissingRenderTarget);
        };
        let mut engine = Self {
            target,
            config,
            objects: ObjectStore::new(),
            occupancy: OccupancyIndex::new(),
            scene: Scene::default(),
            viewport: Viewport::default(),
            input: InputState::Idle,
            hover_draggable: false,
            last_outcome: None,
        };
        engine.fit_to_content();
        debug!(host = %engine.target.id, draggable = config.draggable, "layout canvas ready");
        Ok(engine)
    }

    // --- Data inputs ---

    /// Replace the whole scene with `snapshot`.
    ///
    /// Prior visuals are discarded, the occupancy index is rebuilt from
    /// scratch, and any drag in flight is dropped. The viewport is kept.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if the snapshot violates a precondition;
    /// the previous scene stays intact.
    pub fn render(&mut self, snapshot: MapSnapshot) -> Result<(), SnapshotError> {
        let (objects, unplaced) = match snapshot.into_objects() {
            Ok(converted) => converted,
            Err(err) => {
                warn!(%err, "map snapshot rejected");
                return Err(err);
            }
        };

        if matches!(self.input, InputState::Dragging(_)) {
            debug!("render discarded in-flight drag");
        }
        self.input = InputState::Idle;
        self.hover_draggable = false;

        self.objects.load(objects);
        self.occupancy.rebuild(self.objects.iter());
        self.scene = Scene::build(self.objects.iter(), self.config.draggable);

        debug!(objects = self.objects.len(), cells = self.occupancy.len(), unplaced, "scene rendered");
        Ok(())
    }

    /// Decode a JSON snapshot and render it.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] for malformed JSON or precondition violations.
    pub fn render_json(&mut self, raw: &str) -> Result<(), SnapshotError> {
        let snapshot = MapSnapshot::from_json(raw)?;
        self.render(snapshot)
    }

    /// Switch between editable and read-only presentation for every visual.
    pub fn set_draggable(&mut self, draggable: bool) -> Vec<Action> {
        self.config.draggable = draggable;
        self.scene.set_draggable(draggable);
        vec![Action::RenderNeeded]
    }

    // --- Viewport ---

    /// Update surface dimensions and device pixel ratio, then refit content.
    pub fn resize(&mut self, width: f64, height: f64, dpr: f64) -> Vec<Action> {
        self.target.surface = Surface { width, height, dpr };
        self.fit_to_content();
        vec![Action::RenderNeeded]
    }

    /// Center the visuals' union bounds on the surface at the current scale,
    /// or center the content origin when there is nothing to show.
    pub fn fit_to_content(&mut self) {
        let Surface { width, height, .. } = self.target.surface;
        let center = self.scene.content_bounds().map_or(Point::new(0.0, 0.0), Bounds::center);
        self.viewport.center_on(center, width, height);
        debug!(x = center.x, y = center.y, scale = self.viewport.scale, "viewport fit to content");
    }

    /// Step zoom in, anchored at the surface center.
    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.zoom_at(self.surface_center(), ZoomDirection::In)
    }

    /// Step zoom out, anchored at the surface center.
    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.zoom_at(self.surface_center(), ZoomDirection::Out)
    }

    fn surface_center(&self) -> Point {
        Point::new(self.target.surface.width * 0.5, self.target.surface.height * 0.5)
    }

    fn zoom_at(&mut self, anchor: Point, direction: ZoomDirection) -> Vec<Action> {
        if self.viewport.zoom_at(anchor, direction) { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if !matches!(self.input, InputState::Idle) {
            return Vec::new();
        }
        match button {
            Button::Middle => self.begin_pan(screen_pt, Button::Middle),
            Button::Primary => {
                let world = self.viewport.screen_to_world(screen_pt);
                match hit_test(world, &self.scene) {
                    Some(hit) if hit.draggable => self.begin_drag(hit.object_id, world),
                    _ => self.begin_pan(screen_pt, Button::Primary),
                }
            }
            Button::Secondary => Vec::new(),
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        match self.input {
            InputState::Idle => self.update_hover(screen_pt),
            InputState::Panning { last_screen, button } => {
                self.viewport.pan_by(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                self.input = InputState::Panning { last_screen: screen_pt, button };
                vec![Action::RenderNeeded]
            }
            InputState::Dragging(session) => {
                self.move_drag(&session, screen_pt);
                vec![Action::RenderNeeded]
            }
        }
    }

    /// End the current gesture. Releases of any other button than the one
    /// that started it are ignored.
    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if self.input.owning_button() != Some(button) {
            return Vec::new();
        }
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Panning { .. } => {
                self.hover_draggable = self.draggable_under(screen_pt);
                vec![Action::SetCursor(self.idle_cursor())]
            }
            InputState::Dragging(session) => {
                self.move_drag(&session, screen_pt);
                let mut actions = self.finish_drag(&session);
                self.hover_draggable = self.draggable_under(screen_pt);
                actions.push(Action::SetCursor(self.idle_cursor()));
                actions
            }
        }
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        match delta.zoom_direction() {
            Some(direction) => self.zoom_at(screen_pt, direction),
            None => Vec::new(),
        }
    }

    // --- Gestures ---

    fn begin_pan(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.input = InputState::Panning { last_screen: screen_pt, button };
        vec![Action::SetCursor(CURSOR_GRABBING)]
    }

    fn begin_drag(&mut self, id: ObjectId, world: Point) -> Vec<Action> {
        // Origin comes from the stored object, never from the visual.
        let Some(obj) = self.objects.get(&id) else {
            return self.begin_pan(self.viewport.world_to_screen(world), Button::Primary);
        };
        let (origin, size) = (obj.position, obj.footprint());
        let Some(visual) = self.scene.visual(&id) else {
            return self.begin_pan(self.viewport.world_to_screen(world), Button::Primary);
        };
        let grab_offset = Point::new(world.x - visual.origin.x, world.y - visual.origin.y);
        self.scene.raise(&id);
        self.input = InputState::Dragging(DragSession { object_id: id, origin, size, grab_offset });
        debug!(object = %id, x = origin.x, y = origin.y, "drag started");
        vec![Action::SetCursor(CURSOR_GRABBING), Action::RenderNeeded]
    }

    fn move_drag(&mut self, session: &DragSession, screen_pt: Point) {
        let world = self.viewport.screen_to_world(screen_pt);
        if let Some(visual) = self.scene.visual_mut(&session.object_id) {
            visual.origin = session.visual_origin_for(world);
        }
    }

    /// Commit or revert the drop. Runs entirely within the release event.
    fn finish_drag(&mut self, session: &DragSession) -> Vec<Action> {
        let id = session.object_id;
        let Some(live) = self.scene.visual(&id).map(|v| v.origin) else {
            return Vec::new();
        };
        let candidate = pixel_to_grid(live, session.size);
        let blocked = !candidate.is_placeable()
            || self.occupancy.is_collision(candidate, session.size, Some(id), self.objects.iter());

        if blocked {
            if let Some(visual) = self.scene.visual_mut(&id) {
                visual.snap_to(session.origin, session.size);
            }
            debug!(object = %id, x = candidate.x, y = candidate.y, "drop rejected, reverted");
            self.last_outcome = Some(DragOutcome::Reverted { object_id: id, origin: session.origin, rejected: candidate });
            return vec![Action::RenderNeeded];
        }

        self.objects.set_position(&id, candidate);
        self.occupancy.relocate(session.origin, candidate, session.size);
        let Some(obj) = self.objects.get(&id) else {
            return Vec::new();
        };
        let caption = obj.caption();
        if let Some(visual) = self.scene.visual_mut(&id) {
            visual.snap_to(candidate, session.size);
            visual.caption = caption;
        }
        self.last_outcome = Some(DragOutcome::Committed { object_id: id, from: session.origin, to: candidate });
        info!(
            object = %id,
            from_x = session.origin.x,
            from_y = session.origin.y,
            to_x = candidate.x,
            to_y = candidate.y,
            "object moved"
        );
        vec![Action::ObjectMoved(obj.clone()), Action::RenderNeeded]
    }

    fn draggable_under(&self, screen_pt: Point) -> bool {
        let world = self.viewport.screen_to_world(screen_pt);
        hit_test(world, &self.scene).is_some_and(|hit| hit.draggable)
    }

    fn update_hover(&mut self, screen_pt: Point) -> Vec<Action> {
        let over = self.draggable_under(screen_pt);
        if over == self.hover_draggable {
            return Vec::new();
        }
        self.hover_draggable = over;
        vec![Action::SetCursor(self.idle_cursor())]
    }

    fn idle_cursor(&self) -> &'static str {
        if self.hover_draggable { CURSOR_GRAB } else { CURSOR_DEFAULT }
    }

    // --- Export ---

    /// Encode the canvas exactly as currently viewed.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`] for a zero-area surface or encoder failure.
    pub fn export_image(&self, format: ExportFormat) -> Result<ImageBlob, ExportError> {
        render::export(&self.scene, &self.viewport, &self.target.surface, format)
    }

    // --- Queries ---

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    #[must_use]
    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Visuals in paint order, bottom first.
    #[must_use]
    pub fn visuals(&self) -> &[Visual] {
        self.scene.visuals()
    }

    #[must_use]
    pub fn occupancy(&self) -> &OccupancyIndex {
        &self.occupancy
    }

    /// Look up an object by ID.
    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&PlacedObject> {
        self.objects.get(id)
    }

    /// All placed objects in snapshot order.
    pub fn objects(&self) -> impl Iterator<Item = &PlacedObject> {
        self.objects.iter()
    }

    #[must_use]
    pub fn drag_session(&self) -> Option<DragSession> {
        match self.input {
            InputState::Dragging(session) => Some(session),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag_session().is_some()
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self.input, InputState::Panning { .. })
    }

    /// How the most recent drag ended.
    #[must_use]
    pub fn last_drag_outcome(&self) -> Option<DragOutcome> {
        self.last_outcome
    }
}
