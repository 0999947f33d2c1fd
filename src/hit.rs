#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{ObjectId, ObjectVariant};
use crate::scene::Scene;
use crate::viewport::Point;

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub object_id: ObjectId,
    pub variant: ObjectVariant,
    pub draggable: bool,
}

/// Topmost visual under `world_pt`, searching from the top of the paint order.
#[must_use]
pub fn hit_test(world_pt: Point, scene: &Scene) -> Option<Hit> {
    scene
        .visuals()
        .iter()
        .rev()
        .find(|v| v.bounds().contains(world_pt))
        .map(|v| Hit { object_id: v.object_id, variant: v.variant, draggable: v.draggable })
}
