//! Document model: snapshot wire types, placed objects, and the in-memory store.
//!
//! A [`MapSnapshot`] is the shape the host hands over on every render. It is
//! validated and converted into [`PlacedObject`]s, a tagged variant type where
//! each variant carries its own footprint and display policy. The
//! [`ObjectStore`] owns the live objects between renders; positions only
//! change there through a committed drag.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::{
    Color, HAZARD_FILL, MARKER_FILL, UNIT_ASSIGNED_FILL, UNIT_DEFAULT_FILL, UNIT_MESSAGED_FILL, UNIT_MOVED_FILL,
    UNIT_WRONG_FILL,
};
use crate::consts::{MAX_COORD, MAX_FOOTPRINT};
use crate::grid::{Block, Footprint, GridPosition};

/// Unique identifier for a rendered object. Regenerated on every render.
pub type ObjectId = Uuid;

// =============================================================
// Wire types
// =============================================================

/// Map contents supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    #[serde(default)]
    pub hazards: Vec<HazardData>,
    #[serde(default)]
    pub markers: Vec<MarkerData>,
    #[serde(default)]
    pub units: Vec<UnitData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardData {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerData {
    pub x: i32,
    pub y: i32,
    pub size: u32,
    pub name: String,
}

/// A mobile unit. Null `x`/`y` means the unit has not been placed yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitData {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub name: String,
    pub id: UnitId,
    #[serde(default)]
    pub status: Option<String>,
}

/// Host-side unit identifier, echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UnitId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Snapshot rejected before any engine state was touched.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot JSON could not be decoded (including non-integer sizes or coordinates).
    #[error("failed to decode map snapshot: {0}")]
    Decode(#[from] serde_json::Error),

    /// An object is anchored outside the non-negative quadrant.
    #[error("{variant} #{index} has negative coordinate ({x}, {y})")]
    NegativeCoordinate { variant: ObjectVariant, index: usize, x: i32, y: i32 },

    /// An object is anchored beyond the largest supported cell coordinate.
    #[error("{variant} #{index} coordinate ({x}, {y}) exceeds {max}", max = MAX_COORD)]
    CoordinateOutOfRange { variant: ObjectVariant, index: usize, x: i32, y: i32 },

    /// A marker footprint is zero or larger than the grid supports.
    #[error("marker #{index} has invalid size {size} (expected 1..={max})", max = MAX_FOOTPRINT)]
    InvalidFootprint { index: usize, size: u32 },

    /// A unit has exactly one of `x` / `y` set.
    #[error("unit #{index} has a partial position")]
    PartialPosition { index: usize },
}

impl MapSnapshot {
    /// Decode a snapshot from its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Decode`] if the JSON does not match the snapshot shape.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Check the geometric preconditions every object must satisfy.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, scanning hazards, markers, then units.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        for (index, h) in self.hazards.iter().enumerate() {
            check_placeable(ObjectVariant::Hazard, index, h.x, h.y)?;
        }
        for (index, m) in self.markers.iter().enumerate() {
            check_placeable(ObjectVariant::Marker, index, m.x, m.y)?;
            if Footprint::new(m.size).is_none() {
                return Err(SnapshotError::InvalidFootprint { index, size: m.size });
            }
        }
        for (index, u) in self.units.iter().enumerate() {
            match (u.x, u.y) {
                (Some(x), Some(y)) => check_placeable(ObjectVariant::Unit, index, x, y)?,
                (None, None) => {}
                _ => return Err(SnapshotError::PartialPosition { index }),
            }
        }
        Ok(())
    }

    /// Validate and convert into placed objects, assigning fresh ids.
    ///
    /// Unplaced units are dropped; the second value counts them.
    ///
    /// # Errors
    ///
    /// Returns the first precondition violation, see [`MapSnapshot::validate`].
    pub fn into_objects(self) -> Result<(Vec<PlacedObject>, usize), SnapshotError> {
        self.validate()?;
        let mut objects = Vec::with_capacity(self.hazards.len() + self.markers.len() + self.units.len());
        for (index, h) in self.hazards.into_iter().enumerate() {
            objects.push(PlacedObject::new(GridPosition::new(h.x, h.y), ObjectKind::Hazard { index }));
        }
        for (index, m) in self.markers.into_iter().enumerate() {
            let Some(size) = Footprint::new(m.size) else {
                return Err(SnapshotError::InvalidFootprint { index, size: m.size });
            };
            objects.push(PlacedObject::new(GridPosition::new(m.x, m.y), ObjectKind::Marker { size, name: m.name }));
        }
        let mut unplaced = 0;
        for u in self.units {
            let (Some(x), Some(y)) = (u.x, u.y) else {
                unplaced += 1;
                continue;
            };
            let kind = ObjectKind::Unit { name: u.name, unit_id: u.id, status: u.status };
            objects.push(PlacedObject::new(GridPosition::new(x, y), kind));
        }
        Ok((objects, unplaced))
    }
}

fn check_placeable(variant: ObjectVariant, index: usize, x: i32, y: i32) -> Result<(), SnapshotError> {
    if x < 0 || y < 0 {
        return Err(SnapshotError::NegativeCoordinate { variant, index, x, y });
    }
    if !GridPosition::new(x, y).is_placeable() {
        return Err(SnapshotError::CoordinateOutOfRange { variant, index, x, y });
    }
    Ok(())
}

// =============================================================
// Placed objects
// =============================================================

/// Unit status as reported by the host. Unknown strings map to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitStatus {
    Assigned,
    Moved,
    Messaged,
    Wrong,
}

impl UnitStatus {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "assigned" => Some(Self::Assigned),
            "moved" => Some(Self::Moved),
            "messaged" => Some(Self::Messaged),
            "wrong" => Some(Self::Wrong),
            _ => None,
        }
    }

    #[must_use]
    pub fn fill(self) -> Color {
        match self {
            Self::Assigned => UNIT_ASSIGNED_FILL,
            Self::Moved => UNIT_MOVED_FILL,
            Self::Messaged => UNIT_MESSAGED_FILL,
            Self::Wrong => UNIT_WRONG_FILL,
        }
    }
}

/// Variant tag without payload, carried by visuals for lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectVariant {
    Hazard,
    Marker,
    Unit,
}

impl fmt::Display for ObjectVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hazard => "hazard",
            Self::Marker => "marker",
            Self::Unit => "unit",
        })
    }
}

/// Variant-specific payload of a placed object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectKind {
    /// Fixed 3×3 hazard. `index` is its position in the snapshot's hazard list.
    Hazard { index: usize },
    /// Named marker with a variable footprint.
    Marker { size: Footprint, name: String },
    /// Fixed 2×2 mobile unit.
    Unit {
        name: String,
        #[serde(rename = "id")]
        unit_id: UnitId,
        status: Option<String>,
    },
}

/// An object on the grid as held by the engine and reported to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedObject {
    pub object_id: ObjectId,
    #[serde(flatten)]
    pub position: GridPosition,
    #[serde(flatten)]
    pub kind: ObjectKind,
}

impl PlacedObject {
    /// Wrap a kind at a position with a fresh id.
    #[must_use]
    pub fn new(position: GridPosition, kind: ObjectKind) -> Self {
        Self { object_id: Uuid::new_v4(), position, kind }
    }

    #[must_use]
    pub fn variant(&self) -> ObjectVariant {
        match self.kind {
            ObjectKind::Hazard { .. } => ObjectVariant::Hazard,
            ObjectKind::Marker { .. } => ObjectVariant::Marker,
            ObjectKind::Unit { .. } => ObjectVariant::Unit,
        }
    }

    #[must_use]
    pub fn footprint(&self) -> Footprint {
        match self.kind {
            ObjectKind::Hazard { .. } => Footprint::HAZARD,
            ObjectKind::Marker { size, .. } => size,
            ObjectKind::Unit { .. } => Footprint::UNIT,
        }
    }

    /// The block of cells this object currently covers.
    #[must_use]
    pub fn block(&self) -> Block {
        Block::new(self.position, self.footprint())
    }

    /// Centered label: 1-based index for hazards, name otherwise.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.kind {
            ObjectKind::Hazard { index } => (index + 1).to_string(),
            ObjectKind::Marker { name, .. } | ObjectKind::Unit { name, .. } => name.clone(),
        }
    }

    /// Small coordinate caption drawn under the label.
    #[must_use]
    pub fn caption(&self) -> String {
        format!("({}, {})", self.position.x, self.position.y)
    }

    #[must_use]
    pub fn fill(&self) -> Color {
        match &self.kind {
            ObjectKind::Hazard { .. } => HAZARD_FILL,
            ObjectKind::Marker { .. } => MARKER_FILL,
            ObjectKind::Unit { status, .. } => status
                .as_deref()
                .and_then(UnitStatus::parse)
                .map_or(UNIT_DEFAULT_FILL, UnitStatus::fill),
        }
    }
}

// =============================================================
// Store
// =============================================================

/// In-memory store of placed objects, iterated in snapshot order.
pub struct ObjectStore {
    objects: HashMap<ObjectId, PlacedObject>,
    order: Vec<ObjectId>,
}

impl ObjectStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { objects: HashMap::new(), order: Vec::new() }
    }

    /// Replace all objects.
    pub fn load(&mut self, objects: Vec<PlacedObject>) {
        self.objects.clear();
        self.order.clear();
        for obj in objects {
            self.order.push(obj.object_id);
            self.objects.insert(obj.object_id, obj);
        }
    }

    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&PlacedObject> {
        self.objects.get(id)
    }

    /// Move an object to `position`. Returns false if the object doesn't exist.
    pub fn set_position(&mut self, id: &ObjectId, position: GridPosition) -> bool {
        let Some(obj) = self.objects.get_mut(id) else {
            return false;
        };
        obj.position = position;
        true
    }

    /// All objects in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedObject> {
        self.order.iter().filter_map(|id| self.objects.get(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::new()
    }
}
