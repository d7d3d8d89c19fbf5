use cgmath::Point3;

use crate::container::PartContainer;
use crate::host::BusHost;
use crate::location::PartSlot;

// Padding applied to boxes used for pointer hit-testing only; the
// authoritative geometry is never padded.
const PART_SELECTION_PADDING: f64 = 0.002;
const FACADE_SELECTION_PADDING: f64 = 0.01;

/// Axis-aligned box in block-local coordinates; a full block spans 0..1 on
/// every axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// The box grown outward by `amount` on every axis.
    pub fn grow(&self, amount: f64) -> Aabb {
        Aabb {
            min: Point3::new(self.min.x - amount, self.min.y - amount, self.min.z - amount),
            max: Point3::new(self.max.x + amount, self.max.y + amount, self.max.z + amount),
        }
    }

    pub fn contains(&self, point: Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x < self.max.x
            && point.y >= self.min.y
            && point.y < self.max.y
            && point.z >= self.min.z
            && point.z < self.max.z
    }
}

/// Merged geometry derived from a container's current contents.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shape {
    boxes: Vec<Aabb>,
}

impl Shape {
    pub fn boxes(&self) -> &[Aabb] {
        &self.boxes
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn contains(&self, point: Point3<f64>) -> bool {
        self.boxes.iter().any(|aabb| aabb.contains(point))
    }
}

/// Collects the boxes one slot contributes to a shape.
///
/// Parts express their boxes on the 1/16 block grid; the builder scales
/// them into block-local coordinates.
pub struct ShapeBuilder<'a> {
    boxes: &'a mut Vec<Aabb>,
    slot: PartSlot,
    for_selection: bool,
}

impl<'a> ShapeBuilder<'a> {
    pub(crate) fn new(boxes: &'a mut Vec<Aabb>, slot: PartSlot, for_selection: bool) -> Self {
        Self {
            boxes,
            slot,
            for_selection,
        }
    }

    /// The slot this builder collects for; parts orient their boxes by it.
    pub fn slot(&self) -> PartSlot {
        self.slot
    }

    /// Whether boxes are being collected for pointer hit-testing rather
    /// than for authoritative geometry.
    pub fn is_for_selection(&self) -> bool {
        self.for_selection
    }

    /// Add a box given on the 1/16 block grid.
    pub fn add_box(&mut self, x1: f64, y1: f64, z1: f64, x2: f64, y2: f64, z2: f64) {
        self.boxes.push(Aabb::new(
            Point3::new(x1 / 16.0, y1 / 16.0, z1 / 16.0),
            Point3::new(x2 / 16.0, y2 / 16.0, z2 / 16.0),
        ));
    }
}

/// Result of pointer hit-testing over a container's padded boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedPart {
    None,
    Part(PartSlot),
    Facade(PartSlot),
}

impl PartContainer {
    /// Visual outline shape. Lazily rebuilt after an invalidation.
    pub fn shape(&mut self, host: &dyn BusHost) -> &Shape {
        if self.cached_shape.is_none() {
            let shape = self.create_shape(false, false, host);
            self.cached_shape = Some(shape);
        }
        self.cached_shape.as_ref().unwrap()
    }

    /// Collision shape for non-living colliders (dropped items included);
    /// facades are solid here.
    pub fn collision_shape(&mut self, host: &dyn BusHost) -> &Shape {
        if self.cached_collision_shape.is_none() {
            let shape = self.create_shape(true, true, host);
            self.cached_collision_shape = Some(shape);
        }
        self.cached_collision_shape.as_ref().unwrap()
    }

    /// Collision shape for living entities; facades are passable for them.
    pub fn collision_shape_living(&mut self, host: &dyn BusHost) -> &Shape {
        if self.cached_collision_shape_living.is_none() {
            let shape = self.create_shape(true, false, host);
            self.cached_collision_shape_living = Some(shape);
        }
        self.cached_collision_shape_living
            .as_ref()
            .unwrap()
    }

    fn create_shape(&self, for_collision: bool, facades_solid: bool, host: &dyn BusHost) -> Shape {
        let mut boxes = Vec::new();

        for slot in PartSlot::ALL {
            if let Some(part) = self.part(slot) {
                let mut builder = ShapeBuilder::new(&mut boxes, slot, !for_collision);
                part.boxes(&mut builder);
            }

            if slot.is_side() {
                let include_facades = if for_collision {
                    facades_solid
                } else {
                    host.opaque_facades()
                };
                if include_facades {
                    if let Some(facade) = self.facades.facade(slot) {
                        let mut builder = ShapeBuilder::new(&mut boxes, slot, !for_collision);
                        facade.boxes(&mut builder);
                    }
                }
            }
        }

        Shape { boxes }
    }

    /// Drop all three cached geometries; the next query rebuilds.
    pub fn invalidate_shapes(&mut self) {
        self.cached_shape = None;
        self.cached_collision_shape = None;
        self.cached_collision_shape_living = None;
    }

    /// Hit-test `point` against every part's padded boxes, then (when
    /// facades are opaque) against every facade's.
    pub fn select_part(&self, point: Point3<f64>, host: &dyn BusHost) -> SelectedPart {
        for slot in PartSlot::ALL {
            if let Some(part) = self.part(slot) {
                let mut boxes = Vec::new();
                let mut builder = ShapeBuilder::new(&mut boxes, slot, true);
                part.boxes(&mut builder);

                if boxes
                    .iter()
                    .any(|aabb| aabb.grow(PART_SELECTION_PADDING).contains(point))
                {
                    return SelectedPart::Part(slot);
                }
            }
        }

        if host.opaque_facades() {
            for side in PartSlot::SIDES {
                if let Some(facade) = self.facades.facade(side) {
                    let mut boxes = Vec::new();
                    let mut builder = ShapeBuilder::new(&mut boxes, side, true);
                    facade.boxes(&mut builder);

                    if boxes
                        .iter()
                        .any(|aabb| aabb.grow(FACADE_SELECTION_PADDING).contains(point))
                    {
                        return SelectedPart::Facade(side);
                    }
                }
            }
        }

        SelectedPart::None
    }
}
