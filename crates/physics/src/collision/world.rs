//! Collision world containing level geometry and character bodies.

use glam::Vec3;
use parry3d::math::{Isometry, Point, Real, Vector};
use parry3d::query::Ray;
use parry3d::shape::SharedShape;

use fpsmove_locomotion::{EntityId, WorldQuery};

use super::flags::ContentFlags;
use super::trace::RayHit;

/// Identifier of a brush inside one [`CollisionWorld`].
pub type BrushId = u32;

/// Slack added to the query range so hits landing exactly on the range
/// boundary survive float rounding.
const RANGE_EPSILON: f32 = 1e-3;

/// A piece of collision geometry in the world.
#[derive(Debug, Clone)]
pub struct CollisionBrush {
    /// Unique identifier for this brush.
    pub id: BrushId,
    /// The collision shape.
    pub shape: SharedShape,
    /// Position in world space.
    pub transform: Isometry<Real>,
    /// Content flags (solid, trigger, body).
    pub contents: ContentFlags,
    /// Entity owning this brush, if any. Level geometry has no owner.
    pub owner: Option<EntityId>,
}

/// The collision world containing all geometry.
///
/// Supports axis-aligned boxes for level geometry and Z-aligned capsules for
/// character bodies. Capsules are owned by an entity so that entity can be
/// excluded from its own queries.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    brushes: Vec<CollisionBrush>,
    /// Next brush ID to assign.
    next_id: BrushId,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an axis-aligned box to the world.
    ///
    /// # Arguments
    ///
    /// * `center` - Center position of the box in world space
    /// * `half_extents` - Half-size in each axis (x, y, z)
    /// * `contents` - Content flags for collision filtering
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3, contents: ContentFlags) -> BrushId {
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z);
        self.push(shape, center, contents, None)
    }

    /// Add a vertical capsule owned by `owner`.
    ///
    /// `half_height` is half the total height including the end caps.
    pub fn add_capsule(
        &mut self,
        owner: EntityId,
        center: Vec3,
        half_height: f32,
        radius: f32,
        contents: ContentFlags,
    ) -> BrushId {
        self.push(capsule_shape(half_height, radius), center, contents, Some(owner))
    }

    /// Move a brush. Returns `false` if the brush doesn't exist.
    pub fn set_brush_center(&mut self, id: BrushId, center: Vec3) -> bool {
        match self.brush_mut(id) {
            Some(brush) => {
                brush.transform = translation(center);
                true
            }
            None => false,
        }
    }

    /// Replace a capsule brush's dimensions and position.
    pub fn resize_capsule(&mut self, id: BrushId, center: Vec3, half_height: f32, radius: f32) -> bool {
        match self.brush_mut(id) {
            Some(brush) => {
                brush.shape = capsule_shape(half_height, radius);
                brush.transform = translation(center);
                true
            }
            None => false,
        }
    }

    /// Remove all collision geometry.
    pub fn clear(&mut self) {
        self.brushes.clear();
    }

    /// Get the number of collision brushes.
    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    /// Perform a raycast through the world.
    ///
    /// Returns the nearest hit within `max_distance` (inclusive). Brushes
    /// whose contents don't intersect `mask`, or owned by `ignore`, are
    /// skipped. A zero direction never hits.
    ///
    /// # Arguments
    ///
    /// * `origin` - Ray starting position
    /// * `direction` - Ray direction (will be normalized)
    /// * `max_distance` - Maximum trace distance
    /// * `mask` - Content flags to collide with
    /// * `ignore` - Entity whose brushes are excluded
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: ContentFlags,
        ignore: Option<EntityId>,
    ) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO || max_distance < 0.0 {
            return None;
        }

        let ray = Ray::new(
            Point::new(origin.x, origin.y, origin.z),
            Vector::new(dir.x, dir.y, dir.z),
        );
        let limit = max_distance + RANGE_EPSILON;

        let mut closest: Option<(f32, &CollisionBrush)> = None;

        for brush in &self.brushes {
            if !mask.intersects(brush.contents) {
                continue;
            }
            if ignore.is_some() && brush.owner == ignore {
                continue;
            }

            if let Some(toi) = brush.shape.cast_ray(&brush.transform, &ray, limit, true) {
                let is_closer = closest.map_or(true, |(dist, _)| toi < dist);
                if is_closer {
                    closest = Some((toi, brush));
                }
            }
        }

        closest.map(|(distance, brush)| {
            let distance = distance.min(max_distance);
            RayHit {
                point: origin + dir * distance,
                normal: hit_normal(&ray, distance, brush),
                distance,
                brush: brush.id,
                contents: brush.contents,
            }
        })
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    fn push(
        &mut self,
        shape: SharedShape,
        center: Vec3,
        contents: ContentFlags,
        owner: Option<EntityId>,
    ) -> BrushId {
        let id = self.next_id;
        self.next_id += 1;

        self.brushes.push(CollisionBrush {
            id,
            shape,
            transform: translation(center),
            contents,
            owner,
        });

        id
    }

    fn brush_mut(&mut self, id: BrushId) -> Option<&mut CollisionBrush> {
        self.brushes.iter_mut().find(|brush| brush.id == id)
    }
}

impl WorldQuery for CollisionWorld {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        ignore: EntityId,
    ) -> Option<Vec3> {
        CollisionWorld::raycast(
            self,
            origin,
            direction,
            max_distance,
            ContentFlags::MASK_VISIBILITY,
            Some(ignore),
        )
        .map(|hit| hit.point)
    }
}

fn translation(center: Vec3) -> Isometry<Real> {
    Isometry::translation(center.x, center.y, center.z)
}

fn capsule_shape(half_height: f32, radius: f32) -> SharedShape {
    // Parry measures the capsule by its inner segment
    let segment_half = (half_height - radius).max(0.0);
    SharedShape::capsule_z(segment_half, radius)
}

/// Surface normal at `toi` along the ray.
fn hit_normal(ray: &Ray, toi: f32, brush: &CollisionBrush) -> Vec3 {
    brush
        .shape
        .cast_ray_and_get_normal(&brush.transform, ray, toi + 0.01, true)
        .map(|intersection| {
            Vec3::new(intersection.normal.x, intersection.normal.y, intersection.normal.z)
        })
        .unwrap_or(Vec3::ZERO)
}

// ============================================================================
// Tests
// ============================================================================
