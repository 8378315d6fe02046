//! Infinite plane primitive.

use crate::hittable::{GeometryError, HitRecord, Hittable};
use crate::{MaterialId, Ray};
use whit_math::{Interval, Vec3};

/// Below this magnitude a ray is treated as parallel to the plane,
/// or its origin as lying on it.
const PARALLEL_EPSILON: f32 = 1e-8;

/// An infinite plane through `point` with unit normal `normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    material: MaterialId,
}

impl Plane {
    /// Create a new plane. The normal is normalized and must be non-zero.
    pub fn new(point: Vec3, normal: Vec3, material: MaterialId) -> Result<Self, GeometryError> {
        let normal = normal.try_normalize().ok_or(GeometryError::ZeroNormal)?;
        Ok(Self {
            point,
            normal,
            material,
        })
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        // t = ((point - origin) . n) / (direction . n)
        let numerator = (self.point - ray.origin()).dot(self.normal);
        let denominator = ray.direction().dot(self.normal);

        let t = if denominator.abs() < PARALLEL_EPSILON {
            // Parallel: only a ray lying in the plane touches it, at t = 0
            if numerator.abs() < PARALLEL_EPSILON {
                0.0
            } else {
                return None;
            }
        } else {
            numerator / denominator
        };

        if t < 0.0 || !ray_t.contains(t) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.normal, self.material))
    }

    fn material_id(&self) -> Option<MaterialId> {
        Some(self.material)
    }
}
