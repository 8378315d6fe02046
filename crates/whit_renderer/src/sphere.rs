//! Sphere primitive for ray tracing.

use crate::hittable::{GeometryError, HitRecord, Hittable};
use crate::{MaterialId, Ray};
use whit_math::{Interval, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: MaterialId,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive and finite.
    pub fn new(center: Vec3, radius: f32, material: MaterialId) -> Result<Self, GeometryError> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(GeometryError::InvalidRadius(radius));
        }

        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Intersect using the quadratic formula.
    ///
    /// Kept alongside the geometric method in [`Hittable::hit`]; both give
    /// the same answer and this one is handy for checking the other.
    pub fn hit_analytic(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.contains(root) {
            root = (h + sqrtd) / a;
            if !ray_t.contains(root) {
                return None;
            }
        }

        Some(self.record(ray, root))
    }

    fn record(&self, ray: &Ray, t: f32) -> HitRecord {
        let p = ray.at(t);
        let outward_normal = (p - self.center) / self.radius;
        HitRecord::new(ray, t, outward_normal, self.material)
    }
}

impl Hittable for Sphere {
    /// Geometric intersection.
    ///
    /// Projects the origin-to-center vector onto the ray to find the closest
    /// approach, then steps back along the ray by the half-chord length.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let dir_len = ray.direction().length();
        if dir_len == 0.0 {
            return None;
        }

        let l = self.center - ray.origin();
        let s = l.dot(ray.direction()) / dir_len;
        let l_sqr = l.length_squared();
        let r_sqr = self.radius * self.radius;
        let outside = l_sqr > r_sqr;

        // Outside and heading away
        if s < 0.0 && outside {
            return None;
        }

        // Closest approach misses the sphere
        let m_sqr = l_sqr - s * s;
        if m_sqr > r_sqr {
            return None;
        }

        let q = (r_sqr - m_sqr).sqrt();
        let near = (s - q) / dir_len;
        let far = (s + q) / dir_len;

        // From inside only the far root lies ahead of the origin
        let root = if outside && ray_t.contains(near) {
            near
        } else if ray_t.contains(far) {
            far
        } else {
            return None;
        };

        Some(self.record(ray, root))
    }

    fn material_id(&self) -> Option<MaterialId> {
        Some(self.material)
    }
}
