//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::hittable::{GeometryError, HitRecord, Hittable};
use crate::{MaterialId, Ray};
use whit_math::{Interval, Vec3};

/// Determinants below this are treated as a ray parallel to the triangle.
const DETERMINANT_EPSILON: f32 = 1e-4;

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed face normal (unit length, counter-clockwise winding)
    normal: Vec3,
    material: MaterialId,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// Fails if the vertices are collinear or coincide.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: MaterialId) -> Result<Self, GeometryError> {
        let normal = (v1 - v0)
            .cross(v2 - v0)
            .try_normalize()
            .ok_or(GeometryError::DegenerateTriangle)?;

        Ok(Self {
            v0,
            v1,
            v2,
            normal,
            material,
        })
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Barycentric coordinates `(u, v)` of `p` projected onto the triangle's
    /// plane, weighting `v1` and `v2` respectively.
    pub fn barycentric(&self, p: Vec3) -> (f32, f32) {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        let vp = p - self.v0;

        let d11 = e1.dot(e1);
        let d12 = e1.dot(e2);
        let d22 = e2.dot(e2);
        let dp1 = vp.dot(e1);
        let dp2 = vp.dot(e2);

        let denom = d11 * d22 - d12 * d12;
        let u = (d22 * dp1 - d12 * dp2) / denom;
        let v = (d11 * dp2 - d12 * dp1) / denom;
        (u, v)
    }
}

impl Hittable for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < DETERMINANT_EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);

        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);

        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);

        // Triangle behind the origin or outside the query
        if t < 0.0 || !ray_t.contains(t) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.normal, self.material))
    }

    fn material_id(&self) -> Option<MaterialId> {
        Some(self.material)
    }
}
