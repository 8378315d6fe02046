//! Camera for ray generation.

use crate::Ray;
use whit_math::Vec3;
use whit_scene::CameraDesc;

/// Pinhole camera mapping image-plane coordinates to world-space rays.
///
/// The viewport is a rectangle `horizontal` wide and `vertical` tall whose
/// lower-left corner sits at `lower_left_corner`. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Camera at `position` looking down -Z.
    ///
    /// - `viewport_height`: height of the viewport in world units
    /// - `aspect_ratio`: viewport width / height
    /// - `focal_length`: distance from the camera to the viewport
    pub fn new(position: Vec3, viewport_height: f32, aspect_ratio: f32, focal_length: f32) -> Self {
        let viewport_width = viewport_height * aspect_ratio;
        let horizontal = Vec3::new(viewport_width, 0.0, 0.0);
        let vertical = Vec3::new(0.0, viewport_height, 0.0);
        let lower_left_corner =
            position - horizontal / 2.0 - vertical / 2.0 - Vec3::new(0.0, 0.0, focal_length);

        Self {
            origin: position,
            lower_left_corner,
            horizontal,
            vertical,
        }
    }

    /// Camera at `look_from` aimed at `look_at`.
    ///
    /// `vfov` is the vertical field of view in degrees; the viewport sits
    /// one unit in front of the camera.
    pub fn look_at(look_from: Vec3, look_at: Vec3, vup: Vec3, vfov: f32, aspect_ratio: f32) -> Self {
        let h = (vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        // Camera basis vectors
        let w = (look_from - look_at).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        let horizontal = viewport_width * u;
        let vertical = viewport_height * v;
        let lower_left_corner = look_from - horizontal / 2.0 - vertical / 2.0 - w;

        Self {
            origin: look_from,
            lower_left_corner,
            horizontal,
            vertical,
        }
    }

    /// Build a camera from a scene description.
    pub fn from_desc(desc: &CameraDesc, aspect_ratio: f32) -> Self {
        match *desc {
            CameraDesc::Viewport {
                position,
                viewport_height,
                focal_length,
            } => Self::new(
                Vec3::from_array(position),
                viewport_height,
                aspect_ratio,
                focal_length,
            ),
            CameraDesc::LookAt {
                look_from,
                look_at,
                vup,
                vfov,
            } => Self::look_at(
                Vec3::from_array(look_from),
                Vec3::from_array(look_at),
                Vec3::from_array(vup),
                vfov,
                aspect_ratio,
            ),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.origin
    }

    /// Ray through viewport coordinates `(u, v)` in [0, 1] x [0, 1].
    ///
    /// `(0, 0)` is the lower-left corner; `v` grows upwards.
    pub fn get_ray(&self, u: f32, v: f32) -> Ray {
        let target = self.lower_left_corner + u * self.horizontal + v * self.vertical;
        Ray::new(self.origin, target - self.origin)
    }
}
