//! Whit Renderer - recursive CPU ray tracing.
//!
//! A Whitted-style tracer: rays are cast from a pinhole camera, the nearest
//! surface decides how the ray continues, and colors are multiplied together
//! along the path until it escapes to the sky, stops at a non-scattering
//! material, or runs out of bounces.

mod camera;
mod hittable;
mod material;
mod plane;
mod renderer;
pub mod sampling;
mod scene;
mod sphere;
mod triangle;

pub use camera::Camera;
pub use hittable::{GeometryError, HitRecord, Hittable, HittableList};
pub use material::{
    near_zero, reflect, refract, Dielectric, Lambertian, Material, MaterialId, Metal, Phong,
    PhongParams, ScatterResult,
};
pub use plane::Plane;
pub use renderer::{
    normalize_color, ray_color, render, render_pixel, render_row, sky_gradient, ImageBuffer,
    RenderConfig, RenderError, RenderResult, T_MIN,
};
pub use scene::{BuildError, BuildResult, Scene};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export common math types from whit_math
pub use whit_math::{Color, Interval, Ray, Vec3};
