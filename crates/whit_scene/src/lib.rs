//! Whit Scene - renderer-agnostic scene descriptions.
//!
//! This crate provides:
//!
//! - **Description types**: `SceneDescription`, `CameraDesc`, `MaterialDesc`, `ShapeDesc`
//! - **JSON loading**: `load_scene`, `load_scene_from_str`
//! - **Presets**: built-in scenes used by the command line driver and tests
//!
//! # Example
//!
//! ```ignore
//! use whit_scene::{load_scene, presets};
//!
//! let scene = match path {
//!     Some(path) => load_scene(path)?,
//!     None => presets::solar_system(),
//! };
//! ```

pub mod description;
pub mod loader;
pub mod presets;

// Re-export commonly used types
pub use description::{CameraDesc, MaterialDesc, PhongDesc, SceneDescription, ShapeDesc, Vec3Desc};
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
