//! Loading scene descriptions from JSON files.

use std::path::Path;

use thiserror::Error;

use crate::description::SceneDescription;

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No objects found in scene file")]
    Empty,

    #[error("Objects {objects:?} reference materials that do not exist")]
    DanglingMaterials { objects: Vec<usize> },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene description from a JSON file.
///
/// When the file does not name the scene, the file stem is used.
///
/// # Example
///
/// ```ignore
/// use whit_scene::load_scene;
///
/// let scene = load_scene("scenes/glass.json")?;
/// println!("Loaded {} objects", scene.object_count());
/// ```
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let mut scene = load_scene_from_str(&text)?;

    if scene.name.is_empty() {
        scene.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string();
    }

    log::info!(
        "Loaded scene '{}' from {}: {} materials, {} objects",
        scene.name,
        path.display(),
        scene.material_count(),
        scene.object_count()
    );

    Ok(scene)
}

/// Parse a scene description from a JSON string.
///
/// Every shape must reference an entry of the material table.
pub fn load_scene_from_str(json: &str) -> LoadResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(json)?;
    if scene.objects.is_empty() {
        return Err(LoadError::Empty);
    }

    let dangling = scene.dangling_materials();
    if !dangling.is_empty() {
        return Err(LoadError::DanglingMaterials { objects: dangling });
    }

    Ok(scene)
}
