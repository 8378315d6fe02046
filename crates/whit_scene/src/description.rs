//! Scene description types for whit.
//!
//! These types describe a scene without committing to a renderer: vectors
//! are plain `[f32; 3]` arrays and shapes refer to materials by their index
//! in [`SceneDescription::materials`]. They round-trip through serde so that
//! scenes can be written by hand as JSON.

use serde::{Deserialize, Serialize};

/// A 3-component vector or RGB color as stored in scene files.
pub type Vec3Desc = [f32; 3];

/// How the camera is placed in the scene.
///
/// The aspect ratio is not part of the description; it is taken from the
/// output image size at render time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CameraDesc {
    /// Axis-aligned camera looking down -Z at a viewport `focal_length` away.
    Viewport {
        position: Vec3Desc,
        viewport_height: f32,
        focal_length: f32,
    },
    /// Camera oriented by a target point and an up vector.
    LookAt {
        look_from: Vec3Desc,
        look_at: Vec3Desc,
        #[serde(default = "default_vup")]
        vup: Vec3Desc,
        /// Vertical field of view in degrees
        vfov: f32,
    },
}

impl CameraDesc {
    /// Position of the eye point.
    pub fn position(&self) -> Vec3Desc {
        match self {
            CameraDesc::Viewport { position, .. } => *position,
            CameraDesc::LookAt { look_from, .. } => *look_from,
        }
    }
}

impl Default for CameraDesc {
    fn default() -> Self {
        CameraDesc::Viewport {
            position: [0.0, 0.0, 0.0],
            viewport_height: 2.0,
            focal_length: 1.0,
        }
    }
}

fn default_vup() -> Vec3Desc {
    [0.0, 1.0, 0.0]
}

/// A surface material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    /// Diffuse surface.
    Lambertian { albedo: Vec3Desc },
    /// Reflective surface; `fuzz` in [0, 1] roughens the reflection.
    Metal {
        albedo: Vec3Desc,
        #[serde(default)]
        fuzz: f32,
    },
    /// Refractive surface such as glass (ior 1.5) or water (ior 1.33).
    Dielectric { ior: f32 },
    /// Local Phong illumination. Ends the path at the surface.
    Phong(PhongDesc),
}

/// Parameters of a Phong material.
///
/// Everything except `diffuse` may be omitted in a scene file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhongDesc {
    pub diffuse: Vec3Desc,
    pub specular: Vec3Desc,
    pub ambient: Vec3Desc,
    pub light_pos: Vec3Desc,
    /// Viewer position; `None` means "use the camera position"
    pub view_pos: Option<Vec3Desc>,
    pub kd: f32,
    pub ks: f32,
    pub ka: f32,
    pub shininess: f32,
}

impl Default for PhongDesc {
    fn default() -> Self {
        Self {
            diffuse: [0.0, 0.0, 1.0],
            specular: [1.0, 1.0, 1.0],
            ambient: [0.01, 0.01, 0.01],
            light_pos: [5.0, 5.0, 0.0],
            view_pos: None,
            kd: 0.45,
            ks: 0.45,
            ka: 0.1,
            shininess: 10.0,
        }
    }
}

impl PhongDesc {
    /// Default Phong parameters with the given diffuse color and exponent.
    pub fn with_diffuse(diffuse: Vec3Desc, shininess: f32) -> Self {
        Self {
            diffuse,
            shininess,
            ..Default::default()
        }
    }
}

/// A geometric primitive. `material` indexes [`SceneDescription::materials`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDesc {
    Sphere {
        center: Vec3Desc,
        radius: f32,
        material: usize,
    },
    Plane {
        point: Vec3Desc,
        normal: Vec3Desc,
        material: usize,
    },
    Triangle {
        vertices: [Vec3Desc; 3],
        material: usize,
    },
}

impl ShapeDesc {
    /// Index of the material this shape uses.
    pub fn material(&self) -> usize {
        match self {
            ShapeDesc::Sphere { material, .. }
            | ShapeDesc::Plane { material, .. }
            | ShapeDesc::Triangle { material, .. } => *material,
        }
    }
}

/// A complete scene: one camera, a material table and the shapes using it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Scene name (usually from filename)
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub camera: CameraDesc,

    /// Materials shared by the shapes
    pub materials: Vec<MaterialDesc>,

    /// Shapes in the scene
    pub objects: Vec<ShapeDesc>,
}

impl SceneDescription {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the camera.
    pub fn with_camera(mut self, camera: CameraDesc) -> Self {
        self.camera = camera;
        self
    }

    /// Add a material and return its index.
    pub fn add_material(&mut self, material: MaterialDesc) -> usize {
        let id = self.materials.len();
        self.materials.push(material);
        id
    }

    /// Add a shape.
    pub fn add_object(&mut self, shape: ShapeDesc) {
        self.objects.push(shape);
    }

    /// Get material count.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Get object count.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Indices of shapes whose material index is out of range.
    pub fn dangling_materials(&self) -> Vec<usize> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, shape)| shape.material() >= self.materials.len())
            .map(|(i, _)| i)
            .collect()
    }
}
