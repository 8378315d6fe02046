//! Runtime scene: the material arena plus the objects that reference it.

use crate::hittable::{GeometryError, HitRecord, Hittable, HittableList};
use crate::material::{Dielectric, Lambertian, Material, MaterialId, Metal, Phong, PhongParams};
use crate::{Camera, Plane, Ray, Sphere, Triangle};
use thiserror::Error;
use whit_math::{Interval, Vec3};
use whit_scene::{MaterialDesc, SceneDescription, ShapeDesc};

/// Errors that can occur while turning a description into a scene.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Object {object} references material {material}, but only {count} materials exist")]
    UnknownMaterial {
        object: usize,
        material: usize,
        count: usize,
    },

    #[error("Invalid geometry for object {object}: {source}")]
    Geometry {
        object: usize,
        #[source]
        source: GeometryError,
    },
}

/// Result type for scene building.
pub type BuildResult<T> = Result<T, BuildError>;

/// Materials and geometry ready for rendering.
///
/// Membership is fixed once rendering starts: the renderer only ever takes
/// `&Scene`.
#[derive(Default)]
pub struct Scene {
    materials: Vec<Box<dyn Material>>,
    objects: HittableList,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a material and return the handle geometry should use.
    pub fn add_material<M: Material + 'static>(&mut self, material: M) -> MaterialId {
        let id = MaterialId::new(self.materials.len());
        self.materials.push(Box::new(material));
        id
    }

    /// Add an object to the scene.
    ///
    /// Fails if the object's material handle does not belong to this scene.
    pub fn add<H: Hittable + 'static>(&mut self, object: H) -> BuildResult<()> {
        if let Some(id) = object.material_id() {
            if self.get_material(id).is_none() {
                return Err(BuildError::UnknownMaterial {
                    object: self.object_count(),
                    material: id.index(),
                    count: self.material_count(),
                });
            }
        }
        self.objects.add(Box::new(object));
        Ok(())
    }

    /// Look up a material.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not returned by this scene's [`Scene::add_material`].
    pub fn material(&self, id: MaterialId) -> &dyn Material {
        self.materials[id.index()].as_ref()
    }

    /// Look up a material, returning `None` for a foreign handle.
    pub fn get_material(&self, id: MaterialId) -> Option<&dyn Material> {
        self.materials.get(id.index()).map(|m| m.as_ref())
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Build a scene and its camera from a description.
    ///
    /// `aspect_ratio` is the output image's width / height.
    pub fn from_description(desc: &SceneDescription, aspect_ratio: f32) -> BuildResult<(Scene, Camera)> {
        let camera = Camera::from_desc(&desc.camera, aspect_ratio);
        let mut scene = Scene::new();

        let ids: Vec<MaterialId> = desc
            .materials
            .iter()
            .map(|material| scene.add_material_desc(material, camera.position()))
            .collect();

        for (index, shape) in desc.objects.iter().enumerate() {
            let material = *ids.get(shape.material()).ok_or(BuildError::UnknownMaterial {
                object: index,
                material: shape.material(),
                count: ids.len(),
            })?;

            let geometry = |source| BuildError::Geometry {
                object: index,
                source,
            };

            match shape {
                ShapeDesc::Sphere { center, radius, .. } => {
                    let sphere = Sphere::new(Vec3::from_array(*center), *radius, material)
                        .map_err(geometry)?;
                    scene.add(sphere)?;
                }
                ShapeDesc::Plane { point, normal, .. } => {
                    let plane = Plane::new(Vec3::from_array(*point), Vec3::from_array(*normal), material)
                        .map_err(geometry)?;
                    scene.add(plane)?;
                }
                ShapeDesc::Triangle { vertices, .. } => {
                    let [a, b, c] = vertices.map(Vec3::from_array);
                    let triangle = Triangle::new(a, b, c, material).map_err(geometry)?;
                    scene.add(triangle)?;
                }
            }
        }

        log::info!(
            "Built scene '{}': {} materials, {} objects",
            desc.name,
            scene.material_count(),
            scene.object_count()
        );

        Ok((scene, camera))
    }

    fn add_material_desc(&mut self, desc: &MaterialDesc, camera_pos: Vec3) -> MaterialId {
        match desc {
            MaterialDesc::Lambertian { albedo } => {
                self.add_material(Lambertian::new(Vec3::from_array(*albedo)))
            }
            MaterialDesc::Metal { albedo, fuzz } => {
                self.add_material(Metal::new(Vec3::from_array(*albedo), *fuzz))
            }
            MaterialDesc::Dielectric { ior } => self.add_material(Dielectric::new(*ior)),
            MaterialDesc::Phong(phong) => self.add_material(Phong::new(PhongParams {
                diffuse: Vec3::from_array(phong.diffuse),
                specular: Vec3::from_array(phong.specular),
                ambient: Vec3::from_array(phong.ambient),
                light_pos: Vec3::from_array(phong.light_pos),
                view_pos: phong.view_pos.map_or(camera_pos, Vec3::from_array),
                kd: phong.kd,
                ks: phong.ks,
                ka: phong.ka,
                shininess: phong.shininess,
            })),
        }
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.objects.hit(ray, ray_t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whit_scene::{presets, PhongDesc};

    #[test]
    fn test_material_handles_are_sequential() {
        let mut scene = Scene::new();
        let a = scene.add_material(Lambertian::new(Vec3::ONE));
        let b = scene.add_material(Dielectric::new(1.5));

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(scene.material_count(), 2);
        assert!(scene.get_material(MaterialId::new(2)).is_none());
    }

    #[test]
    fn test_shared_material_nearest_hit() {
        let mut scene = Scene::new();
        let matte = scene.add_material(Lambertian::new(Vec3::ONE));
        let glass = scene.add_material(Dielectric::new(1.5));

        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -4.0), 0.5, matte).unwrap()).unwrap();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, glass).unwrap()).unwrap();
        scene.add(Plane::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z, matte).unwrap()).unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = scene.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert_eq!(rec.material, glass);
        assert!((rec.t - 1.5).abs() < 1e-5);
        assert_eq!(scene.object_count(), 3);
    }

    #[test]
    fn test_add_rejects_foreign_material() {
        let mut other = Scene::new();
        other.add_material(Lambertian::new(Vec3::ONE));
        let foreign = other.add_material(Metal::new(Vec3::ONE, 0.0));

        let mut scene = Scene::new();
        scene.add_material(Lambertian::new(Vec3::ONE));
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, foreign).unwrap();

        let err = scene.add(sphere).err().unwrap();
        assert!(matches!(
            err,
            BuildError::UnknownMaterial {
                object: 0,
                material: 1,
                count: 1
            }
        ));
        assert_eq!(scene.object_count(), 0);
    }

    #[test]
    fn test_from_description() {
        let desc = presets::solar_system();
        let (scene, camera) = Scene::from_description(&desc, 16.0 / 9.0).unwrap();

        assert_eq!(scene.material_count(), desc.material_count());
        assert_eq!(scene.object_count(), desc.object_count());
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 6.0));
    }

    #[test]
    fn test_phong_view_defaults_to_camera() {
        let mut desc = SceneDescription::new("phong").with_camera(whit_scene::CameraDesc::Viewport {
            position: [1.0, 2.0, 3.0],
            viewport_height: 2.0,
            focal_length: 1.0,
        });
        let id = desc.add_material(MaterialDesc::Phong(PhongDesc::default()));
        desc.add_object(ShapeDesc::Sphere {
            center: [0.0, 0.0, -1.0],
            radius: 0.5,
            material: id,
        });

        let (scene, _) = Scene::from_description(&desc, 1.0).unwrap();
        let expected = Phong::with_view(Vec3::new(1.0, 2.0, 3.0));
        let rec = HitRecord::new(
            &Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z),
            1.5,
            Vec3::Z,
            MaterialId::new(0),
        );
        let mut rng = rand::rngs::mock::StepRng::new(0, 1);
        let result = scene.material(MaterialId::new(0)).scatter(
            &Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z),
            &rec,
            &mut rng,
        );

        assert_eq!(result.attenuation, expected.shade(rec.p, rec.normal));
    }

    #[test]
    fn test_unknown_material() {
        let mut desc = presets::single_sphere();
        desc.add_object(ShapeDesc::Plane {
            point: [0.0, -1.0, 0.0],
            normal: [0.0, 1.0, 0.0],
            material: 7,
        });

        let err = Scene::from_description(&desc, 1.0).err().unwrap();
        assert!(matches!(
            err,
            BuildError::UnknownMaterial {
                object: 1,
                material: 7,
                count: 1
            }
        ));
    }

    #[test]
    fn test_invalid_geometry_reported() {
        let mut desc = presets::single_sphere();
        desc.add_object(ShapeDesc::Sphere {
            center: [0.0, 0.0, -3.0],
            radius: 0.0,
            material: 0,
        });

        let err = Scene::from_description(&desc, 1.0).err().unwrap();
        assert!(matches!(
            err,
            BuildError::Geometry {
                object: 1,
                source: GeometryError::InvalidRadius(_)
            }
        ));
    }
}
