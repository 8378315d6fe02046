//! Built-in scenes.

use crate::description::{
    CameraDesc, MaterialDesc, PhongDesc, SceneDescription, ShapeDesc, Vec3Desc,
};

/// Names accepted by [`by_name`].
pub const PRESET_NAMES: &[&str] = &["solar-system", "single-sphere"];

/// Look up a built-in scene by name.
pub fn by_name(name: &str) -> Option<SceneDescription> {
    match name {
        "solar-system" => Some(solar_system()),
        "single-sphere" => Some(single_sphere()),
        _ => None,
    }
}

fn rgb8(r: f32, g: f32, b: f32) -> Vec3Desc {
    [r / 255.0, g / 255.0, b / 255.0]
}

/// The sun and planets lined up in front of a black Phong backdrop.
///
/// Every material kind appears at least once, which makes this the
/// default demo render.
pub fn solar_system() -> SceneDescription {
    let camera_pos = [0.0, 0.0, 6.0];
    let mut scene = SceneDescription::new("solar-system").with_camera(CameraDesc::Viewport {
        position: camera_pos,
        viewport_height: 2.0,
        focal_length: 4.0,
    });

    let phong = |diffuse: Vec3Desc, shininess: f32| {
        MaterialDesc::Phong(PhongDesc {
            view_pos: Some(camera_pos),
            ..PhongDesc::with_diffuse(diffuse, shininess)
        })
    };

    let backdrop = scene.add_material(phong([0.0, 0.0, 0.0], 100.0));
    let sun = scene.add_material(MaterialDesc::Lambertian {
        albedo: [0.8, 0.0, 0.0],
    });
    let mercury = scene.add_material(MaterialDesc::Lambertian {
        albedo: rgb8(63.0, 61.0, 63.0),
    });
    let venus = scene.add_material(MaterialDesc::Lambertian {
        albedo: rgb8(131.0, 75.0, 22.0),
    });
    let earth = scene.add_material(phong(rgb8(30.0, 50.0, 255.0), 10.0));
    let glass = scene.add_material(MaterialDesc::Dielectric { ior: 1.5 });
    let mars = scene.add_material(MaterialDesc::Metal {
        albedo: rgb8(120.0, 79.0, 59.0),
        fuzz: 0.9,
    });
    let jupiter = scene.add_material(phong(rgb8(255.0, 100.0, 50.0), 8.0));
    let saturn = scene.add_material(phong(rgb8(246.0, 200.0, 116.0), 10.0));
    let uranus = scene.add_material(MaterialDesc::Lambertian {
        albedo: rgb8(209.0, 238.0, 241.0),
    });

    scene.add_object(ShapeDesc::Plane {
        point: [0.0, 0.0, -100.0],
        normal: [0.0, 0.0, 1.0],
        material: backdrop,
    });

    let bodies: [(Vec3Desc, f32, usize); 9] = [
        ([-5.5, 0.0, -1.0], 3.0, sun),
        ([-2.1, 0.0, -1.0], 0.14, mercury),
        ([-1.7, 0.0, -1.0], 0.2, venus),
        ([-1.2, 0.0, -1.0], 0.25, earth),
        ([-0.9, 0.2, -1.0], 0.1, glass),
        ([-0.65, 0.0, -1.0], 0.14, mars),
        ([0.3, 0.0, -1.0], 0.65, jupiter),
        ([1.7, 0.0, -1.0], 0.55, saturn),
        ([2.8, 0.0, -1.0], 0.35, uranus),
    ];
    for (center, radius, material) in bodies {
        scene.add_object(ShapeDesc::Sphere {
            center,
            radius,
            material,
        });
    }

    scene
}

/// One diffuse sphere straight ahead of a camera at the origin.
pub fn single_sphere() -> SceneDescription {
    let mut scene = SceneDescription::new("single-sphere").with_camera(CameraDesc::default());
    let matte = scene.add_material(MaterialDesc::Lambertian {
        albedo: [0.5, 0.5, 0.5],
    });
    scene.add_object(ShapeDesc::Sphere {
        center: [0.0, 0.0, -1.0],
        radius: 0.5,
        material: matte,
    });
    scene
}
