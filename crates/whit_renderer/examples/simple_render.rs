//! Simple ray tracer example.
//!
//! Builds a small scene by hand, one object per material kind, and saves it
//! as a PPM image.

use whit_renderer::{
    render, Camera, Color, Dielectric, Lambertian, Metal, Phong, Plane, RenderConfig, Scene,
    Sphere, Triangle, Vec3,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Whit Ray Tracer - Simple Example");
    println!("================================");

    let config = RenderConfig {
        width: 400,
        height: 225,
        samples_per_pixel: 20,
        max_depth: 10,
        seed: 42,
    };

    let camera_pos = Vec3::new(0.0, 0.5, 3.0);
    let camera = Camera::look_at(
        camera_pos,
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::Y,
        40.0,
        config.aspect_ratio(),
    );

    let mut scene = Scene::new();
    let ground = scene.add_material(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let matte = scene.add_material(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let glass = scene.add_material(Dielectric::new(1.5));
    let gold = scene.add_material(Metal::new(Color::new(0.8, 0.6, 0.2), 0.1));
    let plastic = scene.add_material(Phong::with_diffuse(camera_pos, Color::new(0.9, 0.2, 0.2), 32.0));

    scene.add(Plane::new(Vec3::new(0.0, -0.5, 0.0), Vec3::Y, ground)?)?;
    scene.add(Sphere::new(Vec3::new(0.0, 0.0, -1.2), 0.5, matte)?)?;
    scene.add(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass)?)?;
    scene.add(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, gold)?)?;
    scene.add(Triangle::new(
        Vec3::new(-1.5, -0.5, -2.5),
        Vec3::new(1.5, -0.5, -2.5),
        Vec3::new(0.0, 1.5, -2.5),
        plastic,
    )?)?;

    println!(
        "Rendering {}x{} @ {} spp...",
        config.width, config.height, config.samples_per_pixel
    );

    let start = std::time::Instant::now();
    let image = render(&camera, &scene, &config)?;
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    image.save(filename)?;
    println!("Saved to {}", filename);

    Ok(())
}
