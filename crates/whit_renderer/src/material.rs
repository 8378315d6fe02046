//! Material trait for surface scattering.

use crate::sampling::{random_in_unit_sphere, random_unit_vector};
use crate::{HitRecord, Ray};
use rand::RngCore;
use whit_math::{Color, Vec3};

/// Handle to a material stored in a [`Scene`](crate::Scene)'s material arena.
///
/// Geometry stores the handle, never the material itself, so any number of
/// objects can share one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(usize);

impl MaterialId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the material arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Outcome of a material interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Color factor applied to whatever the path sees next
    pub attenuation: Color,
    /// Continuation ray, or `None` when the path stops at this surface
    pub scattered: Option<Ray>,
}

impl ScatterResult {
    /// The path continues along `scattered`.
    pub fn scattered(attenuation: Color, scattered: Ray) -> Self {
        Self {
            attenuation,
            scattered: Some(scattered),
        }
    }

    /// The path stops here; `attenuation` is the final color.
    pub fn absorbed(attenuation: Color) -> Self {
        Self {
            attenuation,
            scattered: None,
        }
    }

    /// Whether the integrator should keep tracing.
    pub fn continues(&self) -> bool {
        self.scattered.is_some()
    }
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray at the hit described by `rec`.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult;
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }
}

/// Offset the normal by a random unit vector, falling back to the normal
/// itself when the two nearly cancel out.
#[inline]
fn diffuse_direction(normal: Vec3, offset: Vec3) -> Vec3 {
    let direction = normal + offset;
    if near_zero(direction) {
        normal
    } else {
        direction
    }
}

impl Material for Lambertian {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        let direction = diffuse_direction(rec.normal, random_unit_vector(rng));
        ScatterResult::scattered(self.albedo, Ray::new(rec.p, direction))
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        if !(0.0..=1.0).contains(&fuzz) {
            log::warn!("Metal fuzz {} outside [0, 1], clamping", fuzz);
        }
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let direction = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Fuzz can push the reflection below the surface; such rays are absorbed
        if direction.dot(rec.normal) > 0.0 {
            ScatterResult::scattered(self.albedo, Ray::new(rec.p, direction))
        } else {
            ScatterResult::absorbed(self.albedo)
        }
    }
}

/// Dielectric (glass) material.
///
/// Chooses deterministically between reflection and refraction: rays
/// reflect only under total internal reflection.
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    pub fn ior(&self) -> f32 {
        self.ior
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, _rng: &mut dyn RngCore) -> ScatterResult {
        let refraction_ratio = if rec.front_face {
            1.0 / self.ior
        } else {
            self.ior
        };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        ScatterResult::scattered(Color::ONE, Ray::new(rec.p, direction))
    }
}

/// Parameters of the Phong illumination model.
#[derive(Debug, Clone, PartialEq)]
pub struct PhongParams {
    pub diffuse: Color,
    pub specular: Color,
    pub ambient: Color,
    pub light_pos: Vec3,
    pub view_pos: Vec3,
    /// Diffuse weight
    pub kd: f32,
    /// Specular weight
    pub ks: f32,
    /// Ambient weight
    pub ka: f32,
    pub shininess: f32,
}

impl Default for PhongParams {
    fn default() -> Self {
        Self {
            diffuse: Color::new(0.0, 0.0, 1.0),
            specular: Color::ONE,
            ambient: Color::splat(0.01),
            light_pos: Vec3::new(5.0, 5.0, 0.0),
            view_pos: Vec3::ZERO,
            kd: 0.45,
            ks: 0.45,
            ka: 0.1,
            shininess: 10.0,
        }
    }
}

/// Local Phong shading with a single point light.
///
/// This is not a scatterer: the shaded color is returned as the final
/// attenuation and the path always stops at the surface.
#[derive(Debug, Clone)]
pub struct Phong {
    params: PhongParams,
}

impl Phong {
    pub fn new(params: PhongParams) -> Self {
        Self { params }
    }

    /// Default blue Phong material seen from `view_pos`.
    pub fn with_view(view_pos: Vec3) -> Self {
        Self::new(PhongParams {
            view_pos,
            ..Default::default()
        })
    }

    /// Default Phong material with a custom diffuse color and exponent.
    pub fn with_diffuse(view_pos: Vec3, diffuse: Color, shininess: f32) -> Self {
        Self::new(PhongParams {
            view_pos,
            diffuse,
            shininess,
            ..Default::default()
        })
    }

    pub fn params(&self) -> &PhongParams {
        &self.params
    }

    /// Ambient + diffuse + specular color at point `p` with normal `normal`.
    pub fn shade(&self, p: Vec3, normal: Vec3) -> Color {
        let params = &self.params;
        let n = normal.normalize();

        let ambient = params.ka * params.ambient;

        let light_dir = (params.light_pos - p).normalize();
        let diffuse = params.kd * light_dir.dot(n).max(0.0) * params.diffuse;

        // Mirror direction of the light about the normal
        let view_dir = (params.view_pos - p).normalize();
        let mirrored = reflect(-light_dir, n).normalize();
        let rv = view_dir.dot(mirrored);
        let specular = if rv > 0.0 {
            params.ks * rv.powf(params.shininess) * params.specular
        } else {
            Color::ZERO
        };

        ambient + diffuse + specular
    }
}

impl Material for Phong {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, _rng: &mut dyn RngCore) -> ScatterResult {
        ScatterResult::absorbed(self.shade(rec.p, rec.normal))
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with unit normal `n`.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// True if every component is within 1e-8 of zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    const S: f32 = 1e-8;
    v.x.abs() < S && v.y.abs() < S && v.z.abs() < S
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(p: Vec3, ray: &Ray, outward_normal: Vec3) -> HitRecord {
        let mut rec = HitRecord::new(ray, 1.0, outward_normal, MaterialId::new(0));
        rec.p = p;
        rec
    }

    fn assert_vec_close(a: Vec3, b: Vec3, eps: f32) {
        assert!((a - b).length() < eps, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::splat(1e-9)));
        assert!(!near_zero(Vec3::new(0.0, 1e-3, 0.0)));
    }

    #[test]
    fn test_diffuse_direction_guard() {
        let normal = Vec3::Y;
        assert_eq!(diffuse_direction(normal, -normal), normal);
        assert_eq!(diffuse_direction(normal, Vec3::X), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_lambertian_always_scatters() {
        let material = Lambertian::new(Color::new(0.1, 0.5, 0.9));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let rec = record(Vec3::ZERO, &ray, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..1000 {
            let result = material.scatter(&ray, &rec, &mut rng);
            assert!(result.continues());
            assert_eq!(result.attenuation, material.albedo());

            let scattered = result.scattered.unwrap();
            assert_eq!(scattered.origin(), rec.p);
            assert!(!near_zero(scattered.direction()));
            assert!(scattered.direction().dot(rec.normal) >= 0.0);
        }
    }

    #[test]
    fn test_metal_mirror() {
        let material = Metal::new(Color::new(0.8, 0.6, 0.2), 0.0);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = record(Vec3::ZERO, &ray, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(2);

        let result = material.scatter(&ray, &rec, &mut rng);
        let scattered = result.scattered.unwrap();
        assert_vec_close(
            scattered.direction(),
            Vec3::new(1.0, 1.0, 0.0).normalize(),
            1e-6,
        );
        assert_eq!(result.attenuation, Color::new(0.8, 0.6, 0.2));
    }

    #[test]
    fn test_metal_absorbs_below_surface() {
        let albedo = Color::new(0.5, 0.5, 0.5);
        let material = Metal::new(albedo, 1.0);
        // Grazing incidence: fuzz often pushes the reflection under the surface
        let ray = Ray::new(Vec3::new(-1.0, 0.01, 0.0), Vec3::new(1.0, -0.01, 0.0));
        let rec = record(Vec3::ZERO, &ray, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(3);

        let mut absorbed = 0;
        for _ in 0..500 {
            let result = material.scatter(&ray, &rec, &mut rng);
            assert_eq!(result.attenuation, albedo);
            match result.scattered {
                Some(scattered) => assert!(scattered.direction().dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_metal_fuzz_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).fuzz(), 0.0);
    }

    #[test]
    fn test_dielectric_unit_ior_passes_through() {
        let material = Dielectric::new(1.0);
        let mut rng = StdRng::seed_from_u64(4);

        for direction in [
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.3, -1.0, 0.2),
            Vec3::new(-2.0, -0.5, 1.0),
        ] {
            let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), direction);
            let rec = record(Vec3::ZERO, &ray, Vec3::Y);
            let result = material.scatter(&ray, &rec, &mut rng);

            assert_eq!(result.attenuation, Color::ONE);
            assert_vec_close(
                result.scattered.unwrap().direction(),
                direction.normalize(),
                1e-5,
            );
        }
    }

    #[test]
    fn test_dielectric_bends_towards_normal() {
        let material = Dielectric::new(1.5);
        let mut rng = StdRng::seed_from_u64(5);
        let incoming = Vec3::new(1.0, -1.0, 0.0).normalize();
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), incoming);
        let rec = record(Vec3::ZERO, &ray, Vec3::Y);

        let out = material.scatter(&ray, &rec, &mut rng).scattered.unwrap().direction();
        let sin_in = incoming.x.abs();
        let sin_out = out.normalize().x.abs();

        // Snell: sin_in = 1.5 * sin_out
        assert!(out.y < 0.0);
        assert!((sin_in - 1.5 * sin_out).abs() < 1e-4);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Dielectric::new(1.5);
        let mut rng = StdRng::seed_from_u64(6);
        // Leaving glass at a grazing angle: outward normal +Y, ray travelling +Y
        let incoming = Vec3::new(1.0, 0.2, 0.0).normalize();
        let ray = Ray::new(Vec3::new(-1.0, -0.2, 0.0), incoming);
        let rec = record(Vec3::ZERO, &ray, Vec3::Y);
        assert!(!rec.front_face);

        let result = material.scatter(&ray, &rec, &mut rng);
        assert!(result.continues());
        assert_vec_close(
            result.scattered.unwrap().direction(),
            reflect(incoming, rec.normal),
            1e-6,
        );
    }

    #[test]
    fn test_phong_never_scatters() {
        let material = Phong::with_view(Vec3::new(0.0, 0.0, 6.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 6.0), Vec3::NEG_Z);
        let rec = record(Vec3::ZERO, &ray, Vec3::Z);
        let mut rng = StdRng::seed_from_u64(7);

        let result = material.scatter(&ray, &rec, &mut rng);
        assert!(!result.continues());
        assert_eq!(result.attenuation, material.shade(rec.p, rec.normal));
    }

    #[test]
    fn test_phong_full_highlight() {
        // Light and viewer both straight above the surface point
        let material = Phong::new(PhongParams {
            diffuse: Color::new(1.0, 0.0, 0.0),
            specular: Color::ONE,
            ambient: Color::splat(0.5),
            light_pos: Vec3::new(0.0, 10.0, 0.0),
            view_pos: Vec3::new(0.0, 3.0, 0.0),
            kd: 0.4,
            ks: 0.5,
            ka: 0.1,
            shininess: 7.0,
        });

        let color = material.shade(Vec3::ZERO, Vec3::Y);
        assert_vec_close(color, Color::new(0.05 + 0.4 + 0.5, 0.05 + 0.5, 0.05 + 0.5), 1e-5);
    }

    #[test]
    fn test_phong_specular_rejected_away_from_viewer() {
        // Light from the +X side, viewer on the same side: the mirrored light
        // direction points to -X, away from the viewer
        let material = Phong::new(PhongParams {
            diffuse: Color::ZERO,
            specular: Color::ONE,
            ambient: Color::ZERO,
            light_pos: Vec3::new(5.0, 1.0, 0.0),
            view_pos: Vec3::new(5.0, 1.0, 0.0),
            kd: 0.0,
            ks: 1.0,
            ka: 0.0,
            shininess: 3.0,
        });

        assert_eq!(material.shade(Vec3::ZERO, Vec3::Y), Color::ZERO);
    }

    #[test]
    fn test_phong_defaults() {
        let material = Phong::with_diffuse(Vec3::new(0.0, 0.0, 6.0), Color::X, 8.0);
        let params = material.params();

        assert_eq!(params.diffuse, Color::X);
        assert_eq!(params.shininess, 8.0);
        assert_eq!(params.light_pos, Vec3::new(5.0, 5.0, 0.0));
        assert_eq!(params.ambient, Color::splat(0.01));
        assert_eq!(params.view_pos, Vec3::new(0.0, 0.0, 6.0));
    }
}
