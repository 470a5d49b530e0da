use crate::math::{Ray, Vec3};
use crate::sdf::DistanceField;

pub const BASE_HIT_THRESHOLD: f32 = 0.001;
pub const MAX_MARCH_STEPS: u32 = 150;
pub const MAX_TRACE_DISTANCE: f32 = 100.0;

const NORMAL_EPSILON: f32 = 0.001;
const MIN_NORMAL_EPSILON: f32 = 1e-5;
const MIN_HIT_THRESHOLD: f32 = BASE_HIT_THRESHOLD * 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarchSettings {
    pub max_steps: u32,
    pub max_distance: f32,
    pub hit_threshold: f32,
}

impl Default for MarchSettings {
    fn default() -> Self {
        Self {
            max_steps: MAX_MARCH_STEPS,
            max_distance: MAX_TRACE_DISTANCE,
            hit_threshold: BASE_HIT_THRESHOLD,
        }
    }
}

impl MarchSettings {
    pub fn adaptive(deformation: f32) -> Self {
        Self {
            hit_threshold: adaptive_hit_threshold(deformation),
            ..Self::default()
        }
    }
}

pub fn adaptive_hit_threshold(deformation: f32) -> f32 {
    (BASE_HIT_THRESHOLD * (1.0 - (deformation * 0.5))).max(MIN_HIT_THRESHOLD)
}

pub fn normal_epsilon(deformation: f32) -> f32 {
    (NORMAL_EPSILON * (1.0 - (deformation * 0.3))).max(MIN_NORMAL_EPSILON)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarchHit {
    pub t: f32,
    pub point: Vec3,
    pub steps: u32,
}

// Steps by the raw sampled distance; the step cap is the only guaranteed exit.
pub fn ray_march<F>(field: &F, ray: Ray, settings: MarchSettings) -> Option<MarchHit>
where
    F: DistanceField + ?Sized,
{
    let mut t = 0.0;
    for step in 0..settings.max_steps {
        let point = ray.at(t);
        let distance = field.distance(point);
        if distance.abs() < settings.hit_threshold {
            return Some(MarchHit {
                t,
                point,
                steps: step + 1,
            });
        }

        t += distance;
        if t > settings.max_distance || !t.is_finite() {
            return None;
        }
    }
    None
}

pub fn estimate_normal<F>(field: &F, p: Vec3, deformation: f32) -> Vec3
where
    F: DistanceField + ?Sized,
{
    let e = normal_epsilon(deformation);
    let dx = field.distance(p + Vec3::new(e, 0.0, 0.0)) - field.distance(p - Vec3::new(e, 0.0, 0.0));
    let dy = field.distance(p + Vec3::new(0.0, e, 0.0)) - field.distance(p - Vec3::new(0.0, e, 0.0));
    let dz = field.distance(p + Vec3::new(0.0, 0.0, e)) - field.distance(p - Vec3::new(0.0, 0.0, e));
    Vec3::new(dx, dy, dz).try_normalize().unwrap_or(Vec3::UP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdf::Sphere;

    struct Flat;

    impl DistanceField for Flat {
        fn distance(&self, _p: Vec3) -> f32 {
            1.0
        }
    }

    #[test]
    fn hits_isolated_sphere_through_its_centre() {
        let sphere = Sphere { radius: 1.5 };
        let ray = Ray::new(Vec3::new(0.0, 0.0, -8.0), Vec3::new(0.0, 0.0, 1.0));
        let settings = MarchSettings::adaptive(0.0);
        let hit = ray_march(&sphere, ray, settings).expect("ray through the centre must hit");
        assert!((hit.t - 6.5).abs() <= settings.hit_threshold);
        assert!(hit.steps <= 2);
    }

    #[test]
    fn misses_when_ray_points_away() {
        let sphere = Sphere { radius: 1.5 };
        let ray = Ray::new(Vec3::new(0.0, 0.0, -8.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(ray_march(&sphere, ray, MarchSettings::default()).is_none());
    }

    #[test]
    fn grazing_ray_stops_at_step_cap() {
        // Passes exactly tangent to the sphere; the step budget runs out
        // before the distance ever falls under the threshold.
        let sphere = Sphere { radius: 1.0 };
        let ray = Ray::new(Vec3::new(-5.0, 1.01, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let settings = MarchSettings {
            max_steps: 8,
            ..MarchSettings::default()
        };
        assert!(ray_march(&sphere, ray, settings).is_none());
    }

    #[test]
    fn threshold_shrinks_with_deformation_but_stays_positive() {
        assert_eq!(adaptive_hit_threshold(0.0), BASE_HIT_THRESHOLD);
        assert!(adaptive_hit_threshold(1.0) < BASE_HIT_THRESHOLD);
        assert!(adaptive_hit_threshold(2.0) > 0.0);
        assert!(normal_epsilon(1.0) < normal_epsilon(0.0));
        assert!(normal_epsilon(10.0) > 0.0);
    }

    #[test]
    fn sphere_normal_points_outward() {
        let sphere = Sphere { radius: 1.0 };
        let n = estimate_normal(&sphere, Vec3::new(0.0, 0.0, -1.0), 0.0);
        assert!((n - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-3);
        let diagonal = Vec3::new(1.0, 1.0, 1.0).normalize();
        let n = estimate_normal(&sphere, diagonal, 0.5);
        assert!((n - diagonal).length() < 1e-3);
    }

    #[test]
    fn flat_field_normal_falls_back_to_up() {
        assert_eq!(estimate_normal(&Flat, Vec3::ZERO, 0.0), Vec3::UP);
    }
}
