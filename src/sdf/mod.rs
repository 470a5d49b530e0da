pub mod blend;
pub mod primitives;

pub use blend::smooth_union;
pub use primitives::{sd_box, sd_capsule, sd_sphere, sd_torus};

use crate::math::Vec3;

pub trait DistanceField {
    fn distance(&self, p: Vec3) -> f32;
}

#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    pub radius: f32,
}

impl DistanceField for Sphere {
    fn distance(&self, p: Vec3) -> f32 {
        sd_sphere(p, self.radius)
    }
}
