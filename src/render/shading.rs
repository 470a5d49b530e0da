use crate::math::{reflect, Vec3};
use crate::sdf::DistanceField;

pub const LIGHT_POSITION: Vec3 = Vec3::new(5.0, 3.0, -2.0);
pub const AMBIENT: f32 = 0.1;
pub const SHADOWED: f32 = 0.3;

const SPECULAR_POWER: f32 = 32.0;
const SPECULAR_WEIGHT: f32 = 0.5;
const SHADOW_OFFSET: f32 = 0.1;
const SHADOW_STEPS: u32 = 10;
const SHADOW_HIT_THRESHOLD: f32 = 0.001;
const SHADOW_ESCAPE_DISTANCE: f32 = 15.0;

const BACKGROUND_LEVEL: f32 = 0.02;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    pub diffuse: f32,
    pub specular: f32,
    pub shadow: f32,
}

impl Lighting {
    pub fn intensity(&self) -> f32 {
        AMBIENT + (self.diffuse * self.shadow) + (self.specular * SPECULAR_WEIGHT)
    }

    pub fn color(&self) -> Vec3 {
        Vec3::splat(self.intensity())
    }
}

pub fn light_surface<F>(field: &F, p: Vec3, view_dir: Vec3, normal: Vec3) -> Lighting
where
    F: DistanceField + ?Sized,
{
    let light_dir = (LIGHT_POSITION - p).normalize();
    let diffuse = normal.dot(light_dir).max(0.0);
    let reflected = reflect(-light_dir, normal);
    let specular = view_dir.dot(reflected).max(0.0).powf(SPECULAR_POWER);
    let shadow = shadow_factor(field, p, normal, light_dir);

    Lighting {
        diffuse,
        specular,
        shadow,
    }
}

// Binary: any occluder dims direct light to SHADOWED.
pub fn shadow_factor<F>(field: &F, p: Vec3, normal: Vec3, light_dir: Vec3) -> f32
where
    F: DistanceField + ?Sized,
{
    let mut sample = p + (normal * SHADOW_OFFSET);
    for _ in 0..SHADOW_STEPS {
        let distance = field.distance(sample);
        if distance < SHADOW_HIT_THRESHOLD {
            return SHADOWED;
        }
        sample += light_dir * distance;
        if (sample - p).length() > SHADOW_ESCAPE_DISTANCE {
            break;
        }
    }
    1.0
}

pub fn background_color(direction: Vec3, time: f32) -> Vec3 {
    let pattern = ((direction.y * 20.0) + time).sin() * 0.1 + 0.9;
    Vec3::splat(BACKGROUND_LEVEL * pattern)
}
