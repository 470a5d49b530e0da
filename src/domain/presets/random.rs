use crate::domain::SceneParameters;
use crate::math::random01;

const SPHERE_SIZE_RANGE: (f32, f32) = (0.3, 4.0);
const DEFORMATION_RANGE: (f32, f32) = (0.0, 2.0);
const ROTATION_SPEED_RANGE: (f32, f32) = (0.0, 2.0);
const TEXTURE_INTENSITY_RANGE: (f32, f32) = (0.0, 1.0);
const MAX_RANDOM_COMPLEXITY: u32 = 8;
const DRAWS_PER_SEED: u32 = 5;

// Smoothness has no control-panel slider, so it keeps the base value.
pub fn randomized(seed: u32, base: SceneParameters) -> SceneParameters {
    let draw = |slot: u32| random01(seed.wrapping_mul(DRAWS_PER_SEED).wrapping_add(slot));
    let complexity = 1 + (draw(2) * MAX_RANDOM_COMPLEXITY as f32) as u32;

    SceneParameters {
        sphere_size: lerp(SPHERE_SIZE_RANGE, draw(0)),
        deformation: lerp(DEFORMATION_RANGE, draw(1)),
        complexity_level: complexity.min(MAX_RANDOM_COMPLEXITY),
        rotation_speed_auto: lerp(ROTATION_SPEED_RANGE, draw(3)),
        texture_intensity: lerp(TEXTURE_INTENSITY_RANGE, draw(4)),
        ..base
    }
}

fn lerp((min, max): (f32, f32), t: f32) -> f32 {
    (min + (t * (max - min))).clamp(min, max)
}
