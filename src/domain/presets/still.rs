use crate::domain::SceneParameters;

pub const PRESET_ID: &str = "still";

// No deformation, no spin, a single box.
pub fn build() -> SceneParameters {
    SceneParameters {
        sphere_size: 1.5,
        deformation: 0.0,
        rotation_speed_auto: 0.0,
        complexity_level: 1,
        smoothness: 0.5,
        texture_intensity: 0.0,
    }
}
