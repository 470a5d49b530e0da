use crate::domain::SceneParameters;

pub const PRESET_ID: &str = "panel_defaults";

pub fn build() -> SceneParameters {
    SceneParameters {
        sphere_size: 1.5,
        deformation: 0.3,
        rotation_speed_auto: 0.3,
        complexity_level: 4,
        smoothness: 0.5,
        texture_intensity: 0.0,
    }
}
