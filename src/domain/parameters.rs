use serde::Deserialize;

use crate::error::{Error, Result};

pub const MAX_BOX_COUNT: u32 = 8;
pub const MIN_COMPLEXITY: u32 = 1;
pub const MAX_COMPLEXITY: u32 = 10;
pub const MAX_DEFORMATION: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneParameters {
    pub sphere_size: f32,
    pub deformation: f32,
    pub rotation_speed_auto: f32,
    pub complexity_level: u32,
    pub smoothness: f32,
    pub texture_intensity: f32,
}

impl Default for SceneParameters {
    fn default() -> Self {
        Self {
            sphere_size: 1.2,
            deformation: 0.1,
            rotation_speed_auto: 0.3,
            complexity_level: 3,
            smoothness: 0.5,
            texture_intensity: 0.0,
        }
    }
}

impl SceneParameters {
    pub fn validate(&self) -> Result<()> {
        if !self.sphere_size.is_finite() || self.sphere_size <= 0.0 {
            return Err(Error::configuration(
                "sphereSize",
                format!("must be finite and > 0, got {}", self.sphere_size),
            ));
        }
        if !self.deformation.is_finite() || !(0.0..=MAX_DEFORMATION).contains(&self.deformation) {
            return Err(Error::configuration(
                "deformation",
                format!(
                    "must be within [0, {MAX_DEFORMATION}], got {}",
                    self.deformation
                ),
            ));
        }
        if !self.rotation_speed_auto.is_finite() {
            return Err(Error::configuration(
                "rotationSpeedAuto",
                format!("must be finite, got {}", self.rotation_speed_auto),
            ));
        }
        if !(MIN_COMPLEXITY..=MAX_COMPLEXITY).contains(&self.complexity_level) {
            return Err(Error::configuration(
                "complexityLevel",
                format!(
                    "must be within [{MIN_COMPLEXITY}, {MAX_COMPLEXITY}], got {}",
                    self.complexity_level
                ),
            ));
        }
        if !self.smoothness.is_finite() || self.smoothness < 0.0 {
            return Err(Error::configuration(
                "smoothness",
                format!("must be finite and >= 0, got {}", self.smoothness),
            ));
        }
        if !self.texture_intensity.is_finite() || !(0.0..=1.0).contains(&self.texture_intensity) {
            return Err(Error::configuration(
                "textureIntensity",
                format!("must be within [0, 1], got {}", self.texture_intensity),
            ));
        }
        Ok(())
    }

    pub fn box_count(&self) -> u32 {
        self.complexity_level.clamp(1, MAX_BOX_COUNT)
    }

    pub fn blend_bandwidth(&self) -> f32 {
        self.smoothness + (self.deformation * 0.5)
    }
}
