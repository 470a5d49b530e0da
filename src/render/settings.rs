use crate::config::{EnvOptions, RenderOptionsConfig};
use crate::render::march::{MarchSettings, MAX_MARCH_STEPS, MAX_TRACE_DISTANCE};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderTuning {
    pub march_max_steps: u32,
    pub max_distance: f32,
}

#[derive(Clone, Debug)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    pub output_path: String,
    pub post_effects: bool,
    pub tuning: RenderTuning,
}

impl RenderSettings {
    pub fn new(
        width: u32,
        height: u32,
        output_path: String,
        options: &RenderOptionsConfig,
        env: EnvOptions,
    ) -> Self {
        Self {
            width,
            height,
            samples_per_pixel: options.samples_per_pixel.max(1) as u32,
            output_path,
            post_effects: env.post_effects,
            tuning: RenderTuning::from_options(options),
        }
    }

    pub fn march(&self, deformation: f32) -> MarchSettings {
        MarchSettings {
            max_steps: self.tuning.march_max_steps,
            max_distance: self.tuning.max_distance,
            ..MarchSettings::adaptive(deformation)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum QualityPreset {
    Preview,
    Balanced,
    Final,
}

impl RenderTuning {
    fn from_options(options: &RenderOptionsConfig) -> Self {
        let preset = parse_quality(options.quality.as_deref().unwrap_or_default());
        let mut tuning = match preset {
            QualityPreset::Preview => Self {
                march_max_steps: 90,
                max_distance: 60.0,
            },
            QualityPreset::Balanced => Self {
                march_max_steps: MAX_MARCH_STEPS,
                max_distance: MAX_TRACE_DISTANCE,
            },
            QualityPreset::Final => Self {
                march_max_steps: 240,
                max_distance: MAX_TRACE_DISTANCE,
            },
        };

        if let Some(march_max_steps) = options.march_max_steps {
            tuning.march_max_steps = march_max_steps.max(1) as u32;
        }

        tuning
    }
}

fn parse_quality(value: &str) -> QualityPreset {
    if value.eq_ignore_ascii_case("preview") {
        return QualityPreset::Preview;
    }
    if value.eq_ignore_ascii_case("final") {
        return QualityPreset::Final;
    }
    QualityPreset::Balanced
}
