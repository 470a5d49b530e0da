use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::animation::PointerInput;
use crate::domain::camera::DEFAULT_ZOOM;
use crate::domain::presets::{build_preset, randomized, DEFAULT_PRESET};
use crate::domain::{AudioEnvelope, CameraState, SceneParameters};
use crate::error::{Error, Result};

const TEXTURE_AUTO_INTENSITY: f32 = 0.5;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptionsConfig {
    #[serde(default = "default_samples_per_pixel")]
    pub samples_per_pixel: u16,
    #[serde(default)]
    pub renderer_mode: Option<String>,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub march_max_steps: Option<u16>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookConfig {
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub randomize_seed: Option<u32>,
    #[serde(default)]
    pub parameters: ParameterOverrides,
    #[serde(default)]
    pub audio: Option<AudioInput>,
    #[serde(default)]
    pub texture_path: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterOverrides {
    pub sphere_size: Option<f32>,
    pub deformation: Option<f32>,
    pub rotation_speed_auto: Option<f32>,
    pub complexity_level: Option<u32>,
    pub smoothness: Option<f32>,
    pub texture_intensity: Option<f32>,
}

impl ParameterOverrides {
    pub fn apply(&self, mut params: SceneParameters) -> SceneParameters {
        if let Some(value) = self.sphere_size {
            params.sphere_size = value;
        }
        if let Some(value) = self.deformation {
            params.deformation = value;
        }
        if let Some(value) = self.rotation_speed_auto {
            params.rotation_speed_auto = value;
        }
        if let Some(value) = self.complexity_level {
            params.complexity_level = value;
        }
        if let Some(value) = self.smoothness {
            params.smoothness = value;
        }
        if let Some(value) = self.texture_intensity {
            params.texture_intensity = value;
        }
        params
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum AudioInput {
    Bands(AudioEnvelope),
    Spectrum { spectrum: Vec<u8> },
}

impl AudioInput {
    pub fn envelope(&self) -> Option<AudioEnvelope> {
        match self {
            Self::Bands(envelope) => Some(*envelope),
            Self::Spectrum { spectrum } => AudioEnvelope::from_spectrum(spectrum),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CameraConfig {
    pub zoom: f32,
    pub rotation_x: f32,
    pub rotation_y: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            rotation_x: 0.0,
            rotation_y: 0.0,
        }
    }
}

impl CameraConfig {
    pub fn to_state(self) -> CameraState {
        CameraState::at_rest(self.zoom, self.rotation_x, self.rotation_y)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrameConfig {
    pub width: u32,
    pub height: u32,
    pub output_path: String,
    #[serde(default)]
    pub time: f32,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(flatten)]
    pub render: RenderOptionsConfig,
    #[serde(flatten)]
    pub look: LookConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderBatchConfig {
    pub frames: Vec<RenderFrameConfig>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct TimedInput {
    pub at: f32,
    #[serde(flatten)]
    pub input: PointerInput,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceConfig {
    pub width: u32,
    pub height: u32,
    pub output_pattern: String,
    pub frame_count: u32,
    #[serde(default = "default_fps")]
    pub fps: f32,
    #[serde(default)]
    pub start_time: f32,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub events: Vec<TimedInput>,
    #[serde(flatten)]
    pub render: RenderOptionsConfig,
    #[serde(flatten)]
    pub look: LookConfig,
}

impl SequenceConfig {
    pub fn output_path(&self, frame: u32) -> String {
        self.output_pattern
            .replace("{frame}", &format!("{frame:05}"))
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceJob {
    pub sequence: SequenceConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum IncomingConfig {
    Single(RenderFrameConfig),
    Batch(RenderBatchConfig),
    Sequence(SequenceJob),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Cpu,
    Gpu,
}

impl RenderMode {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(value) if value.trim().eq_ignore_ascii_case("gpu") => Self::Gpu,
            _ => Self::Cpu,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Gpu => "GPU",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnvOptions {
    pub post_effects: bool,
}

impl Default for EnvOptions {
    fn default() -> Self {
        Self { post_effects: true }
    }
}

impl EnvOptions {
    pub fn from_env() -> Self {
        let post_effects = std::env::var("SHADERFOLIO_POST_EFFECTS")
            .ok()
            .and_then(|raw| parse_bool(&raw))
            .unwrap_or(true);

        Self { post_effects }
    }
}

const fn default_samples_per_pixel() -> u16 {
    1
}

const fn default_fps() -> f32 {
    30.0
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn parse_job(raw: &str) -> Result<IncomingConfig> {
    Ok(serde_json::from_str(raw)?)
}

pub fn read_job(mut reader: impl Read) -> Result<IncomingConfig> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    parse_job(&raw)
}

impl LookConfig {
    // Preset, then the seeded shuffle, then explicit overrides.
    pub fn scene_parameters(&self) -> Result<SceneParameters> {
        let preset = self.preset.as_deref().unwrap_or(DEFAULT_PRESET);
        let mut params = build_preset(preset)?;
        if let Some(seed) = self.randomize_seed {
            params = randomized(seed, params);
        }
        let mut params = self.parameters.apply(params);

        // A texture loaded at zero intensity would be invisible.
        if self.texture_path.is_some()
            && self.parameters.texture_intensity.is_none()
            && params.texture_intensity == 0.0
        {
            params.texture_intensity = TEXTURE_AUTO_INTENSITY;
        }

        params.validate()?;
        Ok(params)
    }

    // The flag is true when the fallback oscillator stood in for missing audio.
    pub fn resolve_audio(&self, time: f32) -> (AudioEnvelope, bool) {
        match self.audio.as_ref().and_then(AudioInput::envelope) {
            Some(envelope) => (envelope, false),
            None => (AudioEnvelope::fallback(time), true),
        }
    }
}

pub fn validate_config(config: &RenderFrameConfig) -> Result<()> {
    validate_dimensions(config.width, config.height)?;
    validate_output_path(&config.output_path, "outputPath")?;
    validate_render_options(&config.render)?;
    validate_camera(config.camera)?;
    if !config.time.is_finite() {
        return Err(Error::configuration("time", "must be finite"));
    }
    config.look.scene_parameters()?;
    Ok(())
}

pub fn validate_sequence(config: &SequenceConfig) -> Result<()> {
    validate_dimensions(config.width, config.height)?;
    if !config.output_pattern.contains("{frame}") {
        return Err(Error::configuration(
            "outputPattern",
            "must contain a {frame} placeholder",
        ));
    }
    validate_output_path(&config.output_pattern, "outputPattern")?;
    if config.frame_count == 0 {
        return Err(Error::configuration("frameCount", "must be at least 1"));
    }
    if !config.fps.is_finite() || config.fps <= 0.0 {
        return Err(Error::configuration(
            "fps",
            format!("must be finite and > 0, got {}", config.fps),
        ));
    }
    if !config.start_time.is_finite() {
        return Err(Error::configuration("startTime", "must be finite"));
    }
    if config.events.iter().any(|event| !event.at.is_finite()) {
        return Err(Error::configuration("events", "timestamps must be finite"));
    }
    validate_render_options(&config.render)?;
    validate_camera(config.camera)?;
    config.look.scene_parameters()?;
    Ok(())
}

fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::configuration(
            "width/height",
            "width and height must be positive",
        ));
    }
    Ok(())
}

fn validate_output_path(path: &str, field: &'static str) -> Result<()> {
    let output_parent = Path::new(path)
        .parent()
        .ok_or_else(|| Error::configuration(field, "must include a parent directory"))?;

    // A bare file name has an empty parent, which means the working directory.
    if !output_parent.as_os_str().is_empty() && !output_parent.exists() {
        return Err(Error::configuration(
            field,
            format!("output directory does not exist: {}", output_parent.display()),
        ));
    }
    Ok(())
}

fn validate_render_options(options: &RenderOptionsConfig) -> Result<()> {
    if options.samples_per_pixel == 0 {
        return Err(Error::configuration(
            "samplesPerPixel",
            "must be at least 1",
        ));
    }
    if let Some(mode) = options.renderer_mode.as_deref() {
        let mode = mode.trim();
        if !mode.eq_ignore_ascii_case("cpu") && !mode.eq_ignore_ascii_case("gpu") {
            return Err(Error::configuration(
                "rendererMode",
                format!("expected \"cpu\" or \"gpu\", got \"{mode}\""),
            ));
        }
    }
    Ok(())
}

fn validate_camera(camera: CameraConfig) -> Result<()> {
    if !camera.zoom.is_finite() || !camera.rotation_x.is_finite() || !camera.rotation_y.is_finite()
    {
        return Err(Error::configuration(
            "camera",
            "zoom and rotations must be finite",
        ));
    }
    Ok(())
}
