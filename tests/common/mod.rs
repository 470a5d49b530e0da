#![allow(dead_code)]

use shaderfolio::domain::camera::ZOOM_MIN;
use shaderfolio::domain::presets::build_preset;
use shaderfolio::domain::{AudioEnvelope, CameraState, SceneParameters};
use shaderfolio::render::FrameInputs;

pub fn reference_parameters() -> SceneParameters {
    SceneParameters {
        sphere_size: 1.5,
        deformation: 0.0,
        complexity_level: 1,
        smoothness: 0.5,
        ..build_preset("still").unwrap()
    }
}

pub fn reference_camera() -> CameraState {
    CameraState::at_rest(ZOOM_MIN, 0.0, 0.0)
}

pub fn reference_inputs() -> FrameInputs<'static> {
    FrameInputs {
        time: 0.0,
        camera: reference_camera(),
        parameters: reference_parameters(),
        audio: AudioEnvelope::silent(),
        texture: None,
    }
}
