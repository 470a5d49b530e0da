use std::collections::HashMap;
use std::io;
use std::time::Instant;

use image::RgbImage;
use log::{debug, info, warn};

use shaderfolio::config::{
    read_job, validate_config, EnvOptions, IncomingConfig, RenderFrameConfig, RenderMode,
    SequenceConfig,
};
use shaderfolio::cpu::render_cpu;
use shaderfolio::domain::{AudioEnvelope, CameraState, SceneParameters};
use shaderfolio::render::{FrameInputs, RenderSettings, SurfaceTexture};
use shaderfolio::sequence::SequencePlayer;

#[cfg(feature = "gpu")]
use shaderfolio::gpu::GpuRenderer;

struct PreparedFrame {
    settings: RenderSettings,
    mode: RenderMode,
    time: f32,
    camera: CameraState,
    parameters: SceneParameters,
    audio: AudioEnvelope,
    fallback_audio: bool,
    texture_path: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let incoming = read_job(io::stdin().lock())?;
    let env = EnvOptions::from_env();
    debug!("post effects: {}", env.post_effects);

    let mut output = FrameOutput::default();
    match incoming {
        IncomingConfig::Single(frame) => render_frames(vec![frame], env, &mut output)?,
        IncomingConfig::Batch(batch) => render_frames(batch.frames, env, &mut output)?,
        IncomingConfig::Sequence(job) => render_sequence(&job.sequence, env, &mut output)?,
    }

    output.backends.release();
    Ok(())
}

fn render_frames(
    frames: Vec<RenderFrameConfig>,
    env: EnvOptions,
    output: &mut FrameOutput,
) -> Result<(), Box<dyn std::error::Error>> {
    if frames.is_empty() {
        return Err("frames array must not be empty".into());
    }

    let mut prepared = Vec::with_capacity(frames.len());
    for frame in frames {
        validate_config(&frame)?;
        let parameters = frame.look.scene_parameters()?;
        let (audio, fallback_audio) = frame.look.resolve_audio(frame.time);

        prepared.push(PreparedFrame {
            settings: RenderSettings::new(
                frame.width,
                frame.height,
                frame.output_path.clone(),
                &frame.render,
                env,
            ),
            mode: RenderMode::parse(frame.render.renderer_mode.as_deref()),
            time: frame.time,
            camera: frame.camera.to_state(),
            parameters,
            audio,
            fallback_audio,
            texture_path: frame.look.texture_path.clone(),
        });
    }

    let total = prepared.len();
    for (index, frame) in prepared.iter().enumerate() {
        output.render(frame, index, total)?;
    }
    Ok(())
}

fn render_sequence(
    sequence: &SequenceConfig,
    env: EnvOptions,
    output: &mut FrameOutput,
) -> Result<(), Box<dyn std::error::Error>> {
    let player = SequencePlayer::new(sequence)?;
    let parameters = player.parameters();
    let mode = RenderMode::parse(sequence.render.renderer_mode.as_deref());
    let total = sequence.frame_count as usize;

    for step in player {
        let frame = PreparedFrame {
            settings: RenderSettings::new(
                sequence.width,
                sequence.height,
                sequence.output_path(step.index),
                &sequence.render,
                env,
            ),
            mode,
            time: step.time,
            camera: step.camera,
            parameters,
            audio: step.audio,
            fallback_audio: step.fallback_audio,
            texture_path: sequence.look.texture_path.clone(),
        };
        output.render(&frame, step.index as usize, total)?;
    }
    Ok(())
}

#[derive(Default)]
struct FrameOutput {
    textures: HashMap<String, SurfaceTexture>,
    backends: Backends,
    warned_fallback_audio: bool,
}

impl FrameOutput {
    fn render(
        &mut self,
        frame: &PreparedFrame,
        index: usize,
        total: usize,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if frame.fallback_audio && !self.warned_fallback_audio {
            warn!("no audio analyser input; using the fallback envelope");
            self.warned_fallback_audio = true;
        }

        let texture = match frame.texture_path.as_deref() {
            Some(path) if frame.mode == RenderMode::Cpu => {
                if !self.textures.contains_key(path) {
                    let texture = SurfaceTexture::open(path)
                        .map_err(|error| format!("Failed to load texture '{path}': {error}"))?;
                    debug!(
                        "loaded texture {path} ({}x{})",
                        texture.width(),
                        texture.height()
                    );
                    self.textures.insert(path.to_string(), texture);
                }
                self.textures.get(path)
            }
            Some(path) => {
                warn!("texture '{path}' ignored: textures are only supported by the CPU renderer");
                None
            }
            None => None,
        };

        let inputs = FrameInputs {
            time: frame.time,
            camera: frame.camera,
            parameters: frame.parameters,
            audio: frame.audio,
            texture,
        };
        debug!(
            "frame {} settings: {:?}, parameters: {:?}",
            index + 1,
            frame.settings.tuning,
            frame.parameters
        );

        let started = Instant::now();
        let image = self.backends.render(frame.mode, &frame.settings, &inputs)?;
        let elapsed_ms = started.elapsed().as_millis();
        image.save(&frame.settings.output_path)?;

        info!(
            "[{}/{}] Rendered t={:.3}s [{}] in {} ms: {}",
            index + 1,
            total,
            frame.time,
            frame.mode.as_str(),
            elapsed_ms,
            frame.settings.output_path
        );
        Ok(())
    }
}

#[derive(Default)]
struct Backends {
    #[cfg(feature = "gpu")]
    gpu: Option<GpuRenderer>,
}

impl Backends {
    fn render(
        &mut self,
        mode: RenderMode,
        settings: &RenderSettings,
        inputs: &FrameInputs,
    ) -> Result<RgbImage, Box<dyn std::error::Error>> {
        match mode {
            RenderMode::Cpu => Ok(render_cpu(settings, inputs)),
            RenderMode::Gpu => self.render_gpu(settings, inputs),
        }
    }

    #[cfg(feature = "gpu")]
    fn render_gpu(
        &mut self,
        settings: &RenderSettings,
        inputs: &FrameInputs,
    ) -> Result<RgbImage, Box<dyn std::error::Error>> {
        if self.gpu.is_none() {
            let renderer = pollster::block_on(GpuRenderer::new())
                .map_err(|error| format!("GPU initialization failed: {error}"))?;
            self.gpu = Some(renderer);
        }
        let renderer = self
            .gpu
            .as_mut()
            .ok_or("internal error: GPU renderer missing after initialization")?;
        let image = renderer
            .render_frame(settings, inputs)
            .map_err(|error| format!("GPU render failed: {error}"))?;
        Ok(image)
    }

    #[cfg(not(feature = "gpu"))]
    fn render_gpu(
        &mut self,
        _settings: &RenderSettings,
        _inputs: &FrameInputs,
    ) -> Result<RgbImage, Box<dyn std::error::Error>> {
        Err("rendererMode \"gpu\" requires a build with the `gpu` feature".into())
    }

    fn release(self) {
        // Some GPU/driver stacks can crash while tearing down WGPU objects on drop.
        #[cfg(feature = "gpu")]
        std::mem::forget(self.gpu);
    }
}
