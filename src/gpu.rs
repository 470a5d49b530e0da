mod shader_source;

use image::{Rgb, RgbImage};

use crate::domain::parameters::MAX_BOX_COUNT;
use crate::error::{Error, Result};
use crate::render::march::normal_epsilon;
use crate::render::{FrameInputs, RenderSettings};

use shader_source::build_gpu_shader_wgsl;

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuParams {
    width: u32,
    height: u32,
    samples_per_pixel: u32,
    max_steps: u32,
    box_count: u32,
    post_effects: u32,
    _padding_u0: u32,
    _padding_u1: u32,
    frame: [f32; 4],
    shape: [f32; 4],
    audio: [f32; 4],
    march: [f32; 4],
}

impl GpuParams {
    fn new(settings: &RenderSettings, inputs: &FrameInputs) -> Self {
        let scene = inputs.scene();
        let (yaw, pitch) = scene.orientation();
        let parameters = &inputs.parameters;
        let march = settings.march(parameters.deformation);

        Self {
            width: settings.width,
            height: settings.height,
            samples_per_pixel: settings.samples_per_pixel.max(1),
            max_steps: march.max_steps,
            box_count: (scene.box_count() as u32).min(MAX_BOX_COUNT),
            post_effects: settings.post_effects as u32,
            _padding_u0: 0,
            _padding_u1: 0,
            frame: [
                inputs.time,
                yaw,
                pitch,
                inputs.camera.eye_distance(),
            ],
            shape: [
                parameters.sphere_size,
                parameters.deformation,
                parameters.complexity_level as f32,
                parameters.smoothness,
            ],
            audio: inputs.audio.to_array(),
            march: [
                march.hit_threshold,
                march.max_distance,
                normal_epsilon(parameters.deformation),
                0.0,
            ],
        }
    }
}

struct GpuFrameResources {
    width: u32,
    height: u32,
    padded_bytes_per_row: u32,
    output_texture: wgpu::Texture,
    _output_view: wgpu::TextureView,
    output_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

// Textures are not uploaded; GPU frames always render untextured.
pub struct GpuRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    params_buffer: wgpu::Buffer,
    frame_resources: Option<GpuFrameResources>,
}

impl GpuRenderer {
    pub async fn new() -> Result<Self> {
        let instance = wgpu::Instance::default();
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| Error::Gpu("no compatible GPU adapter available".into()))?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("shaderfolio-gpu-device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults(),
                },
                None,
            )
            .await
            .map_err(|error| Error::Gpu(format!("request_device failed: {error}")))?;

        let source = build_gpu_shader_wgsl();
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shaderfolio-compute-shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shaderfolio-bind-group-layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::WriteOnly,
                        format: wgpu::TextureFormat::Rgba8Unorm,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shaderfolio-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("shaderfolio-compute-pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: "main",
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        });
        if let Some(error) = device.pop_error_scope().await {
            return Err(Error::ShaderCompilation(error.to_string()));
        }

        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("shaderfolio-params-buffer"),
            size: std::mem::size_of::<GpuParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            device,
            queue,
            pipeline,
            bind_group_layout,
            params_buffer,
            frame_resources: None,
        })
    }

    pub fn render_frame(
        &mut self,
        settings: &RenderSettings,
        inputs: &FrameInputs,
    ) -> Result<RgbImage> {
        if settings.width == 0 || settings.height == 0 {
            return Err(Error::configuration(
                "width/height",
                "width and height must be positive",
            ));
        }

        self.ensure_frame_resources(settings.width, settings.height);
        let frame = self
            .frame_resources
            .as_ref()
            .ok_or_else(|| Error::Gpu("frame resources are not initialized".into()))?;

        let gpu_params = GpuParams::new(settings, inputs);
        self.queue
            .write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(&gpu_params));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("shaderfolio-command-encoder"),
            });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("shaderfolio-compute-pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &frame.bind_group, &[]);
            let groups_x = (settings.width + 7) / 8;
            let groups_y = (settings.height + 7) / 8;
            pass.dispatch_workgroups(groups_x, groups_y, 1);
        }

        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &frame.output_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &frame.output_buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(frame.padded_bytes_per_row),
                    rows_per_image: Some(settings.height),
                },
            },
            wgpu::Extent3d {
                width: settings.width,
                height: settings.height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(Some(encoder.finish()));

        let slice = frame.output_buffer.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        self.device.poll(wgpu::Maintain::Wait);
        receiver
            .recv()
            .map_err(|_| Error::Gpu("failed to receive readback status".into()))?
            .map_err(|error| Error::Gpu(format!("readback map failed: {error}")))?;

        let bytes_per_pixel = 4usize;
        let data = slice.get_mapped_range();
        let mut image = RgbImage::new(settings.width, settings.height);
        for y in 0..settings.height as usize {
            let row_start = y * frame.padded_bytes_per_row as usize;
            for x in 0..settings.width as usize {
                let pixel_start = row_start + (x * bytes_per_pixel);
                let r = data[pixel_start];
                let g = data[pixel_start + 1];
                let b = data[pixel_start + 2];
                image.put_pixel(x as u32, y as u32, Rgb([r, g, b]));
            }
        }
        drop(data);
        frame.output_buffer.unmap();

        Ok(image)
    }

    fn ensure_frame_resources(&mut self, width: u32, height: u32) {
        let needs_rebuild = match &self.frame_resources {
            Some(resources) => resources.width != width || resources.height != height,
            None => true,
        };
        if !needs_rebuild {
            return;
        }

        let output_texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("shaderfolio-output-texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let output_view = output_texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Readback rows must be aligned to 256 bytes.
        let unpadded_bytes_per_row = width * 4u32;
        let padded_bytes_per_row = ((unpadded_bytes_per_row + 255) / 256) * 256;
        let output_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("shaderfolio-readback-buffer"),
            size: (padded_bytes_per_row * height) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shaderfolio-bind-group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&output_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: self.params_buffer.as_entire_binding(),
                },
            ],
        });

        self.frame_resources = Some(GpuFrameResources {
            width,
            height,
            padded_bytes_per_row,
            output_texture,
            _output_view: output_view,
            output_buffer,
            bind_group,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnvOptions, RenderOptionsConfig};
    use crate::domain::presets::build_preset;
    use crate::domain::{AudioEnvelope, CameraState};

    #[test]
    fn params_layout_matches_uniform_struct() {
        // 8 scalars followed by 4 vec4s.
        assert_eq!(std::mem::size_of::<GpuParams>(), 32 + (4 * 16));
    }

    #[test]
    fn params_carry_frame_inputs() {
        let settings = RenderSettings::new(
            16,
            9,
            "gpu.png".into(),
            &RenderOptionsConfig::default(),
            EnvOptions::default(),
        );
        let inputs = FrameInputs {
            time: 2.0,
            camera: CameraState::default(),
            parameters: build_preset("showcase").unwrap(),
            audio: AudioEnvelope::new(0.1, 0.2, 0.3, 0.4),
            texture: None,
        };
        let params = GpuParams::new(&settings, &inputs);
        assert_eq!(params.box_count, 3);
        assert_eq!(params.post_effects, 1);
        assert_eq!(params.audio, [0.1, 0.2, 0.3, 0.4]);
        assert!((params.frame[1] - 0.6).abs() < 1e-6);
        assert_eq!(params.max_steps, 150);
    }
}
