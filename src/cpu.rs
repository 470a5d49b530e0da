use image::{Rgb, RgbImage};
use rayon::prelude::*;

use crate::math::{sample_jitter, Vec3};
use crate::render::post;
use crate::render::{FrameInputs, RenderSettings, Tracer};

pub fn render_cpu(settings: &RenderSettings, inputs: &FrameInputs) -> RgbImage {
    let mut image = RgbImage::new(settings.width, settings.height);
    let width = settings.width as usize;
    let height = settings.height as usize;
    if width == 0 || height == 0 {
        return image;
    }

    let view = inputs.view(settings.width, settings.height);
    let tracer = Tracer::new(inputs, settings.march(inputs.parameters.deformation));
    let sample_count = settings.samples_per_pixel.max(1);
    let mut color_buffer = vec![Vec3::ZERO; width * height];

    // Split work by scanlines; `y` counts down from the top row.
    color_buffer
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let y_u32 = y as u32;
            let row_from_bottom = (settings.height - 1 - y_u32) as f32;
            for (x, color_slot) in row.iter_mut().enumerate() {
                let x_u32 = x as u32;
                let mut accumulated = Vec3::ZERO;
                for sample_index in 0..sample_count {
                    let (jitter_x, jitter_y) = if sample_count == 1 {
                        (0.5, 0.5)
                    } else {
                        (
                            sample_jitter(x_u32, y_u32, sample_index, 0),
                            sample_jitter(x_u32, y_u32, sample_index, 1),
                        )
                    };
                    let frag_x = x_u32 as f32 + jitter_x;
                    let frag_y = row_from_bottom + jitter_y;
                    let mut color = tracer.trace(view.ray(frag_x, frag_y)).color();
                    if settings.post_effects {
                        color = post::finish(color, frag_y, view.uv(frag_x, frag_y));
                    }
                    accumulated += color;
                }
                *color_slot = accumulated / sample_count as f32;
            }
        });

    for y in 0..height {
        for x in 0..width {
            let color = color_buffer[(y * width) + x];
            image.put_pixel(x as u32, y as u32, to_rgb(color));
        }
    }

    image
}

fn to_rgb(color: Vec3) -> Rgb<u8> {
    let clamped = color.clamp01();
    Rgb([
        (clamped.x * 255.999) as u8,
        (clamped.y * 255.999) as u8,
        (clamped.z * 255.999) as u8,
    ])
}
