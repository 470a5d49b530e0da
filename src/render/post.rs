use crate::math::Vec3;

const SCANLINE_FREQUENCY: f32 = 1.5;
const SCANLINE_DEPTH: f32 = 0.02;
const VIGNETTE_SCALE: f32 = 1.2;
const VIGNETTE_STRENGTH: f32 = 0.2;
const OUTPUT_GAMMA: f32 = 1.1;

pub fn finish(color: Vec3, frag_y: f32, uv: (f32, f32)) -> Vec3 {
    let scanline = (frag_y * SCANLINE_FREQUENCY).sin() * SCANLINE_DEPTH + (1.0 - SCANLINE_DEPTH);
    let (vx, vy) = (uv.0 * VIGNETTE_SCALE, uv.1 * VIGNETTE_SCALE);
    let vignette = 1.0 - ((vx * vx) + (vy * vy)) * VIGNETTE_STRENGTH;
    (color * (scanline * vignette)).powf(OUTPUT_GAMMA)
}
