use std::f32::consts::{PI, TAU};
use std::path::Path;

use image::RgbaImage;

use crate::error::{Error, Result};
use crate::math::Vec3;

#[derive(Clone, Debug)]
pub struct SurfaceTexture {
    image: RgbaImage,
}

impl SurfaceTexture {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let image = image::open(path.as_ref())?.to_rgba8();
        Self::from_image(image)
    }

    pub fn from_image(image: RgbaImage) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(Error::configuration("texture", "image has no pixels"));
        }
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    // Wraps in U, clamps in V.
    pub fn sample(&self, u: f32, v: f32) -> Vec3 {
        let width = self.image.width();
        let height = self.image.height();
        let x = (u.rem_euclid(1.0) * width as f32) - 0.5;
        let y = (v.clamp(0.0, 1.0) * height as f32) - 0.5;

        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;

        let column = |offset: f32| ((x0 + offset) as i64).rem_euclid(width as i64) as u32;
        let row = |offset: f32| ((y0 + offset).max(0.0) as u32).min(height - 1);

        let top = self.texel(column(0.0), row(0.0)).lerp(self.texel(column(1.0), row(0.0)), fx);
        let bottom = self.texel(column(0.0), row(1.0)).lerp(self.texel(column(1.0), row(1.0)), fx);
        top.lerp(bottom, fy)
    }

    pub fn sample_normal(&self, normal: Vec3) -> Vec3 {
        let (u, v) = spherical_uv(normal);
        self.sample(u, v)
    }

    fn texel(&self, x: u32, y: u32) -> Vec3 {
        let [r, g, b, _] = self.image.get_pixel(x, y).0;
        Vec3::new(r as f32, g as f32, b as f32) / 255.0
    }
}

pub fn spherical_uv(normal: Vec3) -> (f32, f32) {
    let u = 0.5 + (normal.z.atan2(normal.x) / TAU);
    let v = 0.5 - (normal.y.clamp(-1.0, 1.0).asin() / PI);
    (u, v)
}

pub fn apply_texture(lit: Vec3, texel: Vec3, intensity: f32) -> Vec3 {
    lit.lerp(lit * texel, intensity.clamp(0.0, 1.0))
}
