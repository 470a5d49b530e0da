use crate::domain::CameraState;
use crate::math::{Ray, Vec3};

#[derive(Clone, Copy, Debug)]
pub struct View {
    pub origin: Vec3,
    pub width: f32,
    pub height: f32,
}

impl View {
    pub fn new(camera: &CameraState, width: u32, height: u32) -> Self {
        Self {
            origin: Vec3::new(0.0, 0.0, -camera.eye_distance()),
            width: width.max(1) as f32,
            height: height.max(1) as f32,
        }
    }

    pub fn uv(&self, frag_x: f32, frag_y: f32) -> (f32, f32) {
        (
            (frag_x - (0.5 * self.width)) / self.height,
            (frag_y - (0.5 * self.height)) / self.height,
        )
    }

    // frag_y counts up from the bottom row.
    pub fn ray(&self, frag_x: f32, frag_y: f32) -> Ray {
        let (u, v) = self.uv(frag_x, frag_y);
        Ray::new(self.origin, Vec3::new(u, v, 1.0))
    }
}
