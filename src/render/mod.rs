pub mod march;
pub mod post;
pub mod settings;
pub mod shading;
pub mod texture;
pub mod trace;
pub mod view;

pub use settings::RenderSettings;
pub use texture::SurfaceTexture;
pub use trace::{Shade, Tracer};
pub use view::View;

use crate::domain::{AudioEnvelope, CameraState, SceneParameters};
use crate::scene::Scene;

#[derive(Clone, Copy, Debug)]
pub struct FrameInputs<'a> {
    pub time: f32,
    pub camera: CameraState,
    pub parameters: SceneParameters,
    pub audio: AudioEnvelope,
    pub texture: Option<&'a SurfaceTexture>,
}

impl FrameInputs<'_> {
    pub fn scene(&self) -> Scene {
        Scene::new(self.time, &self.camera, &self.parameters, self.audio)
    }

    pub fn view(&self, width: u32, height: u32) -> View {
        View::new(&self.camera, width, height)
    }
}
