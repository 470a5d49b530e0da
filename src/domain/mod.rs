pub mod audio;
pub mod camera;
pub mod parameters;
pub mod presets;

pub use audio::{AudioEnvelope, EnvelopeFollower};
pub use camera::CameraState;
pub use parameters::SceneParameters;
