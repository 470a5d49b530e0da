use crate::domain::SceneParameters;

pub const PRESET_ID: &str = "showcase";

pub fn build() -> SceneParameters {
    SceneParameters::default()
}
