mod panel_defaults;
mod random;
mod showcase;
mod still;

pub use random::randomized;

use crate::domain::SceneParameters;
use crate::error::{Error, Result};

pub const DEFAULT_PRESET: &str = showcase::PRESET_ID;

pub fn preset_ids() -> [&'static str; 3] {
    [
        showcase::PRESET_ID,
        panel_defaults::PRESET_ID,
        still::PRESET_ID,
    ]
}

pub fn build_preset(preset_id: &str) -> Result<SceneParameters> {
    let preset_id = preset_id.trim();
    if preset_id.eq_ignore_ascii_case(showcase::PRESET_ID) {
        return Ok(showcase::build());
    }
    if preset_id.eq_ignore_ascii_case(panel_defaults::PRESET_ID) {
        return Ok(panel_defaults::build());
    }
    if preset_id.eq_ignore_ascii_case(still::PRESET_ID) {
        return Ok(still::build());
    }

    Err(Error::UnknownPreset(preset_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_is_valid() {
        for id in preset_ids() {
            let params = build_preset(id).unwrap();
            assert!(params.validate().is_ok(), "preset {id} failed validation");
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(
            build_preset("PANEL_DEFAULTS").unwrap(),
            build_preset("panel_defaults").unwrap()
        );
    }

    #[test]
    fn unknown_preset_is_rejected() {
        assert!(matches!(
            build_preset("nebula"),
            Err(Error::UnknownPreset(id)) if id == "nebula"
        ));
    }
}
