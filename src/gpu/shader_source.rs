use crate::domain::parameters::MAX_BOX_COUNT;
use crate::render::shading::{AMBIENT, LIGHT_POSITION, SHADOWED};

pub(super) fn build_gpu_shader_wgsl() -> String {
    GPU_SHADER_WGSL_TEMPLATE
        .replace("__MAX_BOX_COUNT__", &format!("{MAX_BOX_COUNT}u"))
        .replace(
            "__LIGHT_POSITION__",
            &format!(
                "{:?}, {:?}, {:?}",
                LIGHT_POSITION.x, LIGHT_POSITION.y, LIGHT_POSITION.z
            ),
        )
        .replace("__AMBIENT__", &format!("{AMBIENT:?}"))
        .replace("__SHADOWED__", &format!("{SHADOWED:?}"))
}

const GPU_SHADER_WGSL_TEMPLATE: &str = include_str!("../shaders/scene.wgsl");
