pub mod animation;
pub mod config;
pub mod cpu;
pub mod domain;
pub mod error;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod math;
pub mod render;
pub mod scene;
pub mod sdf;
pub mod sequence;

pub use error::{Error, Result};
