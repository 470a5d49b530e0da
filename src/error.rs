use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid {field}: {reason}")]
    Configuration { field: &'static str, reason: String },

    #[error("unknown parameter preset: {0}")]
    UnknownPreset(String),

    #[error("texture could not be loaded: {0}")]
    Texture(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed job description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GPU backend error: {0}")]
    Gpu(String),

    #[error("shader compilation failed: {0}")]
    ShaderCompilation(String),
}

impl Error {
    pub fn configuration(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Configuration {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
