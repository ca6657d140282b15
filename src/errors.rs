use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeeMouseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Screen capture error: {0}")]
    Capture(String),

    #[error("OCR engine not available: {0}")]
    OcrUnavailable(String),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialize error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl SeeMouseError {
    /// Errors that mean the environment cannot support a run at all
    /// (no screen, no OCR engine, no input backend).
    pub fn is_environment(&self) -> bool {
        matches!(
            self,
            SeeMouseError::Capture(_) | SeeMouseError::OcrUnavailable(_) | SeeMouseError::Input(_)
        )
    }
}

pub type SeeMouseResult<T> = Result<T, SeeMouseError>;
