use thiserror::Error;

pub const NO_ARTIFACT_MESSAGE: &str = "You didn't upload a neural network";
pub const NO_IMAGE_MESSAGE: &str = "There is no image to classify";

/// Everything a user-triggered action can fail with.
///
/// `Display` is the text written to the error surface, so boundary failures
/// carry the engine's own message untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// A required file or image was not supplied
    #[error("{0}")]
    InputMissing(String),
    /// The uploaded file could not be read as text
    #[error("Could not read {name}: {message}")]
    Ingestion { name: String, message: String },
    /// The engine or sample provider threw
    #[error("{0}")]
    Boundary(String),
    #[error("Could not encode drawing: {0}")]
    Encoding(String),
    #[error("Could not offer download: {0}")]
    Download(String),
    /// A newer upload replaced this one before it finished reading
    #[error("Upload superseded by a newer selection")]
    Superseded,
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AppError {
    pub fn no_artifact() -> Self {
        AppError::InputMissing(NO_ARTIFACT_MESSAGE.to_string())
    }

    pub fn no_image() -> Self {
        AppError::InputMissing(NO_IMAGE_MESSAGE.to_string())
    }

    /// Whether the error should reach the error surface
    pub fn is_reportable(&self) -> bool {
        !matches!(self, AppError::Superseded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_artifact_message() {
        assert_eq!(AppError::no_artifact().to_string(), NO_ARTIFACT_MESSAGE);
    }

    #[test]
    fn test_ingestion_message_names_file() {
        let err = AppError::Ingestion {
            name: "model.txt".to_string(),
            message: "NotReadableError".to_string(),
        };
        assert_eq!(err.to_string(), "Could not read model.txt: NotReadableError");
    }

    #[test]
    fn test_superseded_is_not_reported() {
        assert!(!AppError::Superseded.is_reportable());
        assert!(AppError::no_image().is_reportable());
    }
}
