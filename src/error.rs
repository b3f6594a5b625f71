use thiserror::Error;

/// Main error type for the portrait personalization library
#[derive(Error, Debug)]
pub enum PersonalizeError {
    #[error("Face detection error: {0}")]
    Detection(#[from] DetectionError),

    #[error("Stylization error: {0}")]
    Stylization(#[from] StylizationError),

    #[error("Compositing error: {0}")]
    Compositing(#[from] CompositingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Face detection errors
#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("No face detected in the image")]
    NoFaceDetected,

    #[error("Detector {detector} failed: {reason}")]
    DetectorFailed { detector: String, reason: String },
}

/// Stylization backend errors
#[derive(Error, Debug)]
pub enum StylizationError {
    #[error("Stylizer not found: {name}")]
    NotFound { name: String },

    #[error("Stylizer {backend} failed: {reason}")]
    BackendFailed { backend: String, reason: String },
}

/// Template compositing errors
#[derive(Error, Debug)]
pub enum CompositingError {
    #[error("Failed to load template {path}: {reason}")]
    TemplateLoad { path: String, reason: String },

    #[error("Degenerate geometry: {details}")]
    DegenerateGeometry { details: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using PersonalizeError
pub type Result<T> = std::result::Result<T, PersonalizeError>;

impl PersonalizeError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Whether the caller's input is at fault (maps to a 400-class response).
    ///
    /// Only a photo without a detectable face counts; every other failure is
    /// on our side.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Detection(DetectionError::NoFaceDetected))
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Detection(DetectionError::NoFaceDetected) => {
                "No face detected in the image. Please upload a photo with a clear face.".to_string()
            }
            Self::Stylization(StylizationError::NotFound { name }) => {
                format!("Stylizer '{}' not found. Available stylizers: basic, identity", name)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => format!("Processing error: {}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_missing_face_is_client_error() {
        let no_face: PersonalizeError = DetectionError::NoFaceDetected.into();
        assert!(no_face.is_client_error());

        let detector_crash: PersonalizeError = DetectionError::DetectorFailed {
            detector: "mtcnn".to_string(),
            reason: "model missing".to_string(),
        }
        .into();
        assert!(!detector_crash.is_client_error());

        let template: PersonalizeError = CompositingError::TemplateLoad {
            path: "templates/x.png".to_string(),
            reason: "truncated".to_string(),
        }
        .into();
        assert!(!template.is_client_error());
    }

    #[test]
    fn test_user_messages() {
        let no_face: PersonalizeError = DetectionError::NoFaceDetected.into();
        assert!(no_face.user_message().contains("clear face"));

        let generic = PersonalizeError::generic("boom");
        assert_eq!(generic.user_message(), "Processing error: Generic error: boom");
    }
}
