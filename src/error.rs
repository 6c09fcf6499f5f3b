use std::fmt;

#[derive(Debug)]
pub enum FaceGenError {
    NotReady,
    PermissionDenied(String),
    MissingCredential,
    VisionAnalysisFailed(String),
    ImageSynthesisFailed(String),
    ConfigError(String),
    RequestError(String),
    ResponseError(String),
    SerializationError(String),
    EncodingError(String),
    StateError(String),
}

impl fmt::Display for FaceGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaceGenError::NotReady => {
                write!(f, "Capture error: frame source has not produced a frame yet")
            }
            FaceGenError::PermissionDenied(msg) => {
                write!(f, "Camera permission denied: {}", msg)
            }
            FaceGenError::MissingCredential => {
                write!(f, "Credential error: API key is required")
            }
            FaceGenError::VisionAnalysisFailed(msg) => {
                write!(f, "Vision API error: {}", msg)
            }
            FaceGenError::ImageSynthesisFailed(msg) => {
                write!(f, "Image synthesis error: {}", msg)
            }
            FaceGenError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            FaceGenError::RequestError(msg) => write!(f, "Request error: {}", msg),
            FaceGenError::ResponseError(msg) => write!(f, "Response error: {}", msg),
            FaceGenError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            FaceGenError::EncodingError(msg) => write!(f, "Encoding error: {}", msg),
            FaceGenError::StateError(msg) => write!(f, "Session state error: {}", msg),
        }
    }
}

impl std::error::Error for FaceGenError {}

pub type Result<T> = std::result::Result<T, FaceGenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            FaceGenError::MissingCredential.to_string(),
            "Credential error: API key is required"
        );
        assert_eq!(
            FaceGenError::VisionAnalysisFailed("rate limited".into()).to_string(),
            "Vision API error: rate limited"
        );
        assert_eq!(
            FaceGenError::NotReady.to_string(),
            "Capture error: frame source has not produced a frame yet"
        );
    }
}
