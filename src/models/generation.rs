use crate::models::CapturedImage;
use std::fmt;

/// Bearer secret for the hosted AI endpoints.
///
/// Never logged; `Debug` is redacted and the backing bytes are zeroed on drop.
#[derive(Clone)]
pub struct ApiKey {
    bytes: Vec<u8>,
}

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            bytes: key.into().into_bytes(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Borrows the secret for transmission to a designated endpoint.
    pub fn expose(&self) -> &str {
        // Constructed from a String, so always valid UTF-8.
        std::str::from_utf8(&self.bytes).unwrap_or("")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(****)")
    }
}

impl Drop for ApiKey {
    fn drop(&mut self) {
        for byte in self.bytes.iter_mut() {
            *byte = 0;
        }
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

/// One complete pipeline input. Never persisted, never mutated mid-flight.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub image: CapturedImage,
    pub prompt: String,
    pub api_key: ApiKey,
}

impl GenerationRequest {
    pub fn new(image: CapturedImage, prompt: impl Into<String>, api_key: impl Into<ApiKey>) -> Self {
        Self {
            image,
            prompt: prompt.into(),
            api_key: api_key.into(),
        }
    }
}

/// Objective facial description produced by the vision stage.
///
/// Transient: held for one pipeline invocation, never cached across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceDescription(String);

impl FaceDescription {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FaceDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Terminal artifact of the pipeline: a reference to the synthesized image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub url: String,
}

impl GeneratedImage {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
