pub mod capture;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod openai;
pub mod session;

pub use capture::{capture, FrameSource, StillFrameSource};
pub use config::OpenAiConfig;
pub use error::{FaceGenError, Result};
pub use models::{ApiKey, CapturedImage, FaceDescription, GeneratedImage, GenerationRequest};
pub use openai::{OpenAiClient, SynthesisClient, Transport, VisionClient};
pub use session::{CaptureSession, SessionState};
