pub mod image_client;
pub mod transport;
pub mod vision_client;

use crate::{
    config::OpenAiConfig,
    error::{FaceGenError, Result},
    models::{GeneratedImage, GenerationRequest},
};
use std::sync::Arc;

pub use image_client::SynthesisClient;
pub use transport::{ReqwestTransport, Transport, TransportResponse};
pub use vision_client::VisionClient;

/// Client for the hosted AI provider, bundling the vision stage and the
/// synthesis stage behind one transport.
pub struct OpenAiClient {
    vision_client: VisionClient,
    synthesis_client: SynthesisClient,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(config.request_timeout_secs)?);
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport(config: OpenAiConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            vision_client: VisionClient::new(transport.clone(), config.clone()),
            synthesis_client: SynthesisClient::new(transport, config),
        }
    }

    pub fn vision(&self) -> &VisionClient {
        &self.vision_client
    }

    pub fn images(&self) -> &SynthesisClient {
        &self.synthesis_client
    }

    /// Face-conditioned generation: describe the captured face, then
    /// synthesize the described features into the requested scene.
    ///
    /// The stages are strictly sequential; a vision failure aborts before any
    /// synthesis call is made. Single attempt per stage, no retries. Each
    /// invocation is independent and stateless.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage> {
        if request.api_key.is_empty() {
            return Err(FaceGenError::MissingCredential);
        }

        let description = self
            .vision_client
            .describe(&request.image, &request.api_key)
            .await?;

        log::debug!("Face description obtained ({} chars)", description.as_str().len());

        self.synthesis_client
            .synthesize(&description, &request.prompt, &request.api_key)
            .await
    }
}
