use crate::{
    config::OpenAiConfig,
    error::{FaceGenError, Result},
    models::{ApiErrorBody, ApiKey, FaceDescription, GeneratedImage, ImageGenerationsResponse},
    openai::transport::Transport,
};
use serde_json::json;
use std::sync::Arc;

/// Stage B client: synthesizes an image from the face description and the
/// caller's scene prompt.
pub struct SynthesisClient {
    transport: Arc<dyn Transport>,
    config: OpenAiConfig,
}

impl SynthesisClient {
    pub fn new(transport: Arc<dyn Transport>, config: OpenAiConfig) -> Self {
        Self { transport, config }
    }

    /// Template-composes the synthesis prompt: described features, requested
    /// scene, and framing that keeps the face accurate and recognizable.
    fn compose_prompt(description: &FaceDescription, user_prompt: &str) -> String {
        format!(
            "Create a realistic image of a person with the following facial features: {}. \
The person should be shown {}. \
Maintain facial details accurately while transforming the scene according to the prompt. \
The face should be clearly visible and recognizable based on the description. The image \
should blend the described facial features with the requested scene.",
            description, user_prompt
        )
    }

    pub async fn synthesize(
        &self,
        description: &FaceDescription,
        user_prompt: &str,
        api_key: &ApiKey,
    ) -> Result<GeneratedImage> {
        let prompt = Self::compose_prompt(description, user_prompt);

        let payload = json!({
            "model": self.config.image_model,
            "prompt": prompt,
            "n": 1,
            "size": self.config.image_size,
            "quality": self.config.image_quality,
            "response_format": "url"
        });

        log::info!(
            "Requesting image synthesis (model {}, size {})",
            self.config.image_model,
            self.config.image_size
        );

        let response = self
            .transport
            .post_json(
                &self.config.image_generations_url(),
                api_key.expose(),
                payload,
            )
            .await?;

        if !response.is_success() {
            let message = ApiErrorBody::extract_message(&response.body, &response.status_text);
            log::error!("Synthesis stage failed with status {}", response.status);
            return Err(FaceGenError::ImageSynthesisFailed(message));
        }

        let parsed: ImageGenerationsResponse = serde_json::from_str(&response.body)
            .map_err(|e| FaceGenError::ResponseError(format!("synthesis response: {}", e)))?;

        let url = parsed
            .data
            .into_iter()
            .next()
            .map(|datum| datum.url)
            .ok_or_else(|| {
                FaceGenError::ResponseError("synthesis response contained no images".into())
            })?;

        Ok(GeneratedImage::from_url(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::transport::mock::MockTransport;

    fn description() -> FaceDescription {
        FaceDescription::new("oval face, green eyes, short brown hair")
    }

    #[tokio::test]
    async fn test_synthesize_returns_url() {
        let transport = Arc::new(MockTransport::new(vec![MockTransport::ok(
            r#"{"data":[{"url":"https://example.com/out.png"}]}"#,
        )]));
        let client = SynthesisClient::new(transport.clone(), OpenAiConfig::new());

        let generated = client
            .synthesize(&description(), "viking warrior", &ApiKey::new("sk-test"))
            .await
            .unwrap();

        assert_eq!(generated.url, "https://example.com/out.png");
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_synthesize_request_shape() {
        let transport = Arc::new(MockTransport::new(vec![MockTransport::ok(
            r#"{"data":[{"url":"https://example.com/out.png"}]}"#,
        )]));
        let client = SynthesisClient::new(transport.clone(), OpenAiConfig::new());

        client
            .synthesize(&description(), "viking warrior", &ApiKey::new("sk-test"))
            .await
            .unwrap();

        let call = transport.call(0);
        assert_eq!(call.url, "https://api.openai.com/v1/images/generations");
        assert_eq!(call.body["model"], "dall-e-3");
        assert_eq!(call.body["n"], 1);
        assert_eq!(call.body["size"], "1024x1024");
        assert_eq!(call.body["quality"], "hd");
        assert_eq!(call.body["response_format"], "url");
        let prompt = call.body["prompt"].as_str().unwrap();
        assert!(prompt.contains("oval face, green eyes, short brown hair"));
        assert!(prompt.contains("viking warrior"));
    }

    #[tokio::test]
    async fn test_synthesize_non_success_extracts_provider_message() {
        let transport = Arc::new(MockTransport::new(vec![MockTransport::error(
            400,
            "Bad Request",
            r#"{"error":{"message":"Your prompt was rejected"}}"#,
        )]));
        let client = SynthesisClient::new(transport, OpenAiConfig::new());

        match client
            .synthesize(&description(), "scene", &ApiKey::new("sk-test"))
            .await
        {
            Err(FaceGenError::ImageSynthesisFailed(msg)) => {
                assert_eq!(msg, "Your prompt was rejected")
            }
            other => panic!("expected ImageSynthesisFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_synthesize_unstructured_error_uses_status_text() {
        let transport = Arc::new(MockTransport::new(vec![MockTransport::error(
            502,
            "Bad Gateway",
            "<html>upstream error</html>",
        )]));
        let client = SynthesisClient::new(transport, OpenAiConfig::new());

        match client
            .synthesize(&description(), "scene", &ApiKey::new("sk-test"))
            .await
        {
            Err(FaceGenError::ImageSynthesisFailed(msg)) => assert_eq!(msg, "Bad Gateway"),
            other => panic!("expected ImageSynthesisFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_synthesize_empty_data_is_response_error() {
        let transport = Arc::new(MockTransport::new(vec![MockTransport::ok(r#"{"data":[]}"#)]));
        let client = SynthesisClient::new(transport, OpenAiConfig::new());

        match client
            .synthesize(&description(), "scene", &ApiKey::new("sk-test"))
            .await
        {
            Err(FaceGenError::ResponseError(_)) => {}
            other => panic!("expected ResponseError, got {:?}", other),
        }
    }
}
