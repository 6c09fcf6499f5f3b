use crate::{
    config::OpenAiConfig,
    error::{FaceGenError, Result},
    models::{ApiErrorBody, ApiKey, CapturedImage, ChatCompletionResponse, FaceDescription},
    openai::transport::Transport,
};
use serde_json::json;
use std::sync::Arc;

/// System instruction constraining the model to an objective physical
/// description usable as image-generation input.
const DESCRIBE_SYSTEM_INSTRUCTION: &str = "You are a facial analysis assistant that creates \
detailed descriptions of people's faces for image generation. Focus on physical \
characteristics: face shape, eye color, hair style/color, skin tone, and distinctive \
features. Describe objectively without subjective judgments. Format your response as a \
detailed paragraph that can be used for image generation.";

const DESCRIBE_USER_INSTRUCTION: &str = "Analyze this face and provide a detailed \
description that could be used to generate images featuring this person. Focus on \
physical attributes only.";

/// Stage A client: extracts a facial description from a captured image via the
/// vision-capable chat completion endpoint.
pub struct VisionClient {
    transport: Arc<dyn Transport>,
    config: OpenAiConfig,
}

impl VisionClient {
    pub fn new(transport: Arc<dyn Transport>, config: OpenAiConfig) -> Self {
        Self { transport, config }
    }

    pub async fn describe(
        &self,
        image: &CapturedImage,
        api_key: &ApiKey,
    ) -> Result<FaceDescription> {
        // The payload is tagged as JPEG-compatible regardless of the capture
        // encoding; the provider accepts PNG bytes under this tag.
        let payload = json!({
            "model": self.config.vision_model,
            "messages": [
                {
                    "role": "system",
                    "content": DESCRIBE_SYSTEM_INSTRUCTION
                },
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "text",
                            "text": DESCRIBE_USER_INSTRUCTION
                        },
                        {
                            "type": "image_url",
                            "image_url": {
                                "url": format!("data:image/jpeg;base64,{}", image.to_base64())
                            }
                        }
                    ]
                }
            ],
            "max_tokens": self.config.max_description_tokens
        });

        log::info!(
            "Requesting face description ({}x{} capture, model {})",
            image.width(),
            image.height(),
            self.config.vision_model
        );

        let response = self
            .transport
            .post_json(
                &self.config.chat_completions_url(),
                api_key.expose(),
                payload,
            )
            .await?;

        if !response.is_success() {
            let message = ApiErrorBody::extract_message(&response.body, &response.status_text);
            log::error!("Vision stage failed with status {}", response.status);
            return Err(FaceGenError::VisionAnalysisFailed(message));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&response.body)
            .map_err(|e| FaceGenError::ResponseError(format!("vision response: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                FaceGenError::ResponseError("vision response contained no choices".into())
            })?;

        Ok(FaceDescription::new(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::transport::mock::MockTransport;

    fn test_image() -> CapturedImage {
        CapturedImage::new(vec![0x89, 0x50, 0x4E, 0x47], 2, 2)
    }

    #[tokio::test]
    async fn test_describe_returns_first_choice_content() {
        let transport = Arc::new(MockTransport::new(vec![MockTransport::ok(
            r#"{"choices":[{"message":{"content":"oval face, green eyes"}},{"message":{"content":"ignored"}}]}"#,
        )]));
        let client = VisionClient::new(transport.clone(), OpenAiConfig::new());

        let description = client
            .describe(&test_image(), &ApiKey::new("sk-test"))
            .await
            .unwrap();

        assert_eq!(description.as_str(), "oval face, green eyes");
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_describe_request_shape() {
        let transport = Arc::new(MockTransport::new(vec![MockTransport::ok(
            r#"{"choices":[{"message":{"content":"d"}}]}"#,
        )]));
        let client = VisionClient::new(transport.clone(), OpenAiConfig::new());
        let image = test_image();

        client.describe(&image, &ApiKey::new("sk-test")).await.unwrap();

        let call = transport.call(0);
        assert_eq!(call.url, "https://api.openai.com/v1/chat/completions");
        assert_eq!(call.bearer, "sk-test");
        assert_eq!(call.body["model"], "gpt-4o");
        assert_eq!(call.body["max_tokens"], 500);
        assert_eq!(call.body["messages"][0]["role"], "system");
        let image_url = call.body["messages"][1]["content"][1]["image_url"]["url"]
            .as_str()
            .unwrap();
        assert_eq!(
            image_url,
            format!("data:image/jpeg;base64,{}", image.to_base64())
        );
    }

    #[tokio::test]
    async fn test_describe_non_success_extracts_provider_message() {
        let transport = Arc::new(MockTransport::new(vec![MockTransport::error(
            429,
            "Too Many Requests",
            r#"{"error":{"message":"Rate limit reached"}}"#,
        )]));
        let client = VisionClient::new(transport, OpenAiConfig::new());

        match client.describe(&test_image(), &ApiKey::new("sk-test")).await {
            Err(FaceGenError::VisionAnalysisFailed(msg)) => {
                assert_eq!(msg, "Rate limit reached")
            }
            other => panic!("expected VisionAnalysisFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_describe_empty_choices_is_response_error() {
        let transport = Arc::new(MockTransport::new(vec![MockTransport::ok(
            r#"{"choices":[]}"#,
        )]));
        let client = VisionClient::new(transport, OpenAiConfig::new());

        match client.describe(&test_image(), &ApiKey::new("sk-test")).await {
            Err(FaceGenError::ResponseError(_)) => {}
            other => panic!("expected ResponseError, got {:?}", other),
        }
    }
}
