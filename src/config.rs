use std::env;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
pub const DEFAULT_MAX_DESCRIPTION_TOKENS: u32 = 500;
pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";
pub const DEFAULT_IMAGE_QUALITY: &str = "hd";

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_base: String,
    pub vision_model: String,
    pub image_model: String,
    pub max_description_tokens: u32,
    pub image_size: String,
    pub image_quality: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        OpenAiConfig {
            api_base: DEFAULT_API_BASE.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            max_description_tokens: DEFAULT_MAX_DESCRIPTION_TOKENS,
            image_size: DEFAULT_IMAGE_SIZE.to_string(),
            image_quality: DEFAULT_IMAGE_QUALITY.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl OpenAiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base) = env::var("OPENAI_API_BASE") {
            config.api_base = base;
        }
        if let Ok(model) = env::var("FACEGEN_VISION_MODEL") {
            config.vision_model = model;
        }
        if let Ok(model) = env::var("FACEGEN_IMAGE_MODEL") {
            config.image_model = model;
        }
        if let Ok(secs) = env::var("FACEGEN_TIMEOUT_SECS") {
            config.request_timeout_secs = secs.parse().ok();
        }
        config
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_vision_model(mut self, model: impl Into<String>) -> Self {
        self.vision_model = model.into();
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn with_max_description_tokens(mut self, max_tokens: u32) -> Self {
        self.max_description_tokens = max_tokens;
        self
    }

    pub fn with_image_size(mut self, size: impl Into<String>) -> Self {
        self.image_size = size.into();
        self
    }

    pub fn with_image_quality(mut self, quality: impl Into<String>) -> Self {
        self.image_quality = quality.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }

    pub fn image_generations_url(&self) -> String {
        format!("{}/images/generations", self.api_base.trim_end_matches('/'))
    }
}
