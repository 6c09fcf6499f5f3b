use facegen::{
    capture, logger, CaptureSession, GenerationRequest, OpenAiClient, OpenAiConfig,
    StillFrameSource,
};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    logger::init_with_config(
        logger::LoggerConfig::development().with_level(logger::LogLevel::Debug),
    )?;

    let mut args = env::args().skip(1);
    let (image_path, prompt) = match (args.next(), args.next()) {
        (Some(path), Some(prompt)) => (path, prompt),
        _ => {
            log::error!("Usage: facegen <face-image-path> <scene-prompt>");
            std::process::exit(2);
        }
    };

    let api_key = match env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => {
            log::info!("✅ OpenAI API key found in environment");
            log::debug!("Key starts with: {}...", &key[..5.min(key.len())]);
            key
        }
        _ => {
            log::error!("❌ OPENAI_API_KEY is not set");
            std::process::exit(2);
        }
    };

    let mut session = CaptureSession::new();
    session.set_prompt(&prompt);

    log::info!("📷 Loading face image from {}", image_path);
    let still = match image::open(&image_path) {
        Ok(decoded) => decoded,
        Err(e) => {
            session.camera_denied(e.to_string());
            log::error!("{}", session.status_line());
            std::process::exit(1);
        }
    };
    session.camera_started()?;

    let mut source = StillFrameSource::new(still);
    let captured = {
        let _timer = logger::timer("capture");
        capture(&mut source)?
    };
    log::info!("🖼️  Captured {}x{} still", captured.width(), captured.height());
    session.frame_captured(captured)?;

    let (image, prompt) = session.begin_generation()?;
    log::info!("{}", session.status_line());

    let config = OpenAiConfig::from_env();
    let client = OpenAiClient::new(config)?;
    let request = GenerationRequest::new(image, prompt, api_key);

    let outcome = {
        let _timer = logger::timer("generate");
        client.generate(&request).await
    };

    match outcome {
        Ok(generated) => {
            session.generation_succeeded(generated.clone())?;
            log::info!("{}", session.status_line());
            log::info!("🎨 Generated image: {}", generated.url);
            Ok(())
        }
        Err(e) => {
            session.generation_failed(&e)?;
            log::error!("{}", session.status_line());
            Err(Box::new(e) as Box<dyn std::error::Error>)
        }
    }
}
