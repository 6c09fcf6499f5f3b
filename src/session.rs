use crate::{
    error::{FaceGenError, Result},
    models::{CapturedImage, GeneratedImage},
};

/// Capture-and-prompt session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    CameraActive,
    Captured,
    Generating,
    Done,
    Failed,
}

/// One user session from camera start to generated result.
///
/// State is explicit and owned by the session; status text is derived from it
/// rather than written into some ambient registry. Only one generation may be
/// in flight: `begin_generation` refuses while a previous one is outstanding.
#[derive(Debug)]
pub struct CaptureSession {
    state: SessionState,
    captured: Option<CapturedImage>,
    prompt: String,
    result: Option<GeneratedImage>,
    error: Option<String>,
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            captured: None,
            prompt: String::new(),
            result: None,
            error: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn captured(&self) -> Option<&CapturedImage> {
        self.captured.as_ref()
    }

    pub fn result(&self) -> Option<&GeneratedImage> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Camera acquisition succeeded.
    pub fn camera_started(&mut self) -> Result<()> {
        match self.state {
            SessionState::Idle => {
                self.state = SessionState::CameraActive;
                Ok(())
            }
            state => Err(FaceGenError::StateError(format!(
                "cannot start camera from {:?}",
                state
            ))),
        }
    }

    /// Camera acquisition refused by the host environment.
    pub fn camera_denied(&mut self, message: impl Into<String>) {
        let error = FaceGenError::PermissionDenied(message.into());
        self.error = Some(error.to_string());
        self.state = SessionState::Failed;
    }

    /// A still was taken; the live source has been released by `capture`.
    pub fn frame_captured(&mut self, image: CapturedImage) -> Result<()> {
        match self.state {
            SessionState::CameraActive => {
                self.captured = Some(image);
                self.state = SessionState::Captured;
                Ok(())
            }
            state => Err(FaceGenError::StateError(format!(
                "cannot capture from {:?}",
                state
            ))),
        }
    }

    /// Gates generation on a captured image and a non-empty prompt, then
    /// hands back the pipeline inputs. The session moves to `Generating`
    /// until `generation_succeeded` or `generation_failed` is reported.
    pub fn begin_generation(&mut self) -> Result<(CapturedImage, String)> {
        if self.state != SessionState::Captured {
            return Err(FaceGenError::StateError(format!(
                "cannot generate from {:?}",
                self.state
            )));
        }
        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            return Err(FaceGenError::StateError(
                "prompt must not be empty".into(),
            ));
        }
        let image = match self.captured.clone() {
            Some(image) => image,
            None => {
                return Err(FaceGenError::StateError(
                    "no captured image available".into(),
                ))
            }
        };
        self.state = SessionState::Generating;
        Ok((image, prompt.to_string()))
    }

    pub fn generation_succeeded(&mut self, result: GeneratedImage) -> Result<()> {
        match self.state {
            SessionState::Generating => {
                self.result = Some(result);
                self.state = SessionState::Done;
                Ok(())
            }
            state => Err(FaceGenError::StateError(format!(
                "no generation in flight in {:?}",
                state
            ))),
        }
    }

    pub fn generation_failed(&mut self, error: &FaceGenError) -> Result<()> {
        match self.state {
            SessionState::Generating => {
                self.error = Some(error.to_string());
                self.state = SessionState::Failed;
                Ok(())
            }
            state => Err(FaceGenError::StateError(format!(
                "no generation in flight in {:?}",
                state
            ))),
        }
    }

    /// Returns to `Idle` from any state, discarding capture, result, and error.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Human-readable status for the current state.
    pub fn status_line(&self) -> String {
        match self.state {
            SessionState::Idle => "Press start to activate the camera".to_string(),
            SessionState::CameraActive => "Camera active - ready to take photo".to_string(),
            SessionState::Captured => {
                "Photo captured! Enter a prompt and generate an image.".to_string()
            }
            SessionState::Generating => {
                "Generating image based on your face and prompt...".to_string()
            }
            SessionState::Done => format!("Image generated! Prompt: \"{}\"", self.prompt),
            SessionState::Failed => self
                .error
                .clone()
                .unwrap_or_else(|| "Generation failed".to_string()),
        }
    }
}
