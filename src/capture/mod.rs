use crate::{
    error::{FaceGenError, Result},
    models::CapturedImage,
};
use image::{DynamicImage, RgbaImage};
use std::io::Cursor;

/// A live capability that can render its current frame into a raster surface.
///
/// Acquisition and release lifecycle belongs to the caller; `capture` only
/// closes the handle after a successful still has been taken.
pub trait FrameSource {
    /// Intrinsic dimensions of the current frame, or `None` before the source
    /// has produced one.
    fn dimensions(&self) -> Option<(u32, u32)>;

    /// Copies the current frame pixel-for-pixel into `surface`. The surface
    /// is allocated at exactly the intrinsic size reported by `dimensions`.
    fn render_frame(&self, surface: &mut RgbaImage) -> Result<()>;

    /// Closes the acquisition handle. Called once after a successful capture;
    /// only a single still is needed per session.
    fn release(&mut self);
}

/// Takes a single still from `source` and encodes it as PNG.
///
/// No scaling or cropping: the surface matches the source's reported
/// dimensions exactly. The source is released only on success.
pub fn capture<S: FrameSource>(source: &mut S) -> Result<CapturedImage> {
    let (width, height) = source.dimensions().ok_or(FaceGenError::NotReady)?;

    let mut surface = RgbaImage::new(width, height);
    source.render_frame(&mut surface)?;

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(surface)
        .write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)
        .map_err(|e| FaceGenError::EncodingError(format!("PNG encoding failed: {}", e)))?;

    log::debug!("Captured {}x{} frame ({} bytes PNG)", width, height, png.len());

    source.release();

    Ok(CapturedImage::new(png, width, height))
}

/// Frame source backed by an already-decoded still image.
///
/// Stands in for a live feed when the input is a file (demo binary) and
/// doubles as the always-ready source in tests.
pub struct StillFrameSource {
    frame: Option<RgbaImage>,
}

impl StillFrameSource {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            frame: Some(image.to_rgba8()),
        }
    }
}

impl FrameSource for StillFrameSource {
    fn dimensions(&self) -> Option<(u32, u32)> {
        self.frame.as_ref().map(|f| f.dimensions())
    }

    fn render_frame(&self, surface: &mut RgbaImage) -> Result<()> {
        let frame = self.frame.as_ref().ok_or(FaceGenError::NotReady)?;
        surface.copy_from_slice(frame.as_raw());
        Ok(())
    }

    fn release(&mut self) {
        self.frame = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    struct PendingSource {
        started: bool,
    }

    impl FrameSource for PendingSource {
        fn dimensions(&self) -> Option<(u32, u32)> {
            None
        }

        fn render_frame(&self, _surface: &mut RgbaImage) -> Result<()> {
            Err(FaceGenError::NotReady)
        }

        fn release(&mut self) {
            self.started = false;
        }
    }

    fn test_frame(width: u32, height: u32) -> DynamicImage {
        let mut frame = RgbaImage::new(width, height);
        for (x, y, pixel) in frame.enumerate_pixels_mut() {
            *pixel = Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255]);
        }
        DynamicImage::ImageRgba8(frame)
    }

    #[test]
    fn test_capture_before_first_frame_fails_not_ready() {
        let mut source = PendingSource { started: true };
        match capture(&mut source) {
            Err(FaceGenError::NotReady) => {}
            other => panic!("expected NotReady, got {:?}", other),
        }
        // Not released on failure.
        assert!(source.started);
    }

    #[test]
    fn test_capture_matches_source_dimensions() {
        let mut source = StillFrameSource::new(test_frame(640, 480));
        let captured = capture(&mut source).unwrap();
        assert_eq!(captured.width(), 640);
        assert_eq!(captured.height(), 480);
        assert!(!captured.as_bytes().is_empty());
    }

    #[test]
    fn test_capture_releases_source_on_success() {
        let mut source = StillFrameSource::new(test_frame(4, 4));
        capture(&mut source).unwrap();
        assert!(source.dimensions().is_none());
        match capture(&mut source) {
            Err(FaceGenError::NotReady) => {}
            other => panic!("expected NotReady after release, got {:?}", other),
        }
    }

    #[test]
    fn test_capture_output_is_png() {
        let mut source = StillFrameSource::new(test_frame(8, 8));
        let captured = capture(&mut source).unwrap();
        assert!(captured
            .as_bytes()
            .starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]));
    }

    #[test]
    fn test_capture_frame_is_pixel_exact() {
        let frame = test_frame(16, 16);
        let mut source = StillFrameSource::new(frame.clone());
        let captured = capture(&mut source).unwrap();
        let decoded = image::load_from_memory(captured.as_bytes()).unwrap();
        assert_eq!(decoded.to_rgba8().as_raw(), frame.to_rgba8().as_raw());
    }
}
