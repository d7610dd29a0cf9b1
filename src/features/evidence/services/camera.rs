use async_trait::async_trait;
use image::{ImageFormat, RgbImage};
use std::io::Cursor;
use thiserror::Error;

/// Which physical camera to bind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraFacing {
    User,
    Environment,
}

/// Constraints for the live camera feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraConstraints {
    pub width: u32,
    pub height: u32,
    pub facing: CameraFacing,
}

impl Default for CameraConstraints {
    // Rear camera at 720p
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            facing: CameraFacing::Environment,
        }
    }
}

/// One uncompressed RGB8 frame grabbed from the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("Camera unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid frame: expected {expected} bytes for {width}x{height}, got {actual}")]
    InvalidFrame {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to encode frame: {0}")]
    Encode(String),
}

/// Live camera capability
#[async_trait]
pub trait CameraProvider: Send + Sync {
    async fn grab_frame(&self, constraints: &CameraConstraints) -> Result<RawFrame, CameraError>;
}

/// Encode a frame as JPEG on the blocking pool
pub async fn encode_jpeg(frame: RawFrame) -> Result<Vec<u8>, CameraError> {
    tokio::task::spawn_blocking(move || encode_jpeg_blocking(frame))
        .await
        .map_err(|e| CameraError::Encode(format!("encoder task failed: {}", e)))?
}

fn encode_jpeg_blocking(frame: RawFrame) -> Result<Vec<u8>, CameraError> {
    let expected = frame.width as usize * frame.height as usize * 3;
    let actual = frame.pixels.len();
    let (width, height) = (frame.width, frame.height);

    let image = RgbImage::from_raw(width, height, frame.pixels).ok_or(
        CameraError::InvalidFrame {
            width,
            height,
            expected,
            actual,
        },
    )?;

    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Jpeg)
        .map_err(|e| CameraError::Encode(e.to_string()))?;

    Ok(buffer.into_inner())
}
