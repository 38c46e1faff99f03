use async_trait::async_trait;
use thiserror::Error;

use super::image::FaceImage;

pub const CAMERA_ERROR_MESSAGE: &str =
    "Could not access the camera. Please check permissions and try again.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraAccessError {
    #[error("Camera permission denied")]
    PermissionDenied,
    #[error("Camera unavailable: {0}")]
    Unavailable(String),
    #[error("Capture failed: {0}")]
    CaptureFailed(String),
}

impl CameraAccessError {
    /// Maps the `DOMException.name` raised by `getUserMedia`.
    pub fn from_dom_error(name: &str) -> Self {
        match name {
            "NotAllowedError" | "SecurityError" => CameraAccessError::PermissionDenied,
            other => CameraAccessError::Unavailable(other.to_string()),
        }
    }

    pub fn user_message(&self) -> &'static str {
        CAMERA_ERROR_MESSAGE
    }
}

/// A live video source that can grab one still per call.
#[async_trait]
pub trait CameraDevice: Send + Sync {
    async fn start(&self) -> Result<(), CameraAccessError>;

    async fn capture(&self) -> Result<FaceImage, CameraAccessError>;

    /// Releases the stream. Safe to call when already stopped.
    fn stop(&self);
}
