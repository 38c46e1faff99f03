//! Still images of cube faces, carried as base64 the way the model expects them.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use thiserror::Error;

use super::face::{CubeFace, FACE_COUNT};

pub const JPEG_MIME: &str = "image/jpeg";

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Not a data URL")]
    NotDataUrl,
    #[error("Data URL is not base64 encoded")]
    NotBase64,
    #[error("Image payload is empty")]
    Empty,
    #[error("Invalid base64 payload: {0}")]
    InvalidPayload(#[from] base64::DecodeError),
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FaceImage {
    pub mime_type: String,
    /// Base64, standard alphabet, no data-URL prefix.
    pub data: String,
}

impl FaceImage {
    pub fn from_jpeg(bytes: &[u8]) -> Result<Self, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        Ok(Self {
            mime_type: JPEG_MIME.to_string(),
            data: STANDARD.encode(bytes),
        })
    }

    /// Parses `data:<mime>;base64,<payload>` as produced by a canvas capture.
    pub fn from_data_url(url: &str) -> Result<Self, ImageError> {
        let rest = url.trim().strip_prefix("data:").ok_or(ImageError::NotDataUrl)?;
        let (header, payload) = rest.split_once(',').ok_or(ImageError::NotDataUrl)?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or(ImageError::NotBase64)?;
        if payload.is_empty() {
            return Err(ImageError::Empty);
        }
        STANDARD.decode(payload)?;

        let mime_type = if mime_type.is_empty() {
            JPEG_MIME
        } else {
            mime_type
        };
        Ok(Self {
            mime_type: mime_type.to_string(),
            data: payload.to_string(),
        })
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// A complete set of six faces in capture order. Only buildable from exactly
/// six images, so a solve request cannot be issued early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceImages([FaceImage; FACE_COUNT]);

impl FaceImages {
    pub fn iter(&self) -> impl Iterator<Item = (CubeFace, &FaceImage)> {
        CubeFace::CAPTURE_ORDER.into_iter().zip(self.0.iter())
    }
}

impl TryFrom<Vec<FaceImage>> for FaceImages {
    type Error = Vec<FaceImage>;

    fn try_from(images: Vec<FaceImage>) -> Result<Self, Self::Error> {
        <[FaceImage; FACE_COUNT]>::try_from(images).map(FaceImages)
    }
}
