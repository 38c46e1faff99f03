//! Camera solver: capture the six faces, then ask the model for a solution.

pub mod device;
pub mod face;
pub mod image;
pub mod solver;

pub use device::{CameraAccessError, CameraDevice, CAMERA_ERROR_MESSAGE};
pub use face::{CubeFace, FACE_COUNT};
pub use image::{FaceImage, FaceImages, ImageError};
pub use solver::{CameraSolver, SolveRequest};
