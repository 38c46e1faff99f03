//! Application state: which screen is showing and what each screen holds.

pub mod learning;
pub mod router;
pub mod view;

pub use learning::LearningSession;
pub use router::{App, GuideRequest, View};
pub use view::{AppView, CameraView, FaceSlot, LearningView};
