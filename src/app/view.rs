//! Serializable snapshots handed to the webview after every command.

use serde::Serialize;

use crate::camera::{CameraSolver, CubeFace};
use crate::guide::{ContentBlock, Difficulty, LearningMethod, StagePosition};
use crate::narration::NarrationState;

use super::router::View;

const HINT_CAPTURE: &str = "Capture all 6 faces of your cube to generate a solution.";
const HINT_GENERATE: &str = "Press 'Generate Solution' to continue.";

#[derive(Serialize, Debug, Clone)]
pub struct AppView {
    pub view: View,
    pub method: LearningMethod,
    pub method_label: String,
    pub difficulty: Difficulty,
    pub is_loading: bool,
    pub error: Option<String>,
    pub learning: Option<LearningView>,
    pub camera: Option<CameraView>,
}

#[derive(Serialize, Debug, Clone)]
pub struct LearningView {
    pub method_label: String,
    /// `None` renders the "no learning content" screen.
    pub stage_title: Option<String>,
    pub blocks: Vec<ContentBlock>,
    pub position: Option<StagePosition>,
    pub position_label: Option<String>,
    pub can_previous: bool,
    pub can_next: bool,
    pub narration: NarrationState,
}

#[derive(Serialize, Debug, Clone)]
pub struct FaceSlot {
    pub label: String,
    pub is_next: bool,
    /// Data URL of the captured still.
    pub image: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct CameraView {
    pub faces: Vec<FaceSlot>,
    pub camera_on: bool,
    pub capture_label: Option<String>,
    pub can_solve: bool,
    pub is_loading: bool,
    pub solution: Vec<ContentBlock>,
    pub error: Option<String>,
    pub hint: Option<String>,
    pub reset_label: String,
}

impl CameraView {
    pub fn of(solver: &CameraSolver) -> Self {
        let next = solver.next_face();
        let faces = CubeFace::CAPTURE_ORDER
            .iter()
            .enumerate()
            .map(|(i, face)| FaceSlot {
                label: face.to_string(),
                is_next: next == Some(*face),
                image: solver.captured().get(i).map(|img| img.to_data_url()),
            })
            .collect();

        let hint = if !solver.is_loading() && solver.solution().is_empty() && solver.error().is_none()
        {
            Some(if solver.is_complete() { HINT_GENERATE } else { HINT_CAPTURE }.to_string())
        } else {
            None
        };
        let reset_label = if solver.captured().is_empty() {
            "Restart Camera"
        } else {
            "Start Over"
        };

        Self {
            faces,
            camera_on: solver.is_camera_on(),
            capture_label: next.map(|face| format!("Capture {}", face)),
            can_solve: solver.can_solve(),
            is_loading: solver.is_loading(),
            solution: solver
                .solution()
                .iter()
                .filter(|b| b.is_visible())
                .cloned()
                .collect(),
            error: solver.error().map(str::to_string),
            hint,
            reset_label: reset_label.to_string(),
        }
    }
}
