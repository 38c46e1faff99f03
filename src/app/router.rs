//! Top-level view routing: Selection → Learning ⇄ Camera, with Selection
//! reachable from anywhere.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::camera::CameraSolver;
use crate::guide::{ContentBlock, Difficulty, LearningMethod};
use crate::llm::{GenerationError, GuideService, SolveService};
use crate::narration::{Narration, SpeechOutput};

use super::learning::LearningSession;
use super::view::{AppView, CameraView};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Selection,
    Learning,
    Camera,
}

/// The choice captured when a guide request goes out. Later selection changes
/// do not affect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideRequest {
    pub method: LearningMethod,
    pub difficulty: Difficulty,
}

pub struct App {
    view: View,
    method: LearningMethod,
    difficulty: Difficulty,
    is_loading: bool,
    error: Option<String>,
    guides: Arc<dyn GuideService>,
    learning: LearningSession,
    camera: CameraSolver,
}

impl App {
    pub fn new(
        guides: Arc<dyn GuideService>,
        solver: Arc<dyn SolveService>,
        speech: Arc<dyn SpeechOutput>,
        speech_rate: f32,
    ) -> Self {
        Self {
            view: View::Selection,
            method: LearningMethod::default(),
            difficulty: Difficulty::default(),
            is_loading: false,
            error: None,
            guides,
            learning: LearningSession::new(speech, speech_rate),
            camera: CameraSolver::new(solver),
        }
    }

    pub fn select_method(&mut self, method: LearningMethod) {
        self.method = method;
    }

    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Marks a guide request as in flight. `None` while one is already
    /// pending or outside the selection screen.
    pub fn begin_guide_request(&mut self) -> Option<GuideRequest> {
        if self.is_loading || self.view != View::Selection {
            return None;
        }
        self.is_loading = true;
        self.error = None;
        self.learning.clear();
        Some(GuideRequest {
            method: self.method,
            difficulty: self.difficulty,
        })
    }

    pub fn finish_guide_request(&mut self, result: Result<Vec<ContentBlock>, GenerationError>) {
        self.is_loading = false;
        match result {
            Ok(blocks) => {
                info!(blocks = blocks.len(), "guide ready");
                self.learning.load(blocks);
                self.view = View::Learning;
            }
            Err(err) => {
                warn!(error = %err, "guide request failed");
                self.error = Some(err.user_message().to_string());
            }
        }
    }

    /// Fetches a guide for the current selection and enters the learning view
    /// on success. Returns whether a request was issued.
    pub async fn start_learning(&mut self) -> bool {
        let Some(request) = self.begin_guide_request() else {
            return false;
        };
        let guides = self.guide_service();
        let result = guides
            .request_guide(request.method, request.difficulty)
            .await;
        self.finish_guide_request(result);
        true
    }

    pub fn guide_service(&self) -> Arc<dyn GuideService> {
        Arc::clone(&self.guides)
    }

    /* ---------- learning ---------- */

    /// Next stage. Does nothing outside the learning view.
    pub fn next_stage(&mut self) -> bool {
        self.view == View::Learning && self.learning.next()
    }

    /// Previous stage. Does nothing outside the learning view.
    pub fn previous_stage(&mut self) -> bool {
        self.view == View::Learning && self.learning.previous()
    }

    /// Starts or stops narration of the visible stage. Narration only ever
    /// starts on the learning view.
    pub fn toggle_narration(&self) -> Option<Narration> {
        if self.view != View::Learning {
            self.learning.stop_narration();
            return None;
        }
        self.learning.toggle_narration()
    }

    /* ---------- camera ---------- */

    /// Learning → Camera. Each visit is a new capture session.
    pub fn open_camera(&mut self) -> bool {
        if self.view != View::Learning {
            return false;
        }
        self.learning.stop_narration();
        self.camera.reset();
        self.view = View::Camera;
        true
    }

    /// Camera → Learning. The guide is left as it was.
    pub fn close_camera(&mut self) -> bool {
        if self.view != View::Camera {
            return false;
        }
        self.camera.reset();
        self.view = View::Learning;
        true
    }

    pub fn back_to_selection(&mut self) {
        self.learning.clear();
        self.camera.reset();
        self.error = None;
        self.view = View::Selection;
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn method(&self) -> LearningMethod {
        self.method
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn learning(&self) -> &LearningSession {
        &self.learning
    }

    pub fn learning_mut(&mut self) -> &mut LearningSession {
        &mut self.learning
    }

    pub fn camera(&self) -> &CameraSolver {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraSolver {
        &mut self.camera
    }

    pub fn snapshot(&self) -> AppView {
        AppView {
            view: self.view,
            method: self.method,
            method_label: self.method.label().to_string(),
            difficulty: self.difficulty,
            is_loading: self.is_loading,
            error: self.error.clone(),
            learning: match self.view {
                View::Learning => Some(self.learning.view(self.method)),
                _ => None,
            },
            camera: match self.view {
                View::Camera => Some(CameraView::of(&self.camera)),
                _ => None,
            },
        }
    }
}
