//! Six-face capture session feeding the image-based solver.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::guide::{ContentBlock, LearningMethod};
use crate::llm::{SolveError, SolveService};

use super::device::{CameraAccessError, CameraDevice};
use super::face::{CubeFace, FACE_COUNT};
use super::image::{FaceImage, FaceImages};

/// Everything needed to issue one solve call. `session` ties the reply back
/// to the capture session that asked for it.
#[derive(Debug, Clone)]
pub struct SolveRequest {
    pub faces: FaceImages,
    pub method: LearningMethod,
    pub session: u64,
}

pub struct CameraSolver {
    service: Arc<dyn SolveService>,
    captures: Vec<FaceImage>,
    camera_on: bool,
    solution: Vec<ContentBlock>,
    is_loading: bool,
    error: Option<String>,
    // Bumped on every reset; replies stamped with an older value are dropped.
    session: u64,
}

impl CameraSolver {
    pub fn new(service: Arc<dyn SolveService>) -> Self {
        Self {
            service,
            captures: Vec::with_capacity(FACE_COUNT),
            camera_on: false,
            solution: Vec::new(),
            is_loading: false,
            error: None,
            session: 0,
        }
    }

    /* ---------- camera ---------- */

    pub async fn start_camera(&mut self, device: &dyn CameraDevice) {
        if self.is_complete() {
            return;
        }
        self.error = None;
        match device.start().await {
            Ok(()) => self.camera_started(),
            Err(err) => self.camera_failed(&err),
        }
    }

    pub fn camera_started(&mut self) {
        debug!("camera on");
        self.camera_on = true;
    }

    pub fn camera_failed(&mut self, err: &CameraAccessError) {
        warn!(error = %err, "camera unavailable");
        self.camera_on = false;
        self.error = Some(err.user_message().to_string());
    }

    pub fn stop_camera(&mut self, device: &dyn CameraDevice) {
        device.stop();
        self.camera_on = false;
    }

    /// Grabs the next face. Returns the face that was captured.
    pub async fn capture(&mut self, device: &dyn CameraDevice) -> Option<CubeFace> {
        if !self.camera_on || self.is_complete() {
            return None;
        }
        let image = match device.capture().await {
            Ok(image) => image,
            Err(err) => {
                self.camera_failed(&err);
                return None;
            }
        };
        let face = self.record_capture(image);
        if self.is_complete() {
            device.stop();
        }
        face
    }

    /// Stores a still taken elsewhere (e.g. in the webview). Ignored once all
    /// six faces are in.
    pub fn record_capture(&mut self, image: FaceImage) -> Option<CubeFace> {
        let face = self.next_face()?;
        self.captures.push(image);
        debug!(face = %face, captured = self.captures.len(), "face captured");
        if self.is_complete() {
            self.camera_on = false;
        }
        Some(face)
    }

    /* ---------- solving ---------- */

    pub fn can_solve(&self) -> bool {
        self.is_complete() && !self.is_loading
    }

    /// Marks the solve as in flight. `None` until six faces are captured.
    pub fn begin_solve(&mut self, method: LearningMethod) -> Option<SolveRequest> {
        if !self.can_solve() {
            return None;
        }
        let faces = FaceImages::try_from(self.captures.clone()).ok()?;
        self.is_loading = true;
        self.solution.clear();
        self.error = None;
        Some(SolveRequest {
            faces,
            method,
            session: self.session,
        })
    }

    /// Applies the reply to `session`. Returns `false` if that session has
    /// since been reset and the reply was dropped.
    pub fn finish_solve(
        &mut self,
        session: u64,
        result: Result<Vec<ContentBlock>, SolveError>,
    ) -> bool {
        if session != self.session || !self.is_loading {
            debug!(session, current = self.session, "dropping stale solve reply");
            return false;
        }
        self.is_loading = false;
        match result {
            Ok(blocks) => self.solution = blocks,
            Err(err) => {
                warn!(error = %err, "solve failed");
                self.error = Some(err.user_message().to_string());
            }
        }
        true
    }

    /// Returns whether a request was issued.
    pub async fn solve(&mut self, method: LearningMethod) -> bool {
        let Some(request) = self.begin_solve(method) else {
            return false;
        };
        let service = Arc::clone(&self.service);
        let result = service.request_solution(&request.faces, request.method).await;
        self.finish_solve(request.session, result);
        true
    }

    pub fn service(&self) -> Arc<dyn SolveService> {
        Arc::clone(&self.service)
    }

    /// Starts a new capture session: drops captures, solution and error, and
    /// orphans any solve still in flight. The caller restarts the camera.
    pub fn reset(&mut self) {
        self.session += 1;
        self.captures.clear();
        self.solution.clear();
        self.error = None;
        self.is_loading = false;
        self.camera_on = false;
    }

    /* ---------- state ---------- */

    pub fn next_face(&self) -> Option<CubeFace> {
        CubeFace::at(self.captures.len())
    }

    pub fn captured(&self) -> &[FaceImage] {
        &self.captures
    }

    pub fn is_complete(&self) -> bool {
        self.captures.len() == FACE_COUNT
    }

    pub fn is_camera_on(&self) -> bool {
        self.camera_on
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn solution(&self) -> &[ContentBlock] {
        &self.solution
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
