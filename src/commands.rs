use std::sync::{Arc, Mutex, MutexGuard};
use tauri::{command, AppHandle, Emitter, State};
use tracing::error;

use crate::app::{App, AppView};
use crate::bridge::WebviewSpeech;
use crate::camera::{CameraAccessError, FaceImage};
use crate::guide::{Difficulty, LearningMethod, Selector};
use crate::narration::NarrationOutcome;

pub const NARRATION_EVENT: &str = "narration-ended";

type AppState<'a> = State<'a, Mutex<App>>;

fn lock<'a>(state: &'a Mutex<App>) -> Result<MutexGuard<'a, App>, String> {
    state.lock().map_err(|e| e.to_string())
}

/// Applies `f` and returns the resulting view.
fn update(state: &Mutex<App>, f: impl FnOnce(&mut App)) -> Result<AppView, String> {
    let mut app = lock(state)?;
    f(&mut app);
    Ok(app.snapshot())
}

/* ---------- 1.  SELECTION ---------- */

#[command]
pub fn app_view(state: AppState<'_>) -> Result<AppView, String> {
    Ok(lock(&state)?.snapshot())
}

#[command]
pub fn select_method(method: Selector, state: AppState<'_>) -> Result<AppView, String> {
    let method = LearningMethod::from_selector(&method)?;
    update(&state, |app| app.select_method(method))
}

#[command]
pub fn select_difficulty(difficulty: Selector, state: AppState<'_>) -> Result<AppView, String> {
    let difficulty = Difficulty::from_selector(&difficulty)?;
    update(&state, |app| app.select_difficulty(difficulty))
}

#[command]
pub async fn start_learning(state: AppState<'_>) -> Result<AppView, String> {
    let (request, guides) = {
        let mut app = lock(&state)?;
        match app.begin_guide_request() {
            Some(request) => (request, app.guide_service()),
            None => return Ok(app.snapshot()),
        }
    };

    let result = guides
        .request_guide(request.method, request.difficulty)
        .await;

    update(&state, |app| app.finish_guide_request(result))
}

#[command]
pub fn back_to_selection(state: AppState<'_>) -> Result<AppView, String> {
    update(&state, App::back_to_selection)
}

/* ---------- 2.  LEARNING ---------- */

#[command]
pub fn next_stage(state: AppState<'_>) -> Result<AppView, String> {
    update(&state, |app| {
        app.next_stage();
    })
}

#[command]
pub fn previous_stage(state: AppState<'_>) -> Result<AppView, String> {
    update(&state, |app| {
        app.previous_stage();
    })
}

#[command]
pub fn toggle_narration(handle: AppHandle, state: AppState<'_>) -> Result<AppView, String> {
    let (run, view) = {
        let app = lock(&state)?;
        (app.toggle_narration(), app.snapshot())
    };

    if let Some(run) = run {
        tauri::async_runtime::spawn(async move {
            let outcome = match run.await {
                NarrationOutcome::Finished => "finished",
                NarrationOutcome::Cancelled => "cancelled",
                NarrationOutcome::Failed(e) => {
                    error!(error = %e, "narration failed");
                    "failed"
                }
            };
            if let Err(e) = handle.emit(NARRATION_EVENT, outcome) {
                error!(error = %e, "failed to emit narration outcome");
            }
        });
    }
    Ok(view)
}

#[command]
pub fn speech_finished(
    id: String,
    error: Option<String>,
    speech: State<'_, Arc<WebviewSpeech>>,
) -> Result<(), String> {
    speech.finish(&id, error.as_deref());
    Ok(())
}

/* ---------- 3.  CAMERA ---------- */

#[command]
pub fn open_camera(state: AppState<'_>) -> Result<AppView, String> {
    update(&state, |app| {
        app.open_camera();
    })
}

#[command]
pub fn close_camera(state: AppState<'_>) -> Result<AppView, String> {
    update(&state, |app| {
        app.close_camera();
    })
}

#[command]
pub fn camera_started(state: AppState<'_>) -> Result<AppView, String> {
    update(&state, |app| app.camera_mut().camera_started())
}

/// `name` is the `DOMException.name` from `getUserMedia`.
#[command]
pub fn camera_failed(name: String, state: AppState<'_>) -> Result<AppView, String> {
    let err = CameraAccessError::from_dom_error(&name);
    update(&state, |app| app.camera_mut().camera_failed(&err))
}

#[command]
pub fn record_capture(data_url: String, state: AppState<'_>) -> Result<AppView, String> {
    let image = FaceImage::from_data_url(&data_url).map_err(|e| e.to_string())?;
    update(&state, |app| {
        app.camera_mut().record_capture(image);
    })
}

#[command]
pub fn reset_camera(state: AppState<'_>) -> Result<AppView, String> {
    update(&state, |app| app.camera_mut().reset())
}

#[command]
pub async fn solve_cube(state: AppState<'_>) -> Result<AppView, String> {
    let (request, service) = {
        let mut app = lock(&state)?;
        let method = app.method();
        match app.camera_mut().begin_solve(method) {
            Some(request) => (request, app.camera().service()),
            None => return Ok(app.snapshot()),
        }
    };

    let result = service
        .request_solution(&request.faces, request.method)
        .await;

    update(&state, |app| {
        app.camera_mut().finish_solve(request.session, result);
    })
}
