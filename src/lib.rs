// Learn more about Tauri commands at https://tauri.app/develop/calling-rust/

pub mod app;
pub mod camera;
pub mod config;
pub mod guide;
pub mod llm;
pub mod narration;
pub mod telemetry;

#[cfg(feature = "desktop")]
mod bridge;
#[cfg(feature = "desktop")]
mod commands;

#[cfg(feature = "desktop")]
pub use desktop::run;

#[cfg(feature = "desktop")]
mod desktop {
    use anyhow::Context;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use tauri::{AppHandle, Manager};
    use tracing::info;

    use crate::app::App;
    use crate::bridge::WebviewSpeech;
    use crate::commands::*;
    use crate::config::Config;
    use crate::llm::GeminiClient;
    use crate::telemetry;

    /// Optional TOML file layered under the environment.
    const CONFIG_FILE_VAR: &str = "CONFIG_FILE";

    fn build_state(handle: &AppHandle) -> anyhow::Result<(App, Arc<WebviewSpeech>)> {
        let path = std::env::var(CONFIG_FILE_VAR).ok().map(PathBuf::from);
        let config = Config::load(path.as_deref()).context("failed to load configuration")?;
        let client =
            Arc::new(GeminiClient::new(&config).context("failed to build the Gemini client")?);
        let speech = Arc::new(WebviewSpeech::new(handle.clone()));
        info!(model = %config.model, "generation client ready");

        let app = App::new(client.clone(), client, speech.clone(), config.speech_rate);
        Ok((app, speech))
    }

    #[cfg_attr(mobile, tauri::mobile_entry_point)]
    pub fn run() {
        telemetry::init_tracing(telemetry::DEFAULT_LOG_LEVEL);

        tauri::Builder::default()
            .plugin(tauri_plugin_opener::init())
            .setup(|app| {
                let (state, speech) = build_state(app.handle())?;
                app.manage(Mutex::new(state));
                app.manage(speech);
                Ok(())
            })
            .invoke_handler(tauri::generate_handler![
                app_view,
                select_method,
                select_difficulty,
                start_learning,
                back_to_selection,
                next_stage,
                previous_stage,
                toggle_narration,
                speech_finished,
                open_camera,
                close_camera,
                camera_started,
                camera_failed,
                record_capture,
                reset_camera,
                solve_cube
            ])
            .run(tauri::generate_context!())
            .expect("error while running tauri application");
    }
}
