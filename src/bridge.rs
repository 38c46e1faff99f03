//! Speech output backed by the webview's speech synthesis.
//!
//! Each utterance goes out as a `speak` event tagged with a fresh id; the
//! webview answers through the `speech_finished` command once the utterance
//! ends or errors.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tauri::{AppHandle, Emitter};
use tokio::sync::oneshot;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::narration::{SpeechError, SpeechOutput, Utterance};

pub const SPEAK_EVENT: &str = "speak";
pub const CANCEL_EVENT: &str = "speech-cancel";

type Pending = HashMap<String, oneshot::Sender<Result<(), SpeechError>>>;

#[derive(Serialize, Clone)]
struct SpeakPayload<'a> {
    id: &'a str,
    text: &'a str,
    rate: f32,
}

pub struct WebviewSpeech {
    app: AppHandle,
    pending: Mutex<Pending>,
}

impl WebviewSpeech {
    pub fn new(app: AppHandle) -> Self {
        Self {
            app,
            pending: Mutex::new(HashMap::new()),
        }
    }

    fn pending(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolves the utterance `id`. `error` is the Web Speech error code, if
    /// any. Unknown ids (already cancelled) are ignored.
    pub fn finish(&self, id: &str, error: Option<&str>) {
        let Some(tx) = self.pending().remove(id) else {
            debug!(id, "late speech callback ignored");
            return;
        };
        let result = match error {
            None => Ok(()),
            Some(code) => Err(SpeechError::from_code(code)),
        };
        let _ = tx.send(result);
    }
}

#[async_trait]
impl SpeechOutput for WebviewSpeech {
    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        let id = Uuid::new_v4().to_string();
        let (tx, rx) = oneshot::channel();
        self.pending().insert(id.clone(), tx);

        let payload = SpeakPayload {
            id: &id,
            text: &utterance.text,
            rate: utterance.rate,
        };
        if let Err(e) = self.app.emit(SPEAK_EVENT, payload) {
            self.pending().remove(&id);
            return Err(SpeechError::Unavailable(e.to_string()));
        }

        rx.await.unwrap_or(Err(SpeechError::Interrupted))
    }

    fn cancel(&self) {
        if let Err(e) = self.app.emit(CANCEL_EVENT, ()) {
            warn!(error = %e, "failed to signal speech cancel");
        }
        for (_, tx) in self.pending().drain() {
            let _ = tx.send(Err(SpeechError::Interrupted));
        }
    }
}
