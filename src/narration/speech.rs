//! The speech-output capability the narrator drives.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    /// Playback was stopped by a caller-initiated cancel.
    #[error("speech interrupted")]
    Interrupted,
    #[error("speech output unavailable: {0}")]
    Unavailable(String),
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
}

impl SpeechError {
    /// Maps a Web Speech `SpeechSynthesisErrorEvent.error` code.
    ///
    /// `canceled` is raised for queued utterances dropped by `cancel()`, so it
    /// is folded into `Interrupted` together with `interrupted`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "interrupted" | "canceled" => SpeechError::Interrupted,
            "audio-busy" | "audio-hardware" | "network" | "synthesis-unavailable"
            | "language-unavailable" | "voice-unavailable" | "not-allowed" => {
                SpeechError::Unavailable(code.to_string())
            }
            other => SpeechError::Synthesis(other.to_string()),
        }
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, SpeechError::Interrupted)
    }
}

/// Speaks one utterance at a time.
///
/// `speak` resolves when the utterance finishes or fails. `cancel` must stop
/// playback immediately; a pending `speak` then resolves with
/// [`SpeechError::Interrupted`] whenever the device gets around to it.
#[async_trait]
pub trait SpeechOutput: Send + Sync {
    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError>;

    fn cancel(&self);
}
