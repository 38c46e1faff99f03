//! Reads the blocks of one stage aloud, strictly in order, one at a time.

use futures::future::BoxFuture;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error};

use crate::guide::Stage;

use super::speech::{SpeechError, SpeechOutput, Utterance};
use super::utterance::utterances_for;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NarrationState {
    #[default]
    Idle,
    Speaking { index: usize, total: usize },
}

/// How a narration run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrationOutcome {
    Finished,
    Cancelled,
    Failed(SpeechError),
}

/// A started narration. Drive it to completion (await or spawn it); it issues
/// the next utterance only after the previous one has resolved.
pub type Narration = BoxFuture<'static, NarrationOutcome>;

#[derive(Debug, Default)]
struct Shared {
    state: NarrationState,
    // Bumped on every start and cancel; a run only writes state while its
    // generation is current.
    generation: u64,
}

pub struct Narrator {
    speech: Arc<dyn SpeechOutput>,
    shared: Arc<Mutex<Shared>>,
    rate: f32,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Narrator {
    pub fn new(speech: Arc<dyn SpeechOutput>, rate: f32) -> Self {
        Self {
            speech,
            shared: Arc::new(Mutex::new(Shared::default())),
            rate,
        }
    }

    pub fn state(&self) -> NarrationState {
        lock(&self.shared).state
    }

    pub fn is_speaking(&self) -> bool {
        matches!(self.state(), NarrationState::Speaking { .. })
    }

    /// Starts reading `stage`. Returns `None` if already speaking, if there is
    /// no stage, or if nothing in it is speakable.
    pub fn start(&self, stage: Option<&Stage>) -> Option<Narration> {
        let stage = stage?;
        let utterances = utterances_for(stage, self.rate);
        if utterances.is_empty() {
            debug!(stage = %stage.title, "nothing to narrate");
            return None;
        }

        let generation = {
            let mut shared = lock(&self.shared);
            if shared.state != NarrationState::Idle {
                return None;
            }
            shared.generation += 1;
            shared.state = NarrationState::Speaking {
                index: 0,
                total: utterances.len(),
            };
            shared.generation
        };
        debug!(stage = %stage.title, count = utterances.len(), generation, "narration started");

        Some(Box::pin(run(
            Arc::clone(&self.speech),
            Arc::clone(&self.shared),
            utterances,
            generation,
        )))
    }

    /// Stops playback. The narrator reads as idle as soon as this returns,
    /// without waiting for the device to acknowledge.
    pub fn cancel(&self) {
        let was_speaking = {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            std::mem::take(&mut shared.state) != NarrationState::Idle
        };
        if was_speaking {
            debug!("narration cancelled");
            self.speech.cancel();
        }
    }

    pub fn toggle(&self, stage: Option<&Stage>) -> Option<Narration> {
        if self.is_speaking() {
            self.cancel();
            None
        } else {
            self.start(stage)
        }
    }
}

impl Drop for Narrator {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run(
    speech: Arc<dyn SpeechOutput>,
    shared: Arc<Mutex<Shared>>,
    utterances: Vec<Utterance>,
    generation: u64,
) -> NarrationOutcome {
    let total = utterances.len();

    for (index, utterance) in utterances.iter().enumerate() {
        {
            let mut state = lock(&shared);
            if state.generation != generation {
                return NarrationOutcome::Cancelled;
            }
            state.state = NarrationState::Speaking { index, total };
        }

        let result = speech.speak(utterance).await;

        let mut state = lock(&shared);
        if state.generation != generation {
            // Late signal from a cancelled run.
            debug!(index, ?result, "ignoring completion of cancelled utterance");
            return NarrationOutcome::Cancelled;
        }
        match result {
            Ok(()) => {}
            Err(SpeechError::Interrupted) => {
                state.state = NarrationState::Idle;
                return NarrationOutcome::Cancelled;
            }
            Err(err) => {
                state.state = NarrationState::Idle;
                error!(index, error = %err, "speech synthesis error");
                return NarrationOutcome::Failed(err);
            }
        }
    }

    let mut state = lock(&shared);
    if state.generation != generation {
        return NarrationOutcome::Cancelled;
    }
    state.state = NarrationState::Idle;
    NarrationOutcome::Finished
}
