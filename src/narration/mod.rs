//! Stage narration over an injected speech-output capability.

pub mod sequencer;
pub mod speech;
pub mod utterance;

pub use sequencer::{Narration, NarrationOutcome, NarrationState, Narrator};
pub use speech::{SpeechError, SpeechOutput, Utterance};
pub use utterance::{spoken_text, utterances_for};

#[cfg(test)]
pub(crate) mod tests;
