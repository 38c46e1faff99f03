use super::*;
use crate::guide::{segment, ContentBlock, Stage};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// Completes every utterance after a yield, optionally failing one of them.
#[derive(Default)]
pub(crate) struct ScriptedSpeech {
    spoken: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    cancels: AtomicUsize,
    fail_at: Option<(usize, SpeechError)>,
}

impl ScriptedSpeech {
    pub(crate) fn failing_at(index: usize, err: SpeechError) -> Self {
        Self {
            fail_at: Some((index, err)),
            ..Default::default()
        }
    }

    pub(crate) fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }

    pub(crate) fn cancels(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechOutput for ScriptedSpeech {
    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let index = {
            let mut spoken = self.spoken.lock().unwrap();
            spoken.push(utterance.text.clone());
            spoken.len() - 1
        };
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match &self.fail_at {
            Some((at, err)) if *at == index => Err(err.clone()),
            _ => Ok(()),
        }
    }

    fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
    }
}

/// Holds every utterance until the test resolves it. `cancel` only records
/// the call, so the "interrupted" signal arrives whenever the test sends it.
#[derive(Default)]
pub(crate) struct ManualSpeech {
    pending: Mutex<VecDeque<(String, oneshot::Sender<Result<(), SpeechError>>)>>,
    cancels: AtomicUsize,
}

impl ManualSpeech {
    pub(crate) fn pending_texts(&self) -> Vec<String> {
        self.pending
            .lock()
            .unwrap()
            .iter()
            .map(|(text, _)| text.clone())
            .collect()
    }

    pub(crate) fn resolve_next(&self, result: Result<(), SpeechError>) {
        let (_, tx) = self
            .pending
            .lock()
            .unwrap()
            .pop_front()
            .expect("no utterance in flight");
        let _ = tx.send(result);
    }

    pub(crate) fn cancels(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechOutput for ManualSpeech {
    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        let (tx, rx) = oneshot::channel();
        self.pending
            .lock()
            .unwrap()
            .push_back((utterance.text.clone(), tx));
        rx.await.unwrap_or(Err(SpeechError::Interrupted))
    }

    fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
    }
}

pub(crate) async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

fn lesson() -> Stage {
    segment(&[
        ContentBlock::heading("Intro"),
        ContentBlock::paragraph("hello"),
        ContentBlock::algorithm("R U R'"),
        ContentBlock::algorithm("n/a"),
    ])
    .remove(0)
}

#[test]
fn utterances_spell_out_algorithms() {
    let texts: Vec<String> = utterances_for(&lesson(), 1.0)
        .into_iter()
        .map(|u| u.text)
        .collect();
    assert_eq!(texts, vec!["Intro", "hello", "Algorithm: R   U   R '"]);
}

#[test]
fn utterances_skip_blank_text() {
    assert_eq!(spoken_text(&ContentBlock::paragraph("   ")), None);
    assert_eq!(spoken_text(&ContentBlock::algorithm("")), None);
    assert_eq!(spoken_text(&ContentBlock::algorithm("N/A")), None);
    assert_eq!(
        spoken_text(&ContentBlock::algorithm("F2")),
        Some("Algorithm: F 2".to_string())
    );
}

#[test]
fn utterances_carry_rate() {
    let utterances = utterances_for(&lesson(), 1.25);
    assert!(utterances.iter().all(|u| (u.rate - 1.25).abs() < f32::EPSILON));
}

#[test]
fn speech_error_codes() {
    assert!(SpeechError::from_code("interrupted").is_interrupted());
    assert!(SpeechError::from_code("canceled").is_interrupted());
    assert_eq!(
        SpeechError::from_code("audio-busy"),
        SpeechError::Unavailable("audio-busy".into())
    );
    assert_eq!(
        SpeechError::from_code("weird"),
        SpeechError::Synthesis("weird".into())
    );
}

#[tokio::test]
async fn narration_speaks_in_order_one_at_a_time() {
    let speech = Arc::new(ScriptedSpeech::default());
    let narrator = Narrator::new(speech.clone(), 1.0);

    let run = narrator.start(Some(&lesson())).expect("stage has speech");
    assert!(narrator.is_speaking());

    assert_eq!(run.await, NarrationOutcome::Finished);
    assert_eq!(speech.spoken(), vec!["Intro", "hello", "Algorithm: R   U   R '"]);
    assert_eq!(speech.max_in_flight.load(Ordering::SeqCst), 1);
    assert_eq!(narrator.state(), NarrationState::Idle);
}

#[tokio::test]
async fn narration_waits_for_each_completion() {
    let speech = Arc::new(ManualSpeech::default());
    let narrator = Narrator::new(speech.clone(), 1.0);
    let handle = tokio::spawn(narrator.start(Some(&lesson())).unwrap());

    settle().await;
    assert_eq!(speech.pending_texts(), vec!["Intro"]);
    assert_eq!(narrator.state(), NarrationState::Speaking { index: 0, total: 3 });

    speech.resolve_next(Ok(()));
    settle().await;
    assert_eq!(speech.pending_texts(), vec!["hello"]);
    assert_eq!(narrator.state(), NarrationState::Speaking { index: 1, total: 3 });

    speech.resolve_next(Ok(()));
    settle().await;
    assert_eq!(speech.pending_texts(), vec!["Algorithm: R   U   R '"]);

    speech.resolve_next(Ok(()));
    assert_eq!(handle.await.unwrap(), NarrationOutcome::Finished);
    assert!(!narrator.is_speaking());
}

#[tokio::test]
async fn cancel_is_immediate_and_late_interrupt_is_swallowed() {
    let speech = Arc::new(ManualSpeech::default());
    let narrator = Narrator::new(speech.clone(), 1.0);
    let handle = tokio::spawn(narrator.start(Some(&lesson())).unwrap());

    settle().await;
    speech.resolve_next(Ok(()));
    settle().await;
    assert_eq!(narrator.state(), NarrationState::Speaking { index: 1, total: 3 });

    narrator.cancel();
    assert!(!narrator.is_speaking());
    assert_eq!(speech.cancels(), 1);

    // The device reports the interruption only now.
    speech.resolve_next(Err(SpeechError::Interrupted));
    assert_eq!(handle.await.unwrap(), NarrationOutcome::Cancelled);
    assert_eq!(narrator.state(), NarrationState::Idle);
    assert!(speech.pending_texts().is_empty());
}

#[tokio::test]
async fn late_completion_after_cancel_does_not_continue() {
    let speech = Arc::new(ManualSpeech::default());
    let narrator = Narrator::new(speech.clone(), 1.0);
    let handle = tokio::spawn(narrator.start(Some(&lesson())).unwrap());

    settle().await;
    narrator.cancel();
    speech.resolve_next(Ok(()));

    assert_eq!(handle.await.unwrap(), NarrationOutcome::Cancelled);
    settle().await;
    assert!(speech.pending_texts().is_empty());
}

#[tokio::test]
async fn stale_run_cannot_touch_a_new_run() {
    let speech = Arc::new(ManualSpeech::default());
    let narrator = Narrator::new(speech.clone(), 1.0);
    let first = tokio::spawn(narrator.start(Some(&lesson())).unwrap());
    settle().await;

    narrator.cancel();
    let second = tokio::spawn(narrator.start(Some(&lesson())).unwrap());
    settle().await;
    assert_eq!(speech.pending_texts(), vec!["Intro", "Intro"]);

    // Old run hears its interrupt; the new run keeps speaking.
    speech.resolve_next(Err(SpeechError::Interrupted));
    assert_eq!(first.await.unwrap(), NarrationOutcome::Cancelled);
    assert_eq!(narrator.state(), NarrationState::Speaking { index: 0, total: 3 });

    narrator.cancel();
    speech.resolve_next(Err(SpeechError::Interrupted));
    assert_eq!(second.await.unwrap(), NarrationOutcome::Cancelled);
}

#[tokio::test]
async fn synthesis_error_stops_narration() {
    let speech = Arc::new(ScriptedSpeech::failing_at(
        1,
        SpeechError::Synthesis("voice crashed".into()),
    ));
    let narrator = Narrator::new(speech.clone(), 1.0);

    let outcome = narrator.start(Some(&lesson())).unwrap().await;
    assert_eq!(
        outcome,
        NarrationOutcome::Failed(SpeechError::Synthesis("voice crashed".into()))
    );
    assert_eq!(speech.spoken(), vec!["Intro", "hello"]);
    assert!(!narrator.is_speaking());
}

#[tokio::test]
async fn unprompted_interrupt_ends_quietly() {
    let speech = Arc::new(ScriptedSpeech::failing_at(0, SpeechError::Interrupted));
    let narrator = Narrator::new(speech.clone(), 1.0);

    let outcome = narrator.start(Some(&lesson())).unwrap().await;
    assert_eq!(outcome, NarrationOutcome::Cancelled);
    assert!(!narrator.is_speaking());
}

#[tokio::test]
async fn start_refuses_while_speaking_and_toggle_stops() {
    let speech = Arc::new(ManualSpeech::default());
    let narrator = Narrator::new(speech.clone(), 1.0);
    let handle = tokio::spawn(narrator.start(Some(&lesson())).unwrap());
    settle().await;

    assert!(narrator.start(Some(&lesson())).is_none());
    assert!(narrator.toggle(Some(&lesson())).is_none());
    assert!(!narrator.is_speaking());
    assert_eq!(speech.cancels(), 1);

    speech.resolve_next(Err(SpeechError::Interrupted));
    assert_eq!(handle.await.unwrap(), NarrationOutcome::Cancelled);
}

#[test]
fn nothing_speakable_is_a_no_op() {
    let speech = Arc::new(ScriptedSpeech::default());
    let narrator = Narrator::new(speech.clone(), 1.0);
    let silent = Stage {
        title: "Introduction".into(),
        blocks: vec![ContentBlock::algorithm("N/A")],
    };

    assert!(narrator.start(Some(&silent)).is_none());
    assert!(narrator.toggle(None).is_none());
    assert_eq!(narrator.state(), NarrationState::Idle);
    assert!(speech.spoken().is_empty());
}

#[tokio::test]
async fn dropping_the_narrator_stops_speech() {
    let speech = Arc::new(ManualSpeech::default());
    let narrator = Narrator::new(speech.clone(), 1.0);
    let handle = tokio::spawn(narrator.start(Some(&lesson())).unwrap());
    settle().await;

    drop(narrator);
    assert_eq!(speech.cancels(), 1);
    speech.resolve_next(Err(SpeechError::Interrupted));
    assert_eq!(handle.await.unwrap(), NarrationOutcome::Cancelled);
}

#[test]
fn cancel_when_idle_does_not_touch_the_device() {
    let speech = Arc::new(ScriptedSpeech::default());
    let narrator = Narrator::new(speech.clone(), 1.0);
    narrator.cancel();
    assert_eq!(speech.cancels(), 0);
}

#[test]
fn narration_future_parks_on_the_device() {
    let speech = Arc::new(ManualSpeech::default());
    let narrator = Narrator::new(speech.clone(), 1.0);
    let mut run = tokio_test::task::spawn(narrator.start(Some(&lesson())).unwrap());

    tokio_test::assert_pending!(run.poll());
    assert_eq!(speech.pending_texts(), vec!["Intro"]);

    speech.resolve_next(Ok(()));
    assert!(run.is_woken());
    tokio_test::assert_pending!(run.poll());
    assert_eq!(speech.pending_texts(), vec!["hello"]);

    narrator.cancel();
    speech.resolve_next(Err(SpeechError::Interrupted));
    assert_eq!(tokio_test::assert_ready!(run.poll()), NarrationOutcome::Cancelled);
}
