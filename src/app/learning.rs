//! The learning screen: paged guide plus narration of the visible stage.

use std::sync::Arc;
use tracing::debug;

use crate::guide::{segment, ContentBlock, LearningMethod, Stage, StagePager};
use crate::narration::{Narration, Narrator, SpeechOutput};

use super::view::LearningView;

pub struct LearningSession {
    blocks: Vec<ContentBlock>,
    pager: StagePager,
    narrator: Narrator,
}

impl LearningSession {
    pub fn new(speech: Arc<dyn SpeechOutput>, speech_rate: f32) -> Self {
        Self {
            blocks: Vec::new(),
            pager: StagePager::default(),
            narrator: Narrator::new(speech, speech_rate),
        }
    }

    /// Replaces the guide wholesale and returns to the first stage.
    pub fn load(&mut self, blocks: Vec<ContentBlock>) {
        self.narrator.cancel();
        self.pager = StagePager::new(segment(&blocks));
        self.blocks = blocks;
        debug!(blocks = self.blocks.len(), stages = self.pager.len(), "guide loaded");
    }

    pub fn clear(&mut self) {
        self.load(Vec::new());
    }

    /// Moves forward if possible. Narration stops either way.
    pub fn next(&mut self) -> bool {
        self.narrator.cancel();
        self.pager.next()
    }

    /// Moves back if possible. Narration stops either way.
    pub fn previous(&mut self) -> bool {
        self.narrator.cancel();
        self.pager.previous()
    }

    pub fn toggle_narration(&self) -> Option<Narration> {
        self.narrator.toggle(self.pager.current())
    }

    pub fn stop_narration(&self) {
        self.narrator.cancel();
    }

    pub fn is_narrating(&self) -> bool {
        self.narrator.is_speaking()
    }

    pub fn current(&self) -> Option<&Stage> {
        self.pager.current()
    }

    pub fn pager(&self) -> &StagePager {
        &self.pager
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn view(&self, method: LearningMethod) -> LearningView {
        let stage = self.pager.current();
        LearningView {
            method_label: method.label().to_string(),
            stage_title: stage.map(|s| s.title.clone()),
            blocks: stage
                .map(|s| s.blocks.iter().filter(|b| b.is_visible()).cloned().collect())
                .unwrap_or_default(),
            position: self.pager.position(),
            position_label: self.pager.position().map(|p| p.to_string()),
            can_previous: self.pager.has_previous(),
            can_next: self.pager.has_next(),
            narration: self.narrator.state(),
        }
    }
}
