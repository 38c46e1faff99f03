//! Stage cursor. Boundaries are silent: moving past either end does nothing.

use serde::Serialize;
use std::fmt;

use super::stage::Stage;

#[derive(Debug, Clone, Default)]
pub struct StagePager {
    stages: Vec<Stage>,
    current: usize,
}

/// "Stage N of M", one-based.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagePosition {
    pub number: usize,
    pub total: usize,
}

impl fmt::Display for StagePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stage {} of {}", self.number, self.total)
    }
}

impl StagePager {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages, current: 0 }
    }

    /// Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Returns whether the cursor moved.
    pub fn previous(&mut self) -> bool {
        if self.has_previous() {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// `None` when there is no content.
    pub fn current(&self) -> Option<&Stage> {
        self.stages.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.stages.len()
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn position(&self) -> Option<StagePosition> {
        if self.stages.is_empty() {
            return None;
        }
        Some(StagePosition {
            number: self.current + 1,
            total: self.stages.len(),
        })
    }
}
