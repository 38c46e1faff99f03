//! Guide content: the block model, stage segmentation and the stage cursor.

pub mod block;
pub mod pager;
pub mod selection;
pub mod stage;

pub use block::{BlockKind, ContentBlock};
pub use pager::{StagePager, StagePosition};
pub use selection::{Difficulty, LearningMethod, Selector};
pub use stage::{segment, Stage, INTRODUCTION_TITLE};

#[cfg(test)]
mod tests;
