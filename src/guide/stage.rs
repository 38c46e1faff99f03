//! Splits a flat guide into stages, one per top-level heading.

use serde::Serialize;

use super::block::ContentBlock;

/// Title given to blocks that appear before the first heading.
pub const INTRODUCTION_TITLE: &str = "Introduction";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub title: String,
    pub blocks: Vec<ContentBlock>,
}

impl Stage {
    fn opened_by(heading: &ContentBlock) -> Self {
        Self {
            title: heading.text.clone(),
            blocks: vec![heading.clone()],
        }
    }

    fn introduction() -> Self {
        Self {
            title: INTRODUCTION_TITLE.to_string(),
            blocks: Vec::new(),
        }
    }
}

pub fn segment(blocks: &[ContentBlock]) -> Vec<Stage> {
    let mut stages = Vec::new();
    let mut open: Option<Stage> = None;

    for block in blocks {
        if block.is_heading() {
            if let Some(stage) = open.take() {
                stages.push(stage);
            }
            open = Some(Stage::opened_by(block));
        } else {
            open.get_or_insert_with(Stage::introduction)
                .blocks
                .push(block.clone());
        }
    }

    stages.extend(open);
    stages
}
