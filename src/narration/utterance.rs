use crate::guide::{BlockKind, ContentBlock, Stage};

use super::speech::Utterance;

const ALGORITHM_PREFIX: &str = "Algorithm: ";

/// What a block sounds like, if anything.
///
/// Algorithms are spelled out one character at a time so the engine reads
/// move notation letter by letter instead of trying to pronounce it.
pub fn spoken_text(block: &ContentBlock) -> Option<String> {
    let text = match block.kind {
        BlockKind::Heading | BlockKind::Subheading | BlockKind::Paragraph => block.text.clone(),
        BlockKind::AlgorithmStep if block.is_visible() => {
            let spelled: Vec<String> = block.text.chars().map(String::from).collect();
            format!("{}{}", ALGORITHM_PREFIX, spelled.join(" "))
        }
        BlockKind::AlgorithmStep => return None,
    };

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

pub fn utterances_for(stage: &Stage, rate: f32) -> Vec<Utterance> {
    stage
        .blocks
        .iter()
        .filter_map(spoken_text)
        .map(|text| Utterance { text, rate })
        .collect()
}
