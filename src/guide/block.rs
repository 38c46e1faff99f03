use serde::{Deserialize, Serialize};

/// Text the model emits for algorithm slots that do not apply.
const NOT_APPLICABLE: &str = "n/a";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    #[serde(rename = "h2")]
    Heading,
    #[serde(rename = "h3")]
    Subheading,
    #[serde(rename = "p")]
    Paragraph,
    #[serde(rename = "algorithm")]
    AlgorithmStep,
}

/// One unit of generated guide content, exactly as the model returned it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(rename = "content")]
    pub text: String,
}

impl ContentBlock {
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Heading, text)
    }

    pub fn subheading(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Subheading, text)
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Paragraph, text)
    }

    pub fn algorithm(text: impl Into<String>) -> Self {
        Self::new(BlockKind::AlgorithmStep, text)
    }

    pub fn is_heading(&self) -> bool {
        self.kind == BlockKind::Heading
    }

    /// Algorithm steps that are empty or "n/a" are treated as absent.
    pub fn is_visible(&self) -> bool {
        match self.kind {
            BlockKind::Heading | BlockKind::Subheading | BlockKind::Paragraph => true,
            BlockKind::AlgorithmStep => {
                !self.text.is_empty() && !self.text.eq_ignore_ascii_case(NOT_APPLICABLE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_block() {
        let block: ContentBlock =
            serde_json::from_str(r#"{"type":"algorithm","content":"R U R' U'"}"#).unwrap();
        assert_eq!(block, ContentBlock::algorithm("R U R' U'"));
    }

    #[test]
    fn rejects_unknown_kind() {
        let parsed = serde_json::from_str::<ContentBlock>(r#"{"type":"h1","content":"x"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn not_applicable_algorithm_is_hidden() {
        assert!(!ContentBlock::algorithm("N/A").is_visible());
        assert!(!ContentBlock::algorithm("n/a").is_visible());
        assert!(!ContentBlock::algorithm("").is_visible());
        assert!(ContentBlock::algorithm("F R U").is_visible());
        assert!(ContentBlock::paragraph("").is_visible());
    }
}
