use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LearningMethod {
    #[default]
    Beginner,
    Cfop,
    Roux,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Simple,
    Advanced,
}

/// How the webview names a choice: by position in the selector or by name.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Selector {
    Index(u8),
    Name(String),
}

impl LearningMethod {
    pub const ALL: [LearningMethod; 3] = [Self::Beginner, Self::Cfop, Self::Roux];

    pub fn select_method(method: u8) -> Result<Self, String> {
        match method {
            0 => Ok(LearningMethod::Beginner),
            1 => Ok(LearningMethod::Cfop),
            2 => Ok(LearningMethod::Roux),
            _ => Err("Invalid method selected!".to_string()),
        }
    }

    pub fn from_selector(selector: &Selector) -> Result<Self, String> {
        match selector {
            Selector::Index(index) => Self::select_method(*index),
            Selector::Name(name) => name.parse(),
        }
    }

    /// Name used in prompts and on the guide header.
    pub fn label(&self) -> &'static str {
        match self {
            LearningMethod::Beginner => "Beginner's Method",
            LearningMethod::Cfop => "CFOP (Fridrich method)",
            LearningMethod::Roux => "Roux Method",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            LearningMethod::Beginner => "Beginner",
            LearningMethod::Cfop => "CFOP",
            LearningMethod::Roux => "Roux",
        }
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 2] = [Self::Simple, Self::Advanced];

    pub fn select_difficulty(difficulty: u8) -> Result<Self, String> {
        match difficulty {
            0 => Ok(Difficulty::Simple),
            1 => Ok(Difficulty::Advanced),
            _ => Err("Invalid difficulty selected!".to_string()),
        }
    }

    pub fn from_selector(selector: &Selector) -> Result<Self, String> {
        match selector {
            Selector::Index(index) => Self::select_difficulty(*index),
            Selector::Name(name) => name.parse(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Simple => "Simple",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for LearningMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LearningMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| {
                m.short_name().eq_ignore_ascii_case(wanted) || m.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("Unknown learning method: {}", wanted))
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown difficulty: {}", wanted))
    }
}
