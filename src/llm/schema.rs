//! Gemini `generateContent` wire types and the block envelope the prompts ask for.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::guide::ContentBlock;

use super::ReplyError;

pub const GUIDE_KEY: &str = "guide";
pub const SOLUTION_KEY: &str = "solution";
const JSON_MIME: &str = "application/json";

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

#[derive(Deserialize, Debug)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
        }
    }
}

impl GenerateContentRequest {
    /// A single user turn whose reply must be a `{key: [blocks]}` JSON object.
    pub fn blocks(parts: Vec<Part>, key: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: GenerationConfig {
                response_mime_type: JSON_MIME.to_string(),
                response_schema: block_list_schema(key),
            },
        }
    }
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated. `None` if blank.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

pub fn block_list_schema(key: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            key: {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "type": { "type": "STRING", "enum": ["h2", "h3", "p", "algorithm"] },
                        "content": { "type": "STRING" }
                    },
                    "required": ["type", "content"]
                }
            }
        },
        "required": [key]
    })
}

/// Removes a Markdown code fence if the model wrapped its JSON in one.
fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"));
    match inner {
        Some(body) => body.trim_end().trim_end_matches("```").trim(),
        None => trimmed,
    }
}

/// Pulls `key` out of the reply envelope and checks it holds at least one block.
pub fn parse_blocks(reply: &str, key: &str) -> Result<Vec<ContentBlock>, ReplyError> {
    let mut envelope: Map<String, Value> = serde_json::from_str(strip_fences(reply))
        .map_err(|e| ReplyError::Malformed(e.to_string()))?;
    let blocks = envelope
        .remove(key)
        .ok_or_else(|| ReplyError::Malformed(format!("missing \"{}\" key", key)))?;
    let blocks: Vec<ContentBlock> =
        serde_json::from_value(blocks).map_err(|e| ReplyError::Malformed(e.to_string()))?;

    if blocks.is_empty() {
        return Err(ReplyError::Empty);
    }
    Ok(blocks)
}
