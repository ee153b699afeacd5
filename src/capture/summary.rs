//! Bounded console summary of a captured conversation request.
//!
//! Only `model` and `messages[].role` / `messages[].content` are inspected;
//! everything else in the document is opaque. Message content is either a
//! plain string or an array of typed blocks (`{"type": "text", "text": ...}`,
//! `{"type": "tool_use", ...}` and so on).

use std::fmt;

use serde_json::Value;

use crate::config::CaptureConfig;

const UNKNOWN: &str = "unknown";

/// Preview thresholds for the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLimits {
    /// Characters of plain-text content shown per message.
    pub text_chars: usize,
    /// Characters shown per content block.
    pub block_chars: usize,
    /// Blocks shown per message.
    pub max_blocks: usize,
}

impl Default for SummaryLimits {
    fn default() -> Self {
        Self::from(&CaptureConfig::default())
    }
}

impl From<&CaptureConfig> for SummaryLimits {
    fn from(config: &CaptureConfig) -> Self {
        Self {
            text_chars: config.text_preview_chars,
            block_chars: config.block_preview_chars,
            max_blocks: config.max_blocks,
        }
    }
}

/// Summary of a request document exposing `model` and `messages`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationSummary {
    pub model: String,
    pub messages: Vec<MessageSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageSummary {
    pub role: String,
    pub content: ContentSummary,
}

/// Message content, by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentSummary {
    /// Plain string content.
    Text { preview: String, truncated: bool },
    /// Array of content blocks; `shown` holds at most `max_blocks` of `total`.
    Blocks { total: usize, shown: Vec<BlockSummary> },
    /// Anything else (missing, null, number, object...).
    Other { kind: &'static str, raw: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockSummary {
    /// The block's `type` discriminator.
    pub kind: String,
    /// `text` for text blocks, the block's JSON otherwise.
    pub preview: String,
    pub truncated: bool,
}

impl ConversationSummary {
    /// Summarize a parsed request document.
    ///
    /// Documents that are not objects, or lack `model`/`messages`, yield an
    /// `unknown` model and no messages rather than an error.
    pub fn from_document(document: &Value, limits: &SummaryLimits) -> Self {
        let model = document
            .get("model")
            .map(scalar_to_string)
            .unwrap_or_else(|| UNKNOWN.to_string());

        let messages = document
            .get("messages")
            .and_then(Value::as_array)
            .map(|messages| {
                messages
                    .iter()
                    .map(|message| MessageSummary::from_message(message, limits))
                    .collect()
            })
            .unwrap_or_default();

        Self { model, messages }
    }
}

impl MessageSummary {
    fn from_message(message: &Value, limits: &SummaryLimits) -> Self {
        let role = message
            .get("role")
            .map(scalar_to_string)
            .unwrap_or_else(|| UNKNOWN.to_string());

        let content = match message.get("content").unwrap_or(&Value::Null) {
            Value::String(text) => {
                let (preview, truncated) = preview(text, limits.text_chars);
                ContentSummary::Text {
                    preview: preview.to_string(),
                    truncated,
                }
            }
            Value::Array(blocks) => ContentSummary::Blocks {
                total: blocks.len(),
                shown: blocks
                    .iter()
                    .take(limits.max_blocks)
                    .map(|block| BlockSummary::from_block(block, limits.block_chars))
                    .collect(),
            },
            other => ContentSummary::Other {
                kind: json_kind(other),
                raw: other.to_string(),
            },
        };

        Self { role, content }
    }
}

impl BlockSummary {
    fn from_block(block: &Value, max_chars: usize) -> Self {
        let kind = block
            .get("type")
            .map(scalar_to_string)
            .unwrap_or_else(|| UNKNOWN.to_string());

        let source = match (kind.as_str(), block.get("text")) {
            ("text", Some(Value::String(text))) => text.clone(),
            ("text", _) => String::new(),
            _ => block.to_string(),
        };
        let (preview, truncated) = preview(&source, max_chars);

        Self {
            kind,
            preview: preview.to_string(),
            truncated,
        }
    }
}

impl fmt::Display for ConversationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model: {}", self.model)?;
        write!(f, "Messages ({}):", self.messages.len())?;

        for (i, message) in self.messages.iter().enumerate() {
            write!(f, "\n  [{}] {}:", i, message.role)?;
            match &message.content {
                ContentSummary::Text { preview, truncated } => {
                    write!(f, "\n      Type: string")?;
                    write!(f, "\n      Preview: {}{}", preview, ellipsis(*truncated))?;
                }
                ContentSummary::Blocks { total, shown } => {
                    write!(f, "\n      Type: array ({} blocks)", total)?;
                    for (j, block) in shown.iter().enumerate() {
                        write!(
                            f,
                            "\n        [{}] {}: {}{}",
                            j,
                            block.kind,
                            block.preview,
                            ellipsis(block.truncated)
                        )?;
                    }
                }
                ContentSummary::Other { kind, raw } => {
                    write!(f, "\n      Type: {}", kind)?;
                    write!(f, "\n      Raw: {}", raw)?;
                }
            }
        }
        Ok(())
    }
}

/// First `max_chars` characters of `text`, and whether anything was cut.
pub fn preview(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => (&text[..end], true),
        None => (text, false),
    }
}

fn ellipsis(truncated: bool) -> &'static str {
    if truncated { "..." } else { "" }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
