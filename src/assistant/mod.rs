//! Design assistant.
//!
//! The assistant sees the active slide's elements (kind and content only)
//! plus a free-text request and answers in free text. Nothing it says is
//! applied to the deck: SVG in a reply is offered as a shape suggestion that
//! becomes an element only when the user accepts it through the edit session.

// Allow expect for compile-time constant regex patterns in LazyLock blocks
#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Serialize;

use crate::constants::assistant::{EMPTY_REPLY, FAILURE_REPLY};
use crate::error::Result;
use crate::model::{ElementType, Slide};

/// Gemini REST client
pub mod gemini;

pub use gemini::GeminiAssistant;

static RE_FENCED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z]*[ \t]*\r?\n?(.*?)```").expect("valid regex: RE_FENCED")
});

static RE_INLINE_SVG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<svg\b.*?</svg>").expect("valid regex: RE_INLINE_SVG")
});

/// What the assistant is told about one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementSummary {
    /// Element kind.
    #[serde(rename = "type")]
    pub kind: ElementType,
    /// Element content.
    pub content: String,
}

/// One question for the assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantRequest {
    /// The active slide's elements.
    pub elements: Vec<ElementSummary>,
    /// What the user asked.
    pub message: String,
}

impl AssistantRequest {
    /// Build a request about `slide`.
    pub fn for_slide(slide: &Slide, message: impl Into<String>) -> Self {
        Self {
            elements: slide
                .elements
                .iter()
                .map(|e| ElementSummary { kind: e.element_type(), content: e.content().to_string() })
                .collect(),
            message: message.into(),
        }
    }

    /// Prompt text sent to the model.
    pub fn prompt(&self) -> String {
        let elements = serde_json::to_string(&self.elements).unwrap_or_else(|_| "[]".to_string());
        format!(
            "The user is designing a \"Wrapped\" style presentation slide.\n\
             Current slide elements: {elements}.\n\
             User request: {}.\n\n\
             If the user asks for a layout, suggest specific coordinates (x, y) and sizes (width, height) for elements.\n\
             If the user asks for an SVG design, provide the raw SVG code within a code block.\n\
             Keep the tone professional and creative.",
            self.message.trim()
        )
    }
}

/// A text-generation backend.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Answer a request. An empty string means the model had nothing to say.
    async fn suggest(&self, request: &AssistantRequest) -> Result<String>;
}

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The person editing.
    User,
    /// The assistant.
    Assistant,
    /// A status note from the editor itself.
    System,
}

/// One entry of the conversation log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Author.
    pub role: Role,
    /// Text.
    pub content: String,
}

impl Message {
    /// SVG markup offered in this message.
    pub fn svg_suggestions(&self) -> Vec<String> {
        extract_svg_blocks(&self.content)
    }
}

/// The user/assistant message log.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Append the user's request. Blank requests are not recorded.
    pub fn push_user(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.messages.push(Message { role: Role::User, content: text.to_string() });
        true
    }

    /// Append the assistant's answer, or the fixed message for an empty
    /// reply or a failure.
    pub fn record_reply(&mut self, reply: Result<String>) -> &Message {
        let content = match reply {
            Ok(text) if text.trim().is_empty() => EMPTY_REPLY.to_string(),
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Assistant request failed");
                FAILURE_REPLY.to_string()
            }
        };
        self.messages.push(Message { role: Role::Assistant, content });
        &self.messages[self.messages.len() - 1]
    }

    /// Append a note from a collaborator (media or storage failure, share link).
    pub fn note(&mut self, text: impl Into<String>) {
        self.messages.push(Message { role: Role::System, content: text.into() });
    }

    /// SVG suggestions from the most recent assistant message.
    pub fn latest_suggestions(&self) -> Vec<String> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
            .map(Message::svg_suggestions)
            .unwrap_or_default()
    }
}

/// Pull SVG markup out of a reply: fenced code blocks that contain markup,
/// or bare `<svg>` documents when there are no fences.
pub fn extract_svg_blocks(text: &str) -> Vec<String> {
    let fenced: Vec<String> = RE_FENCED
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|block| block.starts_with('<') && (block.contains("/>") || block.contains("</")))
        .collect();
    if !fenced.is_empty() {
        return fenced;
    }
    RE_INLINE_SVG.find_iter(text).map(|m| m.as_str().to_string()).collect()
}
