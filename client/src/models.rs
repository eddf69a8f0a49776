use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text of a single page, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub number: usize,
    pub text: String,
}

/// The text layer of one PDF, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub filename: String,
    pub pages: Vec<PageText>,
}

impl ExtractedDocument {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            pages: Vec::new(),
        }
    }

    pub fn push_page(&mut self, text: String) {
        let number = self.pages.len() + 1;
        self.pages.push(PageText { number, text });
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Concatenates every page as `Page {n}: {text}` followed by a blank line.
    pub fn render(&self) -> String {
        let mut content = String::new();
        for page in &self.pages {
            content.push_str(&format!("Page {}: {}\n\n", page.number, page.text));
        }
        content
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A chat-completion body, walked leniently: model servers disagree on the
/// shape of both the success and the error payloads.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct ChatResponse(pub Value);

impl ChatResponse {
    /// `Some` when the body carries a truthy `error` field. The message is the
    /// `error.message` string when there is a non-empty one.
    pub fn error(&self) -> Option<Option<&str>> {
        let error = &self.0["error"];
        if !is_truthy(error) {
            return None;
        }
        Some(error["message"].as_str().filter(|m| !m.is_empty()))
    }

    /// `choices[0].message.content`, if it is a non-empty string.
    pub fn first_content(&self) -> Option<&str> {
        self.0["choices"][0]["message"]["content"]
            .as_str()
            .filter(|content| !content.is_empty())
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
