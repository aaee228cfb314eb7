use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Responder output: canned reply text plus ordered follow-up suggestions.
///
/// Not yet a message — the conversation turns a reply into an assistant
/// `Message` when its deferred completion fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub content: String,

    /// Follow-up suggestions, in display order.
    pub suggestions: Vec<String>,

    /// Free-form trace of how the reply was chosen (rule name, matched
    /// trigger). Display code ignores it; logs and tests read it.
    pub metadata: JsonValue,
}

impl Reply {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            suggestions: Vec::new(),
            metadata: JsonValue::Null,
        }
    }

    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_metadata(mut self, metadata: JsonValue) -> Self {
        self.metadata = metadata;
        self
    }
}
