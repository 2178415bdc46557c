//! Actions carried by a thought.
//!
//! An action is an ordered JSON object. The mind uses the `type` tag to
//! tell answers from other instructions; only `phrases` matters to a
//! cognition.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key of the action type tag.
pub const TYPE_KEY: &str = "type";

/// Key of the phrase list.
pub const PHRASES_KEY: &str = "phrases";

/// A single action of a thought.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action {
    json: Map<String, Value>,
}

impl Action {
    /// Creates an empty action.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an `answer` action speaking the given phrases.
    #[must_use]
    pub fn answer<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut action = Self::new().with_type("answer");
        action.json.insert(
            PHRASES_KEY.to_string(),
            Value::Array(phrases.into_iter().map(|p| Value::String(p.into())).collect()),
        );
        action
    }

    /// Adopts an existing JSON object.
    #[must_use]
    pub const fn from_json(json: Map<String, Value>) -> Self {
        Self { json }
    }

    /// Sets the type tag.
    #[must_use]
    pub fn with_type(mut self, action_type: impl Into<String>) -> Self {
        self.json
            .insert(TYPE_KEY.to_string(), Value::String(action_type.into()));
        self
    }

    /// The type tag, if any.
    pub fn action_type(&self) -> Option<&str> {
        self.json.get(TYPE_KEY).and_then(Value::as_str)
    }

    /// The phrases of this action in stored order.
    ///
    /// Absent or non-array `phrases` yields an empty list; non-string
    /// entries are skipped.
    #[must_use]
    pub fn phrases(&self) -> Vec<String> {
        match self.json.get(PHRASES_KEY) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The underlying JSON object.
    pub const fn json(&self) -> &Map<String, Value> {
        &self.json
    }

    /// Consumes the action, returning its JSON object.
    #[must_use]
    pub fn into_json(self) -> Map<String, Value> {
        self.json
    }
}
