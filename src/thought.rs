//! Thoughts - the mind's unit of mutable context.
//!
//! A thought is an ordered JSON object with three recognised members:
//! - `data`: a table of rows (objects) threading observations across turns
//! - `actions`: what the mind wants to do or say
//! - `skills`: pointers to the rules that produced the thought
//!
//! Observations are stacked in the data table: the newest value of a key is
//! always found in the first row that holds that key.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::action::Action;
use crate::error::{MindError, MindResult};

/// Key of the data table.
pub const DATA_KEY: &str = "data";
/// Key of the action list.
pub const ACTIONS_KEY: &str = "actions";
/// Key of the skill pointer list.
pub const SKILLS_KEY: &str = "skills";

/// A structured bag of observations, actions and skill pointers.
///
/// # Examples
///
/// ```
/// use kumarmind::Thought;
///
/// let mut thought = Thought::new();
/// thought.add_observation("city", "Basel");
/// thought.add_observation("city", "Bern");
/// assert_eq!(thought.observation("city"), Some("Bern"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Thought {
    json: Map<String, Value>,
}

impl Thought {
    /// Creates an empty thought.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts an existing JSON object without validating it.
    #[must_use]
    pub const fn from_json(json: Map<String, Value>) -> Self {
        Self { json }
    }

    /// Adds an observation on top of the observation stack.
    ///
    /// The value goes into the row just before the first row already holding
    /// `key`; when that is the first row, a new row is pushed in front. A key
    /// not seen before is written into the first row.
    pub fn add_observation(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let slot = self
            .json
            .entry(DATA_KEY.to_string())
            .or_insert(Value::Null);
        let mut rows = match slot.take() {
            Value::Array(rows) => rows,
            _ => Vec::new(),
        };
        stack_observation(&mut rows, key.into(), Value::String(value.into()));
        *slot = Value::Array(rows);
        self
    }

    /// Latest string value observed for `key`.
    pub fn observation(&self, key: &str) -> Option<&str> {
        self.data()
            .iter()
            .filter_map(Value::as_object)
            .find_map(|row| row.get(key))
            .and_then(Value::as_str)
    }

    /// All observed keys with their latest string value, in first-seen order.
    #[must_use]
    pub fn observations(&self) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = Vec::new();
        for row in self.data().iter().filter_map(Value::as_object) {
            for (key, value) in row {
                if out.iter().any(|(k, _)| k == key) {
                    continue;
                }
                if let Some(s) = value.as_str() {
                    out.push((key.clone(), s.to_string()));
                }
            }
        }
        out
    }

    /// The data table; empty when absent or not an array.
    pub fn data(&self) -> &[Value] {
        match self.json.get(DATA_KEY) {
            Some(Value::Array(rows)) => rows,
            _ => &[],
        }
    }

    /// Replaces the data table.
    pub fn set_data(&mut self, rows: Vec<Value>) -> &mut Self {
        self.json.insert(DATA_KEY.to_string(), Value::Array(rows));
        self
    }

    /// Actions in stored order; non-object entries are skipped.
    #[must_use]
    pub fn actions(&self) -> Vec<Action> {
        match self.json.get(ACTIONS_KEY) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_object)
                .map(|a| Action::from_json(a.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Appends an action.
    pub fn add_action(&mut self, action: Action) -> &mut Self {
        push_to_array(&mut self.json, ACTIONS_KEY, Value::Object(action.into_json()));
        self
    }

    /// Skill pointers in stored order; non-string entries are skipped.
    #[must_use]
    pub fn skills(&self) -> Vec<String> {
        match self.json.get(SKILLS_KEY) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Appends a skill pointer.
    pub fn add_skill(&mut self, skill: impl Into<String>) -> &mut Self {
        push_to_array(&mut self.json, SKILLS_KEY, Value::String(skill.into()));
        self
    }

    /// The underlying JSON object.
    pub const fn json(&self) -> &Map<String, Value> {
        &self.json
    }

    /// Consumes the thought, returning its JSON object.
    #[must_use]
    pub fn into_json(self) -> Map<String, Value> {
        self.json
    }
}

impl TryFrom<Value> for Thought {
    type Error = MindError;

    fn try_from(value: Value) -> MindResult<Self> {
        match value {
            Value::Object(json) => Ok(Self { json }),
            other => Err(MindError::malformed(
                "thought",
                format!("must be an object, found {}", type_name(&other)),
            )),
        }
    }
}

impl From<Thought> for Value {
    fn from(thought: Thought) -> Self {
        Self::Object(thought.json)
    }
}

fn stack_observation(rows: &mut Vec<Value>, key: String, value: Value) {
    let holder = rows
        .iter()
        .position(|row| row.as_object().is_some_and(|r| r.contains_key(&key)));

    let target = match holder {
        Some(0) => None,
        Some(idx) => rows.get_mut(idx - 1).and_then(Value::as_object_mut),
        None => rows.first_mut().and_then(Value::as_object_mut),
    };

    if let Some(row) = target {
        row.insert(key, value);
        return;
    }

    let mut row = Map::new();
    row.insert(key, value);
    let at = match holder {
        Some(idx) if idx > 0 => idx,
        _ => 0,
    };
    rows.insert(at, Value::Object(row));
}

fn push_to_array(json: &mut Map<String, Value>, key: &str, item: Value) {
    match json.get_mut(key) {
        Some(Value::Array(items)) => items.push(item),
        _ => {
            json.insert(key.to_string(), Value::Array(vec![item]));
        }
    }
}

/// Human-readable JSON type name, used in error messages.
pub(crate) const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
