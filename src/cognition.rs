//! Cognitions - a user query fused with the mind's reaction.
//!
//! A cognition is an ordered JSON document:
//!
//! | field         | content                                         |
//! |---------------|-------------------------------------------------|
//! | `query`       | the raw user utterance                          |
//! | `count`       | maximum number of answers requested             |
//! | `client_id`   | base64 of the client identifier                 |
//! | `query_date`  | UTC timestamp when the query arrived            |
//! | `answers`     | the findings of the mind's arguments            |
//! | `answer_date` | UTC timestamp when the mind finished            |
//! | `answer_time` | `answer_date - query_date` in milliseconds      |
//! | `language`    | document language, always `en`                  |
//!
//! Unknown fields are kept as they are, so a document read from storage
//! serialises back byte for byte.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::argument::Finding;
use crate::clock::Clock;
use crate::date::{format_utc, parse_utc, truncate_millis};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::{MindError, MindResult};
use crate::identity::Identity;
use crate::language::Language;
use crate::mind::Mind;
use crate::skill::{skill_label, SkillLinks};
use crate::thought::{type_name, Thought};

/// Field holding the user utterance.
pub const QUERY: &str = "query";
/// Field holding the requested maximum number of answers.
pub const COUNT: &str = "count";
/// Field holding the base64 client identifier.
pub const CLIENT_ID: &str = "client_id";
/// Field holding the arrival timestamp.
pub const QUERY_DATE: &str = "query_date";
/// Field holding the answer list.
pub const ANSWERS: &str = "answers";
/// Field holding the completion timestamp.
pub const ANSWER_DATE: &str = "answer_date";
/// Field holding the reaction time in milliseconds.
pub const ANSWER_TIME: &str = "answer_time";
/// Field holding the document language.
pub const LANGUAGE: &str = "language";

/// Language written into every document's `language` field.
pub const DOCUMENT_LANGUAGE: &str = "en";

/// Inputs of a live query.
///
/// # Example
/// ```
/// use kumarmind::{CognitionRequest, Language};
///
/// let request = CognitionRequest::new("how late is it?")
///     .timezone_offset(-120)
///     .location(47.56, 7.59)
///     .language("de")
///     .max_count(3);
///
/// let seed = request.seed_observation();
/// assert_eq!(seed.observation("timezoneOffset"), Some("-120"));
/// assert_eq!(seed.observation("language"), Some("de"));
/// assert_eq!(request.language_tag(), Language::De);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CognitionRequest {
    query: String,
    timezone_offset: i32,
    latitude: f64,
    longitude: f64,
    language: String,
    max_count: usize,
    context: Thought,
}

impl CognitionRequest {
    /// Creates a request without location or language, asking for one answer.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            timezone_offset: 0,
            latitude: f64::NAN,
            longitude: f64::NAN,
            language: String::new(),
            max_count: 1,
            context: Thought::new(),
        }
    }

    /// Client timezone offset in minutes.
    #[must_use]
    pub fn timezone_offset(mut self, minutes: i32) -> Self {
        self.timezone_offset = minutes;
        self
    }

    /// Client location. Ignored unless both coordinates are finite.
    #[must_use]
    pub fn location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    /// Language name as sent by the client, e.g. `de`.
    #[must_use]
    pub fn language(mut self, name: impl Into<String>) -> Self {
        self.language = name.into();
        self
    }

    /// Maximum number of answers.
    #[must_use]
    pub fn max_count(mut self, max_count: usize) -> Self {
        self.max_count = max_count;
        self
    }

    /// Prior context, usually a dispute recalled from the previous turn.
    #[must_use]
    pub fn context(mut self, context: Thought) -> Self {
        self.context = context;
        self
    }

    /// The query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Maximum number of answers.
    pub const fn count(&self) -> usize {
        self.max_count
    }

    /// The parsed language; `Unknown` when unrecognised.
    pub fn language_tag(&self) -> Language {
        Language::parse(&self.language)
    }

    /// The observations the mind is seeded with: the context, topped with
    /// timezone, location and language.
    #[must_use]
    pub fn seed_observation(&self) -> Thought {
        let mut seed = self.context.clone();
        seed.add_observation("timezoneOffset", self.timezone_offset.to_string());

        if self.latitude.is_finite() && self.longitude.is_finite() {
            seed.add_observation("latitude", decimal(self.latitude));
            seed.add_observation("longitude", decimal(self.longitude));
        }

        let language = self.language_tag();
        if !language.is_unknown() {
            seed.add_observation("language", language.name());
        }
        seed
    }
}

/// Decimal text of a coordinate, always with a fractional part (`47.0`).
fn decimal(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

/// A query together with the mind's answers and request metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cognition {
    json: Map<String, Value>,
}

impl Cognition {
    /// Creates an empty cognition; fill it with [`Cognition::set_query`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts an existing document as is.
    #[must_use]
    pub const fn from_json(json: Map<String, Value>) -> Self {
        Self { json }
    }

    /// Asks `mind` and records the reaction.
    ///
    /// # Errors
    ///
    /// Returns the mind's error unchanged if it cannot react.
    pub fn react<M, I, C>(
        mind: &M,
        request: &CognitionRequest,
        identity: &I,
        clock: &C,
    ) -> Result<Self, M::Error>
    where
        M: Mind + ?Sized,
        I: Identity + ?Sized,
        C: Clock + ?Sized,
    {
        let query_date = truncate_millis(clock.now());
        let client = identity.client();
        let language = request.language_tag();
        let seed = request.seed_observation();

        let arguments = mind.react(request.query(), language, request.count(), &client, seed)?;
        // a clock stepping backwards must not produce a negative answer time
        let answer_date = truncate_millis(clock.now()).max(query_date);

        let answers: Vec<Value> = arguments
            .iter()
            .map(|argument| Value::from(argument.finding(mind, &client, language)))
            .collect();
        let answer_time = (answer_date - query_date).num_milliseconds();

        tracing::debug!(
            answers = answers.len(),
            answer_time_ms = answer_time,
            language = %language,
            "cognition computed"
        );

        let mut cognition = Self::new();
        cognition.set_query(request.query());
        let json = &mut cognition.json;
        json.insert(COUNT.to_string(), Value::from(request.count()));
        json.insert(
            CLIENT_ID.to_string(),
            Value::String(STANDARD.encode(client.as_bytes())),
        );
        json.insert(QUERY_DATE.to_string(), Value::String(format_utc(query_date)));
        json.insert(ANSWERS.to_string(), Value::Array(answers));
        json.insert(ANSWER_DATE.to_string(), Value::String(format_utc(answer_date)));
        json.insert(ANSWER_TIME.to_string(), Value::from(answer_time));
        json.insert(
            LANGUAGE.to_string(),
            Value::String(DOCUMENT_LANGUAGE.to_string()),
        );
        Ok(cognition)
    }

    /// Overwrites the query in place.
    pub fn set_query(&mut self, query: impl Into<String>) -> &mut Self {
        self.json.insert(QUERY.to_string(), Value::String(query.into()));
        self
    }

    /// The query; empty when absent, null or not a string.
    pub fn query(&self) -> &str {
        self.json.get(QUERY).and_then(Value::as_str).unwrap_or("")
    }

    /// The requested maximum number of answers, if recorded.
    pub fn count(&self) -> Option<u64> {
        self.json.get(COUNT).and_then(Value::as_u64)
    }

    /// Milliseconds the mind needed, if recorded.
    pub fn answer_time(&self) -> Option<i64> {
        self.json.get(ANSWER_TIME).and_then(Value::as_i64)
    }

    /// When the query arrived.
    ///
    /// # Errors
    ///
    /// `MalformedDocument` if `query_date` is missing or not a timestamp.
    pub fn query_date(&self) -> MindResult<DateTime<Utc>> {
        self.date_field(QUERY_DATE)
    }

    /// When the mind finished.
    ///
    /// # Errors
    ///
    /// `MalformedDocument` if `answer_date` is missing or not a timestamp.
    pub fn answer_date(&self) -> MindResult<DateTime<Utc>> {
        self.date_field(ANSWER_DATE)
    }

    fn date_field(&self, field: &str) -> MindResult<DateTime<Utc>> {
        let text = match self.json.get(field) {
            Some(Value::String(s)) => s,
            Some(other) => {
                return Err(MindError::malformed(
                    field,
                    format!("must be a timestamp string, found {}", type_name(other)),
                ))
            }
            None => return Err(MindError::malformed(field, "is missing")),
        };
        parse_utc(text).map_err(|e| MindError::malformed(field, format!("is not a timestamp: {e}")))
    }

    /// The client identifier decoded from `client_id`.
    ///
    /// # Errors
    ///
    /// `MalformedDocument` if `client_id` is missing, not base64 or not UTF-8.
    pub fn client(&self) -> MindResult<String> {
        let encoded = self
            .json
            .get(CLIENT_ID)
            .and_then(Value::as_str)
            .ok_or_else(|| MindError::malformed(CLIENT_ID, "is missing"))?;
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| MindError::malformed(CLIENT_ID, format!("is not base64: {e}")))?;
        String::from_utf8(bytes)
            .map_err(|e| MindError::malformed(CLIENT_ID, format!("is not UTF-8: {e}")))
    }

    /// One thought per stored answer, in stored order.
    ///
    /// An absent (or null) `answers` field yields no thoughts.
    ///
    /// # Errors
    ///
    /// `MalformedDocument` if `answers` is not an array or holds a non-object.
    pub fn answers(&self) -> MindResult<Vec<Thought>> {
        let items = match self.json.get(ANSWERS) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(MindError::malformed(
                    ANSWERS,
                    format!("must be an array, found {}", type_name(other)),
                ))
            }
        };
        items
            .iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(o) => Ok(Thought::from_json(o.clone())),
                other => Err(MindError::malformed(
                    format!("{ANSWERS}[{idx}]"),
                    format!("must be an object, found {}", type_name(other)),
                )),
            })
            .collect()
    }

    /// What the mind actually said: the first phrase of the first action of
    /// the first answer, or an empty string.
    ///
    /// Only the first answer is read; later entries are not inspected.
    #[must_use]
    pub fn expression(&self) -> String {
        self.json
            .get(ANSWERS)
            .and_then(Value::as_array)
            .and_then(|answers| answers.first())
            .and_then(Value::as_object)
            .map(|first| Thought::from_json(first.clone()))
            .and_then(|t| t.actions().into_iter().next())
            .and_then(|a| a.phrases().into_iter().next())
            .unwrap_or_default()
    }

    /// Reconstructs the dispute, reporting skipped values through `tracing`.
    #[must_use]
    pub fn recall_dispute(&self) -> Thought {
        self.recall_dispute_with(&SkillLinks::default(), &TracingSink)
    }

    /// Reconstructs the dispute as seed context for a follow-up query.
    ///
    /// Answers are walked newest first. Each contributes the observations
    /// `query`, `answer`, `skill`, `skill_link` and the `_`-prefixed values
    /// of its first data row. Values that are not strings are reported to
    /// `sink` and skipped.
    #[must_use]
    pub fn recall_dispute_with(&self, links: &SkillLinks, sink: &dyn DiagnosticSink) -> Thought {
        let mut dispute = Thought::new();
        let items: &[Value] = match self.json.get(ANSWERS) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        };

        for (idx, item) in items.iter().enumerate().rev() {
            let Value::Object(o) = item else {
                sink.report(
                    &format!("{ANSWERS}[{idx}]"),
                    &format!("answer is {}, not an object", type_name(item)),
                );
                continue;
            };
            let answer = Thought::from_json(o.clone());

            dispute.add_observation("query", self.query());

            if let Some(phrase) = answer
                .actions()
                .iter()
                .find_map(|a| a.phrases().into_iter().next())
            {
                dispute.add_observation("answer", phrase);
            }

            if let Some(skill) = answer.skills().first() {
                dispute.add_observation("skill", skill_label(skill));
                dispute.add_observation("skill_link", links.link(skill));
            }

            let row = match answer.data().first() {
                None => None,
                Some(Value::Object(row)) => Some(row),
                Some(other) => {
                    sink.report(
                        &format!("{ANSWERS}[{idx}].data[0]"),
                        &format!("row is {}, not an object", type_name(other)),
                    );
                    None
                }
            };
            if let Some(row) = row {
                for (key, value) in row.iter().filter(|(k, _)| k.starts_with('_')) {
                    match value.as_str() {
                        Some(s) => {
                            dispute.add_observation(key.as_str(), s);
                        }
                        None => sink.report(
                            key,
                            &format!("value is {}, not a string", type_name(value)),
                        ),
                    }
                }
            }
        }
        dispute
    }

    /// The underlying document.
    pub const fn json(&self) -> &Map<String, Value> {
        &self.json
    }

    /// Consumes the cognition, returning its document.
    #[must_use]
    pub fn into_json(self) -> Map<String, Value> {
        self.json
    }
}

impl fmt::Display for Cognition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(&self.json).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for Cognition {
    type Err = MindError;

    fn from_str(s: &str) -> MindResult<Self> {
        match serde_json::from_str::<Value>(s)? {
            Value::Object(json) => Ok(Self { json }),
            other => Err(MindError::malformed(
                "document",
                format!("must be an object, found {}", type_name(&other)),
            )),
        }
    }
}
