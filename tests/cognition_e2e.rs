use std::cell::{Cell, RefCell};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use kumarmind::{
    Action, Argument, ClientIdentity, Clock, Cognition, CognitionRequest, Identity, Language,
    Mind, SystemClock, Thought,
};

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("mind is down: {0}")]
struct MindDown(&'static str);

#[derive(Debug, Clone)]
struct Seen {
    query: String,
    language: Language,
    max_count: usize,
    client: String,
    observation: Thought,
}

/// Answers every query `max_count` times with an echo.
#[derive(Default)]
struct EchoMind {
    down: bool,
    seen: RefCell<Vec<Seen>>,
}

impl EchoMind {
    fn down() -> Self {
        Self {
            down: true,
            ..Self::default()
        }
    }

    fn last_seen(&self) -> Seen {
        self.seen.borrow().last().cloned().expect("mind was not asked")
    }
}

impl Mind for EchoMind {
    type Argument = Argument;
    type Error = MindDown;

    fn react(
        &self,
        query: &str,
        language: Language,
        max_count: usize,
        client: &str,
        observation: Thought,
    ) -> Result<Vec<Argument>, MindDown> {
        self.seen.borrow_mut().push(Seen {
            query: query.to_string(),
            language,
            max_count,
            client: client.to_string(),
            observation: observation.clone(),
        });
        if self.down {
            return Err(MindDown("no skills loaded"));
        }
        Ok((0..max_count)
            .map(|i| {
                let mut heard = Thought::new();
                heard.add_observation("_heard", query);
                Argument::new()
                    .think(observation.clone())
                    .think(heard)
                    .action(Action::answer([format!("echo {i}: $_heard$")]))
                    .skill("/kumar_skill_data/en/echo.txt")
            })
            .collect())
    }
}

/// Advances by a fixed step on every reading.
struct StepClock {
    next_ms: Cell<i64>,
    step_ms: i64,
}

impl StepClock {
    fn new(start_ms: i64, step_ms: i64) -> Self {
        Self {
            next_ms: Cell::new(start_ms),
            step_ms,
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let ms = self.next_ms.get();
        self.next_ms.set(ms + self.step_ms);
        Utc.timestamp_millis_opt(ms).unwrap()
    }
}

const JULY_24_2016: i64 = 1_469_350_800_000;

fn ask(mind: &EchoMind, request: &CognitionRequest) -> Cognition {
    Cognition::react(
        mind,
        request,
        &ClientIdentity::host("127.0.0.1"),
        &StepClock::new(JULY_24_2016, 1_500),
    )
    .unwrap()
}

#[test]
fn live_cognition_fields_in_order() {
    let mind = EchoMind::default();
    let c = ask(&mind, &CognitionRequest::new("hello").max_count(2));

    let keys: Vec<&str> = c.json().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "query",
            "count",
            "client_id",
            "query_date",
            "answers",
            "answer_date",
            "answer_time",
            "language"
        ]
    );
    assert_eq!(c.query(), "hello");
    assert_eq!(c.count(), Some(2));
    assert_eq!(c.answers().unwrap().len(), 2);
}

#[test]
fn live_cognition_timing() {
    let mind = EchoMind::default();
    let c = ask(&mind, &CognitionRequest::new("hello"));

    assert_eq!(c.json()["query_date"], "2016-07-24T09:00:00.000Z");
    assert_eq!(c.json()["answer_date"], "2016-07-24T09:00:01.500Z");
    assert_eq!(c.answer_time(), Some(1_500));

    let query_date = c.query_date().unwrap();
    let answer_date = c.answer_date().unwrap();
    assert!(answer_date >= query_date);
    assert_eq!((answer_date - query_date).num_milliseconds(), 1_500);
}

#[test]
fn clock_stepping_backwards_gives_zero_answer_time() {
    let mind = EchoMind::default();
    let c = Cognition::react(
        &mind,
        &CognitionRequest::new("hello"),
        &ClientIdentity::host("h"),
        &StepClock::new(JULY_24_2016, -40),
    )
    .unwrap();
    assert_eq!(c.answer_time(), Some(0));
    assert_eq!(c.query_date().unwrap(), c.answer_date().unwrap());
}

#[test]
fn live_cognition_system_clock_invariants() {
    let mind = EchoMind::default();
    let c = Cognition::react(
        &mind,
        &CognitionRequest::new("what time is it"),
        &ClientIdentity::anonymous("abc"),
        &SystemClock,
    )
    .unwrap();
    let query_date = c.query_date().unwrap();
    let answer_date = c.answer_date().unwrap();
    assert!(answer_date >= query_date);
    assert_eq!(
        c.answer_time(),
        Some((answer_date - query_date).num_milliseconds())
    );
}

#[test]
fn client_id_is_base64_of_client() {
    let mind = EchoMind::default();
    let identity = ClientIdentity::email("ada@example.org");
    let c = Cognition::react(
        &mind,
        &CognitionRequest::new("hi"),
        &identity,
        &SystemClock,
    )
    .unwrap();

    let encoded = c.json()["client_id"].as_str().unwrap();
    let decoded = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
    assert_eq!(decoded, identity.client());
    assert_eq!(c.client().unwrap(), "email:ada@example.org");
    assert_eq!(mind.last_seen().client, "email:ada@example.org");
}

#[test]
fn zero_max_count_stores_empty_answers() {
    let mind = EchoMind::default();
    let c = ask(&mind, &CognitionRequest::new("anything").max_count(0));
    assert_eq!(c.count(), Some(0));
    assert_eq!(c.json()["answers"], serde_json::json!([]));
    assert_eq!(c.expression(), "");
}

#[test]
fn seed_observation_reaches_the_mind() {
    let mind = EchoMind::default();
    ask(
        &mind,
        &CognitionRequest::new("wie spät ist es")
            .timezone_offset(-120)
            .location(47.5596, 7.5886)
            .language("de")
            .max_count(3),
    );

    let seen = mind.last_seen();
    assert_eq!(seen.query, "wie spät ist es");
    assert_eq!(seen.language, Language::De);
    assert_eq!(seen.max_count, 3);
    assert_eq!(seen.observation.observation("timezoneOffset"), Some("-120"));
    assert_eq!(seen.observation.observation("latitude"), Some("47.5596"));
    assert_eq!(seen.observation.observation("longitude"), Some("7.5886"));
    assert_eq!(seen.observation.observation("language"), Some("de"));
}

#[test]
fn nan_coordinate_and_unknown_language_are_not_observed() {
    let mind = EchoMind::default();
    ask(
        &mind,
        &CognitionRequest::new("q")
            .location(f64::NAN, 7.5886)
            .language("xx"),
    );

    let seen = mind.last_seen();
    assert_eq!(seen.language, Language::Unknown);
    assert_eq!(seen.observation.observation("latitude"), None);
    assert_eq!(seen.observation.observation("longitude"), None);
    assert_eq!(seen.observation.observation("language"), None);
    assert_eq!(seen.observation.observation("timezoneOffset"), Some("0"));
}

#[test]
fn document_language_stays_en() {
    let mind = EchoMind::default();
    let c = ask(&mind, &CognitionRequest::new("bonjour").language("fr"));
    assert_eq!(c.json()["language"], "en");
    // the resolved language still reaches the finding
    let answer = &c.answers().unwrap()[0];
    assert_eq!(answer.actions()[0].json()["language"], "fr");
}

#[test]
fn answers_keep_mind_order_and_bind_phrases() {
    let mind = EchoMind::default();
    let c = ask(&mind, &CognitionRequest::new("ping").max_count(3));
    let phrases: Vec<String> = c
        .answers()
        .unwrap()
        .iter()
        .map(|t| t.actions()[0].phrases()[0].clone())
        .collect();
    assert_eq!(phrases, vec!["echo 0: ping", "echo 1: ping", "echo 2: ping"]);
    assert_eq!(c.expression(), "echo 0: ping");
}

#[test]
fn mind_failure_is_propagated_unchanged() {
    let mind = EchoMind::down();
    let err = Cognition::react(
        &mind,
        &CognitionRequest::new("hello"),
        &ClientIdentity::host("h"),
        &SystemClock,
    )
    .unwrap_err();
    assert_eq!(err, MindDown("no skills loaded"));
}

#[test]
fn adopted_document_is_not_mutated() {
    let text = r#"{"query":"q","extra":{"b":1,"a":2},"answers":[]}"#;
    let c: Cognition = text.parse().unwrap();
    assert_eq!(c.to_string(), text);
    let again = Cognition::from_json(c.json().clone());
    assert_eq!(again, c);
}

#[test]
fn serde_roundtrip_of_live_cognition() {
    let mind = EchoMind::default();
    let c = ask(&mind, &CognitionRequest::new("hello").max_count(2));
    let value = serde_json::to_value(&c).unwrap();
    let back: Cognition = serde_json::from_value(value).unwrap();
    assert_eq!(back.to_string(), c.to_string());
}

proptest! {
    #[test]
    fn prop_text_roundtrip_is_stable(query in ".{0,40}", count in 0usize..4) {
        let mind = EchoMind::default();
        let c = ask(&mind, &CognitionRequest::new(query).max_count(count));
        let back: Cognition = c.to_string().parse().unwrap();
        prop_assert_eq!(back.to_string(), c.to_string());
        prop_assert_eq!(back, c);
    }

    #[test]
    fn prop_set_query_then_query(prior in ".{0,20}", next in ".{0,20}") {
        let mind = EchoMind::default();
        let mut c = ask(&mind, &CognitionRequest::new(prior));
        c.set_query(next.clone());
        prop_assert_eq!(c.query(), next.as_str());

        let mut empty = Cognition::new();
        prop_assert_eq!(empty.set_query(next.clone()).query(), next.as_str());
    }

    #[test]
    fn prop_client_id_decodes_to_client(name in "\\PC{0,24}") {
        let mind = EchoMind::default();
        let identity = ClientIdentity::anonymous(name);
        let c = Cognition::react(&mind, &CognitionRequest::new("q"), &identity, &SystemClock).unwrap();
        prop_assert_eq!(c.client().unwrap(), identity.client());
    }
}
