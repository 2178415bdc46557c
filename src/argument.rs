//! Arguments - the mind's output unit.
//!
//! An argument is the chain of thoughts the mind went through to reach an
//! answer, together with the actions it wants to perform and the skills that
//! fired. A cognition never looks inside an argument; it asks for the
//! argument's *finding* and stores that.

use crate::action::{Action, PHRASES_KEY};
use crate::language::Language;
use crate::thought::Thought;

/// Materialisation of a mind's output into an answer thought.
///
/// `M` is the mind that produced the argument; implementations may consult
/// it while rendering.
pub trait Finding<M: ?Sized> {
    /// Renders this argument as a serialisable answer.
    fn finding(&self, mind: &M, client: &str, language: Language) -> Thought;
}

/// A chain of thoughts with the actions and skills it led to.
///
/// # Examples
///
/// ```
/// use kumarmind::{Action, Argument, Thought};
///
/// let mut premise = Thought::new();
/// premise.add_observation("name", "Ada");
///
/// let argument = Argument::new()
///     .think(premise)
///     .action(Action::answer(["Hello $name$!"]))
///     .skill("/kumar_skill_data/en/greet.txt");
///
/// let answer = argument.mindmeld();
/// assert_eq!(answer.observation("name"), Some("Ada"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Argument {
    thoughts: Vec<Thought>,
    actions: Vec<Action>,
    skills: Vec<String>,
}

impl Argument {
    /// Creates an empty argument.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a thought to the chain (newest last).
    #[must_use]
    pub fn think(mut self, thought: Thought) -> Self {
        self.thoughts.push(thought);
        self
    }

    /// Appends an action.
    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Appends a skill pointer.
    #[must_use]
    pub fn skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.push(skill.into());
        self
    }

    /// Melds the chain into a single thought.
    ///
    /// Data rows of newer thoughts come first so that the latest observations
    /// shadow older ones.
    #[must_use]
    pub fn mindmeld(&self) -> Thought {
        let rows = self
            .thoughts
            .iter()
            .rev()
            .flat_map(|t| t.data().iter().cloned())
            .collect();
        let mut melded = Thought::new();
        melded.set_data(rows);
        melded
    }
}

impl<M: ?Sized> Finding<M> for Argument {
    /// Melds the chain, then attaches the actions with `$key$` placeholders
    /// in their phrases bound to the melded observations, and the skills.
    fn finding(&self, _mind: &M, _client: &str, language: Language) -> Thought {
        let mut answer = self.mindmeld();
        let bindings = answer.observations();

        for action in &self.actions {
            let mut json = action.json().clone();
            let phrases = action.phrases();
            if !phrases.is_empty() {
                let bound = phrases
                    .iter()
                    .map(|p| serde_json::Value::String(bind(p, &bindings)))
                    .collect();
                json.insert(PHRASES_KEY.to_string(), serde_json::Value::Array(bound));
            }
            if !language.is_unknown() {
                json.entry("language")
                    .or_insert_with(|| serde_json::Value::String(language.name().to_string()));
            }
            answer.add_action(Action::from_json(json));
        }
        for skill in &self.skills {
            answer.add_skill(skill.clone());
        }
        answer
    }
}

/// Replaces `$key$` with the bound value for every binding.
fn bind(phrase: &str, bindings: &[(String, String)]) -> String {
    let mut out = phrase.to_string();
    for (key, value) in bindings {
        let placeholder = format!("${key}$");
        if out.contains(&placeholder) {
            out = out.replace(&placeholder, value);
        }
    }
    out
}
