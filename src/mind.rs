//! The mind - the reasoning engine a cognition is driven by.
//!
//! The engine itself lives elsewhere. This trait is the narrow contract a
//! cognition needs from it: one `react` call per query.

use crate::argument::Finding;
use crate::language::Language;
use crate::thought::Thought;

/// A reasoning engine reacting to user queries.
pub trait Mind {
    /// The engine's output unit.
    type Argument: Finding<Self>;

    /// Failure of a reaction; handed to the caller unchanged.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Reacts to `query`, producing at most `max_count` arguments.
    ///
    /// `observation` seeds the reasoning with context such as the client's
    /// timezone, location and language.
    ///
    /// # Errors
    ///
    /// Returns the engine's own error when no reaction can be computed.
    fn react(
        &self,
        query: &str,
        language: Language,
        max_count: usize,
        client: &str,
        observation: Thought,
    ) -> Result<Vec<Self::Argument>, Self::Error>;
}
