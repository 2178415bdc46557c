//! # kumarmind - cognition records for the Kumar mind
//!
//! A cognition fuses one user query with the mind's reaction to it. It is an
//! ordered JSON document that can be stored, read back unchanged, and
//! replayed as context for the next query.
//!
//! ## Core Concepts
//!
//! - **Thought**: observations, actions and skill pointers; the mind's context
//! - **Argument**: the mind's output unit, rendered into an answer by its finding
//! - **Mind**: the reasoning engine a cognition asks
//! - **Cognition**: query, answers and metadata in one document
//! - **Dispute**: a thought recalled from a cognition, seeding the follow-up query
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kumarmind::{ClientIdentity, Cognition, CognitionRequest, SystemClock};
//!
//! let request = CognitionRequest::new("hello").language("en").max_count(1);
//! let cognition = Cognition::react(&mind, &request, &ClientIdentity::host("127.0.0.1"), &SystemClock)?;
//! println!("{}", cognition.expression());
//!
//! // seed the next turn with what was just said
//! let dispute = cognition.recall_dispute();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Document building blocks
pub mod action;
pub mod language;
pub mod thought;

// Reasoning contract
pub mod argument;
pub mod mind;

// Collaborators
pub mod clock;
pub mod date;
pub mod diagnostics;
pub mod identity;
pub mod skill;

// Records
pub mod cognition;
pub mod error;

// Transit providers
pub mod transit;

// Re-export primary types at crate root for convenience
pub use action::Action;
pub use argument::{Argument, Finding};
pub use clock::{Clock, SystemClock};
pub use cognition::{Cognition, CognitionRequest};
pub use diagnostics::{DiagnosticSink, MemorySink, TracingSink};
pub use error::{MindError, MindResult, TransitError};
pub use identity::{ClientIdentity, Identity, IdentityKind};
pub use language::Language;
pub use mind::Mind;
pub use skill::{skill_link, SkillLinks};
pub use thought::Thought;
pub use transit::{BvbProvider, EfaTransport, Location, LocationType, NetworkId, TransitProvider};
