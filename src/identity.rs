//! Client identities.
//!
//! A cognition records who asked. The identity is reduced to a client
//! string of the form `kind:name`, e.g. `host:127.0.0.1` or
//! `email:ada@example.org`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Source of the originating client identifier.
pub trait Identity {
    /// The client identifier string.
    fn client(&self) -> String;
}

/// How a client was identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityKind {
    /// Identified by the remote host only.
    Host,
    /// A logged-in user.
    Email,
    /// A client-chosen anonymous id.
    Anonymous,
}

impl IdentityKind {
    /// Name used in client strings.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Email => "email",
            Self::Anonymous => "anonymous",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name {
            "host" => Some(Self::Host),
            "email" => Some(Self::Email),
            "anonymous" => Some(Self::Anonymous),
            _ => None,
        }
    }
}

/// A client identity.
///
/// # Examples
///
/// ```
/// use kumarmind::{ClientIdentity, Identity};
///
/// let id = ClientIdentity::email("ada@example.org");
/// assert_eq!(id.client(), "email:ada@example.org");
/// assert_eq!(ClientIdentity::parse(&id.client()), Some(id));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientIdentity {
    kind: IdentityKind,
    name: String,
}

impl ClientIdentity {
    /// Creates an identity of the given kind.
    #[must_use]
    pub fn new(kind: IdentityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Identity of a remote host.
    #[must_use]
    pub fn host(name: impl Into<String>) -> Self {
        Self::new(IdentityKind::Host, name)
    }

    /// Identity of a logged-in user.
    #[must_use]
    pub fn email(name: impl Into<String>) -> Self {
        Self::new(IdentityKind::Email, name)
    }

    /// Identity chosen by an anonymous client.
    #[must_use]
    pub fn anonymous(name: impl Into<String>) -> Self {
        Self::new(IdentityKind::Anonymous, name)
    }

    /// Parses a `kind:name` client string.
    #[must_use]
    pub fn parse(client: &str) -> Option<Self> {
        let (kind, name) = client.split_once(':')?;
        Some(Self::new(IdentityKind::parse(kind)?, name))
    }

    /// How the client was identified.
    pub const fn kind(&self) -> IdentityKind {
        self.kind
    }

    /// The identifier within its kind.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Identity for ClientIdentity {
    fn client(&self) -> String {
        format!("{}:{}", self.kind.name(), self.name)
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.name(), self.name)
    }
}
