//! Namespaced string identifiers

use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Identifier string was empty
    #[error("identifier is empty")]
    Empty,
    /// No `namespace:` prefix
    #[error("identifier '{0}' has no namespace")]
    MissingNamespace(String),
    /// Namespace or path segment was empty
    #[error("identifier '{0}' has an empty segment")]
    EmptySegment(String),
    /// Character outside `[a-z0-9_.-]`
    #[error("identifier '{0}' contains invalid character '{1}'")]
    InvalidCharacter(String, char),
}

/// A validated `namespace:path` identifier
///
/// Used for block components, entity definitions, and as the prefix of
/// tag-encoded parameters. Both segments are non-empty and limited to
/// lowercase alphanumerics plus `_`, `.` and `-`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    full: String,
    colon: usize,
}

impl Identifier {
    /// Parse and validate an identifier
    pub fn parse(s: &str) -> Result<Self, IdentifierError> {
        if s.is_empty() {
            return Err(IdentifierError::Empty);
        }
        let colon = s
            .find(':')
            .ok_or_else(|| IdentifierError::MissingNamespace(s.into()))?;
        let (namespace, path) = (&s[..colon], &s[colon + 1..]);
        if namespace.is_empty() || path.is_empty() {
            return Err(IdentifierError::EmptySegment(s.into()));
        }
        for segment in [namespace, path] {
            if let Some(c) = segment
                .chars()
                .find(|c| !matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-'))
            {
                return Err(IdentifierError::InvalidCharacter(s.into(), c));
            }
        }
        Ok(Self {
            full: s.into(),
            colon,
        })
    }

    /// The full `namespace:path` string
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.full
    }

    /// The namespace segment
    #[inline]
    pub fn namespace(&self) -> &str {
        &self.full[..self.colon]
    }

    /// The path segment
    #[inline]
    pub fn path(&self) -> &str {
        &self.full[self.colon + 1..]
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({:?})", self.full)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full)
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = IdentifierError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.full
    }
}
