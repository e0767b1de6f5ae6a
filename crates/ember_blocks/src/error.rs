//! Component framework errors

use ember_core::{Identifier, IdentifierError};
use thiserror::Error;

/// Errors raised by component construction and registration
///
/// These are configuration errors: they surface at startup, never during
/// callback dispatch.
#[derive(Debug, Error)]
pub enum ComponentError {
    /// Component was built without a usable identifier
    #[error("invalid component identifier: {0}")]
    InvalidIdentifier(#[from] IdentifierError),
    /// Identifier already present in the registry
    #[error("component already registered: {0}")]
    AlreadyRegistered(Identifier),
    /// Lookup of an identifier no component was registered under
    #[error("component not registered: {0}")]
    NotRegistered(Identifier),
}
