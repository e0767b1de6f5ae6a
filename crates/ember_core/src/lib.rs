//! # ember_core - Emberwatch Core
//!
//! Shared primitives for the Emberwatch mod runtime:
//! - Namespaced identifiers for components and entity definitions
//! - Integer block positions and the occupancy region of a block
//! - Axis-aligned bounds for entity queries

pub mod bounds;
pub mod identifier;
pub mod position;

pub use bounds::*;
pub use identifier::*;
pub use position::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::bounds::Aabb;
    pub use crate::identifier::{Identifier, IdentifierError};
    pub use crate::position::BlockPos;
}
