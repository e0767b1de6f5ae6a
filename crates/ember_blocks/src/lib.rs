//! # ember_blocks - Block Component Framework
//!
//! Event-driven block behaviors for the Emberwatch mod runtime.
//!
//! # Features
//!
//! - Capability-set component trait with optional lifecycle hooks
//! - Tag-encoded parameters with typed resolution and defaults
//! - Damage-on-step emitter with persisted triggered state
//! - Component registry with one-time startup registration
//!
//! # Example
//!
//! ```ignore
//! use ember_blocks::prelude::*;
//!
//! let mut registry = ComponentRegistry::new();
//! register_builtin(&mut registry)?;
//!
//! let mut emitter = registry.instantiate(&damage_on_step_id()).unwrap();
//! // The host delivers callbacks from here on:
//! emitter.on_step_on(&mut world, pos, entity);
//! emitter.on_tick(&mut world, pos);
//! ```

pub mod component;
pub mod emitter;
pub mod error;
pub mod host;
pub mod params;
pub mod registry;

pub mod prelude {
    pub use crate::component::BlockComponent;
    pub use crate::emitter::{
        damage_on_step_id, DamageOnStepEmitter, EmitterBase, DAMAGE_ON_STEP_ID,
    };
    pub use crate::error::ComponentError;
    pub use crate::host::HostWorld;
    pub use crate::params::{resolve_parameter, EmitterParams, TagParam};
    pub use crate::registry::{register_builtin, ComponentRegistry};
}

pub use prelude::*;
