//! # ember_entities - Sentry Entity Definitions
//!
//! Declarative records for turret-class sentry NPCs: targeting radius,
//! ranged attack timing, health, loot table references, and tag-gated
//! interaction rules. The records are pass-through data for the host
//! engine's combat and behavior systems; this crate only parses, validates,
//! and indexes them.

pub mod definition;
pub mod library;

pub mod prelude {
    pub use crate::definition::{
        EntityDefinition, InteractionOutcome, InteractionRule, RangedAttackConfig, TargetingConfig,
    };
    pub use crate::library::{DefinitionError, DefinitionLibrary};
}

pub use prelude::*;
