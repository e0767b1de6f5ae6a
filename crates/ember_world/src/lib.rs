//! # ember_world - Host World Model
//!
//! A single-threaded world that stands in for the host engine: it owns
//! blocks, entities, and persisted block state, and delivers lifecycle
//! callbacks to registered block components. Step-on/step-off events are
//! synthesized when entities move; ticks are delivered per block from
//! [`World::tick`].

pub mod entity;
pub mod world;

pub mod prelude {
    pub use crate::entity::{Entity, Health};
    pub use crate::world::World;
}

pub use prelude::*;
