//! Host services consumed by block components

use ember_core::{Aabb, BlockPos};

/// The slice of the host engine a block component is allowed to touch
///
/// Components never own world state; they read block configuration, query
/// entities, apply damage, and mirror small values into the block's
/// persisted state through this surface. The host guarantees callbacks run
/// to completion one at a time, so no locking is involved.
pub trait HostWorld {
    /// Static tag list of the block at `pos`
    fn tags_at(&self, pos: BlockPos) -> Vec<String>;

    /// IDs of all entities whose position lies inside `bounds`
    fn entities_in_box(&self, bounds: &Aabb) -> Vec<u64>;

    /// Apply `amount` damage to an entity
    fn apply_damage(&mut self, entity: u64, amount: u32);

    /// Read a persisted boolean from the block's state
    fn persisted_bool(&self, pos: BlockPos, key: &str) -> Option<bool>;

    /// Write a persisted boolean into the block's state
    fn set_persisted_bool(&mut self, pos: BlockPos, key: &str, value: bool);
}
