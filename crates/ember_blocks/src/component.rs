//! Block component trait

use crate::host::HostWorld;
use ember_core::{BlockPos, Identifier};

/// A block behavior driven by host lifecycle callbacks
///
/// Every hook has a default no-op body; concrete behaviors override only the
/// hooks they need. One component instance serves every placed block of its
/// type, so hooks receive the block position and keep any per-block state in
/// an explicit map keyed by it.
pub trait BlockComponent: Send {
    /// Identifier this component is registered under
    fn identifier(&self) -> &Identifier;

    /// Block was placed in the world
    fn on_place(&mut self, _world: &mut dyn HostWorld, _pos: BlockPos) {}

    /// Regular engine tick for the block
    fn on_tick(&mut self, _world: &mut dyn HostWorld, _pos: BlockPos) {}

    /// Random tick for the block
    fn on_random_tick(&mut self, _world: &mut dyn HostWorld, _pos: BlockPos) {}

    /// An entity entered the block's footprint
    fn on_step_on(&mut self, _world: &mut dyn HostWorld, _pos: BlockPos, _entity: u64) {}

    /// An entity left the block's footprint
    fn on_step_off(&mut self, _world: &mut dyn HostWorld, _pos: BlockPos, _entity: u64) {}

    /// A player interacted with the block
    fn on_player_interact(&mut self, _world: &mut dyn HostWorld, _pos: BlockPos, _player: u64) {}

    /// A player destroyed the block
    fn on_player_destroy(&mut self, _world: &mut dyn HostWorld, _pos: BlockPos, _player: u64) {}

    /// A player is about to place the block; return false to cancel
    fn before_player_place(
        &mut self,
        _world: &mut dyn HostWorld,
        _pos: BlockPos,
        _player: u64,
    ) -> bool {
        true
    }
}
