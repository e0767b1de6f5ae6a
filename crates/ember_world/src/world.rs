//! The world and its callback dispatch

use crate::entity::{Entity, Health};
use ember_blocks::{BlockComponent, ComponentError, ComponentRegistry, HostWorld};
use ember_core::{Aabb, BlockPos, Identifier};
use ember_entities::EntityDefinition;
use log::{debug, trace};
use std::collections::BTreeMap;

/// A placed block bound to a component
#[derive(Debug, Clone)]
struct BlockInstance {
    /// Component driving this block
    component: Identifier,
    /// Static tag list of the block type
    tags: Vec<String>,
}

/// Single-threaded host world
///
/// Owns every piece of mutable state the components touch and delivers their
/// callbacks one at a time: step events when an entity moves across a
/// block's footprint, ticks from [`World::tick`]. All iteration orders are
/// deterministic.
pub struct World {
    blocks: BTreeMap<BlockPos, BlockInstance>,
    entities: BTreeMap<u64, Entity>,
    persisted: BTreeMap<BlockPos, BTreeMap<String, bool>>,
    components: BTreeMap<Identifier, Box<dyn BlockComponent>>,
    next_entity: u64,
    ticks: u64,
}

impl World {
    /// Create a world with one instance of every registered component
    pub fn from_registry(registry: &ComponentRegistry) -> Result<Self, ComponentError> {
        let mut components = BTreeMap::new();
        for identifier in registry.identifiers() {
            components.insert(identifier.clone(), registry.instantiate(identifier)?);
        }
        debug!("world created with {} block components", components.len());
        Ok(Self {
            blocks: BTreeMap::new(),
            entities: BTreeMap::new(),
            persisted: BTreeMap::new(),
            components,
            next_entity: 1,
            ticks: 0,
        })
    }

    /// Place a block bound to `component` with the given static tags
    pub fn place_block(
        &mut self,
        pos: BlockPos,
        component: &Identifier,
        tags: Vec<String>,
    ) -> Result<(), ComponentError> {
        if !self.components.contains_key(component) {
            return Err(ComponentError::NotRegistered(component.clone()));
        }
        self.blocks.insert(
            pos,
            BlockInstance {
                component: component.clone(),
                tags,
            },
        );
        self.dispatch(pos, |c, world, pos| c.on_place(world, pos));
        Ok(())
    }

    /// Remove a block and its persisted state
    pub fn remove_block(&mut self, pos: BlockPos) {
        self.blocks.remove(&pos);
        self.persisted.remove(&pos);
    }

    /// A player destroys the block at `pos`
    pub fn player_destroy(&mut self, pos: BlockPos, player: u64) {
        self.dispatch(pos, move |c, world, pos| {
            c.on_player_destroy(world, pos, player)
        });
        self.remove_block(pos);
    }

    /// A player interacts with the block at `pos`
    pub fn player_interact(&mut self, pos: BlockPos, player: u64) {
        self.dispatch(pos, move |c, world, pos| {
            c.on_player_interact(world, pos, player)
        });
    }

    /// A player attempts to place a block; the component may cancel
    ///
    /// Consulted before the block exists, so this bypasses position
    /// dispatch. Returns whether the placement went through.
    pub fn player_place(
        &mut self,
        pos: BlockPos,
        component: &Identifier,
        tags: Vec<String>,
        player: u64,
    ) -> Result<bool, ComponentError> {
        let Some(mut instance) = self.components.remove(component) else {
            return Err(ComponentError::NotRegistered(component.clone()));
        };
        let allowed = instance.before_player_place(self, pos, player);
        self.components.insert(component.clone(), instance);

        if allowed {
            self.place_block(pos, component, tags)?;
        }
        Ok(allowed)
    }

    /// Spawn a plain entity; delivers step-on for any footprint it appears in
    pub fn spawn(&mut self, position: [f32; 3], max_health: f32) -> u64 {
        let id = self.next_entity;
        self.next_entity += 1;
        self.entities.insert(id, Entity::new(id, position, max_health));
        trace!("spawned entity {} at {:?}", id, position);
        self.deliver_step_events(id, None, position);
        id
    }

    /// Spawn an entity from a sentry definition
    pub fn spawn_defined(&mut self, definition: &EntityDefinition, position: [f32; 3]) -> u64 {
        let id = self.next_entity;
        self.next_entity += 1;
        let mut entity = Entity::new(id, position, definition.health as f32);
        entity.tags = definition.tags.clone();
        entity.definition = Some(definition.identifier.clone());
        self.entities.insert(id, entity);
        trace!("spawned {} as entity {}", definition.identifier, id);
        self.deliver_step_events(id, None, position);
        id
    }

    /// Remove an entity without step events; occupancy lag is observed on
    /// the next tick, as the host engine does
    pub fn despawn(&mut self, id: u64) {
        self.entities.remove(&id);
    }

    /// Move an entity, synthesizing step-on/step-off for crossed footprints
    pub fn move_entity(&mut self, id: u64, position: [f32; 3]) {
        let Some(entity) = self.entities.get_mut(&id) else {
            return;
        };
        let old = entity.position;
        entity.position = position;
        self.deliver_step_events(id, Some(old), position);
    }

    /// Advance the world one tick, delivering `on_tick` to every block
    pub fn tick(&mut self) {
        self.ticks += 1;
        for pos in self.block_positions() {
            self.dispatch(pos, |c, world, pos| c.on_tick(world, pos));
        }
    }

    /// Deliver a random tick to the block at `pos`
    pub fn random_tick(&mut self, pos: BlockPos) {
        self.dispatch(pos, |c, world, pos| c.on_random_tick(world, pos));
    }

    /// Ticks elapsed since creation
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Look up an entity
    pub fn entity(&self, id: u64) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Current health of an entity
    pub fn entity_health(&self, id: u64) -> Option<Health> {
        self.entities.get(&id).map(|e| e.health)
    }

    /// Number of placed blocks
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Read access to a block component, for inspection
    pub fn component(&self, identifier: &Identifier) -> Option<&dyn BlockComponent> {
        self.components.get(identifier).map(|c| c.as_ref())
    }

    fn block_positions(&self) -> Vec<BlockPos> {
        self.blocks.keys().copied().collect()
    }

    /// Compare footprint membership before and after a position change and
    /// deliver the matching step callbacks
    fn deliver_step_events(&mut self, id: u64, old: Option<[f32; 3]>, new: [f32; 3]) {
        for pos in self.block_positions() {
            let bounds = pos.occupancy_box();
            let was_in = old.is_some_and(|p| bounds.contains_point(p));
            let is_in = bounds.contains_point(new);
            if is_in && !was_in {
                self.dispatch(pos, move |c, world, pos| c.on_step_on(world, pos, id));
            } else if was_in && !is_in {
                self.dispatch(pos, move |c, world, pos| c.on_step_off(world, pos, id));
            }
        }
    }

    /// Run one callback against the component bound to `pos`
    ///
    /// The component is taken out of the map for the duration of the call so
    /// it can receive the world as its host surface.
    fn dispatch<F>(&mut self, pos: BlockPos, f: F)
    where
        F: FnOnce(&mut dyn BlockComponent, &mut dyn HostWorld, BlockPos),
    {
        let Some(identifier) = self.blocks.get(&pos).map(|b| b.component.clone()) else {
            return;
        };
        let Some(mut component) = self.components.remove(&identifier) else {
            return;
        };
        f(component.as_mut(), self, pos);
        self.components.insert(identifier, component);
    }
}

impl HostWorld for World {
    fn tags_at(&self, pos: BlockPos) -> Vec<String> {
        self.blocks
            .get(&pos)
            .map(|b| b.tags.clone())
            .unwrap_or_default()
    }

    fn entities_in_box(&self, bounds: &Aabb) -> Vec<u64> {
        self.entities
            .values()
            .filter(|e| e.is_alive() && bounds.contains_point(e.position))
            .map(|e| e.id)
            .collect()
    }

    fn apply_damage(&mut self, entity: u64, amount: u32) {
        if let Some(e) = self.entities.get_mut(&entity) {
            let dealt = e.health.apply_damage(amount as f32);
            trace!("entity {} took {} damage", entity, dealt);
            if e.health.is_dead() {
                debug!("entity {} died", entity);
            }
        }
    }

    fn persisted_bool(&self, pos: BlockPos, key: &str) -> Option<bool> {
        self.persisted.get(&pos).and_then(|m| m.get(key)).copied()
    }

    fn set_persisted_bool(&mut self, pos: BlockPos, key: &str, value: bool) {
        self.persisted
            .entry(pos)
            .or_default()
            .insert(key.to_string(), value);
    }
}
