//! Damage emitters
//!
//! The emitter contract ([`EmitterBase`]) covers identification and
//! tag-parameter loading shared by any "apply damage on world interaction"
//! block behavior. [`DamageOnStepEmitter`] is the shipped implementation: it
//! tracks a persisted triggered flag per block instance and damages every
//! entity standing in the block's footprint.

use crate::component::BlockComponent;
use crate::error::ComponentError;
use crate::host::HostWorld;
use crate::params::EmitterParams;
use ember_core::{BlockPos, Identifier};
use log::{debug, trace};
use std::collections::{HashMap, HashSet};

/// Identifier the step emitter registers under
pub const DAMAGE_ON_STEP_ID: &str = "emberwatch:damage_on_step";

/// The step emitter's registration identifier
pub fn damage_on_step_id() -> Identifier {
    Identifier::parse(DAMAGE_ON_STEP_ID).expect("const identifier is valid")
}

/// Shared contract of damage-emitting block behaviors
///
/// Owns the component identifier and derives the tag keys and persisted
/// state key from it. Construction with an unusable identifier is a fatal
/// configuration error caught at registration time.
#[derive(Debug, Clone)]
pub struct EmitterBase {
    identifier: Identifier,
}

impl EmitterBase {
    /// Create the contract for `identifier`
    pub fn new(identifier: &str) -> Result<Self, ComponentError> {
        Ok(Self {
            identifier: Identifier::parse(identifier)?,
        })
    }

    /// The emitter's identifier
    #[inline]
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Key of the persisted triggered flag
    pub fn triggered_key(&self) -> String {
        format!("{}_triggered", self.identifier)
    }

    /// Read this emitter's parameters from a block's tag list
    pub fn load_params(&self, tags: &[String]) -> EmitterParams {
        EmitterParams::from_tags(&self.identifier, tags)
    }
}

/// Per-block-instance runtime state
///
/// Created lazily on the first callback delivered for a position and dropped
/// when the block is destroyed.
#[derive(Debug, Default)]
struct InstanceState {
    /// Parameters sampled on the first tick; None until then
    params: Option<EmitterParams>,
    /// Mirrors the persisted triggered flag
    triggered: bool,
    /// Occupants already damaged during the current entry (non-continuous)
    hit_this_entry: HashSet<u64>,
}

/// Damages entities standing on the block
///
/// State machine per block instance: uninitialized until the first tick
/// samples the tag parameters, then idle or triggered. Step-on raises the
/// persisted triggered flag immediately; each tick while triggered re-scans
/// the occupancy box, damages occupants, and lowers the flag once the box is
/// empty. Every occupant takes the full configured amount, never a share.
pub struct DamageOnStepEmitter {
    base: EmitterBase,
    instances: HashMap<BlockPos, InstanceState>,
}

impl DamageOnStepEmitter {
    /// Create the emitter under its default identifier
    pub fn new() -> Result<Self, ComponentError> {
        Self::with_identifier(DAMAGE_ON_STEP_ID)
    }

    /// Create the emitter under a custom identifier
    pub fn with_identifier(identifier: &str) -> Result<Self, ComponentError> {
        Ok(Self {
            base: EmitterBase::new(identifier)?,
            instances: HashMap::new(),
        })
    }

    /// Whether the block at `pos` is currently triggered
    pub fn is_triggered(&self, pos: BlockPos) -> bool {
        self.instances.get(&pos).is_some_and(|s| s.triggered)
    }

    /// Parameters sampled for `pos`, if the first tick has happened
    pub fn params_at(&self, pos: BlockPos) -> Option<EmitterParams> {
        self.instances.get(&pos).and_then(|s| s.params)
    }

    /// Number of block instances with live state
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Fetch or lazily create the state for `pos`
    ///
    /// A freshly created state adopts the persisted triggered flag, so a
    /// block that was triggered when the world unloaded resumes as such.
    fn state_mut<'a>(
        instances: &'a mut HashMap<BlockPos, InstanceState>,
        world: &dyn HostWorld,
        key: &str,
        pos: BlockPos,
    ) -> &'a mut InstanceState {
        instances.entry(pos).or_insert_with(|| InstanceState {
            triggered: world.persisted_bool(pos, key).unwrap_or(false),
            ..InstanceState::default()
        })
    }

    /// Damage every current occupant of the cell per the gating rules
    fn damage_occupants(
        state: &mut InstanceState,
        world: &mut dyn HostWorld,
        params: EmitterParams,
        occupants: &[u64],
    ) {
        for &entity in occupants {
            let first_hit = state.hit_this_entry.insert(entity);
            if params.continuous || first_hit {
                world.apply_damage(entity, params.damage);
            }
        }
    }
}

impl BlockComponent for DamageOnStepEmitter {
    fn identifier(&self) -> &Identifier {
        self.base.identifier()
    }

    fn on_place(&mut self, world: &mut dyn HostWorld, pos: BlockPos) {
        let key = self.base.triggered_key();
        Self::state_mut(&mut self.instances, &*world, &key, pos);
        debug!("{} placed at {}", self.base.identifier(), pos);
    }

    fn on_tick(&mut self, world: &mut dyn HostWorld, pos: BlockPos) {
        let key = self.base.triggered_key();
        let state = Self::state_mut(&mut self.instances, &*world, &key, pos);

        // First tick after placement samples the tag parameters
        let params = *state.params.get_or_insert_with(|| {
            let params = self.base.load_params(&world.tags_at(pos));
            debug!("{} at {} initialized: {:?}", self.base.identifier(), pos, params);
            params
        });

        if !state.triggered {
            return;
        }

        let occupants = world.entities_in_box(&pos.occupancy_box());
        if occupants.is_empty() {
            state.triggered = false;
            state.hit_this_entry.clear();
            world.set_persisted_bool(pos, &key, false);
            trace!("{} at {} is idle again", self.base.identifier(), pos);
            return;
        }

        Self::damage_occupants(state, world, params, &occupants);
    }

    fn on_step_on(&mut self, world: &mut dyn HostWorld, pos: BlockPos, entity: u64) {
        let key = self.base.triggered_key();
        let state = Self::state_mut(&mut self.instances, &*world, &key, pos);

        state.triggered = true;
        world.set_persisted_bool(pos, &key, true);
        trace!("entity {} stepped on {} at {}", entity, self.base.identifier(), pos);
    }

    fn on_step_off(&mut self, world: &mut dyn HostWorld, pos: BlockPos, entity: u64) {
        let key = self.base.triggered_key();
        let state = Self::state_mut(&mut self.instances, &*world, &key, pos);
        state.hit_this_entry.remove(&entity);

        if !state.triggered {
            return;
        }

        let params = *state
            .params
            .get_or_insert_with(|| self.base.load_params(&world.tags_at(pos)));

        // Anyone still standing in the cell takes a parting hit
        let occupants = world.entities_in_box(&pos.occupancy_box());
        Self::damage_occupants(state, world, params, &occupants);

        if occupants.is_empty() {
            state.triggered = false;
            state.hit_this_entry.clear();
            world.set_persisted_bool(pos, &key, false);
            trace!("{} at {} is idle again", self.base.identifier(), pos);
        }
    }

    fn on_player_destroy(&mut self, _world: &mut dyn HostWorld, pos: BlockPos, _player: u64) {
        if self.instances.remove(&pos).is_some() {
            debug!("{} at {} destroyed, state dropped", self.base.identifier(), pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::Aabb;
    use std::collections::BTreeMap;

    /// Minimal host: fixed tags, scriptable occupants, recorded damage
    struct MockHost {
        tags: Vec<String>,
        occupants: Vec<u64>,
        damage_log: Vec<(u64, u32)>,
        persisted: BTreeMap<(BlockPos, String), bool>,
    }

    impl MockHost {
        fn new(tags: &[&str]) -> Self {
            Self {
                tags: tags.iter().map(|s| s.to_string()).collect(),
                occupants: Vec::new(),
                damage_log: Vec::new(),
                persisted: BTreeMap::new(),
            }
        }

        fn triggered(&self, pos: BlockPos) -> Option<bool> {
            self.persisted
                .get(&(pos, format!("{DAMAGE_ON_STEP_ID}_triggered")))
                .copied()
        }
    }

    impl HostWorld for MockHost {
        fn tags_at(&self, _pos: BlockPos) -> Vec<String> {
            self.tags.clone()
        }
        fn entities_in_box(&self, _bounds: &Aabb) -> Vec<u64> {
            self.occupants.clone()
        }
        fn apply_damage(&mut self, entity: u64, amount: u32) {
            self.damage_log.push((entity, amount));
        }
        fn persisted_bool(&self, pos: BlockPos, key: &str) -> Option<bool> {
            self.persisted.get(&(pos, key.to_string())).copied()
        }
        fn set_persisted_bool(&mut self, pos: BlockPos, key: &str, value: bool) {
            self.persisted.insert((pos, key.to_string()), value);
        }
    }

    const POS: BlockPos = BlockPos::new(0, 0, 0);

    #[test]
    fn test_invalid_identifier_is_fatal() {
        assert!(matches!(
            DamageOnStepEmitter::with_identifier(""),
            Err(ComponentError::InvalidIdentifier(_))
        ));
        assert!(DamageOnStepEmitter::with_identifier("no_namespace").is_err());
    }

    #[test]
    fn test_step_on_persists_triggered() {
        let mut emitter = DamageOnStepEmitter::new().unwrap();
        let mut host = MockHost::new(&["emberwatch:damage_on_step_damage:3"]);

        emitter.on_step_on(&mut host, POS, 7);

        assert!(emitter.is_triggered(POS));
        assert_eq!(host.triggered(POS), Some(true));
        // Step-on itself never damages
        assert!(host.damage_log.is_empty());
    }

    #[test]
    fn test_tick_damages_occupant() {
        let mut emitter = DamageOnStepEmitter::new().unwrap();
        let mut host = MockHost::new(&["emberwatch:damage_on_step_damage:3"]);
        host.occupants = vec![7];

        emitter.on_step_on(&mut host, POS, 7);
        emitter.on_tick(&mut host, POS);

        assert_eq!(host.damage_log, vec![(7, 3)]);
        assert_eq!(emitter.params_at(POS).unwrap().damage, 3);
    }

    #[test]
    fn test_non_continuous_hits_once_per_entry() {
        let mut emitter = DamageOnStepEmitter::new().unwrap();
        let mut host = MockHost::new(&["emberwatch:damage_on_step_damage:2"]);
        host.occupants = vec![7];

        emitter.on_step_on(&mut host, POS, 7);
        emitter.on_tick(&mut host, POS);
        emitter.on_tick(&mut host, POS);
        emitter.on_tick(&mut host, POS);

        assert_eq!(host.damage_log, vec![(7, 2)]);

        // Leaving and re-entering qualifies for another hit
        host.occupants.clear();
        emitter.on_step_off(&mut host, POS, 7);
        host.occupants = vec![7];
        emitter.on_step_on(&mut host, POS, 7);
        emitter.on_tick(&mut host, POS);

        assert_eq!(host.damage_log, vec![(7, 2), (7, 2)]);
    }

    #[test]
    fn test_continuous_hits_every_tick() {
        let mut emitter = DamageOnStepEmitter::new().unwrap();
        let mut host = MockHost::new(&[
            "emberwatch:damage_on_step_damage:2",
            "emberwatch:damage_on_step_continuous",
        ]);
        host.occupants = vec![7];

        emitter.on_step_on(&mut host, POS, 7);
        emitter.on_tick(&mut host, POS);
        emitter.on_tick(&mut host, POS);
        emitter.on_tick(&mut host, POS);

        assert_eq!(host.damage_log, vec![(7, 2), (7, 2), (7, 2)]);
    }

    #[test]
    fn test_simultaneous_occupants_each_take_full_damage() {
        let mut emitter = DamageOnStepEmitter::new().unwrap();
        let mut host = MockHost::new(&["emberwatch:damage_on_step_damage:4"]);
        host.occupants = vec![7, 8];

        emitter.on_step_on(&mut host, POS, 7);
        emitter.on_step_on(&mut host, POS, 8);
        emitter.on_tick(&mut host, POS);

        assert_eq!(host.damage_log, vec![(7, 4), (8, 4)]);
    }

    #[test]
    fn test_tick_untriggers_empty_cell() {
        let mut emitter = DamageOnStepEmitter::new().unwrap();
        let mut host = MockHost::new(&[]);

        emitter.on_step_on(&mut host, POS, 7);
        assert_eq!(host.triggered(POS), Some(true));

        // Occupant vanished before the next tick
        emitter.on_tick(&mut host, POS);

        assert!(!emitter.is_triggered(POS));
        assert_eq!(host.triggered(POS), Some(false));
        assert!(host.damage_log.is_empty());
    }

    #[test]
    fn test_step_off_untriggers_and_persists() {
        let mut emitter = DamageOnStepEmitter::new().unwrap();
        let mut host = MockHost::new(&[]);
        host.occupants = vec![7];

        emitter.on_step_on(&mut host, POS, 7);
        host.occupants.clear();
        emitter.on_step_off(&mut host, POS, 7);

        assert!(!emitter.is_triggered(POS));
        assert_eq!(host.triggered(POS), Some(false));
    }

    #[test]
    fn test_step_off_damages_remaining_occupant() {
        let mut emitter = DamageOnStepEmitter::new().unwrap();
        let mut host = MockHost::new(&["emberwatch:damage_on_step_damage:5"]);
        host.occupants = vec![7, 8];

        emitter.on_step_on(&mut host, POS, 7);
        emitter.on_step_on(&mut host, POS, 8);

        // 7 leaves; 8 is still in the cell and takes the parting hit
        host.occupants = vec![8];
        emitter.on_step_off(&mut host, POS, 7);

        assert_eq!(host.damage_log, vec![(8, 5)]);
        assert!(emitter.is_triggered(POS));
    }

    #[test]
    fn test_idle_ticks_are_idempotent() {
        let mut emitter = DamageOnStepEmitter::new().unwrap();
        let mut host = MockHost::new(&[]);

        for _ in 0..10 {
            emitter.on_tick(&mut host, POS);
        }

        assert!(!emitter.is_triggered(POS));
        assert_eq!(host.triggered(POS), None);
        assert!(host.damage_log.is_empty());
    }

    #[test]
    fn test_state_resumes_from_persisted_flag() {
        let mut emitter = DamageOnStepEmitter::new().unwrap();
        let mut host = MockHost::new(&[]);
        host.set_persisted_bool(POS, &format!("{DAMAGE_ON_STEP_ID}_triggered"), true);
        host.occupants = vec![9];

        // First delivered callback adopts the persisted flag
        emitter.on_tick(&mut host, POS);

        assert!(emitter.is_triggered(POS));
        assert_eq!(host.damage_log, vec![(9, 1)]);
    }

    #[test]
    fn test_player_destroy_drops_state() {
        let mut emitter = DamageOnStepEmitter::new().unwrap();
        let mut host = MockHost::new(&[]);

        emitter.on_step_on(&mut host, POS, 7);
        assert_eq!(emitter.instance_count(), 1);

        emitter.on_player_destroy(&mut host, POS, 1);
        assert_eq!(emitter.instance_count(), 0);
    }
}
