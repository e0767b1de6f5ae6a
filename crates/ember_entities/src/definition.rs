//! Sentry definition records

use crate::library::DefinitionError;
use ember_core::Identifier;
use serde::{Deserialize, Serialize};

/// Targeting configuration of a sentry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetingConfig {
    /// Acquisition radius in blocks
    pub radius: f32,
    /// Whether line of sight is required to hold a target
    #[serde(default = "default_true")]
    pub must_see: bool,
    /// Entity tags eligible for targeting; empty means any hostile
    #[serde(default)]
    pub target_tags: Vec<String>,
}

/// Ranged attack configuration of a sentry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangedAttackConfig {
    /// Projectile entity fired at the target
    pub projectile: Identifier,
    /// Ticks between attacks
    pub interval_ticks: u32,
    /// Shots fired per attack
    #[serde(default = "default_one")]
    pub burst_shots: u32,
    /// Projectile spread in degrees
    #[serde(default)]
    pub spread: f32,
}

/// What a matched interaction does
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionOutcome {
    /// Remove the sentry from the world
    Remove,
    /// Fire a named event on the sentry
    Trigger { event: String },
}

/// A tag-gated interaction rule
///
/// The host matches `event` against its interaction surface (for the shipped
/// sentries, the removal wrench) and only applies the rule when the
/// interacting player carries `required_tag`, if one is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRule {
    /// Host interaction event name
    pub event: String,
    /// Tag the interacting player must carry
    #[serde(default)]
    pub required_tag: Option<String>,
    /// Effect of the interaction
    pub outcome: InteractionOutcome,
}

/// A turret-class sentry NPC definition
///
/// Consumed verbatim by the host engine's behavior-tree and combat systems;
/// nothing here is interpreted beyond validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDefinition {
    /// Namespaced definition identifier
    pub identifier: Identifier,
    /// Display name shown by the host
    #[serde(default)]
    pub display_name: String,
    /// Maximum health
    pub health: u32,
    /// Target acquisition
    pub targeting: TargetingConfig,
    /// Ranged attack
    pub attack: RangedAttackConfig,
    /// Loot table reference dropped on death
    #[serde(default)]
    pub loot_table: Option<String>,
    /// Tag-gated interaction rules
    #[serde(default)]
    pub interactions: Vec<InteractionRule>,
    /// Tags carried by the sentry
    #[serde(default)]
    pub tags: Vec<String>,
}

impl EntityDefinition {
    /// Validate the record before it enters a library
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.health == 0 {
            return Err(self.invalid("health must be at least 1"));
        }
        if !(self.targeting.radius > 0.0) {
            return Err(self.invalid("targeting radius must be positive"));
        }
        if self.attack.interval_ticks == 0 {
            return Err(self.invalid("attack interval must be at least 1 tick"));
        }
        if self.attack.burst_shots == 0 {
            return Err(self.invalid("burst must fire at least 1 shot"));
        }
        if let Some(loot) = &self.loot_table {
            if !loot.ends_with(".json") {
                return Err(self.invalid("loot table reference must point at a .json file"));
            }
        }
        for rule in &self.interactions {
            if rule.event.is_empty() {
                return Err(self.invalid("interaction event name is empty"));
            }
        }
        Ok(())
    }

    fn invalid(&self, problem: &str) -> DefinitionError {
        DefinitionError::Invalid {
            definition: self.identifier.clone(),
            problem: problem.into(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_one() -> u32 {
    1
}
