//! World entities

use ember_core::Identifier;
use serde::{Deserialize, Serialize};

/// Health of a world entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    /// Current health
    pub current: f32,
    /// Maximum health
    pub max: f32,
}

impl Health {
    /// Create a health pool at full
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Apply damage; returns the amount actually dealt
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        if self.is_dead() {
            return 0.0;
        }
        let dealt = amount.min(self.current);
        self.current -= dealt;
        dealt
    }

    /// Heal up to max; returns the amount actually healed
    pub fn heal(&mut self, amount: f32) -> f32 {
        if self.is_dead() {
            return 0.0;
        }
        let old = self.current;
        self.current = (self.current + amount).min(self.max);
        self.current - old
    }

    /// Whether health has reached zero
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Whether at full health
    #[inline]
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

/// An entity tracked by the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// World-unique entity ID
    pub id: u64,
    /// World position
    pub position: [f32; 3],
    /// Health pool
    pub health: Health,
    /// Tags carried by the entity
    pub tags: Vec<String>,
    /// Definition this entity was spawned from, if any
    pub definition: Option<Identifier>,
}

impl Entity {
    /// Create a plain entity
    pub fn new(id: u64, position: [f32; 3], max_health: f32) -> Self {
        Self {
            id,
            position,
            health: Health::new(max_health),
            tags: Vec::new(),
            definition: None,
        }
    }

    /// Whether the entity is alive
    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.health.is_dead()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_and_death() {
        let mut health = Health::new(10.0);

        assert_eq!(health.apply_damage(4.0), 4.0);
        assert_eq!(health.current, 6.0);
        assert!(!health.is_dead());

        // Overkill is clamped to what was left
        assert_eq!(health.apply_damage(100.0), 6.0);
        assert!(health.is_dead());

        // The dead take no further damage
        assert_eq!(health.apply_damage(5.0), 0.0);
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut health = Health::new(10.0);
        health.apply_damage(7.0);

        assert_eq!(health.heal(20.0), 7.0);
        assert!(health.is_full());
    }
}
