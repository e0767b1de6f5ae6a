//! Component registry and startup registration

use crate::component::BlockComponent;
use crate::emitter::{damage_on_step_id, DamageOnStepEmitter};
use crate::error::ComponentError;
use ember_core::Identifier;
use log::debug;
use std::collections::BTreeMap;

/// Constructs a fresh component instance
pub type ComponentFactory =
    Box<dyn Fn() -> Result<Box<dyn BlockComponent>, ComponentError> + Send + Sync>;

/// Registry of block components keyed by identifier
///
/// Populated once at process start; hosts instantiate their own component
/// set from it when a world is created.
#[derive(Default)]
pub struct ComponentRegistry {
    factories: BTreeMap<Identifier, ComponentFactory>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Register a component factory under `identifier`
    ///
    /// Registering the same identifier twice is a configuration error.
    pub fn register<F>(&mut self, identifier: Identifier, factory: F) -> Result<(), ComponentError>
    where
        F: Fn() -> Result<Box<dyn BlockComponent>, ComponentError> + Send + Sync + 'static,
    {
        if self.factories.contains_key(&identifier) {
            return Err(ComponentError::AlreadyRegistered(identifier));
        }
        debug!("registered block component {}", identifier);
        self.factories.insert(identifier, Box::new(factory));
        Ok(())
    }

    /// Construct a fresh instance of the component under `identifier`
    pub fn instantiate(
        &self,
        identifier: &Identifier,
    ) -> Result<Box<dyn BlockComponent>, ComponentError> {
        let factory = self
            .factories
            .get(identifier)
            .ok_or_else(|| ComponentError::NotRegistered(identifier.clone()))?;
        factory()
    }

    /// Whether `identifier` is registered
    pub fn contains(&self, identifier: &Identifier) -> bool {
        self.factories.contains_key(identifier)
    }

    /// All registered identifiers
    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.factories.keys()
    }

    /// Number of registered components
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

/// One-time startup hook registering every shipped emitter
pub fn register_builtin(registry: &mut ComponentRegistry) -> Result<(), ComponentError> {
    registry.register(damage_on_step_id(), || {
        Ok(Box::new(DamageOnStepEmitter::new()?))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_builtin() {
        let mut registry = ComponentRegistry::new();
        register_builtin(&mut registry).unwrap();

        assert!(registry.contains(&damage_on_step_id()));
        assert_eq!(registry.len(), 1);

        let component = registry.instantiate(&damage_on_step_id()).unwrap();
        assert_eq!(component.identifier(), &damage_on_step_id());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = ComponentRegistry::new();
        register_builtin(&mut registry).unwrap();

        assert!(matches!(
            register_builtin(&mut registry),
            Err(ComponentError::AlreadyRegistered(_))
        ));
    }

    #[test]
    fn test_unknown_component() {
        let registry = ComponentRegistry::new();
        let id = Identifier::parse("emberwatch:missing").unwrap();

        assert!(matches!(
            registry.instantiate(&id),
            Err(ComponentError::NotRegistered(_))
        ));
    }
}
