//! Definition loading and lookup

use crate::definition::EntityDefinition;
use ember_core::Identifier;
use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Definition loading errors
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parse error
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Identifier already present in the library
    #[error("duplicate definition: {0}")]
    Duplicate(Identifier),
    /// Record failed validation
    #[error("invalid definition {definition}: {problem}")]
    Invalid {
        definition: Identifier,
        problem: String,
    },
}

/// Indexed collection of sentry definitions
#[derive(Debug, Default)]
pub struct DefinitionLibrary {
    definitions: BTreeMap<Identifier, EntityDefinition>,
}

impl DefinitionLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self {
            definitions: BTreeMap::new(),
        }
    }

    /// Add a validated definition
    pub fn add(&mut self, definition: EntityDefinition) -> Result<(), DefinitionError> {
        definition.validate()?;
        if self.definitions.contains_key(&definition.identifier) {
            return Err(DefinitionError::Duplicate(definition.identifier));
        }
        debug!("loaded entity definition {}", definition.identifier);
        self.definitions
            .insert(definition.identifier.clone(), definition);
        Ok(())
    }

    /// Parse and add one definition from a JSON string
    pub fn load_str(&mut self, json: &str) -> Result<&EntityDefinition, DefinitionError> {
        let definition: EntityDefinition = serde_json::from_str(json)?;
        let identifier = definition.identifier.clone();
        self.add(definition)?;
        Ok(&self.definitions[&identifier])
    }

    /// Parse and add one definition from a JSON file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), DefinitionError> {
        let json = fs::read_to_string(path)?;
        self.load_str(&json)?;
        Ok(())
    }

    /// Load every `.json` file in a directory, in name order
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize, DefinitionError> {
        let mut paths: Vec<_> = fs::read_dir(dir)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let before = self.definitions.len();
        for path in paths {
            self.load_file(&path)?;
        }
        Ok(self.definitions.len() - before)
    }

    /// Look up a definition by identifier
    pub fn get(&self, identifier: &Identifier) -> Option<&EntityDefinition> {
        self.definitions.get(identifier)
    }

    /// Iterate all definitions in identifier order
    pub fn iter(&self) -> impl Iterator<Item = &EntityDefinition> {
        self.definitions.values()
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the library is empty
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
