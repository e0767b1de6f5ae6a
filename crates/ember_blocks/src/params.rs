//! Tag-encoded parameter resolution

use ember_core::Identifier;
use log::warn;
use serde::{Deserialize, Serialize};

/// Result of looking up one parameter in a block's tag list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagParam<'a> {
    /// Tag present with a `key:value` suffix
    Value(&'a str),
    /// Bare tag present; treated as a boolean flag
    Flag,
    /// No matching tag
    Missing,
}

impl<'a> TagParam<'a> {
    /// The suffix value, if any
    pub fn value(&self) -> Option<&'a str> {
        match self {
            TagParam::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Whether the tag exists at all (valued or bare)
    pub fn is_present(&self) -> bool {
        !matches!(self, TagParam::Missing)
    }
}

/// Look up the parameter `key` in a flat tag list
///
/// A tag equal to `key` is a presence flag; a tag of the form `key:suffix`
/// carries a value. A missing tag is reported as [`TagParam::Missing`] so
/// callers substitute their default instead of failing.
pub fn resolve_parameter<'a>(tags: &'a [String], key: &str) -> TagParam<'a> {
    for tag in tags {
        if tag == key {
            return TagParam::Flag;
        }
        if let Some(rest) = tag.strip_prefix(key) {
            if let Some(value) = rest.strip_prefix(':') {
                return TagParam::Value(value);
            }
        }
    }
    TagParam::Missing
}

/// Typed emitter configuration read once from a block's tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitterParams {
    /// Damage applied per hit; always >= 1
    pub damage: u32,
    /// Whether damage repeats every qualifying tick while triggered
    pub continuous: bool,
}

impl Default for EmitterParams {
    fn default() -> Self {
        Self {
            damage: 1,
            continuous: false,
        }
    }
}

impl EmitterParams {
    /// Read parameters for `identifier` out of a block's tag list
    ///
    /// Tag keys are `{identifier}_damage` (valued) and
    /// `{identifier}_continuous` (presence flag). Absent or malformed values
    /// fall back to the defaults; a malformed damage suffix is logged and
    /// never propagated as an error.
    pub fn from_tags(identifier: &Identifier, tags: &[String]) -> Self {
        let defaults = Self::default();

        let damage_key = format!("{identifier}_damage");
        let damage = match resolve_parameter(tags, &damage_key) {
            TagParam::Value(raw) => match raw.trim().parse::<f64>() {
                Ok(v) => clamp_damage(v),
                Err(_) => {
                    warn!(
                        "malformed {} tag value '{}', using {}",
                        damage_key, raw, defaults.damage
                    );
                    defaults.damage
                }
            },
            // A bare damage tag carries no value; keep the default
            TagParam::Flag | TagParam::Missing => defaults.damage,
        };

        let continuous_key = format!("{identifier}_continuous");
        let continuous = resolve_parameter(tags, &continuous_key).is_present();

        Self { damage, continuous }
    }
}

/// Clamp a raw damage value to `max(1, floor(value))`
#[inline]
pub fn clamp_damage(value: f64) -> u32 {
    value.floor().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn id() -> Identifier {
        Identifier::parse("emberwatch:damage_on_step").unwrap()
    }

    #[test]
    fn test_resolve_value() {
        let tags = tags(&["emberwatch:damage_on_step_damage:4"]);
        assert_eq!(
            resolve_parameter(&tags, "emberwatch:damage_on_step_damage"),
            TagParam::Value("4")
        );
    }

    #[test]
    fn test_resolve_flag() {
        let tags = tags(&["emberwatch:damage_on_step_continuous"]);
        assert_eq!(
            resolve_parameter(&tags, "emberwatch:damage_on_step_continuous"),
            TagParam::Flag
        );
    }

    #[test]
    fn test_resolve_missing() {
        let tags = tags(&["other:tag", "emberwatch:damage_on_step_damage:2"]);
        assert_eq!(
            resolve_parameter(&tags, "emberwatch:damage_on_step_continuous"),
            TagParam::Missing
        );
    }

    #[test]
    fn test_from_tags_defaults() {
        let params = EmitterParams::from_tags(&id(), &[]);
        assert_eq!(params.damage, 1);
        assert!(!params.continuous);
    }

    #[test]
    fn test_from_tags_full() {
        let tags = tags(&[
            "emberwatch:damage_on_step_damage:3",
            "emberwatch:damage_on_step_continuous",
        ]);
        let params = EmitterParams::from_tags(&id(), &tags);
        assert_eq!(params.damage, 3);
        assert!(params.continuous);
    }

    #[test]
    fn test_damage_clamped_to_minimum() {
        let tags = tags(&["emberwatch:damage_on_step_damage:0"]);
        assert_eq!(EmitterParams::from_tags(&id(), &tags).damage, 1);
    }

    #[test]
    fn test_damage_floored() {
        let tags = tags(&["emberwatch:damage_on_step_damage:2.9"]);
        assert_eq!(EmitterParams::from_tags(&id(), &tags).damage, 2);
    }

    #[test]
    fn test_malformed_damage_falls_back() {
        let tags = tags(&["emberwatch:damage_on_step_damage:lots"]);
        assert_eq!(EmitterParams::from_tags(&id(), &tags).damage, 1);
    }

    #[test]
    fn test_clamp_damage() {
        assert_eq!(clamp_damage(0.0), 1);
        assert_eq!(clamp_damage(0.9), 1);
        assert_eq!(clamp_damage(1.0), 1);
        assert_eq!(clamp_damage(5.7), 5);
        assert_eq!(clamp_damage(100.0), 100);
    }
}
