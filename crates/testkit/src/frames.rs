//! JSON frame scripts driving a [`ScriptedHost`].
//!
//! A frame script lists the entities the host knows about and, per step, what
//! the tracking raycast hits plus the controls pressed that frame:
//!
//! ```json
//! {
//!   "entities": [{ "handle": 101, "type": 2, "model": "adder" }],
//!   "steps": [
//!     { "toggle": true },
//!     { "hit": 101, "repeat": 3 },
//!     { "scroll": 1.0, "select": true }
//!   ]
//! }
//! ```

use crate::host::ScriptedHost;
use anyhow::{Context, Result};
use iris_core::{EntityHandle, EntityType, HitTarget, ModelHash, RaycastHit};
use serde::Deserialize;
use std::{fs, path::Path};

/// Model given either as a name to hash or as a raw hash.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ModelRef {
    /// Raw hash.
    Hash(u32),
    /// Model name, hashed with [`ModelHash::from_name`].
    Name(String),
}

impl ModelRef {
    /// Resolve to a hash.
    pub fn hash(&self) -> ModelHash {
        match self {
            ModelRef::Hash(hash) => ModelHash(*hash),
            ModelRef::Name(name) => ModelHash::from_name(name),
        }
    }
}

/// Entity known to the scripted host.
#[derive(Debug, Clone, Deserialize)]
pub struct EntitySpec {
    /// Entity handle.
    pub handle: EntityHandle,
    /// Entity type code.
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Entity model.
    pub model: ModelRef,
    /// Server-side id, for entities created by scripts.
    #[serde(default)]
    pub remote_id: Option<u32>,
}

/// One scripted frame (or several identical ones).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrameStep {
    /// What the raycast hits; `None` is a miss.
    pub hit: Option<HitTarget>,
    /// Toggle control pressed.
    pub toggle: bool,
    /// Scroll wheel movement.
    pub scroll: f32,
    /// Select control pressed.
    pub select: bool,
    /// Extra identical frames after the first. Controls only fire on the
    /// first one.
    pub repeat: u32,
}

impl FrameStep {
    /// Raycast outcome for this step.
    pub fn outcome(&self) -> Option<RaycastHit> {
        self.hit.map(RaycastHit::at)
    }
}

/// Parsed frame script.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrameScript {
    /// Entities to register with the host.
    #[serde(default)]
    pub entities: Vec<EntitySpec>,
    /// Frames to play.
    pub steps: Vec<FrameStep>,
}

impl FrameScript {
    /// Parse a script from JSON text.
    pub fn parse_str(input: &str) -> Result<Self> {
        let script: FrameScript = serde_json::from_str(input).context("invalid frame script")?;
        if script.steps.is_empty() {
            anyhow::bail!("frame script contains no steps");
        }
        Ok(script)
    }

    /// Load a script from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read frame script {}", path.display()))?;
        Self::parse_str(&contents)
    }

    /// Build a host that knows every scripted entity.
    pub fn host(&self) -> ScriptedHost {
        let mut host = ScriptedHost::new();
        for entity in &self.entities {
            host.spawn(entity.handle, entity.entity_type, entity.model.hash());
        }
        host
    }

    /// Expand `repeat` counts into one step per frame.
    pub fn frames(&self) -> impl Iterator<Item = FrameStep> + '_ {
        self.steps.iter().flat_map(|step| {
            let quiet = FrameStep {
                toggle: false,
                scroll: 0.0,
                select: false,
                repeat: 0,
                ..step.clone()
            };
            std::iter::once(step.clone()).chain(std::iter::repeat(quiet).take(step.repeat as usize))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iris_core::Host;

    const SCRIPT: &str = r#"{
        "entities": [
            { "handle": 101, "type": 2, "model": "adder", "remote_id": 5 },
            { "handle": 102, "type": 3, "model": 77 }
        ],
        "steps": [
            { "toggle": true },
            { "hit": 101, "repeat": 2, "select": true },
            { "hit": { "remote_id": 4, "handle": 102 } }
        ]
    }"#;

    #[test]
    fn parses_entities_and_expands_repeats() {
        let script = FrameScript::parse_str(SCRIPT).unwrap();
        let host = script.host();
        assert_eq!(host.entity_type(EntityHandle(101)), EntityType::VEHICLE);
        assert_eq!(host.entity_model(EntityHandle(101)), ModelHash::from_name("adder"));
        assert_eq!(host.entity_model(EntityHandle(102)), ModelHash(77));
        assert_eq!(script.entities[0].remote_id, Some(5));
        assert_eq!(script.entities[1].remote_id, None);

        let frames: Vec<FrameStep> = script.frames().collect();
        assert_eq!(frames.len(), 5);
        assert!(frames[0].toggle && frames[0].hit.is_none());
        assert!(frames[1].select);
        assert!(!frames[2].select && !frames[3].select);
        assert_eq!(frames[3].hit.map(|h| h.handle()), Some(EntityHandle(101)));
        assert_eq!(frames[4].outcome().unwrap().target.handle(), EntityHandle(102));
    }

    #[test]
    fn rejects_empty_scripts() {
        assert!(FrameScript::parse_str(r#"{ "steps": [] }"#).is_err());
        assert!(FrameScript::parse_str("not json").is_err());
    }
}
