//! Entity identifiers and raycast result types shared with the host.

use bitflags::bitflags;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Host-assigned handle of a live entity instance.
///
/// Handle `0` is reserved for "no entity".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityHandle(pub i32);

impl EntityHandle {
    /// The "nothing focused" handle.
    pub const NONE: Self = Self(0);

    /// Whether this is the reserved empty handle.
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse entity category code reported by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityType(pub i32);

impl EntityType {
    /// World geometry. Never a valid interaction target.
    pub const WORLD: Self = Self(0);
    /// Pedestrians and player characters.
    pub const PED: Self = Self(1);
    /// Vehicles.
    pub const VEHICLE: Self = Self(2);
    /// Props and placed objects.
    pub const OBJECT: Self = Self(3);
}

/// Hashed identifier of the asset an entity instance uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelHash(pub u32);

impl ModelHash {
    /// Hash a model name the way the host does (Jenkins one-at-a-time over
    /// the lowercased name).
    pub fn from_name(name: &str) -> Self {
        let mut hash: u32 = 0;
        for byte in name.bytes() {
            hash = hash.wrapping_add(u32::from(byte.to_ascii_lowercase()));
            hash = hash.wrapping_add(hash << 10);
            hash ^= hash >> 6;
        }
        hash = hash.wrapping_add(hash << 3);
        hash ^= hash >> 11;
        hash = hash.wrapping_add(hash << 15);
        Self(hash)
    }
}

bitflags! {
    /// Entity categories the tracking raycast may hit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RaycastFlags: u32 {
        /// Static map geometry.
        const MAP = 1;
        /// Vehicles.
        const VEHICLES = 2;
        /// Peds, simple capsule collision.
        const PEDS_SIMPLE = 4;
        /// Peds, full ragdoll collision.
        const PEDS = 8;
        /// Props and objects.
        const OBJECTS = 16;
        /// Water surfaces.
        const WATER = 32;
        /// Vegetation.
        const FOLIAGE = 256;
    }
}

impl Default for RaycastFlags {
    fn default() -> Self {
        Self::MAP | Self::VEHICLES | Self::PEDS_SIMPLE | Self::OBJECTS
    }
}

/// What a raycast reported as the thing it hit.
///
/// Hosts report either a bare game handle or a scripted entity object that
/// carries its own handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HitTarget {
    /// A scripted entity exposing a handle.
    Remote {
        /// Server-side id of the entity.
        remote_id: u32,
        /// Local game handle.
        handle: EntityHandle,
    },
    /// A raw game entity handle.
    Handle(EntityHandle),
}

impl HitTarget {
    /// Normalize to a plain entity handle.
    pub fn handle(&self) -> EntityHandle {
        match *self {
            HitTarget::Remote { handle, .. } => handle,
            HitTarget::Handle(handle) => handle,
        }
    }
}

/// Raw result of a successful raycast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaycastHit {
    /// Entity that was hit.
    pub target: HitTarget,
    /// World-space hit position.
    pub position: Vec3,
    /// Surface normal at the hit position.
    pub surface_normal: Vec3,
}

impl RaycastHit {
    /// Build a hit against `target` with zeroed geometry.
    pub fn at(target: HitTarget) -> Self {
        Self {
            target,
            position: Vec3::ZERO,
            surface_normal: Vec3::ZERO,
        }
    }
}
