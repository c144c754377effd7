//! Tunables for the focus tracker.

use crate::entity::RaycastFlags;
use serde::{Deserialize, Serialize};

/// Default scan length along the camera forward vector.
pub const DEFAULT_RAYCAST_DISTANCE: f32 = 5.0;

/// Startup settings for an [`crate::Iris`] controller.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct IrisConfig {
    /// Scan length in world units.
    pub raycast_distance: f32,
    /// Raw [`RaycastFlags`] bits.
    pub raycast_flags: u32,
    /// Whether scanning starts enabled.
    pub start_active: bool,
}

impl Default for IrisConfig {
    fn default() -> Self {
        Self {
            raycast_distance: DEFAULT_RAYCAST_DISTANCE,
            raycast_flags: RaycastFlags::default().bits(),
            start_active: false,
        }
    }
}
