//! Services the focus tracker consumes from the game host.

use crate::entity::{EntityHandle, EntityType, ModelHash, RaycastFlags, RaycastHit};
use glam::Vec3;

/// Camera, raycast and entity lookups provided by the host environment.
///
/// Implementations are queried once per tick while scanning is active and
/// never while it is inactive.
pub trait Host {
    /// Gameplay camera position in world space.
    fn camera_position(&self) -> Vec3;

    /// Gameplay camera forward direction.
    fn camera_direction(&self) -> Vec3;

    /// Handle of the local player, excluded from the tracking raycast.
    fn local_player(&self) -> EntityHandle;

    /// Cast a ray from `start` to `end`, ignoring `ignore`, hitting only the
    /// categories in `flags`.
    fn raycast(
        &mut self,
        start: Vec3,
        end: Vec3,
        ignore: EntityHandle,
        flags: RaycastFlags,
    ) -> Option<RaycastHit>;

    /// Category code of an entity. [`EntityType::WORLD`] for map geometry.
    fn entity_type(&self, handle: EntityHandle) -> EntityType;

    /// Model hash of an entity.
    fn entity_model(&self, handle: EntityHandle) -> ModelHash;
}
