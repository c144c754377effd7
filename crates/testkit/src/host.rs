//! Deterministic stand-in for the game host.

use glam::Vec3;
use iris_core::{
    EntityHandle, EntityType, HitTarget, Host, ModelHash, RaycastFlags, RaycastHit,
};
use std::collections::{HashMap, VecDeque};

/// Handle the scripted host reports for the local player.
pub const LOCAL_PLAYER: EntityHandle = EntityHandle(1);

/// A ray the tracker asked the host to cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastRay {
    /// Ray start.
    pub start: Vec3,
    /// Ray end.
    pub end: Vec3,
    /// Entity excluded from the cast.
    pub ignore: EntityHandle,
    /// Categories the cast may hit.
    pub flags: RaycastFlags,
}

/// Host double fed with queued raycast outcomes and a fixed entity table.
///
/// Each call to [`Host::raycast`] consumes one queued outcome; once the
/// queue is empty the aimed-at outcome is reported, which is a miss until
/// [`ScriptedHost::aim`] says otherwise. Handles missing from the entity
/// table report [`EntityType::WORLD`], like map geometry does on a real host.
#[derive(Debug, Clone)]
pub struct ScriptedHost {
    camera_position: Vec3,
    camera_direction: Vec3,
    entities: HashMap<EntityHandle, (EntityType, ModelHash)>,
    outcomes: VecDeque<Option<RaycastHit>>,
    aimed: Option<RaycastHit>,
    rays: Vec<CastRay>,
}

impl Default for ScriptedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedHost {
    /// Empty host with the camera at the origin looking down +Y.
    pub fn new() -> Self {
        Self {
            camera_position: Vec3::ZERO,
            camera_direction: Vec3::Y,
            entities: HashMap::new(),
            outcomes: VecDeque::new(),
            aimed: None,
            rays: Vec::new(),
        }
    }

    /// Add an entity to the lookup table.
    pub fn spawn(&mut self, handle: EntityHandle, entity_type: EntityType, model: ModelHash) {
        self.entities.insert(handle, (entity_type, model));
    }

    /// Remove an entity from the lookup table.
    pub fn despawn(&mut self, handle: EntityHandle) {
        self.entities.remove(&handle);
    }

    /// Move the camera.
    pub fn set_camera(&mut self, position: Vec3, direction: Vec3) {
        self.camera_position = position;
        self.camera_direction = direction;
    }

    /// Queue a hit on `handle` for the next raycast.
    pub fn queue_hit(&mut self, handle: EntityHandle) -> &mut Self {
        self.queue(Some(RaycastHit::at(HitTarget::Handle(handle))))
    }

    /// Queue a raycast that finds nothing.
    pub fn queue_miss(&mut self) -> &mut Self {
        self.queue(None)
    }

    /// Queue an arbitrary raycast outcome.
    pub fn queue(&mut self, outcome: Option<RaycastHit>) -> &mut Self {
        self.outcomes.push_back(outcome);
        self
    }

    /// Outcome reported by every raycast once the queue is drained.
    pub fn aim(&mut self, outcome: Option<RaycastHit>) {
        self.aimed = outcome;
    }

    /// Rays cast so far, oldest first.
    pub fn rays(&self) -> &[CastRay] {
        &self.rays
    }

    /// Outcomes not yet consumed.
    pub fn pending(&self) -> usize {
        self.outcomes.len()
    }
}

impl Host for ScriptedHost {
    fn camera_position(&self) -> Vec3 {
        self.camera_position
    }

    fn camera_direction(&self) -> Vec3 {
        self.camera_direction
    }

    fn local_player(&self) -> EntityHandle {
        LOCAL_PLAYER
    }

    fn raycast(
        &mut self,
        start: Vec3,
        end: Vec3,
        ignore: EntityHandle,
        flags: RaycastFlags,
    ) -> Option<RaycastHit> {
        self.rays.push(CastRay {
            start,
            end,
            ignore,
            flags,
        });
        self.outcomes.pop_front().unwrap_or(self.aimed)
    }

    fn entity_type(&self, handle: EntityHandle) -> EntityType {
        self.entities
            .get(&handle)
            .map_or(EntityType::WORLD, |(entity_type, _)| *entity_type)
    }

    fn entity_model(&self, handle: EntityHandle) -> ModelHash {
        self.entities
            .get(&handle)
            .map_or(ModelHash::default(), |(_, model)| *model)
    }
}
