//! The focus tracker: registry, activity switch and the per-frame scan.

use crate::config::IrisConfig;
use crate::entity::{EntityHandle, EntityType, RaycastFlags};
use crate::error::IrisError;
use crate::events::{FocusChange, FocusDetails, IrisEvent, ListenerId, Listeners};
use crate::host::Host;
use crate::interaction::{Interaction, InteractionId, InteractionRegistry, SearchType};
use std::rc::Rc;
use tracing::{debug, info};

/// Interaction targeting controller.
///
/// Owns the interaction registry and the focus state. Call [`Iris::tick`]
/// once per rendered frame; focus transitions and activity switches are
/// reported to subscribed listeners.
pub struct Iris<A = ()> {
    registry: InteractionRegistry<A>,
    listeners: Listeners<A>,
    active: bool,
    last_entity: EntityHandle,
    raycast_distance: f32,
    raycast_flags: RaycastFlags,
}

impl<A> Default for Iris<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Iris<A> {
    /// Create an inactive controller with default raycast settings.
    pub fn new() -> Self {
        let config = IrisConfig::default();
        Self {
            registry: InteractionRegistry::new(),
            listeners: Listeners::new(),
            active: config.start_active,
            last_entity: EntityHandle::NONE,
            raycast_distance: config.raycast_distance,
            raycast_flags: RaycastFlags::from_bits_retain(config.raycast_flags),
        }
    }

    /// Create a controller from loaded settings.
    pub fn with_config(config: &IrisConfig) -> Result<Self, IrisError> {
        let mut iris = Self::new();
        iris.set_raycast_distance(config.raycast_distance)?;
        iris.set_raycast_flags(RaycastFlags::from_bits_retain(config.raycast_flags));
        iris.active = config.start_active;
        Ok(iris)
    }

    // === Registry ===

    /// Register an interaction. See [`InteractionRegistry::create`].
    pub fn create_interaction(
        &mut self,
        search_type: SearchType,
        target: i64,
        interaction: Interaction<A>,
    ) -> Result<InteractionId, IrisError> {
        self.registry.create(search_type, target, interaction)
    }

    /// Look up an interaction by id.
    pub fn get_interaction(&self, id: InteractionId) -> Option<Rc<Interaction<A>>> {
        self.registry.get(id)
    }

    /// Remove an interaction. Returns `false` for unknown ids.
    pub fn remove_interaction(&mut self, id: InteractionId) -> bool {
        self.registry.remove(id)
    }

    /// Read access to the registry.
    pub fn registry(&self) -> &InteractionRegistry<A> {
        &self.registry
    }

    // === Activity switch ===

    /// Whether scanning is enabled.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enable or disable scanning.
    ///
    /// Only an actual transition notifies listeners. Deactivating clears the
    /// focused handle without emitting a focus change.
    pub fn set_active(&mut self, active: bool) {
        if active == self.active {
            return;
        }

        self.active = active;
        if !active {
            self.last_entity = EntityHandle::NONE;
        }

        let event = IrisEvent::StateChange(active);
        info!(event = event.name(), active, "interaction scanning switched");
        self.listeners.emit(&event);
    }

    // === Raycast configuration ===

    /// Scan length along the camera forward vector.
    pub fn raycast_distance(&self) -> f32 {
        self.raycast_distance
    }

    /// Set the scan length. Rejects NaN; no other range checks.
    pub fn set_raycast_distance(&mut self, distance: f32) -> Result<(), IrisError> {
        if distance.is_nan() {
            return Err(IrisError::NotANumber {
                field: "newDistance",
            });
        }
        self.raycast_distance = distance;
        Ok(())
    }

    /// Categories the scan raycast may hit.
    pub fn raycast_flags(&self) -> RaycastFlags {
        self.raycast_flags
    }

    /// Replace the scan raycast categories.
    pub fn set_raycast_flags(&mut self, flags: RaycastFlags) {
        self.raycast_flags = flags;
    }

    /// Handle of the currently focused entity, [`EntityHandle::NONE`] if none.
    pub fn last_entity_handle(&self) -> EntityHandle {
        self.last_entity
    }

    // === Listeners ===

    /// Register a listener for state and focus notifications.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&IrisEvent<A>) + 'static,
    {
        self.listeners.add(Box::new(listener))
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    // === Per-frame scan ===

    /// Run one frame of focus tracking against `host`.
    ///
    /// Does nothing while inactive. Otherwise casts a ray from the gameplay
    /// camera and, if the resolved entity differs from the last one, emits a
    /// focus change. Hits on world geometry count as no hit.
    pub fn tick<H: Host + ?Sized>(&mut self, host: &mut H) {
        if !self.active {
            return;
        }

        let origin = host.camera_position();
        let end = origin + host.camera_direction() * self.raycast_distance;
        let player = host.local_player();
        let hit = host.raycast(origin, end, player, self.raycast_flags);

        let resolved = hit.and_then(|hit| {
            let handle = hit.target.handle();
            let entity_type = host.entity_type(handle);
            // Interacting with world geometry crashes the host.
            (entity_type != EntityType::WORLD).then_some((handle, entity_type, hit))
        });
        let current = resolved
            .as_ref()
            .map_or(EntityHandle::NONE, |(handle, _, _)| *handle);

        if current == self.last_entity {
            return;
        }

        let old_entity = self.last_entity;
        let change = match resolved {
            Some((handle, entity_type, raycast)) if !handle.is_none() => {
                let entity_model = host.entity_model(handle);
                let interactions = self.registry.matching(entity_type, entity_model, handle);
                debug!(
                    new = %handle,
                    old = %old_entity,
                    ?entity_type,
                    ?entity_model,
                    interactions = interactions.len(),
                    "focus acquired"
                );
                FocusChange {
                    new_entity: handle,
                    old_entity,
                    details: Some(FocusDetails {
                        entity_type,
                        entity_model,
                        interactions,
                        raycast,
                    }),
                }
            }
            _ => {
                debug!(old = %old_entity, "focus lost");
                FocusChange {
                    new_entity: EntityHandle::NONE,
                    old_entity,
                    details: None,
                }
            }
        };

        let event = IrisEvent::FocusChange(change);
        debug!(event = event.name(), listeners = self.listeners.len(), "dispatching");
        self.listeners.emit(&event);
        self.last_entity = current;
    }
}
