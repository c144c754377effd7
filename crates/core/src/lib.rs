#![warn(missing_docs)]
//! Interaction targeting core.
//!
//! Scripts register interactions against an entity type, an entity model or
//! a specific entity handle. Every frame, [`Iris::tick`] casts a ray from the
//! gameplay camera, works out which entity is in focus and, when that
//! changes, tells listeners which interactions the new entity offers.

pub mod config;
pub mod entity;
pub mod error;
pub mod events;
pub mod host;
pub mod interaction;
pub mod script;
mod tracker;

// Re-export commonly used types
pub use config::{IrisConfig, DEFAULT_RAYCAST_DISTANCE};
pub use entity::{EntityHandle, EntityType, HitTarget, ModelHash, RaycastFlags, RaycastHit};
pub use error::IrisError;
pub use events::{FocusChange, FocusDetails, IrisEvent, ListenerId};
pub use host::Host;
pub use interaction::{Interaction, InteractionId, InteractionRegistry, SearchType};
pub use tracker::Iris;
