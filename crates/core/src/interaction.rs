//! Interaction registry.
//!
//! Interactions are registered against one search criterion (entity type,
//! entity model or a specific entity handle) and carry a caller-owned
//! payload. The registry keeps insertion order: matching results are sorted
//! by `order` with ties left in registration order, and menu position is
//! derived from that sequence.

use crate::entity::{EntityHandle, EntityType, ModelHash};
use crate::error::IrisError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Dimension an interaction is matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i64)]
pub enum SearchType {
    /// Sentinel. Never accepted by the registry and never matches.
    Invalid = 0,
    /// Match on [`EntityType`].
    EntityType = 1,
    /// Match on [`ModelHash`].
    EntityModel = 2,
    /// Match on a specific [`EntityHandle`].
    EntityHandle = 3,
}

impl SearchType {
    /// Count sentinel: one past the last defined search type.
    pub const COUNT: i64 = 4;

    /// Stable numeric representation.
    pub const fn as_i64(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for SearchType {
    type Error = IrisError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SearchType::EntityType),
            2 => Ok(SearchType::EntityModel),
            3 => Ok(SearchType::EntityHandle),
            _ => Err(IrisError::OutOfRange {
                field: "searchType",
                value,
            }),
        }
    }
}

/// Identifier returned by [`InteractionRegistry::create`].
///
/// Ids start at 1, increase monotonically and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractionId(pub u64);

impl fmt::Display for InteractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A discoverable action as registered by a caller.
///
/// `attachment` is opaque to the registry; it is handed back untouched to
/// whoever consumes focus notifications.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction<A = ()> {
    /// Display name.
    pub name: String,
    /// Sort priority, higher first. `None` sorts after every present value.
    pub order: Option<i64>,
    /// Caller-defined data.
    pub attachment: A,
}

impl Interaction<()> {
    /// Interaction with a name and no attachment.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_attachment(name, ())
    }
}

impl<A> Interaction<A> {
    /// Interaction carrying `attachment`.
    pub fn with_attachment(name: impl Into<String>, attachment: A) -> Self {
        Self {
            name: name.into(),
            order: None,
            attachment,
        }
    }

    /// Set the sort priority.
    pub fn ordered(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }
}

struct Entry<A> {
    id: InteractionId,
    search_type: SearchType,
    search_value: i64,
    interaction: Rc<Interaction<A>>,
}

impl<A> Entry<A> {
    fn matches(&self, entity_type: EntityType, model: ModelHash, handle: EntityHandle) -> bool {
        match self.search_type {
            SearchType::EntityType => self.search_value == i64::from(entity_type.0),
            // Hosts hand out model hashes both as u32 and as i32.
            SearchType::EntityModel => {
                self.search_value == i64::from(model.0)
                    || self.search_value == i64::from(model.0 as i32)
            }
            SearchType::EntityHandle => self.search_value == i64::from(handle.0),
            SearchType::Invalid => false,
        }
    }
}

/// Registered interactions in insertion order.
pub struct InteractionRegistry<A = ()> {
    entries: Vec<Entry<A>>,
    last_id: u64,
}

impl<A> Default for InteractionRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> InteractionRegistry<A> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            last_id: 0,
        }
    }

    /// Register `interaction` against `target` on the `search_type` dimension.
    ///
    /// For an [`SearchType::EntityModel`] interaction, `target` is the model
    /// hash read either as a `u32` or as the same bits in an `i32`.
    pub fn create(
        &mut self,
        search_type: SearchType,
        target: i64,
        interaction: Interaction<A>,
    ) -> Result<InteractionId, IrisError> {
        if search_type == SearchType::Invalid {
            return Err(IrisError::OutOfRange {
                field: "searchType",
                value: search_type.as_i64(),
            });
        }

        self.last_id += 1;
        let id = InteractionId(self.last_id);
        tracing::debug!(%id, ?search_type, target, name = %interaction.name, "interaction created");
        self.entries.push(Entry {
            id,
            search_type,
            search_value: target,
            interaction: Rc::new(interaction),
        });
        Ok(id)
    }

    /// Look up an interaction by id.
    pub fn get(&self, id: InteractionId) -> Option<Rc<Interaction<A>>> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| Rc::clone(&entry.interaction))
    }

    /// Remove an interaction. Returns `false` if the id is not registered.
    pub fn remove(&mut self, id: InteractionId) -> bool {
        match self.entries.iter().position(|entry| entry.id == id) {
            Some(index) => {
                self.entries.remove(index);
                tracing::debug!(%id, "interaction removed");
                true
            }
            None => false,
        }
    }

    /// Number of live interactions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no interactions are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Interactions available for an entity, highest `order` first.
    ///
    /// Equal orders keep registration order; interactions without an order
    /// come last.
    pub fn matching(
        &self,
        entity_type: EntityType,
        model: ModelHash,
        handle: EntityHandle,
    ) -> Vec<Rc<Interaction<A>>> {
        let mut matches: Vec<Rc<Interaction<A>>> = self
            .entries
            .iter()
            .filter(|entry| entry.matches(entity_type, model, handle))
            .map(|entry| Rc::clone(&entry.interaction))
            .collect();
        // `Option` orders `None` below any `Some`, and `sort_by` is stable.
        matches.sort_by(|a, b| b.order.cmp(&a.order));
        matches
    }
}
