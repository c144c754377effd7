//! Notifications dispatched to listeners.
//!
//! Dispatch is synchronous: every listener runs to completion, in
//! subscription order, before the emitting call returns. Listener panics are
//! not caught.

use crate::entity::{EntityHandle, EntityType, ModelHash, RaycastHit};
use crate::interaction::Interaction;
use std::rc::Rc;

/// Event name used for activity switches in logs.
pub const STATE_CHANGE_EVENT: &str = "iris::stateChange";
/// Event name used for focus transitions in logs.
pub const FOCUS_CHANGE_EVENT: &str = "iris::focusChange";

/// Details attached to a focus change when a new entity was acquired.
#[derive(Debug)]
pub struct FocusDetails<A> {
    /// Category code of the new entity.
    pub entity_type: EntityType,
    /// Model hash of the new entity.
    pub entity_model: ModelHash,
    /// Matching interactions, highest priority first.
    pub interactions: Vec<Rc<Interaction<A>>>,
    /// Raw raycast result that produced the focus.
    pub raycast: RaycastHit,
}

impl<A> Clone for FocusDetails<A> {
    fn clone(&self) -> Self {
        Self {
            entity_type: self.entity_type,
            entity_model: self.entity_model,
            interactions: self.interactions.clone(),
            raycast: self.raycast,
        }
    }
}

/// A transition of the focused entity.
#[derive(Debug)]
pub struct FocusChange<A> {
    /// Newly focused handle, [`EntityHandle::NONE`] when focus was lost.
    pub new_entity: EntityHandle,
    /// Previously focused handle.
    pub old_entity: EntityHandle,
    /// Present exactly when `new_entity` is not [`EntityHandle::NONE`].
    pub details: Option<FocusDetails<A>>,
}

impl<A> Clone for FocusChange<A> {
    fn clone(&self) -> Self {
        Self {
            new_entity: self.new_entity,
            old_entity: self.old_entity,
            details: self.details.clone(),
        }
    }
}

impl<A> FocusChange<A> {
    /// Interactions offered by the new entity; empty when focus was lost.
    pub fn interactions(&self) -> &[Rc<Interaction<A>>] {
        self.details
            .as_ref()
            .map(|details| details.interactions.as_slice())
            .unwrap_or(&[])
    }

    /// Whether this change lost focus rather than acquired an entity.
    pub fn is_lost(&self) -> bool {
        self.details.is_none()
    }
}

/// Everything a listener can be told about.
#[derive(Debug)]
pub enum IrisEvent<A> {
    /// Scanning was switched on or off.
    StateChange(bool),
    /// The focused entity changed.
    FocusChange(FocusChange<A>),
}

impl<A> IrisEvent<A> {
    /// Stable event name, as used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            IrisEvent::StateChange(_) => STATE_CHANGE_EVENT,
            IrisEvent::FocusChange(_) => FOCUS_CHANGE_EVENT,
        }
    }
}

impl<A> Clone for IrisEvent<A> {
    fn clone(&self) -> Self {
        match self {
            IrisEvent::StateChange(active) => IrisEvent::StateChange(*active),
            IrisEvent::FocusChange(change) => IrisEvent::FocusChange(change.clone()),
        }
    }
}

/// Token returned by [`crate::Iris::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<A> = Box<dyn FnMut(&IrisEvent<A>)>;

/// Ordered set of listeners.
pub(crate) struct Listeners<A> {
    listeners: Vec<(ListenerId, Listener<A>)>,
    next_id: u64,
}

impl<A> Listeners<A> {
    pub(crate) fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    pub(crate) fn add(&mut self, listener: Listener<A>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn emit(&mut self, event: &IrisEvent<A>) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::HitTarget;

    #[test]
    fn names_follow_the_variant() {
        assert_eq!(IrisEvent::<()>::StateChange(true).name(), "iris::stateChange");
        let lost = IrisEvent::<()>::FocusChange(FocusChange {
            new_entity: EntityHandle::NONE,
            old_entity: EntityHandle(4),
            details: None,
        });
        assert_eq!(lost.name(), FOCUS_CHANGE_EVENT);
    }

    #[test]
    fn lost_focus_offers_no_interactions() {
        let lost: FocusChange<()> = FocusChange {
            new_entity: EntityHandle::NONE,
            old_entity: EntityHandle(4),
            details: None,
        };
        assert!(lost.is_lost());
        assert!(lost.interactions().is_empty());

        let acquired = FocusChange {
            new_entity: EntityHandle(4),
            old_entity: EntityHandle::NONE,
            details: Some(FocusDetails {
                entity_type: EntityType::PED,
                entity_model: ModelHash(9),
                interactions: vec![Rc::new(Interaction::new("Wave"))],
                raycast: RaycastHit::at(HitTarget::Handle(EntityHandle(4))),
            }),
        };
        assert!(!acquired.is_lost());
        assert_eq!(acquired.interactions()[0].name, "Wave");
    }

    #[test]
    fn listeners_run_in_subscription_order() {
        let order = Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut listeners = Listeners::<()>::new();
        for tag in ["first", "second"] {
            let order = Rc::clone(&order);
            listeners.add(Box::new(move |_| order.borrow_mut().push(tag)));
        }
        assert_eq!(listeners.len(), 2);

        listeners.emit(&IrisEvent::StateChange(true));
        assert_eq!(*order.borrow(), ["first", "second"]);
    }
}
