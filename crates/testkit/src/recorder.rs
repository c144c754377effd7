//! Capture dispatched notifications for later assertions.

use iris_core::events::{FOCUS_CHANGE_EVENT, STATE_CHANGE_EVENT};
use iris_core::{EntityHandle, EntityType, Iris, IrisEvent, ListenerId, ModelHash};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

/// Serializable summary of one dispatched notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event")]
pub enum RecordedEvent {
    /// `iris::stateChange`.
    #[serde(rename = "iris::stateChange")]
    StateChange {
        /// New scanning state.
        active: bool,
    },
    /// `iris::focusChange`.
    #[serde(rename = "iris::focusChange")]
    FocusChange {
        /// Newly focused handle.
        new_entity: EntityHandle,
        /// Previously focused handle.
        old_entity: EntityHandle,
        /// Type of the new entity, absent when focus was lost.
        #[serde(skip_serializing_if = "Option::is_none")]
        entity_type: Option<EntityType>,
        /// Model of the new entity, absent when focus was lost.
        #[serde(skip_serializing_if = "Option::is_none")]
        entity_model: Option<ModelHash>,
        /// Interaction names in menu order, absent when focus was lost.
        #[serde(skip_serializing_if = "Option::is_none")]
        interactions: Option<Vec<String>>,
    },
}

impl RecordedEvent {
    /// Summarize a live event.
    pub fn from_event<A>(event: &IrisEvent<A>) -> Self {
        match event {
            IrisEvent::StateChange(active) => RecordedEvent::StateChange { active: *active },
            IrisEvent::FocusChange(change) => {
                let details = change.details.as_ref();
                RecordedEvent::FocusChange {
                    new_entity: change.new_entity,
                    old_entity: change.old_entity,
                    entity_type: details.map(|d| d.entity_type),
                    entity_model: details.map(|d| d.entity_model),
                    interactions: details.map(|d| {
                        d.interactions
                            .iter()
                            .map(|interaction| interaction.name.clone())
                            .collect()
                    }),
                }
            }
        }
    }

    /// Event name, matching [`IrisEvent::name`] and the serialized tag.
    pub fn name(&self) -> &'static str {
        match self {
            RecordedEvent::StateChange { .. } => STATE_CHANGE_EVENT,
            RecordedEvent::FocusChange { .. } => FOCUS_CHANGE_EVENT,
        }
    }

    /// Shorthand for a focus change that lost focus.
    pub fn lost(old_entity: EntityHandle) -> Self {
        RecordedEvent::FocusChange {
            new_entity: EntityHandle::NONE,
            old_entity,
            entity_type: None,
            entity_model: None,
            interactions: None,
        }
    }
}

/// Listener that appends every notification to a shared log.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<RecordedEvent>>>,
}

impl EventRecorder {
    /// Subscribe a new recorder to `iris`.
    pub fn attach<A: 'static>(iris: &mut Iris<A>) -> (Self, ListenerId) {
        let recorder = Self::default();
        let sink = Rc::clone(&recorder.events);
        let id = iris.subscribe(move |event| sink.borrow_mut().push(RecordedEvent::from_event(event)));
        (recorder, id)
    }

    /// Everything recorded so far.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.borrow().clone()
    }

    /// Drain the log.
    pub fn take(&self) -> Vec<RecordedEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Recorded focus changes as `(new, old)` pairs.
    pub fn focus_transitions(&self) -> Vec<(EntityHandle, EntityHandle)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                RecordedEvent::FocusChange {
                    new_entity,
                    old_entity,
                    ..
                } => Some((*new_entity, *old_entity)),
                RecordedEvent::StateChange { .. } => None,
            })
            .collect()
    }
}
