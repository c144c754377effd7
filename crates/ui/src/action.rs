//! What happens when a menu entry is selected.

use iris_core::EntityHandle;
use serde::Deserialize;
use std::fmt;
use std::rc::Rc;

/// Callback run with the focused entity when an entry is selected.
pub type SelectedFn = Rc<dyn Fn(EntityHandle)>;

/// Interaction attachment understood by the menu.
///
/// Either part is optional; an entry with neither does nothing when
/// selected. Scripts can only set `eventName`.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Named event fired with the entity handle.
    pub event_name: Option<String>,
    /// Callback run with the entity handle.
    #[serde(skip)]
    pub selected_fn: Option<SelectedFn>,
}

impl Action {
    /// Fire a named event on selection.
    pub fn event(name: impl Into<String>) -> Self {
        Self {
            event_name: Some(name.into()),
            selected_fn: None,
        }
    }

    /// Run `f` on selection.
    pub fn callback(f: impl Fn(EntityHandle) + 'static) -> Self {
        Self {
            event_name: None,
            selected_fn: Some(Rc::new(f)),
        }
    }

    /// Run both parts for `entity`; named events go through `fire`.
    pub fn run(&self, entity: EntityHandle, mut fire: impl FnMut(&str, EntityHandle)) {
        if let Some(name) = &self.event_name {
            fire(name, entity);
        }
        if let Some(selected_fn) = &self.selected_fn {
            selected_fn(entity);
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("event_name", &self.event_name)
            .field("selected_fn", &self.selected_fn.is_some())
            .finish()
    }
}
