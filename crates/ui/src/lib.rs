#![warn(missing_docs)]
//! Headless interaction menu for iris.
//!
//! Draws a crosshair while scanning is active and lists the interactions of
//! the focused entity, highest priority on top. Output is a list of draw
//! commands so any renderer can present it.
//!
//! # Example
//!
//! ```rust,no_run
//! use iris_core::Iris;
//! use iris_ui::{Action, IrisUi, UiInput};
//!
//! let mut iris: Iris<Action> = Iris::new();
//! let ui = IrisUi::attach(&mut iris);
//!
//! // Every frame, after iris.tick(&mut host):
//! let frame = ui.frame(&mut iris, &UiInput::default());
//! if let Some(selection) = frame.selection {
//!     selection.dispatch(|event, entity| println!("{event} -> {entity}"));
//! }
//! ```

pub mod action;
pub mod menu;

// Re-export commonly used types
pub use action::{Action, SelectedFn};
pub use menu::{
    DrawCommand, InteractionMenu, IrisUi, MenuItem, Selection, UiFrame, UiInput,
    DISABLED_CONTROLS,
};
