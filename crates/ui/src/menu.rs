//! Crosshair and selection menu driven by iris notifications.

use crate::action::Action;
use glam::Vec2;
use iris_core::{EntityHandle, Interaction, Iris, IrisEvent, ListenerId};
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use tracing::debug;

/// Screen-space position of the first menu entry.
pub const MENU_BASE: Vec2 = Vec2::new(0.5, 0.6);
/// Vertical gap between menu entries.
pub const MENU_TEXT_GAP: f32 = 0.03;
/// Font used for menu entries.
pub const MENU_TEXT_FONT: u32 = 0;
/// RGBA color of menu entries.
pub const MENU_TEXT_COLOR: [u8; 4] = [255, 255, 255, 255];
/// Scale of menu entries.
pub const MENU_TEXT_SCALE: [f32; 2] = [0.33, 0.33];
/// Crosshair size in pixels.
pub const CROSSHAIR_PIXELS: f32 = 32.0;

/// Controls suppressed while scanning so the mouse drives the menu.
pub const DISABLED_CONTROLS: [u32; 14] = [
    14, 15, 16, 17, 24, 25, 50, 140, 141, 142, 143, 257, 261, 262,
];

/// Control toggling scanning (character wheel, LeftAlt by default).
pub const TOGGLE_CONTROL: u32 = 19;
/// Control selecting the highlighted entry.
pub const SELECT_CONTROL: u32 = 176;
/// Axis used to scroll through entries.
pub const SCROLL_AXIS: u32 = 198;

/// Controls read by the menu this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiInput {
    /// [`TOGGLE_CONTROL`] was just pressed.
    pub toggle_pressed: bool,
    /// Value of [`SCROLL_AXIS`]; the sign picks the direction.
    pub scroll: f32,
    /// [`SELECT_CONTROL`] was just pressed.
    pub select_pressed: bool,
    /// Active screen resolution in pixels.
    pub resolution: Vec2,
}

impl Default for UiInput {
    fn default() -> Self {
        Self {
            toggle_pressed: false,
            scroll: 0.0,
            select_pressed: false,
            resolution: Vec2::new(1920.0, 1080.0),
        }
    }
}

/// Something to draw this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Textured sprite from a streamed texture dictionary.
    Sprite {
        /// Texture dictionary.
        dictionary: &'static str,
        /// Texture name.
        texture: &'static str,
        /// Normalized screen position of the center.
        position: Vec2,
        /// Normalized size.
        size: Vec2,
        /// RGBA tint.
        color: [u8; 4],
    },
    /// Outlined text.
    Text {
        /// Text to draw.
        text: String,
        /// Normalized screen position.
        position: Vec2,
        /// Font id.
        font: u32,
        /// RGBA color.
        color: [u8; 4],
        /// Horizontal and vertical scale.
        scale: [f32; 2],
    },
}

/// A selected menu entry.
#[derive(Debug)]
pub struct Selection {
    /// Entity focused when the entry was selected.
    pub entity: EntityHandle,
    /// The chosen interaction.
    pub interaction: Rc<Interaction<Action>>,
}

impl Selection {
    /// Run the interaction's action; named events go through `fire`.
    pub fn dispatch(&self, fire: impl FnMut(&str, EntityHandle)) {
        debug!(entity = %self.entity, name = %self.interaction.name, "interaction selected");
        self.interaction.attachment.run(self.entity, fire);
    }
}

/// Output of one [`IrisUi::frame`].
#[derive(Debug, Default)]
pub struct UiFrame {
    /// Draw calls, in order.
    pub draws: Vec<DrawCommand>,
    /// Controls to suppress this frame.
    pub disabled_controls: &'static [u32],
    /// Entry selected this frame.
    pub selection: Option<Selection>,
}

/// One visible entry.
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Interaction behind the entry.
    pub interaction: Rc<Interaction<Action>>,
    /// Normalized screen position of the text.
    pub position: Vec2,
}

/// Menu state, rebuilt from focus notifications.
#[derive(Debug, Default)]
pub struct InteractionMenu {
    items: Option<Vec<MenuItem>>,
    index: usize,
    chat: Vec<String>,
}

impl InteractionMenu {
    /// Apply a notification.
    pub fn handle_event(&mut self, event: &IrisEvent<Action>) {
        match event {
            IrisEvent::StateChange(active) => {
                let state = if *active { "enabled" } else { "disabled" };
                self.chat.push(format!("Iris is now {state}."));
                if !active {
                    self.items = None;
                    self.index = 0;
                }
            }
            IrisEvent::FocusChange(change) => {
                self.index = 0;
                self.items = (!change.is_lost()).then(|| {
                    change
                        .interactions()
                        .iter()
                        .enumerate()
                        .map(|(i, interaction)| MenuItem {
                            interaction: Rc::clone(interaction),
                            position: MENU_BASE + Vec2::new(0.0, MENU_TEXT_GAP * i as f32),
                        })
                        .collect()
                });

                if self.items.as_ref().is_some_and(|items| !items.is_empty()) {
                    self.chat.push(
                        "This entity has interactions! Use the scroll wheel to go up/down and left click to select."
                            .to_string(),
                    );
                }
            }
        }
    }

    /// Visible entries, `None` when no entity is focused.
    pub fn items(&self) -> Option<&[MenuItem]> {
        self.items.as_deref()
    }

    /// Index of the highlighted entry.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move the highlight one entry in the direction of `scroll`, wrapping
    /// at both ends. Single-entry menus ignore scrolling.
    pub fn scroll(&mut self, scroll: f32) {
        let Some(len) = self.items.as_ref().map(Vec::len) else {
            return;
        };
        if len <= 1 || scroll == 0.0 || scroll.is_nan() {
            return;
        }

        self.index = if scroll > 0.0 {
            (self.index + 1) % len
        } else if self.index == 0 {
            len - 1
        } else {
            self.index - 1
        };
    }

    /// Highlighted entry.
    pub fn current(&self) -> Option<&MenuItem> {
        self.items.as_ref()?.get(self.index)
    }

    /// Drain pending chat lines.
    pub fn take_chat(&mut self) -> Vec<String> {
        std::mem::take(&mut self.chat)
    }

    fn draw(&self, draws: &mut Vec<DrawCommand>) {
        let Some(items) = &self.items else {
            return;
        };
        for (i, item) in items.iter().enumerate() {
            let name = &item.interaction.name;
            draws.push(DrawCommand::Text {
                text: if i == self.index {
                    format!("→ {name}")
                } else {
                    name.clone()
                },
                position: item.position,
                font: MENU_TEXT_FONT,
                color: MENU_TEXT_COLOR,
                scale: MENU_TEXT_SCALE,
            });
        }
    }
}

/// The menu wired to an [`Iris`] controller.
pub struct IrisUi {
    menu: Rc<RefCell<InteractionMenu>>,
    listener: ListenerId,
}

impl IrisUi {
    /// Subscribe a fresh menu to `iris`.
    pub fn attach(iris: &mut Iris<Action>) -> Self {
        let menu = Rc::new(RefCell::new(InteractionMenu::default()));
        let sink = Rc::clone(&menu);
        let listener = iris.subscribe(move |event| sink.borrow_mut().handle_event(event));
        Self { menu, listener }
    }

    /// Unsubscribe from `iris`.
    pub fn detach(self, iris: &mut Iris<Action>) {
        iris.unsubscribe(self.listener);
    }

    /// Current menu state.
    pub fn menu(&self) -> Ref<'_, InteractionMenu> {
        self.menu.borrow()
    }

    /// Drain pending chat lines.
    pub fn take_chat(&self) -> Vec<String> {
        self.menu.borrow_mut().take_chat()
    }

    /// Run one rendered frame of the menu.
    ///
    /// The toggle control flips scanning before anything is drawn, so the
    /// resulting state notification is already reflected in this frame.
    pub fn frame(&self, iris: &mut Iris<Action>, input: &UiInput) -> UiFrame {
        if input.toggle_pressed {
            // The menu is not borrowed here: set_active notifies it.
            iris.set_active(!iris.is_active());
        }

        let mut frame = UiFrame::default();
        if iris.is_active() {
            frame.draws.push(DrawCommand::Sprite {
                dictionary: "mphud",
                texture: "spectating",
                position: Vec2::splat(0.5),
                size: Vec2::splat(CROSSHAIR_PIXELS) / input.resolution,
                color: [255, 255, 255, 255],
            });
            frame.disabled_controls = &DISABLED_CONTROLS;
        }

        let mut menu = self.menu.borrow_mut();
        menu.scroll(input.scroll);
        menu.draw(&mut frame.draws);

        if input.select_pressed {
            frame.selection = menu.current().map(|item| Selection {
                entity: iris.last_entity_handle(),
                interaction: Rc::clone(&item.interaction),
            });
        }

        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iris_core::{
        EntityType, FocusChange, FocusDetails, HitTarget, ModelHash, RaycastHit,
    };

    fn focus(names: &[&str]) -> IrisEvent<Action> {
        IrisEvent::FocusChange(FocusChange {
            new_entity: EntityHandle(7),
            old_entity: EntityHandle::NONE,
            details: Some(FocusDetails {
                entity_type: EntityType::PED,
                entity_model: ModelHash(1),
                interactions: names
                    .iter()
                    .map(|name| Rc::new(Interaction::with_attachment(*name, Action::default())))
                    .collect(),
                raycast: RaycastHit::at(HitTarget::Handle(EntityHandle(7))),
            }),
        })
    }

    fn lost() -> IrisEvent<Action> {
        IrisEvent::FocusChange(FocusChange {
            new_entity: EntityHandle::NONE,
            old_entity: EntityHandle(7),
            details: None,
        })
    }

    #[test]
    fn focus_builds_stacked_entries() {
        let mut menu = InteractionMenu::default();
        menu.handle_event(&focus(&["a", "b", "c"]));

        let items = menu.items().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].position, MENU_BASE);
        assert!((items[2].position.y - 0.66).abs() < 1e-6);
        assert_eq!(menu.take_chat().len(), 1);

        menu.handle_event(&lost());
        assert!(menu.items().is_none());
        assert!(menu.take_chat().is_empty());
    }

    #[test]
    fn empty_interaction_list_keeps_menu_silent() {
        let mut menu = InteractionMenu::default();
        menu.handle_event(&focus(&[]));
        assert_eq!(menu.items().map(<[MenuItem]>::len), Some(0));
        assert!(menu.take_chat().is_empty());
    }

    #[test]
    fn scrolling_wraps_in_both_directions() {
        let mut menu = InteractionMenu::default();
        menu.handle_event(&focus(&["a", "b", "c"]));

        menu.scroll(-1.0);
        assert_eq!(menu.index(), 2);
        menu.scroll(1.0);
        assert_eq!(menu.index(), 0);
        menu.scroll(0.4);
        assert_eq!(menu.index(), 1);
        menu.scroll(0.0);
        assert_eq!(menu.index(), 1);

        menu.handle_event(&focus(&["only"]));
        assert_eq!(menu.index(), 0);
        menu.scroll(1.0);
        assert_eq!(menu.index(), 0);
    }

    #[test]
    fn deactivation_clears_menu() {
        let mut menu = InteractionMenu::default();
        menu.handle_event(&focus(&["a", "b"]));
        menu.scroll(1.0);
        menu.take_chat();

        menu.handle_event(&IrisEvent::StateChange(false));
        assert!(menu.items().is_none());
        assert_eq!(menu.index(), 0);
        assert_eq!(menu.take_chat(), ["Iris is now disabled."]);
    }

    #[test]
    fn toggle_draws_crosshair_and_disables_controls() {
        let mut iris: Iris<Action> = Iris::new();
        let ui = IrisUi::attach(&mut iris);

        let idle = ui.frame(&mut iris, &UiInput::default());
        assert!(idle.draws.is_empty());
        assert!(idle.disabled_controls.is_empty());

        let input = UiInput {
            toggle_pressed: true,
            ..UiInput::default()
        };
        let frame = ui.frame(&mut iris, &input);
        assert!(iris.is_active());
        assert_eq!(frame.disabled_controls, &DISABLED_CONTROLS);
        match &frame.draws[0] {
            DrawCommand::Sprite { size, .. } => {
                assert!((size.x - 32.0 / 1920.0).abs() < 1e-6);
                assert!((size.y - 32.0 / 1080.0).abs() < 1e-6);
            }
            other => panic!("expected crosshair, got {other:?}"),
        }
        assert_eq!(ui.take_chat(), ["Iris is now enabled."]);

        ui.detach(&mut iris);
    }

    #[test]
    fn highlighted_entry_gets_arrow() {
        let mut menu = InteractionMenu::default();
        menu.handle_event(&focus(&["a", "b"]));
        let mut draws = Vec::new();
        menu.draw(&mut draws);

        let texts: Vec<&str> = draws
            .iter()
            .filter_map(|draw| match draw {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                DrawCommand::Sprite { .. } => None,
            })
            .collect();
        assert_eq!(texts, ["→ a", "b"]);
    }
}
