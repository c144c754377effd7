//! Example registrations: a few generic interactions plus a liquor store.

use iris_core::{
    EntityHandle, EntityType, Interaction, InteractionId, Iris, IrisError, ModelHash, SearchType,
};
use iris_ui::Action;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Event fired by the generic vehicle interaction.
pub const VEHICLE_EVENT: &str = "my_custom_event_name";
/// Event fired by the adder-only interaction.
pub const ADDER_EVENT: &str = "adder_option_clicked";

/// Frame script played when no `--frames` file is given.
pub const BUILTIN_FRAMES: &str = r#"{
  "entities": [
    { "handle": 101, "type": 2, "model": "adder", "remote_id": 5 },
    { "handle": 102, "type": 1, "model": "mp_m_shopkeep_01" },
    { "handle": 103, "type": 3, "model": "v_ret_ml_sweetego" },
    { "handle": 104, "type": 3, "model": "prop_bench_01a" },
    { "handle": 105, "type": 2, "model": "blista", "remote_id": 9 }
  ],
  "steps": [
    { "toggle": true },
    { "hit": 101, "repeat": 2 },
    { "hit": 101, "scroll": 1.0 },
    { "hit": 101, "select": true },
    { "hit": null },
    { "hit": 102, "scroll": -1.0, "repeat": 1 },
    { "hit": 103, "select": true },
    { "hit": 104, "select": true },
    { "hit": 105 },
    { "hit": 101, "select": true },
    { "hit": 101 },
    { "hit": 101, "toggle": true },
    { "hit": 101, "select": true }
  ]
}"#;

/// Chat lines produced by demo handlers.
pub type Chat = Rc<RefCell<Vec<String>>>;

/// Handles for the registrations the demo later reacts to.
pub struct Demo {
    adder_only: InteractionId,
    remote_ids: HashMap<EntityHandle, u32>,
    chat: Chat,
}

impl Demo {
    /// Register every example interaction on `iris`.
    pub fn register(
        iris: &mut Iris<Action>,
        remote_ids: HashMap<EntityHandle, u32>,
        chat: Chat,
    ) -> Result<Self, IrisError> {
        iris.create_interaction(
            SearchType::EntityType,
            EntityType::VEHICLE.0.into(),
            Interaction::with_attachment(
                "Generic vehicle interaction (get remoteId)",
                Action::event(VEHICLE_EVENT),
            ),
        )?;

        let object_chat = Rc::clone(&chat);
        iris.create_interaction(
            SearchType::EntityType,
            EntityType::OBJECT.0.into(),
            Interaction::with_attachment(
                "Generic object interaction (get handle)",
                Action::callback(move |entity| {
                    object_chat
                        .borrow_mut()
                        .push(format!("This object's handle is: {entity}"));
                }),
            ),
        )?;

        let adder_only = iris.create_interaction(
            SearchType::EntityModel,
            model("adder"),
            Interaction::with_attachment("Adder only interaction", Action::event(ADDER_EVENT))
                .ordered(99),
        )?;

        let shopkeeper = model("mp_m_shopkeep_01");
        for name in ["Ask about his day", "Pay for items", "Threaten"] {
            iris.create_interaction(
                SearchType::EntityModel,
                shopkeeper,
                Interaction::with_attachment(name, Action::default()),
            )?;
        }

        let store_items = [
            ("v_ret_ml_sweetego", "Add EgoChaser to cart ($5)"),
            ("v_ret_ml_sweet4", "Add Sweet Nothings to cart ($2)"),
            ("v_ret_ml_sweet3", "Add P's & Q's to cart ($1)"),
            ("v_ret_ml_beeram", "Add A. M. Beer (6-pack) to cart ($12)"),
            ("v_ret_ml_beerdus", "Add Dusche Gold (6-pack) to cart ($14)"),
        ];
        for (asset, name) in store_items {
            iris.create_interaction(
                SearchType::EntityModel,
                model(asset),
                Interaction::with_attachment(name, Action::default()),
            )?;
        }

        tracing::info!(count = iris.registry().len(), "example interactions registered");
        Ok(Self {
            adder_only,
            remote_ids,
            chat,
        })
    }

    /// React to a named event fired by a menu selection.
    pub fn handle_event(&mut self, iris: &mut Iris<Action>, event: &str, entity: EntityHandle) {
        match event {
            VEHICLE_EVENT => {
                if let Some(remote_id) = self.remote_ids.get(&entity) {
                    self.say(format!("This vehicle's remoteId is: {remote_id}"));
                }
            }
            ADDER_EVENT => {
                self.say("You found the adder exclusive interaction... aaand it's gone.".into());
                iris.remove_interaction(self.adder_only);
                iris.set_active(false);
            }
            other => tracing::warn!(event = other, %entity, "unhandled interaction event"),
        }
    }

    fn say(&self, line: String) {
        self.chat.borrow_mut().push(line);
    }
}

fn model(name: &str) -> i64 {
    ModelHash::from_name(name).0.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Iris<Action>, Demo, Chat) {
        let mut iris = Iris::new();
        let chat = Chat::default();
        let remote_ids = HashMap::from([(EntityHandle(101), 5)]);
        let demo = Demo::register(&mut iris, remote_ids, Rc::clone(&chat)).unwrap();
        (iris, demo, chat)
    }

    #[test]
    fn registers_all_examples() {
        let (iris, _, _) = setup();
        assert_eq!(iris.registry().len(), 11);

        let adder = iris.registry().matching(
            EntityType::VEHICLE,
            ModelHash::from_name("adder"),
            EntityHandle(101),
        );
        let names: Vec<&str> = adder.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            ["Adder only interaction", "Generic vehicle interaction (get remoteId)"]
        );
    }

    #[test]
    fn adder_event_removes_itself_and_stops_scanning() {
        let (mut iris, mut demo, chat) = setup();
        iris.set_active(true);

        demo.handle_event(&mut iris, ADDER_EVENT, EntityHandle(101));
        assert!(!iris.is_active());
        assert_eq!(iris.registry().len(), 10);
        assert_eq!(chat.borrow().len(), 1);
    }

    #[test]
    fn vehicle_event_reports_remote_id() {
        let (mut iris, mut demo, chat) = setup();
        demo.handle_event(&mut iris, VEHICLE_EVENT, EntityHandle(101));
        demo.handle_event(&mut iris, VEHICLE_EVENT, EntityHandle(999));
        assert_eq!(*chat.borrow(), ["This vehicle's remoteId is: 5"]);
    }
}
