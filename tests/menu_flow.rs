use iris_core::{EntityHandle, EntityType, Interaction, Iris, ModelHash, SearchType};
use iris_testkit::ScriptedHost;
use iris_ui::{Action, DrawCommand, IrisUi, UiInput, DISABLED_CONTROLS};
use std::cell::RefCell;
use std::rc::Rc;

const DOOR: EntityHandle = EntityHandle(40);

fn texts(draws: &[DrawCommand]) -> Vec<String> {
    draws
        .iter()
        .filter_map(|draw| match draw {
            DrawCommand::Text { text, .. } => Some(text.clone()),
            DrawCommand::Sprite { .. } => None,
        })
        .collect()
}

#[test]
fn toggle_scroll_and_select_through_the_menu() {
    let mut iris: Iris<Action> = Iris::new();
    let knocked = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&knocked);
    iris.create_interaction(
        SearchType::EntityType,
        i64::from(EntityType::OBJECT.0),
        Interaction::with_attachment("Knock", Action::callback(move |e| log.borrow_mut().push(e))),
    )
    .unwrap();
    iris.create_interaction(
        SearchType::EntityHandle,
        i64::from(DOOR.0),
        Interaction::with_attachment("Open", Action::event("door_open")).ordered(1),
    )
    .unwrap();
    let ui = IrisUi::attach(&mut iris);

    let mut host = ScriptedHost::new();
    host.spawn(DOOR, EntityType::OBJECT, ModelHash(3));
    host.aim(Some(iris_core::RaycastHit::at(iris_core::HitTarget::Handle(DOOR))));

    // Inactive: nothing drawn, controls untouched.
    iris.tick(&mut host);
    let frame = ui.frame(&mut iris, &UiInput::default());
    assert!(frame.draws.is_empty());
    assert!(frame.disabled_controls.is_empty());

    let toggle = UiInput {
        toggle_pressed: true,
        ..UiInput::default()
    };
    let frame = ui.frame(&mut iris, &toggle);
    assert!(iris.is_active());
    assert_eq!(frame.disabled_controls, &DISABLED_CONTROLS);
    assert_eq!(ui.take_chat(), ["Iris is now enabled."]);

    iris.tick(&mut host);
    let frame = ui.frame(&mut iris, &UiInput::default());
    assert_eq!(texts(&frame.draws), ["→ Open", "Knock"]);
    assert_eq!(ui.take_chat().len(), 1);

    let select_open = UiInput {
        select_pressed: true,
        ..UiInput::default()
    };
    let frame = ui.frame(&mut iris, &select_open);
    let mut fired = Vec::new();
    frame
        .selection
        .expect("menu has entries")
        .dispatch(|name, entity| fired.push((name.to_string(), entity)));
    assert_eq!(fired, [("door_open".to_string(), DOOR)]);

    let scroll_and_select = UiInput {
        scroll: -1.0,
        select_pressed: true,
        ..UiInput::default()
    };
    let frame = ui.frame(&mut iris, &scroll_and_select);
    assert_eq!(texts(&frame.draws), ["Open", "→ Knock"]);
    frame
        .selection
        .expect("menu has entries")
        .dispatch(|name, _| panic!("callback entries fire no event, got {name}"));
    assert_eq!(*knocked.borrow(), [DOOR]);

    // Toggling off clears the menu in the same frame.
    let frame = ui.frame(&mut iris, &toggle);
    assert!(!iris.is_active());
    assert!(texts(&frame.draws).is_empty());
    assert!(ui.menu().items().is_none());
    assert_eq!(ui.take_chat(), ["Iris is now disabled."]);
}

#[test]
fn detached_menu_stops_following_focus() {
    let mut iris: Iris<Action> = Iris::new();
    iris.create_interaction(
        SearchType::EntityHandle,
        i64::from(DOOR.0),
        Interaction::with_attachment("Open", Action::default()),
    )
    .unwrap();
    let ui = IrisUi::attach(&mut iris);
    let observer = IrisUi::attach(&mut iris);
    ui.detach(&mut iris);

    let mut host = ScriptedHost::new();
    host.spawn(DOOR, EntityType::OBJECT, ModelHash(3));
    host.queue_hit(DOOR);
    iris.set_active(true);
    iris.tick(&mut host);

    assert_eq!(observer.menu().items().map(<[_]>::len), Some(1));
}
