use std::fs;

use npc::config::Options;
use npc::config::SharedOptions;
use npc::geo::Rect;
use npc::gfx::text;
use npc::gfx::Headless;
use npc::input;
use npc::input::KeyCode;
use npc::ui::Event;
use npc::ui::EventType;
use npc::ui::List;
use npc::ui::OptionItem;
use npc::ui::OptionKind;
use npc::ui::Payload;
use npc::ui::Ui;
use npc::ui::WidgetId;
use npc::Error;

const DEFAULTS: &str = "\
[display]
fps = 20
mouse = yes

[keys]
jump = Space
";

fn options() -> SharedOptions {
  Options::with_defaults(DEFAULTS).unwrap().shared()
}

fn text_of(ui: &Ui, id: WidgetId) -> String {
  text::strip(ui.node(id).widget().label().unwrap().text())
}

fn press(code: KeyCode) -> Event {
  Event::new(EventType::Key).with_payload(Payload::Key(input::press(code)))
}

fn list_with(ui: &mut Ui, kind: OptionKind, key: &str) -> (WidgetId, WidgetId) {
  let section = if kind == OptionKind::Key { "keys" } else { "display" };
  let opts = options();
  let list = List::create(ui, None, Rect::new(0, 0, 30, 5));
  let item =
    OptionItem::create(ui, Some(list), "Opt", section, key, kind, opts);
  (list, item)
}

// ============================================================================
// Store
// ============================================================================

#[test]
fn save_and_reload_round_trip() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("nested").join("config.cfg");

  let mut o = Options::load(&path).unwrap();
  assert_eq!(o.path(), Some(path.as_path()));
  assert_eq!(o.get_int("display", "fps").unwrap(), 20);
  o.set_int("display", "fps", 45);
  o.unset("keys", "inventory");
  o.save().unwrap();

  let written = fs::read_to_string(&path).unwrap();
  assert!(written.starts_with("# Generated"));
  assert!(!written.contains("move_up"), "only user values are written");

  let o = Options::load(&path).unwrap();
  assert_eq!(o.get_int("display", "fps").unwrap(), 45);
  assert_eq!(o.get_str("keys", "inventory"), None);
  assert_eq!(o.get_str("keys", "move_up"), Some("k"));
}

#[test]
fn punctuation_key_names_survive_a_reload() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("config.cfg");
  let names = ["\"", "#", ";", "\\", "=", "[", "Shift+;", "'"];

  let mut o = Options::load(&path).unwrap();
  for (i, name) in names.iter().enumerate() {
    o.set("keys", &format!("k{}", i), *name);
  }
  o.save().unwrap();

  let o = Options::load(&path).unwrap();
  for (i, name) in names.iter().enumerate() {
    assert_eq!(o.get_str("keys", &format!("k{}", i)), Some(*name));
  }
}

#[test]
fn malformed_file_is_reported() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("config.cfg");
  fs::write(&path, "[display\nfps = 3\n").unwrap();

  match Options::load(&path) {
    Err(Error::ConfigParse { path: p, .. }) => assert_eq!(p, path),
    other => panic!("expected a parse error, got {:?}", other),
  }
}

#[test]
fn unsaved_store_has_nowhere_to_go() {
  let o = Options::new().unwrap();
  assert_eq!(o.path(), None);
  o.save().unwrap();
}

// ============================================================================
// Option items
// ============================================================================

#[test]
fn int_item_steps_within_limits() {
  let mut ui = Ui::new(Headless::new(40, 10));
  let kind = OptionKind::Int {
    min: Some(19),
    max: Some(21),
  };
  let (list, item) = list_with(&mut ui, kind, "fps");
  assert_eq!(text_of(&ui, item), "Opt: 20");

  for _ in 0..3 {
    assert!(ui.dispatch(list, &press(KeyCode::Right)));
  }
  assert_eq!(text_of(&ui, item), "Opt: 21");

  for _ in 0..3 {
    assert!(ui.dispatch(list, &press(KeyCode::Left)));
  }
  assert_eq!(text_of(&ui, item), "Opt: 19");
  assert!(!ui.dispatch(list, &press(KeyCode::Backspace)));
}

#[test]
fn bool_item_toggles() {
  let mut ui = Ui::new(Headless::new(40, 10));
  let (list, item) = list_with(&mut ui, OptionKind::Bool, "mouse");
  assert_eq!(text_of(&ui, item), "Opt: Enabled");

  ui.dispatch(list, &Event::new(EventType::Activate).targeted(item));
  assert_eq!(text_of(&ui, item), "Opt: Disabled");

  ui.dispatch(list, &press(KeyCode::Right));
  assert_eq!(text_of(&ui, item), "Opt: Enabled");
  ui.dispatch(list, &press(KeyCode::Left));
  assert_eq!(text_of(&ui, item), "Opt: Disabled");
}

#[test]
fn key_item_unsets_and_captures() {
  let frontend = Headless::new(80, 25);
  let mut ui = Ui::new(frontend.clone());
  ui.set_fps_limit(None);
  let (list, item) = list_with(&mut ui, OptionKind::Key, "jump");
  assert_eq!(text_of(&ui, item), "Opt: Space");

  assert!(ui.dispatch(list, &press(KeyCode::Backspace)));
  assert_eq!(text_of(&ui, item), "Opt: Unset");

  frontend
    .push_keys([input::press(KeyCode::Char('J'))])
    .push_keys([]);
  assert!(ui.dispatch(list, &press(KeyCode::Right)));
  assert_eq!(text_of(&ui, item), "Opt: Shift+j");
}

#[test]
fn items_ignore_input_meant_for_others() {
  let mut ui = Ui::new(Headless::new(40, 10));
  let opts = options();
  let list = List::create(&mut ui, None, Rect::new(0, 0, 30, 5));
  let kind = OptionKind::Int {
    min: None,
    max: None,
  };
  let first = OptionItem::create(
    &mut ui,
    Some(list),
    "A",
    "display",
    "fps",
    kind,
    opts.clone(),
  );
  let second = OptionItem::create(
    &mut ui,
    Some(list),
    "B",
    "display",
    "mouse",
    OptionKind::Bool,
    opts.clone(),
  );
  List::select(&mut ui, list, Some(second));

  ui.dispatch(list, &press(KeyCode::Left));
  assert_eq!(text_of(&ui, first), "A: 20");
  assert_eq!(text_of(&ui, second), "B: Disabled");
  assert!(!opts.borrow().get_bool("display", "mouse").unwrap());
}
