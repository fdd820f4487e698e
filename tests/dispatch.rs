use std::cell::RefCell;
use std::rc::Rc;

use npc::geo::Point;
use npc::geo::Rect;
use npc::gfx::Headless;
use npc::ui::Event;
use npc::ui::EventType;
use npc::ui::Group;
use npc::ui::Ui;
use npc::ui::WidgetId;

type Log = Rc<RefCell<Vec<&'static str>>>;

/// Registers a handler on `id` that records `name` and answers `accept`.
fn record(
  ui: &mut Ui,
  id: WidgetId,
  ty: EventType,
  log: &Log,
  name: &'static str,
  accept: bool,
) {
  let log = Rc::clone(log);
  ui.on(id, ty, move |_, _, _| {
    log.borrow_mut().push(name);
    accept
  });
}

fn group(ui: &mut Ui, parent: Option<WidgetId>, rect: Rect) -> WidgetId {
  ui.insert(Group, parent, rect)
}

// ============================================================================
// Routing
// ============================================================================

#[test]
fn broadcast_walks_children_until_accepted() {
  let mut ui = Ui::new(Headless::new(80, 25));
  let log = Log::default();
  let root = group(&mut ui, None, Rect::with_dims(80, 25));
  let a = group(&mut ui, Some(root), Rect::default());
  let b = group(&mut ui, Some(root), Rect::default());
  let c = group(&mut ui, Some(root), Rect::default());
  record(&mut ui, root, EventType::Key, &log, "root", false);
  record(&mut ui, a, EventType::Key, &log, "a", false);
  record(&mut ui, b, EventType::Key, &log, "b", true);
  record(&mut ui, c, EventType::Key, &log, "c", true);

  assert!(ui.dispatch(root, &Event::new(EventType::Key)));
  assert_eq!(*log.borrow(), ["root", "a", "b"]);
}

#[test]
fn accepting_parent_hides_event_from_children() {
  let mut ui = Ui::new(Headless::new(80, 25));
  let log = Log::default();
  let root = group(&mut ui, None, Rect::default());
  let child = group(&mut ui, Some(root), Rect::default());
  record(&mut ui, root, EventType::Key, &log, "root", true);
  record(&mut ui, child, EventType::Key, &log, "child", true);

  assert!(ui.dispatch(root, &Event::new(EventType::Key)));
  assert_eq!(*log.borrow(), ["root"]);
}

#[test]
fn unhandled_broadcast_reports_false() {
  let mut ui = Ui::new(Headless::new(80, 25));
  let root = group(&mut ui, None, Rect::default());
  group(&mut ui, Some(root), Rect::default());
  assert!(!ui.dispatch(root, &Event::new(EventType::Mouse)));
}

#[test]
fn targeted_events_skip_everyone_else() {
  let mut ui = Ui::new(Headless::new(80, 25));
  let log = Log::default();
  let root = group(&mut ui, None, Rect::default());
  let a = group(&mut ui, Some(root), Rect::default());
  let b = group(&mut ui, Some(root), Rect::default());
  let deep = group(&mut ui, Some(b), Rect::default());
  record(&mut ui, root, EventType::Activate, &log, "root", true);
  record(&mut ui, a, EventType::Activate, &log, "a", true);
  record(&mut ui, deep, EventType::Activate, &log, "deep", true);

  let event = Event::new(EventType::Activate).targeted(deep);
  assert!(ui.dispatch(root, &event));
  assert_eq!(*log.borrow(), ["deep"]);
}

#[test]
fn declined_targeted_event_stops_at_target() {
  let mut ui = Ui::new(Headless::new(80, 25));
  let log = Log::default();
  let root = group(&mut ui, None, Rect::default());
  let target = group(&mut ui, Some(root), Rect::default());
  let below = group(&mut ui, Some(target), Rect::default());
  let after = group(&mut ui, Some(root), Rect::default());
  record(&mut ui, target, EventType::Resize, &log, "target", false);
  record(&mut ui, below, EventType::Resize, &log, "below", true);
  record(&mut ui, after, EventType::Resize, &log, "after", true);

  let event = Event::new(EventType::Resize).targeted(target);
  assert!(!ui.dispatch(root, &event));
  assert_eq!(*log.borrow(), ["target"]);
}

#[test]
fn handlers_may_destroy_siblings_mid_walk() {
  let mut ui = Ui::new(Headless::new(80, 25));
  let log = Log::default();
  let root = group(&mut ui, None, Rect::default());
  let a = group(&mut ui, Some(root), Rect::default());
  let b = group(&mut ui, Some(root), Rect::default());
  let c = group(&mut ui, Some(root), Rect::default());
  {
    let log = Rc::clone(&log);
    ui.on(a, EventType::Key, move |ui, _, _| {
      log.borrow_mut().push("a");
      ui.destroy(b);
      false
    });
  }
  record(&mut ui, b, EventType::Key, &log, "b", true);
  record(&mut ui, c, EventType::Key, &log, "c", true);

  assert!(ui.dispatch(root, &Event::new(EventType::Key)));
  assert_eq!(*log.borrow(), ["a", "c"]);
  assert!(!ui.contains(b));
  assert_eq!(ui.children(root), [a, c]);
}

#[test]
fn overriding_a_handler_replaces_it() {
  let mut ui = Ui::new(Headless::new(80, 25));
  let log = Log::default();
  let root = group(&mut ui, None, Rect::default());
  record(&mut ui, root, EventType::Key, &log, "old", true);
  record(&mut ui, root, EventType::Key, &log, "new", true);
  assert!(ui.node(root).handles(EventType::Key));

  ui.dispatch(root, &Event::new(EventType::Key));
  assert_eq!(*log.borrow(), ["new"]);

  ui.off(root, EventType::Key);
  assert!(!ui.dispatch(root, &Event::new(EventType::Key)));
}

// ============================================================================
// Tree structure
// ============================================================================

#[test]
fn attach_moves_between_parents() {
  let mut ui = Ui::new(Headless::new(80, 25));
  let p1 = group(&mut ui, None, Rect::default());
  let p2 = group(&mut ui, None, Rect::default());
  let child = group(&mut ui, Some(p1), Rect::default());
  assert_eq!(ui.parent(child), Some(p1));

  ui.attach(child, p2);
  assert_eq!(ui.parent(child), Some(p2));
  assert!(ui.children(p1).is_empty());
  assert_eq!(ui.children(p2), [child]);

  ui.detach(child);
  assert_eq!(ui.parent(child), None);
  assert!(ui.children(p2).is_empty());
}

#[test]
fn destroy_takes_the_subtree() {
  let mut ui = Ui::new(Headless::new(80, 25));
  let root = group(&mut ui, None, Rect::default());
  let mid = group(&mut ui, Some(root), Rect::default());
  let leaf = group(&mut ui, Some(mid), Rect::default());

  ui.destroy(mid);
  assert!(ui.contains(root));
  assert!(!ui.contains(mid));
  assert!(!ui.contains(leaf));
  assert!(ui.children(root).is_empty());
}

#[test]
#[should_panic]
fn cycles_are_rejected() {
  let mut ui = Ui::new(Headless::new(80, 25));
  let root = group(&mut ui, None, Rect::default());
  let child = group(&mut ui, Some(root), Rect::default());
  ui.attach(root, child);
}

// ============================================================================
// Coordinates
// ============================================================================

#[test]
fn screen_and_local_coordinates_invert() {
  let mut ui = Ui::new(Headless::new(80, 25));
  let root = group(&mut ui, None, Rect::new(5, 2, 60, 20));
  let mid = group(&mut ui, Some(root), Rect::new(3, 4, 20, 10));
  let leaf = group(&mut ui, Some(mid), Rect::new(1, 1, 5, 1));

  assert_eq!(ui.to_screen(leaf, Point::zero()), Point::new(9, 7));
  assert_eq!(ui.to_screen(leaf, Point::new(2, 0)), Point::new(11, 7));
  assert_eq!(ui.to_local(leaf, Point::new(9, 7)), Point::zero());

  let p = Point::new(31, 17);
  assert_eq!(ui.to_screen(leaf, ui.to_local(leaf, p)), p);
}

#[test]
fn center_within_parent_and_screen() {
  let mut ui = Ui::new(Headless::new(80, 25));
  let parent = group(&mut ui, None, Rect::new(0, 0, 40, 10));
  let child = group(&mut ui, Some(parent), Rect::new(0, 7, 10, 3));

  ui.center(child, true, false);
  assert_eq!(ui.placement(child), Rect::new(15, 7, 10, 3));
  ui.center(child, false, true);
  assert_eq!(ui.placement(child), Rect::new(15, 3, 10, 3));

  let orphan = group(&mut ui, None, Rect::new(0, 0, 11, 5));
  ui.center(orphan, true, true);
  assert_eq!(ui.placement(orphan), Rect::new(34, 10, 11, 5));
}
