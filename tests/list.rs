use std::cell::Cell;
use std::rc::Rc;

use npc::geo::Point;
use npc::geo::Rect;
use npc::gfx::Headless;
use npc::input::MouseState;
use npc::ui::Event;
use npc::ui::EventType;
use npc::ui::Label;
use npc::ui::List;
use npc::ui::Payload;
use npc::ui::Ui;
use npc::ui::WidgetId;

fn state(ui: &Ui, list: WidgetId) -> &List {
  ui.widget::<List>(list).unwrap()
}

/// Delivers every queued event to `top`, as a UI loop would.
fn pump(ui: &mut Ui, top: WidgetId) {
  while !ui.events().is_empty() {
    for event in ui.events().drain() {
      ui.dispatch(top, &event);
    }
  }
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn children_stack_in_order() {
  let mut ui = Ui::new(Headless::new(80, 25));
  let list = List::create(&mut ui, None, Rect::default());
  let a = Label::create(&mut ui, Some(list), 0, 0, "a");
  let b = Label::create(&mut ui, Some(list), 0, 0, "b\nb");
  let c = Label::create(&mut ui, Some(list), 0, 0, "c");

  let tops: Vec<_> = [a, b, c].iter().map(|&i| ui.placement(i).top()).collect();
  assert_eq!(tops, [0, 1, 3]);
  assert_eq!(state(&ui, list).content_size(), (1, 4));
  assert_eq!(ui.placement(list).size(), (1, 4));
}

#[test]
fn child_resize_relays_out() {
  let mut ui = Ui::new(Headless::new(80, 25));
  let list = List::create(&mut ui, None, Rect::default());
  let a = Label::create(&mut ui, Some(list), 0, 0, "a");
  let b = Label::create(&mut ui, Some(list), 0, 0, "b");
  pump(&mut ui, list);

  Label::set_text(&mut ui, a, "first\nsecond\nthird");
  assert_eq!(ui.placement(b).top(), 1, "nothing moves until delivery");
  pump(&mut ui, list);

  assert_eq!(ui.placement(b).top(), 3);
  assert_eq!(state(&ui, list).content_size(), (6, 4));
}

#[test]
fn fixed_width_squeezes_children_before_stacking() {
  let mut ui = Ui::new(Headless::new(80, 25));
  let list = List::create(&mut ui, None, Rect::new(0, 0, 7, 0));
  let long = Label::create(&mut ui, Some(list), 0, 0, "one two three");
  let next = Label::create(&mut ui, Some(list), 0, 0, "x");

  // Six usable columns: "one" / "two" / "three".
  assert_eq!(ui.placement(long).size(), (6, 3));
  assert_eq!(ui.placement(next).top(), 3);
  assert_eq!(ui.placement(list).size(), (7, 4));
}

#[test]
fn offscreen_canvas_only_grows() {
  let mut ui = Ui::new(Headless::new(80, 25));
  let list = List::create(&mut ui, None, Rect::default());
  let big = Label::create(&mut ui, Some(list), 0, 0, "wide label\n\n\n");
  let surface = ui.node(list).child_surface().unwrap();
  assert_eq!(ui.canvas(surface).dims().size(), (10, 4));

  ui.destroy(big);
  assert_eq!(state(&ui, list).content_size(), (0, 0));
  assert_eq!(ui.canvas(surface).dims().size(), (10, 4));
}

// ============================================================================
// Scrolling
// ============================================================================

#[test]
fn selecting_below_the_window_scrolls_minimally() {
  let mut ui = Ui::new(Headless::new(80, 25));
  let list = List::create(&mut ui, None, Rect::new(0, 0, 10, 5));
  let items: Vec<_> = (0..10)
    .map(|i| Label::create(&mut ui, Some(list), 0, 0, format!("item {}", i)))
    .collect();
  assert_eq!(state(&ui, list).content_size().1, 10);
  assert_eq!(state(&ui, list).scroll_top(), 0);

  List::select(&mut ui, list, Some(items[8]));
  let top = state(&ui, list).scroll_top();
  assert!(top + 5 >= 9 && top <= 8);
  assert_eq!(top, 4);

  // Already visible: no movement.
  List::select(&mut ui, list, Some(items[6]));
  assert_eq!(state(&ui, list).scroll_top(), 4);

  // Above the window: the top edge is revealed.
  List::select(&mut ui, list, Some(items[1]));
  assert_eq!(state(&ui, list).scroll_top(), 1);
}

#[test]
fn growing_list_scrolls_against_its_new_height() {
  let mut ui = Ui::new(Headless::new(10, 6));
  let list = List::create(&mut ui, None, Rect::default());
  let a = Label::create(&mut ui, Some(list), 0, 0, "a");
  Label::create(&mut ui, Some(list), 0, 0, "b");
  let c = Label::create(&mut ui, Some(list), 0, 0, "c");
  List::select(&mut ui, list, Some(c));
  pump(&mut ui, list);

  Label::set_text(&mut ui, a, "a\na\na");
  pump(&mut ui, list);

  assert_eq!(state(&ui, list).content_size(), (1, 5));
  assert_eq!(ui.placement(list).size(), (1, 5));
  assert_eq!(state(&ui, list).scroll_top(), 0);

  ui.render(list);
  let rows: Vec<_> = (0..5)
    .map(|y| ui.screen().row(y).trim_end().to_string())
    .collect();
  assert_eq!(rows, ["a", "a", "a", "b", "c"]);
}

#[test]
fn scroll_to_prefers_the_edge_it_moves_towards() {
  let mut ui = Ui::new(Headless::new(80, 25));
  let list = List::create(&mut ui, None, Rect::new(0, 0, 10, 3));
  for i in 0..20 {
    Label::create(&mut ui, Some(list), 0, 0, format!("{}", i));
  }

  List::scroll_to(&mut ui, list, 10, 15);
  assert_eq!(state(&ui, list).scroll_top(), 12);
  List::scroll_to(&mut ui, list, 2, 7);
  assert_eq!(state(&ui, list).scroll_top(), 2);
}

#[test]
fn wheel_scrolls_within_contents() {
  let mut ui = Ui::new(Headless::new(80, 25));
  let list = List::create(&mut ui, None, Rect::new(2, 2, 10, 3));
  for i in 0..5 {
    Label::create(&mut ui, Some(list), 0, 0, format!("{}", i));
  }
  let wheel = |n| {
    Event::new(EventType::Mouse).with_payload(Payload::Mouse(MouseState {
      pos: Point::new(3, 3),
      wheel: n,
      ..MouseState::default()
    }))
  };

  assert!(ui.dispatch(list, &wheel(10)));
  assert_eq!(state(&ui, list).scroll_top(), 2);
  assert!(ui.dispatch(list, &wheel(-1)));
  assert_eq!(state(&ui, list).scroll_top(), 1);
}

// ============================================================================
// Mouse
// ============================================================================

#[test]
fn click_selects_and_activates_the_item_under_the_pointer() {
  let mut ui = Ui::new(Headless::new(80, 25));
  let list = List::create(&mut ui, None, Rect::new(10, 5, 12, 2));
  let items: Vec<_> = (0..4)
    .map(|i| Label::create(&mut ui, Some(list), 0, 0, format!("row {}", i)))
    .collect();
  List::scroll_to(&mut ui, list, 2, 4);
  ui.events().clear();

  let hits = Rc::new(Cell::new(None));
  let h = Rc::clone(&hits);
  ui.on(items[3], EventType::Activate, move |_, id, _| {
    h.set(Some(id));
    true
  });

  // Screen row 6 is the window's second row, which shows row 3.
  let click = Event::new(EventType::Mouse).with_payload(Payload::Mouse(
    MouseState {
      pos: Point::new(11, 6),
      clicked: true,
      left_down: true,
      moved: true,
      wheel: 0,
    },
  ));
  assert!(ui.dispatch(list, &click));
  assert_eq!(state(&ui, list).selected(), Some(items[3]));

  pump(&mut ui, list);
  assert_eq!(hits.get(), Some(items[3]));

  let outside = Event::new(EventType::Mouse).with_payload(Payload::Mouse(
    MouseState {
      pos: Point::new(0, 0),
      moved: true,
      ..MouseState::default()
    },
  ));
  assert!(!ui.dispatch(list, &outside));
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn nested_list_renders_at_its_screen_position() {
  let mut ui = Ui::new(Headless::new(12, 4));
  let outer = ui.insert(npc::ui::Group, None, Rect::new(2, 1, 10, 3));
  let list = List::create(&mut ui, Some(outer), Rect::new(1, 1, 0, 0));
  Label::create(&mut ui, Some(list), 0, 0, "ab");
  Label::create(&mut ui, Some(list), 0, 0, "cd");

  ui.render(outer);
  let screen = ui.screen();
  assert_eq!(screen.row(0), "            ");
  assert_eq!(screen.row(1), "            ");
  assert_eq!(screen.row(2), "   ab       ");
  assert_eq!(screen.row(3), "   cd       ");
}
