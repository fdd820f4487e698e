//! Scrolling lists.
//!
//! A [`List`] stacks its children vertically, in order, and keeps track of
//! which of them is selected. Children draw into an offscreen canvas the list
//! owns; the list then copies the visible window of that canvas onto its own
//! surface, so a list can hold more than fits on screen.
//!
//! The list lays itself out again whenever a child is added or removed, and
//! whenever a child reports that it resized (see [`Ui::refit()`]). To hear
//! about the latter, the list installs its own [`EventType::Resize`] handler
//! on each child it adopts.

use std::mem;

use crate::geo::Point;
use crate::geo::Rect;
use crate::gfx::text;
use crate::input::KeyCode;
use crate::ui::event::Event;
use crate::ui::event::EventType;
use crate::ui::event::Payload;
use crate::ui::widget::Hooks;
use crate::ui::widget::RenderCx;
use crate::ui::widget::Widget;
use crate::ui::widget::WidgetId;
use crate::ui::Ui;

const TRACK: char = '│';
const THUMB: char = '█';

/// A vertical list of widgets with a selection.
///
/// A list created with a nonzero width keeps that width, reserves its last
/// column for a scroll indicator, and squeezes its children into the rest. A
/// list created with a nonzero height keeps that height and scrolls its
/// contents. A zero width or height instead tracks the size of the contents.
#[derive(Clone, Debug, Default)]
pub struct List {
  selected: Option<WidgetId>,
  scroll_top: i32,
  content: (i32, i32),
}

impl List {
  /// Creates an empty list at `rect`. See the type documentation for how
  /// `rect`'s size is interpreted.
  pub fn create(
    ui: &mut Ui,
    parent: Option<WidgetId>,
    rect: Rect,
  ) -> WidgetId {
    let id = ui.insert(Self::default(), None, rect);
    ui.set_bounds(id, Rect::with_dims(rect.width(), rect.height()));
    ui.provide_surface(id, rect.width(), rect.height());
    ui.set_hooks(
      id,
      Hooks {
        attached: Some(Self::adopt),
        detached: Some(Self::release),
      },
    );
    ui.on(id, EventType::Key, Self::on_key);
    ui.on(id, EventType::Mouse, Self::on_mouse);
    Self::layout(ui, id);

    if let Some(parent) = parent {
      ui.attach(id, parent);
    }
    id
  }

  fn state(ui: &mut Ui, id: WidgetId) -> &mut List {
    ui.widget_mut::<List>(id).expect("widget is not a list")
  }

  /// Returns the selected child.
  pub fn selected(&self) -> Option<WidgetId> {
    self.selected
  }

  /// Returns the first visible row of the contents.
  pub fn scroll_top(&self) -> i32 {
    self.scroll_top
  }

  /// Returns the size of the contents as of the last layout.
  pub fn content_size(&self) -> (i32, i32) {
    self.content
  }

  /// Appends `item` to `list`. Equivalent to [`Ui::attach()`].
  pub fn add(ui: &mut Ui, list: WidgetId, item: WidgetId) {
    ui.attach(item, list);
  }

  fn adopt(ui: &mut Ui, list: WidgetId, child: WidgetId) {
    ui.on(child, EventType::Resize, |ui, child, _| {
      match ui.parent(child) {
        Some(list) if ui.widget::<List>(list).is_some() => {
          List::layout(ui, list);
          true
        }
        _ => false,
      }
    });

    if Self::state(ui, list).selected.is_none() && ui.node(child).enabled() {
      Self::select(ui, list, Some(child));
    }
    Self::layout(ui, list);
  }

  fn release(ui: &mut Ui, list: WidgetId, child: WidgetId) {
    ui.off(child, EventType::Resize);
    if Self::state(ui, list).selected == Some(child) {
      let next = Self::step(ui, list, None, true);
      Self::select(ui, list, next);
    }
    ui.set_colors(child, text::ACTIVE);
    Self::layout(ui, list);
  }

  /// Lays out `list`'s children from scratch.
  ///
  /// Children are first squeezed into the list's fixed width, if it has one,
  /// and then stacked top to bottom. If the list's own size changes as a
  /// result, it reports that with [`Ui::refit()`]'s resize event.
  pub fn layout(ui: &mut Ui, list: WidgetId) {
    let fixed = ui.bounds(list);
    let children = ui.children(list);

    if fixed.width() > 0 {
      let w = (fixed.width() - 1).max(0);
      for &child in &children {
        let bounds = ui.bounds(child);
        if bounds.width() != w {
          ui.set_bounds(child, Rect::with_dims(w, bounds.height()));
        }
        ui.fit(child);
        let mut placement = ui.placement(child);
        placement.resize(Some(w), None);
        ui.set_placement(child, placement);
      }
    }

    let (mut width, mut height) = (0, 0);
    for &child in &children {
      let mut placement = ui.placement(child);
      placement.move_to(Some(0), Some(height));
      ui.set_placement(child, placement);
      height = placement.bottom();
      width = width.max(placement.width());
    }

    if let Some(surface) = ui.node(list).child_surface() {
      ui.canvas_mut(surface)
        .grow(width.max(fixed.width()), height.max(fixed.height()));
    }

    let size = (
      if fixed.width() > 0 { fixed.width() } else { width },
      if fixed.height() > 0 { fixed.height() } else { height },
    );
    Self::state(ui, list).content = (width, height);
    log::trace!("laid out {:?}: content {}x{}", list, width, height);

    let mut placement = ui.placement(list);
    let resized = placement.size() != size;
    if resized {
      placement.resize(Some(size.0), Some(size.1));
      ui.set_placement(list, placement);
    }

    // Scroll against the new visible height.
    if let Some(selected) = Self::state(ui, list).selected {
      let placement = ui.placement(selected);
      Self::scroll_to(ui, list, placement.top(), placement.bottom());
    }
    let state = Self::state(ui, list);
    state.scroll_top = state.scroll_top.clamp(0, (height - size.1).max(0));

    if resized {
      ui.post(EventType::Resize, Payload::None, Some(list));
    }
  }

  /// Scrolls `list` as little as possible to make rows `top..bottom` of its
  /// contents visible.
  ///
  /// If the span is taller than the list, its top edge wins when scrolling up
  /// and its bottom edge when scrolling down.
  pub fn scroll_to(ui: &mut Ui, list: WidgetId, top: i32, bottom: i32) {
    let visible = ui.placement(list).height();
    let state = Self::state(ui, list);
    if top < state.scroll_top {
      state.scroll_top = top;
    } else if bottom > state.scroll_top + visible {
      state.scroll_top = bottom - visible;
    }
    state.scroll_top = state.scroll_top.max(0);
  }

  /// Scrolls `list` by `rows`, staying within its contents.
  pub fn scroll_by(ui: &mut Ui, list: WidgetId, rows: i32) {
    let visible = ui.placement(list).height();
    let state = Self::state(ui, list);
    let max = (state.content.1 - visible).max(0);
    state.scroll_top = (state.scroll_top + rows).clamp(0, max);
  }

  /// Selects `item` in `list`, scrolling it into view; `None` clears the
  /// selection.
  pub fn select(ui: &mut Ui, list: WidgetId, item: Option<WidgetId>) {
    let prev = mem::replace(&mut Self::state(ui, list).selected, item);
    if prev != item {
      if let Some(prev) = prev.filter(|&p| ui.contains(p)) {
        ui.set_colors(prev, text::ACTIVE);
      }
      if let Some(item) = item {
        ui.set_colors(item, text::SELECTED);
      }
    }
    if let Some(item) = item {
      let placement = ui.placement(item);
      Self::scroll_to(ui, list, placement.top(), placement.bottom());
    }
  }

  /// Finds the nearest enabled child after (or before) `from`. With no
  /// `from`, starts from the corresponding end of the list.
  fn step(
    ui: &Ui,
    list: WidgetId,
    from: Option<WidgetId>,
    forward: bool,
  ) -> Option<WidgetId> {
    let children = ui.node(list).children();
    let advance = |c| {
      if forward {
        children.next(c)
      } else {
        children.prev(c)
      }
    };
    let mut cur = match from {
      Some(from) => advance(from),
      None if forward => children.first(),
      None => children.last(),
    };
    while let Some(c) = cur {
      if ui.node(c).enabled() {
        return Some(c);
      }
      cur = advance(c);
    }
    None
  }

  /// Moves the selection one enabled item forward or back, stopping at the
  /// ends.
  pub fn navigate(ui: &mut Ui, list: WidgetId, forward: bool) {
    let selected = Self::state(ui, list).selected;
    if let Some(next) = Self::step(ui, list, selected, forward) {
      Self::select(ui, list, Some(next));
    }
  }

  /// Moves the selection about one page forward or back.
  fn page(ui: &mut Ui, list: WidgetId, forward: bool) {
    let visible = ui.placement(list).height().max(1);
    let mut travelled = 0;
    let mut cur = Self::state(ui, list).selected;
    while travelled < visible {
      let Some(next) = Self::step(ui, list, cur, forward) else {
        break;
      };
      travelled += ui.placement(next).height().max(1);
      cur = Some(next);
    }
    if cur.is_some() {
      Self::select(ui, list, cur);
    }
  }

  fn on_key(ui: &mut Ui, list: WidgetId, event: &Event) -> bool {
    let Some(key) = event.key() else {
      return false;
    };
    let selected = Self::state(ui, list).selected;
    match key.code {
      KeyCode::Up => Self::navigate(ui, list, false),
      KeyCode::Down => Self::navigate(ui, list, true),
      KeyCode::PageUp => Self::page(ui, list, false),
      KeyCode::PageDown => Self::page(ui, list, true),
      KeyCode::Home => {
        let first = Self::step(ui, list, None, true);
        Self::select(ui, list, first.or(selected));
      }
      KeyCode::End => {
        let last = Self::step(ui, list, None, false);
        Self::select(ui, list, last.or(selected));
      }
      KeyCode::Enter => match selected {
        Some(item) => {
          ui.post(EventType::Activate, Payload::None, Some(item))
        }
        None => return false,
      },
      _ => {
        return match selected {
          Some(item) => ui.dispatch(item, &event.clone().targeted(item)),
          None => false,
        }
      }
    }
    true
  }

  fn on_mouse(ui: &mut Ui, list: WidgetId, event: &Event) -> bool {
    let Some(&mouse) = event.mouse() else {
      return false;
    };
    let local = ui.to_local(list, mouse.pos);
    let (w, h) = ui.placement(list).size();
    if !Rect::with_dims(w, h).contains(local) {
      return false;
    }

    if mouse.wheel != 0 {
      Self::scroll_by(ui, list, mouse.wheel);
    }
    if !mouse.moved && !mouse.clicked {
      return mouse.wheel != 0;
    }

    let at = local + Point::new(0, Self::state(ui, list).scroll_top);
    let hit = ui.children(list).into_iter().find(|&c| {
      ui.node(c).enabled() && ui.placement(c).contains(at)
    });
    if let Some(item) = hit {
      Self::select(ui, list, Some(item));
      if mouse.clicked {
        ui.post(EventType::Activate, Payload::None, Some(item));
      }
    }
    true
  }

  fn draw_scrollbar(&self, cx: &mut RenderCx<'_>, id: WidgetId, rect: Rect) {
    let node = cx.node(id);
    let visible = rect.height();
    let total = self.content.1;
    if node.bounds().width() <= 0 || visible <= 0 || total <= visible {
      return;
    }

    let thumb = (visible * visible / total).max(1);
    let thumb_top = self.scroll_top * (visible - thumb) / (total - visible);
    let blend = node.blend();
    let canvas = cx.canvas(id);
    let x = rect.right() - 1;
    for y in 0..visible {
      let glyph = if (thumb_top..thumb_top + thumb).contains(&y) {
        THUMB
      } else {
        TRACK
      };
      canvas.put(Point::new(x, rect.top() + y), glyph, blend);
    }
  }
}

impl Widget for List {
  fn render(&self, cx: &mut RenderCx<'_>, id: WidgetId) {
    let node = cx.node(id);
    let Some(offscreen) = node.child_surface() else {
      return cx.render_children(id);
    };
    let colors = node.colors();
    let blend = node.blend();

    let canvas = cx.surface(offscreen);
    canvas.apply(&colors);
    canvas.clear();
    cx.render_children(id);

    let rect = cx.rect(id);
    let target = cx.surface_of(id);
    cx.canvas(id).rect(rect, true, blend);
    let window = Rect::new(0, self.scroll_top, rect.width(), rect.height());
    cx.blit(offscreen, window, target, rect.origin(), 1.0, 1.0);
    self.draw_scrollbar(cx, id, rect);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use crate::gfx::Headless;
  use crate::input;
  use crate::ui::Label;

  fn key(code: KeyCode) -> Event {
    Event::new(EventType::Key).with_payload(Payload::Key(input::press(code)))
  }

  #[test]
  fn navigation_skips_disabled_and_clamps() {
    let mut ui = Ui::new(Headless::new(20, 10));
    let list = List::create(&mut ui, None, Rect::new(0, 0, 0, 0));
    let a = Label::create(&mut ui, Some(list), 0, 0, "a");
    let b = Label::create(&mut ui, Some(list), 0, 0, "b");
    let c = Label::create(&mut ui, Some(list), 0, 0, "c");
    ui.set_enabled(b, false);

    let selected = |ui: &Ui| ui.widget::<List>(list).unwrap().selected();
    assert_eq!(selected(&ui), Some(a));

    assert!(ui.dispatch(list, &key(KeyCode::Down)));
    assert_eq!(selected(&ui), Some(c));
    assert!(ui.dispatch(list, &key(KeyCode::Down)));
    assert_eq!(selected(&ui), Some(c));

    assert!(ui.dispatch(list, &key(KeyCode::Up)));
    assert_eq!(selected(&ui), Some(a));
    assert!(ui.dispatch(list, &key(KeyCode::Up)));
    assert_eq!(selected(&ui), Some(a));
  }

  #[test]
  fn enter_activates_selection() {
    let mut ui = Ui::new(Headless::new(20, 10));
    let list = List::create(&mut ui, None, Rect::new(0, 0, 0, 0));
    let a = Label::create(&mut ui, Some(list), 0, 0, "a");
    ui.events().clear();

    assert!(ui.dispatch(list, &key(KeyCode::Enter)));
    let events: Vec<_> = ui.events().drain().collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].ty, EventType::Activate);
    assert_eq!(events[0].target, Some(a));
  }

  #[test]
  fn removing_selection_moves_it() {
    let mut ui = Ui::new(Headless::new(20, 10));
    let list = List::create(&mut ui, None, Rect::new(0, 0, 0, 0));
    let a = Label::create(&mut ui, Some(list), 0, 0, "a");
    let b = Label::create(&mut ui, Some(list), 0, 0, "bb");
    assert_eq!(ui.placement(b).top(), 1);

    ui.destroy(a);
    let state = ui.widget::<List>(list).unwrap();
    assert_eq!(state.selected(), Some(b));
    assert_eq!(state.content_size(), (2, 1));
    assert_eq!(ui.placement(b).top(), 0);
  }

  #[test]
  fn renders_visible_window() {
    let mut ui = Ui::new(Headless::new(6, 3));
    let list = List::create(&mut ui, None, Rect::new(0, 0, 6, 2));
    for s in ["one", "two", "three", "four"] {
      Label::create(&mut ui, Some(list), 0, 0, s);
    }
    List::scroll_to(&mut ui, list, 2, 4);
    ui.render(list);

    let screen = ui.screen();
    assert_eq!(screen.row(0), "three│");
    assert_eq!(screen.row(1), "four █");
    assert_eq!(screen.row(2), "      ");
  }
}
