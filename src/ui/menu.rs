//! Menus: framed lists of keyed actions.

use crate::error::Result;
use crate::geo::Rect;
use crate::gfx::text;
use crate::input::KeyBinding;
use crate::input::KeyCode;
use crate::ui::button::Button;
use crate::ui::dialog::Dialog;
use crate::ui::event::Event;
use crate::ui::event::EventType;
use crate::ui::event::Payload;
use crate::ui::list::List;
use crate::ui::widget::RenderCx;
use crate::ui::widget::Widget;
use crate::ui::widget::WidgetId;
use crate::ui::Ui;

/// A dialog containing a list of buttons, each bound to a key.
///
/// Pressing an item's key selects it and activates it, wherever the selection
/// was. Esc cancels the menu (see [`Ui::run()`]).
///
/// A menu created with a zero width or height sizes that dimension to fit its
/// list plus the frame.
pub struct Menu {
  frame: Dialog,
  list: WidgetId,
  fixed: (i32, i32),
  items: Vec<(KeyBinding, WidgetId)>,
}

impl Menu {
  /// Creates an empty menu.
  pub fn create(
    ui: &mut Ui,
    parent: Option<WidgetId>,
    rect: Rect,
    title: Option<&str>,
  ) -> WidgetId {
    let list_rect = Rect::new(
      1,
      1,
      (rect.width() - 2).max(0),
      (rect.height() - 2).max(0),
    );
    let list = List::create(ui, None, list_rect);
    let menu = Self {
      frame: Dialog::new(title),
      list,
      fixed: rect.size(),
      items: Vec::new(),
    };
    let id = ui.insert(menu, None, rect);
    ui.attach(list, id);

    ui.on(list, EventType::Resize, |ui, list, _| match ui.parent(list) {
      Some(menu) if ui.widget::<Menu>(menu).is_some() => {
        Menu::fit(ui, menu);
        true
      }
      _ => false,
    });
    ui.on(id, EventType::Key, Self::on_key);
    Self::fit(ui, id);

    if let Some(parent) = parent {
      ui.attach(id, parent);
    }
    id
  }

  /// Returns the list holding this menu's items.
  pub fn list(&self) -> WidgetId {
    self.list
  }

  /// Adds an item labelled `label`, bound to the key named `key`, which runs
  /// `action` when activated.
  ///
  /// Returns an error if `key` does not name a key.
  pub fn add_item(
    ui: &mut Ui,
    menu: WidgetId,
    key: &str,
    label: &str,
    action: impl Fn(&mut Ui, WidgetId) + 'static,
  ) -> Result<WidgetId> {
    let binding = KeyBinding::parse(key)?;
    let text = format!(
      "[{}{}{}] {}",
      text::slot_char(text::SHORTCUT),
      key,
      text::COLOR_STOP,
      label
    );
    let item = Button::create(ui, None, 0, 0, text, Some(binding), action);
    Self::add(ui, menu, binding, item);
    Ok(item)
  }

  /// Adds an arbitrary widget as an item, selected and activated by
  /// `binding`.
  pub fn add(ui: &mut Ui, menu: WidgetId, binding: KeyBinding, item: WidgetId) {
    let state = ui.widget_mut::<Menu>(menu).expect("widget is not a menu");
    state.items.push((binding, item));
    let list = state.list;
    List::add(ui, list, item);
    Self::fit(ui, menu);
  }

  /// Resizes `menu` around its list, along whichever dimensions are not
  /// fixed.
  pub fn fit(ui: &mut Ui, menu: WidgetId) {
    let Some(state) = ui.widget::<Menu>(menu) else {
      return;
    };
    let (fw, fh) = state.fixed;
    let (lw, lh) = ui.placement(state.list).size();
    let w = if fw > 0 { fw } else { lw + 2 };
    let h = if fh > 0 { fh } else { lh + 2 };

    let mut placement = ui.placement(menu);
    if placement.size() != (w, h) {
      placement.resize(Some(w), Some(h));
      ui.set_placement(menu, placement);
      ui.post(EventType::Resize, Payload::None, Some(menu));
    }
  }

  fn on_key(ui: &mut Ui, menu: WidgetId, event: &Event) -> bool {
    let Some(key) = event.key() else {
      return false;
    };
    if key.code == KeyCode::Esc {
      ui.post(EventType::Cancel, Payload::None, None);
      return true;
    }

    let Some(state) = ui.widget::<Menu>(menu) else {
      return false;
    };
    let list = state.list;
    let hit = state
      .items
      .iter()
      .find(|(binding, item)| {
        binding.matches(key) && ui.contains(*item) && ui.node(*item).enabled()
      })
      .map(|&(_, item)| item);

    let Some(item) = hit else {
      return false;
    };
    List::select(ui, list, Some(item));
    ui.post(EventType::Activate, Payload::None, Some(item));
    true
  }
}

impl Widget for Menu {
  fn render(&self, cx: &mut RenderCx<'_>, id: WidgetId) {
    self.frame.draw(cx, id);
    cx.render_children(id);
  }
}
