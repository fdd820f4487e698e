//! List entries for viewing and editing options.
//!
//! An [`OptionItem`] shows one option from a [`SharedOptions`] store as
//! `Caption: value` and edits it in place. Items only respond to input
//! addressed to them, which is what a [`List`](crate::ui::List) sends its
//! selected item.

use crate::config::SharedOptions;
use crate::geo::Rect;
use crate::gfx::text;
use crate::gfx::Canvas;
use crate::input::KeyCode;
use crate::ui::event::Event;
use crate::ui::event::EventType;
use crate::ui::keybind;
use crate::ui::label::Label;
use crate::ui::widget::RenderCx;
use crate::ui::widget::Widget;
use crate::ui::widget::WidgetId;
use crate::ui::Ui;

/// What kind of value an option holds, which decides how it is shown and
/// edited.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum OptionKind {
  /// An integer, adjusted with Left and Right within optional limits.
  Int {
    /// The smallest allowed value.
    min: Option<i64>,
    /// The largest allowed value.
    max: Option<i64>,
  },
  /// A flag, toggled on activation; Left disables and Right enables.
  Bool,
  /// A key name. Activation or Right asks for a new key; Left or Backspace
  /// unsets it.
  Key,
}

/// A list entry displaying and editing one option.
pub struct OptionItem {
  label: Label,
  caption: String,
  section: String,
  key: String,
  kind: OptionKind,
  options: SharedOptions,
}

fn styled(slot: usize, s: impl std::fmt::Display) -> String {
  format!("{}{}{}", text::slot_char(slot), s, text::COLOR_STOP)
}

impl OptionItem {
  /// Creates an item for option `[section] key`, labelled `caption`.
  pub fn create(
    ui: &mut Ui,
    parent: Option<WidgetId>,
    caption: &str,
    section: &str,
    key: &str,
    kind: OptionKind,
    options: SharedOptions,
  ) -> WidgetId {
    let mut item = Self {
      label: Label::default(),
      caption: caption.to_string(),
      section: section.to_string(),
      key: key.to_string(),
      kind,
      options,
    };
    item.label = Label::new(item.format());

    let id = ui.insert(item, None, Rect::default());
    ui.fit(id);
    ui.on(id, EventType::Key, Self::on_key);
    ui.on(id, EventType::Activate, Self::on_activate);
    if let Some(parent) = parent {
      ui.attach(id, parent);
    }
    id
  }

  /// Returns the kind of option this item edits.
  pub fn kind(&self) -> OptionKind {
    self.kind
  }

  /// Renders the option's current value as this item's text.
  pub fn format(&self) -> String {
    let options = self.options.borrow();
    let (section, key) = (self.section.as_str(), self.key.as_str());
    let value = match self.kind {
      OptionKind::Int { .. } => match options.get_int(section, key) {
        Ok(v) => styled(text::VALUE, v),
        Err(e) => {
          log::warn!("{}", e);
          styled(text::WARNING, "Invalid")
        }
      },
      OptionKind::Bool => match options.get_bool(section, key) {
        Ok(true) => styled(text::VALUE, "Enabled"),
        Ok(false) => styled(text::VALUE, "Disabled"),
        Err(e) => {
          log::warn!("{}", e);
          styled(text::WARNING, "Invalid")
        }
      },
      OptionKind::Key => match options.get_str(section, key) {
        Some(name) => styled(text::VALUE, name),
        None => styled(text::WARNING, "Unset"),
      },
    };
    format!("{}: {}", self.caption, value)
  }

  /// Re-reads `id`'s option and updates its text.
  pub fn refresh(ui: &mut Ui, id: WidgetId) {
    let Some(item) = ui.widget::<OptionItem>(id) else {
      return;
    };
    let text = item.format();
    Label::set_text(ui, id, text);
  }

  fn on_key(ui: &mut Ui, id: WidgetId, event: &Event) -> bool {
    let (Some(key), Some(item)) = (event.key(), ui.widget::<OptionItem>(id))
    else {
      return false;
    };
    if event.target != Some(id) {
      return false;
    }
    let kind = item.kind;
    let options = item.options.clone();
    let (section, name) = (item.section.clone(), item.key.clone());

    match (kind, key.code) {
      (OptionKind::Int { min, max }, KeyCode::Left | KeyCode::Right) => {
        let mut options = options.borrow_mut();
        let fallback = min.unwrap_or(0);
        let value = options.get_int(&section, &name).unwrap_or(fallback);
        let value = if key.code == KeyCode::Left {
          match min {
            Some(min) if value <= min => value,
            _ => value - 1,
          }
        } else {
          match max {
            Some(max) if value >= max => value,
            _ => value + 1,
          }
        };
        options.set_int(&section, &name, value);
      }
      (OptionKind::Bool, KeyCode::Left | KeyCode::Right) => {
        let value = key.code == KeyCode::Right;
        options.borrow_mut().set_bool(&section, &name, value);
      }
      (OptionKind::Key, KeyCode::Left | KeyCode::Backspace) => {
        options.borrow_mut().unset(&section, &name);
      }
      (OptionKind::Key, KeyCode::Right) => {
        return Self::on_activate(ui, id, event);
      }
      _ => return false,
    }
    Self::refresh(ui, id);
    true
  }

  fn on_activate(ui: &mut Ui, id: WidgetId, _: &Event) -> bool {
    let Some(item) = ui.widget::<OptionItem>(id) else {
      return false;
    };
    let options = item.options.clone();
    let (section, name) = (item.section.clone(), item.key.clone());

    let kind = item.kind;
    match kind {
      OptionKind::Bool => {
        let mut options = options.borrow_mut();
        let value = options.get_bool(&section, &name).unwrap_or(false);
        options.set_bool(&section, &name, !value);
      }
      OptionKind::Key => {
        if let Some(key) = keybind::capture_key(ui) {
          options.borrow_mut().set(&section, &name, key);
        }
      }
      OptionKind::Int { .. } => return false,
    }
    Self::refresh(ui, id);
    true
  }
}

impl Widget for OptionItem {
  fn render(&self, cx: &mut RenderCx<'_>, id: WidgetId) {
    self.label.draw(cx, id);
    cx.render_children(id);
  }

  fn measure(&self, bounds: Rect, surface: &Canvas) -> Option<(i32, i32)> {
    Some(self.label.size_for(bounds, surface))
  }

  fn label(&self) -> Option<&Label> {
    Some(&self.label)
  }

  fn label_mut(&mut self) -> Option<&mut Label> {
    Some(&mut self.label)
  }
}
