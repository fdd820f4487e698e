//! Buttons.

use std::rc::Rc;

use crate::geo::Rect;
use crate::gfx::Canvas;
use crate::input::KeyBinding;
use crate::ui::event::EventType;
use crate::ui::event::Payload;
use crate::ui::label::Label;
use crate::ui::widget::RenderCx;
use crate::ui::widget::Widget;
use crate::ui::widget::WidgetId;
use crate::ui::Ui;

/// The action a button performs when activated.
pub type Action = Rc<dyn Fn(&mut Ui, WidgetId)>;

/// A label which performs an action when its key is pressed or it is
/// activated.
///
/// Pressing the key posts an [`EventType::Activate`] event addressed to the
/// button, so whatever it is in can see it coming; the action runs when that
/// event is delivered.
pub struct Button {
  label: Label,
  binding: Option<KeyBinding>,
  action: Action,
}

impl Button {
  /// Creates a button at `(x, y)`, sized to `text`.
  pub fn create(
    ui: &mut Ui,
    parent: Option<WidgetId>,
    x: i32,
    y: i32,
    text: impl Into<String>,
    binding: Option<KeyBinding>,
    action: impl Fn(&mut Ui, WidgetId) + 'static,
  ) -> WidgetId {
    let button = Self {
      label: Label::new(text),
      binding,
      action: Rc::new(action),
    };
    let id = ui.insert(button, None, Rect::new(x, y, 0, 0));
    ui.fit(id);

    ui.on(id, EventType::Key, |ui, id, event| {
      let Some(key) = event.key() else {
        return false;
      };
      let bound = ui
        .widget::<Button>(id)
        .and_then(|b| b.binding)
        .map_or(false, |b| b.matches(key));
      if bound {
        ui.post(EventType::Activate, Payload::None, Some(id));
      }
      bound
    });
    ui.on(id, EventType::Activate, |ui, id, _| {
      let Some(button) = ui.widget::<Button>(id) else {
        return false;
      };
      if !ui.node(id).enabled() {
        return false;
      }
      let action = Rc::clone(&button.action);
      log::debug!("activating {:?}", id);
      action(ui, id);
      true
    });

    if let Some(parent) = parent {
      ui.attach(id, parent);
    }
    id
  }

  /// Returns the key that activates this button.
  pub fn binding(&self) -> Option<KeyBinding> {
    self.binding
  }
}

impl Widget for Button {
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
