//! Framed dialogs.

use crate::geo::Rect;
use crate::ui::widget::RenderCx;
use crate::ui::widget::Widget;
use crate::ui::widget::WidgetId;
use crate::ui::Ui;

/// A framed box, optionally titled, which clears its interior and then draws
/// its children over it.
#[derive(Clone, Debug, Default)]
pub struct Dialog {
  title: Option<String>,
}

impl Dialog {
  /// Creates a dialog covering `rect`.
  pub fn create(
    ui: &mut Ui,
    parent: Option<WidgetId>,
    rect: Rect,
    title: Option<&str>,
  ) -> WidgetId {
    ui.insert(Self::new(title), parent, rect)
  }

  /// Creates the dialog-specific part of a widget, for embedding.
  pub fn new(title: Option<&str>) -> Self {
    Self {
      title: title.map(str::to_string),
    }
  }

  /// Returns this dialog's title.
  pub fn title(&self) -> Option<&str> {
    self.title.as_deref()
  }

  /// Draws the frame around `id`.
  pub fn draw(&self, cx: &mut RenderCx<'_>, id: WidgetId) {
    let rect = cx.rect(id);
    let blend = cx.node(id).blend();
    cx.canvas(id).frame(rect, self.title(), true, blend);
  }
}

impl Widget for Dialog {
  fn render(&self, cx: &mut RenderCx<'_>, id: WidgetId) {
    self.draw(cx, id);
    cx.render_children(id);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use crate::gfx::Headless;
  use crate::ui::Label;

  #[test]
  fn frames_and_draws_children_inside() {
    let mut ui = Ui::new(Headless::new(10, 4));
    let d = Dialog::create(&mut ui, None, Rect::new(1, 0, 8, 4), Some("Hi"));
    Label::create(&mut ui, Some(d), 1, 1, "abc");
    ui.render(d);

    let screen = ui.screen();
    assert_eq!(screen.row(0), " ┌─ Hi ─┐ ");
    assert_eq!(screen.row(1), " │abc   │ ");
    assert_eq!(screen.row(2), " │      │ ");
    assert_eq!(screen.row(3), " └──────┘ ");
  }
}
