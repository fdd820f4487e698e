//! Text labels.

use std::mem;

use crate::geo::Rect;
use crate::gfx::text;
use crate::gfx::Align;
use crate::gfx::Canvas;
use crate::ui::widget::RenderCx;
use crate::ui::widget::Widget;
use crate::ui::widget::WidgetId;
use crate::ui::Ui;

/// A block of text.
///
/// A label sizes itself to its text. If its bounds have no width, it is as
/// wide as its longest line; otherwise it is exactly as wide as its bounds and
/// wraps its text to fit. Its height is the number of lines, unless its bounds
/// fix a height.
///
/// The text may contain the inline color controls from [`text`].
#[derive(Clone, Debug, Default)]
pub struct Label {
  text: String,
  align: Align,
}

impl Label {
  /// Creates a detached label, for embedding in another widget.
  pub fn new(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      align: Align::Left,
    }
  }

  /// Creates a label widget at `(x, y)`, sized to fit `text` on as many lines
  /// as it contains.
  pub fn create(
    ui: &mut Ui,
    parent: Option<WidgetId>,
    x: i32,
    y: i32,
    text: impl Into<String>,
  ) -> WidgetId {
    Self::create_bounded(ui, parent, Rect::new(x, y, 0, 0), text)
  }

  /// Creates a label widget whose sizing bounds are `rect`'s size.
  pub fn create_bounded(
    ui: &mut Ui,
    parent: Option<WidgetId>,
    rect: Rect,
    text: impl Into<String>,
  ) -> WidgetId {
    let id = ui.insert(Self::new(text), None, rect);
    ui.set_bounds(id, Rect::with_dims(rect.width(), rect.height()));
    ui.fit(id);
    if let Some(parent) = parent {
      ui.attach(id, parent);
    }
    id
  }

  /// Returns this label's text.
  pub fn text(&self) -> &str {
    &self.text
  }

  /// Returns this label's alignment.
  pub fn align(&self) -> Align {
    self.align
  }

  /// Replaces the text shown by `id`, resizing it if needed.
  ///
  /// Returns the old text.
  ///
  /// # Panics
  ///
  /// Panics if `id` does not display a label.
  pub fn set_text(
    ui: &mut Ui,
    id: WidgetId,
    text: impl Into<String>,
  ) -> String {
    let label = ui.label_mut(id).expect("widget has no label");
    let old = mem::replace(&mut label.text, text.into());
    ui.refit(id);
    old
  }

  /// Sets the alignment of `id`'s text.
  ///
  /// # Panics
  ///
  /// Panics if `id` does not display a label.
  pub fn set_align(ui: &mut Ui, id: WidgetId, align: Align) {
    ui.label_mut(id).expect("widget has no label").align = align;
  }

  /// Computes the size of this label's text under `bounds`.
  pub fn size_for(&self, bounds: Rect, surface: &Canvas) -> (i32, i32) {
    let (w, h) = if bounds.width() > 0 {
      let lines = surface.measure(&self.text, bounds.width());
      (bounds.width(), lines.max(1))
    } else {
      let lines = self.text.split('\n');
      let w = lines.clone().map(text::width).max().unwrap_or(0);
      (w as i32, lines.count() as i32)
    };
    if bounds.height() > 0 {
      (w, bounds.height())
    } else {
      (w, h)
    }
  }

  /// Clears `id`'s rectangle and prints this label's text into it.
  pub fn draw(&self, cx: &mut RenderCx<'_>, id: WidgetId) {
    let rect = cx.rect(id);
    let blend = cx.node(id).blend();
    let canvas = cx.canvas(id);
    canvas.rect(rect, true, blend);
    canvas.print(rect, self.align, blend, &self.text);
  }
}

impl Widget for Label {
  fn render(&self, cx: &mut RenderCx<'_>, id: WidgetId) {
    self.draw(cx, id);
    cx.render_children(id);
  }

  fn measure(&self, bounds: Rect, surface: &Canvas) -> Option<(i32, i32)> {
    Some(self.size_for(bounds, surface))
  }

  fn label(&self) -> Option<&Label> {
    Some(self)
  }

  fn label_mut(&mut self) -> Option<&mut Label> {
    Some(self)
  }
}
