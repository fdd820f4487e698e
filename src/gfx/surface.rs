//! Drawing surfaces.
//!
//! A [`Canvas`] is a fixed-size grid of [`Texel`]s with a pair of default
//! colors, in the style of a curses window. Widgets draw into canvases; the
//! screen itself is a canvas that a [`Frontend`](crate::gfx::Frontend)
//! presents once per frame, and scrolling containers keep offscreen canvases
//! which they blit onto their parent's.
//!
//! Drawing operations clip silently: anything outside the canvas is dropped.

use crate::geo::Point;
use crate::geo::Rect;
use crate::geo::RectVec;
use crate::gfx::text;
use crate::gfx::text::ColorSet;
use crate::gfx::texel;
use crate::gfx::texel::Rgb;
use crate::gfx::texel::Texel;

/// Horizontal text alignment within a rectangle.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Align {
  /// Flush left.
  #[default]
  Left,
  /// Centered, rounding to the left.
  Center,
  /// Flush right.
  Right,
}

/// How drawing affects the background color of the cells it touches.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub enum Blend {
  /// Leave the existing background alone.
  None,
  /// Replace it with the current background color.
  #[default]
  Set,
  /// Mix the current background color over the existing one.
  Alpha(f32),
}

/// A grid of texels.
#[derive(Clone, Debug)]
pub struct Canvas {
  cells: RectVec<Texel>,
  colors: ColorSet,
}

const FRAME_H: char = '─';
const FRAME_V: char = '│';
const FRAME_NW: char = '┌';
const FRAME_NE: char = '┐';
const FRAME_SW: char = '└';
const FRAME_SE: char = '┘';

impl Canvas {
  /// Creates a blank `width` by `height` canvas.
  pub fn new(width: i32, height: i32) -> Self {
    let colors = ColorSet::default();
    let blank = Texel::new(' ').with_fg(colors.fg).with_bg(colors.bg);
    Self {
      cells: RectVec::new(Rect::with_dims(width.max(0), height.max(0)), blank),
      colors,
    }
  }

  /// Returns the area covered by this canvas, with its origin at zero.
  pub fn dims(&self) -> Rect {
    self.cells.dims()
  }

  /// Returns this canvas's width.
  pub fn width(&self) -> i32 {
    self.dims().width()
  }

  /// Returns this canvas's height.
  pub fn height(&self) -> i32 {
    self.dims().height()
  }

  /// Returns the texel at `p`, if it is on the canvas.
  pub fn get(&self, p: Point) -> Option<Texel> {
    self.cells.get(p).copied()
  }

  /// Returns the underlying cell storage.
  pub fn cells(&self) -> &RectVec<Texel> {
    &self.cells
  }

  /// Returns the glyphs of row `y` as a string; handy for inspecting what was
  /// drawn.
  pub fn row(&self, y: i32) -> String {
    (0..self.width())
      .filter_map(|x| self.get(Point::new(x, y)))
      .map(Texel::glyph)
      .collect()
  }

  /// Grows this canvas to be at least `width` by `height`, keeping its
  /// contents. A canvas never shrinks.
  pub fn grow(&mut self, width: i32, height: i32) {
    let (w, h) = self.dims().size();
    if w >= width && h >= height {
      return;
    }
    let rect = Rect::with_dims(w.max(width), h.max(height));
    log::trace!("growing canvas from {}x{} to {:?}", w, h, rect.size());
    self.cells.resize(rect, self.blank());
  }

  /// Resizes this canvas to exactly `width` by `height`, keeping whatever
  /// contents still fit.
  pub fn resize(&mut self, width: i32, height: i32) {
    let rect = Rect::with_dims(width.max(0), height.max(0));
    self.cells.resize(rect, self.blank());
  }

  /// Returns the current default foreground color.
  pub fn default_fg(&self) -> Rgb {
    self.colors.fg
  }

  /// Returns the current default background color.
  pub fn default_bg(&self) -> Rgb {
    self.colors.bg
  }

  /// Sets the default foreground color.
  pub fn set_default_fg(&mut self, fg: Rgb) {
    self.colors.fg = fg;
  }

  /// Sets the default background color.
  pub fn set_default_bg(&mut self, bg: Rgb) {
    self.colors.bg = bg;
  }

  /// Makes `colors` current: its base colors become the defaults and its slots
  /// are what inline color controls select.
  pub fn apply(&mut self, colors: &ColorSet) {
    self.colors = *colors;
  }

  fn blank(&self) -> Texel {
    Texel::new(' ')
      .with_fg(self.colors.fg)
      .with_bg(self.colors.bg)
  }

  /// Fills the whole canvas with blanks in the default colors.
  pub fn clear(&mut self) {
    let blank = self.blank();
    self.cells.fill(blank);
  }

  fn paint_bg(bg: Rgb, tx: &mut Texel, blend: Blend) {
    match blend {
      Blend::None => {}
      Blend::Set => *tx = tx.with_bg(bg),
      Blend::Alpha(a) => *tx = tx.with_bg(texel::mix(tx.bg(), bg, a)),
    }
  }

  /// Draws `glyph` at `p` in the default foreground color.
  pub fn put(&mut self, p: Point, glyph: char, blend: Blend) {
    let (fg, bg) = (self.colors.fg, self.colors.bg);
    self.put_colored(p, glyph, fg, bg, blend);
  }

  fn put_colored(
    &mut self,
    p: Point,
    glyph: char,
    fg: Rgb,
    bg: Rgb,
    blend: Blend,
  ) {
    if let Some(tx) = self.cells.get_mut(p) {
      *tx = tx.with_glyph(glyph).with_fg(fg);
      Self::paint_bg(bg, tx, blend);
    }
  }

  /// Paints the background of every cell in `rect`. If `clear` is set, the
  /// glyphs are erased as well.
  pub fn rect(&mut self, rect: Rect, clear: bool, blend: Blend) {
    let Some(rect) = rect.intersect(self.dims()) else {
      return;
    };
    let (fg, bg) = (self.colors.fg, self.colors.bg);
    for p in rect.points() {
      if let Some(tx) = self.cells.get_mut(p) {
        if clear {
          *tx = tx.with_glyph(' ').with_fg(fg);
        }
        Self::paint_bg(bg, tx, blend);
      }
    }
  }

  /// Draws a single-line frame around the edge of `rect`, optionally with a
  /// title set into its top edge. If `clear` is set, the interior is cleared.
  pub fn frame(
    &mut self,
    rect: Rect,
    title: Option<&str>,
    clear: bool,
    blend: Blend,
  ) {
    if rect.is_empty() {
      return;
    }
    let inner = Rect::new(
      rect.left() + 1,
      rect.top() + 1,
      rect.width() - 2,
      rect.height() - 2,
    );
    if clear {
      self.rect(inner, true, blend);
    }

    let (l, t) = (rect.left(), rect.top());
    let (r, b) = (rect.right() - 1, rect.bottom() - 1);
    for x in l + 1..r {
      self.put(Point::new(x, t), FRAME_H, blend);
      self.put(Point::new(x, b), FRAME_H, blend);
    }
    for y in t + 1..b {
      self.put(Point::new(l, y), FRAME_V, blend);
      self.put(Point::new(r, y), FRAME_V, blend);
    }
    self.put(Point::new(l, t), FRAME_NW, blend);
    self.put(Point::new(r, t), FRAME_NE, blend);
    self.put(Point::new(l, b), FRAME_SW, blend);
    self.put(Point::new(r, b), FRAME_SE, blend);

    if let Some(title) = title {
      let title = format!(" {} ", title);
      let area = Rect::new(l + 1, t, rect.width() - 2, 1);
      self.print(area, Align::Center, blend, &title);
    }
  }

  /// Prints `s` inside `rect`, wrapping at its width and clipping at its
  /// height. A zero width or height means "unbounded" along that axis.
  ///
  /// Inline color controls (see [`text`]) are honored. Returns the number of
  /// lines the text occupies, whether or not they all fit.
  pub fn print(
    &mut self,
    rect: Rect,
    align: Align,
    blend: Blend,
    s: &str,
  ) -> i32 {
    let lines = text::wrap(s, rect.width().max(0) as usize);
    let (mut fg, mut bg) = (self.colors.fg, self.colors.bg);
    for (i, line) in lines.iter().enumerate() {
      let y = rect.top() + i as i32;
      if rect.height() > 0 && y >= rect.bottom() {
        break;
      }

      let w = text::width(line) as i32;
      let slack = (rect.width() - w).max(0);
      let mut x = match align {
        Align::Left => rect.left(),
        Align::Center => rect.left() + slack / 2,
        Align::Right => rect.left() + slack,
      };
      for c in line.chars() {
        if let Some(slot) = text::control_slot(c) {
          let (f, b) = self.colors.resolve(slot);
          fg = f;
          bg = b;
          continue;
        }
        let p = Point::new(x, y);
        if rect.width() <= 0 || rect.xs().contains(&x) {
          self.put_colored(p, c, fg, bg, blend);
        }
        x += text::char_width(c) as i32;
      }
    }
    lines.len() as i32
  }

  /// Returns how many lines `s` would take when printed `width` cells wide.
  pub fn measure(&self, s: &str, width: i32) -> i32 {
    text::height(s, width.max(0) as usize) as i32
  }

  /// Copies the `src` region of this canvas onto `dst` with its upper-left
  /// corner at `at`, mixing the copied foreground and background over `dst`'s
  /// by the given opacities.
  pub fn blit(
    &self,
    src: Rect,
    dst: &mut Canvas,
    at: Point,
    fg_alpha: f32,
    bg_alpha: f32,
  ) {
    let Some(src) = src.intersect(self.dims()) else {
      return;
    };
    let offset = at - src.origin();
    for p in src.points() {
      let (Some(from), Some(to)) = (self.get(p), dst.cells.get_mut(p + offset))
      else {
        continue;
      };
      *to = to.blend(from, fg_alpha, bg_alpha);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn print_aligns_and_clips() {
    let mut c = Canvas::new(10, 3);
    c.print(Rect::new(0, 0, 10, 1), Align::Right, Blend::Set, "hi");
    assert_eq!(c.row(0), "        hi");

    let n = c.print(Rect::new(0, 1, 5, 1), Align::Left, Blend::Set, "ab cd ef");
    assert_eq!(n, 2);
    assert_eq!(c.row(1), "ab cd     ");
    assert_eq!(c.row(2), "          ");
  }

  #[test]
  fn frame_with_title() {
    let mut c = Canvas::new(8, 3);
    c.frame(c.dims(), Some("ok"), true, Blend::Set);
    assert_eq!(c.row(0), "┌─ ok ─┐");
    assert_eq!(c.row(1), "│      │");
    assert_eq!(c.row(2), "└──────┘");
  }

  #[test]
  fn grow_never_shrinks() {
    let mut c = Canvas::new(4, 4);
    c.put(Point::new(1, 1), 'x', Blend::Set);
    c.grow(2, 8);
    assert_eq!(c.dims().size(), (4, 8));
    assert_eq!(c.get(Point::new(1, 1)).map(Texel::glyph), Some('x'));
  }

  #[test]
  fn blit_offsets_region() {
    let mut src = Canvas::new(3, 3);
    src.print(Rect::new(0, 2, 3, 1), Align::Left, Blend::Set, "abc");
    let mut dst = Canvas::new(5, 2);
    src.blit(Rect::new(1, 2, 2, 1), &mut dst, Point::new(3, 1), 1.0, 1.0);
    assert_eq!(dst.row(1), "   bc");
  }
}
