//! Text layout: inline color markup, measuring, and word wrapping.
//!
//! Strings drawn by widgets may contain *color control* characters which
//! switch the current colors mid-string, e.g.
//!
//! ```
//! use npc::gfx::text::{COLOR_1, COLOR_STOP};
//! let s = format!("[{}q{}] Quit", COLOR_1, COLOR_STOP);
//! assert_eq!(npc::gfx::text::strip(&s), "[q] Quit");
//! ```
//!
//! `COLOR_1` through `COLOR_5` select one of the five slots of the active
//! [`ColorSet`]; `COLOR_STOP` returns to the surface's default colors. The
//! control characters take up no space on screen.

use unicode_width::UnicodeWidthChar;

use crate::gfx::texel::colors;
use crate::gfx::texel::Rgb;

/// Selects color slot 1.
pub const COLOR_1: char = '\u{1}';
/// Selects color slot 2.
pub const COLOR_2: char = '\u{2}';
/// Selects color slot 3.
pub const COLOR_3: char = '\u{3}';
/// Selects color slot 4.
pub const COLOR_4: char = '\u{4}';
/// Selects color slot 5.
pub const COLOR_5: char = '\u{5}';
/// Returns to the default colors.
pub const COLOR_STOP: char = '\u{8}';

/// If `c` is a color control character, returns the slot it selects (`0` for
/// [`COLOR_STOP`]).
#[inline]
pub fn control_slot(c: char) -> Option<usize> {
  match c {
    COLOR_1..=COLOR_5 => Some(c as usize),
    COLOR_STOP => Some(0),
    _ => None,
  }
}

/// Removes every color control character from `s`.
pub fn strip(s: &str) -> String {
  s.chars().filter(|&c| control_slot(c).is_none()).collect()
}

/// Returns the number of cells `c` occupies.
#[inline]
pub fn char_width(c: char) -> usize {
  if control_slot(c).is_some() {
    return 0;
  }
  c.width().unwrap_or(0)
}

/// Returns the number of cells `s` occupies on a single line.
pub fn width(s: &str) -> usize {
  s.chars().map(char_width).sum()
}

/// Splits `s` into lines no wider than `max_width` cells, breaking at spaces
/// where possible and mid-word otherwise.
///
/// Explicit newlines always break. A `max_width` of zero means "unbounded":
/// only explicit newlines break. Color control characters are kept in the
/// output, attached to the text that follows them.
pub fn wrap(s: &str, max_width: usize) -> Vec<String> {
  let mut lines = Vec::new();
  for para in s.split('\n') {
    if max_width == 0 {
      lines.push(para.to_string());
      continue;
    }

    let mut line = String::new();
    let mut line_width = 0;
    let mut fresh = true;
    for word in para.split(' ') {
      let word_width = width(word);
      if !fresh && line_width + 1 + word_width > max_width {
        lines.push(std::mem::take(&mut line));
        line_width = 0;
        fresh = true;
      }
      if !fresh {
        line.push(' ');
        line_width += 1;
      }
      fresh = false;
      for c in word.chars() {
        let w = char_width(c);
        if line_width > 0 && line_width + w > max_width {
          lines.push(std::mem::take(&mut line));
          line_width = 0;
        }
        line.push(c);
        line_width += w;
      }
    }
    lines.push(line);
  }
  lines
}

/// Returns the number of lines `s` wraps to at `max_width` (see [`wrap()`]).
pub fn height(s: &str, max_width: usize) -> usize {
  wrap(s, max_width).len()
}

/// A set of colors for drawing widgets.
///
/// A color set has a pair of base colors, used as a surface's defaults, and
/// five optional color pairs selected by the inline control characters. A slot
/// color left as `None` falls back to the base color.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ColorSet {
  /// The base foreground color.
  pub fg: Rgb,
  /// The base background color.
  pub bg: Rgb,
  slots: [(Option<Rgb>, Option<Rgb>); 5],
}

impl Default for ColorSet {
  fn default() -> Self {
    Self::new(colors::WHITE, colors::BLACK)
  }
}

impl ColorSet {
  /// Creates a new color set with the given base colors and empty slots.
  pub const fn new(fg: Rgb, bg: Rgb) -> Self {
    Self {
      fg,
      bg,
      slots: [(None, None); 5],
    }
  }

  /// Returns a copy of this color set with slot `slot` (1 through 5) set.
  ///
  /// # Panics
  ///
  /// Panics if `slot` is not in `1..=5`.
  pub const fn with_slot(
    mut self,
    slot: usize,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
  ) -> Self {
    assert!(slot >= 1 && slot <= 5, "color slots are numbered 1 to 5");
    self.slots[slot - 1] = (fg, bg);
    self
  }

  /// Resolves the colors selected by `slot`, where `0` means the base colors.
  pub fn resolve(&self, slot: usize) -> (Rgb, Rgb) {
    match slot.checked_sub(1).and_then(|i| self.slots.get(i)) {
      Some(&(fg, bg)) => (fg.unwrap_or(self.fg), bg.unwrap_or(self.bg)),
      None => (self.fg, self.bg),
    }
  }
}

/// Colors for enabled widgets: light grey text, with shortcuts in lime.
pub const ACTIVE: ColorSet =
  ColorSet::new(colors::LIGHTGREY, colors::BLACK)
    .with_slot(SHORTCUT, Some(colors::LIME), None)
    .with_slot(VALUE, Some(colors::WHITE), None)
    .with_slot(WARNING, Some(colors::ORANGERED), None);

/// Colors for disabled widgets.
pub const DISABLED: ColorSet =
  ColorSet::new(colors::DIMGREY, colors::BLACK)
    .with_slot(SHORTCUT, Some(colors::LIGHTGREY), None)
    .with_slot(VALUE, Some(colors::GREY), None)
    .with_slot(WARNING, Some(colors::GREY), None);

/// Colors for the currently selected entry of a list.
pub const SELECTED: ColorSet =
  ColorSet::new(colors::BLACK, colors::LIGHTGREY)
    .with_slot(SHORTCUT, Some(colors::DARKGREEN), None)
    .with_slot(VALUE, Some(colors::BLACK), None)
    .with_slot(WARNING, Some(colors::DARKRED), None);

/// The slot used for keyboard shortcuts.
pub const SHORTCUT: usize = 1;
/// The slot used for option values.
pub const VALUE: usize = 2;
/// The slot used for warnings such as unset options.
pub const WARNING: usize = 3;

/// Returns the control character selecting `slot`.
///
/// # Panics
///
/// Panics if `slot` is not in `0..=5`.
pub fn slot_char(slot: usize) -> char {
  match slot {
    0 => COLOR_STOP,
    1..=5 => char::from(slot as u8),
    _ => panic!("color slots are numbered 1 to 5"),
  }
}
