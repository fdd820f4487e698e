//! Texels, terminal elements.
//!
//! A *texel* is our abstraction for a cell in a terminal: a glyph, a
//! foreground and background color, and a handful of text attributes. Drawing
//! surfaces are grids of texels.

pub use palette::named as colors;

/// An RGB value used by a [`Texel`].
pub type Rgb = palette::Srgb<u8>;

bitflags::bitflags! {
  /// Text attributes carried by a [`Texel`].
  #[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Hash)]
  pub struct Attrs: u8 {
    /// Bold (or bright) text.
    const BOLD = 1 << 0;
    /// Dim text.
    const DIM = 1 << 1;
    /// Underlined text.
    const ULINE = 1 << 2;
  }
}

/// A "terminal element", analogous to a pixel or voxel.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Texel {
  glyph: char,
  fg: Rgb,
  bg: Rgb,
  attrs: Attrs,
}

impl Default for Texel {
  fn default() -> Self {
    Self::new(' ')
  }
}

impl Texel {
  /// Creates a new texel with the given glyph, white on black.
  #[inline]
  pub const fn new(glyph: char) -> Self {
    Self {
      glyph,
      fg: colors::WHITE,
      bg: colors::BLACK,
      attrs: Attrs::empty(),
    }
  }

  /// Returns this texel's glyph.
  #[inline]
  pub fn glyph(self) -> char {
    self.glyph
  }

  /// Returns a copy of this texel with the given glyph.
  #[inline]
  pub fn with_glyph(mut self, glyph: char) -> Self {
    self.glyph = glyph;
    self
  }

  /// Returns this texel's foreground color.
  #[inline]
  pub fn fg(self) -> Rgb {
    self.fg
  }

  /// Returns a copy of this texel with the given foreground color.
  #[inline]
  pub fn with_fg(mut self, fg: Rgb) -> Self {
    self.fg = fg;
    self
  }

  /// Returns this texel's background color.
  #[inline]
  pub fn bg(self) -> Rgb {
    self.bg
  }

  /// Returns a copy of this texel with the given background color.
  #[inline]
  pub fn with_bg(mut self, bg: Rgb) -> Self {
    self.bg = bg;
    self
  }

  /// Returns this texel's attributes.
  #[inline]
  pub fn attrs(self) -> Attrs {
    self.attrs
  }

  /// Returns a copy of this texel with the given attributes.
  #[inline]
  pub fn with_attrs(mut self, attrs: Attrs) -> Self {
    self.attrs = attrs;
    self
  }

  /// Layers `other` over this texel, mixing its colors in by the given
  /// foreground and background opacities (each in `0.0..=1.0`).
  ///
  /// With both opacities at `1.0` this is a plain copy; at `0.0` the
  /// corresponding color of `self` is kept. The glyph follows the foreground:
  /// it is taken from `other` unless the foreground opacity is zero.
  pub fn blend(self, other: Texel, fg_alpha: f32, bg_alpha: f32) -> Self {
    let glyph = if fg_alpha > 0.0 { other.glyph } else { self.glyph };
    let attrs = if fg_alpha > 0.0 { other.attrs } else { self.attrs };
    Self {
      glyph,
      fg: mix(self.fg, other.fg, fg_alpha),
      bg: mix(self.bg, other.bg, bg_alpha),
      attrs,
    }
  }
}

/// Linearly interpolates between two colors, channel by channel.
pub fn mix(from: Rgb, to: Rgb, alpha: f32) -> Rgb {
  let alpha = alpha.clamp(0.0, 1.0);
  let lerp =
    |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * alpha).round() as u8;
  Rgb::new(
    lerp(from.red, to.red),
    lerp(from.green, to.green),
    lerp(from.blue, to.blue),
  )
}
