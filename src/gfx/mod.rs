//! Graphics: texels, drawing surfaces, text layout, and the frontends that put
//! finished frames in front of the player.

use std::io;

use crate::input::RawInput;

pub mod curses;
pub mod headless;
pub mod surface;
pub mod text;
pub mod texel;

pub use curses::Curses;
pub use headless::Headless;
pub use surface::Align;
pub use surface::Blend;
pub use surface::Canvas;
pub use texel::Texel;

/// Where frames go and where input comes from.
///
/// The UI loop renders into a screen-sized [`Canvas`], hands it to
/// [`present()`](Frontend::present), then asks [`poll()`](Frontend::poll) for
/// whatever input arrived. Polling must never block.
pub trait Frontend {
  /// Returns the screen size as `(columns, rows)`.
  fn size(&self) -> (i32, i32);

  /// Shows `screen` to the player.
  fn present(&mut self, screen: &Canvas) -> io::Result<()>;

  /// Returns every input event buffered since the last poll.
  fn poll(&mut self) -> io::Result<RawInput>;

  /// Returns whether the player has asked to close the window.
  fn is_closed(&self) -> bool {
    false
  }
}
