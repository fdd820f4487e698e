//! `curses` helper library.
//!
//! Note that this module doesn't *actually* use `libcurses`, and merely
//! emulates its behavior at a high level in terms of `crossterm`.

use std::io;
use std::io::Write;
use std::time::Duration;

use crossterm::event;
use crossterm::style::Attribute;
use crossterm::style::Color;
use crossterm::style::Colors;

use crate::geo::Rect;
use crate::geo::RectVec;
use crate::gfx::texel::Attrs;
use crate::gfx::texel::Rgb;
use crate::gfx::texel::Texel;
use crate::gfx::Canvas;
use crate::gfx::Frontend;
use crate::input::MouseState;
use crate::input::RawInput;

/// A low-level curses context: a real terminal in raw mode on the alternate
/// screen, with mouse reporting enabled.
///
/// Only cells that changed since the previous frame are redrawn.
pub struct Curses<W: Write = io::Stdout> {
  w: W,
  size: (i32, i32),
  baked: RectVec<Texel>,
  mouse: MouseState,
}

impl Curses {
  /// Initializes the `curses` environment on standard output.
  pub fn init() -> io::Result<Curses> {
    Curses::with(io::stdout())
  }
}

fn rgb(c: Rgb) -> Color {
  Color::Rgb {
    r: c.red,
    g: c.green,
    b: c.blue,
  }
}

impl<W: Write> Curses<W> {
  /// Initializes the `curses` environment for `w`.
  pub fn with(mut w: W) -> io::Result<Curses<W>> {
    crossterm::execute!(
      w,
      crossterm::terminal::EnterAlternateScreen,
      crossterm::cursor::Hide,
      crossterm::terminal::DisableLineWrap,
      crossterm::event::EnableMouseCapture,
    )?;
    crossterm::terminal::enable_raw_mode()?;
    let (cols, rows) = crossterm::terminal::size()?;
    log::debug!("terminal initialized at {}x{}", cols, rows);

    Ok(Curses {
      w,
      size: (cols as i32, rows as i32),
      baked: RectVec::empty(),
      mouse: MouseState::default(),
    })
  }

  fn draw(&mut self, x: i32, y: i32, texel: Texel) -> io::Result<()> {
    let attrs = texel.attrs();
    crossterm::queue!(
      self.w,
      crossterm::cursor::MoveTo(x as u16, y as u16),
      crossterm::style::SetAttribute(Attribute::Reset),
      crossterm::style::SetColors(Colors {
        foreground: Some(rgb(texel.fg())),
        background: Some(rgb(texel.bg())),
      }),
    )?;
    for (flag, attr) in [
      (Attrs::BOLD, Attribute::Bold),
      (Attrs::DIM, Attribute::Dim),
      (Attrs::ULINE, Attribute::Underlined),
    ] {
      if attrs.contains(flag) {
        crossterm::queue!(self.w, crossterm::style::SetAttribute(attr))?;
      }
    }
    crossterm::queue!(self.w, crossterm::style::Print(texel.glyph()))
  }

  /// Clean up whatever mess the terminal made.
  fn cleanup(&mut self) -> io::Result<()> {
    crossterm::execute!(
      self.w,
      crossterm::event::DisableMouseCapture,
      crossterm::terminal::LeaveAlternateScreen,
      crossterm::cursor::Show,
      crossterm::terminal::EnableLineWrap,
    )?;
    crossterm::terminal::disable_raw_mode()?;
    self.w.flush()
  }
}

impl<W: Write> Frontend for Curses<W> {
  fn size(&self) -> (i32, i32) {
    self.size
  }

  fn present(&mut self, screen: &Canvas) -> io::Result<()> {
    let visible = screen
      .dims()
      .intersect(Rect::with_dims(self.size.0, self.size.1));
    let Some(visible) = visible else {
      return Ok(());
    };

    // A different geometry invalidates everything we drew last time.
    if self.baked.dims() != visible {
      self.baked = RectVec::new(visible, Texel::new('\0'));
    }

    for p in visible.points() {
      let Some(new) = screen.get(p) else { continue };
      match self.baked.get_mut(p) {
        Some(old) if *old == new => continue,
        Some(old) => *old = new,
        None => {}
      }
      self.draw(p.x(), p.y(), new)?;
    }
    self.w.flush()
  }

  fn poll(&mut self) -> io::Result<RawInput> {
    let mut events = Vec::new();
    while event::poll(Duration::default())? {
      events.push(event::read()?);
    }

    let input = RawInput::collect(events, self.mouse);
    self.mouse = input.mouse;
    if let Some(size) = input.resized {
      log::debug!("terminal resized to {}x{}", size.0, size.1);
      self.size = size;
      self.baked = RectVec::empty();
    }
    Ok(input)
  }
}

impl<W: Write> Drop for Curses<W> {
  fn drop(&mut self) {
    if let Err(e) = self.cleanup() {
      log::error!("failed to restore terminal: {}", e);
    }
  }
}
