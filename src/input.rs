//! Input processing utilities.
//!
//! Due to the nature of teletype terminals, the only inputs we can really
//! capture are key presses and mouse reports as recorded by the terminal
//! emulator. Once per frame the frontend drains everything the terminal has
//! buffered into a [`RawInput`] batch, which the UI loop turns into events.
//!
//! This module also knows how to name keys: [`KeyBinding`] parses
//! human-readable names like `"Esc"`, `"Shift+Enter"` or `"q"` into a
//! predicate over key presses, and [`key_name()`] goes the other way.

use std::fmt;
use std::str::FromStr;

pub use crossterm::event::KeyCode;
pub use crossterm::event::KeyEvent;
pub use crossterm::event::KeyEventKind;
pub use crossterm::event::KeyModifiers;
pub use crossterm::event::MouseButton;

use crossterm::event::Event as TermEvent;
use crossterm::event::MouseEventKind;

use crate::error::Error;
use crate::error::Result;
use crate::geo::Point;

/// The mouse, as of the last poll.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct MouseState {
  /// Pointer position in screen cells.
  pub pos: Point,
  /// Whether the left button is currently held.
  pub left_down: bool,
  /// Whether the left button went down during the last poll.
  pub clicked: bool,
  /// Whether the pointer moved during the last poll.
  pub moved: bool,
  /// Net wheel movement during the last poll; positive is downwards.
  pub wheel: i32,
}

/// Everything the terminal reported during one poll.
///
/// `keys` holds every key press in arrival order; an empty batch means no key
/// was pressed. `mouse` is always present and reflects the latest mouse report.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct RawInput {
  /// Key presses, oldest first.
  pub keys: Vec<KeyEvent>,
  /// The mouse state.
  pub mouse: MouseState,
  /// The new terminal size, if it changed.
  pub resized: Option<(i32, i32)>,
}

impl RawInput {
  /// Folds a sequence of terminal events into a batch, starting from the
  /// mouse state of the previous batch.
  pub fn collect(
    events: impl IntoIterator<Item = TermEvent>,
    last_mouse: MouseState,
  ) -> Self {
    let mut input = RawInput {
      keys: Vec::new(),
      mouse: MouseState {
        clicked: false,
        moved: false,
        wheel: 0,
        ..last_mouse
      },
      resized: None,
    };

    for event in events {
      match event {
        TermEvent::Key(key) if key.kind != KeyEventKind::Release => {
          input.keys.push(key)
        }
        TermEvent::Mouse(m) => {
          let pos = Point::new(m.column as i32, m.row as i32);
          if pos != input.mouse.pos {
            input.mouse.moved = true;
            input.mouse.pos = pos;
          }
          match m.kind {
            MouseEventKind::Down(MouseButton::Left) => {
              input.mouse.left_down = true;
              input.mouse.clicked = true;
            }
            MouseEventKind::Up(MouseButton::Left) => {
              input.mouse.left_down = false
            }
            MouseEventKind::ScrollDown => input.mouse.wheel += 1,
            MouseEventKind::ScrollUp => input.mouse.wheel -= 1,
            _ => {}
          }
        }
        TermEvent::Resize(cols, rows) => {
          input.resized = Some((cols as i32, rows as i32))
        }
        _ => continue,
      }
    }
    input
  }
}

/// A parsed key name: a predicate over key presses.
///
/// Bindings are written as zero or more modifiers followed by a key, joined
/// with `+`: `"Enter"`, `"Ctrl+s"`, `"Shift+Tab"`, `"F5"`, `"?"`. Names are
/// case-insensitive except for the literal character. Letters match their
/// modifiers exactly, so `q` and `Shift+q` are different bindings. Other
/// characters ignore `Shift`, since terminals disagree on whether to report
/// it for punctuation like `?`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct KeyBinding {
  code: KeyCode,
  mods: KeyModifiers,
}

const MODS: KeyModifiers = KeyModifiers::SHIFT
  .union(KeyModifiers::CONTROL)
  .union(KeyModifiers::ALT);

/// Named keys, as `(name, code)` pairs; the first name is the canonical one.
const NAMED_KEYS: &[(&str, KeyCode)] = &[
  ("Esc", KeyCode::Esc),
  ("Escape", KeyCode::Esc),
  ("Enter", KeyCode::Enter),
  ("Return", KeyCode::Enter),
  ("Tab", KeyCode::Tab),
  ("Backspace", KeyCode::Backspace),
  ("Space", KeyCode::Char(' ')),
  ("Up", KeyCode::Up),
  ("Down", KeyCode::Down),
  ("Left", KeyCode::Left),
  ("Right", KeyCode::Right),
  ("Home", KeyCode::Home),
  ("End", KeyCode::End),
  ("PageUp", KeyCode::PageUp),
  ("PageDown", KeyCode::PageDown),
  ("Insert", KeyCode::Insert),
  ("Delete", KeyCode::Delete),
  ("Del", KeyCode::Delete),
];

impl KeyBinding {
  /// Creates a binding for `code` with exactly the modifiers `mods`.
  pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
    let (code, mods) = normalize(code, mods);
    Self { code, mods }
  }

  /// Parses a key name.
  ///
  /// # Errors
  ///
  /// Returns [`Error::UnknownKey`] if `name` does not name a key.
  pub fn parse(name: &str) -> Result<Self> {
    let unknown = || Error::UnknownKey(name.to_string());

    // A lone "+" is the plus key, not an empty modifier list.
    let (mods_part, key_part) = match name.rfind('+') {
      Some(i) if i + 1 < name.len() => (&name[..i], &name[i + 1..]),
      Some(i) if i > 0 => (&name[..i - 1], "+"),
      _ => ("", name),
    };

    let mut mods = KeyModifiers::NONE;
    for m in mods_part.split('+').filter(|m| !m.is_empty()) {
      mods |= match m.to_ascii_lowercase().as_str() {
        "shift" => KeyModifiers::SHIFT,
        "ctrl" | "control" => KeyModifiers::CONTROL,
        "alt" | "meta" => KeyModifiers::ALT,
        _ => return Err(unknown()),
      };
    }

    let code = if let Some(&(_, code)) = NAMED_KEYS
      .iter()
      .find(|(n, _)| n.eq_ignore_ascii_case(key_part))
    {
      code
    } else if let Some(n) = key_part
      .strip_prefix(['F', 'f'])
      .and_then(|n| n.parse::<u8>().ok())
      .filter(|n| (1..=24).contains(n))
    {
      KeyCode::F(n)
    } else {
      let mut chars = key_part.chars();
      match (chars.next(), chars.next()) {
        (Some(c), None) => KeyCode::Char(c),
        _ => return Err(unknown()),
      }
    };

    Ok(Self::new(code, mods))
  }

  /// Returns the key this binding is for.
  pub fn code(self) -> KeyCode {
    self.code
  }

  /// Returns whether `key` is a press of this binding.
  pub fn matches(&self, key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
      return false;
    }
    let (code, mods) = normalize(key.code, key.modifiers);
    if code != self.code {
      return false;
    }
    match code {
      KeyCode::Char(c) if !c.is_alphabetic() => {
        mods - KeyModifiers::SHIFT == self.mods - KeyModifiers::SHIFT
      }
      _ => mods == self.mods,
    }
  }
}

/// Brings a key press into a canonical form: letters are lowercase with an
/// explicit shift, back-tab is shift-tab, and only shift/ctrl/alt count.
fn normalize(code: KeyCode, mods: KeyModifiers) -> (KeyCode, KeyModifiers) {
  let mut mods = mods & MODS;
  let code = match code {
    KeyCode::Char(c) if c.is_uppercase() => {
      mods |= KeyModifiers::SHIFT;
      KeyCode::Char(c.to_lowercase().next().unwrap_or(c))
    }
    KeyCode::BackTab => {
      mods |= KeyModifiers::SHIFT;
      KeyCode::Tab
    }
    k => k,
  };
  (code, mods)
}

impl FromStr for KeyBinding {
  type Err = Error;
  fn from_str(s: &str) -> Result<Self> {
    Self::parse(s)
  }
}

impl fmt::Display for KeyBinding {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    for (flag, name) in [
      (KeyModifiers::CONTROL, "Ctrl+"),
      (KeyModifiers::ALT, "Alt+"),
      (KeyModifiers::SHIFT, "Shift+"),
    ] {
      if self.mods.contains(flag) {
        f.write_str(name)?;
      }
    }

    if let Some((name, _)) = NAMED_KEYS.iter().find(|(_, c)| *c == self.code) {
      return f.write_str(name);
    }
    match self.code {
      KeyCode::F(n) => write!(f, "F{}", n),
      KeyCode::Char(c) => write!(f, "{}", c),
      other => write!(f, "{:?}", other),
    }
  }
}

/// Returns the canonical name of `key`, suitable for [`KeyBinding::parse()`].
///
/// Returns `None` for presses that can't be bound, such as a bare modifier.
pub fn key_name(key: &KeyEvent) -> Option<String> {
  match key.code {
    KeyCode::Char(_)
    | KeyCode::F(_)
    | KeyCode::Tab
    | KeyCode::BackTab
    | KeyCode::Enter
    | KeyCode::Esc
    | KeyCode::Backspace
    | KeyCode::Up
    | KeyCode::Down
    | KeyCode::Left
    | KeyCode::Right
    | KeyCode::Home
    | KeyCode::End
    | KeyCode::PageUp
    | KeyCode::PageDown
    | KeyCode::Insert
    | KeyCode::Delete => {
      Some(KeyBinding::new(key.code, key.modifiers).to_string())
    }
    _ => None,
  }
}

/// Shorthand for an unmodified key press.
pub fn press(code: KeyCode) -> KeyEvent {
  KeyEvent::new(code, KeyModifiers::NONE)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_names() {
    let b = KeyBinding::parse("Shift+Enter").unwrap();
    assert!(b.matches(&KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT)));
    assert!(!b.matches(&press(KeyCode::Enter)));

    let esc = KeyBinding::parse("esc").unwrap();
    assert!(esc.matches(&press(KeyCode::Esc)));

    let f5 = KeyBinding::parse("F5").unwrap();
    assert!(f5.matches(&press(KeyCode::F(5))));

    let plus = KeyBinding::parse("Ctrl++").unwrap();
    assert!(plus.matches(&KeyEvent::new(
      KeyCode::Char('+'),
      KeyModifiers::CONTROL
    )));
  }

  #[test]
  fn letters_match_shift_exactly() {
    let q = KeyBinding::parse("q").unwrap();
    assert!(q.matches(&press(KeyCode::Char('q'))));
    let shifted = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
    assert!(!q.matches(&shifted));
    assert!(!q.matches(&KeyEvent::new(
      KeyCode::Char('q'),
      KeyModifiers::CONTROL
    )));

    let big_q = KeyBinding::parse("Shift+q").unwrap();
    assert!(big_q.matches(&shifted));
    let caps = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::NONE);
    assert!(big_q.matches(&caps));
    assert!(!big_q.matches(&press(KeyCode::Char('q'))));
  }

  #[test]
  fn punctuation_ignores_shift() {
    let ask = KeyBinding::parse("?").unwrap();
    assert!(ask.matches(&press(KeyCode::Char('?'))));
    let shifted = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
    assert!(ask.matches(&shifted));
    assert!(!ask.matches(&KeyEvent::new(
      KeyCode::Char('?'),
      KeyModifiers::ALT
    )));
  }

  #[test]
  fn rejects_unknown_names() {
    assert!(matches!(
      KeyBinding::parse("Hyper+x"),
      Err(Error::UnknownKey(_))
    ));
    assert!(KeyBinding::parse("Banana").is_err());
    assert!(KeyBinding::parse("").is_err());
  }

  #[test]
  fn names_round_trip() {
    let key = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
    let name = key_name(&key).unwrap();
    assert_eq!(name, "Shift+Tab");
    assert!(KeyBinding::parse(&name).unwrap().matches(&key));

    assert_eq!(key_name(&press(KeyCode::Null)), None);
  }

  #[test]
  fn collects_batches() {
    use crossterm::event::MouseEvent;

    let events = vec![
      TermEvent::Key(press(KeyCode::Char('a'))),
      TermEvent::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 4,
        row: 2,
        modifiers: KeyModifiers::NONE,
      }),
      TermEvent::Key(press(KeyCode::Enter)),
    ];
    let input = RawInput::collect(events, MouseState::default());
    assert_eq!(input.keys.len(), 2);
    assert_eq!(input.mouse.pos, Point::new(4, 2));
    assert!(input.mouse.clicked && input.mouse.moved);

    let next = RawInput::collect(Vec::new(), input.mouse);
    assert!(next.keys.is_empty());
    assert!(next.mouse.left_down && !next.mouse.clicked);
  }
}
