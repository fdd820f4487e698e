//! A frontend without a terminal.
//!
//! [`Headless`] replays scripted input batches and keeps the frames it is
//! given, which makes it possible to drive the full UI loop from tests or from
//! automation. Once the script runs dry it reports the window as closed, so a
//! loop driven by it always terminates.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use crate::gfx::Canvas;
use crate::gfx::Frontend;
use crate::input::KeyEvent;
use crate::input::MouseState;
use crate::input::RawInput;

/// A scripted, in-memory frontend.
///
/// `Headless` is a shared handle: clones see the same script and frames, so a
/// test can keep one clone while the UI owns another.
#[derive(Clone)]
pub struct Headless(Rc<RefCell<Inner>>);

struct Inner {
  size: (i32, i32),
  script: VecDeque<RawInput>,
  last_frame: Option<Canvas>,
  frames: usize,
  polls: usize,
  closed: bool,
  mouse: MouseState,
}

impl Headless {
  /// Creates a `columns` by `rows` headless screen with an empty script.
  pub fn new(columns: i32, rows: i32) -> Self {
    Self(Rc::new(RefCell::new(Inner {
      size: (columns, rows),
      script: VecDeque::new(),
      last_frame: None,
      frames: 0,
      polls: 0,
      closed: false,
      mouse: MouseState::default(),
    })))
  }

  /// Queues an input batch for a future poll.
  pub fn push(&self, input: RawInput) -> &Self {
    self.0.borrow_mut().script.push_back(input);
    self
  }

  /// Queues a batch containing only `keys`, with the mouse left where it was.
  pub fn push_keys(&self, keys: impl IntoIterator<Item = KeyEvent>) -> &Self {
    let mut inner = self.0.borrow_mut();
    let mouse = inner.script.back().map_or(inner.mouse, |i| i.mouse);
    inner.script.push_back(RawInput {
      keys: keys.into_iter().collect(),
      mouse: MouseState {
        clicked: false,
        moved: false,
        wheel: 0,
        ..mouse
      },
      resized: None,
    });
    drop(inner);
    self
  }

  /// Returns a copy of the most recently presented frame.
  pub fn last_frame(&self) -> Option<Canvas> {
    self.0.borrow().last_frame.clone()
  }

  /// Returns how many frames have been presented.
  pub fn frames(&self) -> usize {
    self.0.borrow().frames
  }

  /// Returns how many times input has been polled.
  pub fn polls(&self) -> usize {
    self.0.borrow().polls
  }

  /// Returns how many scripted batches have not been polled yet.
  pub fn pending(&self) -> usize {
    self.0.borrow().script.len()
  }
}

impl Frontend for Headless {
  fn size(&self) -> (i32, i32) {
    self.0.borrow().size
  }

  fn present(&mut self, screen: &Canvas) -> io::Result<()> {
    let mut inner = self.0.borrow_mut();
    inner.last_frame = Some(screen.clone());
    inner.frames += 1;
    Ok(())
  }

  fn poll(&mut self) -> io::Result<RawInput> {
    let mut inner = self.0.borrow_mut();
    inner.polls += 1;
    match inner.script.pop_front() {
      Some(input) => {
        inner.mouse = input.mouse;
        if let Some(size) = input.resized {
          inner.size = size;
        }
        Ok(input)
      }
      None => {
        inner.closed = true;
        Ok(RawInput {
          mouse: inner.mouse,
          ..RawInput::default()
        })
      }
    }
  }

  fn is_closed(&self) -> bool {
    self.0.borrow().closed
  }
}
