//! UI loops.
//!
//! [`Ui::run()`] drives a widget tree one frame at a time: draw, present,
//! collect input, deliver events. Loops nest. A handler may start a dialog
//! with its own loop, and that loop runs to completion before the handler
//! returns.
//!
//! A [`EventType::Quit`] event ends every running loop. Each loop that sees
//! it posts it again before returning, so the loop it was nested in sees it
//! next.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::ui::event::EventType;
use crate::ui::event::Payload;
use crate::ui::widget::WidgetId;
use crate::ui::Ui;

/// How a UI loop treats [`EventType::Ok`] and [`EventType::Cancel`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LoopMode {
  /// The loop runs until quit; `Ok` and `Cancel` are delivered like any other
  /// event.
  Main,
  /// The loop ends on `Ok` or `Cancel`. A dialog draws over whatever was on
  /// screen before it started.
  Dialog,
}

/// Why a UI loop ended.
pub enum Outcome {
  /// The application is quitting.
  Quit,
  /// A dialog was confirmed, with the payload of the `Ok` event.
  Ok(Payload),
  /// A dialog was dismissed.
  Cancel,
}

impl fmt::Debug for Outcome {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Quit => f.write_str("Quit"),
      Self::Ok(payload) => f.debug_tuple("Ok").field(payload).finish(),
      Self::Cancel => f.write_str("Cancel"),
    }
  }
}

const TIMING_INTERVAL: Duration = Duration::from_secs(5);

impl Ui {
  /// Runs a UI loop with `top` as the root of everything drawn and every
  /// event delivered, until it ends.
  ///
  /// Each frame:
  /// 1. In [`LoopMode::Main`], the screen is cleared. `top` is rendered and
  ///    the screen is presented.
  /// 2. Pending input is posted: one [`EventType::Mouse`] event, then one
  ///    [`EventType::Key`] event per key press. If the frontend has gone away,
  ///    [`EventType::Quit`] is posted.
  /// 3. The queue is drained. `Quit` ends the loop (see the
  ///    [module documentation](self)); in a dialog, so do `Ok` and `Cancel`.
  ///    `Launch` runs its payload. Everything else is dispatched to `top`.
  /// 4. The frame is held until the frame rate limit allows the next one.
  ///
  /// Frontend errors are logged and treated as a request to quit.
  pub fn run(&mut self, top: WidgetId, mode: LoopMode) -> Outcome {
    log::debug!("entering {:?} loop on {:?}", mode, top);
    loop {
      self.frame(top, mode);

      for event in self.events().drain() {
        match (event.ty, mode) {
          (EventType::Quit, _) => {
            self.post(EventType::Quit, Payload::None, None);
            log::debug!("leaving {:?} loop on {:?}: quit", mode, top);
            return Outcome::Quit;
          }
          (EventType::Ok, LoopMode::Dialog) => {
            log::debug!("leaving dialog {:?}: ok", top);
            return Outcome::Ok(event.payload);
          }
          (EventType::Cancel, LoopMode::Dialog) => {
            log::debug!("leaving dialog {:?}: cancel", top);
            return Outcome::Cancel;
          }
          (EventType::Launch, _) => {
            if let Payload::Launch(launch) = &event.payload {
              launch(self);
            }
          }
          _ => {
            let timer = Rc::clone(&self.timer);
            let _t = timer.start("ui.dispatch");
            self.dispatch(top, &event);
          }
        }
      }

      self.frame_timer.end_frame(self.fps_limit);
    }
  }

  /// Draws and presents one frame, then posts whatever input arrived.
  fn frame(&mut self, top: WidgetId, mode: LoopMode) {
    {
      let timer = Rc::clone(&self.timer);
      let _t = timer.start("ui.render");
      if mode == LoopMode::Main {
        self.screen_mut().clear();
      }
      self.render(top);
    }
    if let Err(e) = self.present() {
      log::error!("failed to present frame: {}", e);
      self.post(EventType::Quit, Payload::None, None);
      return;
    }

    match self.frontend.poll() {
      Ok(input) => {
        if let Some((w, h)) = input.resized {
          log::debug!("terminal resized to {}x{}", w, h);
          self.screen_mut().resize(w, h);
        }
        self.post(EventType::Mouse, Payload::Mouse(input.mouse), None);
        for key in input.keys {
          self.post(EventType::Key, Payload::Key(key), None);
        }
      }
      Err(e) => {
        log::error!("failed to poll input: {}", e);
        self.post(EventType::Quit, Payload::None, None);
      }
    }
    if self.frontend.is_closed() {
      self.post(EventType::Quit, Payload::None, None);
    }

    if log::log_enabled!(log::Level::Trace) {
      for (phase, avg) in self.timer.averages(TIMING_INTERVAL) {
        log::trace!("{}: {:?}/frame", phase, avg);
      }
    }
  }
}
