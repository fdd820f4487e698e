//! Events and the event queue.
//!
//! Input, notifications, and requests all travel through the UI as [`Event`]
//! records in a shared [`EventQueue`]. The queue is a priority queue keyed on
//! the event's [`EventType`]: when events of several types are waiting, the
//! lowest type drains first (so a quit request overtakes queued keypresses),
//! and events of the same type drain in the order they were posted.
//!
//! Draining is non-blocking and only sees what was queued when it started;
//! anything posted while a drain is in progress (typically by an event
//! handler) waits for the next drain.

use std::any::Any;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::rc::Rc;

use crate::input::KeyEvent;
use crate::input::MouseState;
use crate::ui::Ui;
use crate::ui::WidgetId;

/// The type of an event, which is also its priority.
///
/// Variants are listed from highest to lowest priority.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum EventType {
  /// Leave every running UI loop.
  Quit,
  /// Close the current dialog, accepting it.
  Ok,
  /// Close the current dialog, dismissing it.
  Cancel,
  /// Run the [`Payload::Launch`] callback from the UI loop.
  Launch,
  /// A widget's size changed; targeted at that widget.
  Resize,
  /// Activate a widget, e.g. press a button; targeted at that widget.
  Activate,
  /// The mouse state, once per frame.
  Mouse,
  /// A key press.
  Key,
  /// Application-defined events; these sort after every built-in type.
  User(u16),
}

/// A callback run by the UI loop in response to [`EventType::Launch`].
pub type Launch = Rc<dyn Fn(&mut Ui)>;

/// The data carried by an [`Event`].
#[derive(Clone, Default)]
pub enum Payload {
  /// No data.
  #[default]
  None,
  /// A key press.
  Key(KeyEvent),
  /// The mouse state.
  Mouse(MouseState),
  /// A string, e.g. the result of a dialog.
  Text(String),
  /// A callback for the UI loop to run.
  Launch(Launch),
  /// Anything else.
  Any(Rc<dyn Any>),
}

impl fmt::Debug for Payload {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::None => f.write_str("None"),
      Self::Key(k) => f.debug_tuple("Key").field(k).finish(),
      Self::Mouse(m) => f.debug_tuple("Mouse").field(m).finish(),
      Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
      Self::Launch(_) => f.write_str("Launch(..)"),
      Self::Any(_) => f.write_str("Any(..)"),
    }
  }
}

/// A single event.
///
/// An event with no target is a *broadcast*: it is offered to widgets until
/// one accepts it. An event with a target is only ever offered to that
/// widget's own handler.
#[derive(Clone, Debug)]
pub struct Event {
  /// The event type.
  pub ty: EventType,
  /// The event data.
  pub payload: Payload,
  /// The widget this event is addressed to, if any.
  pub target: Option<WidgetId>,
}

impl Event {
  /// Creates a new broadcast event with no payload.
  pub fn new(ty: EventType) -> Self {
    Self {
      ty,
      payload: Payload::None,
      target: None,
    }
  }

  /// Returns this event with the given payload.
  pub fn with_payload(mut self, payload: Payload) -> Self {
    self.payload = payload;
    self
  }

  /// Returns this event addressed to `target`.
  pub fn targeted(mut self, target: WidgetId) -> Self {
    self.target = Some(target);
    self
  }

  /// Returns the key press carried by this event, if any.
  pub fn key(&self) -> Option<&KeyEvent> {
    match &self.payload {
      Payload::Key(k) => Some(k),
      _ => None,
    }
  }

  /// Returns the mouse state carried by this event, if any.
  pub fn mouse(&self) -> Option<&MouseState> {
    match &self.payload {
      Payload::Mouse(m) => Some(m),
      _ => None,
    }
  }

  /// Returns the text carried by this event, if any.
  pub fn text(&self) -> Option<&str> {
    match &self.payload {
      Payload::Text(s) => Some(s),
      _ => None,
    }
  }
}

struct Entry {
  seq: u64,
  event: Event,
}

impl PartialEq for Entry {
  fn eq(&self, other: &Self) -> bool {
    self.cmp(other) == Ordering::Equal
  }
}
impl Eq for Entry {}
impl PartialOrd for Entry {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}
impl Ord for Entry {
  // `BinaryHeap` is a max-heap, so this is reversed: the smallest
  // `(type, seq)` pair is the greatest entry.
  fn cmp(&self, other: &Self) -> Ordering {
    (self.event.ty, self.seq)
      .cmp(&(other.event.ty, other.seq))
      .reverse()
  }
}

#[derive(Default)]
struct Queue {
  ready: BinaryHeap<Entry>,
  incoming: BinaryHeap<Entry>,
  seq: u64,
}

/// A priority queue of events.
///
/// `EventQueue` is a shared handle: clones refer to the same queue. This lets
/// event handlers post new events while the UI loop is draining.
#[derive(Clone, Default)]
pub struct EventQueue(Rc<RefCell<Queue>>);

impl EventQueue {
  /// Creates a new, empty queue.
  pub fn new() -> Self {
    Self::default()
  }

  /// Enqueues an event of type `ty`. Posting always succeeds.
  pub fn post(
    &self,
    ty: EventType,
    payload: Payload,
    target: Option<WidgetId>,
  ) {
    self.post_event(Event {
      ty,
      payload,
      target,
    })
  }

  /// Enqueues `event`.
  pub fn post_event(&self, event: Event) {
    let mut q = self.0.borrow_mut();
    let seq = q.seq;
    q.seq += 1;
    log::trace!("posting {:?} (#{}) to {:?}", event.ty, seq, event.target);
    q.incoming.push(Entry { seq, event });
  }

  /// Returns the number of queued events.
  pub fn len(&self) -> usize {
    let q = self.0.borrow();
    q.ready.len() + q.incoming.len()
  }

  /// Returns whether the queue is empty.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Discards every queued event.
  pub fn clear(&self) {
    let mut q = self.0.borrow_mut();
    q.ready.clear();
    q.incoming.clear();
  }

  /// Starts draining the queue.
  ///
  /// The returned iterator yields, in priority order, every event queued at
  /// the time of this call, removing each as it goes. If the queue is empty it
  /// yields nothing; it never waits.
  ///
  /// Events posted after this call are held back for the next drain. If the
  /// iterator is dropped early, the events it didn't yield stay queued.
  pub fn drain(&self) -> Drain {
    let mut q = self.0.borrow_mut();
    let incoming = std::mem::take(&mut q.incoming);
    q.ready.extend(incoming);
    Drain(self.clone())
  }
}

/// A draining iterator over an [`EventQueue`].
///
/// See [`EventQueue::drain()`].
pub struct Drain(EventQueue);

impl Iterator for Drain {
  type Item = Event;
  fn next(&mut self) -> Option<Event> {
    let entry = self.0 .0.borrow_mut().ready.pop()?;
    Some(entry.event)
  }
}
