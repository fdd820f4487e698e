//! Insertion-ordered sets.
//!
//! [`OrderedSet`] keeps its members in the order they were added, like a
//! `Vec`, but with set semantics and O(1) membership, removal, and neighbor
//! lookup. It is a hash map threaded with a doubly-linked list: each member
//! maps to the members before and after it.
//!
//! Widget children live in one of these, so traversal order (and therefore
//! drawing order) is the order children were attached in.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;

/// A set which remembers insertion order.
#[derive(Clone)]
pub struct OrderedSet<T> {
  links: HashMap<T, Link<T>>,
  head: Option<T>,
  tail: Option<T>,
}

#[derive(Copy, Clone)]
struct Link<T> {
  prev: Option<T>,
  next: Option<T>,
}

impl<T> Default for OrderedSet<T> {
  fn default() -> Self {
    Self {
      links: HashMap::new(),
      head: None,
      tail: None,
    }
  }
}

impl<T: Copy + Eq + Hash> OrderedSet<T> {
  /// Creates a new, empty `OrderedSet`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the number of members.
  pub fn len(&self) -> usize {
    self.links.len()
  }

  /// Returns whether there are no members.
  pub fn is_empty(&self) -> bool {
    self.links.is_empty()
  }

  /// Returns whether `item` is a member.
  pub fn contains(&self, item: T) -> bool {
    self.links.contains_key(&item)
  }

  /// Appends `item` to the end of the set.
  ///
  /// Does nothing if `item` is already a member; in particular, it does not
  /// move. Returns whether `item` was added.
  pub fn add(&mut self, item: T) -> bool {
    if self.contains(item) {
      return false;
    }

    self.links.insert(
      item,
      Link {
        prev: self.tail,
        next: None,
      },
    );
    match self.tail {
      Some(tail) => self.link_mut(tail).next = Some(item),
      None => self.head = Some(item),
    }
    self.tail = Some(item);
    true
  }

  /// Removes `item` from the set, leaving the order of the remaining members
  /// unchanged.
  ///
  /// Does nothing if `item` is not a member. Returns whether `item` was
  /// removed.
  pub fn remove(&mut self, item: T) -> bool {
    let Some(Link { prev, next }) = self.links.remove(&item) else {
      return false;
    };

    match prev {
      Some(prev) => self.link_mut(prev).next = next,
      None => self.head = next,
    }
    match next {
      Some(next) => self.link_mut(next).prev = prev,
      None => self.tail = prev,
    }
    true
  }

  /// Removes every member.
  pub fn clear(&mut self) {
    self.links.clear();
    self.head = None;
    self.tail = None;
  }

  /// Returns the oldest member.
  pub fn first(&self) -> Option<T> {
    self.head
  }

  /// Returns the newest member.
  pub fn last(&self) -> Option<T> {
    self.tail
  }

  /// Returns the member added just before `item`.
  ///
  /// Returns `None` if `item` is the first member or not a member at all.
  pub fn prev(&self, item: T) -> Option<T> {
    self.links.get(&item)?.prev
  }

  /// Returns the member added just after `item`.
  ///
  /// Returns `None` if `item` is the last member or not a member at all.
  pub fn next(&self, item: T) -> Option<T> {
    self.links.get(&item)?.next
  }

  /// Returns an iterator over the members in insertion order.
  ///
  /// The iterator is double-ended; use [`Iterator::rev()`] to walk from newest
  /// to oldest.
  pub fn iter(&self) -> Iter<'_, T> {
    Iter {
      set: self,
      front: self.head,
      back: self.tail,
      remaining: self.len(),
    }
  }

  fn link_mut(&mut self, item: T) -> &mut Link<T> {
    self
      .links
      .get_mut(&item)
      .expect("ordered set links point at members")
  }
}

/// An iterator over an [`OrderedSet`].
///
/// See [`OrderedSet::iter()`].
pub struct Iter<'a, T> {
  set: &'a OrderedSet<T>,
  front: Option<T>,
  back: Option<T>,
  remaining: usize,
}

impl<T: Copy + Eq + Hash> Iterator for Iter<'_, T> {
  type Item = T;

  fn next(&mut self) -> Option<T> {
    if self.remaining == 0 {
      return None;
    }
    let item = self.front?;
    self.front = self.set.next(item);
    self.remaining -= 1;
    Some(item)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.remaining, Some(self.remaining))
  }
}

impl<T: Copy + Eq + Hash> DoubleEndedIterator for Iter<'_, T> {
  fn next_back(&mut self) -> Option<T> {
    if self.remaining == 0 {
      return None;
    }
    let item = self.back?;
    self.back = self.set.prev(item);
    self.remaining -= 1;
    Some(item)
  }
}

impl<T: Copy + Eq + Hash> ExactSizeIterator for Iter<'_, T> {}
impl<T: Copy + Eq + Hash> FusedIterator for Iter<'_, T> {}

impl<'a, T: Copy + Eq + Hash> IntoIterator for &'a OrderedSet<T> {
  type Item = T;
  type IntoIter = Iter<'a, T>;
  fn into_iter(self) -> Iter<'a, T> {
    self.iter()
  }
}

impl<T: Copy + Eq + Hash> Extend<T> for OrderedSet<T> {
  fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
    for item in iter {
      self.add(item);
    }
  }
}

impl<T: Copy + Eq + Hash> FromIterator<T> for OrderedSet<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    let mut set = Self::new();
    set.extend(iter);
    set
  }
}

impl<T: Copy + Eq + Hash + fmt::Debug> fmt::Debug for OrderedSet<T> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_set().entries(self.iter()).finish()
  }
}
