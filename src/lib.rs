//! The user interface of NP-Complete, a terminal roguelike.
//!
//! This crate is a small retained-mode widget toolkit for character-cell
//! displays. Widgets ([`ui`]) form a tree which renders onto [`gfx::Canvas`]es
//! and receives input through a prioritized event queue; a [`gfx::Frontend`]
//! puts finished frames on a real terminal (or, for tests, nowhere at all).
//!
//! ```
//! use npc::geo::Rect;
//! use npc::gfx::Headless;
//! use npc::ui::Label;
//! use npc::ui::Ui;
//!
//! let mut ui = Ui::new(Headless::new(20, 3));
//! let label = Label::create(&mut ui, None, 0, 1, "Hello!");
//! ui.center(label, true, false);
//! ui.render(label);
//! assert_eq!(ui.screen().row(1), "       Hello!       ");
//! assert_eq!(ui.placement(label), Rect::new(7, 1, 6, 1));
//! ```

pub mod config;
pub mod error;
pub mod geo;
pub mod gfx;
pub mod input;
pub mod timing;
pub mod ui;

pub use error::Error;
pub use error::Result;
