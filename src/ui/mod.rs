//! The widget toolkit.
//!
//! Everything on screen is a widget in a single tree owned by a [`Ui`]. See
//! [`widget`] for how the tree, coordinates and event routing work, and
//! [`run`] for the loop that drives it.
//!
//! The widgets themselves are:
//! - [`Dialog`], a framed box.
//! - [`Label`], a block of self-sizing text.
//! - [`Button`], a label that performs an action.
//! - [`List`], a scrolling vertical stack of widgets with a selection.
//! - [`Menu`], a dialog holding a list of keyed buttons.
//! - [`OptionItem`], a list entry for editing a player option.
//!
//! Widgets are created with associated functions like [`Label::create()`],
//! which insert them into the tree and return their [`WidgetId`]. Operations
//! that need the rest of the tree take the [`Ui`] and an id in the same way.

pub mod button;
pub mod dialog;
pub mod event;
pub mod keybind;
pub mod label;
pub mod list;
pub mod menu;
pub mod options;
pub mod ordered;
pub mod run;
pub mod widget;

pub use button::Button;
pub use dialog::Dialog;
pub use event::Event;
pub use event::EventQueue;
pub use event::EventType;
pub use event::Payload;
pub use label::Label;
pub use list::List;
pub use menu::Menu;
pub use options::OptionItem;
pub use options::OptionKind;
pub use run::LoopMode;
pub use run::Outcome;
pub use widget::Group;
pub use widget::Ui;
pub use widget::Widget;
pub use widget::WidgetId;
