//! Asking the player for a key.

use crate::geo::Rect;
use crate::input;
use crate::input::KeyBinding;
use crate::input::KeyCode;
use crate::input::KeyModifiers;
use crate::ui::dialog::Dialog;
use crate::ui::event::EventType;
use crate::ui::event::Payload;
use crate::ui::label::Label;
use crate::ui::run::LoopMode;
use crate::ui::run::Outcome;
use crate::ui::Ui;

/// The dialog's title.
pub const TITLE: &str = "Keybind Capture";
/// The dialog's instructions.
pub const PROMPT: &str = "Press a key (Esc to cancel)...";

/// Shows a small dialog in the middle of the screen and waits for a key
/// press.
///
/// Returns the name of the key pressed (see [`input::key_name()`]), or `None`
/// if the player pressed Esc or the application is quitting.
pub fn capture_key(ui: &mut Ui) -> Option<String> {
  let dialog = Dialog::create(ui, None, Rect::new(0, 0, 40, 3), Some(TITLE));
  ui.center(dialog, true, true);

  let prompt =
    Label::create_bounded(ui, Some(dialog), Rect::new(1, 1, 38, 0), PROMPT);
  ui.on(prompt, EventType::Key, |ui, _, event| {
    let Some(key) = event.key() else {
      return false;
    };
    if KeyBinding::new(KeyCode::Esc, KeyModifiers::NONE).matches(key) {
      ui.post(EventType::Cancel, Payload::None, None);
    } else if let Some(name) = input::key_name(key) {
      ui.post(EventType::Ok, Payload::Text(name), None);
    }
    true
  });

  let outcome = ui.run(dialog, LoopMode::Dialog);
  ui.destroy(dialog);
  log::debug!("key capture finished: {:?}", outcome);
  match outcome {
    Outcome::Ok(Payload::Text(name)) => Some(name),
    _ => None,
  }
}
