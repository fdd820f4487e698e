//! NP-Complete's title screen.

use std::env;
use std::fs::File;
use std::rc::Rc;

use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use npc::config::Options;
use npc::config::SharedOptions;
use npc::geo::Rect;
use npc::gfx::Align;
use npc::gfx::Curses;
use npc::ui::widget::DEFAULT_FPS;
use npc::ui::EventType;
use npc::ui::Group;
use npc::ui::Label;
use npc::ui::List;
use npc::ui::LoopMode;
use npc::ui::Menu;
use npc::ui::OptionItem;
use npc::ui::OptionKind;
use npc::ui::Payload;
use npc::ui::Ui;

const LOG_FILE: &str = "npc.log";

const OPTIONS: &[(&str, &str, &str, OptionKind)] = &[
  (
    "Frame rate",
    "display",
    "fps",
    OptionKind::Int {
      min: Some(5),
      max: Some(60),
    },
  ),
  ("Show frame rate", "display", "show_fps", OptionKind::Bool),
  ("Mouse", "display", "mouse", OptionKind::Bool),
  ("Move up", "keys", "move_up", OptionKind::Key),
  ("Move down", "keys", "move_down", OptionKind::Key),
  ("Move left", "keys", "move_left", OptionKind::Key),
  ("Move right", "keys", "move_right", OptionKind::Key),
  ("Wait", "keys", "wait", OptionKind::Key),
  ("Inventory", "keys", "inventory", OptionKind::Key),
  ("Look", "keys", "look", OptionKind::Key),
  ("Quit", "keys", "quit", OptionKind::Key),
];

fn init_logging() {
  let level = env::var("NPC_LOG")
    .ok()
    .and_then(|l| l.parse().ok())
    .unwrap_or(LevelFilter::Info);
  let result = File::create(LOG_FILE)
    .map_err(|e| e.to_string())
    .and_then(|file| {
      WriteLogger::init(level, Config::default(), file)
        .map_err(|e| e.to_string())
    });
  if let Err(e) = result {
    eprintln!("logging disabled: {}", e);
  }
}

/// Runs the options screen until the player backs out of it.
fn show_options(ui: &mut Ui, options: &SharedOptions) {
  let menu = Menu::create(ui, None, Rect::new(0, 0, 40, 0), Some("Options"));
  let Some(list) = ui.widget::<Menu>(menu).map(Menu::list) else {
    return;
  };
  for &(caption, section, key, kind) in OPTIONS {
    let item = OptionItem::create(
      ui,
      None,
      caption,
      section,
      key,
      kind,
      Rc::clone(options),
    );
    List::add(ui, list, item);
  }
  let back = Menu::add_item(ui, menu, "b", "Back", |ui, _| {
    ui.post(EventType::Cancel, Payload::None, None)
  });
  if let Err(e) = back {
    log::error!("{}", e);
  }
  ui.center(menu, true, true);

  let outcome = ui.run(menu, LoopMode::Dialog);
  log::info!("options closed: {:?}", outcome);
  ui.destroy(menu);

  let fps = options.borrow().get_int("display", "fps");
  match fps.map(u32::try_from) {
    Ok(Ok(fps)) => ui.set_fps_limit(Some(fps)),
    Ok(Err(_)) | Err(_) => ui.set_fps_limit(Some(DEFAULT_FPS)),
  }
}

fn main() -> npc::Result<()> {
  init_logging();

  let options = match Options::default_path() {
    Some(path) => Options::load(path)?,
    None => Options::new()?,
  }
  .shared();

  let mut ui = Ui::new(Curses::init()?);
  let fps = options.borrow().get_int("display", "fps").ok();
  let fps = fps.and_then(|f| u32::try_from(f).ok());
  ui.set_fps_limit(fps.or(Some(DEFAULT_FPS)));

  let (w, h) = ui.screen_size();
  let root = ui.insert(Group, None, Rect::with_dims(w, h));
  let banner = Rect::new(0, 2, w, 0);
  let title = Label::create_bounded(&mut ui, Some(root), banner, "NP-Complete");
  Label::set_align(&mut ui, title, Align::Center);

  let menu = Menu::create(&mut ui, Some(root), Rect::default(), Some("Menu"));
  let opts = Rc::clone(&options);
  Menu::add_item(&mut ui, menu, "o", "Options", move |ui, _| {
    let opts = Rc::clone(&opts);
    ui.post(
      EventType::Launch,
      Payload::Launch(Rc::new(move |ui| show_options(ui, &opts))),
      None,
    );
  })?;
  Menu::add_item(&mut ui, menu, "q", "Quit", |ui, _| {
    ui.post(EventType::Quit, Payload::None, None)
  })?;
  ui.center(menu, true, true);

  ui.run(root, LoopMode::Main);
  drop(ui);

  options.borrow().save()?;
  log::info!("goodbye");
  Ok(())
}
