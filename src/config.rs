//! Player options.
//!
//! Options are stored INI-style, as `[section]` headers followed by
//! `key = value` lines. Two layers are consulted: the user's own file, then
//! the built-in defaults compiled into the binary. Only the user layer is ever
//! written back.
//!
//! A value of `None` marks an option as deliberately unset, which lets the
//! user file clear a default.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::io::Write as _;
use std::path::Path;
use std::path::PathBuf;
use std::rc::Rc;

use directories::ProjectDirs;
use ini::Ini;
use ini::ParseOption;

use crate::error::Error;
use crate::error::Result;

/// The built-in option values.
pub const DEFAULTS: &str = include_str!("../data/defaults.cfg");

/// The name of the user's option file within the config directory.
pub const FILE_NAME: &str = "config.cfg";

const UNSET: &str = "None";

/// Options shared between the widgets that display and edit them.
pub type SharedOptions = Rc<RefCell<Options>>;

/// A layered option store.
#[derive(Debug, Clone)]
pub struct Options {
  defaults: Ini,
  user: Ini,
  path: Option<PathBuf>,
}

impl Options {
  /// Creates a store holding only the built-in defaults, which is never
  /// saved anywhere.
  pub fn new() -> Result<Self> {
    Self::with_defaults(DEFAULTS)
  }

  /// Creates a store with `defaults` as its default layer.
  pub fn with_defaults(defaults: &str) -> Result<Self> {
    let defaults = parse(defaults).map_err(|source| Error::ConfigParse {
      path: PathBuf::from("<defaults>"),
      source,
    })?;
    Ok(Self {
      defaults,
      user: Ini::new(),
      path: None,
    })
  }

  /// Loads the user's options from `path` over the built-in defaults.
  ///
  /// A missing file is not an error; it will be created by
  /// [`Options::save()`].
  pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
    let mut options = Self::new()?;
    let path = path.into();
    match fs::read_to_string(&path) {
      Ok(text) => {
        options.user = parse(&text).map_err(|source| Error::ConfigParse {
          path: path.clone(),
          source,
        })?;
        log::info!("loaded options from {}", path.display());
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        log::info!("no options at {}; using defaults", path.display());
      }
      Err(e) => return Err(e.into()),
    }
    options.path = Some(path);
    Ok(options)
  }

  /// Returns where the user's options live on this platform, if there is a
  /// home directory to put them in.
  pub fn default_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "NP-Complete")?;
    Some(dirs.config_dir().join(FILE_NAME))
  }

  /// Returns the file this store saves to.
  pub fn path(&self) -> Option<&Path> {
    self.path.as_deref()
  }

  fn raw(&self, section: &str, key: &str) -> Option<&str> {
    self
      .user
      .get_from(Some(section), key)
      .or_else(|| self.defaults.get_from(Some(section), key))
  }

  fn require(&self, section: &str, key: &str) -> Result<&str> {
    self.get_str(section, key).ok_or_else(|| Error::MissingOption {
      section: section.to_string(),
      key: key.to_string(),
    })
  }

  /// Returns whether `[section] key` has a value.
  pub fn is_set(&self, section: &str, key: &str) -> bool {
    self.get_str(section, key).is_some()
  }

  /// Returns the value of `[section] key`, or `None` if it is unset.
  pub fn get_str(&self, section: &str, key: &str) -> Option<&str> {
    self
      .raw(section, key)
      .map(str::trim)
      .filter(|v| *v != UNSET)
  }

  /// Returns the value of `[section] key` as an integer.
  pub fn get_int(&self, section: &str, key: &str) -> Result<i64> {
    let value = self.require(section, key)?;
    value.parse().map_err(|_| Error::BadOption {
      section: section.to_string(),
      key: key.to_string(),
      expected: "integer",
      value: value.to_string(),
    })
  }

  /// Returns the value of `[section] key` as a boolean.
  ///
  /// `yes`, `true`, `on` and `1` are true; `no`, `false`, `off` and `0` are
  /// false, in any case.
  pub fn get_bool(&self, section: &str, key: &str) -> Result<bool> {
    let value = self.require(section, key)?;
    match value.to_ascii_lowercase().as_str() {
      "yes" | "true" | "on" | "1" => Ok(true),
      "no" | "false" | "off" | "0" => Ok(false),
      _ => Err(Error::BadOption {
        section: section.to_string(),
        key: key.to_string(),
        expected: "boolean",
        value: value.to_string(),
      }),
    }
  }

  /// Sets `[section] key` in the user layer.
  pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
    let value = value.into();
    log::debug!("option [{}] {} = {}", section, key, value);
    self.user.with_section(Some(section)).set(key, value);
  }

  /// Sets `[section] key` to an integer.
  pub fn set_int(&mut self, section: &str, key: &str, value: i64) {
    self.set(section, key, value.to_string());
  }

  /// Sets `[section] key` to a boolean.
  pub fn set_bool(&mut self, section: &str, key: &str, value: bool) {
    self.set(section, key, if value { "yes" } else { "no" });
  }

  /// Marks `[section] key` as unset, overriding any default.
  pub fn unset(&mut self, section: &str, key: &str) {
    self.set(section, key, UNSET);
  }

  /// Writes the user layer back to the file it was loaded from. Does nothing
  /// for a store with no file.
  pub fn save(&self) -> Result<()> {
    match &self.path {
      Some(path) => self.save_to(path),
      None => Ok(()),
    }
  }

  /// Writes the user layer to `path`, creating its directory if needed.
  pub fn save_to(&self, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
      fs::create_dir_all(dir)?;
    }
    let mut file = io::BufWriter::new(fs::File::create(path)?);
    writeln!(file, "# Generated by npc. Values here override the defaults.")?;
    writeln!(file)?;
    self.user.write_to(&mut file)?;
    file.flush()?;
    log::info!("saved options to {}", path.display());
    Ok(())
  }

  /// Wraps this store for sharing between widgets.
  pub fn shared(self) -> SharedOptions {
    Rc::new(RefCell::new(self))
  }
}

/// Parses an options file.
///
/// Values are written back unquoted, so quotes are ordinary characters here;
/// otherwise a key bound to `"` would make the file unreadable.
fn parse(text: &str) -> std::result::Result<Ini, ini::ParseError> {
  Ini::load_from_str_opt(
    text,
    ParseOption {
      enabled_quote: false,
      ..ParseOption::default()
    },
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  const TEST_DEFAULTS: &str = "\
[video]
fps = 30
vsync = on

[keys]
jump = Space
dash = None
";

  #[test]
  fn user_layer_overrides_defaults() {
    let mut o = Options::with_defaults(TEST_DEFAULTS).unwrap();
    assert_eq!(o.get_int("video", "fps").unwrap(), 30);
    o.set_int("video", "fps", 60);
    assert_eq!(o.get_int("video", "fps").unwrap(), 60);
  }

  #[test]
  fn none_means_unset() {
    let mut o = Options::with_defaults(TEST_DEFAULTS).unwrap();
    assert_eq!(o.get_str("keys", "jump"), Some("Space"));
    assert_eq!(o.get_str("keys", "dash"), None);
    assert_eq!(o.get_str("keys", "missing"), None);

    o.unset("keys", "jump");
    assert!(!o.is_set("keys", "jump"));
    o.set("keys", "dash", "Shift+d");
    assert_eq!(o.get_str("keys", "dash"), Some("Shift+d"));
  }

  #[test]
  fn typed_getters_report_problems() {
    let mut o = Options::with_defaults(TEST_DEFAULTS).unwrap();
    assert!(o.get_bool("video", "vsync").unwrap());
    assert!(matches!(
      o.get_int("video", "nope"),
      Err(Error::MissingOption { .. })
    ));
    o.set("video", "fps", "fast");
    assert!(matches!(
      o.get_int("video", "fps"),
      Err(Error::BadOption {
        expected: "integer",
        ..
      })
    ));
    o.set("video", "vsync", "maybe");
    assert!(o.get_bool("video", "vsync").is_err());
  }

  #[test]
  fn builtin_defaults_parse() {
    let o = Options::new().unwrap();
    assert_eq!(o.get_int("display", "fps").unwrap(), 20);
    assert_eq!(o.get_str("keys", "look"), None);
  }
}
