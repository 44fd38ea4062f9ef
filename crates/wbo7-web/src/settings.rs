//! Runtime configuration.
//!
//! Sources, lowest precedence first: built-in defaults, the TOML file passed
//! with `--config`, then `WBO7_*` environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  /// SQLite file holding the registrations.
  pub store_path:      PathBuf,
  /// CSV spreadsheet holding the winner log.
  pub winner_log_path: PathBuf,
  /// Open the home page in a browser shortly after startup. On by default.
  pub open_browser:    bool,
}

impl ServerConfig {
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 5000)?
      .set_default("store_path", "usuarios.db")?
      .set_default("winner_log_path", "ganhadores.csv")?
      .set_default("open_browser", true)?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("WBO7"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn url(&self) -> String { format!("http://{}/", self.address()) }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
