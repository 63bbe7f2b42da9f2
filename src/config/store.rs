//! `ConfigStore`: Settings persistence.
//!
//! Settings live in a flat TOML file, one key per setting. Loading applies
//! each key on its own through [`Config::set`], so a malformed or unknown
//! entry only loses that entry.

use super::{Config, ConfigChanges, ConfigValue};
use crate::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Loads, merges and saves the settings file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    /// Settings file location.
    path: PathBuf,
    /// Current settings.
    config: Config,
}

impl ConfigStore {
    /// Open the settings file at `path`, starting from defaults.
    ///
    /// A missing file yields defaults. A file that is not valid TOML is
    /// reported and ignored; invalid entries in a valid file are skipped.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut config = Config::default();

        match std::fs::read_to_string(&path) {
            Ok(content) => {
                if let Err(e) = merge_toml(&mut config, &content) {
                    warn!(path = %path.display(), error = %e, "settings file unreadable, using defaults");
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read settings file");
            }
        }

        Self { path, config }
    }

    /// Settings file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current settings.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Write all settings to the file.
    pub fn save(&self) -> ConfigResult<()> {
        let content = toml::to_string(&self.config)?;
        std::fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    /// Merge updates and persist them.
    ///
    /// Returns the changed groups; the merge stands even if saving fails.
    pub fn update<'a, I>(&mut self, updates: I) -> ConfigResult<ConfigChanges>
    where
        I: IntoIterator<Item = (&'a str, &'a ConfigValue)>,
    {
        let changes = self.config.apply(updates);
        self.save()?;
        Ok(changes)
    }

    /// Remember the window geometry, typically at shutdown.
    pub fn record_window_geometry(&mut self, width: u32, height: u32, x: i32, y: i32) -> ConfigResult<()> {
        self.config.window_width = width.max(1);
        self.config.window_height = height.max(1);
        self.config.window_x = Some(x);
        self.config.window_y = Some(y);
        self.save()
    }
}

/// Apply every key of a TOML document onto `config`.
fn merge_toml(config: &mut Config, content: &str) -> ConfigResult<ConfigChanges> {
    let table: toml::Table = content.parse()?;
    let mut changes = ConfigChanges::empty();

    for (key, value) in &table {
        let result = to_config_value(key, value).and_then(|v| config.set(key, &v));
        match result {
            Ok(changed) => changes |= changed,
            Err(e) => warn!(key = key.as_str(), error = %e, "skipping malformed setting"),
        }
    }

    Ok(changes)
}

fn to_config_value(key: &str, value: &toml::Value) -> ConfigResult<ConfigValue> {
    match value {
        toml::Value::String(s) => Ok(ConfigValue::Text(s.clone())),
        toml::Value::Integer(i) => Ok(ConfigValue::Int(*i)),
        toml::Value::Float(f) => Ok(ConfigValue::Float(*f)),
        toml::Value::Boolean(b) => Ok(ConfigValue::Bool(*b)),
        _ => Err(ConfigError::invalid(key, "expected a scalar value")),
    }
}
