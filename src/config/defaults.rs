use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const DEFAULTS_ENV: &str = "CLIARR_DEFAULTS";

/// Persisted default values of command line flags.
///
/// Keys are `<subcommand path>.<flag>`, e.g. `radarr.add.quality`, or just
/// `<flag>` for global flags such as `host`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Defaults {
    values: BTreeMap<String, Value>,
}

impl Defaults {
    /// `$CLIARR_DEFAULTS`, or `defaults.json` in the user config directory.
    pub fn default_path() -> PathBuf {
        if let Some(path) = std::env::var_os(DEFAULTS_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cliarr")
            .join("defaults.json")
    }

    /// Load the defaults file. A missing file gives empty defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            Error::Config(format!("Invalid defaults file {}: {}", path.display(), e))
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    pub fn unset(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Interpret a value typed by the user: JSON when it parses, a string otherwise.
    pub fn parse_value(raw: &str) -> Value {
        serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
    }

    /// Render a stored value the way it would be typed on the command line.
    pub fn arg_value(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_value() {
        assert_eq!(Defaults::parse_value("4"), json!(4));
        assert_eq!(Defaults::parse_value("true"), json!(true));
        assert_eq!(Defaults::parse_value("http://nas:7878"), json!("http://nas:7878"));
    }

    #[test]
    fn test_arg_value() {
        assert_eq!(Defaults::arg_value(&json!("abc")), "abc");
        assert_eq!(Defaults::arg_value(&json!(3)), "3");
        assert_eq!(Defaults::arg_value(&json!(false)), "false");
    }
}
