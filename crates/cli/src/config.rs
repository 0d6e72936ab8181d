use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "sqlclient.json";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SQLCLIENT_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Drivers to add, or to replace built-in entries with the same name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub drivers: IndexMap<String, DriverEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverEntry {
    /// Name of the installed ODBC driver.
    pub odbc_name: String,

    /// Connection string with `{driver}`, `{host}`, `{catalog}`, `{username}`
    /// and `{password}` placeholders.
    pub connection_string: String,
}

impl DriverEntry {
    fn new(odbc_name: &str, connection_string: &str) -> Self {
        Self {
            odbc_name: odbc_name.to_string(),
            connection_string: connection_string.to_string(),
        }
    }
}

const BRACED_TEMPLATE: &str =
    "Driver={{driver}};Server={host};Database={catalog};Uid={username};Pwd={password};";

/// Short driver name (as typed on the command line) to ODBC driver details.
#[derive(Debug, Clone)]
pub struct DriverRegistry {
    drivers: IndexMap<String, DriverEntry>,
}

impl DriverRegistry {
    pub fn builtin() -> Self {
        let mut drivers = IndexMap::new();
        drivers.insert(
            "mssql".to_string(),
            DriverEntry::new("SQL Server", BRACED_TEMPLATE),
        );
        drivers.insert(
            "mysql".to_string(),
            DriverEntry::new("MySQL ODBC 8.0 Unicode Driver", BRACED_TEMPLATE),
        );
        drivers.insert(
            "postgresql".to_string(),
            DriverEntry::new("PostgreSQL", BRACED_TEMPLATE),
        );
        drivers.insert(
            "firebird".to_string(),
            DriverEntry::new(
                "Firebird/InterBase(r) driver",
                "Driver={driver};DBNAME={host}:{catalog};UID={username};PWD={password};",
            ),
        );
        Self { drivers }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        for (name, entry) in config.drivers {
            tracing::debug!(driver = %name, odbc = %entry.odbc_name, "registering driver from config");
            self.drivers.insert(name, entry);
        }
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.drivers.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&DriverEntry> {
        self.drivers.get(name)
    }
}

/// Locate and read the config file.
///
/// A path named by `SQLCLIENT_CONFIG` must exist; the default
/// `sqlclient.json` in the working directory is optional.
pub fn load_config() -> Result<Option<Config>> {
    let (path, required) = match std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
        Some(p) => (p, true),
        None => (
            std::env::current_dir()
                .context("failed to get current directory")?
                .join(DEFAULT_CONFIG_NAME),
            false,
        ),
    };

    if !path.exists() {
        if required {
            bail!("config not found: {}", path.display());
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config: Config = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse config JSON: {}", path.display()))?;
    tracing::debug!(path = %path.display(), drivers = config.drivers.len(), "loaded config");
    Ok(Some(config))
}

/// Substitute `{name}` placeholders in a single pass.
///
/// Unknown placeholders and stray braces are copied through unchanged, and
/// substituted values are never rescanned.
pub fn render_template<'v>(template: &str, lookup: impl Fn(&str) -> Option<&'v str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let placeholder = after
            .find('}')
            .map(|close| &after[..close])
            .filter(|name| !name.is_empty() && name.chars().all(is_placeholder_char));
        match placeholder.and_then(|name| lookup(name).map(|v| (name, v))) {
            Some((name, value)) => {
                out.push_str(value);
                rest = &after[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn is_placeholder_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
