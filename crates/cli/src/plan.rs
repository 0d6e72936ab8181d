use anyhow::{Result, bail};
use serde::Serialize;
use sqlclient_argparse::Matches;

use crate::config::{DriverRegistry, render_template};

const REDACTED: &str = "********";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    fn from_switch(value: &str) -> Self {
        match value {
            "csv" => Self::Csv,
            _ => Self::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Destination {
    Stdout,
    Post { url: String },
}

/// Everything the query runner and uploader need, resolved from parsed switches.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invocation {
    pub driver: String,
    pub odbc_driver: String,
    #[serde(skip)]
    pub connection_string: String,
    #[serde(rename = "connectionString")]
    pub redacted_connection_string: String,
    pub sql: String,
    pub output: OutputFormat,
    pub destination: Destination,
}

impl Invocation {
    pub fn from_matches(matches: &Matches, registry: &DriverRegistry) -> Result<Self> {
        let driver: String = matches.get("driver");
        let Some(entry) = registry.get(&driver) else {
            bail!("ODBC driver {driver} does not exist");
        };

        let connection_string = |password: &str| {
            render_template(&entry.connection_string, |name| match name {
                "driver" => Some(entry.odbc_name.as_str()),
                "password" => Some(password),
                "host" | "catalog" | "username" => matches.raw(name),
                _ => None,
            })
        };

        let url: String = matches.get("url");
        let destination = if url.is_empty() {
            Destination::Stdout
        } else {
            Destination::Post { url }
        };

        Ok(Self {
            odbc_driver: entry.odbc_name.clone(),
            connection_string: connection_string(matches.raw("password").unwrap_or_default()),
            redacted_connection_string: connection_string(REDACTED),
            sql: matches.get("sql"),
            output: OutputFormat::from_switch(matches.raw("output").unwrap_or_default()),
            destination,
            driver,
        })
    }
}
