use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::AccessError;
use crate::types::{parse_bool, parse_datetime};

/// Parsed switch values keyed by long name.
///
/// Values are stored as the raw strings seen on the command line (or the
/// switch default). Typed reads go through [`Matches::get`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Matches {
    values: BTreeMap<String, String>,
}

impl Matches {
    /// Best-effort typed read: the converted value, or `T::default()` when the
    /// key is absent or the value does not convert.
    pub fn get<T: FromArgValue>(&self, key: &str) -> T {
        self.lookup(key).unwrap_or_default()
    }

    /// Typed read that reports why no value was produced.
    pub fn lookup<T: FromArgValue>(&self, key: &str) -> Result<T, AccessError> {
        let raw = self
            .raw(key)
            .ok_or_else(|| AccessError::Absent(key.to_string()))?;
        T::from_arg_value(raw).ok_or_else(|| AccessError::Invalid {
            key: key.to_string(),
            value: raw.to_string(),
            target: T::TYPE_NAME,
        })
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.values
    }
}

impl Matches {
    pub(crate) fn insert(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Conversion from a stored raw value into a typed result.
pub trait FromArgValue: Sized + Default {
    /// Name used in [`AccessError::Invalid`].
    const TYPE_NAME: &'static str;

    fn from_arg_value(raw: &str) -> Option<Self>;
}

impl FromArgValue for String {
    const TYPE_NAME: &'static str = "string";

    fn from_arg_value(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl FromArgValue for PathBuf {
    const TYPE_NAME: &'static str = "path";

    fn from_arg_value(raw: &str) -> Option<Self> {
        Some(PathBuf::from(raw))
    }
}

impl FromArgValue for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn from_arg_value(raw: &str) -> Option<Self> {
        parse_bool(raw)
    }
}

impl FromArgValue for NaiveDateTime {
    const TYPE_NAME: &'static str = "date-time";

    fn from_arg_value(raw: &str) -> Option<Self> {
        parse_datetime(raw)
    }
}

impl FromArgValue for NaiveDate {
    const TYPE_NAME: &'static str = "date";

    fn from_arg_value(raw: &str) -> Option<Self> {
        parse_datetime(raw).map(|dt| dt.date())
    }
}

macro_rules! from_str_value {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl FromArgValue for $ty {
                const TYPE_NAME: &'static str = $name;

                fn from_arg_value(raw: &str) -> Option<Self> {
                    raw.trim().parse().ok()
                }
            }
        )*
    };
}

from_str_value! {
    i32 => "int",
    i64 => "long",
    u32 => "unsigned int",
    u64 => "unsigned long",
    f64 => "number",
}
