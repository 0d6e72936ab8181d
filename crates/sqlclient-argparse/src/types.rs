use std::fmt;
use std::fs::File;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::error::InvalidReason;

/// The value type a switch expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArgType {
    Long,
    Int,
    DateTime,
    #[default]
    String,
    Boolean,
    File,
    ProcessId,
    Url,
    Choice,
}

/// Checks one raw value. The second argument is the switch's allowed values,
/// which only [`ArgType::Choice`] looks at.
pub type Validator = fn(&str, &[String]) -> Result<(), InvalidReason>;

impl ArgType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Int => "int",
            Self::DateTime => "date-time",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::File => "file",
            Self::ProcessId => "process-id",
            Self::Url => "url",
            Self::Choice => "choice",
        }
    }

    /// The validator for this type.
    pub fn validator(self) -> Validator {
        match self {
            Self::Long => validate_long,
            Self::Int => validate_int,
            Self::DateTime => validate_datetime,
            Self::String => accept_any,
            Self::Boolean => validate_boolean,
            Self::File => validate_file,
            Self::ProcessId => validate_process_id,
            Self::Url => validate_url,
            Self::Choice => validate_choice,
        }
    }

    pub fn validate(self, value: &str, allowed: &[String]) -> Result<(), InvalidReason> {
        (self.validator())(value, allowed)
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn unparsable(expected: ArgType, value: &str) -> InvalidReason {
    InvalidReason::Unparsable {
        expected,
        value: value.to_string(),
    }
}

fn accept_any(_value: &str, _allowed: &[String]) -> Result<(), InvalidReason> {
    Ok(())
}

fn validate_int(value: &str, _allowed: &[String]) -> Result<(), InvalidReason> {
    value
        .trim()
        .parse::<i32>()
        .map(drop)
        .map_err(|_| unparsable(ArgType::Int, value))
}

fn validate_long(value: &str, _allowed: &[String]) -> Result<(), InvalidReason> {
    value
        .trim()
        .parse::<i64>()
        .map(drop)
        .map_err(|_| unparsable(ArgType::Long, value))
}

fn validate_datetime(value: &str, _allowed: &[String]) -> Result<(), InvalidReason> {
    parse_datetime(value)
        .map(drop)
        .ok_or_else(|| unparsable(ArgType::DateTime, value))
}

fn validate_boolean(value: &str, _allowed: &[String]) -> Result<(), InvalidReason> {
    parse_bool(value)
        .map(drop)
        .ok_or_else(|| unparsable(ArgType::Boolean, value))
}

fn validate_file(value: &str, _allowed: &[String]) -> Result<(), InvalidReason> {
    let path = Path::new(value);
    if !path.is_file() {
        return Err(InvalidReason::FileNotFound);
    }
    File::open(path)
        .map(drop)
        .map_err(|_| InvalidReason::FileUnreadable)
}

fn validate_process_id(value: &str, _allowed: &[String]) -> Result<(), InvalidReason> {
    let pid = value
        .trim()
        .parse::<i32>()
        .map_err(|_| unparsable(ArgType::ProcessId, value))?;
    let pid = u32::try_from(pid).map_err(|_| InvalidReason::NoSuchProcess)?;
    if process_exists(pid) {
        Ok(())
    } else {
        Err(InvalidReason::NoSuchProcess)
    }
}

fn process_exists(pid: u32) -> bool {
    let pid = Pid::from_u32(pid);
    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    sys.process(pid).is_some()
}

fn validate_url(value: &str, _allowed: &[String]) -> Result<(), InvalidReason> {
    // `Url::parse` only succeeds for absolute URLs (a scheme is mandatory).
    url::Url::parse(value)
        .map(drop)
        .map_err(|_| InvalidReason::MalformedUrl)
}

fn validate_choice(value: &str, allowed: &[String]) -> Result<(), InvalidReason> {
    if allowed.iter().any(|v| v == value) {
        Ok(())
    } else {
        Err(InvalidReason::NotAllowed {
            allowed: allowed.to_vec(),
        })
    }
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%b %d, %Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%b %d, %Y", "%B %d, %Y"];

/// Parse a calendar date/time.
///
/// Accepts RFC 3339 (the offset is dropped, keeping local wall-clock time),
/// `YYYY-MM-DD[( |T)HH:MM[:SS]]`, `YYYY/MM/DD[ HH:MM[:SS]]`,
/// `MM/DD/YYYY[ HH:MM[:SS]]` and month names such as `Jan 2, 2024`.
/// Date-only forms resolve to midnight.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn choices() -> Vec<String> {
        vec!["csv".to_string(), "json".to_string()]
    }

    #[test]
    fn integer_widths_are_enforced() {
        assert!(ArgType::Int.validate("42", &[]).is_ok());
        assert!(ArgType::Int.validate(" -7 ", &[]).is_ok());
        assert!(ArgType::Int.validate("3000000000", &[]).is_err());
        assert!(ArgType::Long.validate("3000000000", &[]).is_ok());
        assert!(ArgType::Long.validate("1.5", &[]).is_err());
        assert_eq!(
            ArgType::Int.validate("x", &[]),
            Err(InvalidReason::Unparsable {
                expected: ArgType::Int,
                value: "x".to_string()
            })
        );
    }

    #[test]
    fn boolean_is_case_insensitive() {
        for ok in ["true", "FALSE", "True", " false "] {
            assert!(ArgType::Boolean.validate(ok, &[]).is_ok(), "{ok}");
        }
        for bad in ["yes", "1", ""] {
            assert!(ArgType::Boolean.validate(bad, &[]).is_err(), "{bad}");
        }
    }

    #[test]
    fn datetime_accepts_common_layouts() {
        let dt = parse_datetime("2024-02-29 13:45:10").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 2, 29));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (13, 45, 10));

        let midnight = parse_datetime("12/31/2023").unwrap();
        assert_eq!((midnight.month(), midnight.day(), midnight.hour()), (12, 31, 0));

        let rfc = parse_datetime("2024-01-02T03:04:05+09:00").unwrap();
        assert_eq!(rfc.hour(), 3);

        let slashed = parse_datetime("2024/01/02").unwrap();
        assert_eq!((slashed.year(), slashed.month(), slashed.day()), (2024, 1, 2));

        let no_seconds = parse_datetime("2024-01-02T03:04").unwrap();
        assert_eq!((no_seconds.hour(), no_seconds.minute()), (3, 4));

        let named = parse_datetime("Jan 2, 2024").unwrap();
        assert_eq!((named.month(), named.day()), (1, 2));
        assert_eq!(parse_datetime("January 2, 2024"), Some(named));

        assert!(parse_datetime("2023-02-29").is_none());
        assert!(ArgType::DateTime.validate("yesterday", &[]).is_err());
    }

    #[test]
    fn string_accepts_anything() {
        assert!(ArgType::String.validate("", &[]).is_ok());
        assert!(ArgType::String.validate("select 1", &[]).is_ok());
    }

    #[test]
    fn choice_requires_exact_match() {
        assert!(ArgType::Choice.validate("csv", &choices()).is_ok());
        assert_eq!(
            ArgType::Choice.validate("CSV", &choices()),
            Err(InvalidReason::NotAllowed { allowed: choices() })
        );
    }

    #[test]
    fn url_must_be_absolute() {
        assert!(ArgType::Url.validate("https://example.com/upload", &[]).is_ok());
        assert_eq!(
            ArgType::Url.validate("example.com/upload", &[]),
            Err(InvalidReason::MalformedUrl)
        );
        assert_eq!(
            ArgType::Url.validate("/relative/path", &[]),
            Err(InvalidReason::MalformedUrl)
        );
    }

    #[test]
    fn file_must_exist() {
        let existing = env!("CARGO_MANIFEST_DIR").to_string() + "/Cargo.toml";
        assert!(ArgType::File.validate(&existing, &[]).is_ok());
        assert_eq!(
            ArgType::File.validate("/definitely/not/here.sql", &[]),
            Err(InvalidReason::FileNotFound)
        );
        assert_eq!(
            ArgType::File.validate(env!("CARGO_MANIFEST_DIR"), &[]),
            Err(InvalidReason::FileNotFound)
        );
    }

    #[test]
    fn process_id_must_be_running() {
        let me = std::process::id().to_string();
        assert!(ArgType::ProcessId.validate(&me, &[]).is_ok());
        assert_eq!(
            ArgType::ProcessId.validate(&i32::MAX.to_string(), &[]),
            Err(InvalidReason::NoSuchProcess)
        );
        assert_eq!(
            ArgType::ProcessId.validate("-1", &[]),
            Err(InvalidReason::NoSuchProcess)
        );
        assert!(matches!(
            ArgType::ProcessId.validate("init", &[]),
            Err(InvalidReason::Unparsable { .. })
        ));
    }

    #[test]
    fn serde_names_are_kebab_case() {
        let t: ArgType = serde_json::from_str("\"process-id\"").unwrap();
        assert_eq!(t, ArgType::ProcessId);
        assert_eq!(serde_json::to_string(&ArgType::DateTime).unwrap(), "\"date-time\"");
        assert_eq!(ArgType::default(), ArgType::String);
    }
}
