use thiserror::Error;

use crate::types::ArgType;

/// A user-input failure detected while parsing argv.
///
/// Every variant is rendered as the `Error:` header above the usage text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown switch: {0}")]
    UnknownSwitch(String),

    #[error("duplicate switch: {0}")]
    DuplicateSwitch(String),

    #[error("Field {0} is required but is missing.")]
    MissingRequired(String),

    #[error("{name} - {reason}")]
    InvalidValue { name: String, reason: InvalidReason },
}

impl ParseError {
    /// Long name of the switch the error is about, if it resolved to one.
    pub fn switch_name(&self) -> Option<&str> {
        match self {
            Self::UnknownSwitch(_) => None,
            Self::DuplicateSwitch(name)
            | Self::MissingRequired(name)
            | Self::InvalidValue { name, .. } => Some(name),
        }
    }

    /// Short tag for the failure, free of any user-supplied text.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownSwitch(_) => "unknown-switch",
            Self::DuplicateSwitch(_) => "duplicate-switch",
            Self::MissingRequired(_) => "missing-required",
            Self::InvalidValue { reason, .. } => reason.kind(),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Why a stored value failed its type check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("'{value}' is not a valid {expected}")]
    Unparsable { expected: ArgType, value: String },

    #[error("File does not exist")]
    FileNotFound,

    #[error("File is not readable")]
    FileUnreadable,

    #[error("Process does not exist")]
    NoSuchProcess,

    #[error("Invalid URL.")]
    MalformedUrl,

    #[error("Invalid option.  The only valid options are : {}", .allowed.join(","))]
    NotAllowed { allowed: Vec<String> },
}

impl InvalidReason {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unparsable { .. } => "unparsable",
            Self::FileNotFound => "file-not-found",
            Self::FileUnreadable => "file-unreadable",
            Self::NoSuchProcess => "no-such-process",
            Self::MalformedUrl => "malformed-url",
            Self::NotAllowed { .. } => "not-allowed",
        }
    }
}

/// A malformed switch schema. These are programmer errors, reported when the
/// parser is built rather than when argv is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("switch name must not be empty")]
    EmptyName,

    #[error("switch name '{0}' must not start with '-'")]
    DashedName(String),

    #[error("switch name '{0}' is reserved for help")]
    ReservedName(String),

    #[error("arg definition conflict: --{0} is declared more than once")]
    DuplicateLongName(String),

    #[error("arg definition conflict: -{short} maps to both '{first}' and '{second}'")]
    DuplicateShortName {
        short: String,
        first: String,
        second: String,
    },

    #[error("'{0}' is a choice switch but declares no valid values")]
    EmptyChoice(String),

    #[error("'{name}' defaults to '{default}', which is not one of its valid values")]
    DefaultNotAllowed { name: String, default: String },

    #[error("'{name}' declares valid values but has type {arg_type}")]
    UnexpectedChoices { name: String, arg_type: ArgType },

    #[error("failed to parse switch schema JSON: {0}")]
    Json(String),
}

/// Why a typed read from [`Matches`](crate::Matches) produced no value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("no value for '{0}'")]
    Absent(String),

    #[error("value '{value}' for '{key}' is not a valid {target}")]
    Invalid {
        key: String,
        value: String,
        target: &'static str,
    },
}
