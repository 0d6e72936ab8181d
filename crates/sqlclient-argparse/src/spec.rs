use serde::{Deserialize, Serialize};

use crate::types::ArgType;

/// Declarative description of one recognized switch.
///
/// `long_name` is the canonical key in [`Matches`](crate::Matches); `short_name`
/// is an alternate lookup form. Both are stored without leading dashes.
/// An empty `default_value` means the switch has no default.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArgSpec {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default_value: String,
    #[serde(default, rename = "type")]
    pub arg_type: ArgType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub valid_values: Vec<String>,
}

impl ArgSpec {
    /// An optional string switch with no help text and no default.
    pub fn new(long_name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            long_name: long_name.into(),
            short_name: short_name.into(),
            ..Default::default()
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn arg_type(mut self, arg_type: ArgType) -> Self {
        self.arg_type = arg_type;
        self
    }

    /// Restrict the switch to `values`. Also sets the type to [`ArgType::Choice`].
    pub fn choices<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arg_type = ArgType::Choice;
        self.valid_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_default(&self) -> bool {
        !self.default_value.is_empty()
    }
}
