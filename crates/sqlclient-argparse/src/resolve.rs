use std::collections::HashMap;

use crate::error::SchemaError;
use crate::spec::ArgSpec;

/// Looks up an [`ArgSpec`] by `--long` or `-short` form.
///
/// Matching is exact: no prefixes, no case folding, no combined short flags.
#[derive(Debug, Clone, Default)]
pub struct SwitchResolver {
    long: HashMap<String, usize>,
    short: HashMap<String, usize>,
}

impl SwitchResolver {
    /// Index `specs`, rejecting duplicate long or short names.
    pub fn new(specs: &[ArgSpec]) -> Result<Self, SchemaError> {
        let mut resolver = Self::default();
        for (idx, spec) in specs.iter().enumerate() {
            if resolver.long.insert(spec.long_name.clone(), idx).is_some() {
                return Err(SchemaError::DuplicateLongName(spec.long_name.clone()));
            }
            if let Some(prev) = resolver.short.insert(spec.short_name.clone(), idx) {
                return Err(SchemaError::DuplicateShortName {
                    short: spec.short_name.clone(),
                    first: specs[prev].long_name.clone(),
                    second: spec.long_name.clone(),
                });
            }
        }
        Ok(resolver)
    }

    /// Index of the spec a switch-like `token` names, or `None`.
    pub fn resolve(&self, token: &str) -> Option<usize> {
        if let Some(long) = token.strip_prefix("--") {
            self.long.get(long).copied()
        } else if let Some(short) = token.strip_prefix('-') {
            self.short.get(short).copied()
        } else {
            None
        }
    }
}
