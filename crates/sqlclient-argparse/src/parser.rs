use std::io::Write;
use std::path::Path;
use std::process;

use crate::error::{ParseError, ParseResult, SchemaError};
use crate::help::render_help;
use crate::matches::Matches;
use crate::resolve::SwitchResolver;
use crate::spec::ArgSpec;
use crate::types::ArgType;

/// Exit status used after printing usage, for `--help` and for errors alike.
///
/// Callers have historically relied on a zero status even when validation
/// fails, so errors are not distinguished here.
// TODO: switch errors to a non-zero status once downstream scripts stop checking for 0.
pub const HELP_EXIT_CODE: i32 = 0;

const HELP_SHORT: &str = "-h";
const HELP_LONG: &str = "--help";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Matches(Matches),
    /// `-h`/`--help` was seen; carries the rendered usage text.
    Help(String),
}

enum Token<'t> {
    Help,
    Switch(&'t str),
    Bare(&'t str),
}

fn classify(token: &str) -> Token<'_> {
    if token == HELP_SHORT || token == HELP_LONG {
        Token::Help
    } else if token.starts_with('-') {
        Token::Switch(token)
    } else {
        Token::Bare(token)
    }
}

/// Where the scan is relative to the last switch it saw.
enum Cursor<'s> {
    /// No switch seen yet; bare tokens are dropped.
    Seeking,
    /// Bare tokens overwrite the value of this long name.
    AwaitingAssociation(&'s str),
}

/// Parses argv against a fixed list of [`ArgSpec`]s.
#[derive(Debug, Clone)]
pub struct ArgParser {
    program: String,
    specs: Vec<ArgSpec>,
    resolver: SwitchResolver,
}

impl ArgParser {
    /// Build a parser, checking the schema for conflicts.
    pub fn new(specs: Vec<ArgSpec>) -> Result<Self, SchemaError> {
        for spec in &specs {
            check_spec(spec)?;
        }
        let resolver = SwitchResolver::new(&specs)?;
        Ok(Self {
            program: default_program(),
            specs,
            resolver,
        })
    }

    /// Build a parser from a JSON array of switch specs.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let specs: Vec<ArgSpec> =
            serde_json::from_str(json).map_err(|e| SchemaError::Json(e.to_string()))?;
        Self::new(specs)
    }

    /// Program name shown in the usage banner.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn specs(&self) -> &[ArgSpec] {
        &self.specs
    }

    pub fn help(&self) -> String {
        render_help(&self.program, &self.specs, "")
    }

    /// Usage text headed by `err`.
    pub fn help_for_error(&self, err: &ParseError) -> String {
        render_help(&self.program, &self.specs, &err.to_string())
    }

    /// Parse `argv` (without the program name).
    ///
    /// Stops at the first failure. A help token returns
    /// [`ParseOutcome::Help`] as soon as it is reached.
    pub fn parse<I, S>(&self, argv: I) -> ParseResult<ParseOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut matches = Matches::default();
        let mut cursor = Cursor::Seeking;

        for arg in argv {
            let arg = arg.as_ref();
            match classify(arg) {
                Token::Help => return Ok(ParseOutcome::Help(self.help())),
                Token::Switch(token) => {
                    let spec = self
                        .resolver
                        .resolve(token)
                        .map(|idx| &self.specs[idx])
                        .ok_or_else(|| ParseError::UnknownSwitch(token.to_string()))?;
                    let name = spec.long_name.as_str();
                    if matches.contains(name) {
                        return Err(ParseError::DuplicateSwitch(name.to_string()));
                    }
                    tracing::trace!(switch = token, name, "resolved switch");
                    matches.insert(name, &spec.default_value);
                    cursor = Cursor::AwaitingAssociation(name);
                }
                Token::Bare(value) => match cursor {
                    Cursor::AwaitingAssociation(name) => matches.insert(name, value),
                    Cursor::Seeking => tracing::trace!("ignoring bare token before any switch"),
                },
            }
        }

        self.fill_defaults(&mut matches);
        self.check_required(&matches)?;
        self.check_types(&matches)?;

        Ok(ParseOutcome::Matches(matches))
    }

    /// Parse `argv`, printing usage and exiting the process on help or error.
    pub fn parse_or_exit<I, S>(&self, argv: I) -> Matches
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.parse(argv) {
            Ok(ParseOutcome::Matches(matches)) => matches,
            Ok(ParseOutcome::Help(text)) => exit_with_usage(&text),
            Err(err) => {
                tracing::debug!(
                    switch = err.switch_name(),
                    kind = err.kind(),
                    "argument validation failed"
                );
                exit_with_usage(&self.help_for_error(&err))
            }
        }
    }

    /// [`parse_or_exit`](Self::parse_or_exit) over the current process arguments.
    pub fn parse_env(&self) -> Matches {
        self.parse_or_exit(std::env::args().skip(1))
    }

    fn fill_defaults(&self, matches: &mut Matches) {
        for spec in &self.specs {
            if spec.has_default() && !matches.contains(&spec.long_name) {
                tracing::trace!(name = %spec.long_name, "applying default");
                matches.insert(&spec.long_name, &spec.default_value);
            }
        }
    }

    fn check_required(&self, matches: &Matches) -> ParseResult<()> {
        match self
            .specs
            .iter()
            .find(|s| s.required && !matches.contains(&s.long_name))
        {
            Some(spec) => Err(ParseError::MissingRequired(spec.long_name.clone())),
            None => Ok(()),
        }
    }

    fn check_types(&self, matches: &Matches) -> ParseResult<()> {
        for spec in &self.specs {
            let Some(value) = matches.raw(&spec.long_name) else {
                continue;
            };
            if !spec.required && value.is_empty() {
                continue;
            }
            spec.arg_type
                .validate(value, &spec.valid_values)
                .map_err(|reason| ParseError::InvalidValue {
                    name: spec.long_name.clone(),
                    reason,
                })?;
        }
        Ok(())
    }
}

fn exit_with_usage(text: &str) -> ! {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
    process::exit(HELP_EXIT_CODE)
}

fn check_spec(spec: &ArgSpec) -> Result<(), SchemaError> {
    for name in [&spec.long_name, &spec.short_name] {
        if name.is_empty() {
            return Err(SchemaError::EmptyName);
        }
        if name.starts_with('-') {
            return Err(SchemaError::DashedName(name.clone()));
        }
    }
    if spec.long_name == "help" || spec.short_name == "h" {
        let reserved = if spec.short_name == "h" {
            &spec.short_name
        } else {
            &spec.long_name
        };
        return Err(SchemaError::ReservedName(reserved.clone()));
    }
    match (spec.arg_type, spec.valid_values.is_empty()) {
        (ArgType::Choice, true) => Err(SchemaError::EmptyChoice(spec.long_name.clone())),
        (ArgType::Choice, false)
            if spec.has_default() && !spec.valid_values.contains(&spec.default_value) =>
        {
            Err(SchemaError::DefaultNotAllowed {
                name: spec.long_name.clone(),
                default: spec.default_value.clone(),
            })
        }
        (ArgType::Choice, false) | (_, true) => Ok(()),
        (arg_type, false) => Err(SchemaError::UnexpectedChoices {
            name: spec.long_name.clone(),
            arg_type,
        }),
    }
}

fn default_program() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "program".to_string())
}
