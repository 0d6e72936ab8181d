//! Schema-driven switch parsing and validation.
//!
//! A caller declares the switches it understands as a list of [`ArgSpec`]s and
//! hands the raw argv to an [`ArgParser`]. The parser produces a validated
//! [`Matches`] (switch long name to raw string value) or renders usage text.
//!
//! - `--long value` / `-s value` pairs, in any order, each switch at most once
//! - `-h` / `--help` anywhere renders usage
//! - defaults fill switches that were never mentioned
//! - required switches and typed values are checked after the scan
//!
//! ```no_run
//! use sqlclient_argparse::{ArgParser, ArgSpec, ArgType};
//!
//! let parser = ArgParser::new(vec![
//!     ArgSpec::new("name", "n").required(true).help("who to greet"),
//!     ArgSpec::new("count", "c").arg_type(ArgType::Int).default_value("1"),
//! ])
//! .expect("valid schema");
//!
//! let matches = parser.parse_env();
//! let count: i32 = matches.get("count");
//! ```

mod error;
mod help;
mod matches;
mod parser;
mod resolve;
mod spec;
mod types;

pub use error::{AccessError, InvalidReason, ParseError, ParseResult, SchemaError};
pub use help::render_help;
pub use matches::{FromArgValue, Matches};
pub use parser::{ArgParser, HELP_EXIT_CODE, ParseOutcome};
pub use resolve::SwitchResolver;
pub use spec::ArgSpec;
pub use types::{ArgType, Validator, parse_datetime};
