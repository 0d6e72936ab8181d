use sqlclient_argparse::{ArgSpec, ArgType};

use crate::config::DriverRegistry;

pub const DEFAULT_DRIVER: &str = "mssql";
pub const OUTPUT_FORMATS: [&str; 2] = ["csv", "json"];

/// Switches understood by `sqlclient`. The `driver` choices come from `registry`.
pub fn switches(registry: &DriverRegistry) -> Vec<ArgSpec> {
    let drivers: Vec<&str> = registry.names().collect();
    vec![
        ArgSpec::new("driver", "d")
            .required(true)
            .help(format!("ODBC driver: {}", drivers.join(",")))
            .default_value(DEFAULT_DRIVER)
            .choices(drivers),
        ArgSpec::new("username", "u").required(true).help("username"),
        ArgSpec::new("password", "p").required(true).help("password"),
        ArgSpec::new("host", "i")
            .required(true)
            .help("the host name of the server"),
        ArgSpec::new("catalog", "c")
            .required(true)
            .help("The catalog or database"),
        ArgSpec::new("sql", "s")
            .required(true)
            .help("The sql statement to execute"),
        ArgSpec::new("output", "o")
            .help("Output type")
            .default_value("json")
            .choices(OUTPUT_FORMATS),
        ArgSpec::new("url", "e")
            .help("url where data will be posted")
            .arg_type(ArgType::Url),
    ]
}
