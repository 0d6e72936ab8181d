use crate::spec::ArgSpec;

fn format_switch(spec: &ArgSpec) -> String {
    format!("-{}, --{}", spec.short_name, spec.long_name)
}

fn format_help(spec: &ArgSpec) -> String {
    let mut out = spec.help.trim().to_string();
    let mut push = |extra: String| {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&extra);
    };
    if !spec.valid_values.is_empty() {
        push(format!("[possible values: {}]", spec.valid_values.join(", ")));
    }
    if spec.has_default() {
        push(format!("[default: {}]", spec.default_value));
    }
    out
}

fn push_section(out: &mut String, title: &str, specs: &[&ArgSpec], width: usize) {
    out.push_str(&format!("\n{title}:\n"));
    for spec in specs {
        let left = format_switch(spec);
        let help = format_help(spec);
        if help.is_empty() {
            out.push_str(&format!("  {left}\n"));
        } else {
            out.push_str(&format!("  {left:width$}  {help}\n"));
        }
    }
}

/// Render usage text for `specs`.
///
/// A non-empty `message` is printed first as an `Error:` header. The
/// `Optional:` section is omitted when every switch is required.
pub fn render_help(program: &str, specs: &[ArgSpec], message: &str) -> String {
    let mut out = String::new();
    if !message.is_empty() {
        out.push_str(&format!("Error: {message}\n\n"));
    }
    out.push_str(&format!("Usage: {program} <options>\n"));

    let (required, optional): (Vec<&ArgSpec>, Vec<&ArgSpec>) =
        specs.iter().partition(|s| s.required);
    let width = specs
        .iter()
        .map(|s| format_switch(s).len())
        .max()
        .unwrap_or(0);

    push_section(&mut out, "Required", &required, width);
    if !optional.is_empty() {
        push_section(&mut out, "Optional", &optional, width);
    }
    out
}
