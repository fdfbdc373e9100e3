//! Error reports that point at the source
//!
//! A report looks like:
//!
//! ```text
//! runtime error: Division by zero at line 3
//!  --> prog.c:3:14
//!   |
//! 3 |     return x / 0;
//!   |              ^
//! ```
//!
//! [`render`] draws the `error:` label and the caret with terminal colours;
//! [`render_plain`] produces the same text without escape codes.

use crossterm::style::Stylize;

use crate::Error;
use crate::parser::ast::SourceLocation;

/// Render a report with ANSI styling, for a terminal
pub fn render(error: &Error, source: &str, filename: Option<&str>) -> String {
    build(error, source, filename, true)
}

/// Render a report as plain text
pub fn render_plain(error: &Error, source: &str, filename: Option<&str>) -> String {
    build(error, source, filename, false)
}

fn build(error: &Error, source: &str, filename: Option<&str>, styled: bool) -> String {
    let label = format!("{} error:", error.phase());
    let mut out = if styled {
        format!("{} {}\n", label.red().bold(), error)
    } else {
        format!("{} {}\n", label, error)
    };

    if let Some(location) = error.location() {
        out.push_str(&source_context(location, source, filename, styled));
    }

    out
}

/// The ` --> file:line:col` line plus the quoted source line and a caret.
/// Locations outside the source only get the arrow line.
fn source_context(
    location: SourceLocation,
    source: &str,
    filename: Option<&str>,
    styled: bool,
) -> String {
    let name = filename.unwrap_or("<input>");
    let line_no = location.line.to_string();
    let gutter = " ".repeat(line_no.len());

    let mut out = format!("{gutter}--> {name}:{location}\n");

    let Some(text) = location
        .line
        .checked_sub(1)
        .and_then(|index| source.lines().nth(index))
    else {
        return out;
    };

    // Tabs are kept so the caret lines up with what the terminal shows
    let padding: String = text
        .chars()
        .take(location.column.saturating_sub(1))
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();
    let caret = if styled {
        "^".red().bold().to_string()
    } else {
        "^".to_string()
    };

    out.push_str(&format!("{gutter} |\n"));
    out.push_str(&format!("{line_no} | {text}\n"));
    out.push_str(&format!("{gutter} | {padding}{caret}\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RunConfig, run_captured};

    fn failure(source: &str) -> Error {
        run_captured(source, &RunConfig::default()).unwrap_err()
    }

    #[test]
    fn test_plain_report_points_at_column() {
        let source = "int main() {\n    return 1 / 0;\n}\n";
        let err = failure(source);
        let report = render_plain(&err, source, Some("div.c"));

        let lines: Vec<&str> = report.lines().collect();
        assert!(lines[0].starts_with("runtime error: Division by zero"));
        assert_eq!(lines[1], " --> div.c:2:14");
        assert_eq!(lines[3], "2 |     return 1 / 0;");
        assert_eq!(lines[4], "  |              ^");
    }

    #[test]
    fn test_parse_error_report() {
        let source = "int main() { return 0 }";
        let err = failure(source);
        let report = render_plain(&err, source, None);
        assert!(report.starts_with("parse error: "));
        assert!(report.contains("<input>:1:"));
    }

    #[test]
    fn test_no_location_has_no_context() {
        let source = "int helper() { return 0; }";
        let err = failure(source);
        let report = render_plain(&err, source, None);
        assert_eq!(report.lines().count(), 1);
    }

    #[test]
    fn test_styled_report_contains_escape_codes() {
        let source = "int main() { return x; }";
        let err = failure(source);
        let report = render(&err, source, None);
        assert!(report.contains("\u{1b}["));
        assert!(report.contains("return x;"));
    }
}
