//! Line formatting for harness output.

use owo_colors::OwoColorize;

/// Environment variable whose presence marks a request served over HTTP (CGI).
pub const REQUEST_MARKER_ENV_KEY: &str = "HTTP_USER_AGENT";

/// Wraps a line of harness output for the context it is printed in.
pub trait LineFormatter {
    /// Returns `line` ready to be written, including the line terminator.
    fn format_line(&self, line: &str) -> String;
}

/// Plain text for a terminal, one line per entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainText {
    /// Color the `PASS`/`FAIL` label.
    pub colorize: bool,
}

impl PlainText {
    pub fn new(colorize: bool) -> Self {
        PlainText { colorize }
    }
}

impl LineFormatter for PlainText {
    fn format_line(&self, line: &str) -> String {
        if self.colorize {
            if let Some(rest) = line.strip_prefix("PASS:") {
                return format!("{}{rest}\n", "PASS:".bright_green());
            }
            if let Some(rest) = line.strip_prefix("FAIL:") {
                return format!("{}{rest}\n", "FAIL:".bright_red());
            }
        }
        format!("{line}\n")
    }
}

/// One HTML paragraph per line, for output served to a browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct Html;

impl LineFormatter for Html {
    fn format_line(&self, line: &str) -> String {
        let mut escaped = String::with_capacity(line.len());
        for c in line.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                c => escaped.push(c),
            }
        }
        format!("<p>{escaped}</p>\n")
    }
}

/// Whether the process is serving an HTTP request.
pub fn in_request_context() -> bool {
    std::env::var_os(REQUEST_MARKER_ENV_KEY).is_some()
}

/// Picks [`Html`] when running behind a web server, [`PlainText`] otherwise.
pub fn detect_formatter() -> Box<dyn LineFormatter> {
    if in_request_context() {
        Box::new(Html)
    } else {
        Box::new(PlainText::default())
    }
}
