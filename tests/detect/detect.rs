use rusty_fork::rusty_fork_test;
use sqlmock::format::{detect_formatter, REQUEST_MARKER_ENV_KEY};

// Fork a subprocess to interfere with the environment variables.
rusty_fork_test! {
    #[test]
    fn test_detect_html() {
        std::env::set_var(REQUEST_MARKER_ENV_KEY, "Mozilla/5.0");
        assert_eq!(detect_formatter().format_line("PASS: a"), "<p>PASS: a</p>\n");
    }

    #[test]
    fn test_detect_plain_text() {
        std::env::remove_var(REQUEST_MARKER_ENV_KEY);
        assert_eq!(detect_formatter().format_line("PASS: a"), "PASS: a\n");
    }
}
