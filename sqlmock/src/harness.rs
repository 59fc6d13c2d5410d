//! Pass/fail bookkeeping on top of a mock [`Connection`].

use std::fmt::Display;
use std::io::{self, stdout, Stdout, Write};

use itertools::Itertools;

use crate::format::{detect_formatter, LineFormatter};
use crate::{Connection, Error};

/// What a check compared against.
#[derive(Debug, Clone, PartialEq)]
pub enum Actual {
    /// The bound query of the connection's last statement.
    Query(String),
    /// The bound query could not be produced.
    Error(Error),
}

impl Display for Actual {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Actual::Query(sql) => write!(f, "{sql}"),
            Actual::Error(e) => write!(f, "{e}"),
        }
    }
}

/// A failed check.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    name: String,
    expected: String,
    actual: Actual,
}

impl Failure {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn actual(&self) -> &Actual {
        &self.actual
    }
}

/// Counts of passed and failed checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} tests passed. {} tests failed.",
            self.passed, self.failed
        )
    }
}

/// Record of every check in the order it ran. Running the same name twice
/// records it twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    passed: Vec<String>,
    failed: Vec<Failure>,
}

impl Ledger {
    /// Names of the passed checks.
    pub fn passed(&self) -> &[String] {
        &self.passed
    }

    pub fn failed(&self) -> &[Failure] {
        &self.failed
    }

    pub fn summary(&self) -> Summary {
        Summary {
            passed: self.passed.len(),
            failed: self.failed.len(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Compares expected SQL against what a [`Connection`] would have sent, and
/// reports the outcome line by line.
///
/// # Usage
///
/// ```
/// use sqlmock::{format::PlainText, Connection, Tester};
///
/// let db = Connection::default();
/// let mut tester =
///     Tester::with_output(db.clone(), Box::new(PlainText::default()), Vec::<u8>::new());
///
/// db.prepare("SELECT * FROM users WHERE name = ?").execute(["Fred"]);
/// assert!(tester.check_equal("find user", r#"SELECT * FROM users WHERE name = "Fred""#).unwrap());
///
/// let summary = tester.report().unwrap();
/// assert_eq!(summary.to_string(), "1 tests passed. 0 tests failed.");
/// ```
pub struct Tester<W: Write = Stdout> {
    conn: Connection,
    formatter: Box<dyn LineFormatter>,
    out: W,
    ledger: Ledger,
}

impl Tester<Stdout> {
    /// Creates a tester printing to stdout, formatted for the detected context.
    pub fn new(conn: Connection) -> Self {
        Self::with_output(conn, detect_formatter(), stdout())
    }
}

impl<W: Write> Tester<W> {
    pub fn with_output(conn: Connection, formatter: Box<dyn LineFormatter>, out: W) -> Self {
        Tester {
            conn,
            formatter,
            out,
            ledger: Ledger::default(),
        }
    }

    /// Replaces the connection checks are made against. The ledger is kept.
    pub fn set_connection(&mut self, conn: Connection) {
        self.conn = conn;
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_parts(self) -> (Ledger, W) {
        (self.ledger, self.out)
    }

    /// Checks that the bound query of the connection's last statement equals
    /// `expected` exactly, records the outcome and prints it.
    ///
    /// A bound query that cannot be produced counts as a failure. The returned
    /// error is only about writing the output; the outcome is recorded before
    /// anything is written.
    pub fn check_equal(
        &mut self,
        name: impl Into<String>,
        expected: impl Into<String>,
    ) -> io::Result<bool> {
        let name = name.into();
        let expected = expected.into();
        let actual = match self.conn.last_bound_query() {
            Ok(sql) => Actual::Query(sql),
            Err(e) => Actual::Error(e),
        };

        if matches!(&actual, Actual::Query(sql) if *sql == expected) {
            tracing::info!(%name, "check passed");
            self.ledger.passed.push(name.clone());
            self.emit(&format!("PASS: {name}"))?;
            return Ok(true);
        }

        tracing::info!(%name, %expected, %actual, "check failed");
        let failure = Failure {
            name,
            expected,
            actual,
        };
        let lines = [
            format!("FAIL: {}", failure.name),
            format!("Expected: {}", failure.expected),
            format!("Actual: {}", failure.actual),
        ];
        self.ledger.failed.push(failure);
        for line in &lines {
            self.emit(line)?;
        }
        Ok(false)
    }

    /// Prints the number of passed and failed checks, followed by the names of
    /// the failed ones if there are any. The ledger is left untouched.
    pub fn report(&mut self) -> io::Result<Summary> {
        let summary = self.ledger.summary();
        tracing::info!(passed = summary.passed, failed = summary.failed, "report");

        self.emit(&summary.to_string())?;
        if summary.failed != 0 {
            let names = self.ledger.failed.iter().map(Failure::name).join(", ");
            self.emit(&format!("Failed tests: {names}"))?;
        }
        Ok(summary)
    }

    fn emit(&mut self, line: &str) -> io::Result<()> {
        self.out
            .write_all(self.formatter.format_line(line).as_bytes())?;
        self.out.flush()
    }
}
