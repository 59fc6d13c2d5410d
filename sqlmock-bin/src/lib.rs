mod cases;

use std::io::{stdout, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use itertools::Itertools;
use quick_junit::{Report, TestSuite};
use sqlmock::format::{in_request_context, Html, LineFormatter, PlainText};
use sqlmock::{bind, Connection, Tester, Value};

pub use self::cases::{load_cases, run_cases, Case};

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
#[must_use]
pub enum Color {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// HTML when `HTTP_USER_AGENT` is set, plain text otherwise.
    #[default]
    Auto,
    Plain,
    Html,
}

#[derive(Parser, Debug, Clone)]
#[clap(about, version, author)]
struct Opt {
    #[clap(subcommand)]
    command: Command,

    /// Whether to enable colorful output.
    #[clap(
        long,
        value_enum,
        default_value_t,
        value_name = "WHEN",
        env = "CARGO_TERM_COLOR",
        global = true
    )]
    color: Color,

    /// How each output line is wrapped.
    #[clap(long, value_enum, default_value_t, env = "SQLMOCK_FORMAT", global = true)]
    format: Format,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Print a query with its placeholders substituted by the given values.
    Bind {
        /// The query, with `?` placeholders.
        template: String,
        /// Values for the placeholders, in order.
        values: Vec<String>,
    },
    /// Run case files through the harness.
    Run {
        /// Glob(s) of JSON case files.
        /// For example: `./cases/**/*.json`
        #[clap(required = true, num_args = 1..)]
        files: Vec<String>,

        /// Report to junit XML.
        #[clap(long)]
        junit: Option<String>,
    },
}

pub fn main() -> Result<()> {
    // Harness output goes to stdout, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let Opt {
        command,
        color,
        format,
    } = Opt::parse();

    match color {
        Color::Always => {
            console::set_colors_enabled(true);
            console::set_colors_enabled_stderr(true);
        }
        Color::Never => {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
        Color::Auto => {}
    }

    let formatter = make_formatter(format);

    match command {
        Command::Bind { template, values } => {
            bind_values(&template, values, formatter.as_ref(), &mut stdout())
        }
        Command::Run { files, junit } => run_files(files, formatter, junit, stdout()),
    }
}

/// Prints `template` with its placeholders substituted by `values`.
fn bind_values(
    template: &str,
    values: Vec<String>,
    formatter: &dyn LineFormatter,
    out: &mut impl Write,
) -> Result<()> {
    let values = values.into_iter().map(Value::from).collect_vec();
    let sql = bind(template, &values)?;
    out.write_all(formatter.format_line(&sql).as_bytes())?;
    out.flush()?;
    Ok(())
}

fn make_formatter(format: Format) -> Box<dyn LineFormatter> {
    match format {
        Format::Html => Box::new(Html),
        Format::Auto if in_request_context() => Box::new(Html),
        Format::Plain | Format::Auto => Box::new(PlainText::new(console::colors_enabled())),
    }
}

/// Runs every case file matched by `glob_patterns` through one tester. Fails
/// when any case failed.
fn run_files<W: Write>(
    glob_patterns: Vec<String>,
    formatter: Box<dyn LineFormatter>,
    junit: Option<String>,
    out: W,
) -> Result<()> {
    let mut all_files = Vec::new();
    for glob_pattern in glob_patterns {
        let files: Vec<PathBuf> = glob::glob(&glob_pattern)
            .context("failed to read glob pattern")?
            .try_collect()?;
        all_files.extend(files);
    }
    if all_files.is_empty() {
        bail!("no case file found");
    }

    let mut report = Report::new(junit.clone().unwrap_or_else(|| "sqlmock".to_string()));
    report.set_timestamp(Local::now());

    let mut test_suite = TestSuite::new("sqlmock");
    test_suite.set_timestamp(Local::now());

    let mut tester = Tester::with_output(Connection::default(), formatter, out);

    for file in all_files {
        let filename = file.to_string_lossy().to_string();
        tracing::debug!(%filename, "running case file");
        let cases = load_cases(&file)?;
        run_cases(&mut tester, &cases, &filename, &mut test_suite)
            .with_context(|| format!("failed to run `{filename}`"))?;
    }

    tester.report()?;

    report.add_test_suite(test_suite);
    if let Some(junit_file) = junit {
        fs_err::write(format!("{junit_file}-junit.xml"), report.to_string()?)?;
    }

    let ledger = tester.ledger();
    if ledger.is_success() {
        Ok(())
    } else {
        let failed_cases = ledger.failed().iter().map(|f| f.name()).collect_vec();
        Err(anyhow!("some test cases failed:\n{:#?}", failed_cases))
    }
}
