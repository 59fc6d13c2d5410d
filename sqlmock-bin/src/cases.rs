use std::io::Write;
use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use chrono::Local;
use quick_junit::{NonSuccessKind, TestCase, TestCaseStatus, TestSuite};
use serde::Deserialize;
use sqlmock::{Tester, Value};

/// One check in a case file.
///
/// ```json
/// { "name": "find user", "query": "SELECT * FROM users WHERE name = ?",
///   "params": ["Fred"], "expected": "SELECT * FROM users WHERE name = \"Fred\"" }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Case {
    pub name: String,
    pub query: String,
    #[serde(default)]
    pub params: Vec<serde_json::Value>,
    pub expected: String,
}

impl Case {
    /// Converts the JSON parameters into bound values. Only scalars are accepted.
    pub fn values(&self) -> Result<Vec<Value>> {
        self.params.iter().map(json_to_value).collect()
    }
}

fn json_to_value(value: &serde_json::Value) -> Result<Value> {
    use serde_json::Value as Json;

    let value = match value {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => Value::Int(i),
            (None, Some(u), _) => Value::UInt(u),
            (None, None, Some(x)) => Value::Float(x),
            (None, None, None) => bail!("unsupported number `{n}`"),
        },
        Json::String(s) => Value::Text(s.clone()),
        Json::Array(_) | Json::Object(_) => {
            bail!("unsupported parameter `{value}`: only scalars can be bound")
        }
    };
    Ok(value)
}

/// Reads a JSON array of [`Case`]s, rejecting cases whose parameters cannot be
/// bound.
pub fn load_cases(filename: impl AsRef<Path>) -> Result<Vec<Case>> {
    let filename = filename.as_ref();
    let text = fs_err::read_to_string(filename)?;
    let cases: Vec<Case> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse case file `{}`", filename.display()))?;

    for case in &cases {
        case.values().with_context(|| {
            format!("invalid case `{}` in `{}`", case.name, filename.display())
        })?;
    }
    Ok(cases)
}

/// Prepares and executes each case on the tester's connection, then checks the
/// bound query. Every case ends up in `test_suite`.
pub fn run_cases<W: Write>(
    tester: &mut Tester<W>,
    cases: &[Case],
    classname: &str,
    test_suite: &mut TestSuite,
) -> Result<()> {
    for case in cases {
        let start = Instant::now();

        let stmt = tester.connection().prepare(case.query.as_str());
        stmt.execute(case.values()?);
        let passed = tester.check_equal(&case.name, &case.expected)?;

        let status = if passed {
            TestCaseStatus::success()
        } else {
            let mut status = TestCaseStatus::non_success(NonSuccessKind::Failure);
            status.set_type("query mismatch");
            status
        };
        let mut test_case = TestCase::new(case.name.as_str(), status);
        if !passed {
            if let Some(failure) = tester.ledger().failed().last() {
                test_case.set_system_err(format!(
                    "Expected: {}\nActual: {}",
                    failure.expected(),
                    failure.actual()
                ));
            }
        }
        test_case.set_time(start.elapsed());
        test_case.set_timestamp(Local::now());
        test_case.set_classname(classname);
        test_suite.add_test_case(test_case);
    }
    Ok(())
}
