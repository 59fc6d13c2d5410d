use pretty_assertions::assert_eq;
use sqlmock::format::PlainText;
use sqlmock::{bind, placeholder_count, Connection, Summary, Tester, Value, PLACEHOLDER};

#[test]
fn test_counts_and_failed_names() {
    let db = Connection::default();
    let mut tester = Tester::with_output(
        db.clone(),
        Box::new(PlainText::default()),
        Vec::<u8>::new(),
    );

    let checks = [
        ("insert", "INSERT INTO t VALUES (?)", 1, r#"INSERT INTO t VALUES ("1")"#),
        ("update", "UPDATE t SET a = ?", 2, r#"UPDATE t SET a = "3""#),
        ("delete", "DELETE FROM t WHERE a = ?", 3, r#"DELETE FROM t WHERE a = "3""#),
        ("select", "SELECT a FROM t WHERE a = ?", 4, "SELECT a FROM t WHERE a = 4"),
        ("update", "UPDATE t SET a = ?", 5, r#"UPDATE t SET a = "5""#),
    ];
    for (name, query, value, expected) in checks {
        db.prepare(query).execute([value]);
        tester.check_equal(name, expected).unwrap();
    }

    let summary = tester.report().unwrap();
    assert_eq!(
        summary,
        Summary {
            passed: 3,
            failed: 2
        }
    );
    assert_eq!(tester.ledger().passed(), ["insert", "delete", "update"]);

    let out = String::from_utf8(tester.output().clone()).unwrap();
    let tail: Vec<_> = out.lines().rev().take(2).collect();
    assert_eq!(
        tail,
        ["Failed tests: update, select", "3 tests passed. 2 tests failed."]
    );
}

#[test]
fn test_bound_queries_have_no_placeholders_left() {
    let templates = [
        "SELECT 1",
        "SELECT ?",
        "INSERT INTO t (a, b, c) VALUES (?, ?, ?)",
        "?,?,?,?",
    ];
    for template in templates {
        let k = placeholder_count(template);
        let values: Vec<Value> = (0..k).map(|i| Value::from(format!("v{i}"))).collect();
        let sql = bind(template, &values).unwrap();

        assert!(!sql.contains(PLACEHOLDER), "{sql}");
        let mut rest = sql.as_str();
        for i in 0..k {
            let quoted = format!("\"v{i}\"");
            let at = rest
                .find(&quoted)
                .unwrap_or_else(|| panic!("{quoted} not in order in {sql}"));
            rest = &rest[at + quoted.len()..];
        }
    }
}
