use pretty_assertions::assert_eq;
use sqlmock::format::PlainText;
use sqlmock::{params, Actual, Connection, Tester, Value};

/// Code under test: talks to whatever connection it is given.
struct Users<'a> {
    db: &'a Connection,
}

#[derive(Debug, PartialEq)]
struct User {
    id: String,
    name: String,
    age: i64,
}

impl Users<'_> {
    fn find(&self, name: &str, age: u32) -> Vec<User> {
        let stmt = self
            .db
            .prepare("SELECT * FROM users WHERE name = ? AND age = ?");
        stmt.execute(params![name, age]);

        let mut users = vec![];
        while let Some(row) = stmt.fetch() {
            let text = |column: &str| {
                row.get(column)
                    .map(ToString::to_string)
                    .unwrap_or_default()
            };
            users.push(User {
                id: text("id"),
                name: text("name"),
                age: match row.get("age") {
                    Some(Value::Int(age)) => *age,
                    _ => -1,
                },
            });
        }
        users
    }

    fn rename(&self, id: u32, name: Option<&str>) -> u64 {
        self.db.set_attribute("ATTR_ERRMODE", "ERRMODE_EXCEPTION");
        self.db
            .prepare("UPDATE users SET name = ? WHERE id = ?")
            .execute(params![name, id]);
        self.db.last_insert_id()
    }
}

fn tester(db: &Connection) -> Tester<Vec<u8>> {
    Tester::with_output(db.clone(), Box::new(PlainText::default()), vec![])
}

#[test]
fn test_find_user() {
    let db = Connection::new("mysql:host=localhost;dbname=app");
    let mut tester = tester(&db);

    let users = Users { db: &db }.find("Fred", 10);
    assert_eq!(users.len(), 4);
    assert_eq!(
        users[0],
        User {
            id: "1".to_string(),
            name: "Fred".to_string(),
            age: 10,
        }
    );

    let stmt = db.last_statement().unwrap();
    assert!(stmt.fetch().is_none());
    let columns: Vec<_> = Connection::default()
        .prepare("SELECT * FROM users")
        .fetch()
        .unwrap()
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    assert_eq!(columns, ["name=Fred", "age=10", "id=1"]);

    assert!(tester
        .check_equal(
            "find user",
            "SELECT * FROM users WHERE name = \"Fred\" AND age = \"10\""
        )
        .unwrap());
    assert!(!tester
        .check_equal("find user wrong", "SELECT * FROM users WHERE name = \"Bob\"")
        .unwrap());

    let failure = &tester.ledger().failed()[0];
    assert_eq!(failure.expected(), "SELECT * FROM users WHERE name = \"Bob\"");
    assert_eq!(
        failure.actual(),
        &Actual::Query("SELECT * FROM users WHERE name = \"Fred\" AND age = \"10\"".to_string())
    );
}

#[test]
fn test_null_renders_empty() {
    let db = Connection::default();
    let mut tester = tester(&db);

    assert_eq!(Users { db: &db }.rename(7, None), 0);
    assert!(tester
        .check_equal("clear name", "UPDATE users SET name = \"\" WHERE id = \"7\"")
        .unwrap());
}

#[test]
fn test_checks_follow_last_prepared_query() {
    let db = Connection::default();
    let mut tester = tester(&db);
    let users = Users { db: &db };

    users.find("Ann", 31);
    users.rename(2, Some("Annie"));
    assert!(!tester
        .check_equal(
            "stale find",
            "SELECT * FROM users WHERE name = \"Ann\" AND age = \"31\""
        )
        .unwrap());
    assert!(tester
        .check_equal("rename", "UPDATE users SET name = \"Annie\" WHERE id = \"2\"")
        .unwrap());
}
