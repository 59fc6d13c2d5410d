//! A mock prepared-statement connection and a harness asserting on the SQL it
//! would have sent.
//!
//! # Usage
//!
//! Hand a [`Connection`] to the code under test. It prepares and executes
//! statements as it would against a real database:
//!
//! ```ignore
//! fn find_user(db: &sqlmock::Connection, name: &str, age: u32) {
//!     let stmt = db.prepare("SELECT * FROM users WHERE name = ? AND age = ?");
//!     stmt.execute(sqlmock::params![name, age]);
//!     while let Some(row) = stmt.fetch() {
//!         ...
//!     }
//! }
//! ```
//!
//! Then check the query with its placeholders filled in:
//!
//! ```ignore
//! let db = sqlmock::Connection::default();
//! let mut tester = sqlmock::Tester::new(db.clone());
//!
//! find_user(&db, "Fred", 10);
//! tester.check_equal("find user", r#"SELECT * FROM users WHERE name = "Fred" AND age = "10""#)?;
//! tester.report()?;
//! ```
//!
//! The bound query is only good for comparison. Values are quoted, not escaped.

pub mod binder;
pub mod connection;
pub mod error;
pub mod format;
pub mod harness;
pub mod statement;
pub mod value;

pub use self::binder::*;
pub use self::connection::*;
pub use self::error::*;
pub use self::harness::*;
pub use self::statement::*;
pub use self::value::*;
