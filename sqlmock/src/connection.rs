use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use crate::{Error, Result, Statement};

/// A mock database connection.
///
/// It never talks to a database: [`prepare`](Connection::prepare) hands out
/// [`Statement`]s and the connection remembers the latest one so its bound
/// query can be checked afterwards.
///
/// Clones share the remembered statement. Give one clone to the code under test
/// and another to the [`Tester`](crate::Tester).
#[derive(Debug, Clone, Default)]
pub struct Connection {
    last: Rc<RefCell<Option<Statement>>>,
}

impl Connection {
    /// Creates a connection. The connection string is ignored.
    pub fn new(dsn: impl AsRef<str>) -> Self {
        tracing::trace!(dsn = dsn.as_ref(), "mock connection created");
        Self::default()
    }

    /// Accepted for API compatibility and ignored.
    pub fn set_attribute(&self, name: impl Display, value: impl Display) {
        tracing::trace!(%name, %value, "ignoring connection attribute");
    }

    /// Prepares a new statement and remembers it as the last one.
    pub fn prepare(&self, query: impl Into<String>) -> Statement {
        let query = query.into();
        tracing::debug!(%query, "prepare");
        let stmt = Statement::new(query);
        *self.last.borrow_mut() = Some(stmt.clone());
        stmt
    }

    /// Always `0`.
    pub fn last_insert_id(&self) -> u64 {
        0
    }

    /// The most recently prepared statement.
    pub fn last_statement(&self) -> Option<Statement> {
        self.last.borrow().clone()
    }

    /// The bound query of the most recently prepared statement.
    pub fn last_bound_query(&self) -> Result<String> {
        self.last
            .borrow()
            .as_ref()
            .ok_or(Error::NoQueryPrepared)?
            .bound_query()
    }
}
