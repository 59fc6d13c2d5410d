use std::cell::RefCell;
use std::rc::Rc;

use crate::{bind, Error, Result, Value};

/// Number of rows a statement yields before reporting the end of results.
pub const FETCH_LIMIT: usize = 4;

/// A row returned by [`Statement::fetch`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<(&'static str, Value)>,
}

impl Row {
    /// The fixed row every statement yields, whatever its query.
    fn fake() -> Self {
        Row {
            columns: vec![
                ("name", Value::from("Fred")),
                ("age", Value::from(10)),
                ("id", Value::from("1")),
            ],
        }
    }

    /// Returns the value of `column`, if the row has it.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    /// Column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|(name, _)| *name)
    }

    /// Column names paired with their values, in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.columns.iter().map(|(name, value)| (*name, value))
    }
}

#[derive(Debug)]
struct State {
    query: String,
    parameters: Option<Vec<Value>>,
    /// Starts at 1 and stops moving once it passes [`FETCH_LIMIT`].
    position: usize,
}

/// A mock prepared statement.
///
/// Cloning a `Statement` yields another handle to the same statement, which is
/// how the [`Connection`](crate::Connection) keeps seeing the values a caller
/// executes it with.
#[derive(Debug, Clone)]
pub struct Statement {
    state: Rc<RefCell<State>>,
}

impl Statement {
    pub(crate) fn new(query: impl Into<String>) -> Self {
        Statement {
            state: Rc::new(RefCell::new(State {
                query: query.into(),
                parameters: None,
                position: 1,
            })),
        }
    }

    /// Stores `values` as the bound parameters, replacing those of any previous
    /// execution.
    pub fn execute<I>(&self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        let mut state = self.state.borrow_mut();
        tracing::debug!(query = %state.query, ?values, "execute");
        state.parameters = Some(values);
    }

    /// Returns the next row, or `None` once [`FETCH_LIMIT`] rows have been
    /// fetched. The end of results is sticky.
    pub fn fetch(&self) -> Option<Row> {
        let mut state = self.state.borrow_mut();
        if state.position > FETCH_LIMIT {
            tracing::trace!(query = %state.query, "end of results");
            return None;
        }
        state.position += 1;
        Some(Row::fake())
    }

    /// Fetches all remaining rows.
    pub fn fetch_all(&self) -> Vec<Row> {
        std::iter::from_fn(|| self.fetch()).collect()
    }

    /// The query this statement was prepared with.
    pub fn query(&self) -> String {
        self.state.borrow().query.clone()
    }

    /// The parameters of the latest execution.
    pub fn parameters(&self) -> Option<Vec<Value>> {
        self.state.borrow().parameters.clone()
    }

    /// Returns the query with its placeholders substituted by the parameters of
    /// the latest execution.
    pub fn bound_query(&self) -> Result<String> {
        let state = self.state.borrow();
        match &state.parameters {
            Some(values) => bind(&state.query, values),
            None => Err(Error::NotExecuted {
                query: state.query.clone(),
            }),
        }
    }
}
