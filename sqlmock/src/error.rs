/// The error type for binding and looking up mock queries.
///
/// None of these is an assertion mismatch: a check whose expected SQL differs
/// from the bound SQL is recorded in the [`Ledger`](crate::Ledger), never
/// returned as an error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("query has {placeholders} placeholders but {values} values were bound")]
    FormatMismatch { placeholders: usize, values: usize },
    #[error("no query has been prepared")]
    NoQueryPrepared,
    #[error("statement was never executed: {query}")]
    NotExecuted { query: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
