use thiserror::Error;

/// Failure taxonomy for the inspection core (spec §7). A malformed or
/// incomplete source document is never an error on its own — it just means
/// the graph contains `Context` nodes and the inspection runs to completion
/// over them. These variants only fire when the graph itself is internally
/// inconsistent, or when a caller-supplied cancellation token fires.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invariant violated: {context}")]
    InvariantViolated { context: String },

    #[error("inspection cancelled")]
    Cancelled,
}

impl Error {
    pub fn invariant(context: impl Into<String>) -> Self {
        Self::InvariantViolated {
            context: context.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
