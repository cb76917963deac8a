use allocation::InvestorId;
use thiserror::Error;

/// Errors that can occur when reading or saving the project.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("only management can modify the project")]
    Forbidden,
    #[error("investor id {0} is used more than once")]
    DuplicateInvestorId(InvestorId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors raised while editing a draft. The draft is unchanged when one is returned.
#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("'{value}' is not a valid number for {field}")]
    InvalidNumericText { field: &'static str, value: String },
    #[error("investor {0} not found")]
    InvestorNotFound(InvestorId),
}

/// Errors reported by the persistence and user stores.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
