use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{value} is not included in {allowed}")]
    NotIncluded { value: String, allowed: String },
    #[error("{token:?} is not included in {allowed}")]
    TokenNotIncluded { token: String, allowed: String },
    #[error("{0} is not a boolean value")]
    NotBoolean(String),
    #[error("{0} is invalid format")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("`--limit` must be between {min} and {max} (got {limit})")]
    LimitOutOfRange { limit: u32, min: u32, max: u32 },
    #[error("unknown qualifier: {0}")]
    UnknownQualifier(String),
    #[error("duplicate qualifier label: {0}")]
    DuplicateLabel(String),
    #[error("duplicate qualifier key: {0}")]
    DuplicateKey(String),
    #[error("qualifier key must not be empty (label: {0})")]
    EmptyKey(String),
    #[error(transparent)]
    InvalidValue(#[from] ValidationError),
}
