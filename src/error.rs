use thiserror::Error;

pub type Result<T, E = QueryError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid transaction data: {0}")]
    Data(String),
}
