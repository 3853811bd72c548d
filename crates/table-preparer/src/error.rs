use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrepareError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Empty table: {0}")]
    EmptyTable(String),

    #[error("Missing year column: {0}")]
    MissingYearColumn(String),
}

pub type PrepareResult<T> = Result<T, PrepareError>;
