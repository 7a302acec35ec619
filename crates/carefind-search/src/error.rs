use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// Caller contract violation (e.g. a zero result limit).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("query scheduler has stopped")]
    SchedulerClosed,
}
