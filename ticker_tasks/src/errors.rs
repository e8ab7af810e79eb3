use thiserror::Error;

pub type TickerResult<T> = Result<T, TickerError>;

#[derive(Debug, Error)]
pub enum TickerError {
    #[error("Tick receiver for `{0}` was dropped while the ticker was still running")]
    SinkClosed(String),
}
