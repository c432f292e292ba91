#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The context (or a node's playback) is in the wrong state for the operation.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// An argument is not a finite number.
    #[error("type error: {0}")]
    Type(&'static str),

    /// An argument is outside of its permitted range.
    #[error("out of range: {0}")]
    Range(&'static str),

    /// An index-like argument (buffer size, FFT size, decibel range) is invalid.
    #[error("index size error: {0}")]
    IndexSize(&'static str),

    /// The configuration or data is not supported.
    #[error("not supported: {0}")]
    NotSupported(&'static str),

    #[error(transparent)]
    Graph(#[from] graph::Error),

    #[error(transparent)]
    Buffer(#[from] buffer::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
