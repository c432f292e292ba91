#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("channel index {channel} is out of range for a buffer with {num_channels} channels")]
    IndexSize { channel: usize, num_channels: usize },

    #[error("offset {offset} is out of range for a buffer of length {length}")]
    Range { offset: usize, length: usize },

    #[error("unsupported buffer shape: {0}")]
    NotSupported(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
