use crate::endpoint::EndpointId;
use core::fmt;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// An output or input index is outside of the endpoint's declared ports.
    #[error("{port} index {index} is out of range for an endpoint with {count} {port}s")]
    IndexSize {
        port: Port,
        index: usize,
        count: usize,
    },

    /// There is no such edge to remove.
    #[error("no connection to {destination} from output {output} to input {input}")]
    InvalidAccess {
        destination: EndpointId,
        output: usize,
        input: usize,
    },

    /// The endpoints belong to different contexts.
    #[error("cannot connect endpoints that belong to different contexts")]
    ContextMismatch,

    /// The graph that owned the endpoint has been dropped.
    #[error("the graph owning this endpoint no longer exists")]
    Lifetime,

    #[error(transparent)]
    Automation(#[from] automation::Error),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Port {
    Output,
    Input,
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output => write!(f, "output"),
            Self::Input => write!(f, "input"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
