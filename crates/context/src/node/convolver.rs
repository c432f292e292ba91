use crate::{
    context::Context,
    error::{Error, Result},
};
use buffer::AudioBuffer;
use graph::{node::Options, Node};

/// Convolves its input with an impulse response.
#[derive(Clone, Debug)]
pub struct Convolver {
    pub(crate) node: Node,
    buffer: Option<AudioBuffer>,
    normalize: bool,
    sample_rate: f64,
}

impl Convolver {
    pub fn new(context: &Context) -> Self {
        let node = context.create_node(Options::new(2, 1, 1));
        Self {
            node,
            buffer: None,
            normalize: true,
            sample_rate: context.sample_rate(),
        }
    }

    pub fn buffer(&self) -> Option<&AudioBuffer> {
        self.buffer.as_ref()
    }

    /// Set the impulse response. It must have 1, 2 or 4 channels and the context's sample rate.
    pub fn set_buffer(&mut self, buffer: Option<AudioBuffer>) -> Result<()> {
        if let Some(buffer) = &buffer {
            if !matches!(buffer.number_of_channels(), 1 | 2 | 4) {
                return Err(Error::NotSupported(
                    "impulse response must have 1, 2 or 4 channels",
                ));
            }
            if buffer.sample_rate() != self.sample_rate {
                return Err(Error::NotSupported(
                    "impulse response sample rate must match the context",
                ));
            }
        }
        self.buffer = buffer;
        Ok(())
    }

    pub fn normalize(&self) -> bool {
        self.normalize
    }

    pub fn set_normalize(&mut self, normalize: bool) {
        self.normalize = normalize;
    }
}
