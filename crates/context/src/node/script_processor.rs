use crate::{
    context::{Clock, Context},
    error::{Error, Result},
};
use buffer::{AudioBuffer, MAX_CHANNELS};
use core::fmt;
use graph::{node::Options, Node};

/// The buffer size used when zero is requested.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// What a script processor hands to its callback on every dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioProcessingEvent {
    pub playback_time: f64,
    /// `None` when the processor has no input channels.
    pub input_buffer: Option<AudioBuffer>,
    /// `None` when the processor has no output channels.
    pub output_buffer: Option<AudioBuffer>,
}

pub struct ScriptProcessor {
    pub(crate) node: Node,
    buffer_size: usize,
    num_input_channels: usize,
    num_output_channels: usize,
    sample_rate: f64,
    clock: Clock,
    on_audio_process: Option<Box<dyn FnMut(&mut AudioProcessingEvent)>>,
}

impl ScriptProcessor {
    pub fn new(
        context: &Context,
        buffer_size: usize,
        num_input_channels: usize,
        num_output_channels: usize,
    ) -> Result<Self> {
        let buffer_size = match buffer_size {
            0 => DEFAULT_BUFFER_SIZE,
            256..=16384 if buffer_size.is_power_of_two() => buffer_size,
            _ => {
                return Err(Error::IndexSize(
                    "buffer size must be a power of two in 256..=16384",
                ))
            }
        };
        if num_input_channels == 0 && num_output_channels == 0 {
            return Err(Error::NotSupported(
                "input and output channel counts cannot both be zero",
            ));
        }
        if num_input_channels > MAX_CHANNELS || num_output_channels > MAX_CHANNELS {
            return Err(Error::NotSupported("channel counts must not exceed 32"));
        }
        let node = context.create_node(Options::new(num_input_channels, 1, 1));
        Ok(Self {
            node,
            buffer_size,
            num_input_channels,
            num_output_channels,
            sample_rate: context.sample_rate(),
            clock: context.clock(),
            on_audio_process: None,
        })
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub fn number_of_input_channels(&self) -> usize {
        self.num_input_channels
    }

    pub fn number_of_output_channels(&self) -> usize {
        self.num_output_channels
    }

    /// Register the processing callback. Replaces any previous callback.
    pub fn set_on_audio_process(
        &mut self,
        callback: impl FnMut(&mut AudioProcessingEvent) + 'static,
    ) {
        self.on_audio_process = Some(Box::new(callback));
    }

    /// Build a processing event with fresh buffers and deliver it. Returns `false` if no callback
    /// is registered, in which case nothing is allocated.
    pub fn dispatch(&mut self) -> Result<bool> {
        let Some(callback) = self.on_audio_process.as_mut() else {
            return Ok(false);
        };
        let (length, sample_rate) = (self.buffer_size, self.sample_rate);
        let allocate = |channels: usize| -> Result<Option<AudioBuffer>> {
            if channels == 0 {
                return Ok(None);
            }
            Ok(Some(AudioBuffer::new(channels, length, sample_rate)?))
        };
        let mut event = AudioProcessingEvent {
            playback_time: self.clock.now(),
            input_buffer: allocate(self.num_input_channels)?,
            output_buffer: allocate(self.num_output_channels)?,
        };
        tracing::trace!(id = %self.node.id(), playback_time = event.playback_time, "dispatching audio process event");
        callback(&mut event);
        Ok(true)
    }
}

impl fmt::Debug for ScriptProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptProcessor")
            .field("node", &self.node)
            .field("buffer_size", &self.buffer_size)
            .field("num_input_channels", &self.num_input_channels)
            .field("num_output_channels", &self.num_output_channels)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{node::AudioNode, Options};
    use std::{cell::RefCell, rc::Rc};

    fn context() -> Context {
        Context::new(Options::default()).unwrap()
    }

    #[test]
    fn buffer_size() {
        let context = context();
        assert_eq!(
            context.create_script_processor(0, 2, 2).unwrap().buffer_size(),
            DEFAULT_BUFFER_SIZE
        );
        for size in [256, 512, 1024, 2048, 4096, 8192, 16384] {
            assert_eq!(
                context.create_script_processor(size, 1, 1).unwrap().buffer_size(),
                size
            );
        }
        for size in [128, 300, 32768] {
            assert!(matches!(
                context.create_script_processor(size, 1, 1),
                Err(Error::IndexSize(_))
            ));
        }
    }

    #[test]
    fn channel_counts() {
        let context = context();
        let processor = context.create_script_processor(256, 0, 3).unwrap();
        assert_eq!(processor.number_of_input_channels(), 0);
        assert_eq!(processor.number_of_output_channels(), 3);
        assert_eq!((processor.number_of_inputs(), processor.number_of_outputs()), (1, 1));
        for (inputs, outputs) in [(0, 0), (33, 1), (1, 33)] {
            assert!(matches!(
                context.create_script_processor(256, inputs, outputs),
                Err(Error::NotSupported(_))
            ));
        }
    }

    #[test]
    fn dispatch_without_callback() {
        let context = context();
        let mut processor = context.create_script_processor(256, 1, 1).unwrap();
        assert_eq!(processor.dispatch(), Ok(false));
    }

    #[test]
    fn dispatch_delivers_fresh_buffers() {
        let mut context = context();
        let mut processor = context.create_script_processor(512, 1, 2).unwrap();
        let events = Rc::new(RefCell::new(Vec::new()));
        let log = events.clone();
        processor.set_on_audio_process(move |event| {
            if let Some(output) = event.output_buffer.as_mut() {
                output.get_channel_data_mut(0).unwrap()[0] = 1.0;
            }
            log.borrow_mut().push(event.clone());
        });

        assert_eq!(processor.dispatch(), Ok(true));
        context.resume().into_inner().unwrap().unwrap();
        context.advance(0.5).unwrap();
        assert_eq!(processor.dispatch(), Ok(true));

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].playback_time, 0.0);
        assert_eq!(events[1].playback_time, 0.5);
        let input = events[1].input_buffer.as_ref().unwrap();
        assert_eq!((input.number_of_channels(), input.length()), (1, 512));
        let output = events[1].output_buffer.as_ref().unwrap();
        assert_eq!((output.number_of_channels(), output.length()), (2, 512));
        assert_eq!(output.get_channel_data(1).unwrap()[0], 0.0);
    }

    #[test]
    fn no_input_buffer_without_input_channels() {
        let context = context();
        let mut processor = context.create_script_processor(256, 0, 1).unwrap();
        let seen = Rc::new(RefCell::new(None));
        let log = seen.clone();
        processor.set_on_audio_process(move |event| {
            *log.borrow_mut() = Some(event.input_buffer.is_none());
        });
        processor.dispatch().unwrap();
        assert_eq!(*seen.borrow(), Some(true));
    }
}
