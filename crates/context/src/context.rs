use crate::{
    completion::Completion,
    decode,
    error::{Error, Result},
    node::{
        Analyser, BufferSource, Convolver, Delay, Destination, Gain, Panner, ScriptProcessor,
    },
};
use buffer::AudioBuffer;
use core::fmt;
use graph::{node, Graph, Node};
use std::{cell::Cell, rc::Rc};

/// The sample rate used when [Options::sample_rate] is `None`.
pub const DEFAULT_SAMPLE_RATE: f64 = 48000.0;

/// The range of supported sample rates.
pub const SAMPLE_RATE_RANGE: std::ops::RangeInclusive<f64> = 3000.0..=768000.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    pub sample_rate: Option<f64>,
    pub num_output_channels: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            sample_rate: None,
            num_output_channels: 2,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    Suspended,
    Running,
    Closed,
}

impl State {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Suspended => "suspended",
            Self::Running => "running",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shared, read-only view of a context's current time.
#[derive(Clone, Debug, Default)]
pub struct Clock(Rc<Cell<f64>>);

impl Clock {
    pub fn now(&self) -> f64 {
        self.0.get()
    }

    fn set(&self, time: f64) {
        self.0.set(time);
    }
}

/// Owns the connection graph and the clock that drives parameter automation.
pub struct Context {
    graph: Graph,
    sample_rate: f64,
    destination: Destination,
    clock: Clock,
    state: State,
    on_state_change: Option<Box<dyn FnMut(State)>>,
}

impl Context {
    pub fn new(options: Options) -> Result<Self> {
        let sample_rate = options.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE);
        if !SAMPLE_RATE_RANGE.contains(&sample_rate) {
            return Err(Error::NotSupported("sample rate must be in 3000..=768000"));
        }
        if options.num_output_channels == 0 || options.num_output_channels > buffer::MAX_CHANNELS {
            return Err(Error::NotSupported("output channel count must be in 1..=32"));
        }
        let graph = Graph::new();
        let destination = Destination::new(&graph, options.num_output_channels);
        tracing::debug!(sample_rate, channels = options.num_output_channels, "created context");
        Ok(Self {
            graph,
            sample_rate,
            destination,
            clock: Clock::default(),
            state: State::Suspended,
            on_state_change: None,
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// The speaker sink every rendered signal ends up in.
    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn current_time(&self) -> f64 {
        self.clock.now()
    }

    pub fn clock(&self) -> Clock {
        self.clock.clone()
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Register the callback invoked after every change of [State]. Replaces any previous callback.
    pub fn set_on_state_change(&mut self, callback: impl FnMut(State) + 'static) {
        self.on_state_change = Some(Box::new(callback));
    }

    pub fn clear_on_state_change(&mut self) {
        self.on_state_change = None;
    }

    pub fn suspend(&mut self) -> Completion<Result<()>> {
        Completion::ready(self.transition(State::Suspended))
    }

    pub fn resume(&mut self) -> Completion<Result<()>> {
        Completion::ready(self.transition(State::Running))
    }

    /// Close the context. Closing is final; closing again resolves without effect.
    pub fn close(&mut self) -> Completion<Result<()>> {
        Completion::ready(self.transition(State::Closed))
    }

    fn transition(&mut self, next: State) -> Result<()> {
        match (self.state, next) {
            (State::Closed, State::Closed) => return Ok(()),
            (State::Closed, _) => return Err(Error::InvalidState("the context is closed")),
            (current, next) if current == next => return Ok(()),
            _ => (),
        }
        tracing::debug!(from = %self.state, to = %next, "context state changed");
        self.state = next;
        if let Some(callback) = self.on_state_change.as_mut() {
            callback(next);
        }
        Ok(())
    }

    /// Move the clock to `time`, publishing the value of every live parameter at that time.
    pub fn advance(&mut self, time: f64) -> Result<()> {
        if self.state != State::Running {
            return Err(Error::InvalidState("the context is not running"));
        }
        if !time.is_finite() {
            return Err(Error::Type("time must be a finite number"));
        }
        if time < self.current_time() {
            return Err(Error::Range("time must not be before the current time"));
        }
        let params = self.graph.params();
        for param in &params {
            let value = param.advance(time);
            tracing::trace!(id = %param.id(), value, "evaluated param");
        }
        self.clock.set(time);
        tracing::trace!(time, params = params.len(), "advanced clock");
        Ok(())
    }

    /// Advance the clock by `frames` sample frames.
    pub fn advance_frames(&mut self, frames: u64) -> Result<()> {
        let time = self.current_time() + frames as f64 / self.sample_rate;
        self.advance(time)
    }

    /// Create a bare node with the given shape.
    pub fn create_node(&self, options: node::Options) -> Node {
        Node::new(&self.graph, options)
    }

    pub fn create_gain(&self) -> Gain {
        Gain::new(self)
    }

    /// Create a delay line. `max_delay_time` defaults to one second.
    pub fn create_delay(&self, max_delay_time: Option<f64>) -> Result<Delay> {
        Delay::new(self, max_delay_time.unwrap_or(1.0))
    }

    pub fn create_buffer_source(&self) -> BufferSource {
        BufferSource::new(self)
    }

    pub fn create_script_processor(
        &self,
        buffer_size: usize,
        num_input_channels: usize,
        num_output_channels: usize,
    ) -> Result<ScriptProcessor> {
        ScriptProcessor::new(self, buffer_size, num_input_channels, num_output_channels)
    }

    pub fn create_panner(&self) -> Panner {
        Panner::new(self)
    }

    pub fn create_convolver(&self) -> Convolver {
        Convolver::new(self)
    }

    pub fn create_analyser(&self) -> Analyser {
        Analyser::new(self)
    }

    pub fn create_buffer(
        &self,
        num_channels: usize,
        length: usize,
        sample_rate: f64,
    ) -> Result<AudioBuffer> {
        Ok(AudioBuffer::new(num_channels, length, sample_rate)?)
    }

    /// Decode an encoded audio file.
    pub fn decode_audio_data(&self, bytes: &[u8]) -> Completion<Result<AudioBuffer>> {
        Completion::ready(decode::decode(bytes, self.sample_rate))
    }

    /// Decode an encoded audio file, delivering the outcome through callbacks.
    pub fn decode_audio_data_with(
        &self,
        bytes: &[u8],
        on_success: impl FnOnce(AudioBuffer),
        on_error: impl FnOnce(Error),
    ) {
        match decode::decode(bytes, self.sample_rate) {
            Ok(buffer) => on_success(buffer),
            Err(error) => on_error(error),
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("sample_rate", &self.sample_rate)
            .field("current_time", &self.current_time())
            .field("state", &self.state)
            .field("num_endpoints", &self.graph.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::AudioNode;
    use approx::assert_relative_eq;
    use graph::Endpoint;
    use std::cell::RefCell;

    fn context() -> Context {
        Context::new(Options::default()).unwrap()
    }

    fn running() -> Context {
        let mut context = context();
        context.resume().into_inner().unwrap().unwrap();
        context
    }

    #[test]
    fn initial_state() {
        let context = context();
        assert_eq!(context.state(), State::Suspended);
        assert_eq!(context.state().as_str(), "suspended");
        assert_eq!(context.current_time(), 0.0);
        assert_eq!(context.sample_rate(), DEFAULT_SAMPLE_RATE);
        assert_eq!(context.destination().channel_count(), 2);
        assert_eq!(context.destination().number_of_inputs(), 1);
        assert_eq!(context.destination().number_of_outputs(), 0);
    }

    #[test]
    fn options() {
        let context = Context::new(Options {
            sample_rate: Some(44100.0),
            num_output_channels: 6,
        })
        .unwrap();
        assert_eq!(context.sample_rate(), 44100.0);
        assert_eq!(context.destination().channel_count(), 6);

        for sample_rate in [0.0, 2999.0, 768001.0, f64::NAN] {
            let options = Options {
                sample_rate: Some(sample_rate),
                ..Options::default()
            };
            assert!(matches!(
                Context::new(options),
                Err(Error::NotSupported(_))
            ));
        }
        let options = Options {
            num_output_channels: 0,
            ..Options::default()
        };
        assert!(matches!(
            Context::new(options),
            Err(Error::NotSupported(_))
        ));
    }

    #[test]
    fn gain_connects_to_destination() {
        let context = context();
        let gain = context.create_gain();
        assert_eq!(gain.gain().value(), 1.0);
        assert_eq!(
            gain.connect(context.destination()).unwrap(),
            Endpoint::from(context.destination())
        );
        assert!(gain.connected_to(context.destination()));
        assert_eq!(gain.disconnect(context.destination()), Ok(()));
        assert!(gain.destinations().is_empty());
    }

    #[test]
    fn lifecycle() {
        let mut context = context();
        let changes = Rc::new(RefCell::new(Vec::new()));
        let log = changes.clone();
        context.set_on_state_change(move |state| log.borrow_mut().push(state));

        assert_eq!(context.resume().into_inner(), Some(Ok(())));
        assert_eq!(context.resume().into_inner(), Some(Ok(())));
        assert_eq!(context.suspend().into_inner(), Some(Ok(())));
        assert_eq!(context.close().into_inner(), Some(Ok(())));
        assert_eq!(context.state(), State::Closed);

        assert!(matches!(
            context.resume().into_inner(),
            Some(Err(Error::InvalidState(_)))
        ));
        assert!(matches!(
            context.suspend().into_inner(),
            Some(Err(Error::InvalidState(_)))
        ));
        assert_eq!(context.close().into_inner(), Some(Ok(())));
        assert_eq!(context.state(), State::Closed);
        assert_eq!(
            *changes.borrow(),
            vec![State::Running, State::Suspended, State::Closed]
        );
    }

    #[test]
    fn advance_requires_running() {
        let mut context = context();
        assert!(matches!(
            context.advance(1.0),
            Err(Error::InvalidState(_))
        ));
        context.resume().into_inner().unwrap().unwrap();
        context.advance(1.0).unwrap();
        context.close().into_inner().unwrap().unwrap();
        assert!(matches!(
            context.advance(2.0),
            Err(Error::InvalidState(_))
        ));
        assert_eq!(context.current_time(), 1.0);
    }

    #[test]
    fn advance_validates_time() {
        let mut context = running();
        context.advance(0.5).unwrap();
        assert!(matches!(context.advance(f64::NAN), Err(Error::Type(_))));
        assert!(matches!(
            context.advance(f64::INFINITY),
            Err(Error::Type(_))
        ));
        assert!(matches!(context.advance(0.25), Err(Error::Range(_))));
        context.advance(0.5).unwrap();
        assert_eq!(context.current_time(), 0.5);
    }

    #[test]
    fn advance_drives_automation() {
        let mut context = running();
        let gain = context.create_gain();
        gain.gain()
            .set_value_at_time(0.0, 0.0)
            .unwrap()
            .linear_ramp_to_value_at_time(1.0, 1.0)
            .unwrap();
        let clock = context.clock();
        context.advance(0.25).unwrap();
        assert_relative_eq!(gain.gain().value(), 0.25);
        assert_eq!(clock.now(), 0.25);
        context.advance(2.0).unwrap();
        assert_relative_eq!(gain.gain().value(), 1.0);
    }

    #[test]
    fn advance_frames() {
        let mut context = running();
        context.advance_frames(24000).unwrap();
        assert_relative_eq!(context.current_time(), 0.5);
        context.advance_frames(0).unwrap();
        assert_relative_eq!(context.current_time(), 0.5);
    }

    #[test]
    fn nodes_from_different_contexts_do_not_connect() {
        let (a, b) = (context(), context());
        let gain = a.create_gain();
        assert_eq!(
            gain.connect(b.destination()),
            Err(Error::Graph(graph::Error::ContextMismatch))
        );
        assert!(gain.destinations().is_empty());
    }

    #[test]
    fn decode_audio_data() {
        let context = context();
        let mut wave = b"RIFF\x24\0\0\0WAVE".to_vec();
        wave.extend_from_slice(b"fmt ");
        let buffer = context
            .decode_audio_data(&wave)
            .into_inner()
            .unwrap()
            .unwrap();
        assert_eq!(buffer.sample_rate(), context.sample_rate());
        assert!(matches!(
            context.decode_audio_data(b"not audio").into_inner(),
            Some(Err(Error::NotSupported(_)))
        ));

        let decoded = RefCell::new(None);
        let failed = RefCell::new(None);
        context.decode_audio_data_with(
            &wave,
            |buffer| *decoded.borrow_mut() = Some(buffer),
            |error| *failed.borrow_mut() = Some(error),
        );
        assert!(decoded.borrow().is_some());
        assert!(failed.borrow().is_none());
        context.decode_audio_data_with(
            b"",
            |buffer| *decoded.borrow_mut() = Some(buffer),
            |error| *failed.borrow_mut() = Some(error),
        );
        assert!(failed.borrow().is_some());
    }

    #[test]
    fn create_buffer() {
        let context = context();
        let buffer = context.create_buffer(2, 128, 22050.0).unwrap();
        assert_eq!(buffer.number_of_channels(), 2);
        assert!(matches!(
            context.create_buffer(0, 128, 22050.0),
            Err(Error::Buffer(buffer::Error::NotSupported(_)))
        ));
    }

    #[test]
    fn untyped_param_calls() {
        let context = context();
        let gain = context.create_gain();
        let result = gain
            .gain()
            .call(crate::Method::SetValueAtTime, &[crate::Value::from(0.5)]);
        assert!(matches!(
            result,
            Err(graph::Error::Automation(
                automation::Error::MissingArgument { .. }
            ))
        ));
        assert!(gain.gain().timeline().is_empty());
    }

    #[test]
    fn create_node() {
        let context = context();
        let node = context.create_node(node::Options::new(1, 2, 3));
        assert_eq!(node.number_of_inputs(), 2);
        assert_eq!(node.number_of_outputs(), 3);
        assert!(node.graph().unwrap().ptr_eq(context.graph()));
    }
}
