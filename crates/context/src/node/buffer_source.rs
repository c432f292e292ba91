use crate::{
    context::Context,
    error::{Error, Result},
};
use buffer::AudioBuffer;
use core::fmt;
use graph::{node::Options, Node, Param};

/// Where a source is in its one-shot playback life.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Unstarted,
    Started,
    Stopped,
}

impl PlaybackState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unstarted => "unstarted",
            Self::Started => "started",
            Self::Stopped => "stopped",
        }
    }
}

/// A source that plays an [AudioBuffer]. It can be started and stopped once.
pub struct BufferSource {
    pub(crate) node: Node,
    playback_rate: Param,
    detune: Param,
    buffer: Option<AudioBuffer>,
    looping: bool,
    loop_start: f64,
    loop_end: f64,
    playback_state: PlaybackState,
    start_time: Option<f64>,
    offset: f64,
    duration: Option<f64>,
    stop_time: Option<f64>,
    on_ended: Option<Box<dyn FnMut()>>,
}

impl BufferSource {
    pub fn new(context: &Context) -> Self {
        let node = context.create_node(Options::new(2, 0, 1));
        let playback_rate = Param::new(&node, 1.0, f64::NEG_INFINITY, f64::INFINITY);
        let detune = Param::new(&node, 0.0, f64::NEG_INFINITY, f64::INFINITY);
        Self {
            node,
            playback_rate,
            detune,
            buffer: None,
            looping: false,
            loop_start: 0.0,
            loop_end: 0.0,
            playback_state: PlaybackState::Unstarted,
            start_time: None,
            offset: 0.0,
            duration: None,
            stop_time: None,
            on_ended: None,
        }
    }

    pub fn playback_rate(&self) -> &Param {
        &self.playback_rate
    }

    pub fn detune(&self) -> &Param {
        &self.detune
    }

    pub fn buffer(&self) -> Option<&AudioBuffer> {
        self.buffer.as_ref()
    }

    pub fn set_buffer(&mut self, buffer: Option<AudioBuffer>) {
        self.buffer = buffer;
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn loop_start(&self) -> f64 {
        self.loop_start
    }

    pub fn set_loop_start(&mut self, time: f64) -> Result<()> {
        self.loop_start = finite(time)?;
        Ok(())
    }

    pub fn loop_end(&self) -> f64 {
        self.loop_end
    }

    pub fn set_loop_end(&mut self, time: f64) -> Result<()> {
        self.loop_end = finite(time)?;
        Ok(())
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback_state
    }

    /// The context time playback was scheduled to begin, once started.
    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn stop_time(&self) -> Option<f64> {
        self.stop_time
    }

    /// Register the callback invoked when the source stops. Replaces any previous callback.
    pub fn set_on_ended(&mut self, callback: impl FnMut() + 'static) {
        self.on_ended = Some(Box::new(callback));
    }

    /// Schedule playback at context time `when`, beginning `offset` seconds into the buffer and
    /// lasting `duration` seconds (or until the end of the buffer).
    pub fn start(&mut self, when: f64, offset: f64, duration: Option<f64>) -> Result<()> {
        if self.playback_state != PlaybackState::Unstarted {
            return Err(Error::InvalidState("a source can only be started once"));
        }
        let when = non_negative(when, "start time must not be negative")?;
        let offset = non_negative(offset, "offset must not be negative")?;
        let duration = duration
            .map(|duration| non_negative(duration, "duration must not be negative"))
            .transpose()?;
        self.playback_state = PlaybackState::Started;
        self.start_time = Some(when);
        self.offset = offset;
        self.duration = duration;
        tracing::debug!(id = %self.node.id(), when, offset, ?duration, "started buffer source");
        Ok(())
    }

    /// Stop playback at context time `when` and notify the `ended` callback.
    pub fn stop(&mut self, when: f64) -> Result<()> {
        if self.playback_state != PlaybackState::Started {
            return Err(Error::InvalidState("only a started source can be stopped"));
        }
        let when = non_negative(when, "stop time must not be negative")?;
        self.playback_state = PlaybackState::Stopped;
        self.stop_time = Some(when);
        tracing::debug!(id = %self.node.id(), when, "stopped buffer source");
        if let Some(callback) = self.on_ended.as_mut() {
            callback();
        }
        Ok(())
    }
}

fn finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::Type("time must be a finite number"))
    }
}

fn non_negative(value: f64, reason: &'static str) -> Result<f64> {
    let value = finite(value)?;
    if value < 0.0 {
        return Err(Error::Range(reason));
    }
    Ok(value)
}

impl fmt::Debug for BufferSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferSource")
            .field("node", &self.node)
            .field("playback_state", &self.playback_state)
            .field("looping", &self.looping)
            .field("has_buffer", &self.buffer.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{node::AudioNode, Options};
    use std::{cell::Cell, rc::Rc};

    fn source() -> (Context, BufferSource) {
        let context = Context::new(Options::default()).unwrap();
        let source = context.create_buffer_source();
        (context, source)
    }

    #[test]
    fn attributes() {
        let (context, mut source) = source();
        assert_eq!((source.number_of_inputs(), source.number_of_outputs()), (0, 1));
        assert_eq!(source.playback_rate().value(), 1.0);
        assert_eq!(source.detune().value(), 0.0);
        assert!(source.buffer().is_none());
        source.set_buffer(Some(context.create_buffer(1, 64, 48000.0).unwrap()));
        source.set_loop(true);
        source.set_loop_start(0.25).unwrap();
        source.set_loop_end(0.5).unwrap();
        assert_eq!(source.buffer().map(AudioBuffer::length), Some(64));
        assert!(source.looping());
        assert_eq!((source.loop_start(), source.loop_end()), (0.25, 0.5));
        assert!(matches!(
            source.set_loop_end(f64::NAN),
            Err(Error::Type(_))
        ));
    }

    #[test]
    fn playback_transitions() {
        let (_context, mut source) = source();
        let ended = Rc::new(Cell::new(0));
        let count = ended.clone();
        source.set_on_ended(move || count.set(count.get() + 1));

        assert!(matches!(source.stop(0.0), Err(Error::InvalidState(_))));
        source.start(1.0, 0.5, Some(2.0)).unwrap();
        assert_eq!(source.playback_state(), PlaybackState::Started);
        assert_eq!(source.start_time(), Some(1.0));
        assert_eq!(source.offset(), 0.5);
        assert_eq!(source.duration(), Some(2.0));
        assert!(matches!(
            source.start(1.0, 0.0, None),
            Err(Error::InvalidState(_))
        ));

        source.stop(3.0).unwrap();
        assert_eq!(source.playback_state(), PlaybackState::Stopped);
        assert_eq!(source.stop_time(), Some(3.0));
        assert_eq!(ended.get(), 1);
        assert!(matches!(source.stop(4.0), Err(Error::InvalidState(_))));
        assert!(matches!(
            source.start(0.0, 0.0, None),
            Err(Error::InvalidState(_))
        ));
        assert_eq!(ended.get(), 1);
    }

    #[test]
    fn negative_times_are_rejected() {
        let (_context, mut source) = source();
        assert!(matches!(
            source.start(-1.0, 0.0, None),
            Err(Error::Range(_))
        ));
        assert!(matches!(
            source.start(0.0, -1.0, None),
            Err(Error::Range(_))
        ));
        assert!(matches!(
            source.start(0.0, 0.0, Some(-1.0)),
            Err(Error::Range(_))
        ));
        assert_eq!(source.playback_state(), PlaybackState::Unstarted);
        source.start(0.0, 0.0, None).unwrap();
        assert!(matches!(source.stop(-0.5), Err(Error::Range(_))));
        assert_eq!(source.playback_state(), PlaybackState::Started);
    }
}
