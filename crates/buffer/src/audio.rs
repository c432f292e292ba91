//! Owned audio buffers.
//!
//! Every channel of an [AudioBuffer] has the same length, and the shape never changes after
//! construction. Access is bounds checked: a bad channel index is an [Error::IndexSize], a bad
//! frame offset an [Error::Range].
use crate::{
    error::{Error, Result},
    MAX_CHANNELS,
};
use util::collections::Array;

#[derive(Clone, Debug, PartialEq)]
pub struct AudioBuffer {
    sample_rate: f64,
    length: usize,
    channels: Array<Array<f32>>,
}

impl AudioBuffer {
    /// Allocate a silent buffer.
    pub fn new(num_channels: usize, length: usize, sample_rate: f64) -> Result<Self> {
        if num_channels == 0 || num_channels > MAX_CHANNELS {
            return Err(Error::NotSupported("channel count must be in 1..=32"));
        }
        if length == 0 {
            return Err(Error::NotSupported("length must be at least one frame"));
        }
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(Error::NotSupported("sample rate must be positive"));
        }
        let channels = (0..num_channels)
            .map(|_| Array::filled(length, 0.0))
            .collect();
        Ok(Self {
            sample_rate,
            length,
            channels,
        })
    }

    pub fn number_of_channels(&self) -> usize {
        self.channels.len()
    }

    /// Return the number of frames per channel.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// The duration of the buffer in seconds.
    pub fn duration(&self) -> f64 {
        self.length as f64 / self.sample_rate
    }

    /// Borrow a whole channel.
    pub fn get_channel_data(&self, channel: usize) -> Result<&[f32]> {
        self.check_channel(channel)?;
        Ok(self.channels[channel].as_slice())
    }

    pub fn get_channel_data_mut(&mut self, channel: usize) -> Result<&mut [f32]> {
        self.check_channel(channel)?;
        Ok(self.channels[channel].as_mut_slice())
    }

    /// Copy samples out of `channel`, starting at frame `offset`, into `destination`. Copies as
    /// many frames as fit in both and returns that count.
    pub fn copy_from_channel(
        &self,
        destination: &mut [f32],
        channel: usize,
        offset: usize,
    ) -> Result<usize> {
        self.check_channel(channel)?;
        self.check_offset(offset)?;
        let source = &self.channels[channel].as_slice()[offset..];
        let len = source.len().min(destination.len());
        destination[..len].copy_from_slice(&source[..len]);
        Ok(len)
    }

    /// Copy `source` into `channel`, starting at frame `offset`. Returns the number of frames
    /// written.
    pub fn copy_to_channel(
        &mut self,
        source: &[f32],
        channel: usize,
        offset: usize,
    ) -> Result<usize> {
        self.check_channel(channel)?;
        self.check_offset(offset)?;
        let destination = &mut self.channels[channel].as_mut_slice()[offset..];
        let len = source.len().min(destination.len());
        destination[..len].copy_from_slice(&source[..len]);
        Ok(len)
    }

    /// Iterate channels.
    pub fn iter(&self) -> impl Iterator<Item = &[f32]> + '_ {
        self.channels.iter().map(|channel| channel.as_slice())
    }

    fn check_channel(&self, channel: usize) -> Result<()> {
        if channel >= self.channels.len() {
            return Err(Error::IndexSize {
                channel,
                num_channels: self.channels.len(),
            });
        }
        Ok(())
    }

    fn check_offset(&self, offset: usize) -> Result<()> {
        if offset >= self.length {
            return Err(Error::Range {
                offset,
                length: self.length,
            });
        }
        Ok(())
    }
}
