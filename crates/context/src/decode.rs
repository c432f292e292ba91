use crate::error::{Error, Result};
use buffer::AudioBuffer;

/// The number of frames in a decoded buffer.
pub const DECODED_LENGTH: usize = 1024;

/// Recognize a RIFF/WAVE container and produce a silent mono buffer at `sample_rate`. The payload
/// is not decoded.
pub(crate) fn decode(bytes: &[u8], sample_rate: f64) -> Result<AudioBuffer> {
    if !is_wave(bytes) {
        return Err(Error::NotSupported("audio data is not a RIFF/WAVE container"));
    }
    Ok(AudioBuffer::new(1, DECODED_LENGTH, sample_rate)?)
}

fn is_wave(bytes: &[u8]) -> bool {
    bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE"
}
