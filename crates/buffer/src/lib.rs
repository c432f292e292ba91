//! Fixed-shape blocks of audio samples.
//!
//! - [AudioBuffer]: a fixed number of channels, each holding `length` frames of `f32` samples.
pub mod audio;
pub mod error;

pub use audio::AudioBuffer;
pub use error::{Error, Result};

/// The most channels a buffer may have.
pub const MAX_CHANNELS: usize = 32;
