use crate::{
    context::Context,
    error::{Error, Result},
};
use graph::{node::Options, Node};

/// Exposes frequency and time-domain analysis settings. No analysis is performed.
#[derive(Clone, Debug)]
pub struct Analyser {
    pub(crate) node: Node,
    fft_size: usize,
    min_decibels: f64,
    max_decibels: f64,
    smoothing_time_constant: f64,
}

impl Analyser {
    pub fn new(context: &Context) -> Self {
        let node = context.create_node(Options::new(2, 1, 1));
        Self {
            node,
            fft_size: 2048,
            min_decibels: -100.0,
            max_decibels: -30.0,
            smoothing_time_constant: 0.8,
        }
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// The FFT size must be a power of two in `32..=32768`.
    pub fn set_fft_size(&mut self, fft_size: usize) -> Result<()> {
        if !((32..=32768).contains(&fft_size) && fft_size.is_power_of_two()) {
            return Err(Error::IndexSize(
                "fft size must be a power of two in 32..=32768",
            ));
        }
        self.fft_size = fft_size;
        Ok(())
    }

    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    pub fn min_decibels(&self) -> f64 {
        self.min_decibels
    }

    pub fn set_min_decibels(&mut self, min_decibels: f64) -> Result<()> {
        self.set_decibels(min_decibels, self.max_decibels)
    }

    pub fn max_decibels(&self) -> f64 {
        self.max_decibels
    }

    pub fn set_max_decibels(&mut self, max_decibels: f64) -> Result<()> {
        self.set_decibels(self.min_decibels, max_decibels)
    }

    /// Set both ends of the decibel range. `min_decibels` must be below `max_decibels`.
    pub fn set_decibels(&mut self, min_decibels: f64, max_decibels: f64) -> Result<()> {
        if min_decibels.is_nan() || max_decibels.is_nan() || min_decibels >= max_decibels {
            return Err(Error::IndexSize(
                "min decibels must be less than max decibels",
            ));
        }
        self.min_decibels = min_decibels;
        self.max_decibels = max_decibels;
        Ok(())
    }

    pub fn smoothing_time_constant(&self) -> f64 {
        self.smoothing_time_constant
    }

    pub fn set_smoothing_time_constant(&mut self, value: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&value) {
            return Err(Error::IndexSize(
                "smoothing time constant must be in [0, 1]",
            ));
        }
        self.smoothing_time_constant = value;
        Ok(())
    }
}
