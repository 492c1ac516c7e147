use std::marker::PhantomData;

use crate::constants::FIR_NUM_TAPS;
use crate::signal_processing::{DelayLine, TapSet};

/// Fixed-coefficient FIR filter stage
///
/// Owns the delay line; the coefficients come from the `TapSet` type
/// parameter and are shared by every instance of that stage. Instantiated as
/// `FirStage<AntiAliasTaps>` ahead of decimation and
/// `FirStage<ReconstructionTaps>` after expansion.
#[derive(Debug, Clone)]
pub struct FirStage<T: TapSet> {
    delay_line: DelayLine<FIR_NUM_TAPS>,
    _taps: PhantomData<T>,
}

impl<T: TapSet> FirStage<T> {
    pub fn new() -> Self {
        Self {
            delay_line: DelayLine::new(),
            _taps: PhantomData,
        }
    }

    /// Process a single sample through the filter
    ///
    /// Tap `i` pairs with the sample inserted `i` steps ago.
    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        let newest = self.delay_line.push(sample);
        self.delay_line.convolve(T::TAPS, newest)
    }

    /// Process an entire buffer of samples in-place
    pub fn process_buffer(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Zero the delay line and rewind the write index
    pub fn reset(&mut self) {
        self.delay_line.clear();
    }

    pub fn num_taps(&self) -> usize {
        FIR_NUM_TAPS
    }

    /// Group delay in samples; constant because the taps are symmetric
    pub fn group_delay_samples(&self) -> f32 {
        (FIR_NUM_TAPS - 1) as f32 / 2.0
    }

    pub fn taps(&self) -> &'static [f32; FIR_NUM_TAPS] {
        T::TAPS
    }

    pub fn name(&self) -> &'static str {
        T::NAME
    }
}

impl<T: TapSet> Default for FirStage<T> {
    fn default() -> Self {
        Self::new()
    }
}
