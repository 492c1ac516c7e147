/// Phase accumulator for fractional-ratio decimation
///
/// Consumes one (already filtered) sample at a time and emits zero or more
/// linearly interpolated output samples. `time_accumulator` is kept below 1.0
/// between calls, so the output phase is continuous however the input is
/// split into blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FractionalPhase {
    time_accumulator: f64,
    prev_sample: f32,
    curr_sample: f32,
}

impl FractionalPhase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one input sample
    ///
    /// Writes the emitted samples to the front of `out` and returns how many
    /// were written. `out` must hold at least `ceil(ratio)` samples.
    #[inline]
    pub fn push(&mut self, sample: f32, ratio: f64, out: &mut [f32]) -> usize {
        self.curr_sample = sample;
        self.time_accumulator += ratio;

        let mut written = 0;
        while self.time_accumulator >= 1.0 {
            // Position of the crossing between prev and curr.
            let frac = (1.0 - (self.time_accumulator - 1.0) / ratio).clamp(0.0, 1.0) as f32;
            out[written] = lerp(self.prev_sample, self.curr_sample, frac);
            written += 1;
            self.time_accumulator -= 1.0;
        }

        self.prev_sample = self.curr_sample;
        written
    }

    pub fn time_accumulator(&self) -> f64 {
        self.time_accumulator
    }

    /// Upper bound on outputs produced by the next `input_len` pushes
    pub fn max_outputs(&self, input_len: usize, ratio: f64) -> usize {
        (self.time_accumulator + input_len as f64 * ratio + crate::constants::PHASE_BOUND_EPSILON)
            .floor() as usize
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Linear interpolation between `a` and `b` at `frac` in [0, 1]
#[inline]
pub fn lerp(a: f32, b: f32, frac: f32) -> f32 {
    a + frac * (b - a)
}
