use super::{Direction, RateConverter};
use crate::constants::OUTPUT_GUARD_SAMPLES;
use crate::error::{ResampleError, Result};
use crate::signal_processing::{AntiAliasTaps, FractionalPhase};

/// Source rate to 16 kHz: anti-alias FIR, then fractional decimation
#[derive(Debug, Clone, Copy)]
pub struct Downsample;

/// Decimation state: the fractional accumulator plus the count of the last call
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimationState {
    accumulator: FractionalPhase,
    last_output_count: usize,
}

impl Direction for Downsample {
    const NAME: &'static str = "downsample";
    type Taps = AntiAliasTaps;
    type Phase = DecimationState;

    fn ratio(source_rate: f64, target_rate: f64) -> f64 {
        target_rate / source_rate
    }
}

pub type Downsampler = RateConverter<Downsample>;

impl RateConverter<Downsample> {
    /// Filter and decimate `input` into `output`
    ///
    /// Returns the exact number of samples written, which varies from call to
    /// call with the carried phase. `output` must hold at least
    /// `required_output_len(input.len())` samples; a smaller buffer is
    /// rejected before any state changes, and trips a debug assertion.
    pub fn resample(&mut self, input: &[f32], output: &mut [f32]) -> Result<usize> {
        let config = self.ready_config()?;

        let needed = self.phase.accumulator.max_outputs(input.len(), config.ratio);
        debug_assert!(
            needed <= output.len(),
            "resample output buffer too small: need {}, have {}",
            needed,
            output.len()
        );
        if needed > output.len() {
            return Err(ResampleError::OutputOverflow {
                needed,
                available: output.len(),
            });
        }

        let mut written = 0;
        for &sample in input {
            let filtered = self.filter.process(sample);
            written += self
                .phase
                .accumulator
                .push(filtered, config.ratio, &mut output[written..]);
        }

        self.phase.last_output_count = written;
        Ok(written)
    }

    /// Capacity-planning estimate: `ceil(input_len * ratio)`
    ///
    /// The real count of a given call can differ by one with the carried
    /// phase; read it from `resample`'s return value. Returns 0 while
    /// unconfigured.
    pub fn expected_output_size(&self, input_len: usize) -> usize {
        self.ratio()
            .map(|ratio| (input_len as f64 * ratio).ceil() as usize)
            .unwrap_or(0)
    }

    /// Buffer size to reserve per block: the estimate plus a guard margin
    pub fn output_capacity(&self, input_len: usize) -> usize {
        self.expected_output_size(input_len) + OUTPUT_GUARD_SAMPLES
    }

    /// Worst-case output count of the next `resample` call of `input_len`
    /// samples, given the current phase
    pub fn required_output_len(&self, input_len: usize) -> usize {
        self.ratio()
            .map(|ratio| self.phase.accumulator.max_outputs(input_len, ratio))
            .unwrap_or(0)
    }

    /// Samples written by the most recent `resample` call
    pub fn last_output_count(&self) -> usize {
        self.phase.last_output_count
    }

    /// Carried fractional time, always in [0, 1) between calls
    pub fn time_accumulator(&self) -> f64 {
        self.phase.accumulator.time_accumulator()
    }
}
