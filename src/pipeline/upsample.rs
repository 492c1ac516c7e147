use super::{Direction, RateConverter};
use crate::error::Result;
use crate::signal_processing::{ReconstructionTaps, lerp};

/// 16 kHz back to the source rate: linear expansion, then reconstruction FIR
#[derive(Debug, Clone, Copy)]
pub struct Upsample;

/// Per-block expansion state
///
/// The stretch factor is derived from each block's actual resampled count.
/// No fractional read position is carried from one block to the next, so
/// each block starts reading at its own first resampled sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlockStretch {
    last_ratio: Option<f64>,
}

impl Direction for Upsample {
    const NAME: &'static str = "upsample";
    type Taps = ReconstructionTaps;
    type Phase = BlockStretch;

    fn ratio(source_rate: f64, target_rate: f64) -> f64 {
        source_rate / target_rate
    }
}

pub type Upsampler = RateConverter<Upsample>;

impl RateConverter<Upsample> {
    /// Expand `resampled` to fill `output`, then run the reconstruction filter
    ///
    /// `resampled` must be exactly what the downsampler wrote for the block
    /// `output` corresponds to; the stretch ratio is
    /// `output.len() / resampled.len()`. Reads past the last resampled sample
    /// hold that sample. An empty `resampled` feeds silence through the
    /// filter instead of dividing by zero. Always writes `output.len()`
    /// samples.
    pub fn expand(&mut self, resampled: &[f32], output: &mut [f32]) -> Result<()> {
        self.ready_config()?;

        let available = resampled.len();
        if available == 0 {
            self.phase.last_ratio = None;
            for out in output.iter_mut() {
                *out = self.filter.process(0.0);
            }
            return Ok(());
        }

        let upsample_ratio = output.len() as f64 / available as f64;
        self.phase.last_ratio = Some(upsample_ratio);

        let last = available - 1;
        for (i, out) in output.iter_mut().enumerate() {
            let position = i as f64 / upsample_ratio;
            let index = (position as usize).min(last);
            let frac = (position - index as f64) as f32;

            let sample = if index + 1 < available {
                lerp(resampled[index], resampled[index + 1], frac)
            } else {
                resampled[index]
            };
            *out = self.filter.process(sample);
        }

        Ok(())
    }

    /// Stretch factor used by the most recent `expand`, `None` if that block
    /// had no resampled samples or nothing has been expanded yet
    pub fn last_upsample_ratio(&self) -> Option<f64> {
        self.phase.last_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResampleError;
    use crate::signal_processing::{FirStage, TapSet};
    use approx::assert_abs_diff_eq;

    /// Expected converter output for already-expanded `values`
    fn filtered(values: &[f32]) -> Vec<f32> {
        let mut filter: FirStage<ReconstructionTaps> = FirStage::new();
        values.iter().map(|&v| filter.process(v)).collect()
    }

    #[test]
    fn test_unconfigured_expand_fails() {
        let mut up = Upsampler::new();
        let mut out = [0.0f32; 4];
        assert!(matches!(
            up.expand(&[1.0], &mut out),
            Err(ResampleError::NotConfigured)
        ));
    }

    #[test]
    fn test_linear_expansion_positions() {
        let mut up = Upsampler::with_source_rate(44100.0).unwrap();
        let resampled = [0.0, 1.0, 2.0, 3.0];
        let mut out = [0.0f32; 8];
        up.expand(&resampled, &mut out).unwrap();

        // ratio 2: positions 0, 0.5, 1, ... 3.5; the last holds sample 3.
        let raw = [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.0];
        assert_eq!(up.last_upsample_ratio(), Some(2.0));
        for (got, want) in out.iter().zip(filtered(&raw)) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_holds_last_sample_at_boundary() {
        let mut up = Upsampler::with_source_rate(44100.0).unwrap();
        // A single resampled sample can only be held.
        let mut out = [0.0f32; 5];
        up.expand(&[0.8], &mut out).unwrap();
        let raw = [0.8f32; 5];
        for (got, want) in out.iter().zip(filtered(&raw)) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-7);
        }
        assert!(out.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_empty_block_passes_silence() {
        let mut up = Upsampler::with_source_rate(44100.0).unwrap();
        let mut out = [1.0f32; 16];
        up.expand(&[], &mut out).unwrap();
        assert!(out.iter().all(|&s| s == 0.0));
        assert_eq!(up.last_upsample_ratio(), None);
    }

    #[test]
    fn test_empty_block_continues_filter_tail() {
        let mut up = Upsampler::with_source_rate(44100.0).unwrap();
        let mut out = [0.0f32; 4];
        up.expand(&[1.0, 1.0], &mut out).unwrap();

        let mut tail = [0.0f32; 4];
        up.expand(&[], &mut tail).unwrap();
        // Ringing from the previous block, not NaN and not a hard cut.
        assert!(tail.iter().all(|s| s.is_finite()));
        assert!(tail.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_dc_block_settles_to_dc() {
        let mut up = Upsampler::with_source_rate(44100.0).unwrap();
        let resampled = [0.25f32; 186];
        let mut out = [0.0f32; 512];
        for _ in 0..3 {
            up.expand(&resampled, &mut out).unwrap();
        }
        let dc: f64 = ReconstructionTaps::TAPS.iter().map(|&t| t as f64).sum();
        for &s in &out[100..] {
            assert_abs_diff_eq!(s as f64, 0.25 * dc, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_reset_clears_filter() {
        let mut up = Upsampler::with_source_rate(44100.0).unwrap();
        let mut out = [0.0f32; 64];
        up.expand(&[0.9; 20], &mut out).unwrap();
        up.reset();
        assert_eq!(up.last_upsample_ratio(), None);
        up.expand(&[0.0; 20], &mut out).unwrap();
        assert!(out.iter().all(|&s| s == 0.0));
    }
}
