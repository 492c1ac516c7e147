//! Rate-conversion pipelines
//!
//! One generic `RateConverter` carries the shared parts of both directions:
//! the Unconfigured/Ready state machine, the configured rate pair, one FIR
//! stage and the direction's phase state. `Downsampler` filters then
//! decimates; `Upsampler` expands then filters with its own tap set.
//!
//! Nothing here allocates, locks or logs inside the per-sample paths.
//! Reconfiguration must not overlap with processing; the converters do no
//! internal synchronisation.

mod downsample;
mod upsample;

pub use downsample::{Downsample, Downsampler};
pub use upsample::{BlockStretch, Upsample, Upsampler};

use crate::constants::TARGET_SAMPLE_RATE;
use crate::error::{ResampleError, Result};
use crate::signal_processing::{FirStage, TapSet};

/// Direction-specific parameters of a `RateConverter`
pub trait Direction {
    const NAME: &'static str;
    /// Coefficient set of this direction's FIR stage
    type Taps: TapSet;
    /// Per-stream phase state, cleared together with the filter
    type Phase: std::fmt::Debug + Clone + Default;

    /// Nominal output/input rate ratio for this direction
    fn ratio(source_rate: f64, target_rate: f64) -> f64;
}

/// Configured rate pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateConfig {
    pub source_rate: f64,
    pub target_rate: f64,
    /// Output samples per input sample in this converter's direction
    pub ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConverterState {
    Unconfigured,
    Ready(RateConfig),
}

/// Rate converter generic over its direction
#[derive(Debug, Clone)]
pub struct RateConverter<D: Direction> {
    state: ConverterState,
    filter: FirStage<D::Taps>,
    phase: D::Phase,
}

impl<D: Direction> RateConverter<D> {
    /// Create an unconfigured converter; call `initialize` before processing
    pub fn new() -> Self {
        Self {
            state: ConverterState::Unconfigured,
            filter: FirStage::new(),
            phase: D::Phase::default(),
        }
    }

    /// Create a converter already configured for `source_rate`
    pub fn with_source_rate(source_rate: f64) -> Result<Self> {
        let mut converter = Self::new();
        converter.initialize(source_rate)?;
        Ok(converter)
    }

    /// (Re)configure for `source_rate` and clear all stream state
    ///
    /// Filter history and phase are cleared together; they describe one
    /// continuous stream. A rejected rate leaves the converter untouched.
    pub fn initialize(&mut self, source_rate: f64) -> Result<()> {
        if !source_rate.is_finite() || source_rate <= 0.0 {
            return Err(ResampleError::InvalidSampleRate(source_rate));
        }

        let config = RateConfig {
            source_rate,
            target_rate: TARGET_SAMPLE_RATE,
            ratio: D::ratio(source_rate, TARGET_SAMPLE_RATE),
        };
        log::info!(
            "{} converter configured: {} Hz <-> {} Hz (ratio {:.6})",
            D::NAME,
            config.source_rate,
            config.target_rate,
            config.ratio
        );

        self.state = ConverterState::Ready(config);
        self.reset();
        Ok(())
    }

    /// Clear filter history and phase without touching the configured rates
    pub fn reset(&mut self) {
        self.filter.reset();
        self.phase = D::Phase::default();
    }

    pub fn state(&self) -> ConverterState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ConverterState::Ready(_))
    }

    pub fn rate_config(&self) -> Option<RateConfig> {
        match self.state {
            ConverterState::Ready(config) => Some(config),
            ConverterState::Unconfigured => None,
        }
    }

    pub fn source_rate(&self) -> Option<f64> {
        self.rate_config().map(|c| c.source_rate)
    }

    pub fn target_rate(&self) -> f64 {
        TARGET_SAMPLE_RATE
    }

    pub fn ratio(&self) -> Option<f64> {
        self.rate_config().map(|c| c.ratio)
    }

    /// Group delay of this converter's FIR stage, in source-rate samples
    pub fn group_delay_samples(&self) -> f32 {
        self.filter.group_delay_samples()
    }

    fn ready_config(&self) -> Result<RateConfig> {
        self.rate_config().ok_or(ResampleError::NotConfigured)
    }
}

impl<D: Direction> Default for RateConverter<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_starts_unconfigured() {
        let down = Downsampler::new();
        assert_eq!(down.state(), ConverterState::Unconfigured);
        assert!(!down.is_ready());
        assert_eq!(down.source_rate(), None);
        assert_eq!(down.ratio(), None);
        assert_eq!(down.target_rate(), 16000.0);
    }

    #[test]
    fn test_initialize_sets_ratio_per_direction() {
        let down = Downsampler::with_source_rate(44100.0).unwrap();
        let up = Upsampler::with_source_rate(44100.0).unwrap();

        assert!(down.is_ready());
        assert_eq!(down.source_rate(), Some(44100.0));
        assert_relative_eq!(down.ratio().unwrap(), 16000.0 / 44100.0);
        assert_relative_eq!(up.ratio().unwrap(), 44100.0 / 16000.0);
    }

    #[test]
    fn test_rejects_invalid_rates() {
        for rate in [0.0, -44100.0, f64::NAN, f64::INFINITY] {
            let mut down = Downsampler::new();
            let err = down.initialize(rate).unwrap_err();
            assert!(matches!(err, ResampleError::InvalidSampleRate(_)));
            assert!(!down.is_ready());
        }
    }

    #[test]
    fn test_rejected_rate_keeps_previous_configuration() {
        let mut down = Downsampler::with_source_rate(48000.0).unwrap();
        assert!(down.initialize(0.0).is_err());
        assert_eq!(down.source_rate(), Some(48000.0));
    }

    #[test]
    fn test_reconfigure_stays_ready() {
        let mut down = Downsampler::with_source_rate(44100.0).unwrap();
        down.initialize(48000.0).unwrap();
        assert_eq!(down.source_rate(), Some(48000.0));
        assert_relative_eq!(down.ratio().unwrap(), 1.0 / 3.0);
    }

    #[test]
    fn test_group_delay() {
        assert_eq!(Downsampler::new().group_delay_samples(), 31.5);
        assert_eq!(Upsampler::new().group_delay_samples(), 31.5);
    }
}
