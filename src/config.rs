//! Runtime configuration for the resampling tools.
//!
//! The 16 kHz target rate and the tap tables are fixed; only the stream
//! layout around them is configurable. Every section has a `Default`, and
//! TOML files may set any subset of fields:
//!
//! ```toml
//! [audio]
//! sample_rate = 48000
//! buffer_size = 256
//!
//! [pipeline]
//! output_guard_samples = 32
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::OUTPUT_GUARD_SAMPLES;
use crate::error::{ResampleError, Result};

/// Sample rate given on the command line
///
/// # Parsing formats
/// - `44100` - rate in Hz (no suffix)
/// - `44100hz` or `44100Hz` - rate in Hz (explicit)
/// - `44.1k` or `44.1khz` - rate in kHz
///
/// # Example
/// ```
/// use rtresample::config::SampleRate;
///
/// let rate: SampleRate = "44.1k".parse().unwrap();
/// assert_eq!(rate.as_hz(), 44100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRate(u32);

impl SampleRate {
    pub fn from_hz(hz: u32) -> Self {
        Self(hz)
    }

    pub fn as_hz(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Hz", self.0)
    }
}

impl FromStr for SampleRate {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();

        let (num, scale) = if let Some(num) = lower
            .strip_suffix("khz")
            .or_else(|| lower.strip_suffix('k'))
        {
            (num, 1000.0)
        } else {
            (lower.strip_suffix("hz").unwrap_or(&lower), 1.0)
        };

        let value: f64 = num
            .trim()
            .parse()
            .map_err(|_| format!("invalid sample rate: {}", s))?;
        let hz = (value * scale).round();
        if !hz.is_finite() || hz <= 0.0 || hz > u32::MAX as f64 {
            return Err("sample rate must be positive".to_string());
        }
        Ok(Self(hz as u32))
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResamplerConfig {
    /// Input stream layout
    pub audio: AudioConfig,
    /// Rate-conversion buffer sizing
    pub pipeline: PipelineConfig,
}

/// Input stream layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Source sample rate in Hz
    pub sample_rate: u32,
    /// Host block size in frames
    pub buffer_size: usize,
    /// Input channels (1 or 2; stereo is mixed down to mono)
    pub channels: u16,
}

/// Buffer sizing for the intermediate 16 kHz stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Extra slots reserved past the per-block output estimate
    pub output_guard_samples: usize,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            buffer_size: 512,
            channels: 2,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_guard_samples: OUTPUT_GUARD_SAMPLES,
        }
    }
}

impl ResamplerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ResampleError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ResampleError::Config(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.audio.sample_rate == 0 {
            return Err(ResampleError::Config("sample_rate must be positive".into()));
        }
        if self.audio.buffer_size == 0 {
            return Err(ResampleError::Config("buffer_size must be positive".into()));
        }
        if !(1..=2).contains(&self.audio.channels) {
            return Err(ResampleError::Config(format!(
                "channels must be 1 or 2, got {}",
                self.audio.channels
            )));
        }
        if self.pipeline.output_guard_samples == 0 {
            return Err(ResampleError::Config(
                "output_guard_samples must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
