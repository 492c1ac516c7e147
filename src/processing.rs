use crate::audio::mix_to_mono;
use crate::config::ResamplerConfig;
use crate::constants::OUTPUT_GUARD_SAMPLES;
use crate::error::{ResampleError, Result};
use crate::pipeline::{Downsampler, Upsampler};

/// Consumer of the 16 kHz analysis stream
///
/// Called once per processed block with exactly the samples the downsampler
/// produced for it. Runs on the processing thread; implementations must not
/// block.
pub trait AnalysisSink {
    fn consume(&mut self, samples: &[f32]);
}

impl<F: FnMut(&[f32])> AnalysisSink for F {
    fn consume(&mut self, samples: &[f32]) {
        self(samples)
    }
}

/// Sink that drops the analysis stream
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AnalysisSink for NullSink {
    fn consume(&mut self, _samples: &[f32]) {}
}

/// Per-call accounting returned by `BlockProcessor`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BlockStats {
    pub input_samples: usize,
    pub resampled_samples: usize,
}

/// Mixdown, 16 kHz round trip and fan-out for one stream
///
/// `prepare` allocates every buffer up front; `process_*` never allocates.
/// Host blocks longer than the prepared size are handled in slices of the
/// prepared size.
pub struct BlockProcessor {
    downsampler: Downsampler,
    upsampler: Upsampler,
    mono: Vec<f32>,
    resampled: Vec<f32>,
    max_block: usize,
    output_guard: usize,
}

impl BlockProcessor {
    pub fn new() -> Self {
        Self {
            downsampler: Downsampler::new(),
            upsampler: Upsampler::new(),
            mono: Vec::new(),
            resampled: Vec::new(),
            max_block: 0,
            output_guard: OUTPUT_GUARD_SAMPLES,
        }
    }

    /// Build and prepare a processor from validated configuration
    pub fn from_config(config: &ResamplerConfig) -> Result<Self> {
        config.validate()?;
        let mut processor = Self::new();
        processor.output_guard = config.pipeline.output_guard_samples;
        processor.prepare(config.audio.sample_rate as f64, config.audio.buffer_size)?;
        Ok(processor)
    }

    /// Configure both converters for `sample_rate` and size the buffers for
    /// blocks of up to `max_block` samples
    ///
    /// Must not run concurrently with processing.
    pub fn prepare(&mut self, sample_rate: f64, max_block: usize) -> Result<()> {
        if max_block == 0 {
            return Err(ResampleError::Config("block size must be positive".into()));
        }

        self.downsampler.initialize(sample_rate)?;
        self.upsampler.initialize(sample_rate)?;

        self.mono = vec![0.0; max_block];
        self.resampled =
            vec![0.0; self.downsampler.expected_output_size(max_block) + self.output_guard];
        self.max_block = max_block;

        log::info!(
            "Prepared block processor: {} Hz, {} samples per block, {} resampled slots",
            sample_rate,
            max_block,
            self.resampled.len()
        );
        Ok(())
    }

    /// Clear both converters' stream state, keeping rates and buffers
    pub fn reset(&mut self) {
        self.downsampler.reset();
        self.upsampler.reset();
        log::debug!("Block processor reset");
    }

    /// Process one stereo block
    ///
    /// The channels are averaged to mono, resampled to 16 kHz and handed to
    /// `sink`; the reconstructed signal is written to both output channels.
    pub fn process_stereo<S: AnalysisSink + ?Sized>(
        &mut self,
        left: &[f32],
        right: &[f32],
        out_left: &mut [f32],
        out_right: &mut [f32],
        sink: &mut S,
    ) -> Result<BlockStats> {
        let len = left.len();
        for actual in [right.len(), out_left.len(), out_right.len()] {
            if actual != len {
                return Err(ResampleError::OutputLength {
                    expected: len,
                    actual,
                });
            }
        }
        self.ensure_prepared()?;

        let mut stats = BlockStats::default();
        let mut start = 0;
        while start < len {
            let end = (start + self.max_block).min(len);
            let n = end - start;
            mix_to_mono(&left[start..end], &right[start..end], &mut self.mono[..n]);
            stats.resampled_samples += self.round_trip(n, &mut out_left[start..end], sink)?;
            start = end;
        }
        out_right.copy_from_slice(out_left);

        stats.input_samples = len;
        Ok(stats)
    }

    /// Process one mono block
    pub fn process_mono<S: AnalysisSink + ?Sized>(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        sink: &mut S,
    ) -> Result<BlockStats> {
        if output.len() != input.len() {
            return Err(ResampleError::OutputLength {
                expected: input.len(),
                actual: output.len(),
            });
        }
        self.ensure_prepared()?;

        let mut stats = BlockStats {
            input_samples: input.len(),
            resampled_samples: 0,
        };
        for (chunk, out) in input
            .chunks(self.max_block)
            .zip(output.chunks_mut(self.max_block))
        {
            self.mono[..chunk.len()].copy_from_slice(chunk);
            stats.resampled_samples += self.round_trip(chunk.len(), out, sink)?;
        }
        Ok(stats)
    }

    fn round_trip<S: AnalysisSink + ?Sized>(
        &mut self,
        n: usize,
        output: &mut [f32],
        sink: &mut S,
    ) -> Result<usize> {
        let produced = self
            .downsampler
            .resample(&self.mono[..n], &mut self.resampled)?;
        let resampled = &self.resampled[..produced];
        sink.consume(resampled);
        self.upsampler.expand(resampled, output)?;
        Ok(produced)
    }

    fn ensure_prepared(&self) -> Result<()> {
        if self.max_block == 0 {
            return Err(ResampleError::NotConfigured);
        }
        Ok(())
    }

    /// End-to-end delay of the reconstructed signal, in source-rate samples
    pub fn latency_samples(&self) -> f32 {
        self.downsampler.group_delay_samples() + self.upsampler.group_delay_samples()
    }

    pub fn max_block(&self) -> usize {
        self.max_block
    }

    pub fn downsampler(&self) -> &Downsampler {
        &self.downsampler
    }

    pub fn upsampler(&self) -> &Upsampler {
        &self.upsampler
    }
}

impl Default for BlockProcessor {
    fn default() -> Self {
        Self::new()
    }
}
