use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crossbeam_channel::Receiver;
use hound::WavReader;

use super::AudioCapture;
use crate::config::AudioConfig;
use crate::error::{ResampleError, Result};

/// Producer of interleaved sample blocks
pub trait AudioSource: Send {
    /// Next interleaved block, `None` once the source is exhausted
    fn next_buffer(&mut self) -> anyhow::Result<Option<Vec<f32>>>;
    fn sample_rate(&self) -> u32;
    fn channels(&self) -> u16;
}

pub struct DeviceSource {
    rx: Receiver<Vec<f32>>,
    sample_rate: u32,
    channels: u16,
    _capture: AudioCapture,
}

impl DeviceSource {
    pub fn new(config: &AudioConfig) -> Result<Self> {
        let (tx, rx) = crossbeam_channel::bounded(10);
        let capture = AudioCapture::new(config, tx)?;
        Ok(Self {
            rx,
            sample_rate: config.sample_rate,
            channels: config.channels,
            _capture: capture,
        })
    }
}

impl AudioSource for DeviceSource {
    fn next_buffer(&mut self) -> anyhow::Result<Option<Vec<f32>>> {
        match self.rx.recv() {
            Ok(data) => Ok(Some(data)),
            Err(_) => Ok(None),
        }
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn channels(&self) -> u16 {
        self.channels
    }
}

/// Mono or stereo WAV file delivered in fixed-size frame blocks
pub struct WavFileSource {
    samples: Vec<f32>,
    position: usize,
    chunk_len: usize,
    sample_rate: u32,
    channels: u16,
}

impl WavFileSource {
    /// Open `path`, delivering `frames_per_chunk` frames per `next_buffer`
    pub fn new<P: AsRef<Path>>(path: P, frames_per_chunk: usize) -> Result<Self> {
        let reader = WavReader::open(path.as_ref())?;
        let spec = reader.spec();

        if spec.channels == 0 || spec.channels > 2 {
            return Err(ResampleError::Wav(format!(
                "Expected mono or stereo WAV file, got {} channels",
                spec.channels
            )));
        }

        let samples = Self::read_samples(reader, &spec)?;
        log::debug!(
            "Loaded {} frames at {} Hz from {}",
            samples.len() / spec.channels as usize,
            spec.sample_rate,
            path.as_ref().display()
        );

        Ok(Self {
            samples,
            position: 0,
            chunk_len: frames_per_chunk.max(1) * spec.channels as usize,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
        })
    }

    fn read_samples(
        mut reader: WavReader<BufReader<File>>,
        spec: &hound::WavSpec,
    ) -> Result<Vec<f32>> {
        let samples = match spec.sample_format {
            hound::SampleFormat::Float => {
                reader.samples::<f32>().collect::<std::result::Result<Vec<_>, _>>()?
            }
            hound::SampleFormat::Int => {
                let max_val = 2_i64.pow(spec.bits_per_sample as u32 - 1) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / max_val))
                    .collect::<std::result::Result<Vec<_>, _>>()?
            }
        };
        Ok(samples)
    }

    /// Total frames in the file
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }
}

impl AudioSource for WavFileSource {
    fn next_buffer(&mut self) -> anyhow::Result<Option<Vec<f32>>> {
        if self.position >= self.samples.len() {
            return Ok(None);
        }

        let end = (self.position + self.chunk_len).min(self.samples.len());
        let chunk = self.samples[self.position..end].to_vec();
        self.position = end;

        Ok(Some(chunk))
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn channels(&self) -> u16 {
        self.channels
    }
}
