use anyhow::Context;
use clap::Parser;
use rolling_stats::Stats;
use serde::Serialize;
use std::path::{Path, PathBuf};

use rtresample::audio::{AudioSource, WavFileSource, mix_interleaved_to_mono};
use rtresample::config::{ResamplerConfig, SampleRate};
use rtresample::constants::TARGET_SAMPLE_RATE;
use rtresample::{BlockProcessor, save_wav};

#[derive(Parser, Debug)]
#[command(name = "resample_wav")]
#[command(about = "Run WAV files through the 16 kHz analysis round trip", long_about = None)]
struct Args {
    /// WAV files to process (mono or stereo)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Block size in frames (overrides the config file)
    #[arg(short = 'b', long)]
    block_size: Option<usize>,

    /// Directory for the 16 kHz stream (<stem>_16k.wav)
    #[arg(long)]
    analysis_dir: Option<PathBuf>,

    /// Directory for the reconstructed stream (<stem>_reconstructed.wav)
    #[arg(long)]
    reconstructed_dir: Option<PathBuf>,

    /// Expected source rate; files at other rates are reported and skipped
    #[arg(long)]
    expect_rate: Option<SampleRate>,

    /// Output format: text, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize)]
struct StatsSummary {
    count: usize,
    mean: f32,
    std_dev: f32,
    min: f32,
    max: f32,
}

impl StatsSummary {
    fn from_stats(stats: &Stats<f32>) -> Option<Self> {
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        })
    }
}

#[derive(Debug, Clone, Serialize, Default)]
struct FileReport {
    filename: String,
    sample_rate: u32,
    channels: u16,
    input_frames: usize,
    analysis_samples: usize,
    block_output_counts: Option<StatsSummary>,
    latency_samples: f32,
    round_trip_error_db: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = match args.config {
        Some(ref path) => ResamplerConfig::from_file(path).context("Failed to load config")?,
        None => ResamplerConfig::default(),
    };
    if let Some(block_size) = args.block_size {
        config.audio.buffer_size = block_size;
    }
    config.validate()?;

    let reports: Vec<FileReport> = args
        .files
        .iter()
        .map(|path| {
            process_file(path, &config, &args).unwrap_or_else(|e| FileReport {
                filename: path.display().to_string(),
                error: Some(format!("{:#}", e)),
                ..FileReport::default()
            })
        })
        .collect();

    match args.format {
        OutputFormat::Text => print_text(&reports),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }

    Ok(())
}

fn process_file(path: &Path, config: &ResamplerConfig, args: &Args) -> anyhow::Result<FileReport> {
    let block = config.audio.buffer_size;
    let mut source = WavFileSource::new(path, block)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let sample_rate = source.sample_rate();
    let channels = source.channels() as usize;

    if let Some(expected) = args.expect_rate
        && expected.as_hz() != sample_rate
    {
        anyhow::bail!("sample rate {} Hz, expected {}", sample_rate, expected);
    }

    let mut file_config = config.clone();
    file_config.audio.sample_rate = sample_rate;
    let mut processor = BlockProcessor::from_config(&file_config)?;

    let mut mono = vec![0.0f32; block];
    let mut reconstructed_block = vec![0.0f32; block];
    let mut original = Vec::with_capacity(source.frames());
    let mut reconstructed = Vec::with_capacity(source.frames());
    let mut analysis = Vec::new();
    let mut block_counts: Stats<f32> = Stats::new();

    while let Some(chunk) = source.next_buffer()? {
        let frames = mix_interleaved_to_mono(&chunk, channels, &mut mono);
        let mut sink = |samples: &[f32]| analysis.extend_from_slice(samples);
        let stats = processor.process_mono(
            &mono[..frames],
            &mut reconstructed_block[..frames],
            &mut sink,
        )?;
        block_counts.update(stats.resampled_samples as f32);

        original.extend_from_slice(&mono[..frames]);
        reconstructed.extend_from_slice(&reconstructed_block[..frames]);
    }

    let latency = processor.latency_samples();
    log::info!(
        "{}: {} frames -> {} analysis samples",
        path.display(),
        original.len(),
        analysis.len()
    );

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());

    if let Some(ref dir) = args.analysis_dir {
        let out = dir.join(format!("{}_16k.wav", stem));
        save_wav(&out, &analysis, TARGET_SAMPLE_RATE as u32, 1)
            .with_context(|| format!("Failed to write {}", out.display()))?;
    }
    if let Some(ref dir) = args.reconstructed_dir {
        let out = dir.join(format!("{}_reconstructed.wav", stem));
        save_wav(&out, &reconstructed, sample_rate, 1)
            .with_context(|| format!("Failed to write {}", out.display()))?;
    }

    Ok(FileReport {
        filename: path.display().to_string(),
        sample_rate,
        channels: channels as u16,
        input_frames: original.len(),
        analysis_samples: analysis.len(),
        block_output_counts: StatsSummary::from_stats(&block_counts),
        latency_samples: latency,
        round_trip_error_db: round_trip_error_db(&original, &reconstructed, latency.round() as usize),
        error: None,
    })
}

/// Residual after aligning the reconstruction by `delay`, relative to the
/// input power
fn round_trip_error_db(original: &[f32], reconstructed: &[f32], delay: usize) -> Option<f32> {
    if reconstructed.len() <= delay {
        return None;
    }
    let aligned = reconstructed[delay..].iter().zip(original);
    let (mut signal, mut residual) = (0.0f64, 0.0f64);
    for (&y, &x) in aligned {
        signal += (x as f64).powi(2);
        residual += (y as f64 - x as f64).powi(2);
    }
    if signal <= 0.0 {
        return None;
    }
    Some((10.0 * (residual.max(1e-30) / signal).log10()) as f32)
}

fn print_text(reports: &[FileReport]) {
    for report in reports {
        println!("{}", report.filename);
        if let Some(ref error) = report.error {
            println!("  error: {}", error);
            continue;
        }
        println!(
            "  {} Hz, {} channel(s), {} frames",
            report.sample_rate, report.channels, report.input_frames
        );
        println!(
            "  analysis stream: {} samples at {} Hz",
            report.analysis_samples, TARGET_SAMPLE_RATE
        );
        if let Some(ref counts) = report.block_output_counts {
            println!(
                "  per-block output: mean {:.2}, std {:.2}, min {}, max {} over {} blocks",
                counts.mean, counts.std_dev, counts.min, counts.max, counts.count
            );
        }
        println!("  latency: {:.1} samples", report.latency_samples);
        if let Some(err_db) = report.round_trip_error_db {
            println!("  round-trip error: {:.1} dB", err_db);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_error_of_exact_delay_is_silent() {
        let original: Vec<f32> = (0..100).map(|i| (i as f32 * 0.1).sin()).collect();
        let mut delayed = vec![0.0f32; 5];
        delayed.extend_from_slice(&original[..95]);

        let db = round_trip_error_db(&original, &delayed, 5).unwrap();
        assert!(db < -200.0, "got {} dB", db);
    }

    #[test]
    fn test_round_trip_error_needs_overlap() {
        assert!(round_trip_error_db(&[1.0; 4], &[1.0; 4], 4).is_none());
        assert!(round_trip_error_db(&[0.0; 8], &[0.0; 8], 2).is_none());
    }
}
