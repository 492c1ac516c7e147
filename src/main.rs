use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use rtresample::audio::{AudioSource, DeviceSource, mix_interleaved_to_mono};
use rtresample::config::SampleRate;
use rtresample::{BlockProcessor, ResamplerConfig};

#[derive(Parser, Debug)]
#[command(name = "rtresample")]
#[command(about = "Monitor the 16 kHz analysis stream of a live input", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Capture sample rate (e.g. "44100", "48k")
    #[arg(short = 'r', long)]
    sample_rate: Option<SampleRate>,

    /// Capture block size in frames
    #[arg(short = 'b', long)]
    block_size: Option<usize>,

    /// Seconds between status lines
    #[arg(long, default_value_t = 1.0)]
    interval: f32,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Running levels between status lines
#[derive(Debug, Default)]
struct LevelMeter {
    blocks: usize,
    analysis_samples: usize,
    analysis_energy: f64,
    output_samples: usize,
    output_energy: f64,
}

impl LevelMeter {
    fn rms_db(energy: f64, count: usize) -> f64 {
        if count == 0 {
            return f64::NEG_INFINITY;
        }
        10.0 * (energy / count as f64).max(1e-20).log10()
    }
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
    if let Some(rate) = args.sample_rate {
        config.audio.sample_rate = rate.as_hz();
    }
    if let Some(block_size) = args.block_size {
        config.audio.buffer_size = block_size;
    }
    config.validate()?;

    println!("=== rtresample - 16 kHz analysis monitor ===");
    println!("Capture: {} Hz, {} channel(s)", config.audio.sample_rate, config.audio.channels);
    println!("Block size: {} frames", config.audio.buffer_size);
    println!();

    let mut processor = BlockProcessor::from_config(&config)?;
    println!(
        "Round-trip latency: {:.1} samples ({:.2} ms)",
        processor.latency_samples(),
        1000.0 * processor.latency_samples() / config.audio.sample_rate as f32
    );

    println!("Starting audio capture...");
    let mut source = DeviceSource::new(&config.audio).context("Failed to open input device")?;
    println!("Audio capture started. Processing...\n");

    run_processing_loop(&mut source, &mut processor, Duration::from_secs_f32(args.interval))
}

fn run_processing_loop(
    source: &mut dyn AudioSource,
    processor: &mut BlockProcessor,
    interval: Duration,
) -> anyhow::Result<()> {
    let channels = source.channels() as usize;
    let mut mono = vec![0.0f32; processor.max_block()];
    let mut output = vec![0.0f32; processor.max_block()];
    let mut meter = LevelMeter::default();
    let mut last_report = Instant::now();

    while let Some(buffer) = source.next_buffer()? {
        // Capture blocks may exceed the prepared size; the processor slices
        // them, but the scratch buffers here must cover the whole block.
        let frames = buffer.len() / channels.max(1);
        if frames > mono.len() {
            log::debug!("Growing scratch buffers to {} frames", frames);
            mono.resize(frames, 0.0);
            output.resize(frames, 0.0);
        }

        let frames = mix_interleaved_to_mono(&buffer, channels, &mut mono);
        let mut sink = |samples: &[f32]| {
            meter.analysis_energy += samples.iter().map(|&s| (s as f64).powi(2)).sum::<f64>();
        };
        let stats = processor.process_mono(&mono[..frames], &mut output[..frames], &mut sink)?;

        meter.blocks += 1;
        meter.analysis_samples += stats.resampled_samples;
        meter.output_samples += frames;
        meter.output_energy += output[..frames]
            .iter()
            .map(|&s| (s as f64).powi(2))
            .sum::<f64>();

        if last_report.elapsed() >= interval {
            println!(
                "blocks: {:>4}  16k samples: {:>6}  analysis: {:>6.1} dBFS  reconstructed: {:>6.1} dBFS",
                meter.blocks,
                meter.analysis_samples,
                LevelMeter::rms_db(meter.analysis_energy, meter.analysis_samples),
                LevelMeter::rms_db(meter.output_energy, meter.output_samples),
            );
            log::trace!(
                "downsampler accumulator at {:.6}",
                processor.downsampler().time_accumulator()
            );
            meter = LevelMeter::default();
            last_report = Instant::now();
        }
    }

    eprintln!("Audio stream closed");
    Ok(())
}
