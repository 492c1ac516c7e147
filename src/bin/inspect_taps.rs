use clap::Parser;
use serde::Serialize;

use rtresample::constants::DESIGN_SOURCE_RATE;
use rtresample::signal_processing::{
    AntiAliasTaps, FirStage, ReconstructionTaps, TapSet, dc_gain, is_symmetric,
    magnitude_response_db,
};

const PROBE_FREQUENCIES_HZ: [f64; 10] = [
    100.0, 1000.0, 5000.0, 7200.0, 8000.0, 8800.0, 10000.0, 12000.0, 15000.0, 20000.0,
];

#[derive(Parser, Debug)]
#[command(name = "inspect_taps")]
#[command(about = "Print the compiled-in filter tables and their responses", long_about = None)]
struct Args {
    /// Evaluate responses at this source rate instead of 44.1 kHz
    #[arg(short = 'r', long, default_value_t = DESIGN_SOURCE_RATE)]
    sample_rate: f64,

    /// Also print every coefficient
    #[arg(short = 't', long)]
    taps: bool,

    /// Output format: text, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct ResponsePoint {
    freq_hz: f64,
    magnitude_db: f64,
}

#[derive(Debug, Serialize)]
struct TableReport {
    name: &'static str,
    cutoff_hz: f64,
    num_taps: usize,
    dc_gain: f64,
    symmetric: bool,
    group_delay_samples: f32,
    response: Vec<ResponsePoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    taps: Option<Vec<f32>>,
}

fn report<T: TapSet>(sample_rate: f64, with_taps: bool) -> TableReport {
    let stage: FirStage<T> = FirStage::new();
    let taps = stage.taps();
    TableReport {
        name: stage.name(),
        cutoff_hz: T::CUTOFF_HZ,
        num_taps: stage.num_taps(),
        dc_gain: dc_gain(taps),
        symmetric: is_symmetric(taps),
        group_delay_samples: stage.group_delay_samples(),
        response: PROBE_FREQUENCIES_HZ
            .iter()
            .filter(|&&f| f < sample_rate / 2.0)
            .map(|&freq_hz| ResponsePoint {
                freq_hz,
                magnitude_db: magnitude_response_db(taps, freq_hz, sample_rate),
            })
            .collect(),
        taps: with_taps.then(|| taps.to_vec()),
    }
}

fn print_text(reports: &[TableReport], sample_rate: f64) {
    println!("Responses at {} Hz", sample_rate);
    for r in reports {
        println!();
        println!("{} ({} taps, cutoff {} Hz)", r.name, r.num_taps, r.cutoff_hz);
        println!("  DC gain:     {:.9}", r.dc_gain);
        println!("  symmetric:   {}", r.symmetric);
        println!("  group delay: {:.1} samples", r.group_delay_samples);
        for point in &r.response {
            println!("  {:>8.0} Hz  {:>8.2} dB", point.freq_hz, point.magnitude_db);
        }
        if let Some(ref taps) = r.taps {
            for (i, t) in taps.iter().enumerate() {
                println!("  h[{:>2}] = {:>14.10}", i, t);
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if !(args.sample_rate.is_finite() && args.sample_rate > 0.0) {
        anyhow::bail!("sample rate must be positive, got {}", args.sample_rate);
    }

    let reports = [
        report::<AntiAliasTaps>(args.sample_rate, args.taps),
        report::<ReconstructionTaps>(args.sample_rate, args.taps),
    ];

    match args.format {
        OutputFormat::Text => print_text(&reports, args.sample_rate),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }
    Ok(())
}
