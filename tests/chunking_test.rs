mod test_signals;

use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rtresample::{BlockProcessor, ResampleError, ResamplerConfig};
use test_signals::{tone, white_noise};

const SOURCE_RATE: f64 = 44100.0;

fn analysis_stream(processor: &mut BlockProcessor, input: &[f32], sizes: &[usize]) -> Vec<f32> {
    let mut analysis = Vec::new();
    let mut output = vec![0.0f32; input.len()];
    let mut pos = 0;
    for &len in sizes {
        let end = (pos + len).min(input.len());
        let mut sink = |s: &[f32]| analysis.extend_from_slice(s);
        processor
            .process_mono(&input[pos..end], &mut output[pos..end], &mut sink)
            .unwrap();
        pos = end;
    }
    assert_eq!(pos, input.len());
    assert!(output.iter().all(|s| s.is_finite()));
    analysis
}

fn fixed_sizes(total: usize, block: usize) -> Vec<usize> {
    (0..total.div_ceil(block)).map(|_| block).collect()
}

#[test]
fn test_analysis_stream_independent_of_host_block_sizes() {
    let input = tone(880.0, 0.5, SOURCE_RATE as f32, 20000);

    let mut reference = BlockProcessor::new();
    reference.prepare(SOURCE_RATE, 512).unwrap();
    let expected = analysis_stream(&mut reference, &input, &fixed_sizes(input.len(), 512));

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..10 {
        let mut sizes = Vec::new();
        let mut remaining = input.len();
        while remaining > 0 {
            // Sizes above the prepared 512 exercise internal slicing.
            let len = rng.random_range(0..=1500).min(remaining);
            sizes.push(len);
            remaining -= len;
        }

        let mut processor = BlockProcessor::new();
        processor.prepare(SOURCE_RATE, 512).unwrap();
        let got = analysis_stream(&mut processor, &input, &sizes);
        assert_eq!(got, expected);
    }
}

#[test]
fn test_noise_block_counts_stay_bounded() {
    let input = white_noise(512 * 200, 0.9, 3);
    let mut processor = BlockProcessor::new();
    processor.prepare(SOURCE_RATE, 512).unwrap();

    let mut output = vec![0.0f32; 512];
    let mut total = 0;
    for chunk in input.chunks(512) {
        let mut count = 0;
        let mut sink = |s: &[f32]| {
            assert!(s.iter().all(|v| v.is_finite()));
            count += s.len();
        };
        let stats = processor.process_mono(chunk, &mut output, &mut sink).unwrap();
        assert_eq!(stats.resampled_samples, count);
        assert!(count == 185 || count == 186, "block produced {}", count);
        assert!(output.iter().all(|s| s.is_finite() && s.abs() < 2.0));
        total += count;
    }

    let expected = input.len() as f64 * 16000.0 / SOURCE_RATE;
    assert!((total as f64 - expected).abs() <= 1.0);
}

#[test]
fn test_reset_restarts_the_stream() {
    let input = tone(640.0, 0.5, SOURCE_RATE as f32, 4096);
    let sizes = fixed_sizes(input.len(), 256);

    let mut processor = BlockProcessor::new();
    processor.prepare(SOURCE_RATE, 256).unwrap();
    let first = analysis_stream(&mut processor, &input, &sizes);

    processor.reset();
    assert_eq!(processor.downsampler().time_accumulator(), 0.0);
    let second = analysis_stream(&mut processor, &input, &sizes);
    assert_eq!(first, second);
}

#[test]
fn test_reprepare_at_new_rate() {
    let mut processor = BlockProcessor::new();
    processor.prepare(SOURCE_RATE, 512).unwrap();
    let input = tone(440.0, 0.5, 48000.0, 4800);
    analysis_stream(&mut processor, &input, &fixed_sizes(input.len(), 512));

    processor.prepare(48000.0, 480).unwrap();
    assert_eq!(processor.downsampler().source_rate(), Some(48000.0));
    let analysis = analysis_stream(&mut processor, &input, &fixed_sizes(input.len(), 480));
    // 0.1 s of 48 kHz input
    assert!((1599..=1600).contains(&analysis.len()), "{}", analysis.len());
}

#[test]
fn test_config_file_round_trip() {
    let config = ResamplerConfig::from_toml_str(
        "[audio]\nsample_rate = 48000\nbuffer_size = 480\nchannels = 1\n",
    )
    .unwrap();
    let processor = BlockProcessor::from_config(&config).unwrap();
    assert_eq!(processor.max_block(), 480);

    let err = ResamplerConfig::from_toml_str("[audio]\nchannels = 3\n").unwrap_err();
    assert!(matches!(err, ResampleError::Config(_)));
}
