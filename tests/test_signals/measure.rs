pub fn rms(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let energy: f64 = samples.iter().map(|&s| (s as f64).powi(2)).sum();
    (energy / samples.len() as f64).sqrt()
}

/// Level of `samples` relative to `reference`, in dB
pub fn level_db(samples: &[f32], reference: &[f32]) -> f64 {
    20.0 * (rms(samples).max(1e-15) / rms(reference).max(1e-15)).log10()
}

/// Alignment of `output` against `input` delayed by `lag` samples
#[derive(Debug, Clone, Copy)]
pub struct Alignment {
    pub lag: usize,
    pub rms_error: f64,
}

/// Lag in `0..=max_lag` minimising the RMS difference between
/// `output[n]` and `input[n - lag]` for `n >= skip`
pub fn best_alignment(input: &[f32], output: &[f32], max_lag: usize, skip: usize) -> Alignment {
    let mut best = Alignment {
        lag: 0,
        rms_error: f64::INFINITY,
    };
    for lag in 0..=max_lag {
        let start = skip.max(lag);
        let end = output.len().min(input.len() + lag);
        if end <= start {
            continue;
        }
        let energy: f64 = (start..end)
            .map(|n| (output[n] as f64 - input[n - lag] as f64).powi(2))
            .sum();
        let rms_error = (energy / (end - start) as f64).sqrt();
        if rms_error < best.rms_error {
            best = Alignment { lag, rms_error };
        }
    }
    best
}
