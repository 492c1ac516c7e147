//! Frequency-domain checks on tap tables

use num_complex::Complex64;
use std::f64::consts::PI;

/// Complex frequency response of `taps` at `freq_hz`
pub fn frequency_response(taps: &[f32], freq_hz: f64, sample_rate: f64) -> Complex64 {
    let omega = 2.0 * PI * freq_hz / sample_rate;
    taps.iter()
        .enumerate()
        .map(|(n, &h)| Complex64::from_polar(h as f64, -omega * n as f64))
        .sum()
}

/// Linear magnitude response at `freq_hz`
pub fn magnitude_response(taps: &[f32], freq_hz: f64, sample_rate: f64) -> f64 {
    frequency_response(taps, freq_hz, sample_rate).norm()
}

/// Magnitude response in dB, floored at -240 dB
pub fn magnitude_response_db(taps: &[f32], freq_hz: f64, sample_rate: f64) -> f64 {
    20.0 * magnitude_response(taps, freq_hz, sample_rate)
        .max(1e-12)
        .log10()
}

pub fn dc_gain(taps: &[f32]) -> f64 {
    taps.iter().map(|&t| t as f64).sum()
}

/// True when `taps[i] == taps[len - 1 - i]` for every `i`
pub fn is_symmetric(taps: &[f32]) -> bool {
    taps.iter().eq(taps.iter().rev())
}
