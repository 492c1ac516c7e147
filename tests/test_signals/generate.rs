use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::f32::consts::PI;

/// Sine of `amplitude` at `freq` Hz, `len` samples at `sample_rate`
pub fn tone(freq: f32, amplitude: f32, sample_rate: f32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| amplitude * (2.0 * PI * freq * i as f32 / sample_rate).sin())
        .collect()
}

/// Uniform noise in `[-amplitude, amplitude]`, reproducible per seed
pub fn white_noise(len: usize, amplitude: f32, seed: u64) -> Vec<f32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| rng.random_range(-amplitude..=amplitude))
        .collect()
}
