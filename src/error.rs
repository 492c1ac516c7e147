use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResampleError {
    #[error("Invalid sample rate: {0} Hz (must be positive and finite)")]
    InvalidSampleRate(f64),

    #[error("Rate converter used before initialize()")]
    NotConfigured,

    #[error("Output buffer too small: need {needed} samples, have {available}")]
    OutputOverflow { needed: usize, available: usize },

    #[error("Channel length mismatch: expected {expected} samples, got {actual}")]
    OutputLength { expected: usize, actual: usize },

    #[error("Audio device error: {0}")]
    AudioDevice(String),

    #[error("Audio stream error: {0}")]
    AudioStream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("WAV error: {0}")]
    Wav(String),
}

impl From<hound::Error> for ResampleError {
    fn from(e: hound::Error) -> Self {
        ResampleError::Wav(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ResampleError>;
