pub mod audio;
pub mod config;
pub mod constants;
pub mod error;
pub mod pipeline;
pub mod processing;
pub mod signal_processing;
pub mod wav;

pub use config::ResamplerConfig;
pub use error::{ResampleError, Result};
pub use pipeline::{Downsampler, Upsampler};
pub use processing::{AnalysisSink, BlockProcessor, BlockStats, NullSink};
pub use wav::save_wav;
