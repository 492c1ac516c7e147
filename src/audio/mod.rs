pub mod capture;
pub mod mixdown;
pub mod source;

pub use capture::AudioCapture;
pub use mixdown::{mix_interleaved_to_mono, mix_to_mono};
pub use source::{AudioSource, DeviceSource, WavFileSource};
