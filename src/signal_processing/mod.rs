pub mod delay_line;
pub mod fir_core;
pub mod fractional;
pub mod response;
pub mod taps;

pub use delay_line::DelayLine;
pub use fir_core::FirStage;
pub use fractional::{FractionalPhase, lerp};
pub use response::{dc_gain, is_symmetric, magnitude_response, magnitude_response_db};
pub use taps::{AntiAliasTaps, ReconstructionTaps, TapSet};
