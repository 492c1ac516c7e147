pub mod generate;
pub mod measure;

pub use generate::{tone, white_noise};
pub use measure::{best_alignment, level_db, rms};
