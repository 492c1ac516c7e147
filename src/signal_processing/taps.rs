//! Precomputed FIR tap tables
//!
//! Both tables are 64-tap Kaiser-windowed sinc low-pass designs at 44.1 kHz,
//! normalised to unity DC gain. They are symmetric, so both stages are linear
//! phase with a group delay of 31.5 samples. Regenerate and check them with the
//! `inspect_taps` binary.

use crate::constants::FIR_NUM_TAPS;

/// A compile-time coefficient set for one filter stage
pub trait TapSet: std::fmt::Debug + Clone {
    /// Short label used in logs and tooling
    const NAME: &'static str;
    /// Cutoff the table was designed for, in Hz at the design source rate
    const CUTOFF_HZ: f64;
    const TAPS: &'static [f32; FIR_NUM_TAPS];
}

/// Anti-aliasing filter ahead of the 16 kHz decimation
///
/// Cutoff 7200 Hz (0.9 of the target Nyquist), Kaiser beta 8, roughly 80 dB
/// stopband attenuation.
#[derive(Debug, Clone, Copy)]
pub struct AntiAliasTaps;

/// Reconstruction (anti-imaging) filter after the expansion back to the
/// source rate
///
/// Cutoff 7600 Hz, Kaiser beta 7. Slightly wider than the anti-aliasing
/// filter since the images of a 7.2 kHz band only start at 8.8 kHz.
#[derive(Debug, Clone, Copy)]
pub struct ReconstructionTaps;

impl TapSet for AntiAliasTaps {
    const NAME: &'static str = "anti-alias";
    const CUTOFF_HZ: f64 = 7200.0;
    const TAPS: &'static [f32; FIR_NUM_TAPS] = &ANTI_ALIAS_TAPS;
}

impl TapSet for ReconstructionTaps {
    const NAME: &'static str = "reconstruction";
    const CUTOFF_HZ: f64 = 7600.0;
    const TAPS: &'static [f32; FIR_NUM_TAPS] = &RECONSTRUCTION_TAPS;
}

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
pub const ANTI_ALIAS_TAPS: [f32; FIR_NUM_TAPS] = [
     0.0000184784, -0.0000071143, -0.0000963332, -0.0001462596,
     0.0000180091,  0.0003734039,  0.0005192430,  0.0000000000,
    -0.0009897702, -0.0013696611, -0.0001297310,  0.0021426840,
     0.0030400929,  0.0005345436, -0.0040657142, -0.0060149894,
    -0.0014979200,  0.0070431688,  0.0110111194,  0.0035014124,
    -0.0115048512, -0.0192846525, -0.0074570493,  0.0183993315,
     0.0337949562,  0.0156463642, -0.0308599694, -0.0652113602,
    -0.0376749062,  0.0678416378,  0.2103109281,  0.3121149084,
     0.3121149084,  0.2103109281,  0.0678416378, -0.0376749062,
    -0.0652113602, -0.0308599694,  0.0156463642,  0.0337949562,
     0.0183993315, -0.0074570493, -0.0192846525, -0.0115048512,
     0.0035014124,  0.0110111194,  0.0070431688, -0.0014979200,
    -0.0060149894, -0.0040657142,  0.0005345436,  0.0030400929,
     0.0021426840, -0.0001297310, -0.0013696611, -0.0009897702,
     0.0000000000,  0.0005192430,  0.0003734039,  0.0000180091,
    -0.0001462596, -0.0000963332, -0.0000071143,  0.0000184784,
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
pub const RECONSTRUCTION_TAPS: [f32; FIR_NUM_TAPS] = [
     0.0000260045,  0.0001190632,  0.0001023099, -0.0001680061,
    -0.0004701342, -0.0002729657,  0.0005659104,  0.0012147546,
     0.0004993161, -0.0014530358, -0.0025490406, -0.0006824363,
     0.0031686935,  0.0046849049,  0.0006131810, -0.0061888569,
    -0.0078510922,  0.0000758530,  0.0112179204,  0.0123536758,
    -0.0020156064, -0.0194992292, -0.0188225751,  0.0064526768,
     0.0339833142,  0.0291974631, -0.0168632134, -0.0653379780,
    -0.0527518813,  0.0525168806,  0.2103411547,  0.3277929746,
     0.3277929746,  0.2103411547,  0.0525168806, -0.0527518813,
    -0.0653379780, -0.0168632134,  0.0291974631,  0.0339833142,
     0.0064526768, -0.0188225751, -0.0194992292, -0.0020156064,
     0.0123536758,  0.0112179204,  0.0000758530, -0.0078510922,
    -0.0061888569,  0.0006131810,  0.0046849049,  0.0031686935,
    -0.0006824363, -0.0025490406, -0.0014530358,  0.0004993161,
     0.0012147546,  0.0005659104, -0.0002729657, -0.0004701342,
    -0.0001680061,  0.0001023099,  0.0001190632,  0.0000260045,
];

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn check_symmetric(taps: &[f32; FIR_NUM_TAPS]) {
        for i in 0..FIR_NUM_TAPS / 2 {
            assert_eq!(taps[i], taps[FIR_NUM_TAPS - 1 - i], "tap {} not mirrored", i);
        }
    }

    #[test]
    fn test_tables_are_symmetric() {
        check_symmetric(AntiAliasTaps::TAPS);
        check_symmetric(ReconstructionTaps::TAPS);
    }

    #[test]
    fn test_tables_have_unity_dc_gain() {
        let aa: f64 = ANTI_ALIAS_TAPS.iter().map(|&t| t as f64).sum();
        let rc: f64 = RECONSTRUCTION_TAPS.iter().map(|&t| t as f64).sum();
        assert_abs_diff_eq!(aa, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(rc, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_tables_differ() {
        assert_ne!(ANTI_ALIAS_TAPS, RECONSTRUCTION_TAPS);
    }
}
