/// Average two channels into `mono`
///
/// All three slices must have the same length.
pub fn mix_to_mono(left: &[f32], right: &[f32], mono: &mut [f32]) {
    debug_assert_eq!(left.len(), right.len());
    debug_assert_eq!(left.len(), mono.len());
    for ((m, &l), &r) in mono.iter_mut().zip(left).zip(right) {
        *m = 0.5 * (l + r);
    }
}

/// Average interleaved frames of `channels` samples into `mono`
///
/// Mono input is copied through. Returns the number of frames written.
pub fn mix_interleaved_to_mono(interleaved: &[f32], channels: usize, mono: &mut [f32]) -> usize {
    if channels <= 1 {
        let n = interleaved.len().min(mono.len());
        mono[..n].copy_from_slice(&interleaved[..n]);
        return n;
    }

    let scale = 1.0 / channels as f32;
    let mut frames = 0;
    for (m, frame) in mono.iter_mut().zip(interleaved.chunks_exact(channels)) {
        *m = frame.iter().sum::<f32>() * scale;
        frames += 1;
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_to_mono_averages() {
        let mut mono = [0.0f32; 3];
        mix_to_mono(&[1.0, 0.0, -1.0], &[0.0, 0.5, -1.0], &mut mono);
        assert_eq!(mono, [0.5, 0.25, -1.0]);
    }

    #[test]
    fn test_mix_interleaved_stereo() {
        let mut mono = [0.0f32; 4];
        let frames = mix_interleaved_to_mono(&[1.0, 0.0, 0.5, 0.5, -1.0, 1.0], 2, &mut mono);
        assert_eq!(frames, 3);
        assert_eq!(mono[..3], [0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_mix_interleaved_mono_copies() {
        let mut mono = [0.0f32; 2];
        assert_eq!(mix_interleaved_to_mono(&[0.1, 0.2, 0.3], 1, &mut mono), 2);
        assert_eq!(mono, [0.1, 0.2]);
    }
}
