/// Fixed-capacity circular delay line
///
/// Holds the `N` most recent samples. `write_index` always points at the slot
/// the next `push` overwrites. `N` must be a power of two so wrapping is a
/// bitmask instead of a modulo.
#[derive(Debug, Clone)]
pub struct DelayLine<const N: usize> {
    buffer: [f32; N],
    write_index: usize,
}

impl<const N: usize> DelayLine<N> {
    const MASK: usize = {
        assert!(N.is_power_of_two(), "delay line length must be a power of two");
        N - 1
    };

    pub fn new() -> Self {
        Self {
            buffer: [0.0; N],
            write_index: 0,
        }
    }

    /// Store a sample at the write index and advance it
    ///
    /// Returns the slot the sample was written to.
    #[inline]
    pub fn push(&mut self, sample: f32) -> usize {
        let slot = self.write_index;
        self.buffer[slot] = sample;
        self.write_index = (slot + 1) & Self::MASK;
        slot
    }

    /// Dot product of `taps` with the history, newest sample first
    ///
    /// `taps[0]` pairs with the sample stored at `newest`, `taps[i]` with the
    /// sample pushed `i` steps before it.
    #[inline]
    pub fn convolve(&self, taps: &[f32; N], newest: usize) -> f32 {
        let mut acc = 0.0f64;

        // Walk the ring in two contiguous reverse ranges so the inner loop
        // carries no wrap check.
        let mut tap_i = 0usize;
        for delay_idx in (0..=newest).rev() {
            acc += taps[tap_i] as f64 * self.buffer[delay_idx] as f64;
            tap_i += 1;
        }
        for delay_idx in ((newest + 1)..N).rev() {
            acc += taps[tap_i] as f64 * self.buffer[delay_idx] as f64;
            tap_i += 1;
        }
        debug_assert_eq!(tap_i, N);

        acc as f32
    }

    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Zero every slot and rewind the write index
    pub fn clear(&mut self) {
        self.buffer = [0.0; N];
        self.write_index = 0;
    }
}

impl<const N: usize> Default for DelayLine<N> {
    fn default() -> Self {
        Self::new()
    }
}
