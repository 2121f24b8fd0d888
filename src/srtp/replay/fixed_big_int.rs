/// Fixed-width unsigned bit set used as the replay window mask.
///
/// Bit `i` set means "the packet `i` positions behind the newest one has been
/// seen". Bits shifted past `n` are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FixedBigInt {
    bits: Vec<u64>,
    n: usize,
    msb_mask: u64,
}

impl FixedBigInt {
    pub(crate) fn new(n: usize) -> Self {
        let chunk_size = n.div_ceil(64);
        let rem = n % 64;
        let msb_mask = if rem == 0 { u64::MAX } else { (1u64 << rem) - 1 };
        Self {
            bits: vec![0; chunk_size],
            n,
            msb_mask,
        }
    }

    /// Shifts left by `shift` bits, discarding anything above bit `n - 1`.
    pub(crate) fn lsh(&mut self, shift: usize) {
        if shift == 0 {
            return;
        }
        if shift >= self.n {
            self.bits.fill(0);
            return;
        }
        let n_chunk_shift = shift / 64;
        let n_bit_shift = shift % 64;

        for i in (0..self.bits.len()).rev() {
            let mut v = 0u64;
            if i >= n_chunk_shift {
                v = self.bits[i - n_chunk_shift] << n_bit_shift;
                if n_bit_shift != 0 && i > n_chunk_shift {
                    v |= self.bits[i - n_chunk_shift - 1] >> (64 - n_bit_shift);
                }
            }
            self.bits[i] = v;
        }
        self.mask_top();
    }

    pub(crate) fn bit(&self, i: usize) -> bool {
        if i >= self.n {
            return false;
        }
        (self.bits[i / 64] >> (i % 64)) & 1 == 1
    }

    pub(crate) fn set_bit(&mut self, i: usize) {
        if i >= self.n {
            return;
        }
        self.bits[i / 64] |= 1u64 << (i % 64);
    }

    fn mask_top(&mut self) {
        if let Some(top) = self.bits.last_mut() {
            *top &= self.msb_mask;
        }
    }
}
