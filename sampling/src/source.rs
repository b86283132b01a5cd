use num_complex::Complex64;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_core::RngCore;

const MAXF64: f64 = 9007199254740992.0;

/// Seeded ChaCha8 stream. Two sources built from the same seed produce the
/// same values on every platform.
pub struct Source {
    source: ChaCha8Rng,
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha8Rng::from_seed(seed),
        }
    }

    /// Uniform value in `[min, max)` with 53 bits of randomness.
    #[inline(always)]
    pub fn next_f64(&mut self, min: f64, max: f64) -> f64 {
        min + ((self.next_u64() << 11 >> 11) as f64) / MAXF64 * (max - min)
    }

    pub fn fill_uniform_f64(&mut self, data: &mut [f64], min: f64, max: f64) {
        data.iter_mut().for_each(|x| *x = self.next_f64(min, max));
    }

    pub fn fill_uniform_complex(&mut self, data: &mut [Complex64], min: f64, max: f64) {
        data.iter_mut().for_each(|x| {
            x.re = self.next_f64(min, max);
            x.im = self.next_f64(min, max);
        });
    }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}
