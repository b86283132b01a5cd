//! Elementwise multiplication kernels used for phase correction and for the
//! split-product output.
//!
//! Each kernel has a scalar reference (`*_ref`) and, on x86-64, an SSE2 path
//! (`*_sse2`). The dispatching entry points take the SSE2 path only when both
//! buffers are 16-byte aligned. An elementwise product involves no reduction,
//! so the two paths produce bit-identical results.

mod pointwise_ref;
#[cfg(target_arch = "x86_64")]
mod pointwise_sse2;

pub use pointwise_ref::*;
#[cfg(target_arch = "x86_64")]
pub use pointwise_sse2::*;

use num_complex::Complex64;

use crate::is_sse_aligned;

/// `a[i] *= b[i]` for complex doubles.
pub fn pointwise_multiply_complex(a: &mut [Complex64], b: &[Complex64]) {
    assert_eq!(a.len(), b.len(), "pointwise_multiply_complex: length mismatch");

    #[cfg(target_arch = "x86_64")]
    {
        if is_sse_aligned(a.as_ptr()) && is_sse_aligned(b.as_ptr()) {
            // SAFETY: SSE2 is part of the x86-64 baseline and both buffers
            // were just checked to be 16-byte aligned.
            unsafe { pointwise_multiply_complex_sse2(a, b) };
            return;
        }
    }

    pointwise_multiply_complex_ref(a, b)
}

/// `a[i] *= b[i]` for real doubles.
pub fn pointwise_multiply_real(a: &mut [f64], b: &[f64]) {
    assert_eq!(a.len(), b.len(), "pointwise_multiply_real: length mismatch");

    #[allow(unused_mut)]
    let mut done: usize = 0;

    #[cfg(target_arch = "x86_64")]
    {
        if is_sse_aligned(a.as_ptr()) && is_sse_aligned(b.as_ptr()) {
            // SAFETY: see `pointwise_multiply_complex`.
            done = unsafe { pointwise_multiply_real_sse2(a, b) };
        }
    }

    // Also covers the last element when the length is odd.
    pointwise_multiply_real_ref(&mut a[done..], &b[done..])
}

#[cfg(test)]
mod tests {
    use num_complex::Complex64;
    use sampling::source::Source;

    use super::*;
    use crate::AlignedVec;

    fn random_complex(source: &mut Source, len: usize) -> Vec<Complex64> {
        (0..len)
            .map(|_| Complex64::new(source.next_f64(-4.0, 4.0), source.next_f64(-4.0, 4.0)))
            .collect()
    }

    fn random_real(source: &mut Source, len: usize) -> Vec<f64> {
        (0..len).map(|_| source.next_f64(-4.0, 4.0)).collect()
    }

    fn bits_c(x: &[Complex64]) -> Vec<(u64, u64)> {
        x.iter().map(|c| (c.re.to_bits(), c.im.to_bits())).collect()
    }

    fn bits_r(x: &[f64]) -> Vec<u64> {
        x.iter().map(|r| r.to_bits()).collect()
    }

    #[test]
    fn complex_aligned_and_unaligned_paths_agree() {
        let mut source: Source = Source::new([3u8; 32]);
        for len in [0usize, 1, 2, 7, 64, 129] {
            let a: Vec<Complex64> = random_complex(&mut source, len);
            let b: Vec<Complex64> = random_complex(&mut source, len);

            let mut aligned_a: AlignedVec<Complex64> = AlignedVec::from_slice(&a);
            let aligned_b: AlignedVec<Complex64> = AlignedVec::from_slice(&b);
            pointwise_multiply_complex(&mut aligned_a, &aligned_b);

            let mut scalar_a: Vec<Complex64> = a.clone();
            pointwise_multiply_complex_ref(&mut scalar_a, &b);

            // Shifting by one f64 leaves the complex view 8-byte aligned only,
            // which forces the scalar fallback.
            let mut shifted: AlignedVec<f64> = AlignedVec::zeroed(2 * len + 1);
            let shifted_a: &mut [Complex64] = bytemuck::cast_slice_mut(&mut shifted[1..]);
            shifted_a.copy_from_slice(&a);
            assert!(!is_sse_aligned(shifted_a.as_ptr()));
            pointwise_multiply_complex(shifted_a, &aligned_b);

            assert_eq!(bits_c(&aligned_a), bits_c(&scalar_a));
            assert_eq!(bits_c(shifted_a), bits_c(&scalar_a));
            for i in 0..len {
                assert_eq!(scalar_a[i], a[i] * b[i]);
            }
        }
    }

    #[test]
    fn real_aligned_and_unaligned_paths_agree() {
        let mut source: Source = Source::new([5u8; 32]);
        for len in [0usize, 1, 2, 3, 31, 32] {
            let a: Vec<f64> = random_real(&mut source, len + 1);
            let b: Vec<f64> = random_real(&mut source, len + 1);

            let mut aligned_a: AlignedVec<f64> = AlignedVec::from_slice(&a[..len]);
            let aligned_b: AlignedVec<f64> = AlignedVec::from_slice(&b[..len]);
            pointwise_multiply_real(&mut aligned_a, &aligned_b);

            // Offsetting an aligned buffer by one f64 breaks 16-byte alignment.
            let mut shifted_a: AlignedVec<f64> = AlignedVec::from_slice(&a);
            let mut shifted_b: AlignedVec<f64> = AlignedVec::zeroed(len + 1);
            shifted_b[1..].copy_from_slice(&b[..len]);
            shifted_a[1..].copy_from_slice(&a[..len]);
            assert!(!is_sse_aligned(shifted_a[1..].as_ptr()));
            pointwise_multiply_real(&mut shifted_a[1..], &shifted_b[1..]);

            assert_eq!(bits_r(&aligned_a), bits_r(&shifted_a[1..]));
        }
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn sse2_complex_matches_reference_bitwise() {
        let mut source: Source = Source::new([7u8; 32]);
        let a: Vec<Complex64> = random_complex(&mut source, 33);
        let b: Vec<Complex64> = random_complex(&mut source, 33);

        let mut simd_a: AlignedVec<Complex64> = AlignedVec::from_slice(&a);
        let simd_b: AlignedVec<Complex64> = AlignedVec::from_slice(&b);
        unsafe { pointwise_multiply_complex_sse2(&mut simd_a, &simd_b) };

        let mut ref_a: Vec<Complex64> = a;
        pointwise_multiply_complex_ref(&mut ref_a, &b);

        assert_eq!(bits_c(&simd_a), bits_c(&ref_a));
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn sse2_real_leaves_odd_tail() {
        let mut a: AlignedVec<f64> = AlignedVec::from_slice(&[1.0, 2.0, 3.0]);
        let b: AlignedVec<f64> = AlignedVec::from_slice(&[4.0, 5.0, 6.0]);
        let done: usize = unsafe { pointwise_multiply_real_sse2(&mut a, &b) };
        assert_eq!(done, 2);
        assert_eq!(a.as_slice(), &[4.0, 10.0, 3.0]);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn mismatched_lengths_panic() {
        let mut a: Vec<f64> = vec![1.0; 3];
        pointwise_multiply_real(&mut a, &[1.0; 2]);
    }
}
