use num_complex::Complex64;

/// Complex product through 2-wide SSE2 lanes, one complex pair per iteration.
///
/// # Safety
/// Both slices must start on a 16-byte boundary (aligned loads and stores).
#[target_feature(enable = "sse2")]
pub unsafe fn pointwise_multiply_complex_sse2(a: &mut [Complex64], b: &[Complex64]) {
    #[cfg(debug_assertions)]
    {
        assert_eq!(a.len(), b.len());
        assert!(crate::is_sse_aligned(a.as_ptr()));
        assert!(crate::is_sse_aligned(b.as_ptr()));
    }

    use std::arch::x86_64::{__m128d, _mm_add_pd, _mm_load_pd, _mm_mul_pd, _mm_setr_pd, _mm_shuffle_pd, _mm_store_pd};

    unsafe {
        let mut aa: *mut f64 = a.as_mut_ptr() as *mut f64;
        let mut bb: *const f64 = b.as_ptr() as *const f64;

        // [-1, 1]: turns the swapped [b.im, b.re] into [-b.im, b.re].
        let neg: __m128d = _mm_setr_pd(-1.0, 1.0);

        for _ in 0..a.len() {
            let a_vec: __m128d = _mm_load_pd(aa);
            let mut b_vec: __m128d = _mm_load_pd(bb);
            let a_imag: __m128d = _mm_shuffle_pd::<3>(a_vec, a_vec);
            let a_real: __m128d = _mm_shuffle_pd::<0>(a_vec, a_vec);
            let mut res: __m128d = _mm_mul_pd(b_vec, a_real);
            b_vec = _mm_shuffle_pd::<1>(b_vec, b_vec);
            b_vec = _mm_mul_pd(b_vec, neg);
            b_vec = _mm_mul_pd(b_vec, a_imag);
            res = _mm_add_pd(res, b_vec);
            _mm_store_pd(aa, res);
            aa = aa.add(2);
            bb = bb.add(2);
        }
    }
}

/// Real product through 2-wide SSE2 lanes. The trailing element of an odd
/// length is left to the caller.
///
/// # Safety
/// Both slices must start on a 16-byte boundary (aligned loads and stores).
#[target_feature(enable = "sse2")]
pub unsafe fn pointwise_multiply_real_sse2(a: &mut [f64], b: &[f64]) -> usize {
    #[cfg(debug_assertions)]
    {
        assert_eq!(a.len(), b.len());
        assert!(crate::is_sse_aligned(a.as_ptr()));
        assert!(crate::is_sse_aligned(b.as_ptr()));
    }

    use std::arch::x86_64::{__m128d, _mm_load_pd, _mm_mul_pd, _mm_store_pd};

    let span: usize = a.len() >> 1;

    unsafe {
        let mut aa: *mut f64 = a.as_mut_ptr();
        let mut bb: *const f64 = b.as_ptr();

        for _ in 0..span {
            let a_vec: __m128d = _mm_load_pd(aa);
            let b_vec: __m128d = _mm_load_pd(bb);
            _mm_store_pd(aa, _mm_mul_pd(a_vec, b_vec));
            aa = aa.add(2);
            bb = bb.add(2);
        }
    }

    span << 1
}
