use num_complex::Complex64;

pub fn pointwise_multiply_complex_ref(a: &mut [Complex64], b: &[Complex64]) {
    #[cfg(debug_assertions)]
    {
        assert_eq!(a.len(), b.len());
    }

    for i in 0..a.len() {
        let _ar: f64 = a[i].re;
        let _ai: f64 = a[i].im;
        let _br: f64 = b[i].re;
        let _bi: f64 = b[i].im;
        a[i].re = _ar * _br - _ai * _bi;
        a[i].im = _ar * _bi + _ai * _br;
    }
}

pub fn pointwise_multiply_real_ref(a: &mut [f64], b: &[f64]) {
    #[cfg(debug_assertions)]
    {
        assert_eq!(a.len(), b.len());
    }

    for i in 0..a.len() {
        a[i] *= b[i]
    }
}
