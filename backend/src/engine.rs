//! Thin 3-D wrapper over `rustfft` one-dimensional transforms.
//!
//! Data is packed row-major with `dims[0]` as the fastest axis. Transforms are
//! unnormalised in both directions.

use std::sync::Arc;

use num_complex::Complex64;
use rustfft::{Fft, FftDirection, FftPlanner};

pub(crate) struct Fft3d {
    dims: [usize; 3],
    strides: [usize; 3],
    forward: [Arc<dyn Fft<f64>>; 3],
    inverse: [Arc<dyn Fft<f64>>; 3],
    scratch: Vec<Complex64>,
    line: Vec<Complex64>,
}

impl Fft3d {
    pub(crate) fn new(dims: [usize; 3]) -> Self {
        let mut planner: FftPlanner<f64> = FftPlanner::new();

        let forward: [Arc<dyn Fft<f64>>; 3] = dims.map(|n| planner.plan_fft(n, FftDirection::Forward));
        let inverse: [Arc<dyn Fft<f64>>; 3] = dims.map(|n| planner.plan_fft(n, FftDirection::Inverse));

        let scratch_len: usize = forward
            .iter()
            .chain(inverse.iter())
            .map(|fft| fft.get_inplace_scratch_len())
            .max()
            .unwrap_or(0);

        let line_len: usize = dims.iter().copied().max().unwrap_or(0);

        Self {
            dims,
            strides: [1, dims[0], dims[0] * dims[1]],
            forward,
            inverse,
            scratch: vec![Complex64::new(0.0, 0.0); scratch_len],
            line: vec![Complex64::new(0.0, 0.0); line_len],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    pub(crate) fn forward(&mut self, data: &mut [Complex64]) {
        for axis in 0..3 {
            self.transform_axis(data, axis, FftDirection::Forward, |_, _| true);
        }
    }

    pub(crate) fn inverse(&mut self, data: &mut [Complex64]) {
        for axis in 0..3 {
            self.transform_axis(data, axis, FftDirection::Inverse, |_, _| true);
        }
    }

    /// Transforms every line along `axis` for which `keep(jp, jq)` holds,
    /// where `jp` and `jq` are the line's coordinates along the two other
    /// axes, in increasing axis order. Skipped lines are left untouched.
    pub(crate) fn transform_axis<F>(&mut self, data: &mut [Complex64], axis: usize, direction: FftDirection, keep: F)
    where
        F: Fn(usize, usize) -> bool,
    {
        #[cfg(debug_assertions)]
        {
            assert_eq!(data.len(), self.len());
            assert!(axis < 3);
        }

        let (p, q): (usize, usize) = match axis {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        };

        let n: usize = self.dims[axis];
        let stride: usize = self.strides[axis];

        let fft: &Arc<dyn Fft<f64>> = match direction {
            FftDirection::Forward => &self.forward[axis],
            FftDirection::Inverse => &self.inverse[axis],
        };

        for jq in 0..self.dims[q] {
            for jp in 0..self.dims[p] {
                if !keep(jp, jq) {
                    continue;
                }

                let base: usize = jp * self.strides[p] + jq * self.strides[q];

                if stride == 1 {
                    fft.process_with_scratch(&mut data[base..base + n], &mut self.scratch);
                } else {
                    let line: &mut [Complex64] = &mut self.line[..n];
                    for (i, x) in line.iter_mut().enumerate() {
                        *x = data[base + i * stride];
                    }
                    fft.process_with_scratch(line, &mut self.scratch);
                    for (i, x) in line.iter().enumerate() {
                        data[base + i * stride] = *x;
                    }
                }
            }
        }
    }
}
