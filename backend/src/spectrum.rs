//! Coarse-to-fine spectrum construction shared by the algorithm families.
//!
//! An axis of coarse length `n` contributes its positive corner (bins
//! `0..n/2+1`) to the start of the fine axis and its negative corner (the last
//! `n/2` bins) to the end. For even `n` the Nyquist bin belongs to both
//! corners and enters each copy with weight one half, which keeps real inputs
//! real and reproduces the coarse samples exactly at even fine positions.

use std::f64::consts::PI;

use num_complex::Complex64;
use upsample_hal::{
    AlignedVec,
    layouts::{Properties, UPSAMPLE_FACTOR, corner_size},
};

/// One coarse frequency bin and the fine bin it is copied to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BinMap {
    pub(crate) coarse: usize,
    pub(crate) fine: usize,
    pub(crate) weight: f64,
}

fn nyquist_weight(n: usize, k: usize) -> f64 {
    if n % 2 == 0 && k == n / 2 { 0.5 } else { 1.0 }
}

pub(crate) fn axis_bin_map(n: usize) -> Vec<BinMap> {
    let positive: usize = corner_size(n, false);
    let negative: usize = corner_size(n, true);

    let positive_bins = (0..positive).map(|k| BinMap {
        coarse: k,
        fine: k,
        weight: nyquist_weight(n, k),
    });

    let negative_bins = (n - negative..n).map(|k| BinMap {
        coarse: k,
        fine: k + (UPSAMPLE_FACTOR - 1) * n,
        weight: nyquist_weight(n, k),
    });

    positive_bins.chain(negative_bins).collect()
}

/// Per-axis bin maps of a problem, fastest axis first.
pub(crate) fn bin_maps(props: &Properties) -> [Vec<BinMap>; 3] {
    props.dims.map(axis_bin_map)
}

/// Writes the zero-padded fine spectrum of `coarse` into `fine`, multiplying
/// every copied coefficient by `scale`.
pub(crate) fn pad_coarse_to_fine(
    props: &Properties,
    maps: &[Vec<BinMap>; 3],
    scale: f64,
    coarse: &[Complex64],
    fine: &mut [Complex64],
) {
    #[cfg(debug_assertions)]
    {
        assert_eq!(coarse.len(), props.element_count());
        assert_eq!(fine.len(), props.fine_element_count());
    }

    fine.fill(Complex64::new(0.0, 0.0));

    for m2 in maps[2].iter() {
        for m1 in maps[1].iter() {
            let w12: f64 = scale * m1.weight * m2.weight;
            for m0 in maps[0].iter() {
                let src: usize = props.coarse_offset(m0.coarse, m1.coarse, m2.coarse);
                let dst: usize = props.fine_offset(m0.fine, m1.fine, m2.fine);
                fine[dst] = coarse[src] * (w12 * m0.weight);
            }
        }
    }
}

/// Phase factors shifting an axis of length `n` by half a coarse sample.
///
/// Bin `k` maps to the signed frequency `k` or `k - n`; the Nyquist bin of an
/// even axis averages its two signed copies and cancels to zero.
pub(crate) fn half_sample_phases(n: usize) -> Vec<Complex64> {
    (0..n)
        .map(|k| {
            if n % 2 == 0 && k == n / 2 {
                Complex64::new(0.0, 0.0)
            } else {
                let signed: f64 = if 2 * k < n { k as f64 } else { k as f64 - n as f64 };
                Complex64::from_polar(1.0, PI * signed / n as f64)
            }
        })
        .collect()
}

/// Number of sub-grids interleaved into the fine grid.
pub(crate) const SHIFT_COUNT: usize = 8;

/// Shift of sub-grid `shift` along each axis, fastest axis first.
#[inline(always)]
pub(crate) fn shift_offsets(shift: usize) -> [usize; 3] {
    [shift & 1, (shift >> 1) & 1, (shift >> 2) & 1]
}

/// Scaled phase table of sub-grid `shift` over the whole coarse spectrum.
pub(crate) fn phase_table(props: &Properties, shift: usize, scale: f64) -> AlignedVec<Complex64> {
    let one: Complex64 = Complex64::new(1.0, 0.0);
    let offsets: [usize; 3] = shift_offsets(shift);

    let axes: [Vec<Complex64>; 3] = [0, 1, 2].map(|axis| {
        if offsets[axis] == 1 {
            half_sample_phases(props.dims[axis])
        } else {
            vec![one; props.dims[axis]]
        }
    });

    let mut table: AlignedVec<Complex64> = AlignedVec::zeroed(props.element_count());

    for k2 in 0..props.dims[2] {
        for k1 in 0..props.dims[1] {
            let p12: Complex64 = axes[1][k1] * axes[2][k2] * scale;
            for k0 in 0..props.dims[0] {
                table[props.coarse_offset(k0, k1, k2)] = axes[0][k0] * p12;
            }
        }
    }

    table
}

/// Writes the coarse-resolution grid `sub` into every second fine sample,
/// starting at the offsets of sub-grid `shift`.
pub(crate) fn scatter_subgrid(props: &Properties, shift: usize, sub: &[Complex64], fine: &mut [Complex64]) {
    let [s0, s1, s2]: [usize; 3] = shift_offsets(shift);

    for i2 in 0..props.dims[2] {
        for i1 in 0..props.dims[1] {
            for i0 in 0..props.dims[0] {
                let dst: usize = props.fine_offset(2 * i0 + s0, 2 * i1 + s1, 2 * i2 + s2);
                fine[dst] = sub[props.coarse_offset(i0, i1, i2)];
            }
        }
    }
}
