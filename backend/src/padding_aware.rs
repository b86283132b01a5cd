//! Padding-aware family: the inverse transform skips every line that lies
//! entirely in the zero padding.
//!
//! After padding, a fine line along axis 0 is non-zero only if its
//! coordinates along axes 1 and 2 both fall inside a corner; after axis 0 has
//! been transformed, a line along axis 1 is non-zero only if its axis-2
//! coordinate does. Transforming a zero line yields zero, so skipping those
//! lines leaves the result unchanged.

use num_complex::Complex64;
use rustfft::FftDirection;
use upsample_hal::{
    api::InterpolatePlan,
    layouts::{Layout, PlanFlags, Properties, in_corner},
};

use crate::{
    engine::Fft3d,
    plan::{Interpolator, LayoutPlan},
    spectrum::{BinMap, bin_maps, pad_coarse_to_fine},
    timings::{StageTiming, Stopwatch},
};

pub(crate) struct PaddingAware {
    props: Properties,
    coarse_fft: Fft3d,
    fine_fft: Fft3d,
    maps: [Vec<BinMap>; 3],
    scale: f64,
}

impl PaddingAware {
    fn inverse_padded(&mut self, fine: &mut [Complex64]) {
        let [_, d1, d2]: [usize; 3] = self.props.dims;

        self.fine_fft
            .transform_axis(fine, 0, FftDirection::Inverse, |f1, f2| in_corner(d1, f1) && in_corner(d2, f2));
        self.fine_fft
            .transform_axis(fine, 1, FftDirection::Inverse, |_, f2| in_corner(d2, f2));
        self.fine_fft.transform_axis(fine, 2, FftDirection::Inverse, |_, _| true);
    }
}

impl Interpolator for PaddingAware {
    const FAMILY: &'static str = "padding-aware";

    fn new(props: &Properties) -> Self {
        Self {
            props: *props,
            coarse_fft: Fft3d::new(props.dims),
            fine_fft: Fft3d::new(props.fine_dims),
            maps: bin_maps(props),
            scale: 1.0 / props.element_count() as f64,
        }
    }

    fn interpolate(&mut self, coarse: &mut [Complex64], fine: &mut [Complex64], timing: &mut StageTiming) {
        let mut watch: Stopwatch = Stopwatch::start();

        self.coarse_fft.forward(coarse);
        watch.lap(&mut timing.forward);

        pad_coarse_to_fine(&self.props, &self.maps, self.scale, coarse, fine);
        watch.lap(&mut timing.spectrum);

        self.inverse_padded(fine);
        watch.lap(&mut timing.backward);
    }
}

pub fn new_interleaved(n0: usize, n1: usize, n2: usize, flags: PlanFlags) -> Box<dyn InterpolatePlan> {
    LayoutPlan::<PaddingAware>::boxed(Layout::Interleaved, n0, n1, n2, flags)
}

pub fn new_split(n0: usize, n1: usize, n2: usize, flags: PlanFlags) -> Box<dyn InterpolatePlan> {
    LayoutPlan::<PaddingAware>::boxed(Layout::Split, n0, n1, n2, flags)
}

pub fn new_split_product(n0: usize, n1: usize, n2: usize, flags: PlanFlags) -> Box<dyn InterpolatePlan> {
    LayoutPlan::<PaddingAware>::boxed(Layout::SplitProduct, n0, n1, n2, flags)
}
