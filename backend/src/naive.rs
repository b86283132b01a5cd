//! Reference family: full forward transform of the coarse grid, explicit
//! zero-padding into the fine spectrum, full inverse transform of the fine
//! grid.

use num_complex::Complex64;
use upsample_hal::{
    api::InterpolatePlan,
    layouts::{Layout, PlanFlags, Properties},
};

use crate::{
    engine::Fft3d,
    plan::{Interpolator, LayoutPlan},
    spectrum::{BinMap, bin_maps, pad_coarse_to_fine},
    timings::{StageTiming, Stopwatch},
};

pub(crate) struct Naive {
    props: Properties,
    coarse_fft: Fft3d,
    fine_fft: Fft3d,
    maps: [Vec<BinMap>; 3],
    scale: f64,
}

impl Interpolator for Naive {
    const FAMILY: &'static str = "naive";

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

        self.fine_fft.inverse(fine);
        watch.lap(&mut timing.backward);
    }
}

pub fn new_interleaved(n0: usize, n1: usize, n2: usize, flags: PlanFlags) -> Box<dyn InterpolatePlan> {
    LayoutPlan::<Naive>::boxed(Layout::Interleaved, n0, n1, n2, flags)
}

pub fn new_split(n0: usize, n1: usize, n2: usize, flags: PlanFlags) -> Box<dyn InterpolatePlan> {
    LayoutPlan::<Naive>::boxed(Layout::Split, n0, n1, n2, flags)
}

pub fn new_split_product(n0: usize, n1: usize, n2: usize, flags: PlanFlags) -> Box<dyn InterpolatePlan> {
    LayoutPlan::<Naive>::boxed(Layout::SplitProduct, n0, n1, n2, flags)
}
