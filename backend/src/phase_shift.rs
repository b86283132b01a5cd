//! Phase-shift family: the fine grid is the interleaving of eight coarse
//! grids, each obtained by shifting the coarse spectrum by half a sample along
//! a subset of the axes and transforming back at coarse resolution. No
//! fine-resolution transform is ever performed.

use num_complex::Complex64;
use upsample_hal::{
    AlignedVec,
    api::InterpolatePlan,
    kernels::pointwise_multiply_complex,
    layouts::{Layout, PlanFlags, Properties},
};

use crate::{
    engine::Fft3d,
    plan::{Interpolator, LayoutPlan},
    spectrum::{SHIFT_COUNT, phase_table, scatter_subgrid},
    timings::{StageTiming, Stopwatch},
};

pub(crate) struct PhaseShift {
    props: Properties,
    fft: Fft3d,
    phases: Vec<AlignedVec<Complex64>>,
    work: AlignedVec<Complex64>,
}

impl Interpolator for PhaseShift {
    const FAMILY: &'static str = "phase-shift";

    fn new(props: &Properties) -> Self {
        let scale: f64 = 1.0 / props.element_count() as f64;
        Self {
            props: *props,
            fft: Fft3d::new(props.dims),
            phases: (0..SHIFT_COUNT).map(|shift| phase_table(props, shift, scale)).collect(),
            work: AlignedVec::zeroed(props.element_count()),
        }
    }

    fn interpolate(&mut self, coarse: &mut [Complex64], fine: &mut [Complex64], timing: &mut StageTiming) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(coarse.len(), self.props.element_count());
            assert_eq!(fine.len(), self.props.fine_element_count());
        }

        let mut watch: Stopwatch = Stopwatch::start();

        self.fft.forward(coarse);
        watch.lap(&mut timing.forward);

        for (shift, phase) in self.phases.iter().enumerate() {
            self.work.copy_from_slice(coarse);
            pointwise_multiply_complex(&mut self.work, phase);
            watch.lap(&mut timing.spectrum);

            self.fft.inverse(&mut self.work);
            watch.lap(&mut timing.backward);

            scatter_subgrid(&self.props, shift, &self.work, fine);
            watch.lap(&mut timing.spectrum);
        }
    }
}

pub fn new_interleaved(n0: usize, n1: usize, n2: usize, flags: PlanFlags) -> Box<dyn InterpolatePlan> {
    LayoutPlan::<PhaseShift>::boxed(Layout::Interleaved, n0, n1, n2, flags)
}

pub fn new_split(n0: usize, n1: usize, n2: usize, flags: PlanFlags) -> Box<dyn InterpolatePlan> {
    LayoutPlan::<PhaseShift>::boxed(Layout::Split, n0, n1, n2, flags)
}

pub fn new_split_product(n0: usize, n1: usize, n2: usize, flags: PlanFlags) -> Box<dyn InterpolatePlan> {
    LayoutPlan::<PhaseShift>::boxed(Layout::SplitProduct, n0, n1, n2, flags)
}
