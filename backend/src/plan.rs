use std::time::Instant;

use itertools::izip;
use num_complex::Complex64;
use upsample_hal::{
    AlignedVec,
    api::InterpolatePlan,
    kernels::pointwise_multiply_real,
    layouts::{Layout, PlanFlags, Properties, Statistic},
};

use crate::timings::{StageTiming, StageTimings};

/// One algorithm family: upsamples a packed complex coarse grid into the
/// packed complex fine grid. Layout handling lives in [`LayoutPlan`].
pub(crate) trait Interpolator: Send + Sized {
    const FAMILY: &'static str;

    fn new(props: &Properties) -> Self;

    /// Upsamples `coarse` into `fine`. `coarse` is used as workspace and is
    /// clobbered.
    fn interpolate(&mut self, coarse: &mut [Complex64], fine: &mut [Complex64], timing: &mut StageTiming);
}

/// Binds an [`Interpolator`] to one data layout and owns the work buffers the
/// layout needs.
pub(crate) struct LayoutPlan<I: Interpolator> {
    name: String,
    props: Properties,
    flags: PlanFlags,
    interpolator: I,
    coarse: AlignedVec<Complex64>,
    fine: AlignedVec<Complex64>,
    product: AlignedVec<f64>,
    timings: StageTimings,
}

impl<I: Interpolator> LayoutPlan<I> {
    pub(crate) fn new(layout: Layout, n0: usize, n1: usize, n2: usize, flags: PlanFlags) -> Self {
        assert!(
            n0 > 0 && n1 > 0 && n2 > 0,
            "{}: grid dimensions must be positive, got {n0}x{n1}x{n2}",
            I::FAMILY
        );

        let start: Instant = Instant::now();

        let props: Properties = Properties::new(layout, n0, n1, n2);
        let interpolator: I = I::new(&props);

        // Interleaved plans write straight into the caller's output.
        let fine_len: usize = match layout {
            Layout::Interleaved => 0,
            Layout::Split | Layout::SplitProduct => props.fine_element_count(),
        };

        let product_len: usize = match layout {
            Layout::SplitProduct => props.fine_element_count(),
            Layout::Interleaved | Layout::Split => 0,
        };

        let mut plan: Self = Self {
            name: format!("{}-{}", I::FAMILY, layout),
            props,
            flags,
            interpolator,
            coarse: AlignedVec::zeroed(props.element_count()),
            fine: AlignedVec::zeroed(fine_len),
            product: AlignedVec::zeroed(product_len),
            timings: StageTimings::default(),
        };

        plan.timings.planning = start.elapsed().as_secs_f64();
        plan
    }

    pub(crate) fn boxed(layout: Layout, n0: usize, n1: usize, n2: usize, flags: PlanFlags) -> Box<dyn InterpolatePlan>
    where
        I: 'static,
    {
        Box::new(Self::new(layout, n0, n1, n2, flags))
    }

    #[cfg(debug_assertions)]
    fn check_split_buffers(&self, rin: &[f64], iin: &[f64], outs: &[&[f64]]) {
        assert_eq!(rin.len(), self.props.element_count());
        assert_eq!(iin.len(), self.props.element_count());
        for out in outs {
            assert_eq!(out.len(), self.props.fine_element_count());
        }
    }

    /// Packs both components into the complex work buffer and runs one pass.
    fn interpolate_packed(&mut self, rin: &[f64], iin: &[f64]) {
        for (c, r, i) in izip!(self.coarse.iter_mut(), rin.iter(), iin.iter()) {
            *c = Complex64::new(*r, *i);
        }
        let timing: &mut StageTiming = self.timings.next_pass();
        self.interpolator.interpolate(&mut self.coarse, &mut self.fine, timing);
    }

    /// Runs one pass on a single real component; the result is the real part
    /// of the fine work buffer.
    fn interpolate_component(&mut self, component: &[f64]) {
        for (c, r) in self.coarse.iter_mut().zip(component.iter()) {
            *c = Complex64::new(*r, 0.0);
        }
        let timing: &mut StageTiming = self.timings.next_pass();
        self.interpolator.interpolate(&mut self.coarse, &mut self.fine, timing);
    }
}

fn real_parts(fine: &[Complex64], out: &mut [f64]) {
    for (o, f) in out.iter_mut().zip(fine.iter()) {
        *o = f.re;
    }
}

fn imag_parts(fine: &[Complex64], out: &mut [f64]) {
    for (o, f) in out.iter_mut().zip(fine.iter()) {
        *o = f.im;
    }
}

impl<I: Interpolator> InterpolatePlan for LayoutPlan<I> {
    fn name(&self) -> &str {
        &self.name
    }

    fn layout(&self) -> Layout {
        self.props.layout
    }

    fn properties(&self) -> &Properties {
        &self.props
    }

    fn execute_interleaved(&mut self, input: &[Complex64], output: &mut [Complex64]) {
        assert_eq!(self.props.layout, Layout::Interleaved, "{}: not an interleaved plan", self.name);

        #[cfg(debug_assertions)]
        {
            assert_eq!(input.len(), self.props.element_count());
            assert_eq!(output.len(), self.props.fine_element_count());
        }

        self.timings.begin_execution();
        self.coarse.copy_from_slice(input);
        let timing: &mut StageTiming = self.timings.next_pass();
        self.interpolator.interpolate(&mut self.coarse, output, timing);
    }

    fn execute_split(&mut self, rin: &[f64], iin: &[f64], rout: &mut [f64], iout: &mut [f64]) {
        assert_eq!(self.props.layout, Layout::Split, "{}: not a split plan", self.name);

        #[cfg(debug_assertions)]
        self.check_split_buffers(rin, iin, &[&*rout, &*iout]);

        self.timings.begin_execution();

        if self.flags.prefers_split() {
            self.interpolate_component(rin);
            real_parts(&self.fine, rout);
            self.interpolate_component(iin);
            real_parts(&self.fine, iout);
        } else {
            self.interpolate_packed(rin, iin);
            real_parts(&self.fine, rout);
            imag_parts(&self.fine, iout);
        }
    }

    fn execute_split_product(&mut self, rin: &[f64], iin: &[f64], out: &mut [f64]) {
        assert_eq!(
            self.props.layout,
            Layout::SplitProduct,
            "{}: not a split-product plan",
            self.name
        );

        #[cfg(debug_assertions)]
        self.check_split_buffers(rin, iin, &[&*out]);

        self.timings.begin_execution();

        if self.flags.prefers_split() {
            self.interpolate_component(rin);
            real_parts(&self.fine, out);
            self.interpolate_component(iin);
            real_parts(&self.fine, &mut self.product);
        } else {
            self.interpolate_packed(rin, iin);
            real_parts(&self.fine, out);
            imag_parts(&self.fine, &mut self.product);
        }

        pointwise_multiply_real(out, &self.product);
    }

    fn print_timings(&self) {
        self.timings.print(&self.name);
    }

    fn set_flags(&mut self, flags: PlanFlags) {
        self.flags = flags;
    }

    fn statistic(&self, statistic: u32, index: usize) -> Statistic {
        self.timings.statistic(statistic, index)
    }
}
