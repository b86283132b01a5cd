use num_complex::Complex64;

use crate::layouts::{Layout, PlanFlags, Properties, Statistic};

/// Capability contract implemented by every interpolation algorithm family.
///
/// A plan is bound at construction to one shape and one [`Layout`]. Exactly
/// one of the three executors is meaningful: the one matching
/// [`InterpolatePlan::layout`]. The provided bodies of the other two panic,
/// since calling them is a usage error that is never revalidated per call.
///
/// Implementation state is released by the implementor's `Drop`, which the
/// runtime runs exactly once, when the last share of the owning plan is
/// released.
///
/// Buffer sizes follow [`Properties::element_count`] for inputs and
/// [`Properties::fine_element_count`] for outputs; they are caller
/// preconditions.
pub trait InterpolatePlan: Send {
    /// Human-readable identifier of the algorithm family and layout.
    fn name(&self) -> &str;

    fn layout(&self) -> Layout;

    fn properties(&self) -> &Properties;

    fn execute_interleaved(&mut self, input: &[Complex64], output: &mut [Complex64]) {
        let _ = (input, output);
        layout_mismatch(self.name(), self.layout(), Layout::Interleaved)
    }

    fn execute_split(&mut self, rin: &[f64], iin: &[f64], rout: &mut [f64], iout: &mut [f64]) {
        let _ = (rin, iin, rout, iout);
        layout_mismatch(self.name(), self.layout(), Layout::Split)
    }

    fn execute_split_product(&mut self, rin: &[f64], iin: &[f64], out: &mut [f64]) {
        let _ = (rin, iin, out);
        layout_mismatch(self.name(), self.layout(), Layout::SplitProduct)
    }

    /// Implementation-defined diagnostic dump to standard output.
    fn print_timings(&self);

    /// Applies advisory layout hints to subsequent executions.
    fn set_flags(&mut self, flags: PlanFlags);

    /// Implementation-defined counters. Unknown identifiers or indices report
    /// [`Statistic::unknown`].
    fn statistic(&self, statistic: u32, index: usize) -> Statistic;
}

/// Builds one plan of a fixed family and layout for the coarse shape
/// `n0 x n1 x n2`.
pub type PlanConstructor = fn(n0: usize, n1: usize, n2: usize, flags: PlanFlags) -> Box<dyn InterpolatePlan>;

#[cold]
fn layout_mismatch(name: &str, declared: Layout, requested: Layout) -> ! {
    panic!("plan {name} has layout {declared} but was executed as {requested}")
}
