use std::sync::Arc;

use num_complex::Complex64;
use sampling::source::Source;
use upsample_hal::{
    AlignedVec,
    layouts::{Layout, Properties, STATISTIC_EXECUTION_TIME},
};

use crate::{Plan, TimingConfig};

/// Measures the cost of a candidate plan in seconds. Lower is better.
pub trait CostHarness: Send + Sync {
    fn cost(&self, plan: &Plan) -> f64;
}

impl<H: CostHarness + ?Sized> CostHarness for Arc<H> {
    fn cost(&self, plan: &Plan) -> f64 {
        self.as_ref().cost(plan)
    }
}

/// Times real executions of the candidate on seeded random input and reports
/// the fastest run.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClockHarness {
    config: TimingConfig,
}

impl WallClockHarness {
    pub fn new(config: TimingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    fn measure(&self, plan: &Plan, mut run: impl FnMut()) -> f64 {
        for _ in 0..self.config.warmup_runs {
            run();
        }

        let mut best: f64 = f64::INFINITY;
        for _ in 0..self.config.timed_runs.max(1) {
            run();
            best = best.min(plan.statistic(STATISTIC_EXECUTION_TIME, 0).value);
        }
        best
    }
}

impl CostHarness for WallClockHarness {
    fn cost(&self, plan: &Plan) -> f64 {
        let props: Properties = *plan.properties();
        let coarse: usize = props.element_count();
        let fine: usize = props.fine_element_count();

        let mut source: Source = Source::new(self.config.seed);

        match plan.layout() {
            Layout::Interleaved => {
                let mut input: AlignedVec<f64> = AlignedVec::zeroed(2 * coarse);
                let mut output: AlignedVec<Complex64> = AlignedVec::zeroed(fine);
                source.fill_uniform_f64(&mut input, -1.0, 1.0);
                let input: &[Complex64] = bytemuck::cast_slice(input.as_slice());
                self.measure(plan, || plan.execute_interleaved(input, &mut output))
            }
            Layout::Split => {
                let mut rin: AlignedVec<f64> = AlignedVec::zeroed(coarse);
                let mut iin: AlignedVec<f64> = AlignedVec::zeroed(coarse);
                let mut rout: AlignedVec<f64> = AlignedVec::zeroed(fine);
                let mut iout: AlignedVec<f64> = AlignedVec::zeroed(fine);
                source.fill_uniform_f64(&mut rin, -1.0, 1.0);
                source.fill_uniform_f64(&mut iin, -1.0, 1.0);
                self.measure(plan, || plan.execute_split(&rin, &iin, &mut rout, &mut iout))
            }
            Layout::SplitProduct => {
                let mut rin: AlignedVec<f64> = AlignedVec::zeroed(coarse);
                let mut iin: AlignedVec<f64> = AlignedVec::zeroed(coarse);
                let mut out: AlignedVec<f64> = AlignedVec::zeroed(fine);
                source.fill_uniform_f64(&mut rin, -1.0, 1.0);
                source.fill_uniform_f64(&mut iin, -1.0, 1.0);
                self.measure(plan, || plan.execute_split_product(&rin, &iin, &mut out))
            }
        }
    }
}
