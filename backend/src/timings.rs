use std::time::Instant;

use upsample_hal::layouts::{STATISTIC_LAST_COMMON_VALUE, Statistic};

/// Seconds spent building the plan (transform plans, tables, buffers).
pub const STATISTIC_PLANNING_TIME: u32 = STATISTIC_LAST_COMMON_VALUE;
/// Seconds spent in the coarse forward transform of one pass.
pub const STATISTIC_FORWARD_TIME: u32 = STATISTIC_LAST_COMMON_VALUE + 1;
/// Seconds spent padding or phase-shifting the spectrum of one pass.
pub const STATISTIC_SPECTRUM_TIME: u32 = STATISTIC_LAST_COMMON_VALUE + 2;
/// Seconds spent in the inverse transform(s) of one pass.
pub const STATISTIC_BACKWARD_TIME: u32 = STATISTIC_LAST_COMMON_VALUE + 3;

/// Most passes one execution performs: split layouts run one pass per
/// component when the split hint is active.
pub(crate) const MAX_PASSES: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct StageTiming {
    pub(crate) forward: f64,
    pub(crate) spectrum: f64,
    pub(crate) backward: f64,
}

impl StageTiming {
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Accumulates the time elapsed since the previous call into one stage.
pub(crate) struct Stopwatch {
    last: Instant,
}

impl Stopwatch {
    pub(crate) fn start() -> Self {
        Self { last: Instant::now() }
    }

    pub(crate) fn lap(&mut self, stage: &mut f64) {
        let now: Instant = Instant::now();
        *stage += now.duration_since(self.last).as_secs_f64();
        self.last = now;
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct StageTimings {
    pub(crate) planning: f64,
    pub(crate) passes: [StageTiming; MAX_PASSES],
    pub(crate) used: usize,
}

impl StageTimings {
    pub(crate) fn begin_execution(&mut self) {
        self.passes.iter_mut().for_each(StageTiming::reset);
        self.used = 0;
    }

    pub(crate) fn next_pass(&mut self) -> &mut StageTiming {
        debug_assert!(self.used < MAX_PASSES);
        self.used += 1;
        &mut self.passes[self.used - 1]
    }

    pub(crate) fn statistic(&self, statistic: u32, index: usize) -> Statistic {
        if statistic == STATISTIC_PLANNING_TIME {
            return if index == 0 { Statistic::planning(self.planning) } else { Statistic::unknown() };
        }

        let Some(pass) = self.passes[..self.used].get(index) else {
            return Statistic::unknown();
        };

        match statistic {
            STATISTIC_FORWARD_TIME => Statistic::execution(pass.forward),
            STATISTIC_SPECTRUM_TIME => Statistic::execution(pass.spectrum),
            STATISTIC_BACKWARD_TIME => Statistic::execution(pass.backward),
            _ => Statistic::unknown(),
        }
    }

    pub(crate) fn print(&self, name: &str) {
        println!("{name}: planning {:.6} s", self.planning);
        for (i, pass) in self.passes[..self.used].iter().enumerate() {
            println!(
                "{name}: pass {i}: forward {:.6} s, spectrum {:.6} s, backward {:.6} s",
                pass.forward, pass.spectrum, pass.backward
            );
        }
    }
}
