//! # upsample-core
//!
//! Runtime of the 2x spectral upsampler: shared plan handles, the shape-keyed
//! plan cache and the auto-tuner that benchmarks every registered algorithm
//! family and keeps the fastest.
//!
//! ```no_run
//! use num_complex::Complex64;
//! use upsample_core::{Plan, PlanFlags, plan_3d_interleaved_best};
//!
//! let plan: Plan = plan_3d_interleaved_best(32, 32, 32, PlanFlags::NONE);
//! let input: Vec<Complex64> = vec![Complex64::new(1.0, 0.0); plan.properties().element_count()];
//! let mut output: Vec<Complex64> = vec![Complex64::new(0.0, 0.0); plan.properties().fine_element_count()];
//! plan.execute_interleaved(&input, &mut output);
//! ```
//!
//! With caching enabled (the default, see [`TunerConfig`]) repeated requests
//! for the same shape and layout return the same plan without benchmarking
//! again.

mod cache;
mod config;
mod harness;
mod plan;
mod timer;
mod tuner;

pub mod capi;

pub use cache::*;
pub use config::*;
pub use harness::*;
pub use plan::*;
pub use tuner::*;

pub use upsample_hal::layouts::{
    Layout, PlanFlags, PlanKey, Properties, STATISTIC_EXECUTION_TIME, STATISTIC_LAST_COMMON_VALUE, Statistic, StatisticKind,
};
