//! # upsample-backend
//!
//! CPU implementations of the [`upsample_hal::api::InterpolatePlan`] contract.
//!
//! Three algorithm families are provided, each for the three data layouts:
//!
//! - [`naive`] -- forward transform, explicit zero-padding, full fine-grid
//!   inverse transform.
//! - [`padding_aware`] -- same spectrum, but the inverse transform skips lines
//!   that are entirely padding.
//! - [`phase_shift`] -- eight half-sample-shifted coarse inverse transforms
//!   interleaved into the fine grid.
//!
//! All families agree to floating-point round-off. Every family module exposes
//! `new_interleaved`, `new_split` and `new_split_product`, which have the
//! [`upsample_hal::api::PlanConstructor`] signature and are meant to be
//! registered with the auto-tuner.

mod engine;
mod plan;
mod spectrum;
mod timings;

pub mod naive;
pub mod padding_aware;
pub mod phase_shift;

pub use timings::{STATISTIC_BACKWARD_TIME, STATISTIC_FORWARD_TIME, STATISTIC_PLANNING_TIME, STATISTIC_SPECTRUM_TIME};
