//! # upsample-hal
//!
//! Shared building blocks of the 2× spectral upsampling runtime.
//!
//! The crate is organised in three layers:
//!
//! 1. **[`layouts`]** -- plain value types describing a problem instance:
//!    the data [`layouts::Layout`], the cache [`layouts::PlanKey`], the grid
//!    [`layouts::Properties`] (dimensions, strides, Nyquist corners), the
//!    advisory [`layouts::PlanFlags`] and the [`layouts::Statistic`] record.
//! 2. **[`api`]** -- the [`api::InterpolatePlan`] capability contract that every
//!    algorithm family implements, and the [`api::PlanConstructor`] signature
//!    used to register a family with the selector.
//! 3. **[`kernels`]** -- elementwise complex/real multiplication with an SSE2
//!    path for 16-byte aligned buffers and a scalar reference path.
//!
//! Buffers handed to the kernels and the algorithm families are usually
//! allocated through [`AlignedVec`], which guarantees [`DEFAULTALIGN`].

pub mod api;
pub mod kernels;
pub mod layouts;

mod alloc;

pub use alloc::*;

/// Default memory alignment in bytes for buffers allocated by the runtime.
///
/// 64 bytes covers a cache line and every SIMD width the kernels use.
pub const DEFAULTALIGN: usize = 64;

/// Alignment required by the SSE2 kernels.
pub const SSE_ALIGN: usize = 16;

fn is_aligned_custom<T>(ptr: *const T, align: usize) -> bool {
    (ptr as usize).is_multiple_of(align)
}

/// Returns `true` if `ptr` is aligned to [`DEFAULTALIGN`] bytes.
pub fn is_aligned<T>(ptr: *const T) -> bool {
    is_aligned_custom(ptr, DEFAULTALIGN)
}

/// Returns `true` if `ptr` is aligned to [`SSE_ALIGN`] bytes.
pub fn is_sse_aligned<T>(ptr: *const T) -> bool {
    is_aligned_custom(ptr, SSE_ALIGN)
}
