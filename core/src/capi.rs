//! C entry points. Plans cross the boundary as opaque pointers; every entry
//! point checks the validity tag of the plan it receives. A contract
//! violation panics, which aborts the process at the `extern "C"` boundary.

use std::{
    ffi::{c_char, c_int, c_void},
    mem::ManuallyDrop,
    slice,
};

use num_complex::Complex64;
use upsample_hal::layouts::{PlanFlags, Statistic, StatisticKind};

use crate::{Plan, plan_3d_interleaved_best, plan_3d_split_best, plan_3d_split_product_best};

/// Opaque plan handle.
pub type UpsamplePlan = *mut c_void;

fn dim(n: c_int) -> usize {
    match usize::try_from(n) {
        Ok(n) if n > 0 => n,
        _ => panic!("grid dimensions must be positive, got {n}"),
    }
}

fn flags(flags: c_int) -> PlanFlags {
    PlanFlags::from_bits(flags as u32)
}

fn count(count: usize) -> c_int {
    c_int::try_from(count).unwrap_or(c_int::MAX)
}

/// # Safety
/// `plan` must be a live handle returned by this module.
unsafe fn borrow(plan: UpsamplePlan) -> ManuallyDrop<Plan> {
    // SAFETY: forwarded to the caller.
    unsafe { Plan::borrow_raw(plan) }
}

#[unsafe(no_mangle)]
pub extern "C" fn upsample_plan_3d_interleaved_best(n0: c_int, n1: c_int, n2: c_int, flags_bits: c_int) -> UpsamplePlan {
    plan_3d_interleaved_best(dim(n0), dim(n1), dim(n2), flags(flags_bits)).into_raw()
}

#[unsafe(no_mangle)]
pub extern "C" fn upsample_plan_3d_split_best(n0: c_int, n1: c_int, n2: c_int, flags_bits: c_int) -> UpsamplePlan {
    plan_3d_split_best(dim(n0), dim(n1), dim(n2), flags(flags_bits)).into_raw()
}

#[unsafe(no_mangle)]
pub extern "C" fn upsample_plan_3d_split_product_best(n0: c_int, n1: c_int, n2: c_int, flags_bits: c_int) -> UpsamplePlan {
    plan_3d_split_product_best(dim(n0), dim(n1), dim(n2), flags(flags_bits)).into_raw()
}

/// `input` holds `2 * coarse` doubles (real and imaginary parts interleaved),
/// `output` holds `2 * fine`.
///
/// # Safety
/// `plan` must be live and the buffers must have the sizes above.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn upsample_execute_interleaved(plan: UpsamplePlan, input: *const f64, output: *mut f64) {
    // SAFETY: forwarded to the caller.
    let plan: ManuallyDrop<Plan> = unsafe { borrow(plan) };
    let coarse: usize = plan.properties().element_count();
    let fine: usize = plan.properties().fine_element_count();

    // SAFETY: sizes are a caller precondition.
    let (input, output): (&[f64], &mut [f64]) =
        unsafe { (slice::from_raw_parts(input, 2 * coarse), slice::from_raw_parts_mut(output, 2 * fine)) };

    let input: &[Complex64] = bytemuck::cast_slice(input);
    let output: &mut [Complex64] = bytemuck::cast_slice_mut(output);
    plan.execute_interleaved(input, output);
}

/// # Safety
/// `plan` must be live; `rin` and `iin` hold `coarse` doubles, `rout` and
/// `iout` hold `fine` doubles.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn upsample_execute_split(
    plan: UpsamplePlan,
    rin: *const f64,
    iin: *const f64,
    rout: *mut f64,
    iout: *mut f64,
) {
    // SAFETY: forwarded to the caller.
    let plan: ManuallyDrop<Plan> = unsafe { borrow(plan) };
    let coarse: usize = plan.properties().element_count();
    let fine: usize = plan.properties().fine_element_count();

    // SAFETY: sizes are a caller precondition.
    unsafe {
        plan.execute_split(
            slice::from_raw_parts(rin, coarse),
            slice::from_raw_parts(iin, coarse),
            slice::from_raw_parts_mut(rout, fine),
            slice::from_raw_parts_mut(iout, fine),
        )
    }
}

/// # Safety
/// `plan` must be live; `rin` and `iin` hold `coarse` doubles, `out` holds
/// `fine` doubles.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn upsample_execute_split_product(plan: UpsamplePlan, rin: *const f64, iin: *const f64, out: *mut f64) {
    // SAFETY: forwarded to the caller.
    let plan: ManuallyDrop<Plan> = unsafe { borrow(plan) };
    let coarse: usize = plan.properties().element_count();
    let fine: usize = plan.properties().fine_element_count();

    // SAFETY: sizes are a caller precondition.
    unsafe {
        plan.execute_split_product(
            slice::from_raw_parts(rin, coarse),
            slice::from_raw_parts(iin, coarse),
            slice::from_raw_parts_mut(out, fine),
        )
    }
}

/// The returned string lives as long as the plan.
///
/// # Safety
/// `plan` must be live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn upsample_get_name(plan: UpsamplePlan) -> *const c_char {
    // SAFETY: forwarded to the caller.
    let plan: ManuallyDrop<Plan> = unsafe { borrow(plan) };
    plan.name_c().as_ptr()
}

/// # Safety
/// `plan` must be live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn upsample_print_timings(plan: UpsamplePlan) {
    // SAFETY: forwarded to the caller.
    unsafe { borrow(plan) }.print_timings();
}

/// # Safety
/// `plan` must be live; `kind` and `value` must be writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn upsample_get_statistic_float(
    plan: UpsamplePlan,
    statistic: c_int,
    index: c_int,
    kind: *mut StatisticKind,
    value: *mut f64,
) {
    // SAFETY: forwarded to the caller.
    let plan: ManuallyDrop<Plan> = unsafe { borrow(plan) };

    let result: Statistic = match (u32::try_from(statistic), usize::try_from(index)) {
        (Ok(statistic), Ok(index)) => plan.statistic(statistic, index),
        _ => Statistic::unknown(),
    };

    // SAFETY: forwarded to the caller.
    unsafe {
        kind.write(result.kind);
        value.write(result.value);
    }
}

/// # Safety
/// `plan` must be live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn upsample_set_flags(plan: UpsamplePlan, flags_bits: c_int) {
    // SAFETY: forwarded to the caller.
    unsafe { borrow(plan) }.set_flags(flags(flags_bits));
}

/// Takes an additional share and returns the new count.
///
/// # Safety
/// `plan` must be live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn upsample_acquire(plan: UpsamplePlan) -> c_int {
    // SAFETY: forwarded to the caller.
    count(unsafe { Plan::acquire_raw(plan) })
}

/// Releases one share and returns the remaining count. The handle must not
/// be used again once the count reaches zero.
///
/// # Safety
/// `plan` must be live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn upsample_destroy_plan(plan: UpsamplePlan) -> c_int {
    // SAFETY: forwarded to the caller.
    count(unsafe { Plan::release_raw(plan) })
}
