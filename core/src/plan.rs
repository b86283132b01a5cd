use std::{
    ffi::{CStr, CString},
    fmt,
    mem::ManuallyDrop,
    ptr::NonNull,
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
    },
    time::Instant,
};

use num_complex::Complex64;
use tracing::trace;
use upsample_hal::{
    api::InterpolatePlan,
    layouts::{Layout, PlanFlags, Properties, STATISTIC_EXECUTION_TIME, Statistic},
};

use crate::timer::TimingSample;

/// Tag stored in every live plan. Cleared when the plan is freed.
const PLAN_MAGIC: u64 = 0x7570_7361_6d70_6c65;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct PlanInner {
    magic: AtomicU64,
    ref_cnt: AtomicUsize,
    layout: Layout,
    props: Properties,
    name: String,
    name_c: CString,
    executing: AtomicBool,
    detail: Mutex<Box<dyn InterpolatePlan>>,
    timing: Mutex<TimingSample>,
    pending_flags: Mutex<Option<PlanFlags>>,
}

/// Exclusive borrow of the implementation for one execution.
struct Execution<'a> {
    inner: &'a PlanInner,
    detail: MutexGuard<'a, Box<dyn InterpolatePlan>>,
}

impl Execution<'_> {
    fn run(mut self, dispatch: impl FnOnce(&mut dyn InterpolatePlan)) {
        let before: Instant = Instant::now();
        dispatch(&mut **self.detail);
        let after: Instant = Instant::now();
        lock(&self.inner.timing).record(before, after);
    }
}

impl Drop for Execution<'_> {
    fn drop(&mut self) {
        self.inner.executing.store(false, Ordering::Release);
    }
}

impl PlanInner {
    #[inline]
    fn validate(&self) {
        assert_eq!(
            self.magic.load(Ordering::Acquire),
            PLAN_MAGIC,
            "invalid or already destroyed interpolation plan"
        );
    }

    /// Starts an execution. Never waits for another execution: one plan
    /// instance executes on at most one thread at a time.
    fn begin_execution(&self) -> Execution<'_> {
        if self.executing.swap(true, Ordering::AcqRel) {
            panic!("plan {} is already executing on another thread", self.name)
        }

        let mut detail: MutexGuard<'_, Box<dyn InterpolatePlan>> = lock(&self.detail);
        if let Some(flags) = lock(&self.pending_flags).take() {
            detail.set_flags(flags);
        }

        Execution { inner: self, detail }
    }

    /// The implementation, unless an execution currently holds it.
    fn idle_detail(&self) -> Option<MutexGuard<'_, Box<dyn InterpolatePlan>>> {
        if self.executing.load(Ordering::Acquire) {
            return None;
        }
        Some(lock(&self.detail))
    }
}

/// Shared, reference-counted handle to an interpolation plan.
///
/// Cloning a [`Plan`] acquires a share and dropping it releases one. The
/// implementation state is dropped exactly once, together with the last
/// share. A plan obtained from the tuner with caching enabled also carries
/// the cache's own share, so it outlives every caller's handle.
///
/// Executing the same instance from two threads at once panics. Reading
/// statistics, printing timings and setting flags are allowed at any time.
pub struct Plan {
    ptr: NonNull<PlanInner>,
}

unsafe impl Send for Plan {}
unsafe impl Sync for Plan {}

impl Plan {
    /// Wraps a freshly constructed implementation. The returned handle is the
    /// only share.
    pub fn new(detail: Box<dyn InterpolatePlan>) -> Self {
        let name: String = detail.name().to_string();
        let name_c: CString = CString::new(name.replace('\0', "")).unwrap_or_default();

        let inner: Box<PlanInner> = Box::new(PlanInner {
            magic: AtomicU64::new(PLAN_MAGIC),
            ref_cnt: AtomicUsize::new(1),
            layout: detail.layout(),
            props: *detail.properties(),
            name,
            name_c,
            executing: AtomicBool::new(false),
            detail: Mutex::new(detail),
            timing: Mutex::new(TimingSample::default()),
            pending_flags: Mutex::new(None),
        });

        Self {
            ptr: NonNull::from(Box::leak(inner)),
        }
    }

    #[inline]
    fn inner(&self) -> &PlanInner {
        // SAFETY: a `Plan` always holds one share, so the allocation is live.
        let inner: &PlanInner = unsafe { self.ptr.as_ref() };
        inner.validate();
        inner
    }

    /// Takes an additional share of this plan.
    pub fn acquire(&self) -> Plan {
        // SAFETY: `self` holds a share.
        unsafe { acquire(self.ptr) };
        Plan { ptr: self.ptr }
    }

    /// Releases this share and returns the number of shares left. The plan
    /// is freed when the result is zero.
    pub fn destroy(self) -> usize {
        let this: ManuallyDrop<Plan> = ManuallyDrop::new(self);
        // SAFETY: the share held by `this` is handed over to `release`.
        unsafe { release(this.ptr) }
    }

    pub fn ref_count(&self) -> usize {
        self.inner().ref_cnt.load(Ordering::Acquire)
    }

    /// True if both handles share the same underlying plan.
    pub fn ptr_eq(&self, other: &Plan) -> bool {
        self.ptr == other.ptr
    }

    pub fn name(&self) -> &str {
        &self.inner().name
    }

    pub fn name_c(&self) -> &CStr {
        &self.inner().name_c
    }

    pub fn layout(&self) -> Layout {
        self.inner().layout
    }

    pub fn properties(&self) -> &Properties {
        &self.inner().props
    }

    pub fn execute_interleaved(&self, input: &[Complex64], output: &mut [Complex64]) {
        self.inner()
            .begin_execution()
            .run(|detail| detail.execute_interleaved(input, output));
    }

    pub fn execute_split(&self, rin: &[f64], iin: &[f64], rout: &mut [f64], iout: &mut [f64]) {
        self.inner()
            .begin_execution()
            .run(|detail| detail.execute_split(rin, iin, rout, iout));
    }

    pub fn execute_split_product(&self, rin: &[f64], iin: &[f64], out: &mut [f64]) {
        self.inner()
            .begin_execution()
            .run(|detail| detail.execute_split_product(rin, iin, out));
    }

    pub fn print_timings(&self) {
        match self.inner().idle_detail() {
            Some(detail) => detail.print_timings(),
            None => println!("{}: execution in progress", self.name()),
        }
    }

    /// Reads a statistic. [`STATISTIC_EXECUTION_TIME`] is answered from the
    /// wall-clock sample of the last completed execution whatever the index.
    /// Every other identifier is forwarded to the implementation, and reads
    /// [`Statistic::unknown`] while an execution is running.
    pub fn statistic(&self, statistic: u32, index: usize) -> Statistic {
        let inner: &PlanInner = self.inner();

        if statistic == STATISTIC_EXECUTION_TIME {
            return match lock(&inner.timing).delta() {
                Some(delta) => Statistic::execution(delta),
                None => Statistic::unknown(),
            };
        }

        match inner.idle_detail() {
            Some(detail) => detail.statistic(statistic, index),
            None => Statistic::unknown(),
        }
    }

    /// Applies `flags` now, or at the start of the next execution if one is
    /// running.
    pub fn set_flags(&self, flags: PlanFlags) {
        let inner: &PlanInner = self.inner();
        match inner.idle_detail() {
            Some(mut detail) => {
                lock(&inner.pending_flags).take();
                detail.set_flags(flags);
            }
            None => *lock(&inner.pending_flags) = Some(flags),
        }
    }

    /// Converts the handle into an opaque pointer, keeping its share.
    pub fn into_raw(self) -> *mut std::ffi::c_void {
        let this: ManuallyDrop<Plan> = ManuallyDrop::new(self);
        this.ptr.as_ptr().cast()
    }

    /// Rebuilds a handle from [`Plan::into_raw`], taking over its share.
    ///
    /// # Safety
    /// `raw` must come from [`Plan::into_raw`] or [`Plan::acquire_raw`] and
    /// its share must not have been released.
    pub unsafe fn from_raw(raw: *mut std::ffi::c_void) -> Plan {
        let ptr: NonNull<PlanInner> = NonNull::new(raw.cast()).unwrap_or_else(|| panic!("null interpolation plan"));
        // SAFETY: guaranteed live by the caller.
        unsafe { ptr.as_ref() }.validate();
        Plan { ptr }
    }

    /// Borrows a handle from an opaque pointer without touching the count.
    ///
    /// # Safety
    /// Same contract as [`Plan::from_raw`].
    pub unsafe fn borrow_raw(raw: *mut std::ffi::c_void) -> ManuallyDrop<Plan> {
        // SAFETY: forwarded to the caller.
        ManuallyDrop::new(unsafe { Plan::from_raw(raw) })
    }

    /// Adds a share to an opaque plan and returns the new count.
    ///
    /// # Safety
    /// Same contract as [`Plan::from_raw`].
    pub unsafe fn acquire_raw(raw: *mut std::ffi::c_void) -> usize {
        // SAFETY: forwarded to the caller.
        let plan: ManuallyDrop<Plan> = unsafe { Plan::borrow_raw(raw) };
        // SAFETY: `plan` points at a live allocation.
        unsafe { acquire(plan.ptr) }
    }

    /// Releases one share of an opaque plan and returns the remaining count.
    ///
    /// # Safety
    /// Same contract as [`Plan::from_raw`]; `raw` must not be used again if
    /// the result is zero.
    pub unsafe fn release_raw(raw: *mut std::ffi::c_void) -> usize {
        // SAFETY: forwarded to the caller.
        unsafe { Plan::from_raw(raw) }.destroy()
    }
}

/// # Safety
/// `ptr` must point at a live plan.
unsafe fn acquire(ptr: NonNull<PlanInner>) -> usize {
    // SAFETY: forwarded to the caller.
    let inner: &PlanInner = unsafe { ptr.as_ref() };
    inner.validate();
    let prev: usize = inner.ref_cnt.fetch_add(1, Ordering::AcqRel);
    assert!(prev > 0, "plan {} acquired after its last share was released", inner.name);
    prev + 1
}

/// # Safety
/// `ptr` must point at a live plan, and the caller gives up one share.
unsafe fn release(ptr: NonNull<PlanInner>) -> usize {
    // SAFETY: forwarded to the caller.
    let inner: &PlanInner = unsafe { ptr.as_ref() };
    inner.validate();

    let prev: usize = inner
        .ref_cnt
        .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| count.checked_sub(1))
        .unwrap_or_else(|_| panic!("plan {}: reference count underflow", inner.name));

    if prev == 1 {
        trace!(plan = %inner.name, "destroying interpolation plan");
        inner.magic.store(0, Ordering::Release);
        // SAFETY: the last share is gone; the allocation came from
        // `Box::leak` in `Plan::new`.
        drop(unsafe { Box::from_raw(ptr.as_ptr()) });
    }

    prev - 1
}

impl Clone for Plan {
    fn clone(&self) -> Self {
        self.acquire()
    }
}

impl Drop for Plan {
    fn drop(&mut self) {
        // SAFETY: `self` holds a share that is given up here.
        unsafe { release(self.ptr) };
    }
}

impl fmt::Debug for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plan")
            .field("name", &self.name())
            .field("layout", &self.layout())
            .field("ref_count", &self.ref_count())
            .finish()
    }
}
