use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{
        Arc, Barrier,
        atomic::{AtomicBool, AtomicU32, Ordering},
    },
    thread,
};

use num_complex::Complex64;
use upsample_core::{
    Layout, Plan, PlanCache, PlanFlags, PlanKey, Properties, STATISTIC_EXECUTION_TIME, Statistic, StatisticKind,
};
use upsample_hal::api::InterpolatePlan;

/// Blocks inside its first execution until released and records the flags
/// it receives.
struct Gate {
    props: Properties,
    entered: Arc<Barrier>,
    release: Arc<Barrier>,
    blocked: AtomicBool,
    flags: Arc<AtomicU32>,
}

impl InterpolatePlan for Gate {
    fn name(&self) -> &str {
        "gate"
    }

    fn layout(&self) -> Layout {
        Layout::Interleaved
    }

    fn properties(&self) -> &Properties {
        &self.props
    }

    fn execute_interleaved(&mut self, _input: &[Complex64], _output: &mut [Complex64]) {
        if !self.blocked.swap(true, Ordering::SeqCst) {
            self.entered.wait();
            self.release.wait();
        }
    }

    fn print_timings(&self) {}

    fn set_flags(&mut self, flags: PlanFlags) {
        self.flags.store(flags.bits(), Ordering::SeqCst);
    }

    fn statistic(&self, statistic: u32, _index: usize) -> Statistic {
        Statistic::planning(statistic as f64)
    }
}

fn gate_with_flags(flags: &Arc<AtomicU32>) -> (Plan, Arc<Barrier>, Arc<Barrier>) {
    let entered: Arc<Barrier> = Arc::new(Barrier::new(2));
    let release: Arc<Barrier> = Arc::new(Barrier::new(2));
    let plan: Plan = Plan::new(Box::new(Gate {
        props: Properties::new(Layout::Interleaved, 1, 1, 1),
        entered: entered.clone(),
        release: release.clone(),
        blocked: AtomicBool::new(false),
        flags: flags.clone(),
    }));
    (plan, entered, release)
}

fn gate() -> (Plan, Arc<Barrier>, Arc<Barrier>) {
    gate_with_flags(&Arc::new(AtomicU32::new(0)))
}

#[test]
fn concurrent_shares_balance() {
    let (plan, _, _) = gate();

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..1000 {
                    let share: Plan = plan.acquire();
                    assert!(share.ref_count() >= 2);
                    drop(share);
                }
            });
        }
    });

    assert_eq!(plan.ref_count(), 1);
    assert_eq!(plan.destroy(), 0);
}

#[test]
fn concurrent_execution_of_one_plan_is_fatal() {
    let (plan, entered, release) = gate();
    let input: [Complex64; 1] = [Complex64::new(0.0, 0.0)];

    thread::scope(|scope| {
        let worker = scope.spawn(|| {
            let mut output: [Complex64; 8] = [Complex64::new(0.0, 0.0); 8];
            plan.execute_interleaved(&input, &mut output);
        });

        entered.wait();
        let mut output: [Complex64; 8] = [Complex64::new(0.0, 0.0); 8];
        let second = catch_unwind(AssertUnwindSafe(|| plan.execute_interleaved(&input, &mut output)));
        release.wait();

        assert!(second.is_err());
        assert!(worker.join().is_ok());
    });
}

#[test]
fn introspection_during_execution_does_not_block() {
    let flags: Arc<AtomicU32> = Arc::new(AtomicU32::new(0));
    let (plan, entered, release) = gate_with_flags(&flags);
    let input: [Complex64; 1] = [Complex64::new(0.0, 0.0)];

    thread::scope(|scope| {
        let worker = scope.spawn(|| {
            let mut output: [Complex64; 8] = [Complex64::new(0.0, 0.0); 8];
            plan.execute_interleaved(&input, &mut output);
        });

        entered.wait();
        let observer: Plan = plan.acquire();
        let observed = catch_unwind(AssertUnwindSafe(|| {
            let elapsed: Statistic = observer.statistic(STATISTIC_EXECUTION_TIME, 0);
            let forwarded: Statistic = observer.statistic(7, 0);
            observer.set_flags(PlanFlags::PREFER_SPLIT_LAYOUT);
            observer.print_timings();
            (elapsed, forwarded)
        }));
        release.wait();

        let (elapsed, forwarded) = observed.unwrap();
        assert_eq!(elapsed.kind, StatisticKind::Unknown);
        assert_eq!(forwarded.kind, StatisticKind::Unknown);
        assert!(worker.join().is_ok());
    });

    // Flags set mid-execution reach the implementation before the next run.
    assert_eq!(flags.load(Ordering::SeqCst), 0);
    let mut output: [Complex64; 8] = [Complex64::new(0.0, 0.0); 8];
    plan.execute_interleaved(&input, &mut output);
    assert_eq!(flags.load(Ordering::SeqCst), PlanFlags::PREFER_SPLIT_LAYOUT.bits());

    assert_eq!(plan.statistic(STATISTIC_EXECUTION_TIME, 0).kind, StatisticKind::Execution);
    assert_eq!(plan.statistic(7, 0), Statistic::planning(7.0));

    plan.set_flags(PlanFlags::PREFER_PACKED_LAYOUT);
    assert_eq!(flags.load(Ordering::SeqCst), PlanFlags::PREFER_PACKED_LAYOUT.bits());
}

#[test]
fn cache_keeps_first_plan_for_a_key() {
    let cache: PlanCache = PlanCache::new();
    let key: PlanKey = PlanKey::new(1, 1, 1, Layout::Interleaved);

    let (first, _, _) = gate();
    let (second, _, _) = gate();

    assert!(cache.insert(key, &first));
    assert!(!cache.insert(key, &second));
    assert_eq!(first.ref_count(), 2);
    assert_eq!(second.ref_count(), 1);
    assert!(cache.contains(&key));
    assert!(!cache.contains(&PlanKey::new(1, 1, 1, Layout::Split)));

    let hit: Plan = cache.get(&key).unwrap();
    assert!(hit.ptr_eq(&first));
    assert_eq!(first.ref_count(), 3);

    drop(hit);
    assert_eq!(cache.clear(), 1);
    assert_eq!(first.ref_count(), 1);
    assert!(cache.get(&key).is_none());
}
