#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use num_complex::Complex64;
use once_cell::sync::Lazy;
use upsample_core::{CostHarness, Layout, Plan, PlanFlags, Properties, Statistic};
use upsample_hal::api::InterpolatePlan;

/// Number of dropped fake plans per (family, coarse shape).
static DROPS: Lazy<Mutex<HashMap<(String, [usize; 3]), usize>>> = Lazy::new(|| Mutex::new(HashMap::new()));

pub fn drops(family: &str, shape: [usize; 3]) -> usize {
    DROPS
        .lock()
        .unwrap()
        .get(&(family.to_string(), shape))
        .copied()
        .unwrap_or(0)
}

/// Copies its input into the even fine samples and counts its drops.
pub struct Fake {
    name: &'static str,
    shape: [usize; 3],
    props: Properties,
}

impl Fake {
    fn boxed(name: &'static str, layout: Layout, n0: usize, n1: usize, n2: usize) -> Box<dyn InterpolatePlan> {
        Box::new(Fake {
            name,
            shape: [n0, n1, n2],
            props: Properties::new(layout, n0, n1, n2),
        })
    }
}

impl InterpolatePlan for Fake {
    fn name(&self) -> &str {
        self.name
    }

    fn layout(&self) -> Layout {
        self.props.layout
    }

    fn properties(&self) -> &Properties {
        &self.props
    }

    fn execute_interleaved(&mut self, input: &[Complex64], output: &mut [Complex64]) {
        output[..input.len()].copy_from_slice(input);
    }

    fn print_timings(&self) {}

    fn set_flags(&mut self, _flags: PlanFlags) {}

    fn statistic(&self, _statistic: u32, _index: usize) -> Statistic {
        Statistic::unknown()
    }
}

impl Drop for Fake {
    fn drop(&mut self) {
        *DROPS
            .lock()
            .unwrap()
            .entry((self.name.to_string(), self.shape))
            .or_insert(0) += 1;
    }
}

pub fn fake_a(n0: usize, n1: usize, n2: usize, _flags: PlanFlags) -> Box<dyn InterpolatePlan> {
    Fake::boxed("fake-a", Layout::Interleaved, n0, n1, n2)
}

pub fn fake_b(n0: usize, n1: usize, n2: usize, _flags: PlanFlags) -> Box<dyn InterpolatePlan> {
    Fake::boxed("fake-b", Layout::Interleaved, n0, n1, n2)
}

pub fn fake_c(n0: usize, n1: usize, n2: usize, _flags: PlanFlags) -> Box<dyn InterpolatePlan> {
    Fake::boxed("fake-c", Layout::Interleaved, n0, n1, n2)
}

/// Registered for interleaved but builds a split plan.
pub fn fake_misfiled(n0: usize, n1: usize, n2: usize, _flags: PlanFlags) -> Box<dyn InterpolatePlan> {
    Fake::boxed("fake-misfiled", Layout::Split, n0, n1, n2)
}

/// Fixed cost per plan name; counts how many candidates it measured.
pub struct TableHarness {
    costs: HashMap<&'static str, f64>,
    calls: AtomicUsize,
}

impl TableHarness {
    pub fn new(costs: &[(&'static str, f64)]) -> Self {
        Self {
            costs: costs.iter().copied().collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CostHarness for TableHarness {
    fn cost(&self, plan: &Plan) -> f64 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.costs.get(plan.name()).copied().unwrap_or(1.0)
    }
}
