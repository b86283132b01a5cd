use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::{debug, info};
use upsample_backend::{naive, padding_aware, phase_shift};
use upsample_hal::{
    api::PlanConstructor,
    layouts::{Layout, PlanFlags, PlanKey},
};

use crate::{CostHarness, Plan, PlanCache, TunerConfig, WallClockHarness};

/// Ordered list of candidate constructors for each layout. Registration
/// order decides ties.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    interleaved: Vec<PlanConstructor>,
    split: Vec<PlanConstructor>,
    split_product: Vec<PlanConstructor>,
}

impl Registry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The CPU families: naive, padding-aware, phase-shift.
    pub fn cpu() -> Self {
        let mut registry: Self = Self::empty();
        registry
            .register(Layout::Interleaved, naive::new_interleaved)
            .register(Layout::Interleaved, padding_aware::new_interleaved)
            .register(Layout::Interleaved, phase_shift::new_interleaved)
            .register(Layout::Split, naive::new_split)
            .register(Layout::Split, padding_aware::new_split)
            .register(Layout::Split, phase_shift::new_split)
            .register(Layout::SplitProduct, naive::new_split_product)
            .register(Layout::SplitProduct, padding_aware::new_split_product)
            .register(Layout::SplitProduct, phase_shift::new_split_product);
        registry
    }

    pub fn register(&mut self, layout: Layout, new: PlanConstructor) -> &mut Self {
        self.constructors_mut(layout).push(new);
        self
    }

    pub fn constructors(&self, layout: Layout) -> &[PlanConstructor] {
        match layout {
            Layout::Interleaved => &self.interleaved,
            Layout::Split => &self.split,
            Layout::SplitProduct => &self.split_product,
        }
    }

    fn constructors_mut(&mut self, layout: Layout) -> &mut Vec<PlanConstructor> {
        match layout {
            Layout::Interleaved => &mut self.interleaved,
            Layout::Split => &mut self.split,
            Layout::SplitProduct => &mut self.split_product,
        }
    }
}

/// Picks the fastest registered family for a shape and layout.
pub struct Tuner {
    config: TunerConfig,
    cache: Arc<PlanCache>,
    registry: Registry,
    harness: Box<dyn CostHarness>,
}

impl Default for Tuner {
    /// CPU families, wall-clock timing, the process-wide cache and the
    /// configuration read from the environment.
    fn default() -> Self {
        Self::new(
            TunerConfig::from_env(),
            PlanCache::global(),
            Registry::cpu(),
            Box::new(WallClockHarness::default()),
        )
    }
}

impl Tuner {
    pub fn new(config: TunerConfig, cache: Arc<PlanCache>, registry: Registry, harness: Box<dyn CostHarness>) -> Self {
        Self {
            config,
            cache,
            registry,
            harness,
        }
    }

    pub fn config(&self) -> &TunerConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<PlanCache> {
        &self.cache
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn best_plan_interleaved(&self, n0: usize, n1: usize, n2: usize, flags: PlanFlags) -> Plan {
        self.best_plan(Layout::Interleaved, n0, n1, n2, flags)
    }

    pub fn best_plan_split(&self, n0: usize, n1: usize, n2: usize, flags: PlanFlags) -> Plan {
        self.best_plan(Layout::Split, n0, n1, n2, flags)
    }

    pub fn best_plan_split_product(&self, n0: usize, n1: usize, n2: usize, flags: PlanFlags) -> Plan {
        self.best_plan(Layout::SplitProduct, n0, n1, n2, flags)
    }

    /// Returns the cached plan for the key if there is one, otherwise
    /// benchmarks every registered family in order and keeps the strictly
    /// cheapest. Losing candidates are destroyed as soon as they lose. The
    /// caller receives one share of the result.
    pub fn best_plan(&self, layout: Layout, n0: usize, n1: usize, n2: usize, flags: PlanFlags) -> Plan {
        let key: PlanKey = PlanKey::new(n0, n1, n2, layout);

        if self.config.cache_enabled {
            if let Some(plan) = self.cache.get(&key) {
                debug!(%key, plan = plan.name(), "plan cache hit");
                return plan;
            }
        }

        let constructors: &[PlanConstructor] = self.registry.constructors(layout);
        assert!(!constructors.is_empty(), "no interpolation family registered for layout {layout}");

        let mut best: Option<(Plan, f64)> = None;

        for new in constructors {
            let plan: Plan = Plan::new(new(n0, n1, n2, flags));
            assert_eq!(
                plan.layout(),
                layout,
                "constructor registered for {layout} built {} with layout {}",
                plan.name(),
                plan.layout()
            );

            let cost: f64 = self.harness.cost(&plan);
            debug!(%key, plan = plan.name(), cost, "benchmarked candidate");

            let improves: bool = best.as_ref().is_none_or(|(_, best_cost)| cost < *best_cost);

            if improves {
                if let Some((beaten, _)) = best.replace((plan, cost)) {
                    beaten.destroy();
                }
            } else {
                plan.destroy();
            }
        }

        let Some((plan, cost)) = best else {
            unreachable!("non-empty registry always yields a candidate")
        };

        info!(%key, plan = plan.name(), cost, "selected interpolation plan");

        if self.config.cache_enabled {
            self.cache.insert(key, &plan);
        }

        plan
    }
}

/// Process-wide tuner behind the `plan_3d_*_best` functions.
static GLOBAL_TUNER: Lazy<Tuner> = Lazy::new(Tuner::default);

pub fn plan_3d_interleaved_best(n0: usize, n1: usize, n2: usize, flags: PlanFlags) -> Plan {
    GLOBAL_TUNER.best_plan_interleaved(n0, n1, n2, flags)
}

pub fn plan_3d_split_best(n0: usize, n1: usize, n2: usize, flags: PlanFlags) -> Plan {
    GLOBAL_TUNER.best_plan_split(n0, n1, n2, flags)
}

pub fn plan_3d_split_product_best(n0: usize, n1: usize, n2: usize, flags: PlanFlags) -> Plan {
    GLOBAL_TUNER.best_plan_split_product(n0, n1, n2, flags)
}
