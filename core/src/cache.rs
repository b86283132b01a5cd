use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;
use tracing::debug;
use upsample_hal::layouts::PlanKey;
use utils::map::Map;

use crate::Plan;

static GLOBAL_CACHE: Lazy<Arc<PlanCache>> = Lazy::new(|| Arc::new(PlanCache::new()));

/// Winners of previous tuning runs, keyed by shape and layout.
///
/// The cache holds one share of every stored plan. Entries are never evicted
/// or replaced; [`PlanCache::clear`] releases all of them at once.
#[derive(Default)]
pub struct PlanCache {
    plans: Mutex<Map<PlanKey, Plan>>,
}

impl PlanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide instance, created on first use.
    pub fn global() -> Arc<PlanCache> {
        GLOBAL_CACHE.clone()
    }

    fn plans(&self) -> MutexGuard<'_, Map<PlanKey, Plan>> {
        self.plans.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a new share of the plan stored under `key`.
    pub fn get(&self, key: &PlanKey) -> Option<Plan> {
        self.plans().get(key).map(Plan::acquire)
    }

    /// Stores a share of `plan` under `key` unless the key is already
    /// present, in which case the stored plan is kept and `false` returned.
    pub fn insert(&self, key: PlanKey, plan: &Plan) -> bool {
        let inserted: bool = self.plans().insert_if_absent(key, || plan.acquire());
        if inserted {
            debug!(%key, plan = plan.name(), "cached interpolation plan");
        } else {
            debug!(%key, plan = plan.name(), "key already cached, keeping stored plan");
        }
        inserted
    }

    pub fn contains(&self, key: &PlanKey) -> bool {
        self.plans().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.plans().len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans().is_empty()
    }

    /// Releases the cache's share of every stored plan and returns how many
    /// entries were removed.
    pub fn clear(&self) -> usize {
        let drained: Vec<(PlanKey, Plan)> = self.plans().drain();
        debug!(entries = drained.len(), "clearing plan cache");
        drained.len()
    }
}
