use std::sync::atomic::{AtomicU64, Ordering};

use backend_domain::errors::ContributionError;

#[derive(Debug, Default)]
pub struct Metrics {
    contributions_added: AtomicU64,
    contributions_reduced: AtomicU64,
    contributions_deleted: AtomicU64,
    optimistic_lock_conflicts: AtomicU64,
    store_failures: AtomicU64,
}

impl Metrics {
    pub fn record_added(&self) {
        self.contributions_added.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reduced(&self) {
        self.contributions_reduced.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_deleted(&self) {
        self.contributions_deleted.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts conflicts and store failures; business-rule rejections are not tracked.
    pub fn record_failure(&self, err: &ContributionError) {
        match err {
            ContributionError::OptimisticLock { .. } => {
                self.optimistic_lock_conflicts.fetch_add(1, Ordering::Relaxed);
            }
            ContributionError::StoreFailure { .. } => {
                self.store_failures.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    pub fn render_prometheus(&self) -> String {
        let added = self.contributions_added.load(Ordering::Relaxed);
        let reduced = self.contributions_reduced.load(Ordering::Relaxed);
        let deleted = self.contributions_deleted.load(Ordering::Relaxed);
        let conflicts = self.optimistic_lock_conflicts.load(Ordering::Relaxed);
        let failures = self.store_failures.load(Ordering::Relaxed);

        format!(
            "# TYPE happyrow_contributions_added_total counter\n\
happyrow_contributions_added_total {}\n\
# TYPE happyrow_contributions_reduced_total counter\n\
happyrow_contributions_reduced_total {}\n\
# TYPE happyrow_contributions_deleted_total counter\n\
happyrow_contributions_deleted_total {}\n\
# TYPE happyrow_optimistic_lock_conflicts_total counter\n\
happyrow_optimistic_lock_conflicts_total {}\n\
# TYPE happyrow_store_failures_total counter\n\
happyrow_store_failures_total {}\n",
            added, reduced, deleted, conflicts, failures
        )
    }
}
