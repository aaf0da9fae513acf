//! Carousel engine: aggregation cycles, state ownership, and lifecycle.
//!
//! The engine exclusively owns [`CarouselState`]. Renderers read it through
//! [`CarouselEngine::snapshot`] and drive the engine with
//! [`reconfigure`](CarouselEngine::reconfigure),
//! [`retry`](CarouselEngine::retry), [`jump_to`](CarouselEngine::jump_to),
//! and [`teardown`](CarouselEngine::teardown).
//!
//! Only the most recently started cycle may commit. Every cycle takes a
//! generation number when it starts and compares it with the engine's
//! current generation at commit time; a mismatch means a newer cycle (or a
//! teardown) happened in between and the result is dropped.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use marquee_contracts::{
    DetailSource, IndexHandler, ListingSource, PositionController,
    SubscriptionId,
};
use marquee_model::{Category, CategorySpec, PresentationItem};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::aggregate::aggregate;
use crate::autoplay::{
    AutoplayPhase, AutoplayScheduler, DEFAULT_AUTOPLAY_INTERVAL,
};
use crate::derive::derive_active_category;
use crate::enrich::enrich;
use crate::error::AggregationFailure;

/// What happens to the current presentation sequence when a cycle's
/// aggregation fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Fail closed: the carousel is emptied.
    #[default]
    Clear,
    /// Keep showing the previous successful sequence.
    RetainPrevious,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub autoplay_interval: Duration,
    /// Per-request bound for listing and detail calls. `None` waits forever.
    pub request_timeout: Option<Duration>,
    pub failure_policy: FailurePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            autoplay_interval: DEFAULT_AUTOPLAY_INTERVAL,
            request_timeout: None,
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// Engine-owned state. `active_index` is `Some` exactly when `items` is
/// non-empty, and then always a valid index.
#[derive(Debug, Clone)]
pub struct CarouselState {
    pub loading: bool,
    pub items: Arc<[PresentationItem]>,
    pub active_index: Option<usize>,
    pub last_failure: Option<AggregationFailure>,
}

impl Default for CarouselState {
    fn default() -> Self {
        // Matches the placeholder shown before the first cycle completes.
        Self {
            loading: true,
            items: Arc::from(Vec::new()),
            active_index: None,
            last_failure: None,
        }
    }
}

/// Read-only view handed to renderers.
#[derive(Debug, Clone)]
pub struct CarouselSnapshot {
    pub loading: bool,
    pub items: Arc<[PresentationItem]>,
    pub active_index: Option<usize>,
    pub active_category: Option<Category>,
    pub last_failure: Option<AggregationFailure>,
}

impl CarouselSnapshot {
    pub fn active_item(&self) -> Option<&PresentationItem> {
        self.active_index.and_then(|index| self.items.get(index))
    }
}

/// Result of one [`CarouselEngine::run_cycle`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The cycle's sequence replaced the state.
    Committed { generation: u64, items: usize },
    /// Aggregation failed; the failure policy was applied.
    Failed {
        generation: u64,
        failure: AggregationFailure,
    },
    /// A newer cycle or a teardown superseded this one; nothing changed.
    Stale { generation: u64 },
}

pub struct CarouselEngine {
    listing: Arc<dyn ListingSource>,
    detail: Arc<dyn DetailSource>,
    position: Arc<dyn PositionController>,
    config: EngineConfig,
    state: Arc<RwLock<CarouselState>>,
    generation: AtomicU64,
    specs: Mutex<Vec<CategorySpec>>,
    autoplay: Mutex<AutoplayScheduler>,
    subscription: Mutex<Option<SubscriptionId>>,
    torn_down: AtomicBool,
}

impl fmt::Debug for CarouselEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let autoplay = self.autoplay.lock().phase();
        let state = self.state.read();
        f.debug_struct("CarouselEngine")
            .field("config", &self.config)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .field("loading", &state.loading)
            .field("items", &state.items.len())
            .field("active_index", &state.active_index)
            .field("autoplay", &autoplay)
            .field("subscribed", &self.subscription.lock().is_some())
            .field("torn_down", &self.torn_down.load(Ordering::SeqCst))
            .finish()
    }
}

impl CarouselEngine {
    pub fn new(
        listing: Arc<dyn ListingSource>,
        detail: Arc<dyn DetailSource>,
        position: Arc<dyn PositionController>,
        config: EngineConfig,
    ) -> Self {
        let autoplay = AutoplayScheduler::new(config.autoplay_interval);
        Self {
            listing,
            detail,
            position,
            config,
            state: Arc::new(RwLock::new(CarouselState::default())),
            generation: AtomicU64::new(0),
            specs: Mutex::new(Vec::new()),
            autoplay: Mutex::new(autoplay),
            subscription: Mutex::new(None),
            torn_down: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    pub fn autoplay_phase(&self) -> AutoplayPhase {
        self.autoplay.lock().phase()
    }

    /// Specs used by the last [`reconfigure`](Self::reconfigure).
    pub fn specs(&self) -> Vec<CategorySpec> {
        self.specs.lock().clone()
    }

    /// Subscribe to the position controller's index changes. Subsequent
    /// calls (and calls after teardown) are no-ops.
    pub fn mount(&self) {
        if self.is_torn_down() {
            return;
        }
        let mut subscription = self.subscription.lock();
        if subscription.is_some() {
            return;
        }

        let state = Arc::downgrade(&self.state);
        let handler: IndexHandler = Arc::new(move |index| {
            let Some(state) = state.upgrade() else {
                return;
            };
            let mut state = state.write();
            if index < state.items.len() {
                state.active_index = Some(index);
            }
        });

        let id = self.position.subscribe(handler);
        debug!(target: "carousel::cycle", %id, "subscribed to index changes");
        *subscription = Some(id);
    }

    /// Replace the configured specs and run a cycle with them.
    pub async fn reconfigure(&self, specs: Vec<CategorySpec>) -> CycleOutcome {
        *self.specs.lock() = specs.clone();
        self.run_cycle(&specs).await
    }

    /// Re-run a cycle with the last configured specs.
    pub async fn retry(&self) -> CycleOutcome {
        let specs = self.specs();
        self.run_cycle(&specs).await
    }

    /// One fetch-aggregate-enrich pass.
    ///
    /// Loading is raised (and autoplay paused) before any request goes out.
    /// Enrichment starts only after every listing has arrived.
    pub async fn run_cycle(&self, specs: &[CategorySpec]) -> CycleOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if self.is_torn_down() {
            return CycleOutcome::Stale { generation };
        }

        info!(
            target: "carousel::cycle",
            generation,
            categories = specs.len(),
            "aggregation cycle started"
        );
        {
            let mut autoplay = self.autoplay.lock();
            self.state.write().loading = true;
            self.sync_autoplay(&mut autoplay);
        }

        let timeout = self.config.request_timeout;
        let result =
            match aggregate(self.listing.as_ref(), specs, timeout).await {
                Ok(items) => {
                    Ok(enrich(self.detail.as_ref(), items, timeout).await)
                }
                Err(failure) => Err(failure),
            };

        self.commit(generation, result)
    }

    fn commit(
        &self,
        generation: u64,
        result: Result<Vec<PresentationItem>, AggregationFailure>,
    ) -> CycleOutcome {
        // Held until the controller is reset so concurrent commits cannot
        // interleave their slide counts or autoplay decisions.
        let mut autoplay = self.autoplay.lock();
        let mut state = self.state.write();
        // Generation is compared with both locks held.
        if self.generation.load(Ordering::SeqCst) != generation
            || self.is_torn_down()
        {
            debug!(
                target: "carousel::cycle",
                generation,
                "discarding result of superseded cycle"
            );
            return CycleOutcome::Stale { generation };
        }

        let outcome = match result {
            Ok(items) => {
                let count = items.len();
                state.items = Arc::from(items);
                state.active_index = (count > 0).then_some(0);
                state.loading = false;
                state.last_failure = None;
                info!(
                    target: "carousel::cycle",
                    generation,
                    items = count,
                    "presentation sequence committed"
                );
                CycleOutcome::Committed {
                    generation,
                    items: count,
                }
            }
            Err(failure) => {
                error!(
                    target: "carousel::cycle",
                    generation,
                    error = %failure,
                    "failed to fetch carousel data"
                );
                if self.config.failure_policy == FailurePolicy::Clear {
                    state.items = Arc::from(Vec::new());
                    state.active_index = None;
                }
                state.loading = false;
                state.last_failure = Some(failure.clone());
                CycleOutcome::Failed {
                    generation,
                    failure,
                }
            }
        };

        let len = state.items.len();
        let reset = matches!(outcome, CycleOutcome::Committed { .. })
            || len == 0;
        drop(state);

        // The controller notifies subscribers synchronously, and the
        // subscriber takes the state lock, so this runs after the release.
        if reset {
            self.position.set_slide_count(len);
            self.position.jump_to(0);
        }
        self.sync_autoplay(&mut autoplay);
        outcome
    }

    /// User-driven jump; the index change flows back through the
    /// subscription.
    pub fn jump_to(&self, index: usize) {
        if !self.is_torn_down() {
            self.position.jump_to(index);
        }
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        let state = self.state.read();
        CarouselSnapshot {
            loading: state.loading,
            items: Arc::clone(&state.items),
            active_index: state.active_index,
            active_category: derive_active_category(
                &state.items,
                state.active_index,
            ),
            last_failure: state.last_failure.clone(),
        }
    }

    /// Start autoplay when there is something to show and nothing is
    /// loading, stop it otherwise. Callers hold the autoplay lock, which is
    /// always taken before the state lock.
    fn sync_autoplay(&self, autoplay: &mut AutoplayScheduler) {
        let (loading, len) = {
            let state = self.state.read();
            (state.loading, state.items.len())
        };

        if self.is_torn_down() || loading || len == 0 {
            autoplay.stop();
        } else {
            autoplay.start(Arc::clone(&self.position));
        }
    }

    /// Single exit path: supersede in-flight cycles, cancel the autoplay
    /// timer, and unsubscribe from the controller. Idempotent.
    pub fn teardown(&self) {
        if self.torn_down.swap(true, Ordering::SeqCst) {
            return;
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.autoplay.lock().stop();

        if let Some(id) = self.subscription.lock().take() {
            self.position.unsubscribe(id);
        }
        debug!(target: "carousel::cycle", "engine torn down");
    }
}

impl Drop for CarouselEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}
