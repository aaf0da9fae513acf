#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use marquee_contracts::{DetailSource, ListingSource, SourceError};
use marquee_core::engine::{CarouselEngine, EngineConfig};
use marquee_core::position::CyclicPosition;
use marquee_model::{
    Category, CategorySpec, DetailResult, ListingItem, ListingKind,
};
use parking_lot::Mutex;
use tokio::sync::Notify;

pub fn spec(category: Category, page_limit: u32) -> CategorySpec {
    let kind = match category {
        Category::Movie => ListingKind::Movie,
        _ => ListingKind::Tv,
    };
    CategorySpec::new(category, kind, "热门", "全部", page_limit)
}

/// Listing items `"{category}-{n}"` with poster `"{id}.jpg"`.
pub fn listing(category: Category, count: usize) -> Vec<ListingItem> {
    (0..count)
        .map(|n| {
            let id = format!("{category}-{n}");
            let poster = format!("{id}.jpg");
            ListingItem::new(id.clone(), id.to_uppercase(), "2024", poster)
        })
        .collect()
}

enum Scripted {
    Items(Vec<ListingItem>),
    Fail(u16),
}

/// Listing source answering from a per-category script. A gated category
/// blocks until its gate is opened.
#[derive(Default)]
pub struct StubListing {
    script: Mutex<HashMap<Category, Scripted>>,
    gates: Mutex<HashMap<Category, Arc<Notify>>>,
    delays: Mutex<HashMap<Category, Duration>>,
    calls: Mutex<Vec<Category>>,
}

impl StubListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(self, category: Category, count: usize) -> Self {
        self.set_items(category, count);
        self
    }

    pub fn set_items(&self, category: Category, count: usize) {
        self.script
            .lock()
            .insert(category, Scripted::Items(listing(category, count)));
    }

    pub fn set_failure(&self, category: Category, status: u16) {
        self.script.lock().insert(category, Scripted::Fail(status));
    }

    /// Gate `category`; the returned handle releases one pending fetch per
    /// `notify_one`.
    pub fn gate(&self, category: Category) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().insert(category, Arc::clone(&gate));
        gate
    }

    /// Answer `category` only after `delay` has elapsed.
    pub fn with_delay(self, category: Category, delay: Duration) -> Self {
        self.delays.lock().insert(category, delay);
        self
    }

    pub fn calls(&self) -> Vec<Category> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ListingSource for StubListing {
    async fn fetch_listing(
        &self,
        spec: &CategorySpec,
    ) -> Result<Vec<ListingItem>, SourceError> {
        self.calls.lock().push(spec.category);
        let gate = self.gates.lock().get(&spec.category).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let delay = self.delays.lock().get(&spec.category).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.script.lock().get(&spec.category) {
            Some(Scripted::Items(items)) => Ok(items.clone()),
            Some(Scripted::Fail(status)) => Err(SourceError::Status(*status)),
            None => Err(SourceError::Unavailable(format!(
                "no listing scripted for {}",
                spec.category
            ))),
        }
    }
}

/// Detail source returning `"{id}-backdrop.jpg"` except for ids marked as
/// failing or backdrop-less. When gated, every call waits for
/// `notify_waiters` on the gate.
#[derive(Default)]
pub struct StubDetail {
    gate: Mutex<Option<Arc<Notify>>>,
    failing: Mutex<Vec<String>>,
    without_backdrop: Mutex<Vec<String>>,
    calls: Mutex<Vec<String>>,
}

impl StubDetail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(self, id: &str) -> Self {
        self.failing.lock().push(id.to_owned());
        self
    }

    pub fn without_backdrop(self, id: &str) -> Self {
        self.without_backdrop.lock().push(id.to_owned());
        self
    }

    pub fn gate(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl DetailSource for StubDetail {
    async fn fetch_detail(&self, id: &str) -> Result<DetailResult, SourceError> {
        self.calls.lock().push(id.to_owned());
        let gate = self.gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.failing.lock().iter().any(|f| f == id) {
            return Err(SourceError::Status(404));
        }
        if self.without_backdrop.lock().iter().any(|f| f == id) {
            return Ok(DetailResult::new(None, Some(format!("{id} plot"))));
        }
        Ok(DetailResult::new(
            Some(format!("{id}-backdrop.jpg")),
            Some(format!("{id} plot")),
        ))
    }
}

pub struct Harness {
    pub listing: Arc<StubListing>,
    pub detail: Arc<StubDetail>,
    pub position: Arc<CyclicPosition>,
    pub engine: CarouselEngine,
}

impl Harness {
    pub fn new(listing: StubListing, detail: StubDetail) -> Self {
        Self::with_config(listing, detail, EngineConfig::default())
    }

    pub fn with_config(
        listing: StubListing,
        detail: StubDetail,
        config: EngineConfig,
    ) -> Self {
        let listing = Arc::new(listing);
        let detail = Arc::new(detail);
        let position = Arc::new(CyclicPosition::new());
        let engine = CarouselEngine::new(
            listing.clone(),
            detail.clone(),
            position.clone(),
            config,
        );
        engine.mount();
        Self {
            listing,
            detail,
            position,
            engine,
        }
    }
}
