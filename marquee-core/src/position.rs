//! In-process cyclic position controller.
//!
//! Stands in for the carousel widget's scroll controller wherever no real
//! widget is attached (preview binary, tests). Loop semantics: advancing
//! past the last slide returns to the first.

use std::fmt;

use marquee_contracts::{IndexHandler, PositionController, SubscriptionId};
use parking_lot::Mutex;

#[derive(Default)]
struct Inner {
    index: usize,
    len: usize,
    next_id: u64,
    handlers: Vec<(SubscriptionId, IndexHandler)>,
}

#[derive(Default)]
pub struct CyclicPosition {
    inner: Mutex<Inner>,
}

impl fmt::Debug for CyclicPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("CyclicPosition")
            .field("index", &inner.index)
            .field("len", &inner.len)
            .field("subscribers", &inner.handlers.len())
            .finish()
    }
}

impl CyclicPosition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slide_count(len: usize) -> Self {
        let position = Self::new();
        position.inner.lock().len = len;
        position
    }

    pub fn slide_count(&self) -> usize {
        self.inner.lock().len
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().handlers.len()
    }

    /// Move to `target` and notify subscribers if the index changed.
    ///
    /// Handlers run after the lock is released so they may call back into
    /// the controller.
    fn move_to(&self, target: impl FnOnce(&Inner) -> usize) {
        let (index, handlers) = {
            let mut inner = self.inner.lock();
            let next = target(&inner);
            if next == inner.index {
                return;
            }
            inner.index = next;
            let handlers: Vec<IndexHandler> =
                inner.handlers.iter().map(|(_, h)| h.clone()).collect();
            (next, handlers)
        };

        for handler in handlers {
            handler(index);
        }
    }
}

impl PositionController for CyclicPosition {
    fn current_index(&self) -> usize {
        self.inner.lock().index
    }

    fn subscribe(&self, handler: IndexHandler) -> SubscriptionId {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = SubscriptionId(inner.next_id);
        inner.handlers.push((id, handler));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.handlers.len();
        inner.handlers.retain(|(sub, _)| *sub != id);
        inner.handlers.len() != before
    }

    fn advance(&self) {
        self.move_to(|inner| match inner.len {
            0 => 0,
            len => (inner.index + 1) % len,
        });
    }

    fn jump_to(&self, index: usize) {
        self.move_to(|inner| match inner.len {
            0 => 0,
            len => index % len,
        });
    }

    fn set_slide_count(&self, len: usize) {
        self.inner.lock().len = len;
        self.move_to(|inner| {
            if inner.index < len { inner.index } else { 0 }
        });
    }
}
