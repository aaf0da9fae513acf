use std::fmt;
use std::sync::Arc;

/// Callback invoked with the new index whenever the controller moves.
pub type IndexHandler = Arc<dyn Fn(usize) + Send + Sync>;

/// Opaque handle returned by [`PositionController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// Cyclic scroll position over the presentation sequence.
///
/// The controller owns its scroll state; the engine only observes it via a
/// subscription and commands it via [`advance`](Self::advance) and
/// [`jump_to`](Self::jump_to).
pub trait PositionController: Send + Sync {
    fn current_index(&self) -> usize;

    fn subscribe(&self, handler: IndexHandler) -> SubscriptionId;

    /// Returns `false` when the id was not (or no longer) subscribed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    /// Move one step forward, wrapping past the last slide.
    fn advance(&self);

    fn jump_to(&self, index: usize);

    /// Re-initialise after the slide set changed.
    fn set_slide_count(&self, len: usize);
}
