use marquee_model::{Category, PresentationItem};

/// Category of the item under `active_index`, if that index is valid.
///
/// Pure; callers recompute it whenever the items or the index change.
pub fn derive_active_category(
    items: &[PresentationItem],
    active_index: Option<usize>,
) -> Option<Category> {
    active_index
        .and_then(|index| items.get(index))
        .map(|item| item.category)
}
