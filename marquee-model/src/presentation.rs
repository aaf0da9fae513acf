use crate::category::Category;
use crate::detail::DetailResult;
use crate::listing::{CategorizedItem, ListingItem};

/// Terminal, immutable entity rendered by the carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresentationItem {
    pub item: ListingItem,
    pub category: Category,
    /// Wide image reference. Equals the poster when no backdrop is known.
    pub backdrop: String,
    pub overview: Option<String>,
}

impl PresentationItem {
    /// Merge a categorized item with its (optional) enrichment result.
    ///
    /// A missing detail or a detail without a backdrop degrades to the
    /// listing poster.
    pub fn merge(source: CategorizedItem, detail: Option<DetailResult>) -> Self {
        let (backdrop, overview) = match detail {
            Some(detail) => (
                detail.backdrop().map(str::to_owned),
                detail.overview().map(str::to_owned),
            ),
            None => (None, None),
        };
        let backdrop = backdrop.unwrap_or_else(|| source.item.poster.clone());

        Self {
            item: source.item,
            category: source.category,
            backdrop,
            overview,
        }
    }

    pub fn id(&self) -> &str {
        &self.item.id
    }

    pub fn title(&self) -> &str {
        &self.item.title
    }

    /// Whether the item carries any renderable image reference.
    pub fn has_image(&self) -> bool {
        !self.backdrop.trim().is_empty()
    }

    /// Stable slide key. Ids can repeat across categories, so the position
    /// is part of the key.
    pub fn key(&self, index: usize) -> String {
        format!("{}-{}", self.item.id, index)
    }
}
