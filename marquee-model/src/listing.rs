use crate::category::Category;

/// Minimal content record returned by the listing source.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListingItem {
    pub id: String,
    pub title: String,
    /// Release year as reported upstream; may be empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub year: String,
    /// Raw (un-normalised) poster reference.
    #[cfg_attr(feature = "serde", serde(default))]
    pub poster: String,
}

impl ListingItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        year: impl Into<String>,
        poster: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: year.into(),
            poster: poster.into(),
        }
    }

    /// Tag this item with the category whose listing produced it.
    pub fn categorize(self, category: Category) -> CategorizedItem {
        CategorizedItem {
            item: self,
            category,
        }
    }
}

/// A listing item tagged with its originating category. The tag is fixed at
/// aggregation time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategorizedItem {
    pub item: ListingItem,
    pub category: Category,
}

impl CategorizedItem {
    pub fn id(&self) -> &str {
        &self.item.id
    }
}
