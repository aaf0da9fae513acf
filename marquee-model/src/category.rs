use std::fmt::{self, Display, Formatter};

/// Fixed set of categories the hero carousel can present.
///
/// Ordering of [`Category::ALL`] is the order the navigation strip renders
/// its entries in; it is independent of the order specs are fetched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    /// Trending movies
    Movie,
    /// Trending series
    Tv,
    /// Newly airing animation
    Anime,
    /// Variety shows
    Show,
}

impl Category {
    pub const ALL: [Category; 4] =
        [Category::Movie, Category::Tv, Category::Anime, Category::Show];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movie => "movie",
            Category::Tv => "tv",
            Category::Anime => "anime",
            Category::Show => "show",
        }
    }

    /// Display metadata used by the navigation strip.
    pub fn meta(&self) -> CategoryMeta {
        let label = match self {
            Category::Movie => "热门电影",
            Category::Tv => "热门剧集",
            Category::Anime => "新番放送",
            Category::Show => "热门综艺",
        };
        CategoryMeta {
            label,
            href: format!("/douban?type={}", self.as_str()),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label and link target for one navigation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMeta {
    pub label: &'static str,
    pub href: String,
}

/// Listing-source kind. The remote source only distinguishes movies from
/// everything broadcast as a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ListingKind {
    Movie,
    Tv,
}

impl ListingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Movie => "movie",
            ListingKind::Tv => "tv",
        }
    }
}

impl Display for ListingKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration describing one content category to aggregate.
///
/// Specs are immutable once configured. Their order within a configuration
/// decides the block order of the presentation sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategorySpec {
    pub category: Category,
    pub kind: ListingKind,
    pub primary_filter: String,
    pub secondary_filter: String,
    pub page_limit: u32,
}

impl CategorySpec {
    pub fn new(
        category: Category,
        kind: ListingKind,
        primary_filter: impl Into<String>,
        secondary_filter: impl Into<String>,
        page_limit: u32,
    ) -> Self {
        Self {
            category,
            kind,
            primary_filter: primary_filter.into(),
            secondary_filter: secondary_filter.into(),
            page_limit,
        }
    }

    /// The four categories the home page shows out of the box, three items
    /// each.
    pub fn defaults() -> Vec<CategorySpec> {
        const PAGE_LIMIT: u32 = 3;
        vec![
            CategorySpec::new(
                Category::Movie,
                ListingKind::Movie,
                "热门",
                "全部",
                PAGE_LIMIT,
            ),
            CategorySpec::new(
                Category::Tv,
                ListingKind::Tv,
                "热门",
                "热门",
                PAGE_LIMIT,
            ),
            CategorySpec::new(
                Category::Anime,
                ListingKind::Tv,
                "日本",
                "动画",
                PAGE_LIMIT,
            ),
            CategorySpec::new(
                Category::Show,
                ListingKind::Tv,
                "热门",
                "综艺",
                PAGE_LIMIT,
            ),
        ]
    }
}
