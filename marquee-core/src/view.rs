//! Render-facing projections of a [`CarouselSnapshot`].
//!
//! Image references are normalised here, at render time, and never written
//! back into engine state.

use marquee_contracts::ImageNormalizer;
use marquee_model::{Category, PresentationItem};

use crate::engine::CarouselSnapshot;

/// One slide of the hero carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideView {
    pub key: String,
    pub title: String,
    /// `"{year} - {category label}"`
    pub caption: String,
    pub image_url: String,
    pub overview: Option<String>,
    pub play_href: String,
}

/// One entry of the category navigation strip below the slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntry {
    pub category: Category,
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselView {
    /// Loading placeholder. Also shown when a cycle produced nothing;
    /// `retryable` is set when that was caused by a failed aggregation.
    Placeholder { retryable: bool },
    Ready {
        slides: Vec<SlideView>,
        navigation: Vec<NavigationEntry>,
        active_index: usize,
    },
}

impl CarouselView {
    /// Number of slides on screen; zero for the placeholder.
    pub fn slide_count(&self) -> usize {
        match self {
            CarouselView::Placeholder { .. } => 0,
            CarouselView::Ready { slides, .. } => slides.len(),
        }
    }
}

pub fn render(
    snapshot: &CarouselSnapshot,
    images: &dyn ImageNormalizer,
) -> CarouselView {
    let active_index = match snapshot.active_index {
        Some(index) if !snapshot.loading && !snapshot.items.is_empty() => {
            index
        }
        _ => {
            return CarouselView::Placeholder {
                retryable: !snapshot.loading
                    && snapshot.last_failure.is_some(),
            };
        }
    };

    let slides = snapshot
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| slide(index, item, images))
        .collect();

    CarouselView::Ready {
        slides,
        navigation: navigation(snapshot.active_category),
        active_index,
    }
}

pub fn slide(
    index: usize,
    item: &PresentationItem,
    images: &dyn ImageNormalizer,
) -> SlideView {
    SlideView {
        key: item.key(index),
        title: item.item.title.clone(),
        caption: format!("{} - {}", item.item.year, item.category.meta().label),
        image_url: images.normalize(&item.backdrop),
        overview: item.overview.clone(),
        play_href: play_href(item),
    }
}

/// Navigation strip in fixed category order, highlighting `active`.
pub fn navigation(active: Option<Category>) -> Vec<NavigationEntry> {
    Category::ALL
        .iter()
        .map(|&category| {
            let meta = category.meta();
            NavigationEntry {
                category,
                label: meta.label,
                href: meta.href,
                active: active == Some(category),
            }
        })
        .collect()
}

/// Route opened when a slide is selected.
pub fn play_href(item: &PresentationItem) -> String {
    format!(
        "/play?title={}&douban_id={}",
        urlencoding::encode(&item.item.title),
        urlencoding::encode(&item.item.id)
    )
}
