use std::time::Duration;

use marquee_core::autoplay::DEFAULT_AUTOPLAY_INTERVAL;
use marquee_core::engine::{EngineConfig, FailurePolicy};
use marquee_core::providers::ImageProxy;
use marquee_model::CategorySpec;
use serde::{Deserialize, Serialize};

use crate::loader::error::ConfigLoadError;
use crate::util::{duration, optional_duration};

fn default_categories() -> Vec<CategorySpec> {
    CategorySpec::defaults()
}

fn default_autoplay_interval() -> Duration {
    DEFAULT_AUTOPLAY_INTERVAL
}

fn default_api_base_url() -> String {
    "http://localhost:3000/".to_string()
}

/// Top-level carousel settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Categories to aggregate, in presentation order. Every entry must be
    /// fetchable: one failed listing fails the whole cycle.
    #[serde(default = "default_categories")]
    pub categories: Vec<CategorySpec>,
    /// Time between automatic advances, e.g. `"5s"`.
    #[serde(with = "duration", default = "default_autoplay_interval")]
    pub autoplay_interval: Duration,
    /// Upper bound for each listing/detail request. Unset waits forever.
    #[serde(
        with = "optional_duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_timeout: Option<Duration>,
    /// `clear` empties the carousel when aggregation fails;
    /// `retain_previous` keeps the last good sequence on screen.
    pub failure_policy: FailurePolicy,
    /// Base URL of the listing/detail API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// How poster and backdrop references are rewritten for display.
    pub image_proxy: ImageProxy,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            autoplay_interval: default_autoplay_interval(),
            request_timeout: None,
            failure_policy: FailurePolicy::default(),
            api_base_url: default_api_base_url(),
            image_proxy: ImageProxy::default(),
        }
    }
}

impl CarouselConfig {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            autoplay_interval: self.autoplay_interval,
            request_timeout: self.request_timeout,
            failure_policy: self.failure_policy,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.categories.is_empty() {
            return Err(ConfigLoadError::NoCategories);
        }
        if let Some(spec) =
            self.categories.iter().find(|spec| spec.page_limit == 0)
        {
            return Err(ConfigLoadError::ZeroPageLimit {
                category: spec.category,
            });
        }
        if self.autoplay_interval.is_zero() {
            return Err(ConfigLoadError::ZeroAutoplayInterval);
        }
        if self.request_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigLoadError::ZeroRequestTimeout);
        }
        url::Url::parse(&self.api_base_url).map_err(|source| {
            ConfigLoadError::InvalidApiBaseUrl {
                url: self.api_base_url.clone(),
                source,
            }
        })?;
        Ok(())
    }
}
