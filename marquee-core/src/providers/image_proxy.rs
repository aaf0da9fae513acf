//! Image-reference normalisers.
//!
//! Upstream posters are served from hosts that refuse hot-linking, so
//! deployments usually route them through a proxy.

use marquee_contracts::ImageNormalizer;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum ImageProxy {
    /// Use references as-is.
    #[default]
    Direct,
    /// Prepend a proxy endpoint to the percent-encoded reference, e.g.
    /// `https://proxy.example/?url=`.
    Prefix(String),
    /// Swap the host of the reference for a mirror host.
    Host(String),
}

impl ImageNormalizer for ImageProxy {
    fn normalize(&self, raw: &str) -> String {
        let raw = raw.trim();
        if !(raw.starts_with("http://") || raw.starts_with("https://")) {
            return raw.to_owned();
        }

        match self {
            ImageProxy::Direct => raw.to_owned(),
            ImageProxy::Prefix(prefix) => {
                format!("{prefix}{}", urlencoding::encode(raw))
            }
            ImageProxy::Host(host) => match Url::parse(raw) {
                Ok(mut url) => match url.set_host(Some(host)) {
                    Ok(()) => url.to_string(),
                    Err(_) => raw.to_owned(),
                },
                Err(_) => raw.to_owned(),
            },
        }
    }
}
