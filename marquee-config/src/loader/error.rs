use std::io;
use std::path::PathBuf;

use marquee_model::Category;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read carousel config from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid carousel config {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("carousel config must list at least one category")]
    NoCategories,

    #[error("category {category} has a page limit of 0")]
    ZeroPageLimit { category: Category },

    #[error("autoplay interval must be greater than zero")]
    ZeroAutoplayInterval,

    #[error("request timeout must be greater than zero when set")]
    ZeroRequestTimeout,

    #[error("invalid api base url {url:?}: {source}")]
    InvalidApiBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ConfigLoadError {
    pub(crate) fn parse(origin: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            origin: origin.into(),
            message: message.to_string(),
        }
    }
}
