//! HTTP listing and detail sources backed by the Douban proxy API.
//!
//! Both endpoints answer with an envelope carrying an application-level
//! `code`; anything other than 200 is treated as a rejection.

use async_trait::async_trait;
use marquee_contracts::{DetailSource, ListingSource, SourceError};
use marquee_model::{CategorySpec, DetailResult, ListingItem};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

const CATEGORIES_PATH: &str = "api/douban/categories";
const DETAILS_PATH: &str = "api/douban/details";

#[derive(Debug, Clone)]
pub struct DoubanClient {
    http: Client,
    base: Url,
}

impl DoubanClient {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::with_client(Client::new(), Url::parse(base_url)?))
    }

    pub fn with_client(http: Client, mut base: Url) -> Self {
        // `Url::join` drops the last path segment unless it ends in '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { http, base }
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn categories_url(&self, spec: &CategorySpec) -> Url {
        let mut url = self.endpoint(CATEGORIES_PATH);
        url.query_pairs_mut()
            .append_pair("kind", spec.kind.as_str())
            .append_pair("category", &spec.primary_filter)
            .append_pair("type", &spec.secondary_filter)
            .append_pair("limit", &spec.page_limit.to_string())
            .append_pair("start", "0");
        url
    }

    pub fn details_url(&self, id: &str) -> Url {
        let mut url = self.endpoint(DETAILS_PATH);
        url.query_pairs_mut().append_pair("id", id);
        url
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        let joined = format!("{}{}", self.base.path(), path);
        url.set_path(&joined);
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<T, SourceError> {
        debug!(target: "carousel::http", %url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(SourceError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        response.json::<T>().await.map_err(|err| {
            if err.is_decode() {
                SourceError::Decode(err.to_string())
            } else {
                SourceError::transport(err)
            }
        })
    }
}

#[async_trait]
impl ListingSource for DoubanClient {
    async fn fetch_listing(
        &self,
        spec: &CategorySpec,
    ) -> Result<Vec<ListingItem>, SourceError> {
        let envelope: CategoriesEnvelope =
            self.get_json(self.categories_url(spec)).await?;
        envelope.into_items()
    }
}

#[async_trait]
impl DetailSource for DoubanClient {
    async fn fetch_detail(&self, id: &str) -> Result<DetailResult, SourceError> {
        let envelope: DetailsEnvelope =
            self.get_json(self.details_url(id)).await?;
        envelope.into_detail()
    }
}

#[derive(Debug, Deserialize)]
struct CategoriesEnvelope {
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    list: Vec<ListEntry>,
}

#[derive(Debug, Deserialize)]
struct ListEntry {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    title: String,
    #[serde(default)]
    poster: String,
    #[serde(default)]
    year: String,
}

impl CategoriesEnvelope {
    fn into_items(self) -> Result<Vec<ListingItem>, SourceError> {
        if self.code != 200 {
            return Err(SourceError::Rejected {
                code: self.code,
                message: self.message,
            });
        }
        Ok(self
            .list
            .into_iter()
            .map(|e| ListingItem::new(e.id, e.title, e.year, e.poster))
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct DetailsEnvelope {
    code: i64,
    #[serde(default)]
    message: String,
    data: Option<DetailEntry>,
}

#[derive(Debug, Deserialize)]
struct DetailEntry {
    #[serde(default)]
    backdrop: Option<String>,
    #[serde(default, alias = "plot_summary")]
    overview: Option<String>,
}

impl DetailsEnvelope {
    fn into_detail(self) -> Result<DetailResult, SourceError> {
        if self.code != 200 {
            return Err(SourceError::Rejected {
                code: self.code,
                message: self.message,
            });
        }
        Ok(self
            .data
            .map(|d| DetailResult::new(d.backdrop, d.overview))
            .unwrap_or_default())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}
