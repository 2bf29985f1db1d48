use async_trait::async_trait;
use reqwest::{Client, Method};
use tap::Tap;

use crate::{
    model,
    network::http::{self, request},
    range::{format_date, DateRange},
};

pub const BASE_URL: &str = "https://api.nasa.gov/planetary/apod";

pub const DEMO_KEY: &str = "DEMO_KEY";

mod sealed {
    use chrono::NaiveDate;
    use either::Either;
    use serde::Deserialize;

    use crate::model;

    #[derive(Debug, Deserialize)]
    pub struct Item {
        pub date: NaiveDate,
        #[serde(default)]
        pub title: String,
        #[serde(default)]
        pub explanation: String,
        #[serde(default)]
        pub media_type: model::MediaType,
        pub url: Option<String>,
        pub hdurl: Option<String>,
        pub thumbnail_url: Option<String>,
        pub copyright: Option<String>,
    }

    /// The endpoint answers a range query with an array, a single day with an object.
    #[derive(Debug, Deserialize)]
    pub struct Response(#[serde(with = "either::serde_untagged")] pub Either<Item, Vec<Item>>);

    fn non_blank(x: Option<String>) -> Option<String> {
        x.map(|x| x.trim().to_owned()).filter(|x| !x.is_empty())
    }

    impl From<Item> for model::GalleryItem {
        fn from(x: Item) -> Self {
            Self {
                date: x.date,
                title: x.title,
                explanation: x.explanation,
                media_type: x.media_type,
                url: x.url.unwrap_or_default(),
                hdurl: non_blank(x.hdurl),
                thumbnail_url: non_blank(x.thumbnail_url),
                copyright: non_blank(x.copyright),
            }
        }
    }
}

/// Decodes a response body in API order.
pub fn decode(body: &str) -> crate::Result<Vec<model::GalleryItem>> {
    let sealed::Response(resp) = serde_json::from_str(body)?;

    let items = resp
        .either(|x| vec![x], |xs| xs)
        .into_iter()
        .map(model::GalleryItem::from)
        .collect();

    Ok(items)
}

/// Decodes a response body with the latest date first.
pub fn decode_newest_first(body: &str) -> crate::Result<Vec<model::GalleryItem>> {
    Ok(decode(body)?.tap_mut(|xs| xs.reverse()))
}

#[async_trait]
pub trait ApodSource: Send + Sync {
    /// Items in `range`, newest first.
    async fn fetch(&self, range: DateRange) -> crate::Result<Vec<model::GalleryItem>>;
}

#[derive(Debug, Clone)]
pub struct ApodClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ApodClient {
    pub fn new(api_key: impl Into<String>) -> crate::Result<Self> {
        Self::with_base_url(api_key, BASE_URL)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> crate::Result<Self> {
        Ok(Self::with_client(http::client()?, api_key, base_url))
    }

    pub fn with_client(
        client: Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn uses_demo_key(&self) -> bool {
        self.api_key == DEMO_KEY
    }
}

#[async_trait]
impl ApodSource for ApodClient {
    async fn fetch(&self, range: DateRange) -> crate::Result<Vec<model::GalleryItem>> {
        let start = format_date(range.start());
        let end = format_date(range.end());
        let query = [
            ("api_key", self.api_key.as_str()),
            ("start_date", start.as_str()),
            ("end_date", end.as_str()),
        ];

        tracing::debug!("GET {}", http::redacted(&self.base_url, &query, &["api_key"]));

        let resp = request(&self.client, Method::GET, &self.base_url, &query).await?;
        let body = resp.text().await?;

        let items = decode_newest_first(&body)?;

        tracing::debug!("items = {}", items.len());

        Ok(items)
    }
}
