//! External catalog lookup (Google Books volumes API)

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::catalog_entry::CatalogEntry,
};

/// Free-text search against a remote book catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn search(&self, query: &str) -> AppResult<Vec<CatalogEntry>>;
}

#[derive(Clone)]
pub struct GoogleBooksClient {
    http: reqwest::Client,
    config: CatalogConfig,
}

impl GoogleBooksClient {
    pub fn new(config: CatalogConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl CatalogLookup for GoogleBooksClient {
    async fn search(&self, query: &str) -> AppResult<Vec<CatalogEntry>> {
        let url = format!("{}/volumes", self.config.base_url.trim_end_matches('/'));

        let mut params: Vec<(&str, String)> = vec![("q", query.to_string())];
        if let Some(max) = self.config.max_results {
            params.push(("maxResults", max.to_string()));
        }
        if let Some(ref key) = self.config.api_key {
            params.push(("key", key.clone()));
        }

        tracing::debug!("Catalog search: {}", query);

        let response = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Catalog request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Catalog search for {:?} returned HTTP {}", query, status);
            return Err(AppError::Upstream(format!("Catalog returned HTTP {}", status)));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Invalid catalog response: {}", e)))?;

        let entries = parse_volumes(&body);
        tracing::info!("Catalog search for {:?} returned {} entries", query, entries.len());
        Ok(entries)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    volume_info: VolumeInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    industry_identifiers: Option<Vec<IndustryIdentifier>>,
    published_date: Option<String>,
    categories: Option<Vec<String>>,
    image_links: Option<ImageLinks>,
}

#[derive(Deserialize)]
struct IndustryIdentifier {
    identifier: Option<String>,
}

#[derive(Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

/// Convert a volumes response into catalog entries.
///
/// Items that do not decode are skipped; a missing `items` array means no results.
pub fn parse_volumes(body: &serde_json::Value) -> Vec<CatalogEntry> {
    let Some(items) = body.get("items").and_then(|items| items.as_array()) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match Volume::deserialize(item) {
            Ok(volume) => Some(volume.volume_info.into()),
            Err(e) => {
                tracing::debug!("Skipping malformed catalog item: {}", e);
                None
            }
        })
        .collect()
}

impl From<VolumeInfo> for CatalogEntry {
    fn from(info: VolumeInfo) -> Self {
        Self {
            title: info.title,
            author: info.authors.and_then(|a| a.into_iter().next()),
            isbn: info
                .industry_identifiers
                .and_then(|ids| ids.into_iter().next())
                .and_then(|id| id.identifier),
            publication_date: info.published_date,
            category: info.categories.and_then(|c| c.into_iter().next()),
            thumbnail_url: info.image_links.and_then(|links| links.thumbnail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_volume() {
        let body = json!({
            "items": [{
                "volumeInfo": {
                    "title": "Clean Code",
                    "authors": ["Robert C. Martin", "Someone Else"],
                    "industryIdentifiers": [
                        {"type": "ISBN_13", "identifier": "9780132350884"},
                        {"type": "ISBN_10", "identifier": "0132350882"}
                    ],
                    "publishedDate": "2008-08-01",
                    "categories": ["Computers", "Programming"],
                    "imageLinks": {"thumbnail": "http://books.example/clean.jpg"}
                }
            }]
        });

        let entries = parse_volumes(&body);
        assert_eq!(
            entries,
            vec![CatalogEntry {
                title: Some("Clean Code".into()),
                author: Some("Robert C. Martin".into()),
                isbn: Some("9780132350884".into()),
                publication_date: Some("2008-08-01".into()),
                category: Some("Computers".into()),
                thumbnail_url: Some("http://books.example/clean.jpg".into()),
            }]
        );
    }

    #[test]
    fn test_parse_missing_fields_stay_unset() {
        let body = json!({
            "items": [{
                "volumeInfo": {
                    "title": "Untitled Draft",
                    "authors": [],
                    "industryIdentifiers": []
                }
            }]
        });

        let entries = parse_volumes(&body);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title.as_deref(), Some("Untitled Draft"));
        assert_eq!(entries[0].author, None);
        assert_eq!(entries[0].isbn, None);
        assert_eq!(entries[0].category, None);
        assert_eq!(entries[0].publication_date, None);
    }

    #[test]
    fn test_parse_skips_malformed_items() {
        let body = json!({
            "items": [
                {"id": "no-volume-info"},
                {"volumeInfo": "not an object"},
                {"volumeInfo": {"title": "Dune", "categories": ["Fiction"]}}
            ]
        });

        let entries = parse_volumes(&body);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title.as_deref(), Some("Dune"));
        assert_eq!(entries[0].category.as_deref(), Some("Fiction"));
    }

    #[test]
    fn test_parse_without_items() {
        assert!(parse_volumes(&json!({"kind": "books#volumes", "totalItems": 0})).is_empty());
    }
}
