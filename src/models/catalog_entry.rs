//! Book metadata returned by the external catalog lookup

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Candidate book found in a remote catalog.
///
/// Not persisted; fields the remote catalog did not provide stay unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatalogEntry {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub publication_date: Option<String>,
    pub category: Option<String>,
    pub thumbnail_url: Option<String>,
}
