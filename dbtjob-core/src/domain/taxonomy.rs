//! Taxonomy domain types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Category of taxonomy tags that name a shared pipeline platform
pub const PIPELINE_PLATFORM_CATEGORY: &str = "PIPELINE_PLATFORM";

/// A pipeline platform tag as returned by the taxonomy service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyTag {
    pub name: String,
    pub id: i64,
    #[serde(default)]
    pub category: Option<String>,
}

/// Mapping of platform tag name to taxonomy id
pub type PlatformTags = HashMap<String, i64>;

/// Keeps the pipeline platform tags of a raw taxonomy listing
///
/// Tags of other categories are skipped without being inspected, so their
/// shape does not matter. Kept tags must carry a string `name` and an
/// integer `id`.
pub fn platform_tags(listing: Vec<Value>) -> serde_json::Result<PlatformTags> {
    listing
        .into_iter()
        .filter(|tag| tag.get("category").and_then(Value::as_str) == Some(PIPELINE_PLATFORM_CATEGORY))
        .map(|tag| serde_json::from_value::<TaxonomyTag>(tag).map(|t| (t.name, t.id)))
        .collect()
}
