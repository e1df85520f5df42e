mod item;

pub use item::{Item, Items, Schema};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityProfile {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub items: Vec<QualityProfileItem>,
}

/// Entry of a quality profile: either a single quality or a named group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityProfileItem {
    #[serde(default)]
    pub allowed: bool,
    pub quality: Option<Quality>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quality {
    pub name: String,
}

impl QualityProfile {
    /// Names of the allowed qualities and quality groups, in profile order.
    pub fn allowed_qualities(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| item.allowed)
            .filter_map(|item| {
                item.quality
                    .as_ref()
                    .map(|q| q.name.as_str())
                    .or(item.name.as_deref())
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootFolder {
    pub id: u32,
    pub path: String,
    #[serde(rename = "freeSpace")]
    pub free_space: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiskSpace {
    pub path: String,
    pub label: Option<String>,
    #[serde(rename = "freeSpace")]
    pub free_space: u64,
    #[serde(rename = "totalSpace")]
    pub total_space: u64,
}
