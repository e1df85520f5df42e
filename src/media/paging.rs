use crate::http::Params;
use serde_json::Value;

/// Page selection of a paged list endpoint.
///
/// Each endpoint has its own defaults, see the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paging {
    pub page: u32,
    pub page_size: u32,
    pub sort_key: String,
    pub sort_dir: String,
}

impl Paging {
    pub fn new(page: u32, page_size: u32, sort_key: &str, sort_dir: &str) -> Self {
        Self {
            page,
            page_size,
            sort_key: sort_key.to_string(),
            sort_dir: sort_dir.to_string(),
        }
    }

    pub fn queue() -> Self {
        Self::new(1, 20, "progress", "ascending")
    }

    pub fn history() -> Self {
        Self::new(1, 10, "date", "asc")
    }

    pub fn logs() -> Self {
        Self::new(1, 10, "time", "asc")
    }

    pub fn wanted() -> Self {
        Self::new(1, 10, "airDateUtc", "asc")
    }

    pub fn blocklist() -> Self {
        Self::new(1, 20, "date", "descending")
    }

    /// Query parameters, with `options` merged over the paging keys.
    pub(crate) fn to_params(&self, direction_key: &str, options: Option<&Params>) -> Params {
        let mut params = Params::new();
        params.insert("page".to_string(), Value::from(self.page));
        params.insert("pageSize".to_string(), Value::from(self.page_size));
        params.insert("sortKey".to_string(), Value::from(self.sort_key.as_str()));
        params.insert(direction_key.to_string(), Value::from(self.sort_dir.as_str()));
        if let Some(options) = options {
            params.extend(options.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        params
    }
}
