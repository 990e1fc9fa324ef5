// portfolio-client/src/search.rs
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Filters of the project search form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSearch {
    pub search: Option<String>,
    /// Category primary key
    pub category: Option<u64>,
    /// Tag primary key
    pub tag: Option<u64>,
    pub status: Option<String>,
    pub page: Option<u32>,
}

impl ProjectSearch {
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            search: Some(query.into()),
            ..Default::default()
        }
    }

    /// Query string in form order; every form field is sent, empty when unset
    pub fn query_string(&self) -> String {
        let category = self.category.map(|c| c.to_string()).unwrap_or_default();
        let tag = self.tag.map(|t| t.to_string()).unwrap_or_default();

        let mut query = form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("search", self.search.as_deref().unwrap_or_default())
            .append_pair("category", &category)
            .append_pair("tag", &tag)
            .append_pair("status", self.status.as_deref().unwrap_or_default());
        if let Some(page) = self.page {
            query.append_pair("page", &page.to_string());
        }
        query.finish()
    }
}
