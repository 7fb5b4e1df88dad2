//! Query types for the node endpoints.

use serde::Deserialize;

use krok_storage::Page;

use crate::schema::common::{default_limit, PageQuery};

/// Query parameters of `GET /nodes`.
///
/// `flow_id` restricts the listing to one flow; an empty value is treated as
/// absent. `skip` and `limit` follow [`PageQuery`].
#[derive(Debug, Clone, Deserialize)]
pub struct ListNodesQuery {
    #[serde(default)]
    pub flow_id: Option<String>,
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl ListNodesQuery {
    /// The paging window, converted the same way as [`PageQuery`].
    pub fn page(&self) -> Page {
        PageQuery {
            skip: self.skip,
            limit: self.limit,
        }
        .into()
    }

    pub fn flow_filter(&self) -> Option<&str> {
        self.flow_id.as_deref().filter(|flow_id| !flow_id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;

    fn parse<T: serde::de::DeserializeOwned>(query: &str) -> T {
        let uri: Uri = format!("/nodes?{query}").parse().unwrap();
        Query::<T>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn paging_defaults_match_page_query() {
        let query: ListNodesQuery = parse("");
        let defaults: PageQuery = parse("");
        assert_eq!(query.page(), Page::from(defaults));
        assert_eq!(query.page(), Page::default());
    }

    #[test]
    fn empty_flow_id_is_no_filter() {
        let empty: ListNodesQuery = parse("flow_id=");
        assert_eq!(empty.flow_filter(), None);

        let filtered: ListNodesQuery = parse("flow_id=f1&skip=2&limit=5");
        assert_eq!(filtered.flow_filter(), Some("f1"));
        assert_eq!(filtered.page(), Page::new(2, 5));
    }
}
