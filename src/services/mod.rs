//! Resource services
//!
//! Each service borrows the [`Client`](crate::Client) and maps one method to
//! one API call. Query parameters are collected with [`QueryPairs`], which
//! keeps insertion order and skips unset values.

mod documents;
mod oauth;
mod product_catalog;
mod webhooks;

pub use documents::DocumentsService;
pub use oauth::OAuthService;
pub use product_catalog::ProductCatalogService;
pub use webhooks::{WebhookEventsService, WebhookSubscriptionsService};

/// Ordered query builder used by the service methods.
#[derive(Debug, Default)]
pub(crate) struct QueryPairs {
    pairs: Vec<(String, String)>,
}

impl QueryPairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str, value: impl Into<String>) {
        self.pairs.push((key.to_string(), value.into()));
    }

    /// Add `key` when `value` is set and not empty.
    pub fn set_if_not_empty(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.add(key, value);
        }
    }

    /// Add `key` when `value` is set and greater than zero.
    pub fn set_if_positive<N>(&mut self, key: &str, value: Option<N>)
    where
        N: Into<u64>,
    {
        if let Some(n) = value.map(Into::into).filter(|n| *n > 0) {
            self.add(key, n.to_string());
        }
    }

    pub fn set_bool(&mut self, key: &str, value: Option<bool>) {
        if let Some(flag) = value {
            self.add(key, flag.to_string());
        }
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_unset_and_empty() {
        let mut query = QueryPairs::new();
        query.set_if_not_empty("a", None);
        query.set_if_not_empty("b", Some(""));
        query.set_if_not_empty("c", Some("x"));
        query.set_if_positive("d", Some(0u32));
        query.set_if_positive::<u32>("e", None);
        query.set_if_positive("f", Some(7u16));
        query.set_bool("g", Some(false));
        query.set_bool("h", None);
        assert_eq!(
            query.into_pairs(),
            vec![
                ("c".to_string(), "x".to_string()),
                ("f".to_string(), "7".to_string()),
                ("g".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn test_repeated_keys_are_kept() {
        let mut query = QueryPairs::new();
        query.add("types", "regular");
        query.add("types", "bundle");
        assert_eq!(query.into_pairs().len(), 2);
    }
}
