//! Shared payload types

use serde::{Deserialize, Deserializer, Serialize};

/// Free-form JSON object for endpoints whose payloads vary widely.
pub type RawObject = serde_json::Map<String, serde_json::Value>;

/// Deserialize `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Envelope for list endpoints that return `{"items": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub items: Vec<T>,
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

/// `count`/`next`/`previous` metadata carried by paginated listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationMeta {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
}

impl PaginationMeta {
    /// True when the server advertised a next page.
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}

/// Compact user descriptor used across several endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserReference {
    pub id: Option<String>,
    pub membership_id: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
}

/// Amount/currency pair. The amount is kept as the decimal string the API sends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoneyAmount {
    pub amount: Option<String>,
    pub currency: Option<String>,
}

/// Named image, table or text block in document details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedContentBlock {
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_missing_items() {
        let list: ListResponse<UserReference> = serde_json::from_str("{}").unwrap();
        assert!(list.items.is_empty());
    }

    #[test]
    fn test_pagination_meta_has_more() {
        let meta: PaginationMeta = serde_json::from_str(
            r#"{"count":50,"next":"https://api.pandadoc.com/public/v1/documents?page=2","previous":null}"#,
        )
        .unwrap();
        assert_eq!(meta.count, 50);
        assert!(meta.has_more());

        let last: PaginationMeta = serde_json::from_str(r#"{"count":3,"next":null}"#).unwrap();
        assert!(!last.has_more());
        assert!(!PaginationMeta::default().has_more());
    }

    #[test]
    fn test_user_reference_tolerates_nulls() {
        let user: UserReference =
            serde_json::from_str(r#"{"id":"u1","email":null,"extra":true}"#).unwrap();
        assert_eq!(user.id.as_deref(), Some("u1"));
        assert_eq!(user.email, None);
    }
}
