//! Clearable fields on update DTOs.
//!
//! A nullable column in an update body has three states: the key is absent
//! (keep the stored value), the key is `null` (clear it), or the key holds a
//! value (set it). Such fields are `Option<Option<T>>` and deserialize with
//! [`double_option`]:
//!
//! ```ignore
//! #[serde(default, deserialize_with = "double_option")]
//! pub drive_link: Option<Option<String>>,
//! ```
//!
//! Repositories bind [`is_set`] and [`value_of`] as a pair and write
//! `col = CASE WHEN $flag THEN $value ELSE col END`.

use serde::{Deserialize, Deserializer};

/// Present keys become `Some(..)`, so an explicit `null` is `Some(None)`.
///
/// Must be combined with `#[serde(default)]` so a missing key stays `None`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Whether the request mentioned the field at all.
pub fn is_set<T>(field: &Option<Option<T>>) -> bool {
    field.is_some()
}

/// The value to write when [`is_set`] holds. `None` writes `NULL`.
pub fn value_of<T: Clone>(field: &Option<Option<T>>) -> Option<T> {
    field.clone().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "double_option")]
        link: Option<Option<String>>,
    }

    #[test]
    fn absent_key_keeps() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.link, None);
        assert!(!is_set(&body.link));
    }

    #[test]
    fn explicit_null_clears() {
        let body: Body = serde_json::from_str(r#"{"link": null}"#).unwrap();
        assert_eq!(body.link, Some(None));
        assert!(is_set(&body.link));
        assert_eq!(value_of(&body.link), None);
    }

    #[test]
    fn value_sets() {
        let body: Body = serde_json::from_str(r#"{"link": "https://x.example"}"#).unwrap();
        assert_eq!(value_of(&body.link).as_deref(), Some("https://x.example"));
    }
}
