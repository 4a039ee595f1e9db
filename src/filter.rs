//! Search filters for the `Search` endpoints.

use serde_json::Value;

use crate::error::{InsightlyError, Result};

/// Ordered key/value pairs sent as query parameters to a `Search` endpoint.
///
/// Keys and values are percent-encoded and joined with `&`.
///
/// # Example
///
/// ```
/// use insightly::SearchFilter;
///
/// let filter = SearchFilter::new()
///     .with("first_name", "Jane")
///     .with("city", "San Francisco");
/// assert_eq!(filter.to_query_string(), "first_name=Jane&city=San%20Francisco");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pairs: Vec<(String, String)>,
}

impl SearchFilter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key/value pair, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a key/value pair.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.pairs.push((key.into(), value.to_string()));
    }

    /// Build a filter from a JSON object.
    ///
    /// String values are used verbatim, `null` becomes an empty value and
    /// everything else uses its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`InsightlyError::InvalidFilter`] if `value` is not an object.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            InsightlyError::InvalidFilter(format!("expected a JSON object, got {value}"))
        })?;

        let pairs = object
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                (key.clone(), value)
            })
            .collect();

        Ok(Self { pairs })
    }

    /// Whether the filter has no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The key/value pairs in insertion order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Render as an URL query string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for SearchFilter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filter = Self::new();
        for (key, value) in iter {
            filter.insert(key, value);
        }
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_string_is_separated_and_encoded() {
        let filter = SearchFilter::new()
            .with("email", "a+b@example.com")
            .with("tag", "vip & gold");

        assert_eq!(
            filter.to_query_string(),
            "email=a%2Bb%40example.com&tag=vip%20%26%20gold"
        );
    }

    #[test]
    fn test_from_json_object() {
        let filter = SearchFilter::from_json(&json!({
            "first_name": "Jane",
            "owner_user_id": 12,
            "deleted": null
        }))
        .unwrap();

        assert_eq!(filter.pairs().len(), 3);
        assert!(filter
            .pairs()
            .contains(&("owner_user_id".to_string(), "12".to_string())));
        assert!(filter
            .pairs()
            .contains(&("deleted".to_string(), String::new())));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        for value in [json!(["email", "x"]), json!("email=x"), json!(5), json!(null)] {
            let err = SearchFilter::from_json(&value).unwrap_err();
            assert!(matches!(err, InsightlyError::InvalidFilter(_)), "{value}");
        }
    }

    #[test]
    fn test_from_iterator_keeps_order() {
        let filter: SearchFilter = [("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(filter.to_query_string(), "b=2&a=1");
        assert!(!filter.is_empty());
        assert!(SearchFilter::new().is_empty());
    }
}
