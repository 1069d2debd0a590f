//! Request parameters.

use std::collections::BTreeMap;

use serde::Serialize;

/// Parameters passed to [`Value::get`](crate::Value::get) and
/// [`Value::post`](crate::Value::post).
///
/// GET requests send them as the query string, POST requests as a
/// form-urlencoded body. Named operations travel as an ordinary `ws.op`
/// entry:
///
/// ```
/// use lpapi::Params;
///
/// let params = Params::op("findPerson").with("text", "joe");
/// assert_eq!(params.encode(), "text=joe&ws.op=findPerson");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// Empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters naming a server-side operation.
    #[must_use]
    pub fn op(name: &str) -> Self {
        Self::new().with("ws.op", name)
    }

    /// Add a parameter, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Encode as `application/x-www-form-urlencoded`, keys in order.
    #[must_use]
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.0)
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Params {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_sorted_and_escaped() {
        let params = Params::from([("text", "a b&c"), ("ws.op", "find")]);
        assert_eq!(params.encode(), "text=a+b%26c&ws.op=find");
    }

    #[test]
    fn test_empty() {
        let params = Params::new();
        assert!(params.is_empty());
        assert_eq!(params.encode(), "");
    }

    #[test]
    fn test_insert_replaces() {
        let mut params = Params::op("createBug");
        params.insert("ws.op", "find");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("ws.op"), Some("find"));
    }

    #[test]
    fn test_serializes_as_map() {
        let params = Params::from([("k", "v")]);
        assert_eq!(serde_json::to_string(&params).unwrap(), r#"{"k":"v"}"#);
    }
}
