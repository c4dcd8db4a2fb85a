use std::collections::BTreeMap;

use axum::http::HeaderMap;
use serde::Serialize;

/// Read-only snapshot of request headers keyed by lowercase name.
///
/// Repeated headers are folded into one value joined with `", "`, the same
/// way proxies concatenate `X-Forwarded-For` hops. Values that are not
/// visible ASCII are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HeaderSet(BTreeMap<String, String>);

impl HeaderSet {
    /// Snapshot an `http::HeaderMap`.
    #[must_use]
    pub fn from_header_map(map: &HeaderMap) -> Self {
        let mut set = Self::default();
        for (name, value) in map {
            if let Ok(value) = value.to_str() {
                set.append(name.as_str(), value);
            }
        }
        set
    }

    fn append(&mut self, name: &str, value: &str) {
        self.0
            .entry(name.to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    /// Look up a header value, ignoring the case of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Iterate over all `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for HeaderSet
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::default();
        for (name, value) in iter {
            set.append(name.as_ref(), value.as_ref());
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let set: HeaderSet = [("X-Real-IP", "203.0.113.1")].into_iter().collect();
        assert_eq!(set.get("x-real-ip"), Some("203.0.113.1"));
        assert_eq!(set.get("X-REAL-IP"), Some("203.0.113.1"));
        assert_eq!(set.get("x-client-ip"), None);
    }

    #[test]
    fn test_repeated_headers_are_joined() {
        let mut map = HeaderMap::new();
        map.append("x-forwarded-for", HeaderValue::from_static("203.0.113.1"));
        map.append("x-forwarded-for", HeaderValue::from_static("198.51.100.2"));

        let set = HeaderSet::from_header_map(&map);
        assert_eq!(set.get("x-forwarded-for"), Some("203.0.113.1, 198.51.100.2"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_opaque_values_are_dropped() {
        let mut map = HeaderMap::new();
        map.insert(
            "x-real-ip",
            HeaderValue::from_bytes(b"\xfa\xfb").unwrap_or(HeaderValue::from_static("")),
        );
        map.insert("host", HeaderValue::from_static("example.com"));

        let set = HeaderSet::from_header_map(&map);
        assert_eq!(set.get("x-real-ip"), None);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![("host", "example.com")]);
    }
}
