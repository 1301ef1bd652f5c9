// SPDX-License-Identifier: MIT

//! Parameter lookup
//!
//! [`Params`] is the only thing an expression needs from the outside world:
//! a key to string lookup. An absent key reads as the empty string.

use serde_json::Value;
use std::borrow::{Borrow, Cow};
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use url::Url;

/// Key/value source consulted during evaluation
pub trait Params {
    /// The value stored under `key`, or `""` when there is none
    fn get(&self, key: &str) -> Cow<'_, str>;
}

/// Simple map-backed params
pub type Map = HashMap<String, String>;

impl<K, V, S> Params for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn get(&self, key: &str) -> Cow<'_, str> {
        HashMap::get(self, key)
            .map(|v| Cow::Borrowed(v.as_ref()))
            .unwrap_or(Cow::Borrowed(""))
    }
}

impl<K, V> Params for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn get(&self, key: &str) -> Cow<'_, str> {
        BTreeMap::get(self, key)
            .map(|v| Cow::Borrowed(v.as_ref()))
            .unwrap_or(Cow::Borrowed(""))
    }
}

impl<P: Params + ?Sized> Params for &P {
    fn get(&self, key: &str) -> Cow<'_, str> {
        (**self).get(key)
    }
}

/// JSON objects, with dot notation for nested fields (e.g. `"user.address.zip"`)
/// and numeric segments for array elements. Strings are returned verbatim,
/// numbers and booleans in their JSON text form, `null` as empty.
impl Params for serde_json::Map<String, Value> {
    fn get(&self, key: &str) -> Cow<'_, str> {
        lookup(self, key).map(render).unwrap_or(Cow::Borrowed(""))
    }
}

/// Objects delegate to the map implementation; any other value has no keys.
impl Params for Value {
    fn get(&self, key: &str) -> Cow<'_, str> {
        match self {
            Value::Object(map) => Params::get(map, key),
            _ => Cow::Borrowed(""),
        }
    }
}

fn lookup<'v>(map: &'v serde_json::Map<String, Value>, path: &str) -> Option<&'v Value> {
    // A literal key containing dots wins over path traversal
    if let Some(value) = map.get(path) {
        return Some(value);
    }

    let mut parts = path.split('.');
    let mut current = map.get(parts.next()?)?;
    for part in parts {
        current = match current {
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            other => other.get(part)?,
        };
    }
    Some(current)
}

fn render(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}

/// URL query parameters. When a key repeats, the first value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse an `application/x-www-form-urlencoded` query string
    pub fn parse(query: &str) -> Self {
        url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .into_owned()
            .collect()
    }

    pub fn from_url(url: &Url) -> Self {
        url.query_pairs().into_owned().collect()
    }

    /// All values stored under `key`, in order
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

impl FromIterator<(String, String)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl Params for QueryParams {
    fn get(&self, key: &str) -> Cow<'_, str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| Cow::Borrowed(v.as_str()))
            .unwrap_or(Cow::Borrowed(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_params() {
        let m = Map::from([("foo".to_string(), "bar".to_string())]);
        assert_eq!(Params::get(&m, "foo"), "bar");
        assert_eq!(Params::get(&m, "missing"), "");
    }

    #[test]
    fn test_borrowed_hashmap_params() {
        let m: HashMap<&str, &str> = HashMap::from([("a", "1")]);
        assert_eq!(Params::get(&m, "a"), "1");
        assert_eq!(Params::get(&m, "b"), "");
    }

    #[test]
    fn test_btreemap_params() {
        let m = BTreeMap::from([("k".to_string(), "v".to_string())]);
        assert_eq!(Params::get(&m, "k"), "v");
        assert_eq!(Params::get(&m, "x"), "");
    }

    #[test]
    fn test_json_params() {
        let value = json!({
            "name": "alice",
            "age": 42,
            "ratio": 0.5,
            "active": true,
            "nothing": null,
            "user": {"address": {"zip": "10115"}},
            "tags": ["a", "b"],
            "dotted.key": "literal"
        });
        assert_eq!(Params::get(&value, "name"), "alice");
        assert_eq!(Params::get(&value, "age"), "42");
        assert_eq!(Params::get(&value, "ratio"), "0.5");
        assert_eq!(Params::get(&value, "active"), "true");
        assert_eq!(Params::get(&value, "nothing"), "");
        assert_eq!(Params::get(&value, "user.address.zip"), "10115");
        assert_eq!(Params::get(&value, "user.address.city"), "");
        assert_eq!(Params::get(&value, "tags.1"), "b");
        assert_eq!(Params::get(&value, "tags.9"), "");
        assert_eq!(Params::get(&value, "dotted.key"), "literal");
        assert_eq!(Params::get(&json!([1, 2]), "0"), "");
    }

    #[test]
    fn test_query_params() {
        let q = QueryParams::parse("?foo=124&bar=x%20y&foo=999");
        assert_eq!(Params::get(&q, "foo"), "124");
        assert_eq!(Params::get(&q, "bar"), "x y");
        assert_eq!(Params::get(&q, "baz"), "");
        assert_eq!(q.get_all("foo").collect::<Vec<_>>(), vec!["124", "999"]);
    }

    #[test]
    fn test_query_params_from_url() {
        let url = Url::parse("https://example.com/route?country=GR&age=30").unwrap();
        let q = QueryParams::from_url(&url);
        assert_eq!(Params::get(&q, "country"), "GR");
        assert_eq!(q.pairs().len(), 2);
    }

    #[test]
    fn test_reference_params() {
        let m = Map::from([("foo".to_string(), "bar".to_string())]);
        let r: &dyn Params = &m;
        assert_eq!(Params::get(&r, "foo"), "bar");
    }
}
