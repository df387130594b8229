//! PropertyMap — the key-value bag on nodes and edges.

use indexmap::IndexMap;
use super::Value;

/// A map of property names to values, in the order the result set listed them.
pub type PropertyMap = IndexMap<String, Value>;

/// Build a PropertyMap from (key, value) pairs.
pub fn property_map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> PropertyMap
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}
