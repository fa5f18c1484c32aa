//! Named, ordered, immutable key/value sources produced by loaders.

use indexmap::IndexMap;
use serde::Serialize;

use crate::origin::{OriginLookup, TextResourceOrigin};

/// A named mapping from property key to value, in file order.
///
/// Origins live in a side table keyed like the values. The table is empty for
/// sources that are not origin-tracked. There is no way to mutate a source
/// once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySource {
    name: String,
    origin_tracked: bool,
    properties: IndexMap<String, String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    origins: IndexMap<String, TextResourceOrigin>,
}

/// One key/value pair of a [`PropertySource`], with its origin when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PropertyEntry<'a> {
    pub key: &'a str,
    pub value: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<&'a TextResourceOrigin>,
}

impl PropertySource {
    /// Creates a source without origin information.
    pub fn new(name: impl Into<String>, properties: IndexMap<String, String>) -> Self {
        Self {
            name: name.into(),
            origin_tracked: false,
            properties,
            origins: IndexMap::new(),
        }
    }

    /// Creates an origin-tracked source. Origins for keys absent from
    /// `properties` are dropped.
    pub fn with_origins(
        name: impl Into<String>,
        properties: IndexMap<String, String>,
        mut origins: IndexMap<String, TextResourceOrigin>,
    ) -> Self {
        origins.retain(|key, _| properties.contains_key(key));
        Self {
            name: name.into(),
            origin_tracked: true,
            properties,
            origins,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether values were parsed by a loader able to record origins.
    pub fn is_origin_tracked(&self) -> bool {
        self.origin_tracked
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn get_entry(&self, key: &str) -> Option<PropertyEntry<'_>> {
        self.properties
            .get_key_value(key)
            .map(|(key, value)| PropertyEntry {
                key,
                value,
                origin: self.origins.get(key),
            })
    }

    /// Keys in file order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = PropertyEntry<'_>> {
        self.properties.iter().map(|(key, value)| PropertyEntry {
            key,
            value,
            origin: self.origins.get(key),
        })
    }

    pub fn properties(&self) -> &IndexMap<String, String> {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl OriginLookup for PropertySource {
    fn origin(&self, key: &str) -> Option<&TextResourceOrigin> {
        self.origins.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::origin::Location;

    fn sample_properties() -> IndexMap<String, String> {
        let mut properties = IndexMap::new();
        properties.insert("server.port".to_string(), "8080".to_string());
        properties.insert("server.host".to_string(), "localhost".to_string());
        properties
    }

    #[test]
    fn test_untracked_source() {
        let source = PropertySource::new("defaults", sample_properties());
        assert_eq!(source.name(), "defaults");
        assert!(!source.is_origin_tracked());
        assert_eq!(source.get("server.port"), Some("8080"));
        assert_eq!(source.origin("server.port"), None);
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn test_tracked_source_entries() {
        let mut origins = IndexMap::new();
        origins.insert(
            "server.port".to_string(),
            TextResourceOrigin::new("file [app.properties]", Location::new(1, 13)),
        );
        origins.insert(
            "stale".to_string(),
            TextResourceOrigin::new("file [app.properties]", Location::new(9, 1)),
        );
        let source = PropertySource::with_origins("app", sample_properties(), origins);

        assert!(source.is_origin_tracked());
        let entry = source.get_entry("server.port").unwrap();
        assert_eq!(entry.value, "8080");
        assert_eq!(entry.origin.unwrap().location, Location::new(1, 13));
        assert_eq!(source.get_entry("server.host").unwrap().origin, None);
        // origins for unknown keys are not kept
        assert_eq!(source.origin("stale"), None);
    }

    #[test]
    fn test_iteration_keeps_file_order() {
        let source = PropertySource::new("defaults", sample_properties());
        let names: Vec<_> = source.property_names().collect();
        assert_eq!(names, vec!["server.port", "server.host"]);
        let values: Vec<_> = source.iter().map(|e| e.value).collect();
        assert_eq!(values, vec!["8080", "localhost"]);
    }

    #[test]
    fn test_serializes_without_empty_origins() {
        let source = PropertySource::new("defaults", sample_properties());
        let json = serde_json::to_value(&source).unwrap();
        assert_eq!(json["name"], "defaults");
        assert_eq!(json["origin_tracked"], false);
        assert_eq!(json["properties"]["server.port"], "8080");
        assert!(json.get("origins").is_none());
    }
}
