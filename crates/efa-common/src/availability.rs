//! Availability data model.
//!
//! The precomputed "enabled for apps" data is a two-level ordered mapping:
//!
//! ```text
//! version id -> category name -> [OperationDescriptor]
//! ```
//!
//! Both levels keep the key order of the source document, which is the order
//! categories are displayed in. Values are built once at load time and only
//! shared read-only afterwards.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single REST operation callable by an integration app.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationDescriptor {
    /// Identifier unique within its category; used as the link fragment.
    pub slug: String,
    /// HTTP method, as stored upstream (usually lowercase).
    pub verb: String,
    /// URL template of the operation, e.g. `/repos/{owner}/{repo}`.
    #[serde(rename = "requestPath")]
    pub request_path: String,
}

impl OperationDescriptor {
    pub fn new(
        slug: impl Into<String>,
        verb: impl Into<String>,
        request_path: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            verb: verb.into(),
            request_path: request_path.into(),
        }
    }
}

/// Operations of one version grouped by category, in display order.
///
/// A category that is present always maps to a sequence; the sequence may be
/// empty. A JSON `null` in place of a sequence is rejected on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryMap(IndexMap<String, Vec<OperationDescriptor>>);

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a category. Replaces the operations of an existing category
    /// while keeping its original position.
    pub fn insert(&mut self, category: impl Into<String>, operations: Vec<OperationDescriptor>) {
        self.0.insert(category.into(), operations);
    }

    /// Builder form of [`CategoryMap::insert`].
    pub fn with_category(
        mut self,
        category: impl Into<String>,
        operations: Vec<OperationDescriptor>,
    ) -> Self {
        self.insert(category, operations);
        self
    }

    /// Operations of a category, if the category exists.
    pub fn get(&self, category: &str) -> Option<&[OperationDescriptor]> {
        self.0.get(category).map(Vec::as_slice)
    }

    /// Iterate categories in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[OperationDescriptor])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Category names in display order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of categories, including empty ones.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of operations across all categories.
    pub fn operation_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Check slugs are unique within each category and no field is blank.
    pub fn validate(&self) -> Result<()> {
        for (category, operations) in &self.0 {
            if category.trim().is_empty() {
                return Err(Error::MalformedData("empty category name".to_string()));
            }
            let mut seen = HashSet::new();
            for op in operations {
                if op.slug.trim().is_empty() {
                    return Err(Error::MalformedData(format!(
                        "operation with empty slug in category '{}'",
                        category
                    )));
                }
                if op.verb.trim().is_empty() || op.request_path.trim().is_empty() {
                    return Err(Error::MalformedData(format!(
                        "operation '{}' in category '{}' is missing verb or requestPath",
                        op.slug, category
                    )));
                }
                if !seen.insert(op.slug.as_str()) {
                    return Err(Error::MalformedData(format!(
                        "duplicate slug '{}' in category '{}'",
                        op.slug, category
                    )));
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, Vec<OperationDescriptor>)> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<OperationDescriptor>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Availability data for every documented version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionedAvailability(IndexMap<String, CategoryMap>);

impl VersionedAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, version: impl Into<String>, categories: CategoryMap) {
        self.0.insert(version.into(), categories);
    }

    pub fn with_version(mut self, version: impl Into<String>, categories: CategoryMap) -> Self {
        self.insert(version, categories);
        self
    }

    /// Slice the data to one version. `None` when the version is unknown.
    pub fn category_map(&self, version: &str) -> Option<&CategoryMap> {
        self.0.get(version)
    }

    /// Like [`VersionedAvailability::category_map`], but unknown versions are an error.
    pub fn require(&self, version: &str) -> Result<&CategoryMap> {
        self.category_map(version)
            .ok_or_else(|| Error::VersionNotFound {
                version: version.to_string(),
            })
    }

    /// Version ids in source order.
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryMap)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: Self = serde_json::from_str(json)
            .map_err(|e| Error::MalformedData(format!("invalid availability JSON: {}", e)))?;
        data.validate()?;
        Ok(data)
    }

    pub fn validate(&self) -> Result<()> {
        for (version, categories) in &self.0 {
            if version.trim().is_empty() {
                return Err(Error::MalformedData("empty version id".to_string()));
            }
            categories.validate().map_err(|e| match e {
                Error::MalformedData(msg) => {
                    Error::MalformedData(format!("version '{}': {}", version, msg))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(slug: &str, verb: &str, path: &str) -> OperationDescriptor {
        OperationDescriptor::new(slug, verb, path)
    }

    #[test]
    fn test_category_order_follows_json() {
        let json = r#"{
            "v1": {
                "zeta": [],
                "apps": [{"slug": "list", "verb": "get", "requestPath": "/app"}],
                "actions": []
            }
        }"#;
        let data = VersionedAvailability::from_json(json).unwrap();
        let cats: Vec<&str> = data.category_map("v1").unwrap().categories().collect();
        assert_eq!(cats, vec!["zeta", "apps", "actions"]);
    }

    #[test]
    fn test_request_path_uses_camel_case_key() {
        let json = serde_json::to_string(&op("list", "get", "/app")).unwrap();
        assert!(json.contains("\"requestPath\":\"/app\""));
    }

    #[test]
    fn test_null_category_rejected() {
        let json = r#"{"v1": {"apps": null}}"#;
        let err = VersionedAvailability::from_json(json).unwrap_err();
        assert!(matches!(err, Error::MalformedData(_)));
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let map = CategoryMap::new().with_category(
            "apps",
            vec![op("list", "get", "/app"), op("list", "post", "/app")],
        );
        let err = map.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate slug 'list'"));
    }

    #[test]
    fn test_same_slug_in_different_categories_ok() {
        let map = CategoryMap::new()
            .with_category("apps", vec![op("list", "get", "/app")])
            .with_category("repos", vec![op("list", "get", "/repos")]);
        assert!(map.validate().is_ok());
        assert_eq!(map.operation_count(), 2);
    }

    #[test]
    fn test_require_unknown_version() {
        let data = VersionedAvailability::new().with_version("v1", CategoryMap::new());
        assert!(data.require("v1").is_ok());
        match data.require("v2") {
            Err(Error::VersionNotFound { version }) => assert_eq!(version, "v2"),
            other => panic!("expected VersionNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut map = CategoryMap::new()
            .with_category("a", vec![])
            .with_category("b", vec![]);
        map.insert("a", vec![op("x", "get", "/x")]);
        let cats: Vec<&str> = map.categories().collect();
        assert_eq!(cats, vec!["a", "b"]);
        assert_eq!(map.get("a").unwrap().len(), 1);
    }
}
