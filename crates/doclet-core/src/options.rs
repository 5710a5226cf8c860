//! Run options and the structured remove query.

use crate::error::{DocletError, Result};
use crate::util::has_property;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;

/// Options of a Doclet run.
///
/// Deserializes from the camelCase keys doclet configuration files use.
/// Missing keys keep their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocletOptions {
    /// Records matching this query are removed before grafting.
    pub remove_query: RemoveQuery,
    /// Whether plain inherited members are kept.
    pub treat_inherited_element: bool,
    /// Silences the default hooks.
    pub quiet: bool,
}

impl Default for DocletOptions {
    fn default() -> Self {
        Self {
            remove_query: RemoveQuery::default(),
            treat_inherited_element: true,
            quiet: false,
        }
    }
}

impl DocletOptions {
    /// Parses options from JSON, merging them over the defaults.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Loads options from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| DocletError::io(path, e))?;
        Self::from_json_str(&raw)
    }
}

/// TaffyDB-style filter over the JSON view of records.
///
/// A single object matches records whose fields equal every listed value.
/// A list of objects matches when any of them does. An object without
/// conditions matches nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoveQuery {
    All(Map<String, Value>),
    Any(Vec<Map<String, Value>>),
}

impl Default for RemoveQuery {
    /// Removes undocumented records.
    fn default() -> Self {
        let mut conditions = Map::new();
        conditions.insert("undocumented".to_string(), json!(true));
        Self::All(conditions)
    }
}

impl RemoveQuery {
    /// A query that removes nothing.
    pub fn nothing() -> Self {
        Self::Any(Vec::new())
    }

    /// Tests the query against a record's JSON view.
    pub fn matches(&self, record: &Value) -> Result<bool> {
        match self {
            Self::All(conditions) => matches_all(conditions, record),
            Self::Any(alternatives) => {
                for conditions in alternatives {
                    if matches_all(conditions, record)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

fn matches_all(conditions: &Map<String, Value>, record: &Value) -> Result<bool> {
    if conditions.is_empty() {
        return Ok(false);
    }
    for (field, expected) in conditions {
        if !has_property(record, field)? || record.get(field) != Some(expected) {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DocletOptions::default();
        assert!(options.treat_inherited_element);
        assert!(!options.quiet);
        assert!(options
            .remove_query
            .matches(&json!({"undocumented": true}))
            .unwrap());
    }

    #[test]
    fn test_partial_options_merge_over_defaults() {
        let options = DocletOptions::from_json_str(r#"{"quiet": true}"#).unwrap();
        assert!(options.quiet);
        assert!(options.treat_inherited_element);
        assert_eq!(options.remove_query, RemoveQuery::default());
    }

    #[test]
    fn test_query_forms() {
        let options = DocletOptions::from_json_str(
            r#"{"removeQuery": [{"access": "private"}, {"kind": "file"}]}"#,
        )
        .unwrap();
        let query = options.remove_query;

        assert!(query.matches(&json!({"access": "private"})).unwrap());
        assert!(query.matches(&json!({"kind": "file"})).unwrap());
        assert!(!query.matches(&json!({"kind": "class"})).unwrap());
        assert!(!RemoveQuery::nothing().matches(&json!({"kind": "file"})).unwrap());
    }

    #[test]
    fn test_conjunction_requires_every_field() {
        let query: RemoveQuery =
            serde_json::from_value(json!({"kind": "member", "access": "private"})).unwrap();

        assert!(query
            .matches(&json!({"kind": "member", "access": "private"}))
            .unwrap());
        assert!(!query.matches(&json!({"kind": "member"})).unwrap());
    }

    #[test]
    fn test_empty_field_name_is_config_error() {
        let query: RemoveQuery = serde_json::from_value(json!({"": true})).unwrap();
        let err = query.matches(&json!({"kind": "class"})).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doclet.json");
        fs::write(&path, r#"{"treatInheritedElement": false}"#).unwrap();

        let options = DocletOptions::load(&path).unwrap();
        assert!(!options.treat_inherited_element);

        let missing = DocletOptions::load(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(DocletError::Io { .. })));
    }
}
