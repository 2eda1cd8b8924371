//! The parsed API description model.
//!
//! Only the parts of an OpenAPI document the duplicate detector reads are
//! typed; everything else under a path or operation is kept as raw JSON.
//! Maps are [`IndexMap`]s so paths and methods iterate in document order.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Result;

/// A parsed API description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiSpec {
    /// OpenAPI version string, if present.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub openapi: Option<String>,

    /// Title, description and version.
    #[serde(default, deserialize_with = "null_as_default")]
    pub info: Info,

    /// Path template to path item, in document order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub paths: IndexMap<String, PathItem>,

    /// Reusable components.
    #[serde(default, deserialize_with = "null_as_default")]
    pub components: Components,
}

/// The `info` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,

    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,
}

/// The `components` object. Only schema names matter here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, deserialize_with = "null_as_default")]
    pub schemas: IndexMap<String, Value>,
}

/// HTTP methods that count as operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Match a path item key. Keys are case-sensitive, as in OpenAPI.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "delete" => Some(Self::Delete),
            "patch" => Some(Self::Patch),
            _ => None,
        }
    }

    /// The lowercase key used in documents.
    pub fn as_key(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Patch => "patch",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key().to_ascii_uppercase())
    }
}

/// A path item: every key of the path object, in document order.
///
/// Besides operations a path item may carry `parameters`, `servers`,
/// `summary` and extensions, so entries are kept raw and operations are
/// read on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathItem(#[serde(deserialize_with = "null_as_default")] IndexMap<String, Value>);

impl PathItem {
    /// Iterate over the operations under this path.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, Operation)> + '_ {
        self.0.iter().filter_map(|(key, value)| {
            HttpMethod::from_key(key).map(|method| (method, Operation::from_value(value)))
        })
    }

    /// Raw access to a key of the path object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert a raw entry.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }
}

/// A single operation under a path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default, deserialize_with = "lenient_string")]
    pub summary: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: Vec<Value>,

    #[serde(
        rename = "requestBody",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub request_body: Option<Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub responses: IndexMap<String, Value>,
}

impl Operation {
    /// Read an operation out of a raw path item entry.
    ///
    /// Anything that is not an operation object yields an empty operation.
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }
}

/// A flattened (path, method) pair with its documentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Endpoint {
    pub path: String,
    pub method: HttpMethod,
    pub summary: String,
    pub description: String,
    pub parameters: Vec<Value>,
    #[serde(rename = "requestBody")]
    pub request_body: Option<Value>,
    pub responses: IndexMap<String, Value>,
}

impl ApiSpec {
    /// Build a spec from an already-parsed document.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// The document title.
    pub fn title(&self) -> &str {
        &self.info.title
    }

    /// Path templates, in document order.
    pub fn path_set(&self) -> IndexSet<String> {
        self.paths.keys().cloned().collect()
    }

    /// Schema names under `components.schemas`, in document order.
    pub fn schema_names(&self) -> IndexSet<String> {
        self.components.schemas.keys().cloned().collect()
    }

    /// Every operation in the spec, flattened.
    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.paths
            .iter()
            .flat_map(|(path, item)| {
                item.operations().map(move |(method, op)| Endpoint {
                    path: path.clone(),
                    method,
                    summary: op.summary,
                    description: op.description,
                    parameters: op.parameters,
                    request_body: op.request_body,
                    responses: op.responses,
                })
            })
            .collect()
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_to_string))
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn petstore() -> ApiSpec {
        ApiSpec::from_value(json!({
            "openapi": "3.0.0",
            "info": {"title": "Petstore", "description": "Pets", "version": 2},
            "paths": {
                "/pets": {
                    "parameters": [{"name": "limit", "in": "query"}],
                    "post": {"summary": "Create a pet"},
                    "get": {"summary": "List pets", "description": "All pets"},
                    "trace": {"summary": "ignored"}
                },
                "/pets/{petId}": {
                    "get": {"summary": "Get a pet", "responses": {"200": {"description": "ok"}}}
                }
            },
            "components": {"schemas": {"Pet": {"type": "object"}, "Error": {}}}
        }))
        .unwrap()
    }

    #[test]
    fn test_info_fields() {
        let spec = petstore();
        assert_eq!(spec.title(), "Petstore");
        assert_eq!(spec.info.description, "Pets");
        assert_eq!(spec.info.version.as_deref(), Some("2"));
        assert_eq!(spec.openapi.as_deref(), Some("3.0.0"));
    }

    #[test]
    fn test_operations_keep_document_order_and_skip_non_verbs() {
        let spec = petstore();
        let methods: Vec<HttpMethod> = spec.paths["/pets"].operations().map(|(m, _)| m).collect();
        assert_eq!(methods, vec![HttpMethod::Post, HttpMethod::Get]);
    }

    #[test]
    fn test_endpoints() {
        let endpoints = petstore().endpoints();
        let pairs: Vec<(String, String)> = endpoints
            .iter()
            .map(|e| (e.method.to_string(), e.path.clone()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("POST".to_string(), "/pets".to_string()),
                ("GET".to_string(), "/pets".to_string()),
                ("GET".to_string(), "/pets/{petId}".to_string()),
            ]
        );
        assert_eq!(endpoints[1].description, "All pets");
        assert!(endpoints[2].responses.contains_key("200"));
    }

    #[test]
    fn test_path_and_schema_sets() {
        let spec = petstore();
        let paths: Vec<String> = spec.path_set().into_iter().collect();
        assert_eq!(paths, vec!["/pets", "/pets/{petId}"]);
        let schemas: Vec<String> = spec.schema_names().into_iter().collect();
        assert_eq!(schemas, vec!["Pet", "Error"]);
    }

    #[test]
    fn test_missing_and_null_sections_default() {
        let spec = ApiSpec::from_value(json!({
            "info": {"title": null},
            "paths": {"/a": null, "/b": {"get": "not an object"}},
            "components": null
        }))
        .unwrap();

        assert_eq!(spec.title(), "");
        assert!(spec.components.schemas.is_empty());
        assert_eq!(spec.paths["/a"].operations().count(), 0);
        let (_, op) = spec.paths["/b"].operations().next().unwrap();
        assert_eq!(op, Operation::default());
    }

    #[test]
    fn test_method_keys_are_case_sensitive() {
        assert_eq!(HttpMethod::from_key("GET"), None);
        assert_eq!(HttpMethod::from_key("patch"), Some(HttpMethod::Patch));
    }
}
