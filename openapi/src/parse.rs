//! Reading API descriptions from YAML or JSON text.

use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::error::{Result, SpecError};
use crate::spec::ApiSpec;

/// Top-level keys every OpenAPI document must carry.
const REQUIRED_FIELDS: [&str; 3] = ["openapi", "info", "paths"];

/// Parse YAML or JSON text into a raw document.
///
/// YAML is tried first; JSON is the fallback for inputs YAML rejects.
pub fn parse_document(content: &str) -> Result<Value> {
    match serde_yaml::from_str::<serde_yaml::Value>(content) {
        Ok(yaml) => Ok(yaml_to_json(yaml)),
        Err(yaml_err) => {
            debug!("YAML parse failed ({yaml_err}), trying JSON");
            serde_json::from_str(content).map_err(|e| SpecError::Parse(e.to_string()))
        }
    }
}

/// Parse YAML or JSON text into an [`ApiSpec`] without validating it.
pub fn parse_spec(content: &str) -> Result<ApiSpec> {
    ApiSpec::from_value(parse_document(content)?)
}

/// Check that a raw document has the required top-level keys.
pub fn validate(document: &Value) -> Result<()> {
    let object = document
        .as_object()
        .ok_or(SpecError::MissingField(REQUIRED_FIELDS[0]))?;

    match REQUIRED_FIELDS.iter().find(|field| !object.contains_key(**field)) {
        Some(field) => Err(SpecError::MissingField(*field)),
        None => Ok(()),
    }
}

/// Parse, validate and convert in one step.
pub fn parse_and_validate(content: &str) -> Result<ApiSpec> {
    let document = parse_document(content)?;
    validate(&document)?;
    ApiSpec::from_value(document)
}

/// Convert a YAML tree to JSON, keeping mapping order.
///
/// YAML allows non-string keys (`200:` under `responses` is common); they
/// are rendered as strings.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => yaml_number(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut object = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                object.insert(yaml_key(key), yaml_to_json(value));
            }
            Value::Object(object)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number)
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => yaml_to_json(other).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const USERS_YAML: &str = r#"
openapi: 3.0.3
info:
  title: Users API
  description: Manage users
  version: 1.0
paths:
  /users:
    get:
      summary: List users
      responses:
        200:
          description: ok
  /users/{id}:
    delete:
      summary: Remove a user
components:
  schemas:
    User:
      type: object
"#;

    #[test]
    fn test_parse_yaml() {
        let spec = parse_and_validate(USERS_YAML).unwrap();
        assert_eq!(spec.title(), "Users API");
        assert_eq!(spec.openapi.as_deref(), Some("3.0.3"));
        assert_eq!(spec.info.version.as_deref(), Some("1.0"));

        let paths: Vec<String> = spec.path_set().into_iter().collect();
        assert_eq!(paths, vec!["/users", "/users/{id}"]);

        let endpoints = spec.endpoints();
        assert!(endpoints[0].responses.contains_key("200"));
    }

    #[test]
    fn test_parse_json() {
        let spec = parse_and_validate(
            r#"{"openapi": "3.1.0", "info": {"title": "Orders"}, "paths": {"/orders": {}}}"#,
        )
        .unwrap();
        assert_eq!(spec.title(), "Orders");
        assert!(spec.paths.contains_key("/orders"));
    }

    #[test]
    fn test_parse_garbage() {
        let err = parse_spec("{ this is: [not valid").unwrap_err();
        assert!(matches!(err, SpecError::Parse(_)));
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let document = parse_document("openapi: 3.0.0\ninfo:\n  title: x\n").unwrap();
        match validate(&document) {
            Err(SpecError::MissingField(field)) => assert_eq!(field, "paths"),
            other => panic!("expected missing field, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_scalar_document() {
        let document = parse_document("just a sentence").unwrap();
        assert!(matches!(
            validate(&document),
            Err(SpecError::MissingField("openapi"))
        ));
    }

    #[test]
    fn test_parse_spec_skips_validation() {
        let spec = parse_spec("info:\n  title: Loose\n").unwrap();
        assert_eq!(spec.title(), "Loose");
        assert!(spec.paths.is_empty());
    }
}
