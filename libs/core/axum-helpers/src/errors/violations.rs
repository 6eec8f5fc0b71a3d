//! Flattening of `validator` reports into a list of field violations.
//!
//! `ValidationErrors` is a tree keyed by Rust field names. Clients get a flat
//! list where each entry carries the violation kind, the camelCase path from
//! the request root and a message.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Key `validator` uses for struct-level (`schema`) errors.
const SCHEMA_KEY: &str = "__all__";

/// Param a struct-level error may set to point at the offending field.
/// Nested fields are dot separated, e.g. `parameters.password`.
pub const FIELD_PARAM: &str = "field";

/// One violated rule in a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    /// Violation kind, e.g. `invalid_type` or `invalid_enum_value`
    #[serde(rename = "type")]
    pub kind: String,
    /// Path from the request root, e.g. `["neo4j", "url"]`
    pub path: Vec<String>,
    pub message: String,
}

/// Flatten `errors` into violations sorted by path.
pub fn flatten(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut out = Vec::new();
    collect(errors, &mut Vec::new(), &mut out);
    out.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.kind.cmp(&b.kind)));
    out
}

fn collect(errors: &ValidationErrors, prefix: &mut Vec<String>, out: &mut Vec<FieldViolation>) {
    for (key, kind) in errors.errors() {
        let is_schema = key.as_ref() == SCHEMA_KEY;
        if !is_schema {
            prefix.push(to_camel_case(key));
        }

        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    out.push(violation(error, prefix));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, prefix, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    prefix.push(index.to_string());
                    collect(nested, prefix, out);
                    prefix.pop();
                }
            }
        }

        if !is_schema {
            prefix.pop();
        }
    }
}

fn violation(error: &ValidationError, prefix: &[String]) -> FieldViolation {
    let mut path = prefix.to_vec();
    if let Some(field) = error.params.get(FIELD_PARAM).and_then(|v| v.as_str()) {
        path.extend(field.split('.').filter(|s| !s.is_empty()).map(to_camel_case));
    }

    FieldViolation {
        kind: error.code.to_string(),
        path,
        message: error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "Invalid value".to_string()),
    }
}

fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for ch in name.chars() {
        if ch == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use validator::Validate;

    fn missing(field: &str) -> Result<(), ValidationError> {
        let mut err = ValidationError::new("invalid_type");
        err.message = Some(Cow::Borrowed("Required"));
        err.add_param(Cow::Borrowed(FIELD_PARAM), &field);
        Err(err)
    }

    fn schema_check(_: &Inner) -> Result<(), ValidationError> {
        missing("parameters.user_name")
    }

    #[derive(Validate)]
    #[validate(schema(function = "schema_check", skip_on_field_errors = false))]
    struct Inner {
        #[validate(length(min = 1, code = "too_small", message = "Too short"))]
        auth_type: String,
    }

    #[derive(Validate)]
    struct Outer {
        #[validate(nested)]
        neo4j_config: Inner,
    }

    #[test]
    fn test_flatten_nested_and_schema_errors() {
        let outer = Outer {
            neo4j_config: Inner {
                auth_type: String::new(),
            },
        };
        let errors = outer.validate().unwrap_err();
        let violations = flatten(&errors);

        assert_eq!(
            violations,
            vec![
                FieldViolation {
                    kind: "too_small".into(),
                    path: vec!["neo4jConfig".into(), "authType".into()],
                    message: "Too short".into(),
                },
                FieldViolation {
                    kind: "invalid_type".into(),
                    path: vec![
                        "neo4jConfig".into(),
                        "parameters".into(),
                        "userName".into()
                    ],
                    message: "Required".into(),
                },
            ]
        );
    }

    #[test]
    fn test_violation_serializes_kind_as_type() {
        let violation = FieldViolation {
            kind: "invalid_type".into(),
            path: vec!["mongo".into(), "uri".into()],
            message: "Required".into(),
        };
        let json = serde_json::to_value(&violation).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "invalid_type", "path": ["mongo", "uri"], "message": "Required"})
        );
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("auth_type"), "authType");
        assert_eq!(to_camel_case("base64_encoded_token"), "base64EncodedToken");
        assert_eq!(to_camel_case("url"), "url");
    }
}
