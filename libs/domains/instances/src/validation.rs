//! Rules behind the `Validate` derives in [`models`](crate::models) and the
//! conversion of a validated request into typed configuration.
//!
//! Violation codes follow the usual schema-validator vocabulary
//! (`invalid_type`, `invalid_enum_value`, `too_small`) so clients can switch
//! on them.

use axum_helpers::errors::violations::FIELD_PARAM;
use database::Secret;
use serde_json::Value;
use std::borrow::Cow;
use std::str::FromStr;
use strum::VariantNames;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{InstanceError, InstanceResult};
use crate::models::{
    AuthParameters, CheckConnectionRequest, InstanceConnectionConfig, MongoAuth,
    MongoAuthConfiguration, MongoConnectionConfig, MongoMechanism, MongoScheme, Neo4jAuth,
    Neo4jAuthConfiguration, Neo4jAuthType, Neo4jConnectionConfig, Neo4jScheme,
};

const REQUIRED: &str = "Required";

pub(crate) fn validate_neo4j_scheme(value: &str) -> Result<(), ValidationError> {
    one_of::<Neo4jScheme>(value)
}

pub(crate) fn validate_neo4j_auth_type(value: &str) -> Result<(), ValidationError> {
    one_of::<Neo4jAuthType>(value)
}

pub(crate) fn validate_mongo_scheme(value: &str) -> Result<(), ValidationError> {
    one_of::<MongoScheme>(value)
}

pub(crate) fn validate_mongo_mechanism(value: &str) -> Result<(), ValidationError> {
    one_of::<MongoMechanism>(value)
}

/// Parameters must carry exactly what `authType` needs.
///
/// Skipped when `authType` itself is missing or invalid; that is already
/// reported on the field.
pub(crate) fn validate_neo4j_parameters(
    config: &Neo4jAuthConfiguration,
) -> Result<(), ValidationError> {
    let Some(auth_type) = parse::<Neo4jAuthType>(config.auth_type.as_deref()) else {
        return Ok(());
    };

    let params = config.parameters.as_ref();
    match auth_type {
        Neo4jAuthType::None => Ok(()),
        Neo4jAuthType::Basic => {
            require(params, "username", |p| &p.username)?;
            require(params, "password", |p| &p.password)
        }
        Neo4jAuthType::Bearer => require(params, "base64_encoded_token", |p| {
            &p.base64_encoded_token
        }),
        Neo4jAuthType::Kerberos => require(params, "base64_encoded_ticket", |p| {
            &p.base64_encoded_ticket
        }),
    }
}

/// `SCRAM` needs a username and password; `NONE` ignores parameters.
pub(crate) fn validate_mongo_parameters(
    config: &MongoAuthConfiguration,
) -> Result<(), ValidationError> {
    match parse::<MongoMechanism>(config.mechanism.as_deref()) {
        Some(MongoMechanism::Scram) => {
            let params = config.parameters.as_ref();
            require(params, "username", |p| &p.username)?;
            require(params, "password", |p| &p.password)
        }
        Some(MongoMechanism::None) | None => Ok(()),
    }
}

fn one_of<E: FromStr + VariantNames>(value: &str) -> Result<(), ValidationError> {
    if E::from_str(value).is_ok() {
        return Ok(());
    }

    let expected = E::VARIANTS
        .iter()
        .map(|v| format!("'{v}'"))
        .collect::<Vec<_>>()
        .join(" | ");
    let mut error = ValidationError::new("invalid_enum_value");
    error.message = Some(Cow::Owned(format!(
        "Invalid enum value. Expected {expected}, received '{value}'"
    )));
    error.add_param(Cow::Borrowed("received"), &value);
    Err(error)
}

fn parse<E: FromStr>(value: Option<&str>) -> Option<E> {
    value.and_then(|v| E::from_str(v).ok())
}

fn require(
    params: Option<&AuthParameters>,
    field: &'static str,
    pick: impl Fn(&AuthParameters) -> &Option<String>,
) -> Result<(), ValidationError> {
    let Some(params) = params else {
        return Err(violation("invalid_type", "parameters", REQUIRED));
    };

    match pick(params) {
        None => Err(violation(
            "invalid_type",
            &format!("parameters.{field}"),
            REQUIRED,
        )),
        Some(value) if value.is_empty() => Err(violation(
            "too_small",
            &format!("parameters.{field}"),
            "String must contain at least 1 character(s)",
        )),
        Some(_) => Ok(()),
    }
}

fn violation(code: &'static str, field: &str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error.add_param(Cow::Borrowed(FIELD_PARAM), &field);
    error
}

/// A field that `validate()` accepted could not be read back. Reported as a
/// violation on that field rather than a panic.
fn unreadable(field: &'static str) -> InstanceError {
    let mut errors = ValidationErrors::new();
    let mut error = ValidationError::new("invalid_type");
    error.message = Some(Cow::Borrowed(REQUIRED));
    errors.add(field, error);
    InstanceError::Validation(errors)
}

fn field<T>(value: Option<T>, name: &'static str) -> InstanceResult<T> {
    value.ok_or_else(|| unreadable(name))
}

fn enum_field<E: FromStr>(value: Option<String>, name: &'static str) -> InstanceResult<E> {
    parse(value.as_deref()).ok_or_else(|| unreadable(name))
}

fn secret(value: Option<String>, name: &'static str) -> InstanceResult<Secret> {
    field(value, name).map(Secret::from)
}

// ---------------------------------------------------------------------------
// JSON shape
//
// Runs on the raw body before typed deserialization, so a value of the wrong
// JSON type is reported with its path like every other violation. Messages
// name the types only; the submitted value is never echoed.
// ---------------------------------------------------------------------------

/// Expected JSON type of a known field
enum Shape {
    Text,
    Object(&'static [(&'static str, Shape)]),
}

const PARAMETERS: &[(&str, Shape)] = &[
    ("username", Shape::Text),
    ("password", Shape::Text),
    ("base64EncodedToken", Shape::Text),
    ("base64EncodedTicket", Shape::Text),
];

const NEO4J: &[(&str, Shape)] = &[
    ("url", Shape::Text),
    ("scheme", Shape::Text),
    ("authType", Shape::Text),
    ("parameters", Shape::Object(PARAMETERS)),
];

const MONGO: &[(&str, Shape)] = &[
    ("uri", Shape::Text),
    ("scheme", Shape::Text),
    ("mechanism", Shape::Text),
    ("parameters", Shape::Object(PARAMETERS)),
];

const REQUEST: &[(&str, Shape)] = &[
    ("neo4j", Shape::Object(NEO4J)),
    ("mongo", Shape::Object(MONGO)),
];

/// Key `validator` files struct-level errors under; `flatten` resolves the
/// path from the error's `field` param.
const ROOT: &str = "__all__";

impl CheckConnectionRequest {
    /// Read a request from an already parsed JSON body.
    ///
    /// Fails with an `invalid_type` violation for every known field holding
    /// the wrong JSON type. `null` counts as absent and is left to the
    /// `required` rules.
    pub fn from_json(body: Value) -> InstanceResult<Self> {
        let mut errors = ValidationErrors::new();
        check_object(&body, REQUEST, &mut Vec::new(), &mut errors);
        if !errors.errors().is_empty() {
            return Err(InstanceError::Validation(errors));
        }

        serde_json::from_value(body).map_err(|_| {
            let mut errors = ValidationErrors::new();
            errors.add(ROOT, type_mismatch(&[], "object", "unknown"));
            InstanceError::Validation(errors)
        })
    }
}

fn check_object(
    value: &Value,
    fields: &'static [(&'static str, Shape)],
    path: &mut Vec<&'static str>,
    errors: &mut ValidationErrors,
) {
    let Some(object) = value.as_object() else {
        errors.add(ROOT, type_mismatch(path, "object", json_type(value)));
        return;
    };

    for (name, shape) in fields {
        let Some(field) = object.get(*name).filter(|v| !v.is_null()) else {
            continue;
        };

        path.push(*name);
        match shape {
            Shape::Text if !field.is_string() => {
                errors.add(ROOT, type_mismatch(path, "string", json_type(field)));
            }
            Shape::Text => {}
            Shape::Object(nested) => check_object(field, *nested, path, errors),
        }
        path.pop();
    }
}

fn type_mismatch(path: &[&str], expected: &str, received: &str) -> ValidationError {
    let mut error = ValidationError::new("invalid_type");
    error.message = Some(Cow::Owned(format!(
        "Expected {expected}, received {received}"
    )));
    error.add_param(Cow::Borrowed(FIELD_PARAM), &path.join("."));
    error
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl TryFrom<CheckConnectionRequest> for InstanceConnectionConfig {
    type Error = InstanceError;

    fn try_from(request: CheckConnectionRequest) -> Result<Self, Self::Error> {
        request.validate()?;

        Ok(Self {
            neo4j: field(request.neo4j, "neo4j")?.try_into()?,
            mongo: field(request.mongo, "mongo")?.try_into()?,
        })
    }
}

impl TryFrom<Neo4jAuthConfiguration> for Neo4jConnectionConfig {
    type Error = InstanceError;

    fn try_from(config: Neo4jAuthConfiguration) -> Result<Self, Self::Error> {
        let auth_type: Neo4jAuthType = enum_field(config.auth_type, "auth_type")?;
        let params = config.parameters.unwrap_or_default();

        let auth = match auth_type {
            Neo4jAuthType::None => Neo4jAuth::None,
            Neo4jAuthType::Basic => Neo4jAuth::Basic {
                username: field(params.username, "username")?,
                password: secret(params.password, "password")?,
            },
            Neo4jAuthType::Bearer => Neo4jAuth::Bearer {
                token: secret(params.base64_encoded_token, "base64_encoded_token")?,
            },
            Neo4jAuthType::Kerberos => Neo4jAuth::Kerberos {
                ticket: secret(params.base64_encoded_ticket, "base64_encoded_ticket")?,
            },
        };

        Ok(Self {
            url: field(config.url, "url")?,
            scheme: enum_field(config.scheme, "scheme")?,
            auth,
        })
    }
}

impl TryFrom<MongoAuthConfiguration> for MongoConnectionConfig {
    type Error = InstanceError;

    fn try_from(config: MongoAuthConfiguration) -> Result<Self, Self::Error> {
        let mechanism: MongoMechanism = enum_field(config.mechanism, "mechanism")?;

        let auth = match mechanism {
            MongoMechanism::None => MongoAuth::None,
            MongoMechanism::Scram => {
                let params = config.parameters.unwrap_or_default();
                MongoAuth::Scram {
                    username: field(params.username, "username")?,
                    password: secret(params.password, "password")?,
                }
            }
        };

        Ok(Self {
            uri: field(config.uri, "uri")?,
            scheme: enum_field(config.scheme, "scheme")?,
            auth,
        })
    }
}
