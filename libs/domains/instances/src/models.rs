use database::{Secret, mongodb::MongoTarget, neo4j::Neo4jAuthToken};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumMessage, EnumString, IntoEnumIterator, VariantNames};
use utoipa::ToSchema;
use validator::Validate;

use crate::validation;

/// Neo4j URL scheme
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    EnumMessage,
    VariantNames,
    ToSchema,
)]
pub enum Neo4jScheme {
    /// Routing driver
    #[serde(rename = "neo4j://")]
    #[strum(serialize = "neo4j://", message = "Neo4j (routing)")]
    Neo4j,
    /// Direct connection to a single server
    #[serde(rename = "bolt://")]
    #[strum(serialize = "bolt://", message = "Bolt (direct)")]
    Bolt,
}

/// Neo4j authentication method
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    EnumMessage,
    VariantNames,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Neo4jAuthType {
    #[strum(message = "No authentication")]
    None,
    #[strum(message = "Username and password")]
    Basic,
    #[strum(message = "Bearer token")]
    Bearer,
    #[strum(message = "Kerberos ticket")]
    Kerberos,
}

/// MongoDB connection string scheme
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    EnumMessage,
    VariantNames,
    ToSchema,
)]
pub enum MongoScheme {
    #[serde(rename = "mongodb://")]
    #[strum(serialize = "mongodb://", message = "Standard")]
    Standard,
    /// DNS seed list, as used by Atlas
    #[serde(rename = "mongodb+srv://")]
    #[strum(serialize = "mongodb+srv://", message = "DNS seed list (SRV)")]
    Srv,
    #[serde(rename = "mongodb+unix://")]
    #[strum(serialize = "mongodb+unix://", message = "Unix socket")]
    Unix,
}

/// MongoDB authentication mechanism
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    EnumMessage,
    VariantNames,
    ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum MongoMechanism {
    #[strum(message = "SCRAM (username and password)")]
    Scram,
    #[strum(message = "No authentication")]
    None,
}

// ---------------------------------------------------------------------------
// Request body
//
// Every field is optional at the serde level so a missing field becomes a
// violation in the 422 report instead of a deserialization failure.
// ---------------------------------------------------------------------------

/// Body of `POST /instance/check-connection`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CheckConnectionRequest {
    #[validate(required(code = "invalid_type", message = "Required"), nested)]
    pub neo4j: Option<Neo4jAuthConfiguration>,

    #[validate(required(code = "invalid_type", message = "Required"), nested)]
    pub mongo: Option<MongoAuthConfiguration>,
}

/// How to reach and authenticate against Neo4j
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(
    function = "validation::validate_neo4j_parameters",
    skip_on_field_errors = false
))]
pub struct Neo4jAuthConfiguration {
    /// Host and port, without scheme (e.g. `localhost:7687`)
    #[validate(required(code = "invalid_type", message = "Required"))]
    pub url: Option<String>,

    #[validate(
        required(code = "invalid_type", message = "Required"),
        custom(function = "validation::validate_neo4j_scheme")
    )]
    #[schema(value_type = Option<Neo4jScheme>)]
    pub scheme: Option<String>,

    #[validate(
        required(code = "invalid_type", message = "Required"),
        custom(function = "validation::validate_neo4j_auth_type")
    )]
    #[schema(value_type = Option<Neo4jAuthType>)]
    pub auth_type: Option<String>,

    /// Shape depends on `authType`
    pub parameters: Option<AuthParameters>,
}

/// How to reach and authenticate against MongoDB
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(
    function = "validation::validate_mongo_parameters",
    skip_on_field_errors = false
))]
pub struct MongoAuthConfiguration {
    /// Everything after the scheme (e.g. `localhost:27017/admin`)
    #[validate(required(code = "invalid_type", message = "Required"))]
    pub uri: Option<String>,

    #[validate(
        required(code = "invalid_type", message = "Required"),
        custom(function = "validation::validate_mongo_scheme")
    )]
    #[schema(value_type = Option<MongoScheme>)]
    pub scheme: Option<String>,

    #[validate(
        required(code = "invalid_type", message = "Required"),
        custom(function = "validation::validate_mongo_mechanism")
    )]
    #[schema(value_type = Option<MongoMechanism>)]
    pub mechanism: Option<String>,

    /// Required for `SCRAM`, ignored for `NONE`
    pub parameters: Option<AuthParameters>,
}

/// Union of every credential field an auth method may use.
///
/// Which fields are required is decided by the auth method:
/// - basic / SCRAM: `username`, `password`
/// - bearer: `base64EncodedToken`
/// - kerberos: `base64EncodedTicket`
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64_encoded_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64_encoded_ticket: Option<String>,
}

impl fmt::Debug for AuthParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |v: &Option<String>| v.as_ref().map(|_| Secret::MASK);
        f.debug_struct("AuthParameters")
            .field("username", &self.username)
            .field("password", &mask(&self.password))
            .field("base64_encoded_token", &mask(&self.base64_encoded_token))
            .field("base64_encoded_ticket", &mask(&self.base64_encoded_ticket))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Validated configuration
// ---------------------------------------------------------------------------

/// A request that passed validation.
///
/// Built with `InstanceConnectionConfig::try_from(CheckConnectionRequest)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceConnectionConfig {
    pub neo4j: Neo4jConnectionConfig,
    pub mongo: MongoConnectionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neo4jConnectionConfig {
    pub url: String,
    pub scheme: Neo4jScheme,
    pub auth: Neo4jAuth,
}

impl Neo4jConnectionConfig {
    /// Scheme and host joined into the driver URL.
    pub fn driver_url(&self) -> String {
        format!("{}{}", self.scheme, self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Neo4jAuth {
    None,
    Basic { username: String, password: Secret },
    Bearer { token: Secret },
    Kerberos { ticket: Secret },
}

impl Neo4jAuth {
    pub fn auth_type(&self) -> Neo4jAuthType {
        match self {
            Self::None => Neo4jAuthType::None,
            Self::Basic { .. } => Neo4jAuthType::Basic,
            Self::Bearer { .. } => Neo4jAuthType::Bearer,
            Self::Kerberos { .. } => Neo4jAuthType::Kerberos,
        }
    }

    pub fn token(&self) -> Neo4jAuthToken {
        match self {
            Self::None => Neo4jAuthToken::none(),
            Self::Basic { username, password } => {
                Neo4jAuthToken::basic(username.clone(), password.clone())
            }
            Self::Bearer { token } => Neo4jAuthToken::bearer(token.clone()),
            Self::Kerberos { ticket } => Neo4jAuthToken::kerberos(ticket.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConnectionConfig {
    pub uri: String,
    pub scheme: MongoScheme,
    pub auth: MongoAuth,
}

impl MongoConnectionConfig {
    /// Where the probe client connects to.
    ///
    /// `mongodb+unix://` is not a scheme the driver parses; it becomes a
    /// `mongodb://` target with an encoded socket path.
    pub fn target(&self) -> MongoTarget {
        let target = match self.scheme {
            MongoScheme::Unix => MongoTarget::unix_socket(&self.uri),
            MongoScheme::Standard | MongoScheme::Srv => {
                MongoTarget::new(self.scheme.to_string(), self.uri.clone())
            }
        };
        match &self.auth {
            MongoAuth::None => target,
            MongoAuth::Scram { username, password } => {
                target.with_credentials(username.clone(), password.clone())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MongoAuth {
    None,
    Scram { username: String, password: Secret },
}

impl MongoAuth {
    pub fn mechanism(&self) -> MongoMechanism {
        match self {
            Self::None => MongoMechanism::None,
            Self::Scram { .. } => MongoMechanism::Scram,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Scram { username, .. } => Some(username),
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Outcome of probing both databases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatus {
    pub mongo_connected: bool,
    pub neo4j_connected: bool,
}

impl ConnectionStatus {
    pub fn all_connected(&self) -> bool {
        self.mongo_connected && self.neo4j_connected
    }
}

/// A selectable value with its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OptionEntry {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Neo4jOptions {
    pub schemes: Vec<OptionEntry>,
    pub auth_types: Vec<OptionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MongoOptions {
    pub schemes: Vec<OptionEntry>,
    pub mechanisms: Vec<OptionEntry>,
}

/// Every scheme and auth method the check-connection endpoint accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConnectionOptions {
    pub neo4j: Neo4jOptions,
    pub mongo: MongoOptions,
}

impl ConnectionOptions {
    pub fn catalog() -> Self {
        Self {
            neo4j: Neo4jOptions {
                schemes: entries::<Neo4jScheme>(),
                auth_types: entries::<Neo4jAuthType>(),
            },
            mongo: MongoOptions {
                schemes: entries::<MongoScheme>(),
                mechanisms: entries::<MongoMechanism>(),
            },
        }
    }
}

fn entries<E>() -> Vec<OptionEntry>
where
    E: IntoEnumIterator + EnumMessage + fmt::Display,
{
    E::iter()
        .map(|variant| OptionEntry {
            value: variant.to_string(),
            label: variant
                .get_message()
                .map(str::to_string)
                .unwrap_or_else(|| variant.to_string()),
        })
        .collect()
}
