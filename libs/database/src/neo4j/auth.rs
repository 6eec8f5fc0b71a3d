use neo4j::driver::auth::AuthToken;
use std::fmt;

use crate::common::Secret;

/// Credentials presented to a Neo4j server during the Bolt handshake.
///
/// Mirrors the four token builders of the driver. Credentials are kept in
/// [`Secret`] so the token can be logged as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Neo4jAuthToken {
    None,
    Basic { username: String, password: Secret },
    Bearer { token: Secret },
    Kerberos { ticket: Secret },
}

impl Neo4jAuthToken {
    pub fn none() -> Self {
        Self::None
    }

    pub fn basic(username: impl Into<String>, password: impl Into<Secret>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// `token` is the base64 encoded bearer token (e.g. an SSO JWT).
    pub fn bearer(token: impl Into<Secret>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// `ticket` is the base64 encoded kerberos ticket.
    pub fn kerberos(ticket: impl Into<Secret>) -> Self {
        Self::Kerberos {
            ticket: ticket.into(),
        }
    }

    /// Bolt auth scheme name as sent to the server.
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic { .. } => "basic",
            Self::Bearer { .. } => "bearer",
            Self::Kerberos { .. } => "kerberos",
        }
    }

    pub(crate) fn to_driver_token(&self) -> AuthToken {
        match self {
            Self::None => AuthToken::new_none_auth(),
            Self::Basic { username, password } => {
                AuthToken::new_basic_auth(username.as_str(), password.expose())
            }
            Self::Bearer { token } => AuthToken::new_bearer_auth(token.expose()),
            Self::Kerberos { ticket } => AuthToken::new_kerberos_auth(ticket.expose()),
        }
    }
}

impl fmt::Display for Neo4jAuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => write!(f, "basic({username})"),
            other => f.write_str(other.scheme()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_builders() {
        assert_eq!(Neo4jAuthToken::none(), Neo4jAuthToken::None);
        assert_eq!(
            Neo4jAuthToken::basic("neo4j", "pw"),
            Neo4jAuthToken::Basic {
                username: "neo4j".into(),
                password: Secret::new("pw"),
            }
        );
        assert_eq!(
            Neo4jAuthToken::bearer("dG9rZW4="),
            Neo4jAuthToken::Bearer {
                token: Secret::new("dG9rZW4="),
            }
        );
        assert_eq!(
            Neo4jAuthToken::kerberos("dGlja2V0"),
            Neo4jAuthToken::Kerberos {
                ticket: Secret::new("dGlja2V0"),
            }
        );
    }

    #[test]
    fn test_token_scheme() {
        assert_eq!(Neo4jAuthToken::none().scheme(), "none");
        assert_eq!(Neo4jAuthToken::basic("u", "p").scheme(), "basic");
        assert_eq!(Neo4jAuthToken::bearer("t").scheme(), "bearer");
        assert_eq!(Neo4jAuthToken::kerberos("k").scheme(), "kerberos");
    }

    #[test]
    fn test_token_never_prints_credentials() {
        let tokens = [
            Neo4jAuthToken::basic("neo4j", "hunter2"),
            Neo4jAuthToken::bearer("hunter2"),
            Neo4jAuthToken::kerberos("hunter2"),
        ];
        for token in tokens {
            assert!(!format!("{token}").contains("hunter2"));
            assert!(!format!("{token:?}").contains("hunter2"));
        }
        assert_eq!(Neo4jAuthToken::basic("neo4j", "x").to_string(), "basic(neo4j)");
    }
}
