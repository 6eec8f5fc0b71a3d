use std::borrow::Cow;
use std::fmt;
use zeroize::Zeroizing;

use crate::common::Secret;

/// Username/password pair embedded in a connection string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MongoCredentials {
    pub username: String,
    pub password: Secret,
}

/// Where a probe client should connect to.
///
/// The connection string is `scheme + uri`, or
/// `scheme + username:password@ + uri` when credentials are present. Both
/// parts of the userinfo are percent-encoded so characters like `@`, `:` or
/// `/` in a password cannot change where the string points.
///
/// `Display` renders the same string with the password replaced by
/// [`Secret::MASK`], including any userinfo already written into `uri`; use
/// it for logging. The real string is only available
/// through [`MongoTarget::connection_string`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MongoTarget {
    scheme: String,
    uri: String,
    credentials: Option<MongoCredentials>,
}

impl MongoTarget {
    pub fn new(scheme: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            uri: uri.into(),
            credentials: None,
        }
    }

    /// Target for a server listening on a unix domain socket.
    ///
    /// `uri` is the socket path, optionally followed by `/database` and
    /// `?options`. The driver only accepts `mongodb://` with a percent-encoded
    /// path ending in `.sock`, so the path is rewritten into that form.
    pub fn unix_socket(uri: &str) -> Self {
        let split = uri.find(".sock").map_or_else(
            || uri.find('?').unwrap_or(uri.len()),
            |start| start + ".sock".len(),
        );
        let (socket, rest) = uri.split_at(split);
        let (userinfo, path) = match socket.rfind('@') {
            Some(at) => socket.split_at(at + 1),
            None => ("", socket),
        };

        Self::new(
            UNIX_SCHEME,
            format!("{userinfo}{}{rest}", urlencoding::encode(path)),
        )
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: Secret) -> Self {
        self.credentials = Some(MongoCredentials {
            username: username.into(),
            password,
        });
        self
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn credentials(&self) -> Option<&MongoCredentials> {
        self.credentials.as_ref()
    }

    /// Full connection string including the raw password.
    ///
    /// The buffer is wiped when dropped.
    pub fn connection_string(&self) -> Zeroizing<String> {
        Zeroizing::new(self.render(|secret| urlencoding::encode(secret.expose()).into_owned()))
    }

    fn render(&self, password: impl Fn(&Secret) -> String) -> String {
        match &self.credentials {
            Some(creds) => format!(
                "{}{}:{}@{}",
                self.scheme,
                urlencoding::encode(&creds.username),
                password(&creds.password),
                self.uri
            ),
            None => format!("{}{}", self.scheme, self.uri),
        }
    }
}

impl fmt::Display for MongoTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked = Self {
            uri: mask_userinfo(&self.uri).into_owned(),
            ..self.clone()
        };
        f.write_str(&masked.render(|_| Secret::MASK.to_string()))
    }
}

const UNIX_SCHEME: &str = "mongodb://";

/// Replace the password of any `user:password@` prefix in `uri` with
/// [`Secret::MASK`]. A userinfo without `:` is masked whole.
///
/// `uri` is the part after the scheme, as submitted by a client.
pub fn mask_userinfo(uri: &str) -> Cow<'_, str> {
    let authority_end = uri.find(['/', '?']).unwrap_or(uri.len());
    let Some(at) = uri[..authority_end].rfind('@') else {
        return Cow::Borrowed(uri);
    };

    let masked = match uri[..at].split_once(':') {
        Some((user, _)) => format!("{user}:{}", Secret::MASK),
        None => Secret::MASK.to_string(),
    };
    Cow::Owned(format!("{masked}{}", &uri[at..]))
}
