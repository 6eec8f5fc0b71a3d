use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A credential value (password, bearer token, kerberos ticket).
///
/// The backing buffer is wiped on drop, and `Debug`/`Display` print
/// [`Secret::MASK`] so a secret cannot leak through `tracing` fields or
/// error messages. Use [`Secret::expose`] only at the point where a driver
/// needs the raw value.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret(String);

impl Secret {
    pub const MASK: &'static str = "********";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::MASK)
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::MASK)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_is_masked_in_debug_and_display() {
        let secret = Secret::new("hunter2");
        assert_eq!(format!("{:?}", secret), Secret::MASK);
        assert_eq!(format!("{}", secret), Secret::MASK);
        assert!(!format!("{:?}", Some(&secret)).contains("hunter2"));
    }

    #[test]
    fn test_secret_exposes_raw_value() {
        let secret: Secret = "hunter2".into();
        assert_eq!(secret.expose(), "hunter2");
        assert!(!secret.is_empty());
        assert!(Secret::new("").is_empty());
    }
}
