//! URL that has passed syntactic validation.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use url::Url;

use crate::utils::url_validator::is_valid_url;

/// A URL string accepted by [`is_valid_url`].
///
/// The only constructor is [`ValidatedUrl::parse`], so holding a value of this type
/// proves the string went through the validator. Deserialization re-validates, which
/// keeps a tampered or stale session record from smuggling an unchecked string in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ValidatedUrl(String);

impl ValidatedUrl {
    /// Validates `candidate` and wraps it on success.
    ///
    /// The string is kept exactly as submitted; no normalization is applied.
    pub fn parse(candidate: &str) -> Option<Self> {
        is_valid_url(candidate).then(|| Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Host component without userinfo or port, safe to log.
    pub fn host(&self) -> Option<String> {
        Url::parse(&self.0).ok()?.host_str().map(str::to_string)
    }
}

impl AsRef<str> for ValidatedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ValidatedUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid URL in record: {raw}")))
    }
}
