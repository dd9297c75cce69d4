//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The URL scheme used to reach the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Plain HTTP (default port 80).
    Http,
    /// HTTP over TLS (default port 443).
    Https,
}

impl Scheme {
    /// Returns the lowercase scheme name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    /// Returns the port used when none (or an invalid one) is supplied.
    #[must_use]
    pub const fn default_port(&self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }
}

/// A validated service base URL.
///
/// Accepts `[scheme://]host[:port]`. The scheme defaults to `http`. A
/// missing, non-numeric or out-of-range port falls back to 80 or 443
/// depending on the scheme. Anything after the host and port is ignored.
///
/// # Example
///
/// ```rust
/// use flapjack_diner::{BaseUrl, Scheme};
///
/// let url = BaseUrl::new("localhost:19081").unwrap();
/// assert_eq!(url.scheme(), Scheme::Http);
/// assert_eq!(url.host(), "localhost");
/// assert_eq!(url.port(), 19081);
///
/// let url = BaseUrl::new("HTTPS://flapjack.example.com:99999").unwrap();
/// assert_eq!(url.port(), 443);
/// assert_eq!(url.to_string(), "https://flapjack.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    scheme: Scheme,
    host: String,
    port: u16,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if no valid host can be found
    /// or the scheme is neither `http` nor `https`.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim();
        let invalid = || ConfigError::InvalidBaseUrl { url: url.clone() };

        let (scheme, rest) = match trimmed.find("://") {
            Some(idx) => {
                let scheme = match trimmed[..idx].to_ascii_lowercase().as_str() {
                    "http" => Scheme::Http,
                    "https" => Scheme::Https,
                    _ => return Err(invalid()),
                };
                (scheme, &trimmed[idx + 3..])
            }
            None => (Scheme::Http, trimmed),
        };

        let host_end = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '.' || c == '-'))
            .unwrap_or(rest.len());
        let host = &rest[..host_end];
        if !Self::is_valid_host(host) {
            return Err(invalid());
        }

        let port = rest[host_end..]
            .strip_prefix(':')
            .map(|after| {
                let digits_end = after
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(after.len());
                &after[..digits_end]
            })
            .and_then(|digits| digits.parse::<u32>().ok())
            .and_then(|port| u16::try_from(port).ok())
            .filter(|port| *port >= 1)
            .unwrap_or_else(|| scheme.default_port());

        Ok(Self {
            scheme,
            host: host.to_string(),
            port,
        })
    }

    /// Returns the URL scheme.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Returns the host name.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port (always set, defaulted by scheme).
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Joins a path and an optional, already-encoded query string onto this base.
    ///
    /// ```rust
    /// use flapjack_diner::BaseUrl;
    ///
    /// let url = BaseUrl::new("localhost:19081").unwrap();
    /// assert_eq!(url.join("/rules", None), "http://localhost:19081/rules");
    /// assert_eq!(
    ///     url.join("/rules", Some("page=2")),
    ///     "http://localhost:19081/rules?page=2"
    /// );
    /// ```
    #[must_use]
    pub fn join(&self, path: &str, query: Option<&str>) -> String {
        match query.filter(|q| !q.is_empty()) {
            Some(query) => format!("{self}{path}?{query}"),
            None => format!("{self}{path}"),
        }
    }

    fn is_valid_host(host: &str) -> bool {
        let starts_ok = host.chars().next().is_some_and(|c| c.is_ascii_alphanumeric());
        let ends_ok = host.chars().last().is_some_and(|c| c.is_ascii_alphanumeric());
        starts_ok && ends_ok
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.port == self.scheme.default_port() {
            write!(f, "{}://{}", self.scheme.as_str(), self.host)
        } else {
            write!(f, "{}://{}:{}", self.scheme.as_str(), self.host, self.port)
        }
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_only_defaults_to_http_port_80() {
        let url = BaseUrl::new("localhost").unwrap();
        assert_eq!(url.scheme(), Scheme::Http);
        assert_eq!(url.host(), "localhost");
        assert_eq!(url.port(), 80);
        assert_eq!(url.to_string(), "http://localhost");
    }

    #[test]
    fn test_https_without_port_defaults_to_443() {
        let url = BaseUrl::new("https://flapjack.example.com").unwrap();
        assert_eq!(url.scheme(), Scheme::Https);
        assert_eq!(url.port(), 443);
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let url = BaseUrl::new("HTTPS://example.com:8443").unwrap();
        assert_eq!(url.scheme(), Scheme::Https);
        assert_eq!(url.port(), 8443);
        assert_eq!(url.to_string(), "https://example.com:8443");
    }

    #[test]
    fn test_explicit_port_is_kept() {
        let url = BaseUrl::new("localhost:19081").unwrap();
        assert_eq!(url.port(), 19081);
        assert_eq!(url.to_string(), "http://localhost:19081");
    }

    #[test]
    fn test_out_of_range_port_falls_back_to_default() {
        assert_eq!(BaseUrl::new("localhost:0").unwrap().port(), 80);
        assert_eq!(BaseUrl::new("localhost:70000").unwrap().port(), 80);
        assert_eq!(BaseUrl::new("https://localhost:0").unwrap().port(), 443);
    }

    #[test]
    fn test_non_numeric_port_falls_back_to_default() {
        assert_eq!(BaseUrl::new("localhost:abc").unwrap().port(), 80);
    }

    #[test]
    fn test_trailing_path_is_ignored() {
        let url = BaseUrl::new("http://example.com:3081/jsonapi").unwrap();
        assert_eq!(url.host(), "example.com");
        assert_eq!(url.port(), 3081);
    }

    #[test]
    fn test_invalid_hosts_are_rejected() {
        assert!(BaseUrl::new("").is_err());
        assert!(BaseUrl::new("http://").is_err());
        assert!(BaseUrl::new("-bad.example.com").is_err());
        assert!(BaseUrl::new("ftp://example.com").is_err());
    }

    #[test]
    fn test_join_skips_empty_query() {
        let url = BaseUrl::new("localhost:19081").unwrap();
        assert_eq!(url.join("/tags", Some("")), "http://localhost:19081/tags");
    }

    #[test]
    fn test_serde_round_trip_uses_display_form() {
        let url = BaseUrl::new("localhost:19081").unwrap();
        let json = serde_json::to_string(&url).unwrap();
        assert_eq!(json, r#""http://localhost:19081""#);
        let back: BaseUrl = serde_json::from_str(&json).unwrap();
        assert_eq!(back, url);
    }
}
