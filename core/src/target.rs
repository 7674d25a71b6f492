//! URL parsing into the pieces a single HTTP exchange needs.

use std::fmt;

use url::Url;

use crate::error::ClientError;

/// Transport scheme. `Https` means the connection is wrapped in TLS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed absolute http(s) URL.
///
/// `path` always starts with `/` and carries the query string, if any, so it
/// can be used verbatim as a request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
    pub path: String,
    url: Url,
}

impl Target {
    pub fn parse(input: &str) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::Url {
            url: input.to_string(),
            reason,
        };

        let mut url = Url::parse(input.trim()).map_err(|e| invalid(e.to_string()))?;
        url.set_fragment(None);

        let scheme = match url.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            other => return Err(invalid(format!("unsupported scheme `{other}`"))),
        };

        let host = match url.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(invalid("missing host".to_string())),
        };

        let port = url.port().unwrap_or_else(|| scheme.default_port());

        let mut path = url.path().to_string();
        if path.is_empty() {
            path.push('/');
        }
        if let Some(query) = url.query() {
            path.push('?');
            path.push_str(query);
        }

        Ok(Self {
            scheme,
            host,
            port,
            path,
            url,
        })
    }

    /// The normalized absolute URL, fragment removed.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
