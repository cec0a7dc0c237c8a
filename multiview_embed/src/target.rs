// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::str::FromStr;

use url::Url;

/// Why a target URL was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidUrl {
    /// Nothing but whitespace was entered.
    #[error("no URL entered")]
    Empty,
    /// The text is not an absolute URL.
    #[error("malformed URL: {0}")]
    Malformed(#[from] url::ParseError),
    /// The URL is absolute but not `http` or `https`.
    #[error("unsupported scheme `{0}`, expected http or https")]
    UnsupportedScheme(String),
    /// The URL has no host to load from.
    #[error("URL has no host")]
    MissingHost,
}

/// An absolute `http`/`https` URL that frames may be pointed at.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TargetUrl(Url);

impl TargetUrl {
    /// Strictly parses user input.
    ///
    /// Surrounding whitespace is ignored. Scheme-less input such as
    /// `example.com` is rejected as [`InvalidUrl::Malformed`] rather than
    /// guessed at.
    pub fn parse(raw: &str) -> Result<Self, InvalidUrl> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidUrl::Empty);
        }
        let url = Url::parse(trimmed)?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(InvalidUrl::UnsupportedScheme(other.to_owned())),
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(InvalidUrl::MissingHost);
        }
        Ok(Self(url))
    }

    /// The normalized URL text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The parsed URL.
    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl FromStr for TargetUrl {
    type Err = InvalidUrl;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
