//! Anti-forgery token lookup.
//!
//! # Design
//! - Prefer the token rendered into the page's form markup.
//! - Fall back to the `csrftoken` cookie, URL-decoding its value.
//! - A missing token is fatal for the request; nothing is sent.

use std::fmt;

use crate::config::CredentialConfig;
use crate::core::dom::Dom;
use crate::core::error::ActionError;

/// Token value sent with mutating requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token value.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value for the request header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Credential(***)")
    }
}

/// Reads the token from the page field, else the cookie jar.
#[derive(Clone, Copy, Debug)]
pub struct CredentialResolver<'a> {
    field_name: &'a str,
    cookie_name: &'a str,
}

impl<'a> CredentialResolver<'a> {
    /// Resolver for the configured field and cookie names.
    #[must_use]
    pub fn new(config: &'a CredentialConfig) -> Self {
        Self {
            field_name: &config.field_name,
            cookie_name: &config.cookie_name,
        }
    }

    /// Locate a non-empty token.
    ///
    /// # Errors
    /// Returns [`ActionError::MissingCredential`] when neither source has one.
    pub fn resolve<D: Dom>(&self, dom: &D) -> Result<Credential, ActionError> {
        let selector = format!("[name={}]", self.field_name);
        let from_field = dom
            .query(&selector)
            .and_then(|field| dom.value(&field))
            .filter(|token| !token.trim().is_empty());
        if let Some(token) = from_field {
            return Ok(Credential(token));
        }
        cookie_value(&dom.cookies(), self.cookie_name)
            .filter(|token| !token.is_empty())
            .map(Credential)
            .ok_or(ActionError::MissingCredential)
    }
}

/// Value of the cookie literally named `name`, URL-decoded.
///
/// A value that does not decode as UTF-8 is returned as-is.
#[must_use]
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| {
            urlencoding::decode(raw).map_or_else(|_| raw.to_string(), |value| value.into_owned())
        })
}
