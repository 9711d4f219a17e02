//! Validated newtype wrappers for credentials.
//!
//! Both wrappers reject empty values on construction.

use crate::error::ConfigError;
use std::fmt;

/// A validated Algolia application ID.
///
/// The application ID is also the subdomain of every default host.
///
/// # Example
///
/// ```rust
/// use algolia_transport::ApplicationId;
///
/// let app_id = ApplicationId::new(" MY_APP ").unwrap();
/// assert_eq!(app_id.as_ref(), "MY_APP");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Creates a new validated application ID. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApplicationId`] if the ID is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        let id = id.trim();
        if id.is_empty() {
            return Err(ConfigError::EmptyApplicationId);
        }
        Ok(Self(id.to_string()))
    }
}

impl AsRef<str> for ApplicationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated Algolia API key.
///
/// The `Debug` implementation masks the key so it never ends up in logs.
///
/// ```rust
/// use algolia_transport::ApiKey;
///
/// let key = ApiKey::new("secret").unwrap();
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}
