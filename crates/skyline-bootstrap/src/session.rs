//! Session builder.
//!
//! A session handle is a pre-authenticated client context for one credential
//! scope. Building one never touches the network. The compute and DNS scopes
//! use different key pairs and always get separate handles, even though they
//! share a region.

use std::fmt;

use skyline_common::constants::SESSION_MAX_RETRIES;
use skyline_common::error::{Result, SkylineError};
use skyline_common::types::Region;

/// Static access key pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key_id: String,
    secret_access_key: String,
}

impl Credentials {
    /// Creates a key pair.
    #[must_use]
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }

    /// Returns the access key id.
    #[must_use]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Returns the secret access key.
    #[must_use]
    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// API family a session is authorised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialScope {
    /// Compute and orchestration (autoscaling) APIs.
    Compute,
    /// DNS-zone management APIs.
    Dns,
}

impl fmt::Display for CredentialScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compute => write!(f, "compute"),
            Self::Dns => write!(f, "dns"),
        }
    }
}

/// Opaque client context bound to one credential scope and region.
#[derive(Debug, PartialEq, Eq)]
pub struct SessionHandle {
    scope: CredentialScope,
    credentials: Credentials,
    region: Region,
    max_retries: u32,
}

impl SessionHandle {
    /// Scope this session was built for.
    #[must_use]
    pub const fn scope(&self) -> CredentialScope {
        self.scope
    }

    /// Credentials the session signs requests with.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Region requests are addressed to.
    #[must_use]
    pub const fn region(&self) -> &Region {
        &self.region
    }

    /// Retry budget delegated to the underlying client.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

/// Builds a session for `scope` from `credentials` in `region`.
///
/// # Errors
///
/// Returns `SkylineError::Config` if either half of the key pair or the
/// region is empty.
pub fn build_session(
    scope: CredentialScope,
    credentials: Credentials,
    region: &Region,
) -> Result<SessionHandle> {
    if credentials.access_key_id.is_empty() || credentials.secret_access_key.is_empty() {
        return Err(SkylineError::Config {
            message: format!("{scope} credentials must have a non-empty access key and secret"),
        });
    }
    if region.as_str().is_empty() {
        return Err(SkylineError::Config {
            message: format!("{scope} session requires a region"),
        });
    }

    tracing::debug!(%scope, region = %region, "built session");
    Ok(SessionHandle {
        scope,
        credentials,
        region: region.clone(),
        max_retries: SESSION_MAX_RETRIES,
    })
}
