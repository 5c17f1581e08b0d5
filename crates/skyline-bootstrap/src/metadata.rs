//! Cloud-local metadata service.
//!
//! The process learns its region and instance id from the instance identity
//! document. There is no local retry layer; whatever the HTTP client does is
//! what the caller gets.

use serde::{Deserialize, Serialize};
use skyline_common::constants::METADATA_IDENTITY_URL;
use skyline_common::error::{Result, SkylineError};

/// Identity and placement of the current instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceIdentity {
    /// Region the instance runs in.
    #[serde(default)]
    pub region: String,
    /// Instance identifier.
    #[serde(rename = "instanceId", default)]
    pub instance_id: String,
}

/// Read-only query against the metadata service.
pub trait MetadataService {
    /// Fetches the current instance identity.
    ///
    /// # Errors
    ///
    /// Returns `ExternalCallFailure` when the service cannot be reached and
    /// `MalformedResponse` when its answer cannot be decoded.
    fn identity(&self) -> Result<InstanceIdentity>;
}

/// Blocking HTTP client for the instance identity document.
#[derive(Debug, Clone)]
pub struct Ec2MetadataClient {
    url: String,
    http: reqwest::blocking::Client,
}

impl Ec2MetadataClient {
    /// Creates a client for the well-known metadata endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ExternalCallFailure` if the HTTP client cannot be set up.
    pub fn new() -> Result<Self> {
        Self::with_url(METADATA_IDENTITY_URL)
    }

    /// Creates a client for a custom identity document URL.
    ///
    /// # Errors
    ///
    /// Returns `ExternalCallFailure` if the HTTP client cannot be set up.
    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| SkylineError::external("failed to build metadata HTTP client", e))?;
        Ok(Self {
            url: url.into(),
            http,
        })
    }
}

impl MetadataService for Ec2MetadataClient {
    fn identity(&self) -> Result<InstanceIdentity> {
        tracing::debug!(url = %self.url, "querying metadata service");

        let response = self
            .http
            .get(&self.url)
            .send()
            .map_err(|e| SkylineError::external(format!("failed to query {}", self.url), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SkylineError::external(
                format!("metadata query to {}", self.url),
                format!("HTTP {status}"),
            ));
        }

        let body = response.text().map_err(|e| {
            SkylineError::external(format!("failed to read response body from {}", self.url), e)
        })?;

        serde_json::from_str(&body).map_err(|e| SkylineError::MalformedResponse {
            service: "metadata",
            detail: e.to_string(),
        })
    }
}
