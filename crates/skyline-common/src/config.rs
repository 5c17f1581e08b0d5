//! Configuration input surface.
//!
//! [`ConfigInput`] is what the external loader hands to the bootstrap
//! resolver. Each key is a long flag with a `SKYLINE_*` environment fallback
//! and a tag-style default, so precedence is default < environment < flag.
//! The resolver layers its own provider chain on top of these values.

use std::fmt;

use clap::Args;

use crate::constants::{DEFAULT_HOSTED_ZONE_CALLER_REFERENCE, DEFAULT_HOSTED_ZONE_NAME};

/// Hosted DNS zone the process manages records in.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct HostedZone {
    /// Name of the hosted zone.
    #[arg(
        long = "hosted-zone-name",
        env = "SKYLINE_HOSTED_ZONE_NAME",
        default_value = DEFAULT_HOSTED_ZONE_NAME
    )]
    pub name: String,

    /// Caller reference used when the zone is created.
    #[arg(
        long = "hosted-zone-caller-reference",
        env = "SKYLINE_HOSTED_ZONE_CALLER_REFERENCE",
        default_value = DEFAULT_HOSTED_ZONE_CALLER_REFERENCE
    )]
    pub caller_reference: String,
}

impl Default for HostedZone {
    fn default() -> Self {
        Self {
            name: DEFAULT_HOSTED_ZONE_NAME.to_string(),
            caller_reference: DEFAULT_HOSTED_ZONE_CALLER_REFERENCE.to_string(),
        }
    }
}

/// Already-merged explicit configuration values.
#[derive(Args, Clone, PartialEq, Eq)]
pub struct ConfigInput {
    /// Access key for the compute / orchestration APIs.
    #[arg(long, env = "SKYLINE_ACCESS_KEY_ID")]
    pub access_key_id: String,

    /// Secret key for the compute / orchestration APIs.
    #[arg(long, env = "SKYLINE_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: String,

    /// Access key for the DNS-zone APIs.
    #[arg(long, env = "SKYLINE_DNS_ACCESS_KEY_ID")]
    pub dns_access_key_id: String,

    /// Secret key for the DNS-zone APIs.
    #[arg(long, env = "SKYLINE_DNS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub dns_secret_access_key: String,

    /// Cloud region; discovered from the metadata service when unset.
    #[arg(long, env = "SKYLINE_REGION")]
    pub region: Option<String>,

    /// Deployment environment name; read from `EB_ENV_NAME` when unset.
    #[arg(long, env = "SKYLINE_ENVIRONMENT_NAME")]
    pub environment_name: Option<String>,

    /// Autoscaling group name; looked up from the instance identity when unset.
    #[arg(long, env = "SKYLINE_AUTOSCALING_NAME")]
    pub autoscaling_name: Option<String>,

    /// Hosted zone settings.
    #[command(flatten)]
    pub hosted_zone: HostedZone,

    /// Enable debug behaviour.
    #[arg(long, env = "SKYLINE_DEBUG")]
    pub debug: bool,
}

impl ConfigInput {
    /// Creates an input with both credential pairs and every optional key unset.
    #[must_use]
    pub fn with_credentials(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        dns_access_key_id: impl Into<String>,
        dns_secret_access_key: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            dns_access_key_id: dns_access_key_id.into(),
            dns_secret_access_key: dns_secret_access_key.into(),
            region: None,
            environment_name: None,
            autoscaling_name: None,
            hosted_zone: HostedZone::default(),
            debug: false,
        }
    }
}

impl fmt::Debug for ConfigInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigInput")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("dns_access_key_id", &self.dns_access_key_id)
            .field("dns_secret_access_key", &"<redacted>")
            .field("region", &self.region)
            .field("environment_name", &self.environment_name)
            .field("autoscaling_name", &self.autoscaling_name)
            .field("hosted_zone", &self.hosted_zone)
            .field("debug", &self.debug)
            .finish()
    }
}
