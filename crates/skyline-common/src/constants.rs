//! System-wide constants and defaults.

/// Instance identity document served by the cloud-local metadata endpoint.
pub const METADATA_IDENTITY_URL: &str =
    "http://169.254.169.254/latest/dynamic/instance-identity/document";

/// Environment variable holding the deployment environment name.
pub const ENV_NAME_VAR: &str = "EB_ENV_NAME";

/// Default hosted DNS zone managed by the process.
pub const DEFAULT_HOSTED_ZONE_NAME: &str = "t.koding.com";

/// Default caller reference used when the hosted zone is created.
pub const DEFAULT_HOSTED_ZONE_CALLER_REFERENCE: &str = "tunnelproxy_hosted_zone_v0";

/// Retry budget handed to the cloud client for each session.
pub const SESSION_MAX_RETRIES: u32 = 5;

/// Configuration key names, used in errors and logs.
pub mod keys {
    /// Cloud region.
    pub const REGION: &str = "region";
    /// Deployment environment name.
    pub const ENVIRONMENT_NAME: &str = "environment_name";
    /// Autoscaling group name.
    pub const AUTOSCALING_NAME: &str = "autoscaling_name";
}

/// Interaction kind recorded when an account likes a message.
pub const INTERACTION_LIKE: &str = "like";

/// Maximum number of actors kept in an interaction preview.
pub const ACTORS_PREVIEW_LIMIT: usize = 3;
