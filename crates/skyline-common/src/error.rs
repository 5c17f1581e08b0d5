//! Unified error types for the Skyline workspace.
//!
//! Bootstrap code propagates these with `?` and treats every variant as
//! fatal. The container pipeline stores the first one it meets inside the
//! container instead of returning it.

use thiserror::Error;

/// Boxed error produced by an external client.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum SkylineError {
    /// Every source in a resolution chain was consulted and none had a value.
    #[error("missing configuration: no source provided a value for {key}")]
    MissingConfiguration {
        /// Configuration key that could not be resolved.
        key: &'static str,
    },

    /// A required environment variable is not set at all.
    #[error("environment variable {name} is not set")]
    MissingEnvironmentVariable {
        /// Name of the variable.
        name: String,
    },

    /// A required environment variable is set to the empty string.
    #[error("environment variable {name} can not be empty")]
    EmptyEnvironmentVariable {
        /// Name of the variable.
        name: String,
    },

    /// An environment variable is set but its value is not valid Unicode.
    #[error("environment variable {name} is not valid unicode")]
    NonUnicodeEnvironmentVariable {
        /// Name of the variable.
        name: String,
    },

    /// An external service answered, but the answer is structurally invalid.
    #[error("malformed {service} response: {detail}")]
    MalformedResponse {
        /// Service that produced the response.
        service: &'static str,
        /// What was wrong with it.
        detail: String,
    },

    /// The orchestration API answered but no record matched the instance.
    #[error("no autoscaling membership found for instance {instance_id}")]
    IdentityNotFound {
        /// Instance that was looked up.
        instance_id: String,
    },

    /// Enrichment was attempted on a container that does not exist.
    #[error("message container is not bound")]
    UnboundContainer,

    /// A network or API call failed.
    #[error("{context}: {source}")]
    ExternalCallFailure {
        /// What was being attempted.
        context: String,
        /// Underlying client error.
        source: BoxError,
    },

    /// A configuration value is structurally invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },
}

impl SkylineError {
    /// Wraps an external client error with a description of the failed call.
    pub fn external(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::ExternalCallFailure {
            context: context.into(),
            source: source.into(),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, SkylineError>;
