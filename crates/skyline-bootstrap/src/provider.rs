//! Leaf value providers for the resolution chain.

use skyline_common::error::{Result, SkylineError};
use skyline_common::types::InstanceId;

use crate::env::EnvSource;
use crate::identity::{AutoscalingApi, lookup_autoscaling_group};
use crate::metadata::MetadataService;
use crate::session::SessionHandle;

/// A single source a configuration value may come from.
pub trait ValueProvider {
    /// Short label for logs, e.g. `env:EB_ENV_NAME`.
    fn source(&self) -> &str;

    /// Fetches the value.
    ///
    /// # Errors
    ///
    /// An error means the value is unusable and the chain must stop.
    /// Return `Ok(None)` for "not present".
    fn fetch(&self) -> Result<Option<String>>;
}

/// Adapts a closure into a provider.
pub struct FnProvider<F> {
    label: &'static str,
    f: F,
}

impl<F> FnProvider<F>
where
    F: Fn() -> Result<Option<String>>,
{
    /// Wraps `f` under the given label.
    pub const fn new(label: &'static str, f: F) -> Self {
        Self { label, f }
    }
}

impl<F> ValueProvider for FnProvider<F>
where
    F: Fn() -> Result<Option<String>>,
{
    fn source(&self) -> &str {
        self.label
    }

    fn fetch(&self) -> Result<Option<String>> {
        (self.f)()
    }
}

/// Optional environment variable: absent or empty means not present.
///
/// A value that is set but not valid Unicode is a hard failure.
pub struct EnvVar<'a> {
    env: &'a dyn EnvSource,
    name: &'a str,
}

impl<'a> EnvVar<'a> {
    /// Reads `name` from `env`.
    pub const fn new(env: &'a dyn EnvSource, name: &'a str) -> Self {
        Self { env, name }
    }
}

impl ValueProvider for EnvVar<'_> {
    fn source(&self) -> &str {
        "env"
    }

    fn fetch(&self) -> Result<Option<String>> {
        Ok(self.env.var(self.name)?.filter(|v| !v.is_empty()))
    }
}

/// Environment variable that must be set and non-empty.
pub struct RequiredEnvVar<'a> {
    env: &'a dyn EnvSource,
    name: &'a str,
}

impl<'a> RequiredEnvVar<'a> {
    /// Reads `name` from `env`.
    pub const fn new(env: &'a dyn EnvSource, name: &'a str) -> Self {
        Self { env, name }
    }
}

impl ValueProvider for RequiredEnvVar<'_> {
    fn source(&self) -> &str {
        "env"
    }

    fn fetch(&self) -> Result<Option<String>> {
        match self.env.var(self.name)? {
            None => Err(SkylineError::MissingEnvironmentVariable {
                name: self.name.to_string(),
            }),
            Some(value) if value.is_empty() => Err(SkylineError::EmptyEnvironmentVariable {
                name: self.name.to_string(),
            }),
            Some(value) => Ok(Some(value)),
        }
    }
}

/// Region reported by the metadata service.
pub struct MetadataRegion<'a> {
    metadata: &'a dyn MetadataService,
}

impl<'a> MetadataRegion<'a> {
    /// Queries `metadata` for the region.
    pub const fn new(metadata: &'a dyn MetadataService) -> Self {
        Self { metadata }
    }
}

impl ValueProvider for MetadataRegion<'_> {
    fn source(&self) -> &str {
        "metadata"
    }

    fn fetch(&self) -> Result<Option<String>> {
        let identity = self.metadata.identity()?;
        if identity.region.is_empty() {
            return Err(SkylineError::MalformedResponse {
                service: "metadata",
                detail: format!("empty region in {identity:?}"),
            });
        }
        Ok(Some(identity.region))
    }
}

/// Autoscaling group owning the instance the metadata service describes.
pub struct MetadataAutoscalingGroup<'a> {
    metadata: &'a dyn MetadataService,
    api: &'a dyn AutoscalingApi,
    session: &'a SessionHandle,
}

impl<'a> MetadataAutoscalingGroup<'a> {
    /// Looks the current instance up through `api` using `session`.
    pub const fn new(
        metadata: &'a dyn MetadataService,
        api: &'a dyn AutoscalingApi,
        session: &'a SessionHandle,
    ) -> Self {
        Self {
            metadata,
            api,
            session,
        }
    }
}

impl ValueProvider for MetadataAutoscalingGroup<'_> {
    fn source(&self) -> &str {
        "autoscaling"
    }

    fn fetch(&self) -> Result<Option<String>> {
        let identity = self.metadata.identity()?;
        if identity.instance_id.is_empty() {
            return Err(SkylineError::MalformedResponse {
                service: "metadata",
                detail: format!("empty instance id in {identity:?}"),
            });
        }
        let instance_id = InstanceId::new(identity.instance_id);
        lookup_autoscaling_group(self.api, self.session, &instance_id).map(Some)
    }
}
