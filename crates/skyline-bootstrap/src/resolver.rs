//! Bootstrap-time configuration resolution.
//!
//! [`Resolver::resolve`] runs once at process start. Every step is fatal on
//! failure, so a [`ResolvedConfig`] only exists when all discovered fields
//! are populated and consistent.

use skyline_common::config::{ConfigInput, HostedZone};
use skyline_common::constants::{ENV_NAME_VAR, keys};
use skyline_common::error::Result;
use skyline_common::types::Region;

use crate::chain::resolve;
use crate::env::EnvSource;
use crate::identity::AutoscalingApi;
use crate::metadata::MetadataService;
use crate::provider::{MetadataAutoscalingGroup, MetadataRegion, RequiredEnvVar};
use crate::session::{CredentialScope, Credentials, SessionHandle, build_session};

/// Fully resolved runtime configuration. Immutable once built.
///
/// Owns both session handles; callers borrow them and cannot duplicate them.
///
/// ```compile_fail
/// fn duplicate<T: Clone>(value: &T) -> T {
///     value.clone()
/// }
/// fn copy_config(config: &skyline_bootstrap::resolver::ResolvedConfig) {
///     let _ = duplicate(config);
/// }
/// ```
#[derive(Debug)]
pub struct ResolvedConfig {
    credentials: Credentials,
    dns_credentials: Credentials,
    region: Region,
    environment_name: String,
    autoscaling_name: String,
    hosted_zone: HostedZone,
    debug: bool,
    session: SessionHandle,
    dns_session: SessionHandle,
}

impl ResolvedConfig {
    /// Key pair for the compute / orchestration APIs.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Key pair for the DNS-zone APIs.
    #[must_use]
    pub const fn dns_credentials(&self) -> &Credentials {
        &self.dns_credentials
    }

    /// Region both sessions are bound to.
    #[must_use]
    pub const fn region(&self) -> &Region {
        &self.region
    }

    /// Deployment environment name.
    #[must_use]
    pub fn environment_name(&self) -> &str {
        &self.environment_name
    }

    /// Autoscaling group owning this instance.
    #[must_use]
    pub fn autoscaling_name(&self) -> &str {
        &self.autoscaling_name
    }

    /// Hosted zone settings.
    #[must_use]
    pub const fn hosted_zone(&self) -> &HostedZone {
        &self.hosted_zone
    }

    /// Whether debug behaviour is enabled.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Session for the compute / orchestration APIs.
    #[must_use]
    pub const fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Session for the DNS-zone APIs.
    #[must_use]
    pub const fn dns_session(&self) -> &SessionHandle {
        &self.dns_session
    }
}

/// Resolves a [`ConfigInput`] against the environment and the cloud.
pub struct Resolver<'a> {
    env: &'a dyn EnvSource,
    metadata: &'a dyn MetadataService,
    autoscaling: &'a dyn AutoscalingApi,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver over the given collaborators.
    pub const fn new(
        env: &'a dyn EnvSource,
        metadata: &'a dyn MetadataService,
        autoscaling: &'a dyn AutoscalingApi,
    ) -> Self {
        Self {
            env,
            metadata,
            autoscaling,
        }
    }

    /// Resolves every discovered field and builds both sessions.
    ///
    /// Order: region, environment name, sessions, autoscaling group. The
    /// autoscaling lookup uses the compute session, so it runs against the
    /// same region the sessions were built with.
    ///
    /// # Errors
    ///
    /// Returns the first failure of any step; nothing is retried or defaulted.
    pub fn resolve(&self, input: &ConfigInput) -> Result<ResolvedConfig> {
        let region = Region::new(resolve(
            keys::REGION,
            input.region.as_deref(),
            &[&MetadataRegion::new(self.metadata)],
        )?);

        let environment_name = resolve(
            keys::ENVIRONMENT_NAME,
            input.environment_name.as_deref(),
            &[&RequiredEnvVar::new(self.env, ENV_NAME_VAR)],
        )?;

        let credentials = Credentials::new(&input.access_key_id, &input.secret_access_key);
        let dns_credentials =
            Credentials::new(&input.dns_access_key_id, &input.dns_secret_access_key);
        let session = build_session(CredentialScope::Compute, credentials.clone(), &region)?;
        let dns_session = build_session(CredentialScope::Dns, dns_credentials.clone(), &region)?;

        let autoscaling_name = resolve(
            keys::AUTOSCALING_NAME,
            input.autoscaling_name.as_deref(),
            &[&MetadataAutoscalingGroup::new(
                self.metadata,
                self.autoscaling,
                &session,
            )],
        )?;

        tracing::info!(
            region = %region,
            environment = %environment_name,
            autoscaling = %autoscaling_name,
            hosted_zone = %input.hosted_zone.name,
            debug = input.debug,
            "configuration resolved"
        );

        Ok(ResolvedConfig {
            credentials,
            dns_credentials,
            region,
            environment_name,
            autoscaling_name,
            hosted_zone: input.hosted_zone.clone(),
            debug: input.debug,
            session,
            dns_session,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use skyline_common::error::SkylineError;
    use skyline_common::types::InstanceId;

    use super::*;
    use crate::env::MapEnv;
    use crate::identity::InstanceMembership;
    use crate::metadata::InstanceIdentity;

    struct UnreachableMetadata;

    impl MetadataService for UnreachableMetadata {
        fn identity(&self) -> Result<InstanceIdentity> {
            panic!("metadata service must not be queried");
        }
    }

    struct UnreachableApi;

    impl AutoscalingApi for UnreachableApi {
        fn describe_instance_membership(
            &self,
            _session: &SessionHandle,
            _instance_id: &InstanceId,
        ) -> Result<Vec<InstanceMembership>> {
            panic!("orchestration API must not be called");
        }
    }

    fn input() -> ConfigInput {
        let mut input = ConfigInput::with_credentials("AK", "SK", "DAK", "DSK");
        input.region = Some("us-east-1".into());
        input.environment_name = Some("prod".into());
        input.autoscaling_name = Some("asg".into());
        input
    }

    #[test]
    fn fully_explicit_input_touches_no_collaborator() {
        let env = MapEnv::new();
        let resolver = Resolver::new(&env, &UnreachableMetadata, &UnreachableApi);
        let config = resolver.resolve(&input()).expect("should resolve");

        assert_eq!(config.region().as_str(), "us-east-1");
        assert_eq!(config.environment_name(), "prod");
        assert_eq!(config.autoscaling_name(), "asg");
        assert_eq!(config.hosted_zone(), &HostedZone::default());
        assert!(!config.debug());
    }

    #[test]
    fn sessions_are_separate_but_share_region() {
        let env = MapEnv::new();
        let resolver = Resolver::new(&env, &UnreachableMetadata, &UnreachableApi);
        let config = resolver.resolve(&input()).expect("should resolve");

        assert_eq!(config.session().scope(), CredentialScope::Compute);
        assert_eq!(config.dns_session().scope(), CredentialScope::Dns);
        assert_eq!(config.session().credentials().access_key_id(), "AK");
        assert_eq!(config.dns_session().credentials().access_key_id(), "DAK");
        assert_eq!(config.session().region(), config.region());
        assert_eq!(config.dns_session().region(), config.region());
    }

    #[test]
    fn empty_dns_credentials_abort_bootstrap() {
        let env = MapEnv::new();
        let resolver = Resolver::new(&env, &UnreachableMetadata, &UnreachableApi);
        let mut input = input();
        input.dns_secret_access_key = String::new();

        let err = resolver.resolve(&input).unwrap_err();
        assert!(matches!(err, SkylineError::Config { .. }));
    }

    struct FixedMetadata;

    impl MetadataService for FixedMetadata {
        fn identity(&self) -> Result<InstanceIdentity> {
            Ok(InstanceIdentity {
                region: "eu-central-1".into(),
                instance_id: "i-1".into(),
            })
        }
    }

    #[test]
    fn empty_explicit_region_is_discovered_from_metadata() {
        let env = MapEnv::new();
        let resolver = Resolver::new(&env, &FixedMetadata, &UnreachableApi);
        let mut input = input();
        input.region = Some(String::new());

        let config = resolver.resolve(&input).expect("should resolve");
        assert_eq!(config.region().as_str(), "eu-central-1");
    }

    #[test]
    fn missing_environment_name_is_reported_before_sessions() {
        let env = MapEnv::new();
        let resolver = Resolver::new(&env, &UnreachableMetadata, &UnreachableApi);
        let mut input = input();
        input.environment_name = None;
        input.access_key_id = String::new();

        let err = resolver.resolve(&input).unwrap_err();
        assert!(matches!(err, SkylineError::MissingEnvironmentVariable { .. }));
    }
}
