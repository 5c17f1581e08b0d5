//! End-to-end tests for bootstrap configuration resolution.
//!
//! Every collaborator is faked in memory so the tests can count how often
//! the metadata service and the orchestration API are consulted.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::cell::Cell;

use skyline_bootstrap::chain::resolve;
use skyline_bootstrap::env::MapEnv;
use skyline_bootstrap::identity::{AutoscalingApi, InstanceMembership};
use skyline_bootstrap::metadata::{Ec2MetadataClient, InstanceIdentity, MetadataService};
use skyline_bootstrap::provider::{EnvVar, RequiredEnvVar};
use skyline_bootstrap::resolver::Resolver;
use skyline_bootstrap::session::SessionHandle;
use skyline_common::config::ConfigInput;
use skyline_common::error::{Result, SkylineError};
use skyline_common::types::InstanceId;

// ── Fakes ────────────────────────────────────────────────────────────

struct FakeMetadata {
    identity: InstanceIdentity,
    calls: Cell<usize>,
}

impl FakeMetadata {
    fn new(region: &str, instance_id: &str) -> Self {
        Self {
            identity: InstanceIdentity {
                region: region.into(),
                instance_id: instance_id.into(),
            },
            calls: Cell::new(0),
        }
    }
}

impl MetadataService for FakeMetadata {
    fn identity(&self) -> Result<InstanceIdentity> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.identity.clone())
    }
}

struct FakeOrchestration {
    records: Vec<InstanceMembership>,
    seen_region: Cell<Option<String>>,
}

impl FakeOrchestration {
    fn with_group(instance_id: &str, group: &str) -> Self {
        Self {
            records: vec![InstanceMembership {
                instance_id: InstanceId::new(instance_id),
                group_name: group.into(),
            }],
            seen_region: Cell::new(None),
        }
    }
}

impl AutoscalingApi for FakeOrchestration {
    fn describe_instance_membership(
        &self,
        session: &SessionHandle,
        _instance_id: &InstanceId,
    ) -> Result<Vec<InstanceMembership>> {
        self.seen_region
            .set(Some(session.region().as_str().to_string()));
        Ok(self.records.clone())
    }
}

struct PanickingOrchestration;

impl AutoscalingApi for PanickingOrchestration {
    fn describe_instance_membership(
        &self,
        _session: &SessionHandle,
        _instance_id: &InstanceId,
    ) -> Result<Vec<InstanceMembership>> {
        panic!("orchestration API must not be called");
    }
}

fn credentials_only() -> ConfigInput {
    ConfigInput::with_credentials("AK", "SK", "DAK", "DSK")
}

// ── Scenarios ────────────────────────────────────────────────────────

#[test]
fn explicit_region_with_environment_variable_fallback() {
    let env = MapEnv::new().with("EB_ENV_NAME", "staging");
    let metadata = FakeMetadata::new("eu-central-1", "i-1");
    let api = FakeOrchestration::with_group("i-1", "tunnels");

    let mut input = credentials_only();
    input.region = Some("us-east-1".into());
    input.environment_name = Some(String::new());

    let config = Resolver::new(&env, &metadata, &api)
        .resolve(&input)
        .expect("should resolve");

    assert_eq!(config.region().as_str(), "us-east-1");
    assert_eq!(config.environment_name(), "staging");
    assert_eq!(config.autoscaling_name(), "tunnels");
}

#[test]
fn discovered_region_drives_sessions_and_identity_lookup() {
    let env = MapEnv::new().with("EB_ENV_NAME", "prod");
    let metadata = FakeMetadata::new("ap-northeast-1", "i-42");
    let api = FakeOrchestration::with_group("i-42", "edge-asg");

    let config = Resolver::new(&env, &metadata, &api)
        .resolve(&credentials_only())
        .expect("should resolve");

    assert_eq!(config.region().as_str(), "ap-northeast-1");
    assert_eq!(config.session().region(), config.region());
    assert_eq!(config.dns_session().region(), config.region());
    assert_eq!(api.seen_region.take().as_deref(), Some("ap-northeast-1"));
    assert_eq!(config.autoscaling_name(), "edge-asg");
    assert_eq!(metadata.calls.get(), 2);
}

#[test]
fn empty_metadata_region_fails_as_malformed() {
    let env = MapEnv::new().with("EB_ENV_NAME", "prod");
    let metadata = FakeMetadata::new("", "i-1");

    let err = Resolver::new(&env, &metadata, &PanickingOrchestration)
        .resolve(&credentials_only())
        .unwrap_err();

    assert!(matches!(err, SkylineError::MalformedResponse { .. }));
}

#[test]
fn empty_metadata_instance_id_fails_as_malformed() {
    let env = MapEnv::new().with("EB_ENV_NAME", "prod");
    let metadata = FakeMetadata::new("us-east-1", "");

    let err = Resolver::new(&env, &metadata, &PanickingOrchestration)
        .resolve(&credentials_only())
        .unwrap_err();

    assert!(matches!(err, SkylineError::MalformedResponse { .. }));
}

#[test]
fn unmatched_instance_fails_with_identity_not_found() {
    let env = MapEnv::new().with("EB_ENV_NAME", "prod");
    let metadata = FakeMetadata::new("us-east-1", "i-1");
    let api = FakeOrchestration::with_group("i-2", "someone-else");

    let err = Resolver::new(&env, &metadata, &api)
        .resolve(&credentials_only())
        .unwrap_err();

    assert!(matches!(err, SkylineError::IdentityNotFound { ref instance_id } if instance_id == "i-1"));
}

#[test]
fn explicit_autoscaling_name_skips_identity_lookup() {
    let env = MapEnv::new().with("EB_ENV_NAME", "prod");
    let metadata = FakeMetadata::new("us-east-1", "i-1");

    let mut input = credentials_only();
    input.autoscaling_name = Some("pinned".into());

    let config = Resolver::new(&env, &metadata, &PanickingOrchestration)
        .resolve(&input)
        .expect("should resolve");

    assert_eq!(config.autoscaling_name(), "pinned");
    assert_eq!(metadata.calls.get(), 1);
}

#[test]
fn absent_environment_variable_differs_from_exhausted_chain() {
    let env = MapEnv::new();

    let required = RequiredEnvVar::new(&env, "EB_ENV_NAME");
    let required_err = resolve("environment_name", None, &[&required]).unwrap_err();
    assert!(matches!(
        required_err,
        SkylineError::MissingEnvironmentVariable { .. }
    ));

    let optional = EnvVar::new(&env, "EB_ENV_NAME");
    let exhausted_err = resolve("environment_name", None, &[&optional]).unwrap_err();
    assert!(matches!(
        exhausted_err,
        SkylineError::MissingConfiguration { key: "environment_name" }
    ));
}

#[test]
fn unreachable_metadata_endpoint_aborts_bootstrap() {
    let env = MapEnv::new().with("EB_ENV_NAME", "prod");
    let metadata =
        Ec2MetadataClient::with_url("http://127.0.0.1:1/latest/dynamic/instance-identity/document")
            .expect("should build client");

    let err = Resolver::new(&env, &metadata, &PanickingOrchestration)
        .resolve(&credentials_only())
        .unwrap_err();

    assert!(matches!(err, SkylineError::ExternalCallFailure { .. }));
}
