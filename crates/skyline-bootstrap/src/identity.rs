//! Identity lookup: which autoscaling group owns this instance.

use skyline_common::error::{Result, SkylineError};
use skyline_common::types::InstanceId;

use crate::session::SessionHandle;

/// One autoscaling membership record returned by the orchestration API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceMembership {
    /// Instance the record describes.
    pub instance_id: InstanceId,
    /// Autoscaling group the instance belongs to.
    pub group_name: String,
}

/// Orchestration API client.
pub trait AutoscalingApi {
    /// Describes the autoscaling membership of `instance_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call itself fails.
    fn describe_instance_membership(
        &self,
        session: &SessionHandle,
        instance_id: &InstanceId,
    ) -> Result<Vec<InstanceMembership>>;
}

/// Returns the name of the autoscaling group `instance_id` belongs to.
///
/// # Errors
///
/// Returns `ExternalCallFailure` when the API call fails and
/// `IdentityNotFound` when it succeeds without a record for the instance.
pub fn lookup_autoscaling_group(
    api: &dyn AutoscalingApi,
    session: &SessionHandle,
    instance_id: &InstanceId,
) -> Result<String> {
    let records = api
        .describe_instance_membership(session, instance_id)
        .map_err(|e| match e {
            external @ SkylineError::ExternalCallFailure { .. } => external,
            other => SkylineError::external(
                format!("describe autoscaling instances for {instance_id}"),
                other,
            ),
        })?;

    let Some(record) = records.into_iter().find(|r| r.instance_id == *instance_id) else {
        tracing::warn!(instance = %instance_id, "no autoscaling membership for instance");
        return Err(SkylineError::IdentityNotFound {
            instance_id: instance_id.to_string(),
        });
    };

    tracing::info!(instance = %instance_id, group = %record.group_name, "found autoscaling group");
    Ok(record.group_name)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use skyline_common::types::Region;

    use super::*;
    use crate::session::{CredentialScope, Credentials, build_session};

    struct StaticApi(Vec<InstanceMembership>);

    impl AutoscalingApi for StaticApi {
        fn describe_instance_membership(
            &self,
            _session: &SessionHandle,
            _instance_id: &InstanceId,
        ) -> Result<Vec<InstanceMembership>> {
            Ok(self.0.clone())
        }
    }

    struct FailingApi;

    impl AutoscalingApi for FailingApi {
        fn describe_instance_membership(
            &self,
            _session: &SessionHandle,
            _instance_id: &InstanceId,
        ) -> Result<Vec<InstanceMembership>> {
            Err(SkylineError::external("describe", "throttled"))
        }
    }

    fn session() -> SessionHandle {
        build_session(
            CredentialScope::Compute,
            Credentials::new("AK", "SK"),
            &Region::new("us-east-1"),
        )
        .expect("session")
    }

    fn member(instance: &str, group: &str) -> InstanceMembership {
        InstanceMembership {
            instance_id: InstanceId::new(instance),
            group_name: group.into(),
        }
    }

    #[test]
    fn picks_record_matching_instance() {
        let api = StaticApi(vec![member("i-other", "wrong"), member("i-1", "tunnels-asg")]);
        let group = lookup_autoscaling_group(&api, &session(), &InstanceId::new("i-1"))
            .expect("should find group");
        assert_eq!(group, "tunnels-asg");
    }

    #[test]
    fn no_matching_record_is_identity_not_found() {
        let api = StaticApi(vec![member("i-other", "wrong")]);
        let err = lookup_autoscaling_group(&api, &session(), &InstanceId::new("i-1")).unwrap_err();
        assert!(matches!(err, SkylineError::IdentityNotFound { ref instance_id } if instance_id == "i-1"));
    }

    #[test]
    fn empty_result_is_identity_not_found() {
        let api = StaticApi(Vec::new());
        let err = lookup_autoscaling_group(&api, &session(), &InstanceId::new("i-1")).unwrap_err();
        assert!(matches!(err, SkylineError::IdentityNotFound { .. }));
    }

    #[test]
    fn api_error_is_external_failure_not_identity_not_found() {
        let err =
            lookup_autoscaling_group(&FailingApi, &session(), &InstanceId::new("i-1")).unwrap_err();
        assert!(matches!(err, SkylineError::ExternalCallFailure { .. }));
    }
}
