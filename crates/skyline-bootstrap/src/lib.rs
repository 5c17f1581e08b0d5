//! # skyline-bootstrap
//!
//! Resolves the runtime configuration a process needs before it can operate:
//! its cloud region, deployment environment name and autoscaling group.
//!
//! - **Chain**: explicit value, then ordered fallback providers, first hit wins.
//! - **Providers**: environment variables and the cloud metadata service.
//! - **Sessions**: one client context per credential scope, same region.
//! - **Identity**: maps the instance id to its owning autoscaling group.
//! - **Resolver**: runs the whole sequence once, fail-fast.
//!
//! # Example
//!
//! ```rust,no_run
//! use skyline_bootstrap::env::ProcessEnv;
//! use skyline_bootstrap::identity::{AutoscalingApi, InstanceMembership};
//! use skyline_bootstrap::metadata::Ec2MetadataClient;
//! use skyline_bootstrap::resolver::Resolver;
//! use skyline_bootstrap::session::SessionHandle;
//! use skyline_common::config::ConfigInput;
//! use skyline_common::error::Result;
//! use skyline_common::types::InstanceId;
//!
//! struct Orchestration;
//!
//! impl AutoscalingApi for Orchestration {
//!     fn describe_instance_membership(
//!         &self,
//!         _session: &SessionHandle,
//!         instance_id: &InstanceId,
//!     ) -> Result<Vec<InstanceMembership>> {
//!         Ok(vec![InstanceMembership {
//!             instance_id: instance_id.clone(),
//!             group_name: "tunnels".into(),
//!         }])
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let input = ConfigInput::with_credentials("AK", "SK", "DAK", "DSK");
//! let metadata = Ec2MetadataClient::new()?;
//! let _config = Resolver::new(&ProcessEnv, &metadata, &Orchestration).resolve(&input)?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod chain;
pub mod env;
pub mod identity;
pub mod metadata;
pub mod provider;
pub mod resolver;
pub mod session;
