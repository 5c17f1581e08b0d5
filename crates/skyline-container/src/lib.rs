//! # skyline-container
//!
//! Builds the "message with social context" view.
//!
//! - [`MessageContainer`](container::MessageContainer): message, interactions,
//!   replies, legacy account id and a first-error slot.
//! - [`populate`](pipeline::populate): runs enrichment steps in order, applies
//!   the [`Enrichment`](pipeline::Enrichment) each one returns and stops at the
//!   first failure.
//! - [`ContainerBuilder`](builder::ContainerBuilder): the standard steps, for
//!   single messages, batches and threads.
//!
//! # Example
//!
//! ```rust
//! use skyline_common::error::Result;
//! use skyline_common::types::AccountId;
//! use skyline_container::builder::ContainerBuilder;
//! use skyline_container::cache::LegacyIdCache;
//! use skyline_container::message::Message;
//!
//! struct Cache;
//!
//! impl LegacyIdCache for Cache {
//!     fn fetch_account_old_id(&self, account_id: &AccountId) -> Result<String> {
//!         Ok(format!("legacy-{account_id}"))
//!     }
//! }
//!
//! let message = Message::new(1, AccountId::new("A1"), "hello");
//! let container = ContainerBuilder::new(&Cache).build(&message);
//! assert_eq!(container.account_old_id(), Some("legacy-A1"));
//! ```

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod builder;
pub mod cache;
pub mod container;
pub mod message;
pub mod pipeline;
pub mod steps;
