//! Standard enrichment steps for message containers.

use skyline_common::error::{Result, SkylineError};

use crate::cache::LegacyIdCache;
use crate::container::MessageContainer;
use crate::message::Message;
use crate::pipeline::{Enrichment, PopulateStep};

/// Binds the source message into the container.
#[derive(Debug, Clone, Copy, Default)]
pub struct BindMessage;

impl PopulateStep<Message> for BindMessage {
    fn name(&self) -> &'static str {
        "bind_message"
    }

    fn apply(&self, _container: &MessageContainer, source: &Message) -> Result<Enrichment> {
        Ok(Enrichment::none().bind_message(source.clone()))
    }
}

/// Resolves the legacy identifier of the bound message's owning account.
///
/// Does nothing when the identifier is already set, so re-running the
/// pipeline on an enriched container performs no lookup.
pub struct ResolveLegacyAccountId<'a> {
    cache: &'a dyn LegacyIdCache,
}

impl<'a> ResolveLegacyAccountId<'a> {
    /// Looks identifiers up in `cache`.
    pub const fn new(cache: &'a dyn LegacyIdCache) -> Self {
        Self { cache }
    }
}

impl PopulateStep<Message> for ResolveLegacyAccountId<'_> {
    fn name(&self) -> &'static str {
        "resolve_legacy_account_id"
    }

    fn apply(&self, container: &MessageContainer, _source: &Message) -> Result<Enrichment> {
        if container.account_old_id().is_some() {
            return Ok(Enrichment::none());
        }

        let account_id = container
            .message()
            .map(|m| m.account_id.clone())
            .ok_or(SkylineError::UnboundContainer)?;

        let old_id = self.cache.fetch_account_old_id(&account_id)?;
        // empty means the store has no legacy id for this account
        if old_id.is_empty() {
            return Ok(Enrichment::none());
        }
        Ok(Enrichment::none().account_old_id(old_id))
    }
}
