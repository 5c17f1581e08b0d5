//! Builds message containers with the standard enrichment steps.

use crate::cache::LegacyIdCache;
use crate::container::MessageContainer;
use crate::message::Message;
use crate::pipeline::{PopulateStep, populate};
use crate::steps::{BindMessage, ResolveLegacyAccountId};

/// Assembles containers by binding the message and resolving the legacy id.
pub struct ContainerBuilder<'a> {
    cache: &'a dyn LegacyIdCache,
}

impl<'a> ContainerBuilder<'a> {
    /// Creates a builder backed by `cache`.
    #[must_use]
    pub const fn new(cache: &'a dyn LegacyIdCache) -> Self {
        Self { cache }
    }

    /// Runs the standard steps over an existing container.
    ///
    /// Running this again on an enriched container does not repeat the
    /// legacy id lookup.
    #[must_use]
    pub fn populate(
        &self,
        container: Option<MessageContainer>,
        message: &Message,
    ) -> MessageContainer {
        let legacy = ResolveLegacyAccountId::new(self.cache);
        let steps: [&dyn PopulateStep<Message>; 2] = [&BindMessage, &legacy];
        populate(container, message, &steps)
    }

    /// Builds a fresh container for `message`.
    #[must_use]
    pub fn build(&self, message: &Message) -> MessageContainer {
        self.populate(Some(MessageContainer::new()), message)
    }

    /// Builds one container per message.
    ///
    /// A failed message yields a poisoned container in its slot; the rest
    /// of the batch is unaffected.
    #[must_use]
    pub fn build_all(&self, messages: &[Message]) -> Vec<MessageContainer> {
        let containers: Vec<_> = messages.iter().map(|m| self.build(m)).collect();
        let poisoned = containers.iter().filter(|c| c.is_poisoned()).count();
        if poisoned > 0 {
            tracing::warn!(total = containers.len(), poisoned, "some containers failed to build");
        }
        containers
    }

    /// Builds `message` with its `replies` attached.
    ///
    /// Each reply goes through the pipeline on its own, so a failed reply
    /// does not poison the parent. A failed parent gets no replies.
    #[must_use]
    pub fn build_thread(&self, message: &Message, replies: &[Message]) -> MessageContainer {
        let mut parent = self.build(message);
        for reply in replies {
            parent.push_reply(self.build(reply));
        }
        parent.set_replies_count(replies.len());
        parent
    }
}
