//! Population pipeline.
//!
//! Steps run in order against one container. A step only reads the
//! container and returns the [`Enrichment`] it wants applied; the runner is
//! the only place that looks at step outcomes and the only place that
//! changes the container. On success the enrichment is applied, on failure
//! it is dropped and the container is poisoned. Nothing after the first
//! failure runs and errors are not collected.
//!
//! A step cannot touch the container it is given:
//!
//! ```compile_fail
//! use skyline_common::error::{Result, SkylineError};
//! use skyline_container::container::MessageContainer;
//! use skyline_container::pipeline::{Enrichment, PopulateStep};
//!
//! struct Eager;
//!
//! impl PopulateStep<()> for Eager {
//!     fn name(&self) -> &'static str {
//!         "eager"
//!     }
//!
//!     fn apply(&self, container: &MessageContainer, _source: &()) -> Result<Enrichment> {
//!         container.set_replies_count(42);
//!         Err(SkylineError::UnboundContainer)
//!     }
//! }
//! ```

use skyline_common::error::Result;

use crate::container::MessageContainer;
use crate::message::{InteractionSummary, Message};

/// Changes a step asks the runner to apply.
///
/// Unset fields leave the container as it is.
#[derive(Debug, Default)]
#[must_use]
pub struct Enrichment {
    message: Option<Message>,
    account_old_id: Option<String>,
    interactions: Vec<(String, InteractionSummary)>,
    followed: Option<bool>,
    unread_replies: Option<usize>,
    replies_count: Option<usize>,
}

impl Enrichment {
    /// An enrichment that changes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Binds `message` into the container.
    pub fn bind_message(mut self, message: Message) -> Self {
        self.message = Some(message);
        self
    }

    /// Sets the legacy account identifier.
    pub fn account_old_id(mut self, old_id: impl Into<String>) -> Self {
        self.account_old_id = Some(old_id.into());
        self
    }

    /// Records an interaction summary under `kind`.
    pub fn interaction(mut self, kind: impl Into<String>, summary: InteractionSummary) -> Self {
        self.interactions.push((kind.into(), summary));
        self
    }

    /// Marks whether the viewer follows the message.
    pub fn followed(mut self, followed: bool) -> Self {
        self.followed = Some(followed);
        self
    }

    /// Sets the viewer's unread reply count.
    pub fn unread_replies(mut self, count: usize) -> Self {
        self.unread_replies = Some(count);
        self
    }

    /// Sets the total reply count.
    pub fn replies_count(mut self, count: usize) -> Self {
        self.replies_count = Some(count);
        self
    }

    pub(crate) fn apply_to(self, container: &mut MessageContainer) {
        if let Some(message) = self.message {
            container.bind_message(message);
        }
        if let Some(old_id) = self.account_old_id {
            container.set_account_old_id(old_id);
        }
        for (kind, summary) in self.interactions {
            container.record_interaction(kind, summary);
        }
        if let Some(followed) = self.followed {
            container.set_followed(followed);
        }
        if let Some(count) = self.unread_replies {
            container.set_unread_replies(count);
        }
        if let Some(count) = self.replies_count {
            container.set_replies_count(count);
        }
    }
}

/// One enrichment step.
pub trait PopulateStep<S: ?Sized> {
    /// Step name for logs.
    fn name(&self) -> &'static str;

    /// Works out what to change on `container` given `source`.
    ///
    /// # Errors
    ///
    /// Any error poisons the container and stops the pipeline. Nothing the
    /// step prepared is applied.
    fn apply(&self, container: &MessageContainer, source: &S) -> Result<Enrichment>;
}

/// Runs `steps` over `container`, stopping at the first failure.
///
/// An absent container comes back poisoned with `UnboundContainer` and no
/// step runs. A container that is already poisoned comes back unchanged.
pub fn populate<S: ?Sized>(
    container: Option<MessageContainer>,
    source: &S,
    steps: &[&dyn PopulateStep<S>],
) -> MessageContainer {
    let Some(mut container) = container else {
        tracing::warn!("population attempted on an absent container");
        return MessageContainer::unbound();
    };

    for step in steps {
        if container.is_poisoned() {
            tracing::debug!(step = step.name(), "container poisoned, skipping remaining steps");
            break;
        }
        match step.apply(&container, source) {
            Ok(enrichment) => enrichment.apply_to(&mut container),
            Err(err) => {
                tracing::warn!(step = step.name(), error = %err, "population step failed");
                container.poison(err);
            }
        }
    }

    container
}
