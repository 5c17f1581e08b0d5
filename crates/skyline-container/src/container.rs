//! Message container: a message plus its social context.
//!
//! A container carries an error slot. Once the slot is filled the container
//! is poisoned: it keeps only the first error, and every mutator turns into
//! a no-op. Replies are full containers of their own and are poisoned
//! independently of their parent.

use std::collections::BTreeMap;

use serde::Serialize;
use skyline_common::error::SkylineError;

use crate::message::{InteractionSummary, Message};

/// Denormalised view of a message with interactions, replies and legacy id.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageContainer {
    message: Option<Message>,
    interactions: BTreeMap<String, InteractionSummary>,
    replies_count: usize,
    replies: Vec<MessageContainer>,
    account_old_id: Option<String>,
    is_followed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    unread_replies_count: Option<usize>,
    #[serde(skip)]
    error: Option<SkylineError>,
}

impl MessageContainer {
    /// Creates an empty, unpoisoned container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a container poisoned with `SkylineError::UnboundContainer`.
    #[must_use]
    pub fn unbound() -> Self {
        Self {
            error: Some(SkylineError::UnboundContainer),
            ..Self::default()
        }
    }

    /// Bound message, if any.
    #[must_use]
    pub const fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Interaction summaries keyed by interaction kind.
    #[must_use]
    pub const fn interactions(&self) -> &BTreeMap<String, InteractionSummary> {
        &self.interactions
    }

    /// Interaction summary for one kind.
    #[must_use]
    pub fn interaction(&self, kind: &str) -> Option<&InteractionSummary> {
        self.interactions.get(kind)
    }

    /// Number of replies the message has.
    #[must_use]
    pub const fn replies_count(&self) -> usize {
        self.replies_count
    }

    /// Reply containers attached to this one.
    #[must_use]
    pub fn replies(&self) -> &[Self] {
        &self.replies
    }

    /// Legacy identifier of the owning account, once resolved.
    #[must_use]
    pub fn account_old_id(&self) -> Option<&str> {
        self.account_old_id.as_deref()
    }

    /// Whether the viewer follows the message.
    #[must_use]
    pub const fn is_followed(&self) -> bool {
        self.is_followed
    }

    /// Unread replies for the viewer; `None` when not tracked.
    #[must_use]
    pub const fn unread_replies_count(&self) -> Option<usize> {
        self.unread_replies_count
    }

    /// First error recorded on this container.
    #[must_use]
    pub const fn error(&self) -> Option<&SkylineError> {
        self.error.as_ref()
    }

    /// Whether the container carries an error.
    #[must_use]
    pub const fn is_poisoned(&self) -> bool {
        self.error.is_some()
    }

    /// Records an interaction summary under `kind`.
    pub fn record_interaction(&mut self, kind: impl Into<String>, summary: InteractionSummary) {
        if self.is_poisoned() {
            return;
        }
        let _ = self.interactions.insert(kind.into(), summary);
    }

    /// Marks whether the viewer follows the message.
    pub fn set_followed(&mut self, followed: bool) {
        if self.is_poisoned() {
            return;
        }
        self.is_followed = followed;
    }

    /// Sets the viewer's unread reply count.
    pub fn set_unread_replies(&mut self, count: usize) {
        if self.is_poisoned() {
            return;
        }
        self.unread_replies_count = Some(count);
    }

    /// Sets the total reply count.
    pub fn set_replies_count(&mut self, count: usize) {
        if self.is_poisoned() {
            return;
        }
        self.replies_count = count;
    }

    /// Attaches a reply container. A poisoned reply is kept as is.
    pub fn push_reply(&mut self, reply: Self) {
        if self.is_poisoned() {
            return;
        }
        self.replies.push(reply);
    }

    pub(crate) fn bind_message(&mut self, message: Message) {
        if self.is_poisoned() {
            return;
        }
        self.message = Some(message);
    }

    pub(crate) fn set_account_old_id(&mut self, old_id: String) {
        if self.is_poisoned() {
            return;
        }
        self.account_old_id = Some(old_id);
    }

    /// Records `err` unless an earlier error is already present.
    pub(crate) fn poison(&mut self, err: SkylineError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}
