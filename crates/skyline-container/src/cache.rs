//! Legacy account identifier lookup.

use skyline_common::error::Result;
use skyline_common::types::AccountId;

/// Cache mapping current account ids to their legacy identifiers.
///
/// Implementations must be safe to call from several threads if containers
/// are built concurrently; no locking happens on this side.
pub trait LegacyIdCache {
    /// Fetches the legacy identifier of `account_id`.
    ///
    /// # Errors
    ///
    /// Returns whatever the underlying store reports. The error is stored in
    /// the container as is.
    fn fetch_account_old_id(&self, account_id: &AccountId) -> Result<String>;
}
