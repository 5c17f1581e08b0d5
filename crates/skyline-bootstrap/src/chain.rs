//! Resolution chain.
//!
//! A configuration value comes from the explicit input when one is given,
//! otherwise from the first provider that has it. Providers report three
//! outcomes, and the chain treats them differently:
//!
//! - `Ok(Some(value))`: resolved, stop here.
//! - `Ok(None)`: not present, try the next provider.
//! - `Err(err)`: present but unusable (or the lookup itself broke), abort.

use skyline_common::error::{Result, SkylineError};

use crate::provider::ValueProvider;

/// Resolves `key` from `explicit`, falling back to `providers` in order.
///
/// A non-empty `explicit` value always wins and no provider is called.
/// Providers after the first successful one are never called.
///
/// # Errors
///
/// Returns the first hard failure reported by a provider unchanged, or
/// `SkylineError::MissingConfiguration` when every provider reports the
/// value as not present.
pub fn resolve(
    key: &'static str,
    explicit: Option<&str>,
    providers: &[&dyn ValueProvider],
) -> Result<String> {
    if let Some(value) = explicit.filter(|v| !v.is_empty()) {
        tracing::debug!(key, "using explicit configuration value");
        return Ok(value.to_string());
    }

    for provider in providers {
        if let Some(value) = provider.fetch()? {
            tracing::info!(key, source = provider.source(), "resolved configuration value");
            return Ok(value);
        }
        tracing::debug!(key, source = provider.source(), "value not present, trying next source");
    }

    Err(SkylineError::MissingConfiguration { key })
}
