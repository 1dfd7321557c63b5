//! Deterministic concatenation of stage diagnostics

use crate::error::Error;

/// Separator placed between two aggregated diagnostics
pub const DIAGNOSTIC_SEPARATOR: &str = "\n\n";

/// Join the messages of `errors` in the order given
///
/// Returns `None` when there is nothing to aggregate.
pub fn aggregate<'a, I>(errors: I) -> Option<String>
where
    I: IntoIterator<Item = &'a Error>,
{
    let messages: Vec<&str> = errors.into_iter().map(Error::message).collect();
    if messages.is_empty() {
        None
    } else {
        Some(messages.join(DIAGNOSTIC_SEPARATOR))
    }
}

#[cfg(test)]
#[path = "error_aggregator_tests.rs"]
mod tests;
