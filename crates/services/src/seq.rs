use std::collections::HashMap;
use std::sync::Mutex;

/// Monotonic sequence tickets per logical operation key.
///
/// There is no cancellation for in-flight calls, so a slow response from a
/// superseded request can race a fresh one. Each outbound call takes a
/// ticket; a response is applied only while its ticket is still the latest
/// issued for that key, which silently discards out-of-order completions.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: Mutex<HashMap<String, u64>>,
}

impl RequestSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next ticket for `key`, superseding all earlier ones.
    pub fn issue(&self, key: &str) -> u64 {
        let mut latest = self
            .latest
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let ticket = latest.entry(key.to_string()).or_insert(0);
        *ticket += 1;
        *ticket
    }

    /// True while `ticket` is still the latest issued for `key`.
    #[must_use]
    pub fn is_current(&self, key: &str, ticket: u64) -> bool {
        let latest = self
            .latest
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        latest.get(key).is_some_and(|current| *current == ticket)
    }
}
