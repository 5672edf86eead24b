use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use mastery_core::model::Recommendation;

use crate::gateway::ApiClient;
use crate::seq::RequestSequencer;
use crate::state::{lock, SharedState};

const SEQ_KEY: &str = "recommendations";

/// Recommendation source: remote service first, deterministic local rule
/// when the remote is unavailable or malformed.
pub struct RecommendationEngine {
    state: SharedState,
    api: Arc<dyn ApiClient>,
    seq: Arc<RequestSequencer>,
}

impl RecommendationEngine {
    #[must_use]
    pub fn new(state: SharedState, api: Arc<dyn ApiClient>, seq: Arc<RequestSequencer>) -> Self {
        Self { state, api, seq }
    }

    /// Produces the recommendation to render.
    ///
    /// Always yields a value (remote if the service answered with a usable
    /// payload, otherwise the rule-based fallback) except when a newer
    /// refresh superseded this one while its call was in flight; the stale
    /// result returns `None` and must not be rendered.
    pub async fn refresh(&self) -> Option<Recommendation> {
        let ticket = self.seq.issue(SEQ_KEY);
        let remote = self.fetch_remote().await;
        if !self.seq.is_current(SEQ_KEY, ticket) {
            debug!("discarding stale recommendation response");
            return None;
        }
        Some(remote.unwrap_or_else(|| self.fallback()))
    }

    /// The rule-based recommendation computed from current mastery state.
    /// Deterministic and side-effect free.
    #[must_use]
    pub fn fallback(&self) -> Recommendation {
        let guard = lock(&self.state);
        Recommendation::fallback(&guard.mastery.weak_topics(&guard.catalog))
    }

    async fn fetch_remote(&self) -> Option<Recommendation> {
        let user_id = lock(&self.state).user.id();
        let payload = self
            .api
            .get(&format!("/recommendations/{user_id}"))
            .await
            .ok()?;
        if payload.get("error").is_some() {
            return None;
        }
        parse_payload(payload.get("recommendations")?)
    }
}

/// Decodes the `recommendations` field, which arrives either as a
/// structured object or as a JSON-encoded string. Both forms decode to
/// identical values; anything unparsable falls through to the local rule.
fn parse_payload(raw: &Value) -> Option<Recommendation> {
    match raw {
        Value::String(encoded) => serde_json::from_str(encoded).ok(),
        structured => serde_json::from_value(structured.clone()).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_and_object_payloads_decode_identically() {
        let structured = json!({
            "next_topic": "Trees",
            "daily_plan": ["Day 1: Trees basics (45min)"],
            "estimated_completion": "2.5 hours",
            "priority": "weak foundational concepts"
        });
        let encoded = Value::String(structured.to_string());

        let from_object = parse_payload(&structured).unwrap();
        let from_string = parse_payload(&encoded).unwrap();
        assert_eq!(from_object, from_string);
        assert_eq!(from_object.next_topic, "Trees");
    }

    #[test]
    fn unparsable_payloads_yield_none() {
        assert!(parse_payload(&Value::String("{not json".into())).is_none());
        assert!(parse_payload(&json!({"next_topic": "Trees"})).is_none());
        assert!(parse_payload(&json!(42)).is_none());
    }
}
