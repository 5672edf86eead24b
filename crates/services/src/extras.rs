use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use mastery_core::model::{TopicId, UserId};

use crate::gateway::{ApiClient, ApiResult};

/// A downloadable resource attached to the user's history.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DownloadItem {
    pub resource_name: String,
    #[serde(default)]
    pub topic_id: Option<TopicId>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// One recent quiz attempt with its catalog topic name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestScore {
    #[serde(default)]
    pub topic_id: Option<TopicId>,
    pub topic_name: String,
    pub score: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// One leaderboard row, ranked by XP.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: u64,
    pub name: String,
    pub xp: u64,
    pub streak: u32,
}

/// Fetches the user's download history; empty on failure.
pub async fn fetch_downloads(api: &dyn ApiClient, user: UserId) -> Vec<DownloadItem> {
    decode_list(api.get(&format!("/downloads/{user}")).await)
}

/// Fetches the user's recent test scores; empty on failure.
pub async fn fetch_test_scores(api: &dyn ApiClient, user: UserId) -> Vec<TestScore> {
    decode_list(api.get(&format!("/test-scores/{user}")).await)
}

/// Fetches the XP leaderboard; empty on failure.
pub async fn fetch_leaderboard(api: &dyn ApiClient) -> Vec<LeaderboardEntry> {
    decode_list(api.get("/leaderboard").await)
}

// Dashboard extras degrade to an empty list on a gateway failure or an
// unexpected payload shape; the renderer shows its empty state either way.
fn decode_list<T: DeserializeOwned>(result: ApiResult<Value>) -> Vec<T> {
    match result {
        Ok(value) => serde_json::from_value(value).unwrap_or_default(),
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_list_accepts_wire_rows() {
        let value = json!([
            {"resource_name": "arrays.pdf", "topic_id": 1, "created_at": "2024-01-01"},
            {"resource_name": "notes.md"}
        ]);
        let items: Vec<DownloadItem> = decode_list(Ok(value));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].resource_name, "arrays.pdf");
        assert!(items[1].topic_id.is_none());
    }

    #[test]
    fn decode_list_degrades_to_empty() {
        let not_a_list: Vec<TestScore> = decode_list(Ok(json!({"error": "nope"})));
        assert!(not_a_list.is_empty());

        let failed: Vec<LeaderboardEntry> = decode_list(Err(crate::error::ApiError));
        assert!(failed.is_empty());
    }
}
