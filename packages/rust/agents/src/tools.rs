//! Tools the agents may call.

use campaign_ingest::IngestClient;
use campaign_shared::{CampaignError, Result};
use campaign_storage::Storage;
use serde::Serialize;
use tracing::info;

/// Collection briefs are written to.
pub const BRIEF_COLLECTION: &str = "campaignBrief";

/// Tool identifiers as exposed to the agent framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tool {
    #[serde(rename = "file_review_tool")]
    FileReview,
    #[serde(rename = "insert_brief")]
    InsertBrief,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FileReview => "file_review_tool",
            Self::InsertBrief => "insert_brief",
        }
    }
}

/// Read every linked file and return the aggregate text blob.
pub async fn file_review_tool<S: AsRef<str>>(client: &IngestClient, file_urls: &[S]) -> String {
    client.text_from_urls(file_urls).await
}

/// Persist a campaign brief and return `new_brief_id : {id}`.
///
/// The brief must serialize to a JSON object.
pub async fn insert_brief<T: Serialize>(storage: &Storage, brief: &T) -> Result<String> {
    let value = serde_json::to_value(brief)
        .map_err(|e| CampaignError::validation(format!("brief is not serializable: {e}")))?;
    if !value.is_object() {
        return Err(CampaignError::validation("brief must be a JSON object"));
    }

    let id = storage.insert_record(BRIEF_COLLECTION, &value).await?;
    info!(%id, "brief inserted");
    Ok(format!("new_brief_id : {id}"))
}

#[cfg(test)]
mod tests {
    use campaign_shared::IngestConfig;
    use serde_json::json;
    use uuid::Uuid;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::schemas::CampaignBrief;

    async fn temp_storage() -> Storage {
        let tmp = std::env::temp_dir().join(format!("campaign_tools_{}.db", Uuid::now_v7()));
        Storage::open(&tmp).await.expect("open test db")
    }

    #[tokio::test]
    async fn file_review_reads_linked_files() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rfp/budget.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string("channel,usd\nTikTok,500\n"))
            .mount(&server)
            .await;

        let client = IngestClient::new(&IngestConfig::default()).unwrap();
        let urls = [format!("{}/rfp/budget.csv", server.uri())];
        let text = file_review_tool(&client, &urls).await;

        assert_eq!(text, "\n--- budget.csv [CSV] ---\nchannel, usd\nTikTok, 500\n");
    }

    #[tokio::test]
    async fn insert_brief_returns_id_line() {
        let storage = temp_storage().await;
        let brief = CampaignBrief {
            brief_type: "product launch".into(),
            brand_tone: "playful".into(),
            ..Default::default()
        };

        let reply = insert_brief(&storage, &brief).await.unwrap();
        let id = reply.strip_prefix("new_brief_id : ").expect("id prefix");

        let record = storage.get_record(id).await.unwrap().expect("stored");
        assert_eq!(record.collection, BRIEF_COLLECTION);
        assert_eq!(record.data["brand_tone"], "playful");
    }

    #[tokio::test]
    async fn insert_brief_accepts_loose_json() {
        let storage = temp_storage().await;
        let reply = insert_brief(&storage, &json!({"brief_type": "always-on"}))
            .await
            .unwrap();
        assert!(reply.starts_with("new_brief_id : "));
        assert_eq!(storage.list_records(BRIEF_COLLECTION).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn insert_brief_rejects_non_objects() {
        let storage = temp_storage().await;
        let err = insert_brief(&storage, &json!(["not", "a", "brief"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CampaignError::Validation { .. }));
        assert!(storage.list_records(BRIEF_COLLECTION).await.unwrap().is_empty());
    }

    #[test]
    fn tool_names_serialize() {
        assert_eq!(
            serde_json::to_value([Tool::FileReview, Tool::InsertBrief]).unwrap(),
            json!(["file_review_tool", "insert_brief"])
        );
    }
}
