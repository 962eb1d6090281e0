use serde::{Deserialize, Serialize};

use crate::{
    domain::{AnalysisResponse, CommentSentiment, LabelPolicy, SentimentLabel},
    error::ContractViolation,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequestBody {
    pub url: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalyzePageQuery {
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentSentimentRecord {
    pub comment: String,
    pub sentiment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponseBody {
    pub sentiments: Vec<CommentSentimentRecord>,
    pub all_sentiments: Vec<String>,
    pub total_fetched: u64,
    #[serde(
        default,
        rename = "videoId",
        alias = "video_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    pub detail: serde_json::Value,
}

impl ServiceErrorBody {
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(detail) => detail.clone(),
            other => other.to_string(),
        }
    }
}

impl AnalyzeResponseBody {
    pub fn into_response(
        self,
        limit: u32,
        policy: LabelPolicy,
    ) -> Result<AnalysisResponse, ContractViolation> {
        if self.sentiments.len() > limit as usize {
            return Err(ContractViolation::PageOverflow {
                returned: self.sentiments.len(),
                limit,
            });
        }

        let mut ignored_labels = 0;
        let mut items = Vec::with_capacity(self.sentiments.len());
        for record in self.sentiments {
            match resolve_label(&record.sentiment, policy)? {
                Some(sentiment) => items.push(CommentSentiment {
                    comment: record.comment,
                    sentiment,
                }),
                None => ignored_labels += 1,
            }
        }

        let mut all_labels = Vec::with_capacity(self.all_sentiments.len());
        for raw in &self.all_sentiments {
            match resolve_label(raw, policy)? {
                Some(label) => all_labels.push(label),
                None => ignored_labels += 1,
            }
        }

        Ok(AnalysisResponse {
            items,
            all_labels,
            total_count: self.total_fetched,
            video_id: self.video_id,
            ignored_labels,
        })
    }
}

fn resolve_label(
    raw: &str,
    policy: LabelPolicy,
) -> Result<Option<SentimentLabel>, ContractViolation> {
    match (raw.parse::<SentimentLabel>(), policy) {
        (Ok(label), _) => Ok(Some(label)),
        (Err(_), LabelPolicy::Lenient) => Ok(None),
        (Err(err), LabelPolicy::Strict) => Err(err),
    }
}

/// Decodes a raw success body. Missing or mistyped fields become
/// [`ContractViolation::Malformed`].
pub fn decode_analyze_response(
    body: &[u8],
    limit: u32,
    policy: LabelPolicy,
) -> Result<AnalysisResponse, ContractViolation> {
    let parsed: AnalyzeResponseBody = serde_json::from_slice(body)
        .map_err(|err| ContractViolation::Malformed(err.to_string()))?;
    parsed.into_response(limit, policy)
}

pub fn decode_error_body(body: &[u8]) -> Option<ServiceErrorBody> {
    serde_json::from_slice(body).ok()
}
