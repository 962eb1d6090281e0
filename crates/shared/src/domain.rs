use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ContractViolation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Fixed display order. Chart colors are assigned by position.
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = ContractViolation;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        SentimentLabel::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| ContractViolation::UnknownLabel(raw.to_string()))
    }
}

/// How labels outside {Positive, Neutral, Negative} are treated when decoding
/// a service response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPolicy {
    /// Reject the whole response as a contract violation.
    Strict,
    /// Drop the offending entries and count them in `ignored_labels`.
    Lenient,
}

impl Default for LabelPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            LabelPolicy::Strict
        } else {
            LabelPolicy::Lenient
        }
    }
}

impl FromStr for LabelPolicy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(LabelPolicy::Strict),
            "lenient" => Ok(LabelPolicy::Lenient),
            other => Err(format!("unknown label policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSentiment {
    pub comment: String,
    pub sentiment: SentimentLabel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub url: String,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub items: Vec<CommentSentiment>,
    pub all_labels: Vec<SentimentLabel>,
    pub total_count: u64,
    pub video_id: Option<String>,
    pub ignored_labels: usize,
}
