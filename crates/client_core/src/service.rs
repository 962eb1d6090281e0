use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    domain::{AnalysisRequest, AnalysisResponse, LabelPolicy},
    protocol::{decode_analyze_response, decode_error_body, AnalyzePageQuery, AnalyzeRequestBody},
};
use tracing::{debug, warn};
use url::Url;

use crate::error::{FetchError, ServiceSetupError};

#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, FetchError>;
}

pub struct HttpAnalysisService {
    http: Client,
    analyze_url: Url,
    label_policy: LabelPolicy,
}

impl HttpAnalysisService {
    pub fn new(
        service_url: &str,
        timeout: Duration,
        label_policy: LabelPolicy,
    ) -> Result<Self, ServiceSetupError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            analyze_url: analyze_endpoint(service_url)?,
            label_policy,
        })
    }

    pub fn analyze_url(&self) -> &Url {
        &self.analyze_url
    }
}

fn analyze_endpoint(service_url: &str) -> Result<Url, ServiceSetupError> {
    let mut base = Url::parse(service_url.trim())?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(ServiceSetupError::UnsupportedScheme(
            base.scheme().to_string(),
        ));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join("analyze")?)
}

fn service_error_message(status: StatusCode, body: &[u8]) -> String {
    if let Some(parsed) = decode_error_body(body) {
        return parsed.message();
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        text.to_string()
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, FetchError> {
        debug!(
            page = request.page,
            limit = request.limit,
            endpoint = %self.analyze_url,
            "analysis: posting page request"
        );
        let response = self
            .http
            .post(self.analyze_url.clone())
            .query(&AnalyzePageQuery {
                page: request.page,
                limit: request.limit,
            })
            .json(&AnalyzeRequestBody {
                url: request.url.clone(),
            })
            .send()
            .await
            .map_err(FetchError::transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(FetchError::transport)?;
        if !status.is_success() {
            return Err(FetchError::Service {
                status: status.as_u16(),
                message: service_error_message(status, &body),
            });
        }

        let decoded = decode_analyze_response(&body, request.limit, self.label_policy)?;
        if decoded.ignored_labels > 0 {
            warn!(
                page = request.page,
                ignored = decoded.ignored_labels,
                "analysis: dropped unrecognized sentiment labels"
            );
        }
        Ok(decoded)
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
