//! Score Client — the single point of entry for all scoring-backend calls.
//!
//! ARCHITECTURAL RULE: no other module performs HTTP. The submission
//! controller depends on the `ScoreBackend` trait; everything network-shaped
//! lives here, and every failure leaves this module classified as a
//! `ScoreError` — raw transport errors do not escape.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::candidate::RawCandidate;
use crate::query::ScoreQuery;

pub const SCORE_PATH: &str = "/api/score";
/// Scoring runs several LLM passes per candidate; the transport waits five
/// minutes before treating the call as lost.
const REQUEST_TIMEOUT: Duration = Duration::from_millis(300_000);

#[derive(Debug, Error)]
pub enum ScoreError {
    /// A response arrived but carried a non-success status.
    #[error("后端返回错误: {status} - {body}")]
    Backend { status: u16, body: String },

    /// The request went out but no response came back.
    #[error("无法连接到后端服务器，请检查网络连接和后端服务是否运行")]
    Unreachable(#[source] reqwest::Error),

    /// Anything else that broke while building or sending the request.
    #[error("调用后端时发生异常: {0}")]
    Unexpected(String),
}

/// The scoring backend seam. The controller talks to this trait so tests can
/// swap the HTTP client for a canned backend.
#[async_trait]
pub trait ScoreBackend: Send + Sync {
    /// Performs one request-response cycle. No retries.
    async fn fetch_ranking(&self, query: &ScoreQuery) -> Result<Vec<RawCandidate>, ScoreError>;
}

#[derive(Debug, Serialize)]
struct ScoreRequestBody<'a> {
    job_title: &'a str,
    requirements: &'a str,
    top_n: u32,
}

/// The response body has no single shape: a bare array, a `results` wrapper,
/// or (from older backend builds) something else entirely. The union is
/// resolved once, here, so consumers only ever see a record sequence.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResponsePayload {
    Records(Vec<Value>),
    Wrapped { results: Vec<Value> },
    Unrecognized(Value),
}

impl ResponsePayload {
    fn into_records(self) -> Vec<RawCandidate> {
        let items = match self {
            ResponsePayload::Records(items) => items,
            ResponsePayload::Wrapped { results } => results,
            ResponsePayload::Unrecognized(value) => {
                warn!("后端返回未知数据格式: {value}");
                return Vec::new();
            }
        };
        // A single undecodable element degrades to an all-absent record; the
        // normalizer turns it into sentinels instead of dropping the row.
        items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect()
    }
}

/// Resolves a 2xx body into candidate records. Unrecognized shapes and
/// non-JSON bodies yield an empty record set rather than an error.
fn parse_records(body: &str) -> Vec<RawCandidate> {
    match serde_json::from_str::<ResponsePayload>(body) {
        Ok(payload) => payload.into_records(),
        Err(_) => Vec::new(),
    }
}

/// Timeouts and connection failures mean the backend never answered; anything
/// else on the transport is unexpected.
fn classify_transport_error(err: reqwest::Error) -> ScoreError {
    if err.is_timeout() || err.is_connect() {
        ScoreError::Unreachable(err)
    } else {
        ScoreError::Unexpected(err.to_string())
    }
}

/// The production backend over HTTP.
#[derive(Clone)]
pub struct HttpScoreClient {
    client: Client,
    base_url: String,
}

impl HttpScoreClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ScoreBackend for HttpScoreClient {
    async fn fetch_ranking(&self, query: &ScoreQuery) -> Result<Vec<RawCandidate>, ScoreError> {
        let url = format!("{}{}", self.base_url, SCORE_PATH);
        let body = ScoreRequestBody {
            job_title: &query.job_title,
            requirements: &query.requirements,
            top_n: query.top_n,
        };

        info!("发送请求到后端: {url}");
        debug!("请求数据: {body:?}");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        info!("后端响应状态码: {status}");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("后端返回错误: {status} - {body}");
            return Err(ScoreError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await.map_err(classify_transport_error)?;
        let records = parse_records(&text);
        info!("收到 {} 个评分结果", records.len());
        Ok(records)
    }
}
