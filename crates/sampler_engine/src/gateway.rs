use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};
use sampler_logging::{sampler_debug, sampler_trace};
use serde::Serialize;

use crate::wire::{parse_progress, parse_submit};
use crate::{FailureKind, IssueReport, SampleParams, StatusReport, TaskId, TransportError};

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Transport for the remote sampling service. Implementations do not retry.
#[async_trait::async_trait]
pub trait RemoteJobGateway: Send + Sync {
    async fn submit(&self, params: &SampleParams) -> Result<TaskId, TransportError>;

    async fn poll(&self, task_id: &TaskId) -> Result<StatusReport, TransportError>;

    async fn report_issue(&self, report: &IssueReport) -> Result<(), TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestGateway {
    pub fn new(settings: &GatewaySettings) -> Result<Self, TransportError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { base_url, client })
    }

    /// Appends path segments to the base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, TransportError> {
        sampler_trace!("{} {}", method, url);
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(bytes.to_vec())
    }
}

fn encode_json<T: Serialize>(value: &T) -> Result<Vec<u8>, TransportError> {
    serde_json::to_vec(value)
        .map_err(|err| TransportError::new(FailureKind::Malformed, err.to_string()))
}

#[async_trait::async_trait]
impl RemoteJobGateway for ReqwestGateway {
    async fn submit(&self, params: &SampleParams) -> Result<TaskId, TransportError> {
        let body = encode_json(params)?;
        let bytes = self
            .send(Method::POST, self.endpoint(&["sample"]), Some(body))
            .await?;
        let task_id = parse_submit(&bytes)?;
        sampler_debug!("submit accepted task_id={}", task_id);
        Ok(task_id)
    }

    async fn poll(&self, task_id: &TaskId) -> Result<StatusReport, TransportError> {
        let bytes = self
            .send(Method::GET, self.endpoint(&["progress", task_id.0.as_str()]), None)
            .await?;
        parse_progress(&bytes)
    }

    async fn report_issue(&self, report: &IssueReport) -> Result<(), TransportError> {
        let body = encode_json(report)?;
        self.send(Method::POST, self.endpoint(&["report_issue"]), Some(body))
            .await?;
        Ok(())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return TransportError::new(FailureKind::Malformed, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}
