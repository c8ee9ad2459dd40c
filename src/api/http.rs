//! reqwest-based implementation of the search-job API
//!
//! One struct owns the HTTP client, base URL, Basic-Auth credentials, and the
//! shared [`SessionContext`]. Every method performs a single attempt and maps
//! failures to [`ApiError`]; retrying is the caller's concern.
//!
//! Wire contract:
//! - `POST {base}/search/jobs` with a JSON payload; success is HTTP 202 with
//!   `{"id": ...}`, and the job URL is the collection URL plus the id.
//! - `GET {jobUrl}`; success is HTTP 200 with `{"state", "messageCount"}`.
//! - `GET {jobUrl}/messages?limit=&offset=`; success is HTTP 200 with
//!   `{"messages": [{"map": {...}}, ...]}`.
//!
//! Every response, regardless of status, updates the session context from its
//! `set-cookie` headers before the next request goes out.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

use super::session::SessionContext;
use super::{ApiError, ApiResult, Job, JobStatus, LogRecord, SearchJobApi, SearchJobRequest};
use crate::credentials::Credentials;

/// Timeout for a single HTTP request. Generous because message pages can be
/// large; the retry policy handles requests that exceed it.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for the remote search-job API.
pub struct HttpSearchApi {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    session: Mutex<SessionContext>,
}

impl HttpSearchApi {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            session: Mutex::new(SessionContext::new()),
        })
    }

    /// URL of the job collection endpoint.
    fn jobs_url(&self) -> String {
        format!("{}/search/jobs", self.base_url)
    }

    /// Send a request with auth and session cookies, absorbing any new
    /// cookies from the response.
    async fn dispatch(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let mut builder = builder
            .basic_auth(&self.credentials.email, Some(&self.credentials.password))
            .header(ACCEPT, "application/json");

        let cookie = self
            .session
            .lock()
            .expect("session mutex poisoned")
            .header_value();
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        self.session
            .lock()
            .expect("session mutex poisoned")
            .absorb(response.headers());

        Ok(response)
    }
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    state: String,
    #[serde(rename = "messageCount")]
    message_count: u64,
}

#[derive(Debug, Deserialize)]
struct MessageEnvelope {
    map: LogRecord,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    messages: Vec<MessageEnvelope>,
}

#[async_trait]
impl SearchJobApi for HttpSearchApi {
    async fn submit_job(&self, request: &SearchJobRequest) -> ApiResult<Job> {
        let url = self.jobs_url();
        debug!(%url, from = %request.from, to = %request.to, "POST search job");

        let response = self
            .dispatch(
                self.client
                    .post(&url)
                    .header(CONTENT_TYPE, "application/json")
                    .json(request),
            )
            .await?;

        let status = response.status();
        if status != StatusCode::ACCEPTED {
            return Err(ApiError::UnexpectedStatus {
                operation: "submit",
                status: status.as_u16(),
            });
        }

        let body: SubmitResponse =
            response
                .json()
                .await
                .map_err(|e| ApiError::MalformedResponse {
                    operation: "submit",
                    reason: e.to_string(),
                })?;

        Ok(Job::new(format!("{url}/{}", body.id)))
    }

    async fn job_status(&self, job: &Job) -> ApiResult<JobStatus> {
        debug!(url = %job.url, "GET job status");

        let response = self.dispatch(self.client.get(&job.url)).await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::UnexpectedStatus {
                operation: "poll",
                status: status.as_u16(),
            });
        }

        let body: StatusResponse =
            response
                .json()
                .await
                .map_err(|e| ApiError::MalformedResponse {
                    operation: "poll",
                    reason: e.to_string(),
                })?;

        Ok(JobStatus {
            state: body.state,
            message_count: body.message_count,
        })
    }

    async fn job_messages(
        &self,
        job: &Job,
        limit: usize,
        offset: usize,
    ) -> ApiResult<Vec<LogRecord>> {
        let url = format!("{}/messages", job.url);
        debug!(%url, limit, offset, "GET message page");

        let response = self
            .dispatch(
                self.client
                    .get(&url)
                    .query(&[("limit", limit.to_string()), ("offset", offset.to_string())]),
            )
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::UnexpectedStatus {
                operation: "messages",
                status: status.as_u16(),
            });
        }

        let body: MessagesResponse =
            response
                .json()
                .await
                .map_err(|e| ApiError::MalformedResponse {
                    operation: "messages",
                    reason: e.to_string(),
                })?;

        Ok(body.messages.into_iter().map(|m| m.map).collect())
    }
}
