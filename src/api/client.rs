//! HTTP client for the agent service.
//!
//! One `AgentClient` wraps one pooled reqwest client. Operations are plain
//! async fns returning `ApiResult<T>`; nothing here retries, caches, or
//! tracks agent state between calls, and concurrent calls settle
//! independently.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::api::error::{ApiError, ApiResult};
use crate::api::payload::{
    AgendaPayload, FramePayload, ImpassePayload, KnowledgeResource, OntoLangResult,
    ReportPayload, SignalAnchor, SignalPayload, SignalStatus, Speaker,
};
use crate::utils::config::Config;
use crate::utils::debug::debug_print;
use crate::utils::logger;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The service was built against clients that spell out the charset.
const CONTENT_TYPE_JSON_UTF8: &str = "application/json; charset=utf-8";

/// Client for one agent service endpoint.
#[derive(Debug, Clone)]
pub struct AgentClient {
    client: Client,
    base_url: String,
}

impl AgentClient {
    /// Creates a client with the default request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(5)
            .user_agent(concat!("ontoctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_timeout(&config.endpoint, Duration::from_secs(config.timeout_seconds))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches a frame from agent memory.
    ///
    /// Frame ids carry `@`, `.`, and `#` freely, so the id is percent-encoded
    /// before it lands in the query string.
    pub async fn frame(&self, id: &str) -> ApiResult<FramePayload> {
        self.get_payload(format!("/api/frame?id={}", urlencoding::encode(id)))
            .await
    }

    // TODO: escape the ids on the remaining lookups once the service side
    // confirms it decodes percent-encoding there; today only `frame` escapes
    // and everything else goes out verbatim.
    pub async fn impasse(&self, id: &str) -> ApiResult<ImpassePayload> {
        self.get_payload(format!("/api/impasse?id={}", id)).await
    }

    /// Lists signal anchors in the given lifecycle state.
    pub async fn signals(&self, status: SignalStatus) -> ApiResult<Vec<SignalAnchor>> {
        self.get_payload(format!("/api/signals?status={}", status.as_str()))
            .await
    }

    pub async fn report(&self, id: &str) -> ApiResult<ReportPayload> {
        self.get_payload(format!("/api/report?id={}", id)).await
    }

    /// Fetches one signal: its anchor plus the full content frames.
    pub async fn signal(&self, id: &str) -> ApiResult<SignalPayload> {
        self.get_payload(format!("/api/signal?id={}", id)).await
    }

    /// Fetches the whole agenda: goal tree plus decision options.
    pub async fn agenda(&self) -> ApiResult<AgendaPayload> {
        self.get_payload("/api/agenda".to_string()).await
    }

    /// Releases a reserved effector so the agent can hand it to another step.
    ///
    /// Decodes like the read endpoints (two passes). The stock service
    /// answers this route with a bare `OK` text body, so against that build
    /// the call surfaces `ApiError::Decode` even though the release went
    /// through.
    pub async fn release_effector(&self, effector: &str) -> ApiResult<Value> {
        let (url, body) = self
            .post_json("/signal/release", &json!({ "effector": effector }))
            .await?;
        let value = parse_json(&url, &body)?;
        unwrap_nested(&url, value)
    }

    /// Injects a speech signal, as if `text` had been heard from `speaker`.
    pub async fn signal_speech(&self, text: &str, speaker: &Speaker) -> ApiResult<Value> {
        let payload = json!({ "speaker": speaker, "text": text });
        let (url, body) = self.post_json("/signal/speech", &payload).await?;
        parse_json(&url, &body)
    }

    /// Loads one knowledge file into memory and returns the updated
    /// knowledge-resource listing.
    pub async fn load_knowledge(
        &self,
        package: &str,
        file: &str,
    ) -> ApiResult<Vec<KnowledgeResource>> {
        let payload = json!({ "package": package, "file": file });
        let (url, body) = self.post_json("/ontolang/load", &payload).await?;
        let value = parse_json(&url, &body)?;
        from_value(&url, value)
    }

    /// Runs OntoLang statements inside the live agent.
    pub async fn execute_ontolang(&self, source: &str) -> ApiResult<OntoLangResult> {
        let payload = json!({ "ontolang": source });
        let (url, body) = self.post_json("/ontolang/execute", &payload).await?;
        let value = parse_json(&url, &body)?;
        from_value(&url, value)
    }

    /// Adds a goal directly to the agenda, bypassing normal signal intake.
    ///
    /// The service ships this route for demos only; production builds turn
    /// it off with `--no-default-features`.
    #[cfg(feature = "demo")]
    pub async fn demo_add_goal(
        &self,
        definition: &str,
        variables: &std::collections::HashMap<String, String>,
        subgoal_of: &[String],
    ) -> ApiResult<Value> {
        let payload = json!({
            "definition": definition,
            "variables": variables,
            "subgoal_of": subgoal_of,
        });
        let (url, body) = self.post_json("/demo/agenda/add_goal", &payload).await?;
        parse_json(&url, &body)
    }

    /// Runs a single agenda iteration.
    pub async fn heartbeat_pulse(&self) -> ApiResult<()> {
        self.post_empty("/heartbeat/pulse").await.map(|_| ())
    }

    /// Starts the background heartbeat; the service answers 400 when it is
    /// already running.
    pub async fn heartbeat_start(&self) -> ApiResult<()> {
        self.post_empty("/heartbeat/start").await.map(|_| ())
    }

    pub async fn heartbeat_stop(&self) -> ApiResult<()> {
        self.post_empty("/heartbeat/stop").await.map(|_| ())
    }

    /// GET on the double-decode path shared by the read endpoints.
    async fn get_payload<T: DeserializeOwned>(&self, path_and_query: String) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path_and_query);
        log_request("GET", &url, None);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;
        let body = read_success_body(&url, response).await?;

        let value = unwrap_nested(&url, parse_json(&url, &body)?)?;
        from_value(&url, value)
    }

    /// POST with a JSON body; hands the response text back for the caller's
    /// decode pass.
    async fn post_json(&self, path: &str, payload: &Value) -> ApiResult<(String, String)> {
        let url = format!("{}{}", self.base_url, path);
        log_request("POST", &url, Some(payload));

        // Set before .json() so reqwest keeps this value instead of its
        // charset-less default.
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON_UTF8)
            .json(payload)
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;
        let body = read_success_body(&url, response).await?;

        Ok((url, body))
    }

    /// Body-less POST for the heartbeat routes; replies are plain text.
    async fn post_empty(&self, path: &str) -> ApiResult<String> {
        let url = format!("{}{}", self.base_url, path);
        log_request("POST", &url, None);

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;
        read_success_body(&url, response).await
    }
}

fn log_request(method: &str, url: &str, payload: Option<&Value>) {
    match payload {
        Some(payload) => logger::info(&format!("{} {} {}", method, url, payload)),
        None => logger::info(&format!("{} {}", method, url)),
    }
    debug_print(&format!("{} {}", method, url));
}

fn transport_error(url: &str, source: reqwest::Error) -> ApiError {
    let err = ApiError::transport(url, source);
    logger::error(&err.to_string());
    err
}

fn decode_error(url: &str, source: serde_json::Error) -> ApiError {
    let err = ApiError::decode(url, source);
    logger::error(&err.to_string());
    err
}

/// Checks the status and drains the body; failures are logged before they
/// propagate.
async fn read_success_body(url: &str, response: reqwest::Response) -> ApiResult<String> {
    let status = response.status();
    debug_print(&format!("{} from {}", status.as_u16(), url));

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let err = ApiError::status(url, status, body);
        logger::error(&err.to_string());
        return Err(err);
    }

    response.text().await.map_err(|e| transport_error(url, e))
}

/// First decode pass over a response body.
fn parse_json(url: &str, body: &str) -> ApiResult<Value> {
    serde_json::from_str(body).map_err(|e| decode_error(url, e))
}

/// Second decode pass for payloads framed as a JSON-encoded string.
///
/// Some service builds serialize their reply twice, leaving the real payload
/// inside a JSON string; this unwraps exactly one level of that framing.
/// Anything not string-framed passes through untouched.
fn unwrap_nested(url: &str, value: Value) -> ApiResult<Value> {
    match value {
        Value::String(inner) => serde_json::from_str(&inner).map_err(|e| decode_error(url, e)),
        other => Ok(other),
    }
}

fn from_value<T: DeserializeOwned>(url: &str, value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|e| decode_error(url, e))
}
