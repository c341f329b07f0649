//! Retell client — registers web-call sessions for voice interviews.
//!
//! Failures are returned to the caller as-is; there is no retry.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const CREATE_WEB_CALL_PATH: &str = "/v2/create-web-call";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum CallError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider refused the request, e.g. unknown agent id.
    #[error("Call provider rejected request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Call provider unavailable (status {status}): {message}")]
    Unavailable { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallRequest {
    pub agent_id: String,
    #[serde(rename = "retell_llm_dynamic_variables")]
    pub dynamic_variables: HashMap<String, String>,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRegistration {
    pub call_id: String,
    pub access_token: String,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub call_status: Option<String>,
}

#[async_trait]
pub trait CallRegistrar: Send + Sync {
    async fn register_call(&self, request: &CallRequest) -> Result<CallRegistration, CallError>;
}

#[derive(Debug, Deserialize)]
struct RetellErrorBody {
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct RetellClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl RetellClient {
    pub fn new(api_key: String, base_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CallRegistrar for RetellClient {
    async fn register_call(&self, request: &CallRequest) -> Result<CallRegistration, CallError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, CREATE_WEB_CALL_PATH))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body);
            warn!("Retell returned {status}: {message}");
            return Err(classify_failure(status, message));
        }

        let registration: CallRegistration = serde_json::from_str(&body)?;
        debug!(
            "Registered call {} for agent {}",
            registration.call_id, request.agent_id
        );
        Ok(registration)
    }
}

/// 400, 404 and 422 mean the caller sent a bad request or agent id.
/// Every other status, including 401 and 429, is reported as unavailable.
fn classify_failure(status: StatusCode, message: String) -> CallError {
    let status_code = status.as_u16();
    match status {
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => {
            CallError::Rejected {
                status: status_code,
                message,
            }
        }
        _ => CallError::Unavailable {
            status: status_code,
            message,
        },
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<RetellErrorBody>(body)
        .ok()
        .and_then(|e| e.error_message.or(e.message))
        .unwrap_or_else(|| body.to_string())
}
