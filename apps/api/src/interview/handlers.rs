//! Axum route handlers for the Interview API.

use std::collections::HashMap;

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::auth::AuthUser;
use crate::companies::{available_company_slugs, get_company_config, is_valid_company_slug};
use crate::errors::AppError;
use crate::interview::retell::{CallError, CallRegistration, CallRequest};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCallRequest {
    #[serde(default, alias = "agent_id")]
    pub agent_id: Option<String>,
    #[serde(default, alias = "company_slug", alias = "company")]
    pub company_slug: Option<String>,
    #[serde(default, alias = "dynamic_variables")]
    pub dynamic_variables: HashMap<String, String>,
}

/// POST /api/v1/interviews/register-call
///
/// Registers a voice-interview session with the call provider and returns
/// the credentials the browser client needs to join it.
pub async fn handle_register_call(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<RegisterCallRequest>,
) -> Result<Json<CallRegistration>, AppError> {
    let call = build_call_request(&request, state.config.retell_agent_id.as_deref(), &user)?;

    let registration = state.calls.register_call(&call).await.map_err(|e| match e {
        CallError::Rejected { message, .. } => {
            AppError::Validation(format!("Call registration rejected: {message}"))
        }
        other => AppError::Upstream(other.to_string()),
    })?;

    info!(
        "Registered interview call {} for user {}",
        registration.call_id, user.user_id
    );
    Ok(Json(registration))
}

/// Resolves the agent and merges company details into the dynamic
/// variables. Variables supplied by the caller take precedence.
fn build_call_request(
    request: &RegisterCallRequest,
    default_agent: Option<&str>,
    user: &AuthUser,
) -> Result<CallRequest, AppError> {
    let agent_id = request
        .agent_id
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .or(default_agent)
        .ok_or_else(|| AppError::Validation("agentId is required".to_string()))?;

    let company_slug = request
        .company_slug
        .as_deref()
        .filter(|s| !s.trim().is_empty());
    if let Some(slug) = company_slug.filter(|s| !is_valid_company_slug(s)) {
        return Err(AppError::Validation(format!(
            "Unknown company '{}'; expected one of: {}",
            slug.trim(),
            available_company_slugs().join(", ")
        )));
    }

    let mut dynamic_variables = HashMap::new();
    if let Some(company) = company_slug.and_then(get_company_config) {
        dynamic_variables.insert("company_name".to_string(), company.display_name.to_string());
        dynamic_variables.insert(
            "company_description".to_string(),
            company.description.to_string(),
        );
        dynamic_variables.insert("company_folder".to_string(), company.folder_name.to_string());
    }
    dynamic_variables.extend(request.dynamic_variables.clone());

    Ok(CallRequest {
        agent_id: agent_id.to_string(),
        dynamic_variables,
        metadata: HashMap::from([("user_id".to_string(), user.user_id.clone())]),
    })
}
