// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.
//!
//! Handles POST /v1/turns, GET /v1/customers/{id}, GET /v1/health.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use smartline_core::{InputKind, SmartlineError};

use crate::server::GatewayState;

/// Request body for POST /v1/turns.
#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    /// Utterance or DTMF text for this turn.
    pub input: String,
    /// Session to continue; omitted to start a new call.
    #[serde(default)]
    pub session_id: Option<String>,
    /// How the adapter obtained `input`. Defaults to text.
    #[serde(default)]
    pub input_kind: Option<InputKind>,
}

/// Response body for POST /v1/turns.
#[derive(Debug, Serialize, Deserialize)]
pub struct TurnResponse {
    /// Session id (newly generated for a fresh call).
    pub session_id: String,
    /// Prompt to render back to the caller.
    pub reply_text: String,
    /// True when the call has ended.
    pub session_closed: bool,
    /// ISO 8601 timestamp.
    pub created_at: String,
}

/// Response body for GET /v1/customers/{id}.
#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub id: String,
    pub name: String,
    pub plan: String,
    pub balance: f64,
    pub data_allowance: String,
    pub phone: String,
    pub open_issues: usize,
}

/// Response body for GET /v1/health.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(err: SmartlineError) -> Response {
    let status = match &err {
        SmartlineError::NotFound { .. } => StatusCode::NOT_FOUND,
        SmartlineError::Storage { .. } => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// POST /v1/turns
///
/// Runs one dialog turn. A missing `session_id` starts a new call under a
/// generated uuid, which the caller echoes back on subsequent turns.
pub async fn post_turns(
    State(state): State<GatewayState>,
    Json(body): Json<TurnRequest>,
) -> Response {
    let session_id = body
        .session_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let input_kind = body.input_kind.unwrap_or(InputKind::Text);
    tracing::debug!(session_id, %input_kind, "inbound turn");

    match state.engine.handle_turn(&session_id, &body.input).await {
        Ok(reply) => Json(TurnResponse {
            session_id,
            reply_text: reply.reply_text,
            session_closed: reply.session_closed,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
        .into_response(),
        Err(err) => {
            tracing::warn!(session_id, error = %err, "turn failed");
            error_response(err)
        }
    }
}

/// GET /v1/customers/{id}
///
/// Account status: plan, balance, and the number of reported issues.
pub async fn get_customer(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Response {
    let customer = match state.engine.customer(&id).await {
        Ok(Some(customer)) => customer,
        Ok(None) => {
            return error_response(SmartlineError::NotFound {
                entity: "customer",
                id,
            });
        }
        Err(err) => return error_response(err),
    };
    let open_issues = match state.engine.issues(&id).await {
        Ok(issues) => issues.len(),
        Err(err) => return error_response(err),
    };
    Json(CustomerResponse {
        id: customer.id,
        name: customer.name,
        plan: customer.plan,
        balance: customer.balance,
        data_allowance: customer.data_allowance,
        phone: customer.phone,
        open_issues,
    })
    .into_response()
}

/// GET /v1/health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
