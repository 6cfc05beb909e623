// src/handlers/appointments.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedCaller,
    models::dashboard::PendingRequest,
};

#[derive(Debug, Validate)]
struct AppointmentIdParam {
    #[validate(length(min = 1, max = 128, message = "Invalid appointment id."))]
    appointment_id: String,
}

impl AppointmentIdParam {
    fn parse(raw: String) -> Result<Self, AppError> {
        let param = Self { appointment_id: raw.trim().to_string() };
        param.validate()?;
        Ok(param)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub appointment_id: String,
    #[schema(value_type = String, example = "confirm")]
    pub action: &'static str,
}

// GET /api/appointments/pending
#[utoipa::path(
    get,
    path = "/api/appointments/pending",
    tag = "Appointments",
    responses(
        (status = 200, description = "Solicitações pendentes com data e hora no fuso do negócio", body = Vec<PendingRequest>),
        (status = 401, description = "Sem credenciais")
    ),
    security(
        ("api_bearer" = []),
        ("session_cookie" = [])
    )
)]
pub async fn list_pending(
    State(app_state): State<AppState>,
    caller: AuthenticatedCaller,
) -> Result<impl IntoResponse, AppError> {
    let pending = app_state.appointment_service.list_pending(&caller.0).await?;

    Ok((StatusCode::OK, Json(pending)))
}

// POST /api/appointments/{id}/confirm
#[utoipa::path(
    post,
    path = "/api/appointments/{id}/confirm",
    tag = "Appointments",
    params(
        ("id" = String, Path, description = "ID do agendamento")
    ),
    responses(
        (status = 200, description = "Confirma a solicitação", body = ActionResponse),
        (status = 400, description = "ID inválido"),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(
        ("api_bearer" = []),
        ("session_cookie" = [])
    )
)]
pub async fn confirm(
    State(app_state): State<AppState>,
    caller: AuthenticatedCaller,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let param = AppointmentIdParam::parse(raw_id)?;

    app_state
        .appointment_service
        .confirm(&caller.0, &param.appointment_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ActionResponse { appointment_id: param.appointment_id, action: "confirm" }),
    ))
}

// POST /api/appointments/{id}/deny
#[utoipa::path(
    post,
    path = "/api/appointments/{id}/deny",
    tag = "Appointments",
    params(
        ("id" = String, Path, description = "ID do agendamento")
    ),
    responses(
        (status = 200, description = "Recusa a solicitação", body = ActionResponse),
        (status = 400, description = "ID inválido"),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(
        ("api_bearer" = []),
        ("session_cookie" = [])
    )
)]
pub async fn deny(
    State(app_state): State<AppState>,
    caller: AuthenticatedCaller,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let param = AppointmentIdParam::parse(raw_id)?;

    app_state
        .appointment_service
        .deny(&caller.0, &param.appointment_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ActionResponse { appointment_id: param.appointment_id, action: "deny" }),
    ))
}
