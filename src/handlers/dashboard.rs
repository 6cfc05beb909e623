// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedCaller,
    models::dashboard::{CheckoutItem, DashboardSummary},
};

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Painel calculado (`state: ready`). Sem negócio cadastrado volta `{state: setupRequired, setupPath}`", body = DashboardSummary),
        (status = 401, description = "Sem credenciais"),
        (status = 502, description = "API de agendamentos indisponível")
    ),
    security(
        ("api_bearer" = []),
        ("session_cookie" = [])
    )
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    caller: AuthenticatedCaller,
) -> Result<impl IntoResponse, AppError> {
    let view = app_state.dashboard_service.get_dashboard(&caller.0).await?;

    Ok((StatusCode::OK, Json(view)))
}

// GET /api/dashboard/checkout-ready
#[utoipa::path(
    get,
    path = "/api/dashboard/checkout-ready",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Agendamentos confirmados prontos para o checkout no PDV", body = Vec<CheckoutItem>),
        (status = 401, description = "Sem credenciais")
    ),
    security(
        ("api_bearer" = []),
        ("session_cookie" = [])
    )
)]
pub async fn get_checkout_ready(
    State(app_state): State<AppState>,
    caller: AuthenticatedCaller,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state.dashboard_service.get_checkout_ready(&caller.0).await?;

    Ok((StatusCode::OK, Json(items)))
}
