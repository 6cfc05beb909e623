// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::request_log::trace_requests};

pub fn build_router(app_state: AppState) -> Router {
    // Painel (agregados calculados sobre o snapshot da API)
    let dashboard_routes = Router::new()
        .route("/", get(handlers::dashboard::get_dashboard))
        .route("/checkout-ready", get(handlers::dashboard::get_checkout_ready));

    // Solicitações de agendamento (confirmar / recusar)
    let appointment_routes = Router::new()
        .route("/pending", get(handlers::appointments::list_pending))
        .route("/{id}/confirm", post(handlers::appointments::confirm))
        .route("/{id}/deny", post(handlers::appointments::deny));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/appointments", appointment_routes)
        .layer(axum_middleware::from_fn(trace_requests))
        .with_state(app_state)
}
