// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Dashboard ---
        handlers::dashboard::get_dashboard,
        handlers::dashboard::get_checkout_ready,

        // --- Appointments ---
        handlers::appointments::list_pending,
        handlers::appointments::confirm,
        handlers::appointments::deny,
    ),
    components(
        schemas(
            // --- Booking ---
            models::booking::AppointmentStatus,
            models::booking::Client,
            models::booking::Service,
            models::booking::Business,
            models::booking::Appointment,

            // --- Dashboard ---
            models::dashboard::BucketLabel,
            models::dashboard::BucketSummary,
            models::dashboard::CheckoutItem,
            models::dashboard::PendingRequest,
            models::dashboard::OnboardingStepId,
            models::dashboard::OnboardingStep,
            models::dashboard::OnboardingProgress,
            models::dashboard::DashboardSummary,

            // --- Payloads ---
            handlers::appointments::ActionResponse,
        )
    ),
    tags(
        (name = "Dashboard", description = "Indicadores do painel do salão"),
        (name = "Appointments", description = "Solicitações de agendamento")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        // As credenciais são repassadas para a API de agendamentos
        components.add_security_scheme(
            "api_bearer",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("connect.sid"))),
        );
    }
}
