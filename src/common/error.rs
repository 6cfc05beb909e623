// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Nenhuma credencial (Bearer ou cookie de sessão) veio na requisição
    #[error("Token inválido")]
    InvalidToken,

    // A API de agendamentos recusou as credenciais repassadas
    #[error("API recusou as credenciais ({status})")]
    UpstreamUnauthorized { status: u16 },

    #[error("Recurso não encontrado: {0}")]
    NotFound(String),

    #[error("API respondeu {status} em {path}: {body}")]
    UpstreamStatus { status: u16, path: String, body: String },

    #[error("Falha ao falar com a API: {0}")]
    UpstreamError(#[from] reqwest::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Missing or invalid authentication.".to_string(),
            ),
            AppError::UpstreamUnauthorized { status } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::UNAUTHORIZED);
                (status, "Not authorized to access this business.".to_string())
            }
            AppError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found.")),

            // Falhas da API remota viram 502: o problema não é deste serviço
            ref e @ (AppError::UpstreamStatus { .. } | AppError::UpstreamError(_)) => {
                tracing::error!("🔥 Falha na API de agendamentos: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "The booking service is unavailable. Please try again.".to_string(),
                )
            }
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_failures_map_to_bad_gateway() {
        let err = AppError::UpstreamStatus {
            status: 500,
            path: "/api/appointments".into(),
            body: "boom".into(),
        };
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn upstream_forbidden_passes_through() {
        let err = AppError::UpstreamUnauthorized { status: 403 };
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn missing_credentials_is_unauthorized() {
        assert_eq!(AppError::InvalidToken.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn not_found_keeps_status() {
        let err = AppError::NotFound("Appointment".into());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
