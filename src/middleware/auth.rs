// src/middleware/auth.rs

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::common::error::AppError;

// Quem valida o token é a API de agendamentos; aqui só repassamos
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamCredentials {
    Bearer(String),
    Cookie(String),
}

/// Extrator com as credenciais do chamador, prontas para repassar à API.
/// Bearer tem prioridade sobre o cookie de sessão.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller(pub UpstreamCredentials);

impl<S> FromRequestParts<S> for AuthenticatedCaller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if parts.headers.contains_key(header::AUTHORIZATION) {
            let TypedHeader(Authorization(bearer)) =
                TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                    .await
                    .map_err(|_| AppError::InvalidToken)?;

            let token = bearer.token().trim();
            if token.is_empty() {
                return Err(AppError::InvalidToken);
            }
            return Ok(AuthenticatedCaller(UpstreamCredentials::Bearer(token.to_string())));
        }

        let cookie = parts
            .headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match cookie {
            Some(cookie) => Ok(AuthenticatedCaller(UpstreamCredentials::Cookie(cookie.to_string()))),
            None => Err(AppError::InvalidToken),
        }
    }
}
