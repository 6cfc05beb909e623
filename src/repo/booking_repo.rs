// src/repo/booking_repo.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    common::error::AppError,
    middleware::auth::UpstreamCredentials,
    models::booking::{Appointment, Business, Client, Service},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentAction {
    Confirm,
    Deny,
}

impl AppointmentAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentAction::Confirm => "confirm",
            AppointmentAction::Deny => "deny",
        }
    }
}

/// Acesso à API de agendamentos. Persistência e regras de negócio moram lá.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// `None` quando o negócio ainda não foi cadastrado.
    async fn fetch_business(&self, creds: &UpstreamCredentials) -> Result<Option<Business>, AppError>;

    async fn fetch_appointments(&self, creds: &UpstreamCredentials) -> Result<Vec<Appointment>, AppError>;

    async fn fetch_pending_appointments(
        &self,
        creds: &UpstreamCredentials,
    ) -> Result<Vec<Appointment>, AppError>;

    async fn fetch_clients(&self, creds: &UpstreamCredentials) -> Result<Vec<Client>, AppError>;

    async fn fetch_services(&self, creds: &UpstreamCredentials) -> Result<Vec<Service>, AppError>;

    async fn apply_action(
        &self,
        creds: &UpstreamCredentials,
        appointment_id: &str,
        action: AppointmentAction,
    ) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct HttpBookingRepository {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBookingRepository {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("URL base da API não aceita caminho: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn with_credentials(request: RequestBuilder, creds: &UpstreamCredentials) -> RequestBuilder {
        match creds {
            UpstreamCredentials::Bearer(token) => request.bearer_auth(token),
            UpstreamCredentials::Cookie(cookie) => request.header(header::COOKIE, cookie.as_str()),
        }
    }

    // GET genérico: 404 vira `None`, 401/403 passam adiante
    async fn get_json(
        &self,
        segments: &[&str],
        creds: &UpstreamCredentials,
    ) -> Result<Option<Value>, AppError> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "GET na API de agendamentos");

        let response = Self::with_credentials(self.client.get(url.clone()), creds)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Self::status_error(status, url.path(), response.text().await.unwrap_or_default()));
        }

        Ok(Some(response.json::<Value>().await?))
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        creds: &UpstreamCredentials,
    ) -> Result<Vec<T>, AppError> {
        let value = self.get_json(segments, creds).await?;
        Ok(decode_list(value.unwrap_or(Value::Null), &segments.join("/")))
    }

    fn status_error(status: StatusCode, path: &str, body: String) -> AppError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::UpstreamUnauthorized {
                status: status.as_u16(),
            },
            _ => AppError::UpstreamStatus {
                status: status.as_u16(),
                path: path.to_string(),
                body,
            },
        }
    }
}

#[async_trait]
impl BookingRepository for HttpBookingRepository {
    async fn fetch_business(&self, creds: &UpstreamCredentials) -> Result<Option<Business>, AppError> {
        match self.get_json(&["api", "business"], creds).await? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| anyhow::anyhow!("Resposta inválida de /api/business: {}", e).into()),
        }
    }

    async fn fetch_appointments(&self, creds: &UpstreamCredentials) -> Result<Vec<Appointment>, AppError> {
        self.get_list(&["api", "appointments"], creds).await
    }

    async fn fetch_pending_appointments(
        &self,
        creds: &UpstreamCredentials,
    ) -> Result<Vec<Appointment>, AppError> {
        self.get_list(&["api", "appointments", "pending"], creds).await
    }

    async fn fetch_clients(&self, creds: &UpstreamCredentials) -> Result<Vec<Client>, AppError> {
        self.get_list(&["api", "clients"], creds).await
    }

    async fn fetch_services(&self, creds: &UpstreamCredentials) -> Result<Vec<Service>, AppError> {
        self.get_list(&["api", "services"], creds).await
    }

    async fn apply_action(
        &self,
        creds: &UpstreamCredentials,
        appointment_id: &str,
        action: AppointmentAction,
    ) -> Result<(), AppError> {
        let url = self.endpoint(&["api", "appointments", appointment_id, action.as_str()])?;
        tracing::debug!(%url, "POST na API de agendamentos");

        let response = Self::with_credentials(self.client.post(url.clone()), creds)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound("Appointment".to_string()));
        }
        if !status.is_success() {
            return Err(Self::status_error(status, url.path(), response.text().await.unwrap_or_default()));
        }
        Ok(())
    }
}

/// Snapshot tolerante: se não for array vira lista vazia, e itens que não
/// decodificam são descartados com aviso em vez de derrubar a leitura.
pub fn decode_list<T: DeserializeOwned>(value: Value, source: &str) -> Vec<T> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => return Vec::new(),
        other => {
            tracing::warn!(source, kind = json_kind(&other), "Resposta não é uma lista, tratando como vazia");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(source, index, error = %e, "Item ignorado no snapshot");
                None
            }
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
