// src/services/appointment_service.rs

use std::sync::Arc;

use chrono_tz::Tz;

use crate::{
    common::error::AppError,
    middleware::auth::UpstreamCredentials,
    models::{booking::Appointment, dashboard::PendingRequest},
    repo::{AppointmentAction, BookingRepository},
    services::clock::{BusinessClock, DatePattern},
};

#[derive(Clone)]
pub struct AppointmentService {
    repo: Arc<dyn BookingRepository>,
    default_tz: Tz,
}

impl AppointmentService {
    pub fn new(repo: Arc<dyn BookingRepository>, default_tz: Tz) -> Self {
        Self { repo, default_tz }
    }

    /// Solicitações aguardando aprovação, com rótulos no fuso do negócio.
    pub async fn list_pending(&self, creds: &UpstreamCredentials) -> Result<Vec<PendingRequest>, AppError> {
        let (business, pending) = tokio::try_join!(
            self.repo.fetch_business(creds),
            self.repo.fetch_pending_appointments(creds),
        )?;

        let clock = match business.as_ref() {
            Some(business) => BusinessClock::for_business(business, self.default_tz),
            None => BusinessClock::new(self.default_tz),
        };

        Ok(pending.iter().map(|apt| pending_request(apt, &clock)).collect())
    }

    pub async fn confirm(&self, creds: &UpstreamCredentials, appointment_id: &str) -> Result<(), AppError> {
        self.apply(creds, appointment_id, AppointmentAction::Confirm).await
    }

    pub async fn deny(&self, creds: &UpstreamCredentials, appointment_id: &str) -> Result<(), AppError> {
        self.apply(creds, appointment_id, AppointmentAction::Deny).await
    }

    async fn apply(
        &self,
        creds: &UpstreamCredentials,
        appointment_id: &str,
        action: AppointmentAction,
    ) -> Result<(), AppError> {
        self.repo.apply_action(creds, appointment_id, action).await?;

        // Nada fica em cache: a próxima leitura do painel já busca o snapshot novo
        tracing::info!(appointment_id, action = action.as_str(), "✅ Agendamento atualizado");
        Ok(())
    }
}

pub fn pending_request(appointment: &Appointment, clock: &BusinessClock) -> PendingRequest {
    let client = appointment.client.as_ref();
    let service = appointment.service.as_ref();

    let time_label = match (appointment.start_time, appointment.end_time) {
        (Some(start), Some(end)) => Some(format!(
            "{} - {}",
            clock.format_date(start, DatePattern::Time),
            clock.format_date(end, DatePattern::Time)
        )),
        (Some(start), None) => Some(clock.format_date(start, DatePattern::Time)),
        _ => None,
    };

    PendingRequest {
        appointment_id: appointment.id.clone(),
        status: appointment.status,
        client_name: client.map(|c| c.full_name()),
        client_email: client.and_then(|c| c.email.clone()),
        client_phone: client.and_then(|c| c.phone.clone()),
        service_name: service.map(|s| s.name.clone()),
        price: appointment.revenue(),
        date_label: appointment
            .start_time
            .map(|start| clock.format_date(start, DatePattern::LongDate)),
        time_label,
    }
}
