// tests/common/mod.rs

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use besmi::{
    common::error::AppError,
    middleware::auth::UpstreamCredentials,
    models::booking::{Appointment, AppointmentStatus, Business, Client, Service},
    repo::{AppointmentAction, BookingRepository},
};

/// Repositório em memória para os testes de rota.
/// As ações mudam o status como a API faria, então a próxima leitura já reflete.
#[derive(Clone, Default)]
pub struct InMemoryBookingRepository {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    business: Option<Business>,
    appointments: Vec<Appointment>,
    clients: Vec<Client>,
    services: Vec<Service>,
    actions: Vec<(String, AppointmentAction)>,
}

impl InMemoryBookingRepository {
    pub fn new(
        business: Option<Business>,
        appointments: Vec<Appointment>,
        clients: Vec<Client>,
        services: Vec<Service>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                business,
                appointments,
                clients,
                services,
                actions: Vec::new(),
            })),
        }
    }

    /// Ações recebidas, na ordem.
    pub fn recorded_actions(&self) -> Vec<(String, AppointmentAction)> {
        self.lock().actions.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // Um teste que entrou em pânico com o lock não invalida os dados
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn fetch_business(&self, _creds: &UpstreamCredentials) -> Result<Option<Business>, AppError> {
        Ok(self.lock().business.clone())
    }

    async fn fetch_appointments(&self, _creds: &UpstreamCredentials) -> Result<Vec<Appointment>, AppError> {
        Ok(self.lock().appointments.clone())
    }

    async fn fetch_pending_appointments(
        &self,
        _creds: &UpstreamCredentials,
    ) -> Result<Vec<Appointment>, AppError> {
        Ok(self
            .lock()
            .appointments
            .iter()
            .filter(|apt| apt.status == AppointmentStatus::Pending)
            .cloned()
            .collect())
    }

    async fn fetch_clients(&self, _creds: &UpstreamCredentials) -> Result<Vec<Client>, AppError> {
        Ok(self.lock().clients.clone())
    }

    async fn fetch_services(&self, _creds: &UpstreamCredentials) -> Result<Vec<Service>, AppError> {
        Ok(self.lock().services.clone())
    }

    async fn apply_action(
        &self,
        _creds: &UpstreamCredentials,
        appointment_id: &str,
        action: AppointmentAction,
    ) -> Result<(), AppError> {
        let mut state = self.lock();
        let appointment = state
            .appointments
            .iter_mut()
            .find(|apt| apt.id == appointment_id)
            .ok_or_else(|| AppError::NotFound("Appointment".to_string()))?;

        appointment.status = match action {
            AppointmentAction::Confirm => AppointmentStatus::Confirmed,
            AppointmentAction::Deny => AppointmentStatus::Denied,
        };
        state.actions.push((appointment_id.to_string(), action));
        Ok(())
    }
}
