// src/models/dashboard.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::booking::{Appointment, AppointmentStatus};

// --- BALDES DE TEMPO ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BucketLabel {
    Today,
    Week,
    Month,
    Year,
    LastMonth,
    Upcoming,
}

/// Subconjunto do snapshot que caiu numa janela de tempo.
/// Recalculado a cada leitura, nunca persistido.
#[derive(Debug, Clone)]
pub struct WindowBucket<'a> {
    pub label: BucketLabel,
    pub members: Vec<&'a Appointment>,
}

impl<'a> WindowBucket<'a> {
    pub fn new(label: BucketLabel, members: Vec<&'a Appointment>) -> Self {
        Self { label, members }
    }

    pub fn count(&self) -> usize {
        self.members.len()
    }

    /// Soma dos preços. Satura em vez de estourar com preços absurdos da API.
    pub fn revenue(&self) -> Decimal {
        self.members
            .iter()
            .fold(Decimal::ZERO, |total, apt| total.saturating_add(apt.revenue()))
    }

    pub fn summary(&self) -> BucketSummary {
        BucketSummary {
            label: self.label,
            count: self.count(),
            revenue: self.revenue(),
        }
    }

    pub fn to_owned_members(&self) -> Vec<Appointment> {
        self.members.iter().map(|apt| (*apt).clone()).collect()
    }
}

// O que vai para o front: só contagem e receita
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BucketSummary {
    pub label: BucketLabel,
    pub count: usize,
    pub revenue: Decimal,
}

// --- CHECKOUT (PDV) ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub appointment: Appointment,
    pub revenue: Decimal,
    // Link direto para o PDV com o cliente e o agendamento já selecionados
    pub checkout_path: String,
}

// --- SOLICITAÇÕES PENDENTES ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendingRequest {
    pub appointment_id: String,
    pub status: AppointmentStatus,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub service_name: Option<String>,
    pub price: Decimal,
    #[schema(example = "Oct 16, 2026")]
    pub date_label: Option<String>,
    #[schema(example = "2:00 PM - 3:30 PM")]
    pub time_label: Option<String>,
}

// --- ONBOARDING ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum OnboardingStepId {
    BusinessSetup,
    FirstService,
    Customization,
    FirstBooking,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStep {
    pub id: OnboardingStepId,
    #[schema(value_type = String)]
    pub title: &'static str,
    #[schema(value_type = String)]
    pub description: &'static str,
    pub points: u32,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingProgress {
    pub steps: Vec<OnboardingStep>,
    pub completed_steps: Vec<OnboardingStepId>,
    pub earned_points: u32,
    pub total_points: u32,
    pub percentage: Decimal,
    pub is_complete: bool,
    pub is_new_user: bool,
}

// --- RESUMO DO PAINEL ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub timezone: String,
    pub generated_at: DateTime<Utc>,

    // Cards do topo
    pub today: BucketSummary,
    pub week: BucketSummary,
    pub month: BucketSummary,
    pub year_to_date: BucketSummary,
    pub last_month: BucketSummary,
    pub monthly_growth: Decimal,
    pub scheduled_earnings: BucketSummary,

    // Listas
    pub today_appointments: Vec<Appointment>,
    pub checkout_ready: Vec<CheckoutItem>,
    pub pending_requests: Vec<PendingRequest>,

    pub onboarding: OnboardingProgress,
    pub total_clients: usize,
    pub total_services: usize,
}

/// Sem negócio cadastrado o painel não é calculado: o front mostra o setup.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum DashboardView {
    SetupRequired {
        #[serde(rename = "setupPath")]
        setup_path: &'static str,
    },
    Ready(Box<DashboardSummary>),
}
