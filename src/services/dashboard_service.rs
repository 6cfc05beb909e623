// src/services/dashboard_service.rs

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::{
    common::error::AppError,
    middleware::auth::UpstreamCredentials,
    models::{
        booking::{Appointment, Business, Client, Service},
        dashboard::{CheckoutItem, DashboardSummary, DashboardView},
    },
    repo::BookingRepository,
    services::{
        analytics,
        appointment_service::pending_request,
        checkout,
        clock::{BusinessClock, Clock},
        onboarding,
    },
};

pub const SETUP_PATH: &str = "/setup";

/// Tudo o que o painel precisa, buscado de uma vez a cada leitura.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub business: Option<Business>,
    pub appointments: Vec<Appointment>,
    pub pending: Vec<Appointment>,
    pub clients: Vec<Client>,
    pub services: Vec<Service>,
}

#[derive(Clone)]
pub struct DashboardService {
    repo: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
    default_tz: Tz,
}

impl DashboardService {
    pub fn new(repo: Arc<dyn BookingRepository>, clock: Arc<dyn Clock>, default_tz: Tz) -> Self {
        Self { repo, clock, default_tz }
    }

    // As cinco leituras saem em paralelo; qualquer falha derruba a leitura inteira
    pub async fn load_snapshot(&self, creds: &UpstreamCredentials) -> Result<DashboardSnapshot, AppError> {
        let (business, appointments, pending, clients, services) = tokio::try_join!(
            self.repo.fetch_business(creds),
            self.repo.fetch_appointments(creds),
            self.repo.fetch_pending_appointments(creds),
            self.repo.fetch_clients(creds),
            self.repo.fetch_services(creds),
        )?;

        tracing::debug!(
            has_business = business.is_some(),
            appointments = appointments.len(),
            pending = pending.len(),
            "Snapshot carregado"
        );

        Ok(DashboardSnapshot {
            business,
            appointments,
            pending,
            clients,
            services,
        })
    }

    pub async fn get_dashboard(&self, creds: &UpstreamCredentials) -> Result<DashboardView, AppError> {
        let snapshot = self.load_snapshot(creds).await?;
        Ok(build_view(&snapshot, self.clock.now(), self.default_tz))
    }

    pub async fn get_checkout_ready(&self, creds: &UpstreamCredentials) -> Result<Vec<CheckoutItem>, AppError> {
        let (business, appointments) = tokio::try_join!(
            self.repo.fetch_business(creds),
            self.repo.fetch_appointments(creds),
        )?;

        if business.is_none() {
            return Ok(Vec::new());
        }
        Ok(checkout::checkout_ready(&appointments, self.clock.now()))
    }
}

/// Monta o painel a partir do snapshot. Sem negócio, nenhum balde é calculado.
pub fn build_view(snapshot: &DashboardSnapshot, now: DateTime<Utc>, default_tz: Tz) -> DashboardView {
    let Some(business) = snapshot.business.as_ref() else {
        return DashboardView::SetupRequired { setup_path: SETUP_PATH };
    };

    let clock = BusinessClock::for_business(business, default_tz);
    let appointments = snapshot.appointments.as_slice();
    let windows = analytics::summarize(appointments, &clock, now);

    let summary = DashboardSummary {
        timezone: clock.timezone().name().to_string(),
        generated_at: now,
        today: windows.today,
        week: windows.week,
        month: windows.month,
        year_to_date: windows.year_to_date,
        last_month: windows.last_month,
        monthly_growth: windows.monthly_growth,
        scheduled_earnings: windows.scheduled_earnings,
        today_appointments: analytics::today(appointments, &clock, now).to_owned_members(),
        checkout_ready: checkout::checkout_ready(appointments, now),
        pending_requests: snapshot
            .pending
            .iter()
            .map(|apt| pending_request(apt, &clock))
            .collect(),
        onboarding: onboarding::progress(Some(business), snapshot.services.len(), appointments.len()),
        total_clients: snapshot.clients.len(),
        total_services: snapshot.services.len(),
    };

    DashboardView::Ready(Box::new(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::AppointmentStatus;
    use chrono::{Duration, TimeZone};
    use rust_decimal::Decimal;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 20, 0, 0).unwrap()
    }

    fn business() -> Business {
        Business {
            id: "b-1".into(),
            name: Some("Studio Lash".into()),
            brand_color: Some("#FF8DC7".into()),
            booking_page_slug: Some("studio-lash".into()),
            timezone: Some("UTC".into()),
        }
    }

    fn apt(id: &str, end: DateTime<Utc>, status: AppointmentStatus, price: &str) -> Appointment {
        Appointment {
            id: id.into(),
            start_time: Some(end - Duration::hours(1)),
            end_time: Some(end),
            status,
            client: None,
            service: Some(Service {
                id: "s-1".into(),
                name: "Classic Set".into(),
                price: Some(price.into()),
            }),
        }
    }

    #[test]
    fn missing_business_takes_the_setup_path() {
        let snapshot = DashboardSnapshot {
            business: None,
            appointments: vec![apt("a", now(), AppointmentStatus::Confirmed, "10")],
            pending: Vec::new(),
            clients: Vec::new(),
            services: Vec::new(),
        };

        match build_view(&snapshot, now(), chrono_tz::UTC) {
            DashboardView::SetupRequired { setup_path } => assert_eq!(setup_path, "/setup"),
            DashboardView::Ready(_) => panic!("sem negócio não deveria calcular o painel"),
        }
    }

    #[test]
    fn ready_view_combines_buckets_checkout_and_onboarding() {
        let pending = apt("p", now() + Duration::days(2), AppointmentStatus::Pending, "60");
        let snapshot = DashboardSnapshot {
            business: Some(business()),
            appointments: vec![
                apt("done", now() - Duration::hours(2), AppointmentStatus::Confirmed, "50"),
                apt("recent", now() - Duration::minutes(30), AppointmentStatus::Confirmed, "30"),
                pending.clone(),
            ],
            pending: vec![pending],
            clients: Vec::new(),
            services: vec![Service {
                id: "s-1".into(),
                name: "Classic Set".into(),
                price: Some("50".into()),
            }],
        };

        let DashboardView::Ready(summary) = build_view(&snapshot, now(), chrono_tz::UTC) else {
            panic!("painel deveria estar pronto");
        };

        assert_eq!(summary.timezone, "UTC");
        assert_eq!(summary.today.count, 2);
        assert_eq!(summary.today.revenue, Decimal::from(80));
        assert_eq!(summary.month.revenue, Decimal::from(140));
        assert_eq!(summary.year_to_date.revenue, Decimal::from(80));
        assert_eq!(summary.scheduled_earnings.revenue, Decimal::from(60));
        assert_eq!(summary.checkout_ready.len(), 1);
        assert_eq!(summary.checkout_ready[0].revenue, Decimal::from(50));
        assert_eq!(summary.pending_requests.len(), 1);
        assert_eq!(summary.onboarding.earned_points, 80);
        assert!(!summary.onboarding.is_new_user);
    }
}
