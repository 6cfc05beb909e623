// src/services/checkout.rs

use chrono::{DateTime, Duration, Utc};

use crate::models::{booking::Appointment, dashboard::CheckoutItem};

// Tempo de tolerância depois do fim do atendimento antes de cobrar no PDV
const CHECKOUT_GRACE_MINUTES: i64 = 60;

/// Pronto para checkout: confirmado e `now` já passou de fim + 1h.
/// Concluídos nunca entram (já passaram pelo PDV).
pub fn is_checkout_ready(appointment: &Appointment, now: DateTime<Utc>) -> bool {
    if !appointment.is_confirmed() {
        return false;
    }

    match appointment.end_time {
        Some(end) => now > end + Duration::minutes(CHECKOUT_GRACE_MINUTES),
        None => false,
    }
}

pub fn checkout_ready(appointments: &[Appointment], now: DateTime<Utc>) -> Vec<CheckoutItem> {
    appointments
        .iter()
        .filter(|apt| is_checkout_ready(apt, now))
        .map(|apt| CheckoutItem {
            appointment: apt.clone(),
            revenue: apt.revenue(),
            checkout_path: checkout_path(apt),
        })
        .collect()
}

fn checkout_path(appointment: &Appointment) -> String {
    match appointment.client.as_ref() {
        Some(client) => format!(
            "/pos?customer={}&appointment={}&autoCheckout=true",
            client.id, appointment.id
        ),
        None => format!("/pos?appointment={}&autoCheckout=true", appointment.id),
    }
}
