// src/services/analytics.rs
//
// Agregação por janelas de tempo (hoje / semana / mês / ano / mês passado).
// Funções puras sobre o snapshot já buscado: nada de I/O, nada de erro.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::{
    models::{
        booking::{Appointment, AppointmentStatus},
        dashboard::{BucketLabel, BucketSummary, WindowBucket},
    },
    services::clock::BusinessClock,
};

/// Agendamentos cujo início, no calendário do negócio, cai no mesmo dia de `now`.
pub fn today<'a>(
    appointments: &'a [Appointment],
    clock: &BusinessClock,
    now: DateTime<Utc>,
) -> WindowBucket<'a> {
    let today = clock.local_date(now);
    let members = filter_by_start(appointments, clock, |date| date == today);
    WindowBucket::new(BucketLabel::Today, members)
}

/// Semana começando no domingo: [now - dia_da_semana, +6 dias], inclusivo.
pub fn this_week<'a>(
    appointments: &'a [Appointment],
    clock: &BusinessClock,
    now: DateTime<Utc>,
) -> WindowBucket<'a> {
    let (start, end) = week_bounds(clock.local_date(now));
    let members = filter_by_start(appointments, clock, |date| date >= start && date <= end);
    WindowBucket::new(BucketLabel::Week, members)
}

pub fn this_month<'a>(
    appointments: &'a [Appointment],
    clock: &BusinessClock,
    now: DateTime<Utc>,
) -> WindowBucket<'a> {
    let reference = clock.local_date(now);
    let members = filter_by_start(appointments, clock, |date| same_month(date, reference));
    WindowBucket::new(BucketLabel::Month, members)
}

/// Mês de calendário anterior ao de `now` (janeiro => dezembro do ano anterior).
pub fn last_month<'a>(
    appointments: &'a [Appointment],
    clock: &BusinessClock,
    now: DateTime<Utc>,
) -> WindowBucket<'a> {
    let reference = previous_month(clock.local_date(now));
    let members = filter_by_start(appointments, clock, |date| same_month(date, reference));
    WindowBucket::new(BucketLabel::LastMonth, members)
}

/// YTD: mesmo ano E somente confirmados. Pendentes ficam de fora, ao contrário
/// dos baldes de semana e mês.
pub fn year_to_date<'a>(
    appointments: &'a [Appointment],
    clock: &BusinessClock,
    now: DateTime<Utc>,
) -> WindowBucket<'a> {
    let year = clock.local_date(now).year();
    let members = appointments
        .iter()
        .filter(|apt| apt.is_confirmed())
        .filter(|apt| {
            apt.start_time
                .map(|start| clock.local_date(start).year() == year)
                .unwrap_or(false)
        })
        .collect();
    WindowBucket::new(BucketLabel::Year, members)
}

/// Ganhos agendados: tudo que ainda vai acontecer e está confirmado ou pendente.
pub fn scheduled_earnings(appointments: &[Appointment], now: DateTime<Utc>) -> WindowBucket<'_> {
    let members = appointments
        .iter()
        .filter(|apt| {
            matches!(apt.status, AppointmentStatus::Confirmed | AppointmentStatus::Pending)
        })
        .filter(|apt| apt.start_time.map(|start| start > now).unwrap_or(false))
        .collect();
    WindowBucket::new(BucketLabel::Upcoming, members)
}

/// Crescimento percentual mês a mês. Sem receita no mês passado => 0.
/// Resultado fora da faixa do `Decimal` também vira 0.
pub fn growth_percentage(this_month: Decimal, last_month: Decimal) -> Decimal {
    if last_month <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    this_month
        .checked_sub(last_month)
        .and_then(|delta| delta.checked_div(last_month))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowSummary {
    pub today: BucketSummary,
    pub week: BucketSummary,
    pub month: BucketSummary,
    pub year_to_date: BucketSummary,
    pub last_month: BucketSummary,
    pub monthly_growth: Decimal,
    pub scheduled_earnings: BucketSummary,
}

/// Todos os baldes de uma vez, a partir do mesmo `now`.
pub fn summarize(
    appointments: &[Appointment],
    clock: &BusinessClock,
    now: DateTime<Utc>,
) -> WindowSummary {
    let month = this_month(appointments, clock, now).summary();
    let last_month = last_month(appointments, clock, now).summary();
    let monthly_growth = growth_percentage(month.revenue, last_month.revenue).round_dp(2);

    WindowSummary {
        today: today(appointments, clock, now).summary(),
        week: this_week(appointments, clock, now).summary(),
        month,
        year_to_date: year_to_date(appointments, clock, now).summary(),
        last_month,
        monthly_growth,
        scheduled_earnings: scheduled_earnings(appointments, now).summary(),
    }
}

// --- helpers ---

fn filter_by_start<'a, F>(
    appointments: &'a [Appointment],
    clock: &BusinessClock,
    keep: F,
) -> Vec<&'a Appointment>
where
    F: Fn(NaiveDate) -> bool,
{
    appointments
        .iter()
        .filter(|apt| {
            apt.start_time
                .map(|start| keep(clock.local_date(start)))
                .unwrap_or(false)
        })
        .collect()
}

fn week_bounds(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = u64::from(reference.weekday().num_days_from_sunday());
    let start = reference - Days::new(offset);
    (start, start + Days::new(6))
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

fn previous_month(reference: NaiveDate) -> NaiveDate {
    // Primeiro dia do mês evita o estouro de "31 de março menos um mês"
    reference
        .with_day(1)
        .and_then(|first| first.checked_sub_months(Months::new(1)))
        .unwrap_or(reference)
}
