// src/services/clock.rs

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::models::booking::Business;

/// Fonte do "agora". Em produção é o relógio do sistema; nos testes é fixo.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// Padrões de data reconhecidos pelo painel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    Day,       // yyyy-MM-dd
    Month,     // yyyy-MM
    Year,      // yyyy
    Time,      // h:mm a
    LongDate,  // MMM d, yyyy
}

impl DatePattern {
    fn chrono_format(self) -> &'static str {
        match self {
            DatePattern::Day => "%Y-%m-%d",
            DatePattern::Month => "%Y-%m",
            DatePattern::Year => "%Y",
            DatePattern::Time => "%-I:%M %p",
            DatePattern::LongDate => "%b %-d, %Y",
        }
    }
}

impl FromStr for DatePattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yyyy-MM-dd" => Ok(DatePattern::Day),
            "yyyy-MM" => Ok(DatePattern::Month),
            "yyyy" => Ok(DatePattern::Year),
            "h:mm a" => Ok(DatePattern::Time),
            "MMM d, yyyy" => Ok(DatePattern::LongDate),
            other => Err(format!("padrão de data não suportado: {other}")),
        }
    }
}

/// Relógio no fuso horário do negócio. Todo agrupamento por dia/semana/mês/ano
/// passa por aqui, para que os baldes usem o mesmo calendário.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessClock {
    tz: Tz,
}

impl BusinessClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Usa o fuso do negócio; vazio ou desconhecido cai no fuso padrão.
    pub fn for_business(business: &Business, fallback: Tz) -> Self {
        let tz = match business.timezone.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.parse::<Tz>().unwrap_or_else(|_| {
                tracing::warn!(
                    business_id = %business.id,
                    timezone = name,
                    "Fuso horário desconhecido, usando {}",
                    fallback
                );
                fallback
            }),
            _ => fallback,
        };
        Self { tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn local(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.tz)
    }

    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.local(instant).date_naive()
    }

    pub fn format_date(&self, instant: DateTime<Utc>, pattern: DatePattern) -> String {
        self.local(instant).format(pattern.chrono_format()).to_string()
    }
}
