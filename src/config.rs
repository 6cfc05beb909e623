// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use chrono_tz::Tz;
use validator::Validate;

use crate::{
    repo::{BookingRepository, HttpBookingRepository},
    services::{
        appointment_service::AppointmentService,
        clock::{Clock, SystemClock},
        dashboard_service::DashboardService,
    },
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Validate)]
pub struct Config {
    #[validate(url(message = "BESMI_API_URL precisa ser uma URL válida."))]
    pub api_base_url: String,

    #[validate(range(min = 1, max = 120, message = "BESMI_API_TIMEOUT_SECS deve ficar entre 1 e 120."))]
    pub api_timeout_secs: u64,

    #[validate(length(min = 1))]
    pub bind_addr: String,

    pub default_timezone: Tz,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Lê de qualquer fonte chave/valor (ambiente em produção, mapa nos testes).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("BESMI_API_URL").context("BESMI_API_URL deve ser definida")?;

        let api_timeout_secs = match lookup("BESMI_API_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("BESMI_API_TIMEOUT_SECS inválido: {raw}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let bind_addr = lookup("BESMI_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let default_timezone = match lookup("BESMI_DEFAULT_TIMEZONE") {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|e| anyhow::anyhow!("BESMI_DEFAULT_TIMEZONE inválido ({name}): {e}"))?,
            None => Tz::UTC,
        };

        let config = Self {
            api_base_url,
            api_timeout_secs,
            bind_addr,
            default_timezone,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub appointment_service: AppointmentService,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let repo = HttpBookingRepository::new(&config.api_base_url, config.api_timeout())?;
        tracing::info!("✅ Cliente da API de agendamentos configurado: {}", config.api_base_url);

        Ok(Self::with_parts(Arc::new(repo), Arc::new(SystemClock), config.default_timezone))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_parts(repo: Arc<dyn BookingRepository>, clock: Arc<dyn Clock>, default_tz: Tz) -> Self {
        Self {
            dashboard_service: DashboardService::new(repo.clone(), clock, default_tz),
            appointment_service: AppointmentService::new(repo, default_tz),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_the_api_url_is_set() {
        let config = Config::from_lookup(lookup(&[("BESMI_API_URL", "https://api.besmi.app")])).unwrap();
        assert_eq!(config.api_timeout_secs, 10);
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.default_timezone, Tz::UTC);
    }

    #[test]
    fn missing_api_url_is_an_error() {
        assert!(Config::from_lookup(lookup(&[])).is_err());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(Config::from_lookup(lookup(&[("BESMI_API_URL", "not a url")])).is_err());
        assert!(Config::from_lookup(lookup(&[
            ("BESMI_API_URL", "https://api.besmi.app"),
            ("BESMI_API_TIMEOUT_SECS", "0"),
        ]))
        .is_err());
        assert!(Config::from_lookup(lookup(&[
            ("BESMI_API_URL", "https://api.besmi.app"),
            ("BESMI_DEFAULT_TIMEZONE", "Nowhere/City"),
        ]))
        .is_err());
    }

    #[test]
    fn default_timezone_is_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("BESMI_API_URL", "https://api.besmi.app"),
            ("BESMI_DEFAULT_TIMEZONE", "America/Los_Angeles"),
        ]))
        .unwrap();
        assert_eq!(config.default_timezone, chrono_tz::America::Los_Angeles);
    }
}
