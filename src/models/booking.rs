// src/models/booking.rs

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

// Cor padrão da página de agendamento (rosa Besmi)
pub const DEFAULT_BRAND_COLOR: &str = "#FF8DC7";

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Denied,
    Cancelled,
    Completed,
    // Qualquer status novo da API não pode derrubar o snapshot inteiro
    #[serde(other)]
    Unknown,
}

// --- REFERÊNCIAS (somente leitura) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,

    // A API manda o preço como string ("45.00"), mas aceitamos número também
    #[serde(default, deserialize_with = "price_as_string")]
    #[schema(example = "45.00")]
    pub price: Option<String>,
}

impl Service {
    /// Preço numérico. Ausente ou inválido vale zero.
    pub fn price_value(&self) -> Decimal {
        self.price.as_deref().map(parse_price).unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand_color: Option<String>,
    #[serde(default)]
    pub booking_page_slug: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl Business {
    /// A cor foi trocada em relação à cor padrão?
    pub fn has_custom_brand_color(&self) -> bool {
        match self.brand_color.as_deref() {
            Some(color) => !color.is_empty() && color != DEFAULT_BRAND_COLOR,
            None => false,
        }
    }
}

// --- AGENDAMENTO ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub client: Option<Client>,
    #[serde(default)]
    pub service: Option<Service>,
}

impl Appointment {
    /// Receita do agendamento (preço do serviço vinculado).
    pub fn revenue(&self) -> Decimal {
        self.service.as_ref().map(Service::price_value).unwrap_or(Decimal::ZERO)
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == AppointmentStatus::Confirmed
    }
}

/// Converte o preço com a mesma tolerância de um `parseFloat`:
/// usa o maior prefixo numérico ("45.50 USD" => 45.50, "1e2" => 100) e cai para zero.
/// Valores fora da faixa do `Decimal` também viram zero.
pub fn parse_price(raw: &str) -> Decimal {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    end = skip_digits(bytes, end);
    let mut has_digits = end > digits_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = skip_digits(bytes, end + 1);
        if frac_end > end + 1 {
            has_digits = true;
        }
        end = frac_end;
    }

    if !has_digits {
        return Decimal::ZERO;
    }
    let mantissa = &trimmed[..end];

    // Expoente só conta se tiver pelo menos um dígito ("1e" => 1)
    let mut exponent = None;
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+') | Some(b'-')) {
            exp_start += 1;
        }
        let exp_end = skip_digits(bytes, exp_start);
        if exp_end > exp_start {
            exponent = Some(&trimmed[end + 1..exp_end]);
        }
    }

    let mantissa = mantissa.trim_end_matches('.');
    let mantissa = mantissa.strip_prefix('+').unwrap_or(mantissa);
    let mantissa = match mantissa.strip_prefix('-') {
        Some(rest) if rest.starts_with('.') => format!("-0{rest}"),
        None if mantissa.starts_with('.') => format!("0{mantissa}"),
        _ => mantissa.to_string(),
    };

    let Ok(value) = Decimal::from_str(&mantissa) else {
        return Decimal::ZERO;
    };
    match exponent {
        None => value,
        Some(exp) => match exp.trim_start_matches('+').parse::<i32>() {
            // Além disso não cabe em 28 casas nem em 96 bits
            Ok(e) if e.abs() <= MAX_PRICE_EXPONENT => apply_exponent(value, e),
            _ => Decimal::ZERO,
        },
    }
}

fn apply_exponent(value: Decimal, exponent: i32) -> Decimal {
    let mut result = Some(value);
    for _ in 0..exponent.unsigned_abs() {
        result = result.and_then(|v| {
            if exponent > 0 {
                v.checked_mul(Decimal::TEN)
            } else {
                v.checked_div(Decimal::TEN)
            }
        });
    }
    result.unwrap_or(Decimal::ZERO)
}

const MAX_PRICE_EXPONENT: i32 = 56;

fn skip_digits(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    pos
}

// IDs são opacos: a API pode mandar número ou string
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("id inválido: {other}"))),
    }
}

fn price_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
