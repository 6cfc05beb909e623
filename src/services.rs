pub mod analytics;
pub mod appointment_service;
pub mod checkout;
pub mod clock;
pub mod dashboard_service;
pub mod onboarding;
