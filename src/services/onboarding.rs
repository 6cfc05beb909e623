// src/services/onboarding.rs

use rust_decimal::Decimal;

use crate::models::{
    booking::Business,
    dashboard::{OnboardingProgress, OnboardingStep, OnboardingStepId},
};

// Total fixo de pontos do checklist
pub const TOTAL_POINTS: u32 = 100;

/// Checklist ponderado de primeiros passos.
/// `business` ausente conta como passo pendente, não como erro.
pub fn progress(
    business: Option<&Business>,
    service_count: usize,
    appointment_count: usize,
) -> OnboardingProgress {
    let steps = vec![
        OnboardingStep {
            id: OnboardingStepId::BusinessSetup,
            title: "Business Profile Created",
            description: "Set up your business information",
            points: 25,
            completed: business.is_some(),
        },
        OnboardingStep {
            id: OnboardingStepId::FirstService,
            title: "First Service Added",
            description: "Create your first service offering",
            points: 25,
            completed: service_count > 0,
        },
        OnboardingStep {
            id: OnboardingStepId::Customization,
            title: "Brand Customization",
            description: "Customize your booking page colors",
            points: 20,
            completed: business.map(Business::has_custom_brand_color).unwrap_or(false),
        },
        OnboardingStep {
            id: OnboardingStepId::FirstBooking,
            title: "First Booking Received",
            description: "Get your first client booking",
            points: 30,
            completed: appointment_count > 0,
        },
    ];

    let completed_steps: Vec<OnboardingStepId> =
        steps.iter().filter(|s| s.completed).map(|s| s.id).collect();
    let earned_points: u32 = steps.iter().filter(|s| s.completed).map(|s| s.points).sum();
    let is_complete = completed_steps.len() == steps.len();

    let percentage =
        Decimal::from(earned_points) / Decimal::from(TOTAL_POINTS) * Decimal::ONE_HUNDRED;

    OnboardingProgress {
        is_new_user: !is_complete && service_count <= 1 && appointment_count == 0,
        steps,
        completed_steps,
        earned_points,
        total_points: TOTAL_POINTS,
        percentage,
        is_complete,
    }
}
