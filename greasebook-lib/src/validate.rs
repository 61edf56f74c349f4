//! Field checks applied when a form is submitted as a finalized log.
//!
//! Drafts are exempt: a draft may hold partial or invalid text. The checks
//! are a flat list of per-field predicates, evaluated in order with the
//! first failing message reported per field.

use strum::Display;

use crate::form::FormBuffer;

/// The form field a failed check belongs to, for inline display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Field {
    ProviderId,
    ServiceOrder,
    CarId,
    Odometer,
    EngineHours,
    ServiceDescription,
}

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

struct Check {
    field: Field,
    message: &'static str,
    passes: fn(&FormBuffer) -> bool,
}

const CHECKS: &[Check] = &[
    Check {
        field: Field::ProviderId,
        message: "Provider ID is required",
        passes: |form| !form.provider_id.trim().is_empty(),
    },
    Check {
        field: Field::ServiceOrder,
        message: "Service Order is required",
        passes: |form| !form.service_order.trim().is_empty(),
    },
    Check {
        field: Field::CarId,
        message: "Car ID is required",
        passes: |form| !form.car_id.trim().is_empty(),
    },
    Check {
        field: Field::Odometer,
        message: "Odometer is required",
        passes: |form| !form.odometer.trim().is_empty(),
    },
    Check {
        field: Field::Odometer,
        message: "Must be a positive number",
        passes: |form| is_positive(&form.odometer),
    },
    Check {
        field: Field::Odometer,
        message: "Must be a whole number",
        passes: |form| form.odometer.trim().parse::<u32>().is_ok(),
    },
    Check {
        field: Field::EngineHours,
        message: "Engine Hours is required",
        passes: |form| !form.engine_hours.trim().is_empty(),
    },
    Check {
        field: Field::EngineHours,
        message: "Must be a positive number",
        passes: |form| is_positive(&form.engine_hours),
    },
    Check {
        field: Field::ServiceDescription,
        message: "Service Description is required",
        passes: |form| !form.service_description.trim().is_empty(),
    },
];

fn is_positive(text: &str) -> bool {
    text.trim().parse::<f64>().is_ok_and(|value| value > 0.0)
}

/// Run every check against the buffer. An empty result means the form may
/// be finalized.
pub fn validate(form: &FormBuffer) -> Vec<FieldError> {
    let mut errors: Vec<FieldError> = Vec::new();

    for check in CHECKS {
        if errors.iter().any(|e| e.field == check.field) {
            // Only the first failure per field is reported
            continue;
        }
        if !(check.passes)(form) {
            errors.push(FieldError {
                field: check.field,
                message: check.message,
            });
        }
    }

    errors
}
