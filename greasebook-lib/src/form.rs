//! The live form buffer: everything the user has typed, unvalidated.

use chrono::NaiveDate;

use crate::{
    model::{Draft, ServiceLog, ServiceType},
    time::{now_timestamp, plus_one_day, today, tomorrow},
    validate::{self, FieldError},
};

/// In-progress form contents. Numeric fields stay as entered text until the
/// form is finalized; dates and the service type are structural and always
/// present.
#[derive(Debug, Clone, PartialEq)]
pub struct FormBuffer {
    pub provider_id: String,
    pub service_order: String,
    pub car_id: String,
    pub odometer: String,
    pub engine_hours: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub service_type: ServiceType,
    pub service_description: String,
}

impl Default for FormBuffer {
    fn default() -> Self {
        Self {
            provider_id: String::new(),
            service_order: String::new(),
            car_id: String::new(),
            odometer: String::new(),
            engine_hours: String::new(),
            start_date: today(),
            end_date: tomorrow(),
            service_type: ServiceType::Planned,
            service_description: String::new(),
        }
    }
}

impl FormBuffer {
    /// Set the start date and derive the end date as its calendar successor,
    /// unless the end date already is that value.
    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.start_date = date;

        let derived = plus_one_day(date);
        if self.end_date != derived {
            self.end_date = derived;
        }
    }

    /// Rehydrate the buffer from a stored draft.
    pub fn from_draft(draft: &Draft) -> Self {
        Self {
            provider_id: draft.provider_id.clone(),
            service_order: draft.service_order.clone(),
            car_id: draft.car_id.clone(),
            odometer: draft.odometer.clone(),
            engine_hours: draft.engine_hours.clone(),
            start_date: draft.start_date,
            end_date: draft.end_date,
            service_type: draft.service_type,
            service_description: draft.service_description.clone(),
        }
    }

    /// Load a finalized log back into a buffer, for the edit flow.
    pub fn from_log(log: &ServiceLog) -> Self {
        Self {
            provider_id: log.provider_id.clone(),
            service_order: log.service_order.clone(),
            car_id: log.car_id.clone(),
            odometer: log.odometer.to_string(),
            engine_hours: log.engine_hours.to_string(),
            start_date: log.start_date,
            end_date: log.end_date,
            service_type: log.service_type,
            service_description: log.service_description.clone(),
        }
    }

    /// Whether the buffer already reflects exactly this draft's content.
    pub fn matches(&self, draft: &Draft) -> bool {
        *self == Self::from_draft(draft)
    }

    /// Snapshot the buffer into a draft record. No validation: drafts may be
    /// partial or invalid.
    pub fn snapshot(&self, id: impl Into<String>, last_saved: impl Into<String>) -> Draft {
        Draft {
            id: id.into(),
            provider_id: self.provider_id.clone(),
            service_order: self.service_order.clone(),
            car_id: self.car_id.clone(),
            odometer: self.odometer.clone(),
            engine_hours: self.engine_hours.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            service_type: self.service_type,
            service_description: self.service_description.clone(),
            last_saved: last_saved.into(),
            is_saved: true,
        }
    }

    /// Finalize the buffer into a brand new log. Fails with the field errors
    /// if validation does.
    pub fn finalize(&self, id: impl Into<String>) -> Result<ServiceLog, Vec<FieldError>> {
        let (odometer, engine_hours) = self.parsed()?;
        let timestamp = now_timestamp();

        Ok(ServiceLog {
            id: id.into(),
            provider_id: self.provider_id.clone(),
            service_order: self.service_order.clone(),
            car_id: self.car_id.clone(),
            odometer,
            engine_hours,
            start_date: self.start_date,
            end_date: self.end_date,
            service_type: self.service_type,
            service_description: self.service_description.clone(),
            created_at: timestamp.clone(),
            updated_at: timestamp,
        })
    }

    /// Apply the buffer to an existing log, keeping its identity and
    /// creation time while refreshing `updated_at`.
    pub fn apply_to(&self, log: &ServiceLog) -> Result<ServiceLog, Vec<FieldError>> {
        let (odometer, engine_hours) = self.parsed()?;

        Ok(ServiceLog {
            id: log.id.clone(),
            provider_id: self.provider_id.clone(),
            service_order: self.service_order.clone(),
            car_id: self.car_id.clone(),
            odometer,
            engine_hours,
            start_date: self.start_date,
            end_date: self.end_date,
            service_type: self.service_type,
            service_description: self.service_description.clone(),
            created_at: log.created_at.clone(),
            updated_at: now_timestamp(),
        })
    }

    fn parsed(&self) -> Result<(u32, f64), Vec<FieldError>> {
        let errors = validate::validate(self);
        if !errors.is_empty() {
            return Err(errors);
        }

        // Validation just proved both fields parse
        let odometer = self.odometer.trim().parse().unwrap_or_default();
        let engine_hours = self.engine_hours.trim().parse().unwrap_or_default();

        Ok((odometer, engine_hours))
    }
}
