//! Persisted domain records.
//!
//! These types are the compatibility surface of the stored JSON: field names
//! are camelCase and the service type serializes to its display string, so a
//! collection written by an earlier build round-trips unchanged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Category of a service visit. The string forms are part of the persisted
/// format.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
pub enum ServiceType {
    #[default]
    Planned,
    Unplanned,
    Emergency,
}

/// A finalized service log record. Immutable once created except for
/// in-place updates through the edit flow, which refresh `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLog {
    pub id: String,
    pub provider_id: String,
    pub service_order: String,
    pub car_id: String,
    pub odometer: u32,
    pub engine_hours: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub service_description: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A resumable snapshot of an in-progress form. Unlike [`ServiceLog`], the
/// numeric fields stay as raw text since a draft may be incomplete or
/// invalid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: String,
    pub provider_id: String,
    pub service_order: String,
    pub car_id: String,
    pub odometer: String,
    pub engine_hours: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub service_description: String,
    pub last_saved: String,
    pub is_saved: bool,
}

/// Whether the current draft's in-memory form buffer matches its persisted
/// form. Purely presentational; never persisted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Saved,
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    fn sample_log() -> ServiceLog {
        ServiceLog {
            id: "log_1700000000000_abc123def".into(),
            provider_id: "ABC123".into(),
            service_order: "SO-2024-001".into(),
            car_id: "CAR-001".into(),
            odometer: 42_000,
            engine_hours: 1530.5,
            start_date: NaiveDate::from_ymd_opt(2024, 11, 14).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 11, 15).unwrap(),
            service_type: ServiceType::Planned,
            service_description: "Oil change".into(),
            created_at: "2024-11-14T09:26:40.000Z".into(),
            updated_at: "2024-11-14T09:26:40.000Z".into(),
        }
    }

    #[test]
    fn test_log_wire_format() {
        let value = serde_json::to_value(sample_log()).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "log_1700000000000_abc123def",
                "providerId": "ABC123",
                "serviceOrder": "SO-2024-001",
                "carId": "CAR-001",
                "odometer": 42000,
                "engineHours": 1530.5,
                "startDate": "2024-11-14",
                "endDate": "2024-11-15",
                "type": "Planned",
                "serviceDescription": "Oil change",
                "createdAt": "2024-11-14T09:26:40.000Z",
                "updatedAt": "2024-11-14T09:26:40.000Z",
            })
        );
    }

    #[test]
    fn test_log_round_trip() {
        let log = sample_log();
        let encoded = serde_json::to_string(&log).unwrap();

        assert_eq!(serde_json::from_str::<ServiceLog>(&encoded).unwrap(), log);
    }

    #[test]
    fn test_draft_wire_format() {
        let draft = Draft {
            id: "log_1700000000000_xyz789abc".into(),
            provider_id: "ABC123".into(),
            service_order: "".into(),
            car_id: "CAR-001".into(),
            odometer: "not a number".into(),
            engine_hours: "".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 11, 14).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 11, 15).unwrap(),
            service_type: ServiceType::Emergency,
            service_description: "".into(),
            last_saved: "2024-11-14T09:26:40.000Z".into(),
            is_saved: true,
        };

        let value = serde_json::to_value(&draft).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "log_1700000000000_xyz789abc",
                "providerId": "ABC123",
                "serviceOrder": "",
                "carId": "CAR-001",
                "odometer": "not a number",
                "engineHours": "",
                "startDate": "2024-11-14",
                "endDate": "2024-11-15",
                "type": "Emergency",
                "serviceDescription": "",
                "lastSaved": "2024-11-14T09:26:40.000Z",
                "isSaved": true,
            })
        );

        let encoded = serde_json::to_string(&draft).unwrap();
        assert_eq!(serde_json::from_str::<Draft>(&encoded).unwrap(), draft);
    }

    #[test]
    fn test_service_type_strings() {
        assert_eq!(ServiceType::Planned.to_string(), "Planned");
        assert_eq!(ServiceType::Unplanned.to_string(), "Unplanned");
        assert_eq!(ServiceType::Emergency.to_string(), "Emergency");
        assert_eq!(
            "Emergency".parse::<ServiceType>().unwrap(),
            ServiceType::Emergency
        );
    }
}
