//! Filtering over the log collection, as used by the table view.

use chrono::NaiveDate;

use crate::model::{ServiceLog, ServiceType};

/// Conjunction of the table's filter controls. An empty filter matches
/// every log.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LogFilter {
    /// Case-insensitive substring match over provider, service order, and
    /// car identifiers.
    pub search: String,
    /// Keep logs starting on or after this date.
    pub start_from: Option<NaiveDate>,
    /// Keep logs ending on or before this date.
    pub end_to: Option<NaiveDate>,
    pub service_type: Option<ServiceType>,
}

impl LogFilter {
    pub fn matches(&self, log: &ServiceLog) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = needle.is_empty()
            || log.provider_id.to_lowercase().contains(&needle)
            || log.service_order.to_lowercase().contains(&needle)
            || log.car_id.to_lowercase().contains(&needle);

        let matches_start = self.start_from.is_none_or(|from| log.start_date >= from);
        let matches_end = self.end_to.is_none_or(|to| log.end_date <= to);
        let matches_type = self
            .service_type
            .is_none_or(|service_type| log.service_type == service_type);

        matches_search && matches_start && matches_end && matches_type
    }
}

pub fn filter_logs<'a>(logs: &'a [ServiceLog], filter: &LogFilter) -> Vec<&'a ServiceLog> {
    logs.iter().filter(|log| filter.matches(log)).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::form::FormBuffer;

    fn log(provider_id: &str, car_id: &str, start: NaiveDate, kind: ServiceType) -> ServiceLog {
        let mut form = FormBuffer::default();
        form.provider_id = provider_id.into();
        form.service_order = "SO-1".into();
        form.car_id = car_id.into();
        form.odometer = "100".into();
        form.engine_hours = "1".into();
        form.service_description = "desc".into();
        form.set_start_date(start);
        form.service_type = kind;

        form.finalize(format!("id_{provider_id}_{car_id}")).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let logs = [
            log("AAA", "CAR-1", date(2024, 1, 1), ServiceType::Planned),
            log("BBB", "CAR-2", date(2024, 6, 1), ServiceType::Emergency),
        ];

        assert_eq!(filter_logs(&logs, &LogFilter::default()).len(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive_across_id_fields() {
        let logs = [
            log("Alpha", "CAR-1", date(2024, 1, 1), ServiceType::Planned),
            log("Beta", "tracTOR-9", date(2024, 1, 1), ServiceType::Planned),
        ];

        let filter = LogFilter {
            search: "ALPHA".into(),
            ..LogFilter::default()
        };
        assert_eq!(filter_logs(&logs, &filter).len(), 1);

        let filter = LogFilter {
            search: "tractor".into(),
            ..LogFilter::default()
        };
        let hits = filter_logs(&logs, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.first().unwrap().provider_id, "Beta");
    }

    #[test]
    fn test_date_bounds() {
        let logs = [
            log("AAA", "CAR-1", date(2024, 1, 1), ServiceType::Planned),
            log("BBB", "CAR-2", date(2024, 6, 1), ServiceType::Planned),
        ];

        let filter = LogFilter {
            start_from: Some(date(2024, 3, 1)),
            ..LogFilter::default()
        };
        let hits = filter_logs(&logs, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.first().unwrap().provider_id, "BBB");

        let filter = LogFilter {
            end_to: Some(date(2024, 1, 2)),
            ..LogFilter::default()
        };
        let hits = filter_logs(&logs, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.first().unwrap().provider_id, "AAA");
    }

    #[test]
    fn test_type_filter() {
        let logs = [
            log("AAA", "CAR-1", date(2024, 1, 1), ServiceType::Planned),
            log("BBB", "CAR-2", date(2024, 1, 1), ServiceType::Emergency),
        ];

        let filter = LogFilter {
            service_type: Some(ServiceType::Emergency),
            ..LogFilter::default()
        };
        let hits = filter_logs(&logs, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.first().unwrap().provider_id, "BBB");
    }

    #[test]
    fn test_filters_conjoin() {
        let logs = [
            log("AAA", "CAR-1", date(2024, 1, 1), ServiceType::Planned),
            log("AAA", "CAR-2", date(2024, 6, 1), ServiceType::Planned),
        ];

        let filter = LogFilter {
            search: "aaa".into(),
            start_from: Some(date(2024, 5, 1)),
            ..LogFilter::default()
        };
        let hits = filter_logs(&logs, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.first().unwrap().car_id, "CAR-2");
    }
}
