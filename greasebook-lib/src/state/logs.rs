use crate::model::ServiceLog;

/// The collection of finalized service logs, in insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LogState {
    logs: Vec<ServiceLog>,
}

#[derive(Debug, Clone)]
pub enum Action {
    /// Replace the whole collection, as loaded from storage.
    Set(Vec<ServiceLog>),
    Add(ServiceLog),
    /// Replace the record matching the payload's id. No-op if absent.
    Update(ServiceLog),
    /// Remove the record with the given id. No-op if absent.
    Delete(String),
}

impl LogState {
    pub fn logs(&self) -> &[ServiceLog] {
        &self.logs
    }

    pub fn get(&self, id: &str) -> Option<&ServiceLog> {
        self.logs.iter().find(|log| log.id == id)
    }

    pub(crate) fn apply(&mut self, action: Action) {
        match action {
            Action::Set(logs) => self.logs = logs,
            Action::Add(log) => self.logs.push(log),
            Action::Update(log) => {
                if let Some(slot) = self.logs.iter_mut().find(|l| l.id == log.id) {
                    *slot = log;
                }
            }
            Action::Delete(id) => self.logs.retain(|log| log.id != id),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        model::ServiceType,
        time::{today, tomorrow},
    };

    fn log(id: &str, odometer: u32) -> ServiceLog {
        ServiceLog {
            id: id.into(),
            provider_id: "P1".into(),
            service_order: "SO1".into(),
            car_id: "C1".into(),
            odometer,
            engine_hours: 10.0,
            start_date: today(),
            end_date: tomorrow(),
            service_type: ServiceType::Planned,
            service_description: "desc".into(),
            created_at: "2024-01-01T00:00:00.000Z".into(),
            updated_at: "2024-01-01T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn test_add_update_delete_keeps_one_record_per_id() {
        let mut state = LogState::default();

        state.apply(Action::Add(log("a", 100)));
        state.apply(Action::Add(log("b", 200)));
        state.apply(Action::Update(log("a", 150)));
        state.apply(Action::Delete("b".into()));
        state.apply(Action::Update(log("a", 175)));

        assert_eq!(state.logs().len(), 1);
        assert_eq!(state.get("a").unwrap().odometer, 175);
        assert!(state.get("b").is_none());
    }

    #[test]
    fn test_update_unknown_id_is_a_no_op() {
        let mut state = LogState::default();
        state.apply(Action::Add(log("a", 100)));

        state.apply(Action::Update(log("ghost", 1)));

        assert_eq!(state.logs().len(), 1);
        assert_eq!(state.get("a").unwrap().odometer, 100);
    }

    #[test]
    fn test_delete_unknown_id_is_a_no_op() {
        let mut state = LogState::default();
        state.apply(Action::Add(log("a", 100)));

        state.apply(Action::Delete("ghost".into()));

        assert_eq!(state.logs().len(), 1);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut state = LogState::default();
        state.apply(Action::Add(log("c", 1)));
        state.apply(Action::Add(log("a", 2)));
        state.apply(Action::Add(log("b", 3)));

        let ids: Vec<_> = state.logs().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }
}
