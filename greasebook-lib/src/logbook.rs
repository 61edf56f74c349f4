use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::{
    Error, Result,
    config::{Cfg, CoreConfig},
    form::FormBuffer,
    model::{Draft, SaveStatus, ServiceLog},
    query::LogFilter,
    session::DraftSession,
    state::{StateHandle, drafts, logs},
    storage::LocalStore,
};

/// Central access point for all persistent data.
///
/// The [`Logbook`] hydrates both collections from local storage at startup
/// and provides a single, consistent interface for reading and mutating
/// finalized service logs. Draft work goes through [`Logbook::session`].
#[derive(Clone, Debug)]
pub struct Logbook {
    state: StateHandle,
    store: LocalStore,
    cfg: Cfg,
}

impl Logbook {
    pub fn new() -> Self {
        Self::open(
            LocalStore::new(),
            Arc::new(RwLock::new(CoreConfig::load())),
        )
    }

    fn open(store: LocalStore, cfg: Cfg) -> Self {
        let state = StateHandle::new();
        state.apply(logs::Action::Set(store.load_logs()));
        state.apply(drafts::Action::Set(store.load_drafts()));

        Self { state, store, cfg }
    }

    pub fn logs(&self) -> Vec<ServiceLog> {
        self.state.read().logs.logs().to_vec()
    }

    /// Logs matching the table's filter controls, in insertion order.
    pub fn find_logs(&self, filter: &LogFilter) -> Vec<ServiceLog> {
        self.state
            .read()
            .logs
            .logs()
            .iter()
            .filter(|log| filter.matches(log))
            .cloned()
            .collect()
    }

    pub fn drafts(&self) -> Vec<Draft> {
        self.state.read().drafts.drafts().to_vec()
    }

    pub fn current_draft_id(&self) -> Option<String> {
        self.state.read().drafts.current_draft_id().map(str::to_owned)
    }

    pub fn save_status(&self) -> SaveStatus {
        self.state.read().drafts.save_status()
    }

    /// Replace the log matching `id` with the edited form contents,
    /// refreshing `updated_at` and keeping `created_at`. Unknown ids are a
    /// no-op; invalid form contents fail without touching state.
    pub fn update_log(&self, id: &str, form: &FormBuffer) -> Result<Option<ServiceLog>> {
        let Some(existing) = self.state.read().logs.get(id).cloned() else {
            return Ok(None);
        };

        let updated = form.apply_to(&existing).map_err(Error::Validation)?;
        self.state.apply(logs::Action::Update(updated.clone()));
        self.store.save_log(&updated)?;

        debug!("Updated service log: {id}");

        Ok(Some(updated))
    }

    /// Remove the log matching `id`. Unknown ids are a no-op.
    pub fn delete_log(&self, id: &str) -> Result<()> {
        self.state.apply(logs::Action::Delete(id.to_string()));
        self.store.delete_log(id)?;

        debug!("Deleted service log: {id}");

        Ok(())
    }

    /// Start a draft session over this logbook's state, with timer
    /// durations from the configuration.
    pub fn session(&self) -> DraftSession {
        let opts = (&*self.cfg.read()).into();
        DraftSession::new(self.state.clone(), self.store.clone(), opts)
    }

    #[cfg(test)]
    /// Return a mock version of a [`Logbook`] with in-memory storage and
    /// default configuration.
    pub(crate) fn mock() -> Self {
        Self::open(
            LocalStore::in_memory(),
            Arc::new(RwLock::new(CoreConfig::default())),
        )
    }
}

impl Default for Logbook {
    fn default() -> Self {
        Self::new()
    }
}
