//! The draft lifecycle controller.
//!
//! A [`DraftSession`] mediates between the live form buffer (what the user
//! is typing) and the persisted draft identified by the state's
//! `current_draft_id`. It owns the two cancellable timers in the system:
//! the autosave debounce and the save indicator's simulated completion
//! delay. At most one of each is live at a time; a new qualifying event
//! aborts the previous handle before scheduling its replacement.

use std::{sync::Arc, time::Duration};

use chrono::NaiveDate;
use parking_lot::Mutex;
use tokio::{task::JoinHandle, time::sleep};
use tracing::{debug, warn};

use crate::{
    Error, Result,
    config::CoreConfig,
    form::FormBuffer,
    model::{Draft, SaveStatus, ServiceLog, ServiceType},
    state::{StateHandle, drafts, logs},
    storage::LocalStore,
    time::{generate_id, now_timestamp},
};

/// Timer durations for a session, usually taken from [`CoreConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub autosave_debounce: Duration,
    pub save_indicator: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        (&CoreConfig::default()).into()
    }
}

impl From<&CoreConfig> for SessionOptions {
    fn from(cfg: &CoreConfig) -> Self {
        Self {
            autosave_debounce: cfg.autosave_debounce(),
            save_indicator: cfg.save_indicator(),
        }
    }
}

/// A single edit to the live form buffer.
#[derive(Debug, Clone)]
pub enum Edit {
    ProviderId(String),
    ServiceOrder(String),
    CarId(String),
    Odometer(String),
    EngineHours(String),
    StartDate(NaiveDate),
    EndDate(NaiveDate),
    Type(ServiceType),
    ServiceDescription(String),
}

#[derive(Debug, Default)]
struct Inner {
    buffer: FormBuffer,
    /// Buffer contents as of the last persisted snapshot. Autosave compares
    /// against this to suppress redundant work.
    last_saved: Option<FormBuffer>,
    autosave: Option<JoinHandle<()>>,
    indicator: Option<JoinHandle<()>>,
}

/// Controller for one form session. Clones share the same buffer and
/// timers; spawned timer tasks hold a clone.
///
/// Timers are tokio tasks, so a session must live inside a tokio runtime.
#[derive(Debug, Clone)]
pub struct DraftSession {
    state: StateHandle,
    store: LocalStore,
    opts: SessionOptions,
    inner: Arc<Mutex<Inner>>,
}

impl DraftSession {
    pub fn new(state: StateHandle, store: LocalStore, opts: SessionOptions) -> Self {
        Self {
            state,
            store,
            opts,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    /// The live buffer, as the presentation layer should render it.
    pub fn buffer(&self) -> FormBuffer {
        self.inner.lock().buffer.clone()
    }

    pub fn current_draft_id(&self) -> Option<String> {
        self.state.read().drafts.current_draft_id().map(str::to_owned)
    }

    pub fn save_status(&self) -> SaveStatus {
        self.state.read().drafts.save_status()
    }

    /// Apply a single field edit and, if a draft is current and the buffer
    /// has diverged from its last persisted snapshot, queue an autosave for
    /// one debounce window from now. A newer edit replaces the pending one.
    pub fn edit(&self, edit: Edit) {
        let mut inner = self.inner.lock();

        match edit {
            Edit::ProviderId(value) => inner.buffer.provider_id = value,
            Edit::ServiceOrder(value) => inner.buffer.service_order = value,
            Edit::CarId(value) => inner.buffer.car_id = value,
            Edit::Odometer(value) => inner.buffer.odometer = value,
            Edit::EngineHours(value) => inner.buffer.engine_hours = value,
            Edit::StartDate(date) => inner.buffer.set_start_date(date),
            Edit::EndDate(date) => inner.buffer.end_date = date,
            Edit::Type(service_type) => inner.buffer.service_type = service_type,
            Edit::ServiceDescription(value) => inner.buffer.service_description = value,
        }

        self.queue_autosave(&mut inner);
    }

    /// Snapshot the buffer into a brand new draft, append it, and make it
    /// current. The save indicator runs `Saving` for a fixed short delay
    /// before settling on `Saved`; the write itself is synchronous.
    pub fn create_draft(&self) -> Result<Draft> {
        let mut inner = self.inner.lock();
        Self::abort_timers(&mut inner);

        let draft = inner.buffer.snapshot(generate_id(), now_timestamp());
        self.state.apply(drafts::Action::Add(draft.clone()));
        self.store.save_draft(&draft)?;
        inner.last_saved = Some(inner.buffer.clone());

        self.state
            .apply(drafts::Action::SetSaveStatus(SaveStatus::Saving));
        let session = self.clone();
        inner.indicator = Some(tokio::spawn(async move {
            sleep(session.opts.save_indicator).await;
            session.inner.lock().indicator = None;
            session
                .state
                .apply(drafts::Action::SetSaveStatus(SaveStatus::Saved));
        }));

        debug!("Created draft: {}", draft.id);

        Ok(draft)
    }

    /// Make an existing draft current and load its fields into the buffer.
    ///
    /// The reload is skipped when the draft is already current, and when
    /// the buffer already reflects exactly the draft's content; reselecting
    /// is idempotent and never clobbers in-progress edits. An unknown id is
    /// a no-op.
    pub fn select_draft(&self, id: &str) {
        let (draft, already_current) = {
            let state = self.state.read();
            let Some(draft) = state.drafts.get(id).cloned() else {
                return;
            };
            (draft, state.drafts.current_draft_id() == Some(id))
        };

        self.state
            .apply(drafts::Action::SetCurrent(Some(id.to_string())));

        let mut inner = self.inner.lock();
        if !already_current && !inner.buffer.matches(&draft) {
            if let Some(handle) = inner.autosave.take() {
                handle.abort();
            }
            inner.buffer = FormBuffer::from_draft(&draft);
            debug!("Loaded draft into the form: {id}");
        }
        if inner.buffer.matches(&draft) {
            inner.last_saved = Some(inner.buffer.clone());
        }
    }

    /// Delete the current draft and reset the form to its defaults. No-op
    /// when no draft is current.
    pub fn delete_draft(&self) -> Result<()> {
        let Some(id) = self.current_draft_id() else {
            return Ok(());
        };

        let mut inner = self.inner.lock();
        Self::abort_timers(&mut inner);

        self.state.apply(drafts::Action::Delete(id.clone()));
        self.store.delete_draft(&id)?;
        self.state
            .apply(drafts::Action::SetSaveStatus(SaveStatus::Idle));
        inner.last_saved = None;
        inner.buffer = FormBuffer::default();

        debug!("Deleted draft: {id}");

        Ok(())
    }

    /// Delete every draft and reset the form to its defaults.
    pub fn clear_drafts(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        Self::abort_timers(&mut inner);

        self.state.apply(drafts::Action::ClearAll);
        self.store.clear_drafts()?;
        self.state
            .apply(drafts::Action::SetSaveStatus(SaveStatus::Idle));
        inner.last_saved = None;
        inner.buffer = FormBuffer::default();

        debug!("Cleared all drafts");

        Ok(())
    }

    /// Finalize the buffer into a new service log. If a draft is current it
    /// is deleted as part of the promotion. Validation failure leaves every
    /// collection and the buffer untouched.
    pub fn submit(&self) -> Result<ServiceLog> {
        let mut inner = self.inner.lock();

        let log = inner
            .buffer
            .finalize(generate_id())
            .map_err(Error::Validation)?;

        Self::abort_timers(&mut inner);

        self.state.apply(logs::Action::Add(log.clone()));
        self.store.save_log(&log)?;

        let current = self.current_draft_id();
        if let Some(id) = current {
            self.state.apply(drafts::Action::Delete(id.clone()));
            self.store.delete_draft(&id)?;
            debug!("Promoted draft {id} into service log: {}", log.id);
        } else {
            debug!("Created service log: {}", log.id);
        }

        self.state
            .apply(drafts::Action::SetSaveStatus(SaveStatus::Idle));
        inner.last_saved = None;
        inner.buffer = FormBuffer::default();

        Ok(log)
    }

    fn queue_autosave(&self, inner: &mut Inner) {
        let Some(draft_id) = self.current_draft_id() else {
            return;
        };
        if inner.last_saved.as_ref() == Some(&inner.buffer) {
            return;
        }

        if let Some(handle) = inner.autosave.take() {
            handle.abort();
        }

        self.state
            .apply(drafts::Action::SetSaveStatus(SaveStatus::Saving));
        let session = self.clone();
        inner.autosave = Some(tokio::spawn(async move {
            sleep(session.opts.autosave_debounce).await;
            session.flush_autosave(&draft_id);
        }));
    }

    fn flush_autosave(&self, draft_id: &str) {
        let mut inner = self.inner.lock();
        inner.autosave = None;

        // The selection may have moved while the timer was pending
        if self.state.read().drafts.current_draft_id() != Some(draft_id) {
            return;
        }

        let draft = inner.buffer.snapshot(draft_id, now_timestamp());
        self.state.apply(drafts::Action::Update(draft.clone()));
        if let Err(err) = self.store.save_draft(&draft) {
            warn!("Autosave could not reach storage for draft {draft_id}: {err}");
        }
        inner.last_saved = Some(inner.buffer.clone());
        self.state
            .apply(drafts::Action::SetSaveStatus(SaveStatus::Saved));

        debug!("Autosaved draft: {draft_id}");
    }

    fn abort_timers(inner: &mut Inner) {
        if let Some(handle) = inner.autosave.take() {
            handle.abort();
        }
        if let Some(handle) = inner.indicator.take() {
            handle.abort();
        }
    }
}
