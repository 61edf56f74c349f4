//! In-memory domain state and its transitions.
//!
//! All mutation goes through [`AppState::apply`] with a named [`Action`];
//! callers never reach into the collections directly. Transitions are total:
//! they cannot fail, and referencing an unknown id is a safe no-op.

use std::sync::Arc;

use derive_more::Deref;
use parking_lot::RwLock;

pub mod drafts;
pub mod logs;

/// The whole of the application's observable state: finalized logs plus the
/// draft collection and its selection.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AppState {
    pub logs: logs::LogState,
    pub drafts: drafts::DraftState,
}

/// A state transition, delegated to the owning sub-state.
#[derive(Debug, Clone, derive_more::From)]
pub enum Action {
    Logs(logs::Action),
    Drafts(drafts::Action),
}

impl AppState {
    /// Single dispatch point for every state transition.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Logs(action) => self.logs.apply(action),
            Action::Drafts(action) => self.drafts.apply(action),
        }
    }
}

/// Shared handle to the application state.
///
/// Cheap to clone; the draft lifecycle controller and its timer tasks all
/// point at the same state behind a read-write lock.
#[derive(Debug, Default, Clone, Deref)]
pub struct StateHandle {
    #[deref]
    state: Arc<RwLock<AppState>>,
}

impl StateHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, action: impl Into<Action>) {
        self.state.write().apply(action.into());
    }
}
