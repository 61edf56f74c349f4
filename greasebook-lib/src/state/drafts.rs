use crate::model::{Draft, SaveStatus};

/// The draft collection plus the current-draft selection and the save
/// indicator.
///
/// Invariant: `current_draft_id` is either `None` or the id of a draft in
/// the collection; every transition that removes a draft maintains this.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DraftState {
    drafts: Vec<Draft>,
    current_draft_id: Option<String>,
    save_status: SaveStatus,
}

#[derive(Debug, Clone)]
pub enum Action {
    /// Replace the whole collection, as loaded from storage.
    Set(Vec<Draft>),
    /// Append a draft and make it the current one.
    Add(Draft),
    /// Replace the draft matching the payload's id. No-op if absent.
    Update(Draft),
    /// Remove the draft with the given id, clearing the selection if it was
    /// current. No-op if absent.
    Delete(String),
    ClearAll,
    SetCurrent(Option<String>),
    SetSaveStatus(SaveStatus),
}

impl DraftState {
    pub fn drafts(&self) -> &[Draft] {
        &self.drafts
    }

    pub fn get(&self, id: &str) -> Option<&Draft> {
        self.drafts.iter().find(|draft| draft.id == id)
    }

    pub fn current_draft_id(&self) -> Option<&str> {
        self.current_draft_id.as_deref()
    }

    /// The draft the selection points at, if any.
    pub fn current(&self) -> Option<&Draft> {
        self.current_draft_id().and_then(|id| self.get(id))
    }

    pub fn save_status(&self) -> SaveStatus {
        self.save_status
    }

    pub(crate) fn apply(&mut self, action: Action) {
        match action {
            Action::Set(drafts) => self.drafts = drafts,
            Action::Add(draft) => {
                self.current_draft_id = Some(draft.id.clone());
                self.drafts.push(draft);
            }
            Action::Update(draft) => {
                if let Some(slot) = self.drafts.iter_mut().find(|d| d.id == draft.id) {
                    *slot = draft;
                }
            }
            Action::Delete(id) => {
                self.drafts.retain(|draft| draft.id != id);
                if self.current_draft_id.as_deref() == Some(id.as_str()) {
                    self.current_draft_id = None;
                }
            }
            Action::ClearAll => {
                self.drafts.clear();
                self.current_draft_id = None;
            }
            Action::SetCurrent(id) => self.current_draft_id = id,
            Action::SetSaveStatus(status) => self.save_status = status,
        }
    }
}
