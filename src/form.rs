//! Create/edit form state machine.
//!
//! The controller is either `Idle` (no form shown) or `Editing` a draft,
//! optionally aimed at an existing record. A submit that fails validation
//! keeps the form open and touches nothing.

use tracing::debug;

use crate::error::StorageResult;
use crate::models::RecordId;
use crate::store::{Mutation, Record, RecordStore};

/// Form contents for one record type.
pub trait Draft: Default + Clone {
    type Record: Record;

    /// Returns the values to commit, or `None` when a required field is
    /// missing or malformed.
    fn validate(&self) -> Option<<Self::Record as Record>::Fields>;

    fn from_record(record: &Self::Record) -> Self;
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormState<D> {
    Idle,
    Editing { draft: D, target: Option<RecordId> },
}

/// What a call to [`FormController::submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(RecordId),
    Updated(RecordId),
    /// The edited record vanished from the store; the form still closes.
    Missing(RecordId),
    /// Validation failed; the form stays open.
    Invalid,
    /// Submit while no form was open.
    Closed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormController<D: Draft> {
    state: FormState<D>,
}

impl<D: Draft> Default for FormController<D> {
    fn default() -> Self {
        Self {
            state: FormState::Idle,
        }
    }
}

impl<D: Draft> FormController<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState<D> {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, FormState::Editing { .. })
    }

    /// Identity being edited, if the form is in edit mode.
    pub fn target(&self) -> Option<RecordId> {
        match &self.state {
            FormState::Editing { target, .. } => *target,
            FormState::Idle => None,
        }
    }

    pub fn draft(&self) -> Option<&D> {
        match &self.state {
            FormState::Editing { draft, .. } => Some(draft),
            FormState::Idle => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut D> {
        match &mut self.state {
            FormState::Editing { draft, .. } => Some(draft),
            FormState::Idle => None,
        }
    }

    pub fn open_create(&mut self) {
        self.state = FormState::Editing {
            draft: D::default(),
            target: None,
        };
    }

    pub fn open_edit(&mut self, record: &D::Record) {
        self.state = FormState::Editing {
            draft: D::from_record(record),
            target: Some(record.id()),
        };
    }

    pub fn cancel(&mut self) {
        self.state = FormState::Idle;
    }

    /// Commits the draft into `store` and closes the form.
    ///
    /// Storage failures are returned and leave the form open with its draft
    /// intact so the user can retry.
    pub fn submit(&mut self, store: &mut RecordStore<D::Record>) -> StorageResult<SubmitOutcome> {
        let FormState::Editing { draft, target } = &self.state else {
            return Ok(SubmitOutcome::Closed);
        };
        let Some(fields) = draft.validate() else {
            let kind = <D::Record as Record>::KIND;
            debug!(kind, "submit blocked by validation");
            return Ok(SubmitOutcome::Invalid);
        };

        let outcome = match *target {
            Some(id) => match store.update(id, fields)? {
                Mutation::Applied => SubmitOutcome::Updated(id),
                Mutation::NotFound => SubmitOutcome::Missing(id),
            },
            None => SubmitOutcome::Created(store.insert(fields)?),
        };
        self.state = FormState::Idle;
        Ok(outcome)
    }
}
