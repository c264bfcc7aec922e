//! Two-step delete: request, then confirm or cancel.

use tracing::debug;

use crate::error::StorageResult;
use crate::models::RecordId;
use crate::store::{Mutation, Record, RecordStore};

/// Holds at most one identity awaiting confirmation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteGate {
    pending: Option<RecordId>,
}

impl DeleteGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<RecordId> {
        self.pending
    }

    /// Marks `id` for deletion, replacing any earlier request.
    pub fn request(&mut self, id: RecordId) {
        if let Some(previous) = self.pending.replace(id) {
            debug!(%previous, %id, "pending delete replaced");
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Removes the pending record, if any, and clears the gate.
    ///
    /// Returns `None` when nothing was pending. On a storage error the
    /// request stays pending.
    pub fn confirm<R: Record>(&mut self, store: &mut RecordStore<R>) -> StorageResult<Option<Mutation>> {
        let Some(id) = self.pending else {
            return Ok(None);
        };
        let outcome = store.remove(id)?;
        self.pending = None;
        Ok(Some(outcome))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{JobDraft, JobRecord};
    use crate::storage::MemoryStore;
    use crate::store::test_support::FixedClock;

    fn store_with(count: usize) -> (RecordStore<JobRecord>, Vec<RecordId>) {
        let clock = FixedClock::new(1, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        let mut store = RecordStore::<JobRecord>::load(MemoryStore::shared(), clock);
        let ids = (0..count)
            .map(|n| {
                store
                    .insert(JobDraft {
                        company: format!("Company {n}"),
                        position: "Engineer".to_string(),
                        source: "Board".to_string(),
                        salary: "90k".to_string(),
                        location: "Remote".to_string(),
                        ..JobDraft::default()
                    })
                    .unwrap()
            })
            .collect();
        (store, ids)
    }

    #[test]
    fn latest_request_wins() {
        let (mut store, ids) = store_with(3);
        let mut gate = DeleteGate::new();

        gate.request(ids[0]);
        gate.request(ids[2]);
        assert_eq!(gate.confirm(&mut store).unwrap(), Some(Mutation::Applied));

        let remaining: Vec<RecordId> = store.list().iter().map(|j| j.id).collect();
        assert_eq!(remaining, vec![ids[0], ids[1]]);
        assert_eq!(gate.pending(), None);
    }

    #[test]
    fn cancel_keeps_record() {
        let (mut store, ids) = store_with(1);
        let mut gate = DeleteGate::new();

        gate.request(ids[0]);
        gate.cancel();
        assert_eq!(gate.confirm(&mut store).unwrap(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn request_alone_does_not_mutate() {
        let (store, ids) = store_with(2);
        let mut gate = DeleteGate::new();
        gate.request(ids[1]);
        assert_eq!(store.len(), 2);
        assert_eq!(gate.pending(), Some(ids[1]));
    }
}
