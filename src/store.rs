//! Ordered record list mirrored into a key-value slot.
//!
//! Every successful mutation writes the whole list to the slot before it
//! returns. If the write fails the in-memory list is left as it was.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::StorageResult;
use crate::models::RecordId;
use crate::storage::{KeyValueStore, SharedStore};

/// A record type the store can hold.
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned {
    /// Validated values written on create and on edit.
    type Fields;

    /// Slot the list is persisted under.
    const STORAGE_KEY: &'static str;
    /// Short name used in log events.
    const KIND: &'static str;

    fn id(&self) -> RecordId;

    fn create(id: RecordId, fields: Self::Fields, today: NaiveDate) -> Self;

    /// Replaces every field except identity and creation-only fields.
    fn overwrite(&mut self, fields: Self::Fields);
}

/// Source of "now" for identities and date windows.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
    fn today(&self) -> NaiveDate;
}

/// Wall clock. "Today" is the UTC calendar date.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Result of an update or remove addressed by identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    /// No record had the identity; nothing was written.
    NotFound,
}

pub struct RecordStore<R: Record> {
    records: Vec<R>,
    slot: SharedStore,
    clock: Arc<dyn Clock>,
}

impl<R: Record> RecordStore<R> {
    /// Loads the list from the slot.
    ///
    /// An absent slot, an unreadable slot and malformed contents all yield
    /// an empty store.
    pub fn load(slot: SharedStore, clock: Arc<dyn Clock>) -> Self {
        let records = match slot.get(R::STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<R>>(&raw) {
                Ok(records) => records,
                Err(e) => {
                    warn!(kind = R::KIND, error = %e, "discarding malformed stored records");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                error!(kind = R::KIND, error = %e, "failed to read stored records");
                Vec::new()
            }
        };
        info!(kind = R::KIND, count = records.len(), "loaded records");

        RecordStore {
            records,
            slot,
            clock,
        }
    }

    /// Records in insertion order.
    pub fn list(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn insert(&mut self, fields: R::Fields) -> StorageResult<RecordId> {
        let id = self.next_id();
        let record = R::create(id, fields, self.clock.today());

        let mut next = self.records.clone();
        next.push(record);
        self.commit(next)?;

        info!(kind = R::KIND, %id, "record created");
        Ok(id)
    }

    pub fn update(&mut self, id: RecordId, fields: R::Fields) -> StorageResult<Mutation> {
        let Some(index) = self.position(id) else {
            return Ok(Mutation::NotFound);
        };

        let mut next = self.records.clone();
        next[index].overwrite(fields);
        self.commit(next)?;

        info!(kind = R::KIND, %id, "record updated");
        Ok(Mutation::Applied)
    }

    pub fn remove(&mut self, id: RecordId) -> StorageResult<Mutation> {
        let Some(index) = self.position(id) else {
            return Ok(Mutation::NotFound);
        };

        let mut next = self.records.clone();
        next.remove(index);
        self.commit(next)?;

        info!(kind = R::KIND, %id, "record removed");
        Ok(Mutation::Applied)
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    /// Creation-time identity, bumped past the newest existing one so two
    /// inserts within the same millisecond stay distinct.
    fn next_id(&self) -> RecordId {
        let now = self.clock.now_millis();
        let newest = self.records.iter().map(|r| r.id().0).max();
        match newest {
            Some(newest) if newest >= now => match newest.checked_add(1) {
                Some(id) => RecordId(id),
                None => {
                    warn!(kind = R::KIND, "newest identity is i64::MAX, reusing a free slot");
                    self.first_free_from(now)
                }
            },
            _ => RecordId(now),
        }
    }

    /// Lowest identity at or above `start` that no record holds, wrapping
    /// below `start` only if the whole upper range is taken.
    fn first_free_from(&self, start: i64) -> RecordId {
        let taken: BTreeSet<i64> = self.records.iter().map(|r| r.id().0).collect();
        (start..=i64::MAX)
            .chain((i64::MIN..start).rev())
            .find(|candidate| !taken.contains(candidate))
            .map_or(RecordId(start), RecordId)
    }

    fn commit(&mut self, next: Vec<R>) -> StorageResult<()> {
        let encoded = serde_json::to_string(&next)?;
        if let Err(e) = self.slot.set(R::STORAGE_KEY, &encoded) {
            error!(kind = R::KIND, error = %e, "failed to persist records");
            return Err(e);
        }
        self.records = next;
        Ok(())
    }
}

impl<R: Record> fmt::Debug for RecordStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("kind", &R::KIND)
            .field("records", &self.records)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::FixedClock;
    use super::*;
    use crate::error::StorageError;
    use crate::models::{
        ExerciseFields, ExerciseRecord, JobDraft, JobRecord, JobSchedule, JobStatus, MuscleGroup,
    };
    use crate::storage::{KeyValueStore, MemoryStore, EXERCISES_KEY, JOBS_KEY};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn job(company: &str) -> JobDraft {
        JobDraft {
            company: company.to_string(),
            position: "Engineer".to_string(),
            source: "LinkedIn".to_string(),
            salary: "120k".to_string(),
            location: "Austin".to_string(),
            ..JobDraft::default()
        }
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }

        fn remove(&self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    #[test]
    fn same_millisecond_inserts_get_distinct_ids() {
        let clock = FixedClock::new(1_000, today());
        let mut store = RecordStore::<JobRecord>::load(MemoryStore::shared(), clock.clone());

        let a = store.insert(job("A")).unwrap();
        let b = store.insert(job("B")).unwrap();
        clock.advance(500);
        let c = store.insert(job("C")).unwrap();

        assert_eq!(a, RecordId(1_000));
        assert_eq!(b, RecordId(1_001));
        assert_eq!(c, RecordId(1_500));
    }

    #[test]
    fn insert_persists_before_returning() {
        let slot = MemoryStore::shared();
        let mut store = RecordStore::<JobRecord>::load(slot.clone(), FixedClock::new(7, today()));
        store.insert(job("Acme")).unwrap();

        let raw = slot.get(JOBS_KEY).unwrap().unwrap();
        let stored: Vec<JobRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, store.list());
    }

    #[test]
    fn failed_write_leaves_store_unchanged() {
        let slot: SharedStore = Arc::new(FailingStore);
        let mut store = RecordStore::<JobRecord>::load(slot, FixedClock::new(7, today()));

        assert!(store.insert(job("Acme")).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn malformed_slot_loads_empty() {
        let slot = MemoryStore::shared();
        slot.set(EXERCISES_KEY, "[{\"id\":").unwrap();
        let store = RecordStore::<ExerciseRecord>::load(slot, FixedClock::new(7, today()));
        assert!(store.is_empty());
    }

    #[test]
    fn exercise_update_keeps_creation_date() {
        let clock = FixedClock::new(10, today());
        let slot = MemoryStore::shared();
        let mut store = RecordStore::<ExerciseRecord>::load(slot.clone(), clock);
        let id = store
            .insert(ExerciseFields {
                name: "Row".to_string(),
                muscle_group: MuscleGroup::Back,
                sets: 3,
                reps: 12,
                weight: 80.0,
                notes: String::new(),
            })
            .unwrap();

        // Reload on a later day and edit.
        let later = FixedClock::new(99, today().succ_opt().unwrap());
        let mut store = RecordStore::<ExerciseRecord>::load(slot, later);
        let outcome = store
            .update(
                id,
                ExerciseFields {
                    name: "Pendlay Row".to_string(),
                    muscle_group: MuscleGroup::Back,
                    sets: 5,
                    reps: 5,
                    weight: 100.0,
                    notes: "paused".to_string(),
                },
            )
            .unwrap();

        assert_eq!(outcome, Mutation::Applied);
        assert_eq!(
            store.get(id),
            Some(&ExerciseRecord {
                id,
                name: "Pendlay Row".to_string(),
                muscle_group: MuscleGroup::Back,
                sets: 5,
                reps: 5,
                weight: 100.0,
                date: today(),
                notes: "paused".to_string(),
            })
        );
    }

    #[test]
    fn job_update_replaces_every_field_but_id() {
        let mut store = RecordStore::<JobRecord>::load(MemoryStore::shared(), FixedClock::new(7, today()));
        let id = store.insert(job("Acme")).unwrap();

        let replacement = JobDraft {
            company: "Globex".to_string(),
            position: "Staff Engineer".to_string(),
            source: "Referral".to_string(),
            salary: "180k".to_string(),
            location: "Remote".to_string(),
            schedule: JobSchedule::Contract,
            status: JobStatus::Offer,
        };
        assert_eq!(store.update(id, replacement).unwrap(), Mutation::Applied);

        assert_eq!(
            store.list(),
            &[JobRecord {
                id,
                company: "Globex".to_string(),
                position: "Staff Engineer".to_string(),
                source: "Referral".to_string(),
                salary: "180k".to_string(),
                location: "Remote".to_string(),
                schedule: JobSchedule::Contract,
                status: JobStatus::Offer,
            }]
        );
    }

    #[test]
    fn insert_after_max_identity_picks_a_free_one() {
        let slot = MemoryStore::shared();
        let seeded = format!(
            r#"[{{"id":{},"company":"Acme","position":"Engineer","source":"Board","salary":"90k","location":"Remote","schedule":"Full-time","status":"Applied"}}]"#,
            i64::MAX
        );
        slot.set(JOBS_KEY, &seeded).unwrap();
        let mut store = RecordStore::<JobRecord>::load(slot, FixedClock::new(1_000, today()));
        assert_eq!(store.len(), 1);

        let first = store.insert(job("B")).unwrap();
        let second = store.insert(job("C")).unwrap();

        assert_eq!(first, RecordId(1_000));
        assert_eq!(second, RecordId(1_001));
        let ids: Vec<RecordId> = store.list().iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![RecordId(i64::MAX), RecordId(1_000), RecordId(1_001)]);
    }

    #[test]
    fn missing_identity_is_a_noop() {
        let slot = MemoryStore::shared();
        let mut store = RecordStore::<JobRecord>::load(slot.clone(), FixedClock::new(7, today()));
        store.insert(job("Acme")).unwrap();
        let before = slot.get(JOBS_KEY).unwrap();

        assert_eq!(store.remove(RecordId(42)).unwrap(), Mutation::NotFound);
        assert_eq!(store.update(RecordId(42), job("Other")).unwrap(), Mutation::NotFound);
        assert_eq!(store.len(), 1);
        assert_eq!(slot.get(JOBS_KEY).unwrap(), before);
    }
}
