//! Gym workout and job application tracker.
//!
//! Two independent record lists (exercises and job applications) kept in a
//! key-value slot, each edited through a create/edit form, filtered for
//! display and deleted behind a confirmation step. A session gate decides
//! whether the lists or the sign-in screen are shown.

pub mod config;
pub mod confirm;
pub mod error;
pub mod filter;
pub mod form;
pub mod logging;
pub mod models;
pub mod session;
pub mod storage;
pub mod store;
pub mod ui;

pub use confirm::DeleteGate;
pub use error::{AuthError, StorageError};
pub use filter::{DateWindow, ExerciseFilter, ExerciseStats, JobSearch, MuscleFilter};
pub use form::{Draft, FormController, FormState, SubmitOutcome};
pub use models::{
    ExerciseDraft, ExerciseFields, ExerciseRecord, JobDraft, JobRecord, JobSchedule, JobStatus,
    MuscleGroup, RecordId,
};
pub use session::{HttpIdentityClient, IdentityClient, Profile, Route, SessionGate, SignInFlow, SignedIn};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SharedStore};
pub use store::{Clock, Mutation, Record, RecordStore, SystemClock};
