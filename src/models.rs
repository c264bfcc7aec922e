//models.rs
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::form::Draft;
use crate::storage::{EXERCISES_KEY, JOBS_KEY};
use crate::store::Record;

/// Identity of a stored record: creation time in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed-choice field stored as its label.
///
/// Labels outside the known set load into `Other` and are written back
/// unchanged, so a stored value is never rejected or rewritten.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $first:ident => $first_label:literal
            $(, $variant:ident => $label:literal)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $first,
            $($variant,)*
            Other(String),
        }

        impl $name {
            pub const LABELS: &'static [&'static str] = &[$first_label $(, $label)*];

            /// Every recognized option, in display order.
            pub fn all() -> Vec<Self> {
                Self::LABELS.iter().map(|label| Self::from(label.to_string())).collect()
            }

            pub fn label(&self) -> &str {
                match self {
                    Self::$first => $first_label,
                    $(Self::$variant => $label,)*
                    Self::Other(raw) => raw,
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$first
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.as_str() {
                    $first_label => Self::$first,
                    $($label => Self::$variant,)*
                    _ => Self::Other(raw),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(raw) => raw,
                    known => known.label().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

choice_enum! {
    /// Muscle group an exercise trains.
    MuscleGroup {
        Chest => "Chest",
        Back => "Back",
        Legs => "Legs",
        Shoulders => "Shoulders",
        Biceps => "Biceps",
        Triceps => "Triceps",
        Forearms => "Forearms",
        Abs => "Abs",
        Cardio => "Cardio",
    }
}

choice_enum! {
    /// Working arrangement of a job posting.
    JobSchedule {
        FullTime => "Full-time",
        PartTime => "Part-time",
        Contract => "Contract",
        Freelance => "Freelance",
        Internship => "Internship",
    }
}

choice_enum! {
    /// Where an application stands.
    JobStatus {
        Applied => "Applied",
        Interviewing => "Interviewing",
        Offer => "Offer",
        Rejected => "Rejected",
        Accepted => "Accepted",
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRecord {
    pub id: RecordId,
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
    /// Day the record was created. Never changes on edit.
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

impl ExerciseRecord {
    /// Total repetitions, sets × reps.
    pub fn volume(&self) -> u64 {
        u64::from(self.sets) * u64::from(self.reps)
    }

    /// Weight moved across every repetition.
    pub fn lifted_weight(&self) -> f64 {
        self.weight * self.volume() as f64
    }
}

/// Validated exercise values, ready to be written into a record.
#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseFields {
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
    pub notes: String,
}

impl Record for ExerciseRecord {
    type Fields = ExerciseFields;

    const STORAGE_KEY: &'static str = EXERCISES_KEY;
    const KIND: &'static str = "exercise";

    fn id(&self) -> RecordId {
        self.id
    }

    fn create(id: RecordId, fields: ExerciseFields, today: NaiveDate) -> Self {
        ExerciseRecord {
            id,
            name: fields.name,
            muscle_group: fields.muscle_group,
            sets: fields.sets,
            reps: fields.reps,
            weight: fields.weight,
            date: today,
            notes: fields.notes,
        }
    }

    fn overwrite(&mut self, fields: ExerciseFields) {
        self.name = fields.name;
        self.muscle_group = fields.muscle_group;
        self.sets = fields.sets;
        self.reps = fields.reps;
        self.weight = fields.weight;
        self.notes = fields.notes;
    }
}

/// Exercise form contents as typed, numbers still in text form.
#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseDraft {
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub sets: String,
    pub reps: String,
    pub weight: String,
    pub notes: String,
}

impl Default for ExerciseDraft {
    fn default() -> Self {
        ExerciseDraft {
            name: String::new(),
            muscle_group: MuscleGroup::Chest,
            sets: "3".to_string(),
            reps: "10".to_string(),
            weight: "0".to_string(),
            notes: String::new(),
        }
    }
}

fn parse_count(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

fn parse_weight(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite() && *w >= 0.0)
}

impl Draft for ExerciseDraft {
    type Record = ExerciseRecord;

    fn validate(&self) -> Option<ExerciseFields> {
        if self.name.is_empty() || self.muscle_group.label().is_empty() {
            return None;
        }
        Some(ExerciseFields {
            name: self.name.clone(),
            muscle_group: self.muscle_group.clone(),
            sets: parse_count(&self.sets)?,
            reps: parse_count(&self.reps)?,
            weight: parse_weight(&self.weight)?,
            notes: self.notes.clone(),
        })
    }

    fn from_record(record: &ExerciseRecord) -> Self {
        ExerciseDraft {
            name: record.name.clone(),
            muscle_group: record.muscle_group.clone(),
            sets: record.sets.to_string(),
            reps: record.reps.to_string(),
            weight: record.weight.to_string(),
            notes: record.notes.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: RecordId,
    pub company: String,
    pub position: String,
    pub source: String,
    pub salary: String,
    pub location: String,
    #[serde(default)]
    pub schedule: JobSchedule,
    #[serde(default)]
    pub status: JobStatus,
}

/// Job form contents. Every text field is required.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JobDraft {
    pub company: String,
    pub position: String,
    pub source: String,
    pub salary: String,
    pub location: String,
    pub schedule: JobSchedule,
    pub status: JobStatus,
}

impl Record for JobRecord {
    type Fields = JobDraft;

    const STORAGE_KEY: &'static str = JOBS_KEY;
    const KIND: &'static str = "job";

    fn id(&self) -> RecordId {
        self.id
    }

    fn create(id: RecordId, fields: JobDraft, _today: NaiveDate) -> Self {
        JobRecord {
            id,
            company: fields.company,
            position: fields.position,
            source: fields.source,
            salary: fields.salary,
            location: fields.location,
            schedule: fields.schedule,
            status: fields.status,
        }
    }

    fn overwrite(&mut self, fields: JobDraft) {
        self.company = fields.company;
        self.position = fields.position;
        self.source = fields.source;
        self.salary = fields.salary;
        self.location = fields.location;
        self.schedule = fields.schedule;
        self.status = fields.status;
    }
}

impl Draft for JobDraft {
    type Record = JobRecord;

    fn validate(&self) -> Option<JobDraft> {
        let required = [
            &self.company,
            &self.position,
            &self.source,
            &self.salary,
            &self.location,
        ];
        if required.iter().any(|field| field.is_empty()) {
            return None;
        }
        Some(self.clone())
    }

    fn from_record(record: &JobRecord) -> Self {
        JobDraft {
            company: record.company.clone(),
            position: record.position.clone(),
            source: record.source.clone(),
            salary: record.salary.clone(),
            location: record.location.clone(),
            schedule: record.schedule.clone(),
            status: record.status.clone(),
        }
    }
}
