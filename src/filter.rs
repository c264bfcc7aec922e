//! Visible-subset derivation and summary statistics.
//!
//! Filters are pure functions of a record slice plus the filter state;
//! the UI recomputes them every frame.

use std::fmt;

use chrono::{Days, NaiveDate};

use crate::models::{ExerciseRecord, JobRecord, MuscleGroup};

/// Muscle-group selector; `All` disables the constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MuscleFilter {
    #[default]
    All,
    Only(MuscleGroup),
}

impl MuscleFilter {
    pub fn matches(&self, group: &MuscleGroup) -> bool {
        match self {
            MuscleFilter::All => true,
            MuscleFilter::Only(wanted) => wanted == group,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            MuscleFilter::All => "All",
            MuscleFilter::Only(group) => group.label(),
        }
    }
}

/// Trailing window over record dates, inclusive of both ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateWindow {
    #[default]
    All,
    Today,
    ThisWeek,
    ThisMonth,
}

impl DateWindow {
    pub const ALL: [DateWindow; 4] = [
        DateWindow::All,
        DateWindow::Today,
        DateWindow::ThisWeek,
        DateWindow::ThisMonth,
    ];

    /// Earliest calendar date still inside the window.
    pub fn start(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            DateWindow::All => None,
            DateWindow::Today => Some(today),
            DateWindow::ThisWeek => today.checked_sub_days(Days::new(7)),
            DateWindow::ThisMonth => today.checked_sub_days(Days::new(30)),
        }
    }

    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DateWindow::All => true,
            DateWindow::Today => date == today,
            window => window.start(today).map_or(true, |start| date >= start),
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DateWindow::All => "All Time",
            DateWindow::Today => "Today",
            DateWindow::ThisWeek => "This Week",
            DateWindow::ThisMonth => "This Month",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseFilter {
    pub muscle: MuscleFilter,
    pub window: DateWindow,
}

impl ExerciseFilter {
    pub fn matches(&self, record: &ExerciseRecord, today: NaiveDate) -> bool {
        self.muscle.matches(&record.muscle_group) && self.window.contains(record.date, today)
    }

    pub fn apply<'a>(&self, records: &'a [ExerciseRecord], today: NaiveDate) -> Vec<&'a ExerciseRecord> {
        records.iter().filter(|r| self.matches(r, today)).collect()
    }
}

/// Summary cards shown above the exercise list.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExerciseStats {
    pub count: usize,
    /// Sum of sets × reps.
    pub total_volume: u64,
    /// Sum of weight × sets × reps.
    pub total_weight: f64,
}

impl ExerciseStats {
    pub fn collect<'a>(records: impl IntoIterator<Item = &'a ExerciseRecord>) -> Self {
        records.into_iter().fold(ExerciseStats::default(), |acc, r| ExerciseStats {
            count: acc.count + 1,
            total_volume: acc.total_volume + r.volume(),
            total_weight: acc.total_weight + r.lifted_weight(),
        })
    }
}

/// Case-insensitive substring search over company, position and location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSearch {
    pub query: String,
}

impl JobSearch {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn matches(&self, job: &JobRecord) -> bool {
        let needle = self.query.to_lowercase();
        [&job.company, &job.position, &job.location]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn apply<'a>(&self, jobs: &'a [JobRecord]) -> Vec<&'a JobRecord> {
        jobs.iter().filter(|job| self.matches(job)).collect()
    }
}
