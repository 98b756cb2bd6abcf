//! View projection over a task snapshot.
//!
//! Stateless derivation: filtering, search, summary counts and overdue
//! detection. The projector never reorders and never mutates - it only
//! reports which full-sequence ids sit before/after each row *within the
//! filtered view*, so the controller can hand those ids to
//! [`crate::task::reorder`] against the full sequence.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::task::Task;

/// Status filter selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn passes(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }

    /// Cycle order used by the interactive UI: all -> active -> completed.
    pub fn next(self) -> Filter {
        match self {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" => Ok(Filter::Completed),
            other => Err(format!(
                "invalid filter '{other}' (expected all|active|completed)"
            )),
        }
    }
}

/// One rendered row of the filtered view.
///
/// `prev_id`/`next_id` are the ids of the neighboring rows in the *filtered*
/// view; both are valid reorder targets in the full sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    pub task: &'a Task,
    pub prev_id: Option<&'a str>,
    pub next_id: Option<&'a str>,
    pub overdue: bool,
}

/// The derived view of a snapshot: filtered rows plus filter-independent
/// summary counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<'a> {
    pub rows: Vec<Row<'a>>,
    /// Count of active tasks over the full, unfiltered snapshot.
    pub remaining: usize,
    /// Whether any task in the full snapshot is completed. Drives the
    /// visibility of the clear-completed control.
    pub has_completed: bool,
}

/// Current instant in epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Whether a task counts as overdue at `now_ms`.
///
/// A due date is compared as its midnight-UTC instant against the full
/// current timestamp, so a task due today is overdue as soon as any time has
/// passed today. Completed tasks and unparseable dates are never overdue.
pub fn is_overdue(task: &Task, now_ms: i64) -> bool {
    if task.completed {
        return false;
    }
    let Some(due) = task.due_date.as_deref() else {
        return false;
    };
    let Some(date) = calendar::parse_iso_date(due) else {
        return false;
    };
    let Some(midnight) = date.and_hms_opt(0, 0, 0) else {
        return false;
    };
    midnight.and_utc().timestamp_millis() < now_ms
}

/// Derives the filtered view and summary counts from a snapshot.
///
/// Filter and search compose as a logical AND, filter first. Search is a
/// case-insensitive substring match on the title; an empty or
/// whitespace-only query passes everything the filter passed. The counts
/// are computed over the full snapshot regardless of filter and search.
pub fn project<'a>(tasks: &'a [Task], filter: Filter, search: &str, now_ms: i64) -> Projection<'a> {
    let query = search.trim().to_lowercase();

    let visible: Vec<&Task> = tasks
        .iter()
        .filter(|task| filter.passes(task))
        .filter(|task| query.is_empty() || task.title.to_lowercase().contains(&query))
        .collect();

    let rows = visible
        .iter()
        .enumerate()
        .map(|(index, task)| Row {
            task,
            prev_id: index
                .checked_sub(1)
                .and_then(|prev| visible.get(prev))
                .map(|task| task.id.as_str()),
            next_id: visible.get(index + 1).map(|task| task.id.as_str()),
            overdue: is_overdue(task, now_ms),
        })
        .collect();

    Projection {
        rows,
        remaining: tasks.iter().filter(|task| !task.completed).count(),
        has_completed: tasks.iter().any(|task| task.completed),
    }
}
