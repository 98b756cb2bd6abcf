//! Task model and the collection engine.
//!
//! Every operation here is a pure value transform: it takes the current task
//! sequence as a slice and returns a new `Vec<Task>`, never mutating its
//! input. The caller (CLI or TUI controller) owns the current snapshot and
//! is the only writer. Operations are total over "id not found" - they
//! return the sequence unchanged instead of failing, since callers only ever
//! hand back ids they just rendered.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::{Error, Result};

/// A single task. The sole persisted entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable opaque id, generated at creation and never reused.
    pub id: String,
    pub title: String,
    pub completed: bool,
    /// Milliseconds since the Unix epoch, set once at creation.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    /// Calendar date as `YYYY-MM-DD`, no time component.
    #[serde(rename = "dueDate", default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Length of the short id shown to users. ULIDs share their leading time
/// characters, so the display form comes from the tail (random section).
pub const SHORT_ID_LEN: usize = 6;

impl Task {
    /// Creates a task with a fresh ULID and the current timestamp.
    /// The title is stored as given; callers trim before constructing.
    pub fn new(title: impl Into<String>, due_date: Option<String>) -> Self {
        Self {
            id: generate_id(),
            title: title.into(),
            completed: false,
            created_at: Utc::now().timestamp_millis(),
            due_date,
        }
    }

    /// Short display form of the id: its last [`SHORT_ID_LEN`] characters.
    pub fn short_id(&self) -> &str {
        let start = self.id.len().saturating_sub(SHORT_ID_LEN);
        &self.id[start..]
    }
}

/// Generates a unique task id.
pub fn generate_id() -> String {
    Ulid::new().to_string()
}

/// Prepends a new task. A title that is empty after trimming is a no-op,
/// not an error.
pub fn add(tasks: &[Task], title: &str, due_date: Option<&str>) -> Vec<Task> {
    let title = title.trim();
    if title.is_empty() {
        return tasks.to_vec();
    }
    let mut next = Vec::with_capacity(tasks.len() + 1);
    next.push(Task::new(title, due_date.map(|value| value.to_string())));
    next.extend(tasks.iter().cloned());
    next
}

/// Flips `completed` on the matching task. No-op if the id is absent.
pub fn toggle(tasks: &[Task], id: &str) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            if task.id == id {
                Task {
                    completed: !task.completed,
                    ..task.clone()
                }
            } else {
                task.clone()
            }
        })
        .collect()
}

/// Replaces the title in place, preserving position and all other fields.
/// An edit that leaves the title empty after trimming deletes the task.
/// No-op if the id is absent.
pub fn edit(tasks: &[Task], id: &str, new_title: &str) -> Vec<Task> {
    let new_title = new_title.trim();
    if new_title.is_empty() {
        return remove(tasks, id);
    }
    tasks
        .iter()
        .map(|task| {
            if task.id == id {
                Task {
                    title: new_title.to_string(),
                    ..task.clone()
                }
            } else {
                task.clone()
            }
        })
        .collect()
}

/// Replaces or clears the due date in place. No-op if the id is absent.
pub fn set_due_date(tasks: &[Task], id: &str, due_date: Option<&str>) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            if task.id == id {
                Task {
                    due_date: due_date.map(|value| value.to_string()),
                    ..task.clone()
                }
            } else {
                task.clone()
            }
        })
        .collect()
}

/// Removes the matching task. No-op if the id is absent.
pub fn remove(tasks: &[Task], id: &str) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.id != id)
        .cloned()
        .collect()
}

/// Removes every completed task, preserving the relative order of survivors.
pub fn clear_completed(tasks: &[Task]) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| !task.completed)
        .cloned()
        .collect()
}

/// Completes every task, unless all are already completed, in which case
/// every task is reopened. No-op on an empty sequence.
pub fn toggle_all(tasks: &[Task]) -> Vec<Task> {
    let all_completed = !tasks.is_empty() && tasks.iter().all(|task| task.completed);
    tasks
        .iter()
        .map(|task| Task {
            completed: !all_completed,
            ..task.clone()
        })
        .collect()
}

/// Single-element splice-move: removes the task with `from_id` and
/// re-inserts it at the index `to_id` occupied before the removal. For an
/// upward move this lands immediately before `to_id`; for a downward move
/// immediately after it, which is what one-step reordering against a
/// neighbor id requires. No-op if `from_id == to_id` or either id is absent.
///
/// `to_id` comes from the *filtered* view's neighbor order, but the splice
/// applies to the full sequence, so reordering within a filtered subset
/// still produces an order-preserving move in the full list.
pub fn reorder(tasks: &[Task], from_id: &str, to_id: &str) -> Vec<Task> {
    if from_id == to_id {
        return tasks.to_vec();
    }
    let from_index = tasks.iter().position(|task| task.id == from_id);
    let to_index = tasks.iter().position(|task| task.id == to_id);
    let (Some(from_index), Some(to_index)) = (from_index, to_index) else {
        return tasks.to_vec();
    };
    let mut next = tasks.to_vec();
    let moved = next.remove(from_index);
    next.insert(to_index, moved);
    next
}

/// Resolves a user-supplied id fragment to a full task id.
///
/// Matching is case-insensitive. An exact id match wins; otherwise the
/// fragment must be a unique suffix (the short display form) and failing
/// that a unique prefix. This is a controller convenience - the engine
/// operations above stay total over unknown ids.
pub fn resolve_id(tasks: &[Task], input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidArgument("task id cannot be empty".to_string()));
    }
    let needle = trimmed.to_ascii_lowercase();

    let mut suffix_matches: Vec<&str> = Vec::new();
    let mut prefix_matches: Vec<&str> = Vec::new();
    for task in tasks {
        let id_norm = task.id.to_ascii_lowercase();
        if id_norm == needle {
            return Ok(task.id.clone());
        }
        if id_norm.ends_with(&needle) {
            suffix_matches.push(task.id.as_str());
        }
        if id_norm.starts_with(&needle) {
            prefix_matches.push(task.id.as_str());
        }
    }

    let matches = if suffix_matches.is_empty() {
        prefix_matches
    } else {
        suffix_matches
    };

    match matches.len() {
        0 => Err(Error::TaskNotFound(trimmed.to_string())),
        1 => Ok(matches[0].to_string()),
        _ => Err(Error::AmbiguousTaskId {
            input: trimmed.to_string(),
            matches: matches.join(", "),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn task(id: &str, title: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            completed,
            created_at: 0,
            due_date: None,
        }
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|task| task.id.as_str()).collect()
    }

    #[test]
    fn add_prepends_and_keeps_rest_unchanged() {
        let seq = vec![task("a", "First", false), task("b", "Second", true)];
        let next = add(&seq, "Buy milk", None);
        assert_eq!(next.len(), 3);
        assert_eq!(next[0].title, "Buy milk");
        assert!(!next[0].completed);
        assert!(next[0].due_date.is_none());
        assert_eq!(&next[1..], &seq[..]);
    }

    #[test]
    fn add_trims_title_and_keeps_due_date() {
        let next = add(&[], "  Buy milk  ", Some("2026-08-10"));
        assert_eq!(next[0].title, "Buy milk");
        assert_eq!(next[0].due_date.as_deref(), Some("2026-08-10"));
    }

    #[test]
    fn add_whitespace_title_is_noop() {
        let seq = vec![task("a", "First", false)];
        let next = add(&seq, "   ", None);
        assert_eq!(next, seq);
    }

    #[test]
    fn add_generates_unique_ids() {
        let mut seq = Vec::new();
        for index in 0..50 {
            seq = add(&seq, &format!("Task {index}"), None);
        }
        let unique: HashSet<&str> = seq.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(unique.len(), seq.len());
    }

    #[test]
    fn toggle_flips_only_the_target() {
        let seq = vec![task("a", "First", false), task("b", "Second", false)];
        let next = toggle(&seq, "b");
        assert!(!next[0].completed);
        assert!(next[1].completed);
        let back = toggle(&next, "b");
        assert_eq!(back, seq);
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let seq = vec![task("a", "First", false)];
        assert_eq!(toggle(&seq, "zzz"), seq);
    }

    #[test]
    fn edit_replaces_title_in_place() {
        let seq = vec![
            task("a", "First", false),
            task("b", "Second", true),
            task("c", "Third", false),
        ];
        let next = edit(&seq, "b", "  Renamed  ");
        assert_eq!(ids(&next), vec!["a", "b", "c"]);
        assert_eq!(next[1].title, "Renamed");
        assert!(next[1].completed);
        assert_eq!(next[1].created_at, seq[1].created_at);
    }

    #[test]
    fn edit_to_empty_deletes_the_task() {
        let seq = add(&[], "X", None);
        let id = seq[0].id.clone();
        assert!(edit(&seq, &id, "").is_empty());
        assert!(edit(&seq, &id, "   ").is_empty());
    }

    #[test]
    fn edit_unknown_id_is_noop() {
        let seq = vec![task("a", "First", false)];
        assert_eq!(edit(&seq, "zzz", "New"), seq);
    }

    #[test]
    fn set_due_date_replaces_and_clears() {
        let seq = vec![task("a", "First", false)];
        let with_date = set_due_date(&seq, "a", Some("2026-01-02"));
        assert_eq!(with_date[0].due_date.as_deref(), Some("2026-01-02"));
        let cleared = set_due_date(&with_date, "a", None);
        assert_eq!(cleared, seq);
    }

    #[test]
    fn remove_preserves_order_of_others() {
        let seq = vec![
            task("a", "First", false),
            task("b", "Second", false),
            task("c", "Third", false),
        ];
        assert_eq!(ids(&remove(&seq, "b")), vec!["a", "c"]);
        assert_eq!(remove(&seq, "zzz"), seq);
    }

    #[test]
    fn clear_completed_keeps_survivor_order() {
        let seq = vec![
            task("a", "First", true),
            task("b", "Second", false),
            task("c", "Third", true),
            task("d", "Fourth", false),
        ];
        assert_eq!(ids(&clear_completed(&seq)), vec!["b", "d"]);
    }

    #[test]
    fn toggle_all_completes_then_reopens() {
        let seq = vec![task("a", "First", true), task("b", "Second", false)];
        let completed = toggle_all(&seq);
        assert!(completed.iter().all(|task| task.completed));
        let reopened = toggle_all(&completed);
        assert!(reopened.iter().all(|task| !task.completed));
    }

    #[test]
    fn toggle_all_pairing_restores_uniform_snapshots() {
        let all_open = vec![task("a", "First", false), task("b", "Second", false)];
        assert_eq!(toggle_all(&toggle_all(&all_open)), all_open);

        let all_done = vec![task("a", "First", true), task("b", "Second", true)];
        assert_eq!(toggle_all(&toggle_all(&all_done)), all_done);

        // A mixed snapshot collapses: first pass completes everything, the
        // second reopens everything.
        let mixed = vec![task("a", "First", true), task("b", "Second", false)];
        let twice = toggle_all(&toggle_all(&mixed));
        assert!(twice.iter().all(|task| !task.completed));
    }

    #[test]
    fn toggle_all_on_empty_is_empty() {
        assert!(toggle_all(&[]).is_empty());
    }

    #[test]
    fn reorder_moves_up_before_target() {
        let seq = vec![
            task("a", "First", false),
            task("b", "Second", false),
            task("c", "Third", false),
        ];
        assert_eq!(ids(&reorder(&seq, "c", "b")), vec!["a", "c", "b"]);
    }

    #[test]
    fn reorder_moves_down_after_target() {
        let seq = vec![
            task("a", "First", false),
            task("b", "Second", false),
            task("c", "Third", false),
        ];
        assert_eq!(ids(&reorder(&seq, "a", "b")), vec!["b", "a", "c"]);
        assert_eq!(ids(&reorder(&seq, "a", "c")), vec!["b", "c", "a"]);
    }

    #[test]
    fn reorder_same_id_is_noop() {
        let seq = vec![task("a", "First", false), task("b", "Second", false)];
        assert_eq!(reorder(&seq, "a", "a"), seq);
        assert_eq!(reorder(&seq, "zzz", "zzz"), seq);
    }

    #[test]
    fn reorder_unknown_id_is_noop() {
        let seq = vec![task("a", "First", false), task("b", "Second", false)];
        assert_eq!(reorder(&seq, "a", "zzz"), seq);
        assert_eq!(reorder(&seq, "zzz", "a"), seq);
    }

    #[test]
    fn serde_round_trip_is_exact() {
        let seq = vec![
            Task {
                id: "01ARZ3NDEKTSV4RRFFQ69G5FAV".to_string(),
                title: "Buy milk".to_string(),
                completed: true,
                created_at: 1_754_000_000_000,
                due_date: Some("2026-08-10".to_string()),
            },
            Task {
                id: "01BX5ZZKBKACTAV9WEVGEMMVRZ".to_string(),
                title: "Write report".to_string(),
                completed: false,
                created_at: 1_754_000_001_000,
                due_date: None,
            },
        ];
        let encoded = serde_json::to_string(&seq).expect("encode");
        let decoded: Vec<Task> = serde_json::from_str(&encoded).expect("decode");
        assert_eq!(decoded, seq);
    }

    #[test]
    fn serde_uses_camel_case_wire_names() {
        let seq = vec![Task {
            id: "a".to_string(),
            title: "T".to_string(),
            completed: false,
            created_at: 42,
            due_date: Some("2026-01-01".to_string()),
        }];
        let encoded = serde_json::to_string(&seq).expect("encode");
        assert!(encoded.contains("\"createdAt\":42"));
        assert!(encoded.contains("\"dueDate\":\"2026-01-01\""));
    }

    #[test]
    fn serde_accepts_null_and_missing_due_date() {
        let json = r#"[
            {"id":"a","title":"One","completed":false,"createdAt":1,"dueDate":null},
            {"id":"b","title":"Two","completed":true,"createdAt":2}
        ]"#;
        let decoded: Vec<Task> = serde_json::from_str(json).expect("decode");
        assert!(decoded[0].due_date.is_none());
        assert!(decoded[1].due_date.is_none());
    }

    #[test]
    fn resolve_id_accepts_exact_suffix_and_prefix() {
        let seq = vec![task("01ABCXKQ", "One", false), task("01QRSMZV", "Two", false)];
        assert_eq!(resolve_id(&seq, "01abcxkq").expect("exact"), "01ABCXKQ");
        // Short display form is a suffix.
        assert_eq!(resolve_id(&seq, "mzv").expect("suffix"), "01QRSMZV");
        assert_eq!(resolve_id(&seq, "01q").expect("prefix"), "01QRSMZV");
    }

    #[test]
    fn resolve_id_rejects_missing_and_ambiguous() {
        let seq = vec![task("01ABCX", "One", false), task("01ABCY", "Two", false)];
        assert!(matches!(
            resolve_id(&seq, "zzz"),
            Err(Error::TaskNotFound(_))
        ));
        assert!(matches!(
            resolve_id(&seq, "01abc"),
            Err(Error::AmbiguousTaskId { .. })
        ));
        assert!(matches!(
            resolve_id(&seq, "  "),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn short_id_is_the_tail_of_the_ulid() {
        let task = Task::new("X", None);
        assert_eq!(task.short_id().len(), SHORT_ID_LEN);
        assert!(task.id.ends_with(task.short_id()));
    }
}
