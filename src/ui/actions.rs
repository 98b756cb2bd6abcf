//! Mutation glue between the interactive UI and the collection engine.
//!
//! Each action applies one engine operation to the persisted snapshot and
//! reports what happened. The store write is fire-and-forget inside
//! `PersistedStore::set`, so a failing backend never blocks the UI.

use crate::store::{KvStore, PersistedStore};
use crate::task::{self, Task};

#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub changed: bool,
    pub message: String,
}

impl ActionOutcome {
    fn new(changed: bool, message: impl Into<String>) -> Self {
        Self {
            changed,
            message: message.into(),
        }
    }
}

type Store<S> = PersistedStore<Vec<Task>, S>;

fn apply<S: KvStore>(
    store: &mut Store<S>,
    transform: impl FnOnce(&[Task]) -> Vec<Task>,
) -> bool {
    let next = transform(store.value());
    let changed = &next != store.value();
    store.set(next);
    changed
}

pub fn add_task<S: KvStore>(
    store: &mut Store<S>,
    title: &str,
    due_date: Option<&str>,
) -> ActionOutcome {
    let changed = apply(store, |tasks| task::add(tasks, title, due_date));
    if changed {
        ActionOutcome::new(true, format!("added {}", store.value()[0].short_id()))
    } else {
        ActionOutcome::new(false, "nothing to add")
    }
}

pub fn toggle_task<S: KvStore>(store: &mut Store<S>, id: &str) -> ActionOutcome {
    let changed = apply(store, |tasks| task::toggle(tasks, id));
    let message = match store.value().iter().find(|task| task.id == id) {
        Some(task) if task.completed => "completed",
        Some(_) => "reopened",
        None => "no such task",
    };
    ActionOutcome::new(changed, message)
}

pub fn edit_task<S: KvStore>(store: &mut Store<S>, id: &str, title: &str) -> ActionOutcome {
    let existed = store.value().iter().any(|task| task.id == id);
    let changed = apply(store, |tasks| task::edit(tasks, id, title));
    let still_there = store.value().iter().any(|task| task.id == id);
    match (existed, still_there) {
        (true, false) => ActionOutcome::new(true, "deleted (empty title)"),
        (true, true) => ActionOutcome::new(changed, if changed { "updated" } else { "no changes" }),
        _ => ActionOutcome::new(false, "no such task"),
    }
}

pub fn delete_task<S: KvStore>(store: &mut Store<S>, id: &str) -> ActionOutcome {
    let changed = apply(store, |tasks| task::remove(tasks, id));
    ActionOutcome::new(changed, if changed { "deleted" } else { "no such task" })
}

pub fn set_due<S: KvStore>(
    store: &mut Store<S>,
    id: &str,
    due_date: Option<&str>,
) -> ActionOutcome {
    let changed = apply(store, |tasks| task::set_due_date(tasks, id, due_date));
    let message = match (changed, due_date) {
        (true, Some(due)) => format!("due {due}"),
        (true, None) => "due date cleared".to_string(),
        (false, _) => "no changes".to_string(),
    };
    ActionOutcome::new(changed, message)
}

pub fn move_task<S: KvStore>(store: &mut Store<S>, from_id: &str, to_id: &str) -> ActionOutcome {
    let changed = apply(store, |tasks| task::reorder(tasks, from_id, to_id));
    ActionOutcome::new(changed, if changed { "moved" } else { "" })
}

pub fn clear_completed<S: KvStore>(store: &mut Store<S>) -> ActionOutcome {
    let before = store.value().len();
    let changed = apply(store, task::clear_completed);
    let removed = before - store.value().len();
    if changed {
        ActionOutcome::new(true, format!("cleared {removed} completed"))
    } else {
        ActionOutcome::new(false, "nothing to clear")
    }
}

pub fn toggle_all<S: KvStore>(store: &mut Store<S>) -> ActionOutcome {
    let changed = apply(store, |tasks| task::toggle_all(tasks));
    if !changed {
        return ActionOutcome::new(false, "no tasks");
    }
    let all_completed = store.value().iter().all(|task| task.completed);
    ActionOutcome::new(
        true,
        if all_completed {
            "completed all"
        } else {
            "reopened all"
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, TASKS_KEY};

    fn empty_store() -> Store<MemoryStore> {
        PersistedStore::open(MemoryStore::new(), TASKS_KEY, Vec::new())
    }

    #[test]
    fn add_reports_the_new_task() {
        let mut store = empty_store();
        let outcome = add_task(&mut store, "Buy milk", Some("2026-08-10"));
        assert!(outcome.changed);
        assert!(outcome.message.starts_with("added "));
        assert_eq!(store.value().len(), 1);
    }

    #[test]
    fn add_blank_title_reports_noop() {
        let mut store = empty_store();
        let outcome = add_task(&mut store, "   ", None);
        assert!(!outcome.changed);
        assert!(store.value().is_empty());
    }

    #[test]
    fn toggle_reports_direction() {
        let mut store = empty_store();
        add_task(&mut store, "Buy milk", None);
        let id = store.value()[0].id.clone();

        let done = toggle_task(&mut store, &id);
        assert!(done.changed);
        assert_eq!(done.message, "completed");

        let undone = toggle_task(&mut store, &id);
        assert_eq!(undone.message, "reopened");
    }

    #[test]
    fn edit_to_empty_deletes() {
        let mut store = empty_store();
        add_task(&mut store, "Buy milk", None);
        let id = store.value()[0].id.clone();

        let outcome = edit_task(&mut store, &id, "  ");
        assert!(outcome.changed);
        assert_eq!(outcome.message, "deleted (empty title)");
        assert!(store.value().is_empty());
    }

    #[test]
    fn edit_same_title_reports_no_changes() {
        let mut store = empty_store();
        add_task(&mut store, "Buy milk", None);
        let id = store.value()[0].id.clone();

        let outcome = edit_task(&mut store, &id, "Buy milk");
        assert!(!outcome.changed);
        assert_eq!(outcome.message, "no changes");
    }

    #[test]
    fn move_against_unknown_target_reports_unchanged() {
        let mut store = empty_store();
        add_task(&mut store, "One", None);
        let id = store.value()[0].id.clone();
        let outcome = move_task(&mut store, &id, "missing");
        assert!(!outcome.changed);
    }

    #[test]
    fn clear_and_toggle_all_report_counts() {
        let mut store = empty_store();
        add_task(&mut store, "One", None);
        add_task(&mut store, "Two", None);

        let all = toggle_all(&mut store);
        assert_eq!(all.message, "completed all");

        let cleared = clear_completed(&mut store);
        assert!(cleared.changed);
        assert_eq!(cleared.message, "cleared 2 completed");

        let nothing = clear_completed(&mut store);
        assert!(!nothing.changed);
        assert_eq!(nothing.message, "nothing to clear");
    }
}
