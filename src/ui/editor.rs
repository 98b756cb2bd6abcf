//! Single-line editor state for the new-task input and inline title edits.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    NewTask,
    EditTask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Cancel,
    Submit,
}

/// Draft text being typed. Session state only - never part of the persisted
/// snapshot. Escape cancels without touching the collection; submitting is
/// interpreted by the caller (an empty edit draft deletes the task, the
/// delete-on-empty-edit policy).
#[derive(Debug, Clone)]
pub struct EditorState {
    kind: EditorKind,
    value: String,
    task_id: Option<String>,
}

impl EditorState {
    pub fn new_task() -> Self {
        Self {
            kind: EditorKind::NewTask,
            value: String::new(),
            task_id: None,
        }
    }

    pub fn edit_task(task: &Task) -> Self {
        Self {
            kind: EditorKind::EditTask,
            value: task.title.clone(),
            task_id: Some(task.id.clone()),
        }
    }

    pub fn kind(&self) -> EditorKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('u') {
                self.value.clear();
            }
            return EditorAction::None;
        }
        match key.code {
            KeyCode::Esc => EditorAction::Cancel,
            KeyCode::Enter => EditorAction::Submit,
            KeyCode::Backspace => {
                self.value.pop();
                EditorAction::None
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                self.value.push(ch);
                EditorAction::None
            }
            _ => EditorAction::None,
        }
    }
}
