//! Interactive task list: application state and event loop.
//!
//! Session state (filter, search text, drafts, picker state, selection)
//! lives here and only here; the persisted domain snapshot stays inside the
//! `PersistedStore` and is replaced wholesale by engine operations.

use std::io;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::error::Result;
use crate::store::{KvStore, PersistedStore};
use crate::task::Task;
use crate::view::{self, Filter, Projection};

use super::actions::{self, ActionOutcome};
use super::datepick::{DatePicker, DatePickerAction};
use super::editor::{EditorAction, EditorKind, EditorState};
use super::view as render_view;

const EVENT_POLL_MS: u64 = 120;

/// Where a picked date should land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PickerTarget {
    /// The due date staged for the next added task.
    Draft,
    /// An existing task's due date.
    Task(String),
}

pub(crate) struct DatePickerState {
    pub(crate) picker: DatePicker,
    pub(crate) target: PickerTarget,
}

pub struct AppState<S: KvStore> {
    pub(crate) store: PersistedStore<Vec<Task>, S>,
    pub(crate) filter: Filter,
    pub(crate) search: String,
    pub(crate) search_active: bool,
    pub(crate) selected_id: Option<String>,
    pub(crate) editor: Option<EditorState>,
    /// Due date staged for the next added task, set from the date picker.
    pub(crate) draft_due: Option<String>,
    pub(crate) datepick: Option<DatePickerState>,
    pub(crate) info: Option<String>,
    pub(crate) show_help: bool,
}

impl<S: KvStore> AppState<S> {
    fn new(store: PersistedStore<Vec<Task>, S>, filter: Filter) -> Self {
        Self {
            store,
            filter,
            search: String::new(),
            search_active: false,
            selected_id: None,
            editor: None,
            draft_due: None,
            datepick: None,
            info: None,
            show_help: false,
        }
    }

    pub(crate) fn projection(&self) -> Projection<'_> {
        view::project(self.store.value(), self.filter, &self.search, view::now_ms())
    }

    /// Index of the selected row within the current filtered view, falling
    /// back to the first row when the remembered id is filtered out.
    pub(crate) fn selected_index(&self, projection: &Projection<'_>) -> Option<usize> {
        if projection.rows.is_empty() {
            return None;
        }
        self.selected_id
            .as_deref()
            .and_then(|id| {
                projection
                    .rows
                    .iter()
                    .position(|row| row.task.id == id)
            })
            .or(Some(0))
    }

    fn selected_task_id(&self) -> Option<String> {
        let projection = self.projection();
        let index = self.selected_index(&projection)?;
        Some(projection.rows[index].task.id.clone())
    }

    fn move_selection(&mut self, delta: isize) {
        let next_id = {
            let projection = self.projection();
            self.selected_index(&projection).map(|current| {
                let max = projection.rows.len() as isize - 1;
                let next = (current as isize + delta).clamp(0, max) as usize;
                projection.rows[next].task.id.clone()
            })
        };
        self.selected_id = next_id;
    }

    /// Neighbor id of the selected row within the *filtered* view. The move
    /// itself is applied to the full sequence with that id.
    fn selected_neighbor(&self, up: bool) -> Option<(String, String)> {
        let projection = self.projection();
        let index = self.selected_index(&projection)?;
        let row = &projection.rows[index];
        let target = if up { row.prev_id } else { row.next_id }?;
        Some((row.task.id.clone(), target.to_string()))
    }

    fn apply_outcome(&mut self, outcome: ActionOutcome) {
        if outcome.message.is_empty() {
            self.info = None;
        } else {
            self.info = Some(outcome.message);
        }
    }

    pub(crate) fn footer_hint(&self) -> String {
        if self.datepick.is_some() {
            return "arrows move  p/n month  t today  c clear  enter pick  esc close".to_string();
        }
        if let Some(editor) = self.editor.as_ref() {
            return match editor.kind() {
                EditorKind::NewTask => {
                    "type title  ctrl-d date  enter add  esc cancel".to_string()
                }
                EditorKind::EditTask => {
                    "type title  enter save (empty deletes)  esc cancel".to_string()
                }
            };
        }
        if self.search_active {
            return "type to search  enter done  esc clear".to_string();
        }
        "j/k move  space toggle  a add  e edit  d delete  J/K reorder  D date  f filter  / search  t toggle all  c clear done  q quit"
            .to_string()
    }

    pub(crate) fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

pub fn run<S: KvStore>(store: PersistedStore<Vec<Task>, S>, filter: Filter) -> Result<()> {
    let mut app = AppState::new(store, filter);
    run_terminal(&mut app)
}

fn run_terminal<S: KvStore>(app: &mut AppState<S>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop<S: KvStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState<S>,
) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| render_view::render(frame, app))?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(app, key) {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => {
                    dirty = true;
                }
                _ => {}
            }
        }
    }
    Ok(())
}

/// Handles one key event. Returns true to quit.
pub(crate) fn handle_key<S: KvStore>(app: &mut AppState<S>, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if let Some(mut state) = app.datepick.take() {
        match state.picker.handle_key(key) {
            DatePickerAction::None => {
                app.datepick = Some(state);
            }
            DatePickerAction::Cancel => {}
            DatePickerAction::Select(date) => match state.target {
                PickerTarget::Draft => {
                    app.draft_due = date;
                    app.info = app
                        .draft_due
                        .as_deref()
                        .map(|due| format!("new task due {due}"));
                }
                PickerTarget::Task(id) => {
                    let outcome = actions::set_due(&mut app.store, &id, date.as_deref());
                    app.apply_outcome(outcome);
                }
            },
        }
        return false;
    }

    if let Some(mut editor) = app.editor.take() {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && key.code == KeyCode::Char('d')
            && editor.kind() == EditorKind::NewTask
        {
            app.datepick = Some(DatePickerState {
                picker: DatePicker::new(app.draft_due.as_deref(), app.today()),
                target: PickerTarget::Draft,
            });
            app.editor = Some(editor);
            return false;
        }
        match editor.handle_key(key) {
            EditorAction::None => {
                app.editor = Some(editor);
            }
            EditorAction::Cancel => {
                app.info = Some("cancelled".to_string());
            }
            EditorAction::Submit => match editor.kind() {
                EditorKind::NewTask => {
                    let outcome =
                        actions::add_task(&mut app.store, editor.value(), app.draft_due.as_deref());
                    if outcome.changed {
                        app.selected_id = Some(app.store.value()[0].id.clone());
                        app.draft_due = None;
                    }
                    app.apply_outcome(outcome);
                }
                EditorKind::EditTask => {
                    if let Some(id) = editor.task_id() {
                        let outcome = actions::edit_task(&mut app.store, id, editor.value());
                        app.apply_outcome(outcome);
                    }
                }
            },
        }
        return false;
    }

    if app.search_active {
        match key.code {
            KeyCode::Esc => {
                app.search.clear();
                app.search_active = false;
            }
            KeyCode::Enter => app.search_active = false,
            KeyCode::Backspace => {
                app.search.pop();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if !ch.is_control() {
                    app.search.push(ch);
                }
            }
            _ => {}
        }
        return false;
    }

    if key.code == KeyCode::Char('?') {
        app.show_help = !app.show_help;
        return false;
    }
    if app.show_help {
        app.show_help = false;
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
        KeyCode::Char(' ') => {
            if let Some(id) = app.selected_task_id() {
                let outcome = actions::toggle_task(&mut app.store, &id);
                app.apply_outcome(outcome);
            }
        }
        KeyCode::Char('a') | KeyCode::Char('n') => {
            app.editor = Some(EditorState::new_task());
            app.info = None;
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = app.selected_task_id() {
                if let Some(task) = app.store.value().iter().find(|task| task.id == id) {
                    app.editor = Some(EditorState::edit_task(task));
                    app.info = None;
                }
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = app.selected_task_id() {
                let outcome = actions::delete_task(&mut app.store, &id);
                app.apply_outcome(outcome);
            }
        }
        KeyCode::Char('D') => {
            if let Some(id) = app.selected_task_id() {
                let current = app
                    .store
                    .value()
                    .iter()
                    .find(|task| task.id == id)
                    .and_then(|task| task.due_date.clone());
                app.datepick = Some(DatePickerState {
                    picker: DatePicker::new(current.as_deref(), app.today()),
                    target: PickerTarget::Task(id),
                });
            }
        }
        KeyCode::Char('J') => {
            if let Some((from, to)) = app.selected_neighbor(false) {
                let outcome = actions::move_task(&mut app.store, &from, &to);
                app.apply_outcome(outcome);
            }
        }
        KeyCode::Char('K') => {
            if let Some((from, to)) = app.selected_neighbor(true) {
                let outcome = actions::move_task(&mut app.store, &from, &to);
                app.apply_outcome(outcome);
            }
        }
        KeyCode::Char('f') => {
            app.filter = app.filter.next();
            app.info = Some(format!("filter: {}", app.filter));
        }
        KeyCode::Char('/') => {
            app.search_active = true;
            app.info = None;
        }
        KeyCode::Char('t') => {
            let outcome = actions::toggle_all(&mut app.store);
            app.apply_outcome(outcome);
        }
        KeyCode::Char('c') => {
            let outcome = actions::clear_completed(&mut app.store);
            app.apply_outcome(outcome);
        }
        _ => {}
    }
    false
}
