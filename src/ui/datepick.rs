//! Calendar picker state over the month grid.
//!
//! Pure widget state: a view month, a cursor, and the previously selected
//! date. The picker never touches the collection; it resolves to a
//! [`DatePickerAction`] the app applies.

use chrono::{Datelike, Duration, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};

use crate::calendar::{self, GridCell};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatePickerAction {
    None,
    Cancel,
    /// A date was picked (`Some`) or the existing date cleared (`None`).
    Select(Option<String>),
}

#[derive(Debug, Clone)]
pub struct DatePicker {
    view_month: NaiveDate,
    cursor: NaiveDate,
    selected: Option<NaiveDate>,
    today: NaiveDate,
}

impl DatePicker {
    /// Opens on the month of `initial` (the current due date) or today.
    pub fn new(initial: Option<&str>, today: NaiveDate) -> Self {
        let selected = initial.and_then(calendar::parse_iso_date);
        let cursor = selected.unwrap_or(today);
        Self {
            view_month: calendar::start_of_month(cursor),
            cursor,
            selected,
            today,
        }
    }

    pub fn grid(&self) -> Vec<GridCell> {
        calendar::month_grid(self.view_month)
    }

    pub fn view_month(&self) -> NaiveDate {
        self.view_month
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    fn move_cursor(&mut self, days: i64) {
        self.cursor += Duration::days(days);
        self.view_month = calendar::start_of_month(self.cursor);
    }

    fn move_month(&mut self, delta: i32) {
        self.view_month = calendar::add_months(self.view_month, delta);
        // Keep the cursor inside the visible month.
        let day = self.cursor.day().min(days_in_month(self.view_month));
        self.cursor = self
            .view_month
            .with_day(day)
            .unwrap_or(self.view_month);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DatePickerAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => DatePickerAction::Cancel,
            KeyCode::Enter => {
                DatePickerAction::Select(Some(calendar::to_iso_date(self.cursor)))
            }
            KeyCode::Char('c') if self.selected.is_some() => DatePickerAction::Select(None),
            KeyCode::Char('t') => {
                self.cursor = self.today;
                self.view_month = calendar::start_of_month(self.today);
                DatePickerAction::None
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.move_cursor(-1);
                DatePickerAction::None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.move_cursor(1);
                DatePickerAction::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(-7);
                DatePickerAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(7);
                DatePickerAction::None
            }
            KeyCode::PageUp | KeyCode::Char('p') => {
                self.move_month(-1);
                DatePickerAction::None
            }
            KeyCode::PageDown | KeyCode::Char('n') => {
                self.move_month(1);
                DatePickerAction::None
            }
            _ => DatePickerAction::None,
        }
    }
}

fn days_in_month(first: NaiveDate) -> u32 {
    let next = calendar::add_months(first, 1);
    next.signed_duration_since(first).num_days() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    #[test]
    fn opens_on_the_selected_month() {
        let picker = DatePicker::new(Some("2026-01-15"), today());
        assert_eq!(
            picker.view_month(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
        assert_eq!(picker.cursor(), NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    }

    #[test]
    fn opens_on_today_without_a_selection() {
        let picker = DatePicker::new(None, today());
        assert_eq!(picker.cursor(), today());
        assert!(!picker.has_selection());
    }

    #[test]
    fn cursor_movement_follows_into_neighbor_months() {
        let mut picker = DatePicker::new(Some("2026-08-01"), today());
        picker.handle_key(key(KeyCode::Left));
        assert_eq!(picker.cursor(), NaiveDate::from_ymd_opt(2026, 7, 31).unwrap());
        assert_eq!(
            picker.view_month(),
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()
        );
    }

    #[test]
    fn month_navigation_clamps_the_cursor_day() {
        let mut picker = DatePicker::new(Some("2026-01-31"), today());
        picker.handle_key(key(KeyCode::PageDown));
        assert_eq!(picker.cursor(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
    }

    #[test]
    fn enter_selects_the_cursor_date_as_iso() {
        let mut picker = DatePicker::new(None, today());
        assert_eq!(
            picker.handle_key(key(KeyCode::Enter)),
            DatePickerAction::Select(Some("2026-08-06".to_string()))
        );
    }

    #[test]
    fn clear_only_offered_with_a_selection() {
        let mut with_selection = DatePicker::new(Some("2026-08-01"), today());
        assert_eq!(
            with_selection.handle_key(key(KeyCode::Char('c'))),
            DatePickerAction::Select(None)
        );

        let mut without = DatePicker::new(None, today());
        assert_eq!(
            without.handle_key(key(KeyCode::Char('c'))),
            DatePickerAction::None
        );
    }

    #[test]
    fn today_jumps_back() {
        let mut picker = DatePicker::new(Some("2020-02-02"), today());
        picker.handle_key(key(KeyCode::Char('t')));
        assert_eq!(picker.cursor(), today());
        assert_eq!(
            picker.view_month(),
            NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
        );
    }

    #[test]
    fn escape_cancels() {
        let mut picker = DatePicker::new(None, today());
        assert_eq!(picker.handle_key(key(KeyCode::Esc)), DatePickerAction::Cancel);
    }
}
