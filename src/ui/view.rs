//! Rendering for the interactive task list.

use chrono::Datelike;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::store::KvStore;
use crate::view::Projection;

use super::app::AppState;
use super::datepick::DatePicker;
use super::editor::EditorKind;

const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
const COLOR_BG_SELECTED: Color = Color::Rgb(52, 56, 60);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);

pub fn render<S: KvStore>(frame: &mut Frame, app: &AppState<S>) {
    let area = frame.size();
    let input_height = if app.editor.is_some() {
        3
    } else if app.search_active || !app.search.is_empty() {
        1
    } else {
        0
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(2),
                Constraint::Length(input_height),
                Constraint::Min(0),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .split(area);

    let projection = app.projection();

    render_header(frame, app, chunks[0]);
    if input_height > 0 {
        render_input(frame, app, chunks[1]);
    }
    render_list(frame, app, &projection, chunks[2]);
    render_footer(frame, app, &projection, chunks[3]);

    if let Some(state) = app.datepick.as_ref() {
        render_datepick_modal(frame, area, &state.picker);
    }
    if app.show_help {
        render_help_modal(frame, area);
    }
}

fn render_header<S: KvStore>(frame: &mut Frame, app: &AppState<S>, area: Rect) {
    let today = app.today();
    let line = Line::from(vec![
        Span::styled(
            "Tasks",
            Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            today.format("%B %-d, %Y").to_string(),
            Style::default().fg(COLOR_MUTED),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", app.filter),
            Style::default().fg(COLOR_INFO),
        ),
    ]);
    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(COLOR_MUTED_DARK)),
    );
    frame.render_widget(widget, area);
}

fn render_input<S: KvStore>(frame: &mut Frame, app: &AppState<S>, area: Rect) {
    if let Some(editor) = app.editor.as_ref() {
        let title = match editor.kind() {
            EditorKind::NewTask => match app.draft_due.as_deref() {
                Some(due) => format!("New task (due {due})"),
                None => "New task".to_string(),
            },
            EditorKind::EditTask => "Edit task".to_string(),
        };
        let widget = Paragraph::new(Line::from(vec![
            Span::styled(editor.value().to_string(), Style::default().fg(COLOR_TEXT)),
            Span::styled("_", Style::default().fg(COLOR_ACCENT)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(COLOR_ACCENT)),
        );
        frame.render_widget(widget, area);
        return;
    }

    let cursor = if app.search_active { "_" } else { "" };
    let widget = Paragraph::new(Line::from(vec![
        Span::styled("search: ", Style::default().fg(COLOR_MUTED)),
        Span::styled(
            format!("{}{cursor}", app.search),
            Style::default().fg(COLOR_TEXT),
        ),
    ]));
    frame.render_widget(widget, area);
}

fn render_list<S: KvStore>(
    frame: &mut Frame,
    app: &AppState<S>,
    projection: &Projection<'_>,
    area: Rect,
) {
    let selected = app.selected_index(projection);
    let mut lines = Vec::new();

    if projection.rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "no tasks to show",
            Style::default().fg(COLOR_MUTED_DARK),
        )));
    }

    for (index, row) in projection.rows.iter().enumerate() {
        let is_selected = selected == Some(index);
        let marker = if row.task.completed { "[x]" } else { "[ ]" };

        let title_style = if row.overdue {
            Style::default().fg(COLOR_ERROR)
        } else if row.task.completed {
            Style::default()
                .fg(COLOR_MUTED_DARK)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(COLOR_TEXT)
        };

        let mut spans = vec![
            Span::styled(
                format!("{marker} "),
                Style::default().fg(if row.task.completed {
                    COLOR_SUCCESS
                } else {
                    COLOR_MUTED
                }),
            ),
            Span::styled(
                format!("{} ", row.task.short_id()),
                Style::default().fg(COLOR_MUTED_DARK),
            ),
            Span::styled(row.task.title.clone(), title_style),
        ];
        if let Some(due) = row.task.due_date.as_deref() {
            let due_style = if row.overdue {
                Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(COLOR_MUTED)
            };
            spans.push(Span::styled(format!("  due {due}"), due_style));
            if row.overdue {
                spans.push(Span::styled(
                    " (overdue)",
                    Style::default().fg(COLOR_ERROR),
                ));
            }
        }

        let mut line = Line::from(spans);
        if is_selected {
            line = line.style(Style::default().bg(COLOR_BG_SELECTED));
        }
        lines.push(line);
    }

    let widget = Paragraph::new(lines);
    frame.render_widget(widget, area);
}

fn render_footer<S: KvStore>(
    frame: &mut Frame,
    app: &AppState<S>,
    projection: &Projection<'_>,
    area: Rect,
) {
    let label = if projection.remaining == 1 {
        "task"
    } else {
        "tasks"
    };
    let mut spans = vec![Span::styled(
        format!("{} {label} left", projection.remaining),
        Style::default().fg(COLOR_MUTED),
    )];
    if projection.has_completed {
        spans.push(Span::styled(
            "  c: clear completed",
            Style::default().fg(COLOR_MUTED_DARK),
        ));
    }
    if let Some(info) = app.info.as_deref() {
        spans.push(Span::styled(
            format!("  {info}"),
            Style::default().fg(COLOR_INFO),
        ));
    }

    let lines = vec![
        Line::from(spans),
        Line::from(Span::styled(
            app.footer_hint(),
            Style::default().fg(COLOR_MUTED_DARK),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_datepick_modal(frame: &mut Frame, area: Rect, picker: &DatePicker) {
    let modal = centered_rect(area, 31, 12);
    frame.render_widget(Clear, modal);

    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        picker.view_month().format("%B %Y").to_string(),
        Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        " S  M  T  W  T  F  S",
        Style::default().fg(COLOR_MUTED_DARK),
    )));

    let grid = picker.grid();
    for week in grid.chunks(7) {
        let mut spans = Vec::new();
        for cell in week {
            let mut style = if cell.in_month {
                Style::default().fg(COLOR_TEXT)
            } else {
                Style::default().fg(COLOR_MUTED_DARK)
            };
            if Some(cell.date) == picker.selected() {
                style = style.fg(COLOR_ACCENT).add_modifier(Modifier::BOLD);
            }
            if cell.date == picker.today() {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            if cell.date == picker.cursor() {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(format!("{:>2} ", cell.date.day()), style));
        }
        lines.push(Line::from(spans));
    }

    let mut hint = "enter pick  t today  esc close".to_string();
    if picker.has_selection() {
        hint.push_str("  c clear");
    }
    lines.push(Line::from(Span::styled(
        hint,
        Style::default().fg(COLOR_MUTED_DARK),
    )));

    let widget = Paragraph::new(lines).alignment(Alignment::Left).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Due date")
            .border_style(Style::default().fg(COLOR_ACCENT)),
    );
    frame.render_widget(widget, modal);
}

fn render_help_modal(frame: &mut Frame, area: Rect) {
    let entries: &[(&str, &str)] = &[
        ("j/k", "move selection"),
        ("space", "toggle completed"),
        ("a", "add task"),
        ("e/enter", "edit title"),
        ("d", "delete task"),
        ("J/K", "move task down/up"),
        ("D", "set due date"),
        ("f", "cycle filter"),
        ("/", "search titles"),
        ("t", "toggle all"),
        ("c", "clear completed"),
        ("q", "quit"),
    ];
    let modal = centered_rect(area, 36, entries.len() as u16 + 2);
    frame.render_widget(Clear, modal);

    let lines: Vec<Line> = entries
        .iter()
        .map(|(keys, description)| {
            Line::from(vec![
                Span::styled(format!("{keys:<9}"), Style::default().fg(COLOR_ACCENT)),
                Span::styled(*description, Style::default().fg(COLOR_TEXT)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Keys")
            .border_style(Style::default().fg(COLOR_MUTED)),
    );
    frame.render_widget(widget, modal);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
