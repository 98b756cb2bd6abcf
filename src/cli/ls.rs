//! tasks ls - list the filtered view.

use serde::Serialize;

use crate::cli::CmdContext;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput};
use crate::task::Task;
use crate::view::{self, Filter};

#[derive(Serialize)]
struct RowData<'a> {
    #[serde(flatten)]
    task: &'a Task,
    overdue: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    prev_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_id: Option<&'a str>,
}

#[derive(Serialize)]
struct ListData<'a> {
    filter: &'static str,
    search: &'a str,
    remaining: usize,
    has_completed: bool,
    tasks: Vec<RowData<'a>>,
}

pub fn run(ctx: &CmdContext, filter: Option<Filter>, search: &str) -> Result<()> {
    let store = ctx.open_tasks();
    let filter = filter.unwrap_or(ctx.config.list.filter);
    let projection = view::project(store.value(), filter, search, view::now_ms());

    let data = ListData {
        filter: filter.as_str(),
        search,
        remaining: projection.remaining,
        has_completed: projection.has_completed,
        tasks: projection
            .rows
            .iter()
            .map(|row| RowData {
                task: row.task,
                overdue: row.overdue,
                prev_id: row.prev_id,
                next_id: row.next_id,
            })
            .collect(),
    };

    let label = if projection.remaining == 1 {
        "task"
    } else {
        "tasks"
    };
    let mut human = HumanOutput::new(format!("{} {label} left", projection.remaining));
    if projection.rows.is_empty() {
        human.push_detail("no tasks to show");
    }
    for row in &projection.rows {
        let mark = if row.task.completed { "x" } else { " " };
        let mut line = format!("[{mark}] {}  {}", row.task.short_id(), row.task.title);
        if let Some(due) = row.task.due_date.as_deref() {
            if row.overdue {
                line.push_str(&format!("  (due {due}, overdue)"));
            } else {
                line.push_str(&format!("  (due {due})"));
            }
        }
        human.push_detail(line);
    }

    emit_success(ctx.output, "ls", &data, Some(&human))
}
