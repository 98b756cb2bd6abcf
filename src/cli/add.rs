//! tasks add - create a task at the head of the list.

use serde::Serialize;

use crate::calendar;
use crate::cli::CmdContext;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput};
use crate::task::{self, Task};

#[derive(Serialize)]
struct AddData<'a> {
    task: &'a Task,
    remaining: usize,
}

pub fn run(ctx: &CmdContext, title: &str, due: Option<&str>) -> Result<()> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::InvalidArgument("title cannot be empty".to_string()));
    }
    if let Some(due) = due {
        if calendar::parse_iso_date(due).is_none() {
            return Err(Error::InvalidDate(due.to_string()));
        }
    }

    let mut store = ctx.open_tasks();
    store.update(|tasks| task::add(tasks, title, due));

    let tasks = store.value();
    let created = &tasks[0];
    let remaining = tasks.iter().filter(|task| !task.completed).count();

    let mut human = HumanOutput::new(format!("added {}", created.short_id()));
    human.push_summary("title", &created.title);
    if let Some(due) = created.due_date.as_deref() {
        human.push_summary("due", due);
    }

    emit_success(
        ctx.output,
        "add",
        &AddData {
            task: created,
            remaining,
        },
        Some(&human),
    )
}
