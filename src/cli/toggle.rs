//! tasks toggle / toggle-all - flip completion state.

use serde::Serialize;

use crate::cli::CmdContext;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput};
use crate::task::{self, Task};

#[derive(Serialize)]
struct ToggleData<'a> {
    task: &'a Task,
}

#[derive(Serialize)]
struct ToggleAllData {
    completed: bool,
    count: usize,
}

pub fn run(ctx: &CmdContext, id: &str) -> Result<()> {
    let mut store = ctx.open_tasks();
    let id = task::resolve_id(store.value(), id)?;
    store.update(|tasks| task::toggle(tasks, &id));

    let toggled = store
        .value()
        .iter()
        .find(|task| task.id == id)
        .ok_or_else(|| Error::TaskNotFound(id.clone()))?;

    let state = if toggled.completed {
        "completed"
    } else {
        "reopened"
    };
    let mut human = HumanOutput::new(format!("{state} {}", toggled.short_id()));
    human.push_summary("title", &toggled.title);

    emit_success(ctx.output, "toggle", &ToggleData { task: toggled }, Some(&human))
}

pub fn run_all(ctx: &CmdContext) -> Result<()> {
    let mut store = ctx.open_tasks();
    let all_completed =
        !store.value().is_empty() && store.value().iter().all(|task| task.completed);
    store.update(|tasks| task::toggle_all(tasks));

    let data = ToggleAllData {
        completed: !all_completed,
        count: store.value().len(),
    };
    let header = if data.count == 0 {
        "no tasks".to_string()
    } else if data.completed {
        format!("completed {} tasks", data.count)
    } else {
        format!("reopened {} tasks", data.count)
    };
    let human = HumanOutput::new(header);

    emit_success(ctx.output, "toggle-all", &data, Some(&human))
}
