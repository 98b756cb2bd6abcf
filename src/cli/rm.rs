//! tasks rm / clear - remove one task, or every completed task.

use serde::Serialize;

use crate::cli::CmdContext;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput};
use crate::task;

#[derive(Serialize)]
struct RmData<'a> {
    id: &'a str,
    removed: bool,
}

#[derive(Serialize)]
struct ClearData {
    removed: usize,
    remaining: usize,
}

pub fn run(ctx: &CmdContext, id: &str) -> Result<()> {
    let mut store = ctx.open_tasks();
    let id = task::resolve_id(store.value(), id)?;
    let title = store
        .value()
        .iter()
        .find(|task| task.id == id)
        .map(|task| task.title.clone())
        .unwrap_or_default();
    store.update(|tasks| task::remove(tasks, &id));

    let mut human = HumanOutput::new("removed task");
    human.push_summary("title", title);
    emit_success(
        ctx.output,
        "rm",
        &RmData {
            id: &id,
            removed: true,
        },
        Some(&human),
    )
}

pub fn run_clear(ctx: &CmdContext) -> Result<()> {
    let mut store = ctx.open_tasks();
    let completed = store.value().iter().filter(|task| task.completed).count();
    store.update(|tasks| task::clear_completed(tasks));

    let data = ClearData {
        removed: completed,
        remaining: store.value().len(),
    };
    let human = HumanOutput::new(format!("cleared {} completed", data.removed));
    emit_success(ctx.output, "clear", &data, Some(&human))
}
