//! tasks edit - replace a title in place.
//!
//! An edit that leaves the title empty deletes the task, matching the
//! collection engine's delete-on-empty-edit policy.

use serde::Serialize;

use crate::cli::CmdContext;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput};
use crate::task::{self, Task};

#[derive(Serialize)]
#[serde(untagged)]
enum EditData<'a> {
    Updated { task: &'a Task },
    Deleted { id: &'a str, deleted: bool },
}

pub fn run(ctx: &CmdContext, id: &str, title: &str) -> Result<()> {
    let mut store = ctx.open_tasks();
    let id = task::resolve_id(store.value(), id)?;
    store.update(|tasks| task::edit(tasks, &id, title));

    match store.value().iter().find(|task| task.id == id) {
        Some(updated) => {
            let mut human = HumanOutput::new(format!("updated {}", updated.short_id()));
            human.push_summary("title", &updated.title);
            emit_success(
                ctx.output,
                "edit",
                &EditData::Updated { task: updated },
                Some(&human),
            )
        }
        None => {
            // Empty title removed the task.
            let human = HumanOutput::new("deleted (empty title)");
            emit_success(
                ctx.output,
                "edit",
                &EditData::Deleted {
                    id: &id,
                    deleted: true,
                },
                Some(&human),
            )
        }
    }
}
