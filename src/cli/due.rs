//! tasks due - set or clear a due date.

use serde::Serialize;

use crate::calendar;
use crate::cli::CmdContext;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput};
use crate::task::{self, Task};

#[derive(Serialize)]
struct DueData<'a> {
    task: &'a Task,
}

pub fn run(ctx: &CmdContext, id: &str, date: Option<&str>, clear: bool) -> Result<()> {
    let due = if clear {
        None
    } else {
        let date = date.ok_or_else(|| {
            Error::InvalidArgument("due needs a date or --clear".to_string())
        })?;
        if calendar::parse_iso_date(date).is_none() {
            return Err(Error::InvalidDate(date.to_string()));
        }
        Some(date)
    };

    let mut store = ctx.open_tasks();
    let id = task::resolve_id(store.value(), id)?;
    store.update(|tasks| task::set_due_date(tasks, &id, due));

    let updated = store
        .value()
        .iter()
        .find(|task| task.id == id)
        .ok_or_else(|| Error::TaskNotFound(id.clone()))?;

    let header = match updated.due_date.as_deref() {
        Some(due) => format!("due {due}"),
        None => "due date cleared".to_string(),
    };
    let mut human = HumanOutput::new(header);
    human.push_summary("title", &updated.title);

    emit_success(ctx.output, "due", &DueData { task: updated }, Some(&human))
}
