//! tasks mv - splice-move a task against a neighbor.

use serde::Serialize;

use crate::cli::CmdContext;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput};
use crate::task;

#[derive(Serialize)]
struct MvData<'a> {
    id: &'a str,
    target: &'a str,
    moved: bool,
    order: Vec<&'a str>,
}

pub fn run(
    ctx: &CmdContext,
    id: &str,
    target: Option<&str>,
    up: bool,
    down: bool,
) -> Result<()> {
    let mut store = ctx.open_tasks();
    let id = task::resolve_id(store.value(), id)?;

    let target = if up || down {
        let position = store
            .value()
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.clone()))?;
        let neighbor = if up {
            position.checked_sub(1)
        } else {
            Some(position + 1)
        };
        let Some(neighbor) = neighbor.and_then(|index| store.value().get(index)) else {
            let edge = if up { "top" } else { "bottom" };
            let human = HumanOutput::new(format!("already at the {edge}"));
            let order: Vec<&str> = store.value().iter().map(|task| task.id.as_str()).collect();
            return emit_success(
                ctx.output,
                "mv",
                &MvData {
                    id: &id,
                    target: &id,
                    moved: false,
                    order,
                },
                Some(&human),
            );
        };
        neighbor.id.clone()
    } else {
        let target = target.ok_or_else(|| {
            Error::InvalidArgument("mv needs a target id, --up or --down".to_string())
        })?;
        task::resolve_id(store.value(), target)?
    };

    store.update(|tasks| task::reorder(tasks, &id, &target));

    let order: Vec<&str> = store.value().iter().map(|task| task.id.as_str()).collect();
    let human = HumanOutput::new("moved task");
    emit_success(
        ctx.output,
        "mv",
        &MvData {
            id: &id,
            target: &target,
            moved: id != target,
            order,
        },
        Some(&human),
    )
}
