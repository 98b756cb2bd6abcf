//! tasks ui - launch the interactive task list.

use crate::cli::CmdContext;
use crate::error::Result;
use crate::ui;

pub fn run(ctx: &CmdContext) -> Result<()> {
    let store = ctx.open_tasks();
    ui::run(store, ctx.config.list.filter)
}
