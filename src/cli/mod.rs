//! Command-line interface for tasks
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is implemented in its own submodule. Every command loads
//! the snapshot through the persisted store, applies one collection
//! operation, and emits output; the store write happens on the way out.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::output::OutputOptions;
use crate::store::{FileStore, PersistedStore, TASKS_KEY};
use crate::task::Task;
use crate::view::Filter;

mod add;
mod due;
mod edit;
mod ls;
mod mv;
mod rm;
mod toggle;
mod ui;

/// tasks - a minimal task list manager
///
/// Add, complete, edit, reorder and date-tag short text items from the
/// terminal. State persists across invocations in a single JSON record.
#[derive(Parser, Debug)]
#[command(name = "tasks")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory holding the storage file (defaults to the platform
    /// data directory)
    #[arg(long, global = true, env = "TASKS_DIR")]
    pub dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new task (new tasks appear first)
    Add {
        /// Task title
        title: String,

        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },

    /// List tasks
    Ls {
        /// Status filter: all, active or completed
        #[arg(long)]
        filter: Option<Filter>,

        /// Case-insensitive substring match on titles
        #[arg(long)]
        search: Option<String>,
    },

    /// Toggle a task between active and completed
    Toggle {
        /// Task id (or unique fragment of one)
        id: String,
    },

    /// Complete every task, or reopen all if everything is already done
    ToggleAll,

    /// Edit a task title (an empty title deletes the task)
    Edit {
        /// Task id (or unique fragment of one)
        id: String,

        /// New title
        title: String,
    },

    /// Remove a task
    Rm {
        /// Task id (or unique fragment of one)
        id: String,
    },

    /// Remove every completed task
    Clear,

    /// Move a task relative to another (one-step splice against a neighbor)
    Mv {
        /// Task id (or unique fragment of one)
        id: String,

        /// Target task id to splice against
        target: Option<String>,

        /// Move one step up instead of naming a target
        #[arg(long, conflicts_with_all = ["target", "down"])]
        up: bool,

        /// Move one step down instead of naming a target
        #[arg(long, conflicts_with = "target")]
        down: bool,
    },

    /// Set or clear a task's due date
    Due {
        /// Task id (or unique fragment of one)
        id: String,

        /// Due date as YYYY-MM-DD
        date: Option<String>,

        /// Clear the due date
        #[arg(long, conflicts_with = "date")]
        clear: bool,
    },

    /// Open the interactive task list
    Ui,
}

/// Resolved invocation context shared by the subcommands.
pub struct CmdContext {
    pub dir: PathBuf,
    pub config: Config,
    pub output: OutputOptions,
}

impl CmdContext {
    /// Opens the persisted task sequence in this context's data directory.
    pub fn open_tasks(&self) -> PersistedStore<Vec<Task>, FileStore> {
        PersistedStore::open(FileStore::new(&self.dir), TASKS_KEY, Vec::new())
    }
}

impl Cli {
    fn context(&self) -> Result<CmdContext> {
        let (dir, config) = match &self.dir {
            Some(dir) => (dir.clone(), Config::load_from_dir(dir)),
            None => {
                let default_dir = FileStore::default_dir()?;
                let config = Config::load_from_dir(&default_dir);
                let dir = config.storage.dir.clone().unwrap_or(default_dir);
                (dir, config)
            }
        };
        Ok(CmdContext {
            dir,
            config,
            output: OutputOptions {
                json: self.json,
                quiet: self.quiet,
            },
        })
    }

    /// Execute the parsed command
    pub fn run(self) -> Result<()> {
        let ctx = self.context()?;
        match self.command {
            Commands::Add { title, due } => add::run(&ctx, &title, due.as_deref()),
            Commands::Ls { filter, search } => {
                ls::run(&ctx, filter, search.as_deref().unwrap_or(""))
            }
            Commands::Toggle { id } => toggle::run(&ctx, &id),
            Commands::ToggleAll => toggle::run_all(&ctx),
            Commands::Edit { id, title } => edit::run(&ctx, &id, &title),
            Commands::Rm { id } => rm::run(&ctx, &id),
            Commands::Clear => rm::run_clear(&ctx),
            Commands::Mv {
                id,
                target,
                up,
                down,
            } => mv::run(&ctx, &id, target.as_deref(), up, down),
            Commands::Due { id, date, clear } => due::run(&ctx, &id, date.as_deref(), clear),
            Commands::Ui => ui::run(&ctx),
        }
    }
}
