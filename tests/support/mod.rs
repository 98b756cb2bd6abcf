#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// Sandboxed data directory plus a command builder pointed at it.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the persisted task record.
    pub fn storage_file(&self) -> PathBuf {
        self.dir.path().join("tasks.json")
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tasks").expect("binary");
        cmd.arg("--dir").arg(self.dir.path());
        cmd
    }

    pub fn add(&self, title: &str) {
        self.cmd().args(["add", title]).assert().success();
    }

    pub fn add_due(&self, title: &str, due: &str) {
        self.cmd()
            .args(["add", title, "--due", due])
            .assert()
            .success();
    }

    /// Runs `ls --json` and returns the parsed envelope.
    pub fn ls_json(&self) -> Value {
        self.ls_json_with(&[])
    }

    /// Runs `ls --json` with extra arguments and returns the parsed envelope.
    pub fn ls_json_with(&self, extra: &[&str]) -> Value {
        let output = self
            .cmd()
            .args(["ls", "--json"])
            .args(extra)
            .output()
            .expect("run ls");
        assert!(output.status.success(), "ls failed: {output:?}");
        serde_json::from_slice(&output.stdout).expect("ls output is json")
    }

    /// Full ids in list order (newest first).
    pub fn task_ids(&self) -> Vec<String> {
        self.ls_json()["data"]["tasks"]
            .as_array()
            .expect("tasks array")
            .iter()
            .map(|task| task["id"].as_str().expect("id").to_string())
            .collect()
    }

    /// Titles in list order (newest first).
    pub fn task_titles(&self) -> Vec<String> {
        self.ls_json()["data"]["tasks"]
            .as_array()
            .expect("tasks array")
            .iter()
            .map(|task| task["title"].as_str().expect("title").to_string())
            .collect()
    }
}
