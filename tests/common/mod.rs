//! Shared test helpers for folio integration tests.
//!
//! Each test gets its own temp directory as working directory, so a stray
//! `folio.toml` or env var from the host never leaks in.

#![allow(dead_code)]

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Master with a single feature branch forked at `c1`.
pub const FORK: &str = r#"{
  "workspace": "thesis",
  "branches": [{ "name": "master" }, { "name": "feature" }],
  "logs": {
    "master":  [{ "commit_uuid": "c2", "message": "edit intro" },
                { "commit_uuid": "c1", "message": "init" }],
    "feature": [{ "commit_uuid": "c3", "message": "draft chapter" },
                { "commit_uuid": "c1", "message": "init" }]
  }
}"#;

/// Same shape as [`FORK`], with messages as git reports them: trailing
/// newline, blank line, body.
pub const FORK_FULL_MESSAGES: &str = r#"{
  "workspace": "thesis",
  "branches": [{ "name": "master" }, { "name": "feature" }],
  "logs": {
    "master":  [{ "commit_uuid": "c2", "message": "edit intro\n\nReword the opening.\n" },
                { "commit_uuid": "c1", "message": "init\n" }],
    "feature": [{ "commit_uuid": "c3", "message": "draft chapter\n" },
                { "commit_uuid": "c1", "message": "init\n" }]
  }
}"#;

/// `ghost` shares nothing with master.
pub const ORPHANED: &str = r#"{
  "workspace": "thesis",
  "branches": [{ "name": "master" }, { "name": "ghost" }],
  "logs": {
    "master": [{ "commit_uuid": "c1", "message": "init" }],
    "ghost":  [{ "commit_uuid": "g2", "message": "boo" },
               { "commit_uuid": "g1", "message": "hello" }]
  }
}"#;

/// A `trunk`-based workspace with no master at all.
pub const TRUNK: &str = r#"{
  "workspace": "notes",
  "branches": [{ "name": "trunk" }],
  "logs": {
    "trunk": [{ "commit_uuid": "t2", "message": "more" },
              { "commit_uuid": "t1", "message": "start" }]
  }
}"#;

/// An isolated working directory for running the binary.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `name` inside the fixture and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("failed to write fixture file");
        path
    }

    /// Run folio with `args`, optionally feeding `stdin`.
    pub fn run(&self, args: &[&str], stdin: Option<&str>) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_folio"));
        cmd.args(args)
            .current_dir(self.dir.path())
            .env_remove("FOLIO_CONFIG")
            .env_remove("FOLIO_BASE_BRANCH")
            .env_remove("FOLIO_LOG")
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let mut child = cmd.spawn().expect("failed to execute folio");
        {
            let mut pipe = child.stdin.take().expect("stdin is piped");
            if let Some(input) = stdin {
                pipe.write_all(input.as_bytes())
                    .expect("failed to write stdin");
            }
        }
        child.wait_with_output().expect("failed to wait for folio")
    }

    /// Run folio and assert it succeeds. Returns stdout as string.
    pub fn folio_ok(&self, args: &[&str]) -> String {
        let out = self.run(args, None);
        let stdout = String::from_utf8_lossy(&out.stdout);
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(
            out.status.success(),
            "folio {} failed:\nstdout: {stdout}\nstderr: {stderr}",
            args.join(" "),
        );
        stdout.to_string()
    }

    /// Run folio and assert it fails. Returns stderr as string.
    pub fn folio_fails(&self, args: &[&str]) -> String {
        let out = self.run(args, None);
        let stdout = String::from_utf8_lossy(&out.stdout);
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(
            !out.status.success(),
            "folio {} should have failed:\nstdout: {stdout}\nstderr: {stderr}",
            args.join(" "),
        );
        stderr.to_string()
    }
}
