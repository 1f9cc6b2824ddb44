use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::ExitStatus;

use assert_cmd::Command;
use tempfile::TempDir;

/// Scratch directory with its own data directory for one test.
pub struct CtWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
    pub data_dir: PathBuf,
}

impl CtWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let root = temp_dir.path().to_path_buf();
        let data_dir = root.join(".contacts");
        Self {
            temp_dir,
            root,
            data_dir,
        }
    }

    /// `ct` command rooted in the workspace with a clean environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("ct").expect("ct binary");
        cmd.current_dir(&self.root)
            .env_remove("CT_DATA_DIR")
            .env_remove("CT_PAGE_SIZE")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

pub struct CtRun {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CtRun {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}

/// Run `ct` in the workspace. `label` names the step in failure output.
pub fn run_ct<I, S>(workspace: &CtWorkspace, args: I, label: &str) -> CtRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = workspace
        .command()
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("[{label}] failed to run ct: {e}"));
    let run = CtRun {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    if !run.status.success() {
        eprintln!("[{label}] exit {:?}\nstderr:\n{}", run.status.code(), run.stderr);
    }
    run
}

/// Add a contact and return its id.
pub fn add_contact(workspace: &CtWorkspace, name: &str, email: &str, extra: &[&str]) -> String {
    let mut args = vec!["--json", "add", name, email];
    args.extend_from_slice(extra);
    let run = run_ct(workspace, args, "add_contact");
    assert!(run.status.success(), "add failed: {}", run.stderr);
    run.json()["id"]
        .as_str()
        .expect("contact id in add output")
        .to_string()
}
