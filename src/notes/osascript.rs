//! Note store backed by AppleScript files run through `osascript`.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::{NoteListing, NoteStore};
use crate::error::{Error, Result};

/// Prefix of a failure reported on a script's standard output.
pub const STORE_ERROR_PREFIX: &str = "错误：";

/// Prefix of an informational report on a script's standard output.
pub const INFO_PREFIX: &str = "信息：";

const CREATE_SCRIPT: &str = "create_note_advanced.scpt";
const APPEND_SCRIPT: &str = "append_to_note.scpt";
const LIST_SCRIPT: &str = "list_notes.scpt";
const CONTENT_SCRIPT: &str = "get_note_content.scpt";

/// Runs `<program> <script-dir>/<script> args…` for every store operation.
#[derive(Debug, Clone)]
pub struct OsaScriptStore {
    script_dir: PathBuf,
    program: String,
}

impl OsaScriptStore {
    /// Create a store reading scripts from the given directory.
    pub fn new(script_dir: impl Into<PathBuf>) -> Self {
        Self {
            script_dir: script_dir.into(),
            program: "osascript".to_string(),
        }
    }

    /// Use another interpreter to run the scripts.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Directory holding the script files.
    pub fn script_dir(&self) -> &Path {
        &self.script_dir
    }

    /// Run a script and return its trimmed standard output.
    pub fn run(&self, script: &str, args: &[&str]) -> Result<String> {
        let path = self.script_dir.join(script);
        if !path.exists() {
            log::warn!("Script file not found: {}", path.display());
            return Err(Error::ScriptNotFound(script.to_string()));
        }

        log::debug!("Running {} {} ({} args)", self.program, script, args.len());
        let output = match Command::new(&self.program).arg(&path).args(args).output() {
            Ok(output) => output,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::ExecutionFailed {
                    script: script.to_string(),
                    message: format!("{} command not found.", self.program),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::ExecutionFailed {
                script: script.to_string(),
                message: if stderr.is_empty() { stdout } else { stderr },
            });
        }

        Ok(stdout)
    }

    fn run_checked(&self, script: &str, args: &[&str]) -> Result<String> {
        let output = self.run(script, args)?;
        match classify_store_error(script, &output) {
            Some(err) => Err(err),
            None => Ok(output),
        }
    }
}

impl NoteStore for OsaScriptStore {
    fn create_note(&self, title: &str, body: &str, folder: &str) -> Result<String> {
        self.run_checked(CREATE_SCRIPT, &[title, body, folder])
    }

    fn append_to_note(&self, title: &str, folder: &str, body: &str) -> Result<String> {
        self.run_checked(APPEND_SCRIPT, &[title, folder, body])
    }

    fn list_notes(&self, folder: &str) -> Result<NoteListing> {
        let output = self.run_checked(LIST_SCRIPT, &[folder])?;
        if output.starts_with(INFO_PREFIX) && output.contains("No notes found") {
            return Ok(NoteListing::empty_with_notice(output));
        }

        Ok(NoteListing::new(
            output
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
        ))
    }

    fn note_body(&self, title: &str, folder: &str) -> Result<String> {
        self.run_checked(CONTENT_SCRIPT, &[title, folder])
    }
}

/// Map a `错误：` report to the matching store error by its wording.
fn classify_store_error(script: &str, output: &str) -> Option<Error> {
    let message = output.strip_prefix(STORE_ERROR_PREFIX)?.trim().to_string();
    let lower = message.to_lowercase();

    let missing = ["找不到", "未找到", "不存在", "not found", "doesn't exist"]
        .iter()
        .any(|m| lower.contains(m));
    let folder = message.contains("文件夹") || lower.contains("folder");
    let multiple = message.contains("多个") || lower.contains("multiple");

    Some(if multiple {
        Error::MultipleNotesMatched(message)
    } else if missing && folder {
        Error::FolderNotFound(message)
    } else if missing {
        Error::NoteNotFound(message)
    } else {
        Error::ExecutionFailed {
            script: script.to_string(),
            message,
        }
    })
}
