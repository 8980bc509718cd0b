use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use super::env::ChildEnv;
use crate::consts::LAUNCHER_FAILURE_CODE;
use crate::error::AppError;

/// Fully resolved child invocation
#[derive(Debug, Clone)]
pub(crate) struct ChildCommand {
    pub(crate) program: PathBuf,
    /// Entrypoint followed by the literal args
    pub(crate) args: Vec<String>,
    pub(crate) workdir: PathBuf,
    pub(crate) env: ChildEnv,
}

impl ChildCommand {
    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).current_dir(&self.workdir);
        self.env.apply(&mut cmd);
        cmd
    }
}

/// Run the child once with stdout and stderr sharing `log_file`.
/// Returns the exit code to propagate.
pub(crate) fn run_to_log(child: &ChildCommand, log_file: &Path) -> Result<i32, AppError> {
    let log_err = |source| AppError::LogFile {
        path: log_file.to_path_buf(),
        source,
    };
    let stdout = File::create(log_file).map_err(log_err)?;
    // Same open file description, so writes from both streams stay in order
    let stderr = stdout.try_clone().map_err(log_err)?;

    let mut cmd = child.to_command();
    cmd.stdin(Stdio::null())
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr));

    tracing::debug!(
        program = %child.program.display(),
        args = child.args.len(),
        workdir = %child.workdir.display(),
        "spawning child"
    );
    let mut process = cmd.spawn().map_err(|source| AppError::Spawn {
        program: child.program.display().to_string(),
        source,
    })?;
    // Drop our copies of the log handles held by `cmd`
    drop(cmd);

    let status = process.wait().map_err(AppError::Wait)?;
    let code = exit_code(status);
    tracing::debug!(code, "child exited");
    Ok(code)
}

/// Shell convention: signal `N` becomes `128 + N`
pub(crate) fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    LAUNCHER_FAILURE_CODE
}
