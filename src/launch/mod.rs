//! One-shot launch sequence
//!
//! validate resources -> resolve venv -> create `logs/run_<stamp>` ->
//! run the entrypoint once -> hand back its exit code.

pub(crate) mod env;
pub(crate) mod logdir;
pub(crate) mod process;

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};

use crate::error::AppError;
use crate::job::JobFile;

pub(crate) use env::{ChildEnv, Venv, activate_venv};
pub(crate) use logdir::{create_log_dir, log_dir_path, log_file_path};
pub(crate) use process::{ChildCommand, run_to_log};

#[derive(Debug, Clone)]
pub(crate) struct LaunchPlan {
    pub(crate) log_dir: PathBuf,
    pub(crate) log_file: PathBuf,
    pub(crate) venv: Venv,
    pub(crate) command: ChildCommand,
}

impl LaunchPlan {
    /// Resolve everything the launch needs without touching the filesystem
    /// beyond existence checks.
    pub(crate) fn prepare<F>(
        job: &JobFile,
        log_parent: &Path,
        at: &DateTime<FixedOffset>,
        lookup: F,
    ) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        job.resources.validate()?;

        let program = &job.program;
        let venv = activate_venv(&program.venv, &program.interpreter)?;
        let env = ChildEnv::build(&job.resources.export, &venv, lookup)?;

        if !program.workdir.is_dir() {
            return Err(AppError::Workdir {
                path: program.workdir.clone(),
            });
        }

        let mut args = Vec::with_capacity(program.args.len() + 1);
        args.push(program.entrypoint.clone());
        args.extend(program.args.iter().cloned());

        let log_dir = log_dir_path(log_parent, at);
        Ok(LaunchPlan {
            log_file: log_file_path(&log_dir),
            log_dir,
            command: ChildCommand {
                program: venv.interpreter.clone(),
                args,
                workdir: program.workdir.clone(),
                env,
            },
            venv,
        })
    }

    /// Create the log directory, then run the child exactly once
    pub(crate) fn launch(&self) -> Result<i32, AppError> {
        create_log_dir(&self.log_dir)?;
        tracing::info!(log = %self.log_file.display(), "launching");
        run_to_log(&self.command, &self.log_file)
    }
}
