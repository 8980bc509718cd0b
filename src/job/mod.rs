//! Job file: the static descriptor a batch script would carry
//!
//! A job file names the scheduler metadata, the resource request and the
//! program to launch. Relative paths are resolved against the directory
//! holding the job file so the same file works from any cwd.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AppError;
use crate::resources::Resources;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Scheduler {
    pub(crate) name: Option<String>,
    pub(crate) output: Option<String>,
    pub(crate) error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Program {
    pub(crate) workdir: PathBuf,
    pub(crate) venv: PathBuf,
    #[serde(default = "default_interpreter")]
    pub(crate) interpreter: String,
    #[serde(default = "default_entrypoint")]
    pub(crate) entrypoint: String,
    #[serde(default)]
    pub(crate) log_parent: Option<PathBuf>,
    /// Opaque `key=value` tokens handed to the entrypoint as-is
    #[serde(default)]
    pub(crate) args: Vec<String>,
}

fn default_interpreter() -> String {
    "python".to_string()
}

fn default_entrypoint() -> String {
    "main.py".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct JobFile {
    #[serde(default)]
    pub(crate) scheduler: Scheduler,
    pub(crate) resources: Resources,
    pub(crate) program: Program,
}

impl JobFile {
    pub(crate) fn load(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|source| AppError::JobFileRead {
            path: path.to_path_buf(),
            source,
        })?;
        // Resolve against an absolute base so the child's cwd change cannot
        // reinterpret relative venv or workdir paths
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let base = absolute.parent().unwrap_or_else(|| Path::new(""));
        Self::parse(&content, path, base)
    }

    pub(crate) fn parse(content: &str, path: &Path, base: &Path) -> Result<Self, AppError> {
        let mut job: JobFile = toml::from_str(content).map_err(|e| AppError::JobFileParse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;
        job.program.workdir = resolve(base, &job.program.workdir);
        job.program.venv = resolve(base, &job.program.venv);
        job.program.log_parent = job.program.log_parent.as_deref().map(|p| resolve(base, p));

        for arg in &job.program.args {
            if !arg.contains('=') {
                tracing::warn!(arg = %arg, "argument is not key=value shaped, passing through unchanged");
            }
        }
        Ok(job)
    }

    /// Job name for directives, defaulting to the entrypoint's stem
    pub(crate) fn job_name(&self) -> String {
        self.scheduler.name.clone().unwrap_or_else(|| {
            Path::new(&self.program.entrypoint)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.program.entrypoint.clone())
        })
    }

    /// Parent of `logs/`, defaulting to the working directory
    pub(crate) fn log_parent(&self) -> &Path {
        self.program
            .log_parent
            .as_deref()
            .unwrap_or(&self.program.workdir)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
