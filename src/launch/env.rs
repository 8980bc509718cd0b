//! Child environment construction
//!
//! Replaces sourcing an activation script: the interpreter is resolved inside
//! the venv and the variables activation would set are put on the child
//! command directly. The launcher's own environment is never touched.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::consts::{CUDA_LAUNCH_BLOCKING, DEFAULT_SYSTEM_PATH};
use crate::error::AppError;
use crate::resources::{ExportEntry, ExportPolicy};

/// A virtual environment whose interpreter has been found
#[derive(Debug, Clone)]
pub(crate) struct Venv {
    pub(crate) root: PathBuf,
    pub(crate) interpreter: PathBuf,
}

impl Venv {
    pub(crate) fn bin_dir(&self) -> PathBuf {
        bin_dir(&self.root)
    }
}

fn bin_dir(root: &Path) -> PathBuf {
    root.join("bin")
}

pub(crate) fn activate_venv(root: &Path, interpreter: &str) -> Result<Venv, AppError> {
    let fail = |reason: String| AppError::VenvActivation {
        path: root.to_path_buf(),
        reason,
    };
    if !root.is_dir() {
        return Err(fail("directory does not exist".to_string()));
    }
    let exe = bin_dir(root).join(interpreter);
    if !exe.is_file() {
        return Err(fail(format!("interpreter {} not found", exe.display())));
    }
    Ok(Venv {
        root: root.to_path_buf(),
        interpreter: exe,
    })
}

/// Environment changes applied to the child command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ChildEnv {
    /// Drop everything inherited before applying `vars`
    pub(crate) clear_inherited: bool,
    pub(crate) vars: BTreeMap<String, String>,
    pub(crate) removed: Vec<String>,
}

impl ChildEnv {
    /// Resolve the export policy against the submitting environment.
    /// `lookup` reads a variable of the submitting environment.
    pub(crate) fn build<F>(policy: &ExportPolicy, venv: &Venv, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut child = ChildEnv::default();
        let mut base_path = None;

        match policy {
            ExportPolicy::All => {
                base_path = lookup("PATH");
            }
            ExportPolicy::None => {
                child.clear_inherited = true;
            }
            ExportPolicy::List(entries) => {
                child.clear_inherited = true;
                for entry in entries {
                    let value = match entry {
                        ExportEntry::Inherit(name) => lookup(name.as_str()),
                        ExportEntry::Set(_, value) => Some(value.clone()),
                    };
                    let Some(value) = value else {
                        tracing::debug!(name = entry.name(), "exported variable not set, skipping");
                        continue;
                    };
                    if entry.name() == "PATH" {
                        base_path = Some(value);
                    } else {
                        child.vars.insert(entry.name().to_string(), value);
                    }
                }
            }
        }

        let base_path = base_path.unwrap_or_else(|| DEFAULT_SYSTEM_PATH.to_string());
        let mut paths = vec![venv.bin_dir()];
        paths.extend(env::split_paths(&base_path));
        let path = env::join_paths(paths).map_err(|e| AppError::VenvActivation {
            path: venv.root.clone(),
            reason: e.to_string(),
        })?;

        child
            .vars
            .insert("PATH".to_string(), path.to_string_lossy().into_owned());
        child.vars.insert(
            "VIRTUAL_ENV".to_string(),
            venv.root.to_string_lossy().into_owned(),
        );
        if !child.clear_inherited {
            child.removed.push("PYTHONHOME".to_string());
        }
        child.vars.remove("PYTHONHOME");

        let (key, value) = CUDA_LAUNCH_BLOCKING;
        child.vars.insert(key.to_string(), value.to_string());
        Ok(child)
    }

    pub(crate) fn apply(&self, cmd: &mut Command) {
        if self.clear_inherited {
            cmd.env_clear();
        }
        for name in &self.removed {
            cmd.env_remove(name);
        }
        cmd.envs(&self.vars);
    }
}
