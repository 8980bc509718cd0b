use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Failed to read job file {}: {source}", path.display())]
    JobFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse job file {}: {message}", path.display())]
    JobFileParse { path: PathBuf, message: String },

    #[error(
        "Unknown partition \"{input}\" (expected one of gpu_1g.10gb, gpu_2g.20gb, gpu_3g.40gb, gpu_a100.80gb)"
    )]
    UnknownPartition { input: String },

    #[error("Invalid GPU slice \"{input}\" (expected 1g.10gb, 2g.20gb, 3g.40gb or A100.80gb)")]
    InvalidGpuSlice { input: String },

    #[error("Invalid gres \"{input}\" (expected gpu:<type>:<count> or gpu:<count>)")]
    InvalidGres { input: String },

    #[error("Gres requests {requested} but partition {partition} provides {provided}")]
    GresMismatch {
        partition: String,
        requested: String,
        provided: String,
    },

    #[error("Invalid wall-clock limit \"{input}\" (expected HH:MM:SS)")]
    InvalidWallTime { input: String },

    #[error("Invalid export policy \"{input}\": {reason}")]
    InvalidExport { input: String, reason: String },

    #[error("CPU request ntasks * cpus_per_task = {requested} outside allowed range 1..={max}")]
    CpuBudget { requested: u64, max: u64 },

    #[error("Failed to create log directory {}: {source}", path.display())]
    DirectoryCreation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Virtual environment {} is not usable: {reason}", path.display())]
    VenvActivation { path: PathBuf, reason: String },

    #[error("Working directory {} does not exist", path.display())]
    Workdir { path: PathBuf },

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Failed to wait for child process: {0}")]
    Wait(std::io::Error),
}
