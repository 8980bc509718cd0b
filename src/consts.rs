/// Run directory stamp: "20260214_093012"
pub(crate) const RUN_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Prefix of every run directory under `<parent>/logs/`
pub(crate) const RUN_DIR_PREFIX: &str = "run_";

/// Directory holding all run directories
pub(crate) const LOGS_DIR: &str = "logs";

/// Combined stdout/stderr of the child
pub(crate) const LOG_FILE_NAME: &str = "log.logs";

/// Set for the child process only
pub(crate) const CUDA_LAUNCH_BLOCKING: (&str, &str) = ("CUDA_LAUNCH_BLOCKING", "1");

/// PATH tail used when the export policy gives the child no inherited PATH
pub(crate) const DEFAULT_SYSTEM_PATH: &str = "/usr/local/bin:/usr/bin:/bin";

/// Job file looked up in the current directory when `--job` is not given
pub(crate) const DEFAULT_JOB_FILE: &str = "job.toml";

/// Exit code for launcher-side failures (the child never ran)
pub(crate) const LAUNCHER_FAILURE_CODE: i32 = 1;
