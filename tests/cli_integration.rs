#![cfg(unix)]

use serde_json::Value;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

const TRAINER_ARGS: &[&str] = &[
    "max_iters=1000",
    "log_norms=True",
    "log_probes=True",
    "eval_delta=5",
    "optim_args.learning_rate=0.03",
    "optim_args.use_sgd=True",
    "data_args.k=3",
    "model_args.n_layers=2",
    "seed=42",
];

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, content).expect("write test file");
}

/// Lay out `<root>/venv/bin/python` (a shell script running `body`) and
/// `<root>/project`, and write `<root>/job.toml`
fn setup_job(root: &Path, body: &str, export: &str, cpus_per_task: u32, args: &[&str]) -> PathBuf {
    let python = root.join("venv").join("bin").join("python");
    write_file(&python, &format!("#!/bin/sh\n{body}\n"));
    fs::set_permissions(&python, fs::Permissions::from_mode(0o755)).expect("chmod");
    fs::create_dir_all(root.join("project")).expect("create project dir");

    let args: Vec<String> = args.iter().map(|a| format!("{a:?}")).collect();
    let job = root.join("job.toml");
    write_file(
        &job,
        &format!(
            r#"
[scheduler]
name = "birth_transformer"
output = "slurm_output_%A.out"
error = "slurm_error_%A.err"

[resources]
partition = "gpu_2g.20gb"
gres = "gpu:2g.20gb:1"
cpus_per_task = {cpus_per_task}
ntasks = 1
time = "24:00:00"
export = {export}

[program]
workdir = "project"
venv = "venv"
args = [{}]
"#,
            args.join(", ")
        ),
    );
    job
}

fn run_jobshim(root: &Path, args: &[&str], envs: &[(&str, &str)]) -> (Option<i32>, Vec<u8>, Vec<u8>) {
    let bin = env!("CARGO_BIN_EXE_jobshim");
    let mut cmd = Command::new(bin);
    cmd.args(args)
        .current_dir(root)
        .env("HOME", root)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("RUST_LOG");
    for (k, v) in envs {
        cmd.env(k, v);
    }
    let output = cmd.output().expect("run jobshim");
    (output.status.code(), output.stdout, output.stderr)
}

fn run_dirs(root: &Path) -> Vec<PathBuf> {
    let logs = root.join("project").join("logs");
    let Ok(entries) = fs::read_dir(&logs) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries.map(|e| e.expect("dir entry").path()).collect();
    dirs.sort();
    dirs
}

fn only_log(root: &Path) -> String {
    let dirs = run_dirs(root);
    assert_eq!(dirs.len(), 1, "expected one run dir, got {dirs:?}");
    fs::read_to_string(dirs[0].join("log.logs")).expect("read log.logs")
}

#[test]
fn run_passes_literal_args_unchanged() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    setup_job(
        root,
        r#"echo "argc=$#"; for a in "$@"; do echo "arg:$a"; done"#,
        r#""NONE""#,
        8,
        TRAINER_ARGS,
    );

    let (code, _, stderr) = run_jobshim(root, &["run"], &[]);
    assert_eq!(code, Some(0), "stderr: {}", String::from_utf8_lossy(&stderr));

    let mut expected = format!("argc={}\narg:main.py\n", TRAINER_ARGS.len() + 1);
    for arg in TRAINER_ARGS {
        expected.push_str(&format!("arg:{arg}\n"));
    }
    assert_eq!(only_log(root), expected);
}

#[test]
fn run_dir_is_named_by_timestamp() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    setup_job(root, "exit 0", r#""NONE""#, 1, &[]);

    let (code, _, _) = run_jobshim(root, &["run", "--timezone", "UTC"], &[]);
    assert_eq!(code, Some(0));

    let dirs = run_dirs(root);
    assert_eq!(dirs.len(), 1);
    let name = dirs[0].file_name().unwrap().to_string_lossy().into_owned();
    let stamp = name.strip_prefix("run_").expect("run_ prefix");
    assert_eq!(stamp.len(), 15, "{name}");
    assert_eq!(&stamp[8..9], "_");
    assert!(
        stamp
            .chars()
            .enumerate()
            .all(|(i, c)| i == 8 || c.is_ascii_digit()),
        "{name}"
    );
}

#[test]
fn log_dir_exists_before_child_starts() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    setup_job(
        root,
        r#"for d in logs/run_*; do if [ -d "$d" ] && [ -f "$d/log.logs" ]; then echo "ready"; fi; done"#,
        r#""NONE""#,
        1,
        &[],
    );

    let (code, _, _) = run_jobshim(root, &[], &[]);
    assert_eq!(code, Some(0));
    assert_eq!(only_log(root), "ready\n");
}

#[test]
fn child_sees_cuda_launch_blocking_and_venv() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    let job = setup_job(
        root,
        r#"echo "CLB=$CUDA_LAUNCH_BLOCKING"; echo "VENV=$VIRTUAL_ENV"; echo "PATH=$PATH""#,
        r#""ALL""#,
        1,
        &[],
    );

    let job = job.to_string_lossy().into_owned();
    let (code, _, _) = run_jobshim(
        root,
        &["run", "--job", &job],
        &[("CUDA_LAUNCH_BLOCKING", "0")],
    );
    assert_eq!(code, Some(0));

    let log = only_log(root);
    let venv = root.join("venv");
    assert!(log.contains("CLB=1\n"), "{log}");
    assert!(log.contains(&format!("VENV={}\n", venv.display())), "{log}");
    assert!(
        log.contains(&format!("PATH={}:", venv.join("bin").display())),
        "{log}"
    );
}

#[test]
fn export_none_hides_submitter_environment() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    setup_job(root, r#"echo "SECRET=$SECRET;HOME=$HOME""#, r#""NONE""#, 1, &[]);

    let (code, _, _) = run_jobshim(root, &["run"], &[("SECRET", "hunter2")]);
    assert_eq!(code, Some(0));
    assert_eq!(only_log(root), "SECRET=;HOME=\n");
}

#[test]
fn export_list_passes_only_named_variables() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    setup_job(
        root,
        r#"echo "SECRET=$SECRET;SEED=$SEED;OTHER=$OTHER""#,
        r#"["SECRET", "SEED=7"]"#,
        1,
        &[],
    );

    let (code, _, _) = run_jobshim(root, &["run"], &[("SECRET", "hunter2"), ("OTHER", "x")]);
    assert_eq!(code, Some(0));
    assert_eq!(only_log(root), "SECRET=hunter2;SEED=7;OTHER=\n");
}

#[test]
fn stdout_and_stderr_interleave_in_log() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    setup_job(
        root,
        "echo step-1; echo warn-1 >&2; echo step-2; echo warn-2 >&2; echo step-3",
        r#""NONE""#,
        1,
        &[],
    );

    let (code, stdout, _) = run_jobshim(root, &["run"], &[]);
    assert_eq!(code, Some(0));
    assert!(stdout.is_empty());
    assert_eq!(only_log(root), "step-1\nwarn-1\nstep-2\nwarn-2\nstep-3\n");
}

#[test]
fn child_exit_code_is_propagated() {
    for (body, expected) in [("exit 0", 0), ("exit 2", 2), ("exit 137", 137), ("kill -9 $$", 137)] {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        setup_job(root, body, r#""NONE""#, 1, &[]);
        let (code, _, _) = run_jobshim(root, &["run"], &[]);
        assert_eq!(code, Some(expected), "{body}");
    }
}

#[test]
fn missing_venv_fails_before_creating_logs() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    setup_job(root, "exit 0", r#""NONE""#, 1, &[]);
    fs::remove_dir_all(root.join("venv")).unwrap();

    let (code, _, stderr) = run_jobshim(root, &["run"], &[]);
    assert_eq!(code, Some(1));
    assert!(String::from_utf8_lossy(&stderr).contains("Virtual environment"));
    assert!(run_dirs(root).is_empty());
}

#[test]
fn over_budget_request_is_refused() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    setup_job(root, "echo should-not-run", r#""NONE""#, 9, &[]);

    let (code, _, stderr) = run_jobshim(root, &["run"], &[]);
    assert_eq!(code, Some(1));
    assert!(String::from_utf8_lossy(&stderr).contains("1..=8"));
    assert!(run_dirs(root).is_empty());
}

#[test]
fn check_json_reports_budget() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    setup_job(root, "exit 0", r#""NONE""#, 8, &[]);

    let (code, stdout, stderr) = run_jobshim(root, &["check", "--json"], &[]);
    assert_eq!(code, Some(0), "stderr: {}", String::from_utf8_lossy(&stderr));
    let json: Value = serde_json::from_slice(&stdout).expect("json");
    assert_eq!(json["valid"], true);
    assert_eq!(json["partition"], "gpu_2g.20gb");
    assert_eq!(json["cpu_budget"], 8);
    assert_eq!(json["max_cpus"], 8);
    assert_eq!(json["error"], Value::Null);
}

#[test]
fn check_fails_for_over_budget() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    setup_job(root, "exit 0", r#""NONE""#, 16, &[]);

    let (code, stdout, _) = run_jobshim(root, &["check", "--json"], &[]);
    assert_eq!(code, Some(1));
    let json: Value = serde_json::from_slice(&stdout).expect("json");
    assert_eq!(json["valid"], false);
}

#[test]
fn directives_render_scheduler_header() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    setup_job(root, "exit 0", r#""NONE""#, 4, &[]);

    let (code, stdout, _) = run_jobshim(root, &["directives"], &[]);
    assert_eq!(code, Some(0));
    assert_eq!(
        String::from_utf8_lossy(&stdout),
        "#SBATCH --job-name=birth_transformer\n\
         #SBATCH --output=slurm_output_%A.out\n\
         #SBATCH --error=slurm_error_%A.err\n\
         #SBATCH --partition=gpu_2g.20gb\n\
         #SBATCH --gres=gpu:2g.20gb:1\n\
         #SBATCH --cpus-per-task=4\n\
         #SBATCH --ntasks=1\n\
         #SBATCH --time=24:00:00\n\
         #SBATCH --export=NONE\n"
    );
}

#[test]
fn dry_run_json_does_not_launch() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    setup_job(root, "exit 0", r#""NONE""#, 1, &["max_iters=1000"]);

    let (code, stdout, stderr) = run_jobshim(root, &["run", "--dry-run", "--json"], &[]);
    assert_eq!(code, Some(0), "stderr: {}", String::from_utf8_lossy(&stderr));
    let json: Value = serde_json::from_slice(&stdout).expect("json");
    assert_eq!(json["args"], serde_json::json!(["main.py", "max_iters=1000"]));
    assert_eq!(json["env"]["set"]["CUDA_LAUNCH_BLOCKING"], "1");
    assert_eq!(json["env"]["clear_inherited"], true);
    assert!(run_dirs(root).is_empty());
}

#[test]
fn missing_job_file_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_jobshim(tmp.path(), &["run"], &[]);
    assert_eq!(code, Some(1));
    assert!(String::from_utf8_lossy(&stderr).contains("job.toml"));
}

#[test]
fn debug_flag_logs_to_stderr() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    setup_job(root, "exit 0", r#""NONE""#, 1, &[]);

    let (code, _, stderr) = run_jobshim(root, &["check", "--debug"], &[]);
    assert_eq!(code, Some(0));
    assert!(String::from_utf8_lossy(&stderr).contains("loaded job file"));

    let (code, _, stderr) = run_jobshim(root, &["check"], &[]);
    assert_eq!(code, Some(0));
    assert!(!String::from_utf8_lossy(&stderr).contains("loaded job file"));
}
