use crate::error::AppError;
use crate::job::JobFile;
use crate::launch::LaunchPlan;

pub(crate) fn output_check_json(job: &JobFile, validation: &Result<(), AppError>) -> String {
    let r = &job.resources;
    let output = serde_json::json!({
        "job_name": job.job_name(),
        "partition": r.partition.name(),
        "gres": r.resolved_gres().to_string(),
        "mig_units": r.partition.slice().mig_units(),
        "cpus_per_task": r.cpus_per_task,
        "ntasks": r.ntasks,
        "cpu_budget": r.cpu_budget(),
        "max_cpus": r.max_cpus(),
        "time": r.time.to_string(),
        "time_seconds": r.time.as_secs(),
        "export": r.export.to_string(),
        "valid": validation.is_ok(),
        "error": validation.as_ref().err().map(ToString::to_string),
    });
    serde_json::to_string_pretty(&output).unwrap_or_default()
}

pub(crate) fn output_plan_json(plan: &LaunchPlan) -> String {
    let command = &plan.command;
    let output = serde_json::json!({
        "program": command.program.display().to_string(),
        "args": command.args,
        "workdir": command.workdir.display().to_string(),
        "venv": plan.venv.root.display().to_string(),
        "env": {
            "clear_inherited": command.env.clear_inherited,
            "set": command.env.vars,
            "removed": command.env.removed,
        },
        "log_dir": plan.log_dir.display().to_string(),
        "log_file": plan.log_file.display().to_string(),
    });
    serde_json::to_string_pretty(&output).unwrap_or_default()
}
