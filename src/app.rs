use std::path::Path;

use crate::cli::{Cli, Commands};
use crate::consts::LAUNCHER_FAILURE_CODE;
use crate::error::AppError;
use crate::job::JobFile;
use crate::launch::LaunchPlan;
use crate::output::{
    format_plan, output_check_json, output_plan_json, print_resource_table, render_batch_script,
    render_directives,
};
use crate::utils::Timezone;

/// Run the selected command; the returned code becomes the process exit code
pub(crate) fn run(cli: &Cli) -> Result<i32, AppError> {
    let job_path = cli.job_path();
    let job = JobFile::load(&job_path)?;
    tracing::debug!(path = %job_path.display(), "loaded job file");

    match cli.command() {
        Commands::Check => Ok(handle_check(&job, cli)),
        Commands::Directives { script } => handle_directives(&job, &job_path, script),
        Commands::Run { dry_run } => handle_run(&job, cli, dry_run),
    }
}

fn handle_check(job: &JobFile, cli: &Cli) -> i32 {
    let validation = job.resources.validate();
    if cli.json {
        println!("{}", output_check_json(job, &validation));
    } else {
        print_resource_table(job, &validation, cli.use_color());
    }
    match validation {
        Ok(()) => 0,
        Err(_) => LAUNCHER_FAILURE_CODE,
    }
}

fn handle_directives(job: &JobFile, job_path: &Path, script: bool) -> Result<i32, AppError> {
    job.resources.validate()?;
    if script {
        print!("{}", render_batch_script(job, job_path));
    } else {
        print!("{}", render_directives(job));
    }
    Ok(0)
}

fn handle_run(job: &JobFile, cli: &Cli, dry_run: bool) -> Result<i32, AppError> {
    let timezone = Timezone::parse(cli.timezone.as_deref())?;
    let log_parent = cli.log_parent.as_deref().unwrap_or_else(|| job.log_parent());
    let plan = LaunchPlan::prepare(job, log_parent, &timezone.now(), |name| {
        std::env::var(name).ok()
    })?;

    if dry_run {
        if cli.json {
            println!("{}", output_plan_json(&plan));
        } else {
            print!("{}", format_plan(&plan));
        }
        return Ok(0);
    }

    let code = plan.launch()?;
    if code != 0 {
        tracing::warn!(code, log = %plan.log_file.display(), "child exited with failure");
    }
    Ok(code)
}
