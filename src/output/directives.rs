use std::path::Path;

use crate::job::JobFile;

/// `#SBATCH` header lines, one directive per line
pub(crate) fn render_directives(job: &JobFile) -> String {
    let r = &job.resources;
    let mut lines = vec![format!("--job-name={}", job.job_name())];
    if let Some(output) = &job.scheduler.output {
        lines.push(format!("--output={output}"));
    }
    if let Some(error) = &job.scheduler.error {
        lines.push(format!("--error={error}"));
    }
    lines.push(format!("--partition={}", r.partition));
    lines.push(format!("--gres={}", r.resolved_gres()));
    lines.push(format!("--cpus-per-task={}", r.cpus_per_task));
    lines.push(format!("--ntasks={}", r.ntasks));
    lines.push(format!("--time={}", r.time));
    lines.push(format!("--export={}", r.export));

    lines
        .iter()
        .map(|line| format!("#SBATCH {line}\n"))
        .collect()
}

/// Complete batch file that hands control back to `jobshim run`
pub(crate) fn render_batch_script(job: &JobFile, job_path: &Path) -> String {
    format!(
        "#!/bin/bash\n{}\nexec jobshim run --job {}\n",
        render_directives(job),
        shell_quote(&job_path.to_string_lossy())
    )
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
