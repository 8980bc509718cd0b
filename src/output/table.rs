use comfy_table::{Cell, Color};

use crate::error::AppError;
use crate::job::JobFile;
use crate::output::format::{create_styled_table, format_budget, header_cell, styled_cell};

/// Rows of the resource summary, in display order
pub(crate) fn resource_rows(job: &JobFile) -> Vec<(&'static str, String)> {
    let r = &job.resources;
    vec![
        ("Job", job.job_name()),
        ("Partition", r.partition.to_string()),
        ("GPU", r.resolved_gres().to_string()),
        ("MIG units", r.partition.slice().mig_units().to_string()),
        ("CPUs per task", r.cpus_per_task.to_string()),
        ("Tasks", r.ntasks.to_string()),
        ("CPU budget", format_budget(r.cpu_budget(), r.max_cpus())),
        ("Wall time", r.time.to_string()),
        ("Export", r.export.to_string()),
    ]
}

pub(crate) fn print_resource_table(
    job: &JobFile,
    validation: &Result<(), AppError>,
    use_color: bool,
) {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Resource", use_color),
        header_cell("Value", use_color),
    ]);

    for (name, value) in resource_rows(job) {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }

    let color = |c: Color| use_color.then_some(c);
    let status = match validation {
        Ok(()) => styled_cell("OK", color(Color::Green), true),
        Err(e) => styled_cell(&e.to_string(), color(Color::Red), true),
    };
    table.add_row(vec![styled_cell("Status", None, true), status]);

    println!("\n  Resource request\n");
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn rows_spell_out_resolved_values() {
        let job = JobFile::parse(
            r#"
[resources]
partition = "gpu_2g.20gb"
gres = "gpu:1"
cpus_per_task = 2
ntasks = 3
time = "06:00:00"

[program]
workdir = "/work"
venv = "/venv"
entrypoint = "train.py"
"#,
            Path::new("job.toml"),
            Path::new("/"),
        )
        .unwrap();
        let rows = resource_rows(&job);
        let lookup = |key: &str| {
            rows.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(lookup("Job"), "train");
        assert_eq!(lookup("GPU"), "gpu:2g.20gb:1");
        assert_eq!(lookup("MIG units"), "2");
        assert_eq!(lookup("CPU budget"), "6 / 8");
        assert_eq!(lookup("Export"), "ALL");
    }
}
