use crate::launch::LaunchPlan;

/// Human-readable dry-run output
pub(crate) fn format_plan(plan: &LaunchPlan) -> String {
    let command = &plan.command;
    let mut out = String::new();
    out.push_str(&format!("program:  {}\n", command.program.display()));
    for arg in &command.args {
        out.push_str(&format!("  arg:    {arg}\n"));
    }
    out.push_str(&format!("workdir:  {}\n", command.workdir.display()));
    out.push_str(&format!(
        "env:      {}\n",
        if command.env.clear_inherited {
            "cleared"
        } else {
            "inherited"
        }
    ));
    for (key, value) in &command.env.vars {
        out.push_str(&format!("  set:    {key}={value}\n"));
    }
    for key in &command.env.removed {
        out.push_str(&format!("  unset:  {key}\n"));
    }
    out.push_str(&format!("log:      {}\n", plan.log_file.display()));
    out
}
