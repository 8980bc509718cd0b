mod directives;
mod format;
mod json;
mod plan;
mod table;

pub(crate) use directives::{render_batch_script, render_directives};
pub(crate) use json::{output_check_json, output_plan_json};
pub(crate) use plan::format_plan;
pub(crate) use table::print_resource_table;
