pub mod formatter;

pub use formatter::{format_report_line, plugin_name, render, Report, NO_RESULTS, SEPARATOR};
