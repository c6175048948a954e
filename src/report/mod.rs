//! Summary output: the JSON artifact, its human-readable renderings,
//! and the LaTeX tables built from it.

pub mod json;
pub mod latex;
pub mod markdown;

pub use json::{load_summary, render_json, write_summary};
pub use latex::{build_tables, write_tables};
pub use markdown::generate_markdown_report;
