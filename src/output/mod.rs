//! Graph formatting and display
//!
//! # Module Structure
//!
//! - `config` - Graph style and edge types
//! - `dot` - Graphviz DOT document rendering
//! - `json` - JSON output
//! - `status` - Console messages after writing a file

mod config;
mod dot;
mod json;
mod status;

pub use config::{EdgeSpec, GraphStyle};
pub use dot::{DotDocument, DotRenderer, GraphSummary, render_cluster};
pub use json::{render_json, write_json};
pub use status::{print_generated, render_target, write_generated_message};
