//! Console output
//!
//! - `color` - color mode resolution
//! - `console` - streaming tree formatter
//! - `json` - JSON output
//! - `report` - export results and configuration command messages

mod color;
mod console;
mod json;
pub mod report;

pub use color::{ColorMode, should_use_color};
pub use console::ConsoleFormatter;
pub use json::{print_json, write_json};
