//! Terminal output: colors, the interactive console and the report block

pub mod console;
pub mod report;
pub mod terminal;

pub use console::{ConsoleSink, TerminalConsole};
pub use report::{format_delta, render_report};
pub use terminal::{colors, Palette, RESET};
