//! Renders the display surfaces on a terminal.

use std::io::{self, Write};

use super::Surface;

/// Log lines and the file name go to stderr, the result to stdout, so the
/// result can be piped on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSurface;

impl TerminalSurface {
    pub fn new() -> Self {
        Self
    }
}

impl Surface for TerminalSurface {
    fn show_file_name(&self, name: &str) {
        eprintln!("  file: {name}");
    }

    fn append_log(&self, line: &str) {
        eprintln!("  | {line}");
    }

    fn clear_log(&self) {
        eprintln!("  {}", "-".repeat(40));
    }

    fn show_result(&self, text: &str) {
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "{text}");
        if !text.ends_with('\n') {
            let _ = writeln!(stdout);
        }
        let _ = stdout.flush();
    }
}
