//! Project-wide constants and user-facing messages.

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Shown on the file-name surface when nothing is selected.
pub const NO_FILE_PLACEHOLDER: &str = "no file selected";

/// Appended once, when the engine first becomes callable.
pub const ENGINE_READY_MESSAGE: &str = "Engine loaded. Pick a text file, then run /analyze.";

/// Appended after the engine returned and the result surface was updated.
pub const ANALYSIS_DONE_MESSAGE: &str = "Analysis complete. The result is shown below.";

/// Default tracing level for the host.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log line reporting a successful read.
pub fn read_message(name: &str, byte_len: usize) -> String {
    format!("Read {name}. Length: {} bytes", format_number(byte_len as u64))
}

/// Format a number with comma separators (e.g. 1,234,567).
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consts_from_cargo_toml() {
        assert!(AUTHOR.contains("Assaf Sapir"));
        assert!(HOMEPAGE.contains("sapir.io"));
        assert!(REPO.contains("github.com/assapir/lexiscope"));
    }

    #[test]
    fn format_number_small() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(5), "5");
        assert_eq!(format_number(999), "999");
    }

    #[test]
    fn format_number_thousands() {
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(123_456), "123,456");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn read_message_reports_length() {
        assert_eq!(read_message("a.txt", 5), "Read a.txt. Length: 5 bytes");
        assert_eq!(
            read_message("big.txt", 12_345),
            "Read big.txt. Length: 12,345 bytes"
        );
    }
}
