//! Startup banner and session summary display.

use std::path::Path;

use crate::consts::{AUTHOR, HOMEPAGE, REPO, format_number};

/// Host configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub engine: &'a Path,
    pub engine_args: &'a [String],
    pub file: Option<&'a Path>,
}

/// Print the startup banner with session info.
pub fn print_banner(info: &BannerInfo) {
    let engine = if info.engine_args.is_empty() {
        info.engine.display().to_string()
    } else {
        format!("{} {}", info.engine.display(), info.engine_args.join(" "))
    };
    let file = info
        .file
        .map_or_else(|| "—".to_string(), |f| f.display().to_string());

    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║           L E X I S C O P E           ║
   ║      pick a file, read the words      ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
   repo      {}
   engine    {}
   file      {}
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        REPO,
        engine,
        file,
    );
}

/// Print the session summary (attempt counts + farewell).
pub fn print_session_summary(succeeded: u64, failed: u64) {
    if succeeded + failed > 0 {
        println!(
            "session: {} analyzed, {} failed",
            format_number(succeeded),
            format_number(failed),
        );
    }
    println!("goodbye.");
}
