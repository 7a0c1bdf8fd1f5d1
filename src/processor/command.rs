use anyhow::{Context, Result, bail};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

use super::TextProcessor;
use crate::config::EngineConfig;

/// Maximum stderr bytes quoted in an engine failure.
const MAX_STDERR_BYTES: usize = 2_000;

/// A pre-compiled engine run as a child process: text on stdin, result on
/// stdout. One process per call.
#[derive(Debug, Clone)]
pub struct CommandProcessor {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandProcessor {
    /// Engine initialization. Resolves the program once; the processor only
    /// exists after this succeeds.
    pub async fn load(config: EngineConfig) -> Result<Self> {
        let program = resolve_program(&config.program)
            .await
            .with_context(|| format!("engine not found: {}", config.program.display()))?;
        info!(program = %program.display(), "engine loaded");
        Ok(Self {
            program,
            args: config.args,
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl TextProcessor for CommandProcessor {
    fn process(&self, text: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to start {}", self.program.display()))?;

        // Feed stdin from another thread so a chatty engine can't fill its
        // stdout pipe while we are still writing.
        let mut stdin = child.stdin.take().context("engine stdin unavailable")?;
        let input = text.to_owned();
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child
            .wait_with_output()
            .context("failed to wait for engine")?;
        let written = match writer.join() {
            Ok(result) => result,
            Err(_) => bail!("engine input writer panicked"),
        };

        debug!(status = %output.status, stdout_len = output.stdout.len(), "engine exited");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = truncate(stderr.trim(), MAX_STDERR_BYTES);
            if stderr.is_empty() {
                bail!("engine exited with {}", output.status);
            }
            bail!("engine exited with {}: {}", output.status, stderr);
        }

        // An engine that exits cleanly without reading all input is fine.
        if let Err(e) = written {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e).context("failed to write engine input");
            }
        }

        String::from_utf8(output.stdout).context("engine returned invalid UTF-8")
    }
}

/// Paths with a directory component must exist as files. Bare names are
/// searched for on `PATH`.
async fn resolve_program(program: &Path) -> Result<PathBuf> {
    if program.components().count() > 1 || program.is_absolute() {
        return existing_file(program).await;
    }

    let search = std::env::var_os("PATH").unwrap_or_default();
    for dir in std::env::split_paths(&search) {
        let candidate = dir.join(program);
        if let Ok(found) = existing_file(&candidate).await {
            return Ok(found);
        }
    }
    bail!("{} is not on PATH", program.display())
}

async fn existing_file(path: &Path) -> Result<PathBuf> {
    let meta = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("cannot stat {}", path.display()))?;
    if !meta.is_file() {
        bail!("{} is not a file", path.display());
    }
    Ok(path.to_path_buf())
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
