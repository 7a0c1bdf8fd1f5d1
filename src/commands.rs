//! Built-in REPL commands prefixed with `/`.

use std::path::PathBuf;

use crate::consts::NO_FILE_PLACEHOLDER;
use crate::session::PipelineState;

/// Session info available to built-in commands.
pub struct SessionInfo<'a> {
    pub engine: &'a str,
    pub engine_ready: bool,
    pub state: PipelineState,
    pub file: Option<&'a str>,
    pub log: &'a [String],
}

/// Result of command handling. The caller turns these into pipeline triggers.
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Not a command.
    NotACommand,
    /// Command handled, continue the REPL loop.
    Handled,
    /// Pick the file at this path.
    Open(PathBuf),
    /// Clear the selection.
    Clear,
    /// Request analysis of the selected file.
    Analyze,
    /// Exit the REPL.
    Quit,
}

/// A built-in command definition. `run` gets the text after the name.
struct Command {
    name: &'static str,
    aliases: &'static [&'static str],
    usage: &'static str,
    description: &'static str,
    run: fn(&SessionInfo, &str) -> CommandResult,
}

const COMMANDS: &[Command] = &[
    Command {
        name: "/help",
        aliases: &["/h", "/?"],
        usage: "",
        description: "show this help",
        run: cmd_help,
    },
    Command {
        name: "/open",
        aliases: &["/o"],
        usage: "<path>",
        description: "select a text file to analyze",
        run: cmd_open,
    },
    Command {
        name: "/clear",
        aliases: &[],
        usage: "",
        description: "clear the file selection",
        run: cmd_clear,
    },
    Command {
        name: "/analyze",
        aliases: &["/a"],
        usage: "",
        description: "read the selected file and run the engine on it",
        run: cmd_analyze,
    },
    Command {
        name: "/status",
        aliases: &[],
        usage: "",
        description: "show engine, file, and pipeline state",
        run: cmd_status,
    },
    Command {
        name: "/quit",
        aliases: &["quit", "exit", "/exit"],
        usage: "",
        description: "exit the REPL",
        run: cmd_quit,
    },
];

/// Try to handle input as a built-in command.
pub fn handle_command(input: &str, info: &SessionInfo<'_>) -> CommandResult {
    let input = input.trim();
    let (cmd, rest) = input
        .split_once(char::is_whitespace)
        .map_or((input, ""), |(c, r)| (c, r.trim()));

    for command in COMMANDS {
        if cmd == command.name || command.aliases.contains(&cmd) {
            return (command.run)(info, rest);
        }
    }

    if cmd.starts_with('/') {
        println!("unknown command: {cmd}");
        println!("type /help for available commands");
        return CommandResult::Handled;
    }

    CommandResult::NotACommand
}

// --- Command implementations ---

fn cmd_help(_info: &SessionInfo, _args: &str) -> CommandResult {
    let max_width = COMMANDS
        .iter()
        .map(|c| format_command_name(c).len())
        .max()
        .unwrap_or(10);

    for command in COMMANDS {
        let name = format_command_name(command);
        println!("  {name:<max_width$}  {}", command.description);
    }
    CommandResult::Handled
}

fn format_command_name(command: &Command) -> String {
    let mut name = command.name.to_string();
    if !command.usage.is_empty() {
        name.push(' ');
        name.push_str(command.usage);
    }
    if !command.aliases.is_empty() {
        name.push_str(&format!(" ({})", command.aliases.join(", ")));
    }
    name
}

fn cmd_open(_info: &SessionInfo, args: &str) -> CommandResult {
    if args.is_empty() {
        println!("usage: /open <path>");
        return CommandResult::Handled;
    }
    CommandResult::Open(PathBuf::from(args))
}

fn cmd_clear(_info: &SessionInfo, _args: &str) -> CommandResult {
    CommandResult::Clear
}

fn cmd_analyze(_info: &SessionInfo, _args: &str) -> CommandResult {
    CommandResult::Analyze
}

fn cmd_status(info: &SessionInfo, _args: &str) -> CommandResult {
    let readiness = if info.engine_ready { "ready" } else { "loading" };
    println!("  engine  {} ({readiness})", info.engine);
    println!("  file    {}", info.file.unwrap_or(NO_FILE_PLACEHOLDER));
    println!("  state   {:?}", info.state);
    if info.log.is_empty() {
        println!("  log     (empty)");
    } else {
        println!("  log");
        for line in info.log {
            println!("    {line}");
        }
    }
    CommandResult::Handled
}

fn cmd_quit(_info: &SessionInfo, _args: &str) -> CommandResult {
    CommandResult::Quit
}
