//! Terminal collaborator contracts consumed by the desktop runtime and the terminal window.
//!
//! The window manager never interprets commands. It only carries a [`TerminalSession`] into
//! window render contexts; the embedding application supplies the [`CommandExecutor`] that maps a
//! command line to output text. This crate is runtime-agnostic and does not depend on Leptos or
//! browser APIs.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Serialize};

/// Working directory a fresh session starts in.
pub const DEFAULT_WORKING_DIRECTORY: &str = "/home/guest";
/// Prompt prefix rendered before the working directory.
pub const DEFAULT_PROMPT: &str = "guest@portfolio";
/// Maximum number of history entries kept by a session before the oldest are dropped.
pub const DEFAULT_HISTORY_LIMIT: usize = 200;
/// Built-in command that empties the session history instead of reaching the executor.
pub const CLEAR_COMMAND: &str = "clear";

/// Shell execution request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellRequest {
    /// Trimmed input line to execute.
    pub line: String,
    /// Current logical cwd.
    pub cwd: String,
}

/// Output produced by a [`CommandExecutor`] for one request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommandOutput {
    /// Output text shown under the prompt line. May be empty.
    pub text: String,
    /// New working directory when the command changed it.
    pub cwd: Option<String>,
}

impl CommandOutput {
    /// Creates output text that leaves the working directory unchanged.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cwd: None,
        }
    }

    /// Sets the working directory the session should adopt.
    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// Opaque command interpreter supplied by the embedding application.
pub trait CommandExecutor {
    /// Executes one command line and returns its output.
    fn execute(&self, request: &ShellRequest) -> CommandOutput;
}

impl<F> CommandExecutor for F
where
    F: Fn(&ShellRequest) -> CommandOutput,
{
    fn execute(&self, request: &ShellRequest) -> CommandOutput {
        self(request)
    }
}

/// One rendered line group in the terminal scrollback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum HistoryEntry {
    /// Echo of the submitted command with the prompt that was active when it ran.
    Prompt {
        /// Rendered prompt, for example `guest@portfolio:/home/guest$ ls`.
        line: String,
    },
    /// Executor output.
    Output {
        /// Output text.
        text: String,
    },
}

impl HistoryEntry {
    /// Returns the display text for the entry.
    pub fn text(&self) -> &str {
        match self {
            Self::Prompt { line } => line,
            Self::Output { text } => text,
        }
    }
}

/// Terminal state shared between the terminal window and whoever drives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSession {
    command: String,
    history: Vec<HistoryEntry>,
    current_dir: String,
    prompt: String,
    history_limit: usize,
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self::new(DEFAULT_WORKING_DIRECTORY)
    }
}

impl TerminalSession {
    /// Creates an empty session rooted at `cwd`.
    pub fn new(cwd: impl Into<String>) -> Self {
        Self {
            command: String::new(),
            history: Vec::new(),
            current_dir: cwd.into(),
            prompt: DEFAULT_PROMPT.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Overrides the prompt prefix.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Overrides the history bound. A limit of zero keeps no history.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self.trim_history();
        self
    }

    /// Returns the pending (not yet submitted) command text.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Replaces the pending command text.
    pub fn set_command(&mut self, command: impl Into<String>) {
        self.command = command.into();
    }

    /// Returns the scrollback, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns the current working directory.
    pub fn current_dir(&self) -> &str {
        &self.current_dir
    }

    /// Returns the prompt for the current working directory, without the trailing `$`.
    pub fn prompt_line(&self) -> String {
        format!("{}:{}", self.prompt, self.current_dir)
    }

    /// Empties the scrollback.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Runs `line` through `executor` and records the result.
    ///
    /// `clear` empties the scrollback without reaching the executor, blank input is ignored, and
    /// any other line appends the prompt echo followed by the output. The pending command is
    /// cleared whenever the line was accepted. Returns `false` for ignored input.
    pub fn execute(&mut self, executor: &dyn CommandExecutor, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed == CLEAR_COMMAND {
            self.history.clear();
            self.command.clear();
            return true;
        }
        if trimmed.is_empty() {
            return false;
        }

        let prompt = format!("{}$ {}", self.prompt_line(), line);
        let output = executor.execute(&ShellRequest {
            line: trimmed.to_string(),
            cwd: self.current_dir.clone(),
        });
        if let Some(cwd) = output.cwd {
            self.current_dir = cwd;
        }
        self.history.push(HistoryEntry::Prompt { line: prompt });
        self.history.push(HistoryEntry::Output { text: output.text });
        self.command.clear();
        self.trim_history();
        true
    }

    fn trim_history(&mut self) {
        if self.history.len() > self.history_limit {
            let overflow = self.history.len() - self.history_limit;
            self.history.drain(0..overflow);
        }
    }
}
