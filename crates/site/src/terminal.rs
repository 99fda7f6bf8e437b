//! Command set behind the portfolio terminal window.
//!
//! The shell is a toy: a flat map from directory path to entry names, persisted through the host
//! preference store so `mkdir`/`touch`/`rm` survive a reload.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use leptos::logging::warn;
use platform_host::{load_pref_with, save_pref_with, PrefsStore};
use system_shell_contract::{CommandExecutor, CommandOutput, ShellRequest, DEFAULT_WORKING_DIRECTORY};

/// Preference key holding the terminal file tree.
pub const FILE_TREE_STORAGE_KEY: &str = "terminal.filesystem.v1";

const HOSTNAME: &str = "portfolio.local";

const HELP_TEXT: &str = "Available commands:
  help            show this list
  whoami          print the current user
  pwd             print the working directory
  ls [-l]         list the working directory
  cd [DIR]        change directory (.. and ~ supported)
  cat FILE        print a file
  echo TEXT       print TEXT
  mkdir DIR       create a directory
  touch FILE      create an empty file
  rm FILE         remove a file
  man CMD         show a manual page
  hostname        print the host name
  uname [-a]      print system information
  reset           restore the default file tree
  clear           clear the screen";

type FileTree = BTreeMap<String, Vec<String>>;

fn default_tree() -> FileTree {
    let mut tree = FileTree::new();
    tree.insert(
        DEFAULT_WORKING_DIRECTORY.to_string(),
        ["profile.txt", "about.txt", "projects.txt", "skills.txt", "projects", "documents"]
            .map(String::from)
            .to_vec(),
    );
    tree.insert(
        format!("{DEFAULT_WORKING_DIRECTORY}/projects"),
        ["checkpoint", "bob", "jot"].map(String::from).to_vec(),
    );
    tree.insert(
        format!("{DEFAULT_WORKING_DIRECTORY}/documents"),
        ["resume.pdf", "notes.md"].map(String::from).to_vec(),
    );
    tree
}

fn file_contents(name: &str) -> Option<&'static str> {
    match name {
        "profile.txt" => Some("guest@portfolio: software engineer building tools for the web."),
        "about.txt" => Some("This desktop is a window manager written in Rust and compiled to WebAssembly."),
        "projects.txt" => Some("Open the Works window to browse projects: checkpoint, bob, jot."),
        "skills.txt" => Some(
            "Languages: Rust, TypeScript, Go, Python\nFrameworks: Leptos, React, Next.js\nTools: Git, Docker, PostgreSQL, Redis",
        ),
        _ => None,
    }
}

fn manual_page(command: &str) -> Option<&'static str> {
    let page = match command {
        "ls" => "ls - list directory contents\nUsage: ls [-l]",
        "cd" => "cd - change directory\nUsage: cd [DIRECTORY]\n  ..  move up one directory\n  ~   move to home directory",
        "pwd" => "pwd - print working directory\nUsage: pwd",
        "cat" => "cat - print a file\nUsage: cat FILE",
        "echo" => "echo - display a line of text\nUsage: echo [STRING]...",
        "mkdir" => "mkdir - make a directory\nUsage: mkdir DIRECTORY",
        "touch" => "touch - create an empty file\nUsage: touch FILE",
        "rm" => "rm - remove a file\nUsage: rm FILE",
        "help" => "help - display available commands\nUsage: help",
        "whoami" => "whoami - print effective username\nUsage: whoami",
        "reset" => "reset - restore the default file tree\nUsage: reset",
        _ => return None,
    };
    Some(page)
}

/// Splits `line` into the command word and its (trimmed) argument text.
fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    }
}

fn parent_dir(cwd: &str) -> String {
    let parts: Vec<&str> = cwd.split('/').filter(|part| !part.is_empty()).collect();
    if parts.len() > 2 {
        format!("/{}", parts[..parts.len() - 1].join("/"))
    } else {
        DEFAULT_WORKING_DIRECTORY.to_string()
    }
}

/// Interprets terminal command lines against a small persisted file tree.
pub struct PortfolioShell {
    tree: RefCell<FileTree>,
    prefs: Rc<dyn PrefsStore>,
}

impl PortfolioShell {
    /// Loads the saved file tree, or the default one when nothing valid is stored.
    pub fn new(prefs: Rc<dyn PrefsStore>) -> Self {
        let loaded: Result<Option<FileTree>, String> =
            load_pref_with(prefs.as_ref(), FILE_TREE_STORAGE_KEY);
        let tree = match loaded {
            Ok(Some(tree)) if tree.contains_key(DEFAULT_WORKING_DIRECTORY) => tree,
            Ok(_) => default_tree(),
            Err(err) => {
                warn!("terminal file tree load failed: {err}");
                default_tree()
            }
        };
        Self {
            tree: RefCell::new(tree),
            prefs,
        }
    }

    fn save(&self) {
        let saved = save_pref_with(self.prefs.as_ref(), FILE_TREE_STORAGE_KEY, &*self.tree.borrow());
        if let Err(err) = saved {
            warn!("terminal file tree save failed: {err}");
        }
    }

    fn entries(&self, cwd: &str) -> Vec<String> {
        self.tree.borrow().get(cwd).cloned().unwrap_or_default()
    }

    fn is_dir(&self, path: &str) -> bool {
        self.tree.borrow().contains_key(path)
    }

    fn list(&self, cwd: &str, long: bool) -> String {
        let entries = self.entries(cwd);
        if !long {
            return entries.join("  ");
        }
        let mut lines = vec![format!("total {}", entries.len())];
        for entry in entries {
            let mode = if self.is_dir(&format!("{cwd}/{entry}")) {
                "drwxr-xr-x"
            } else {
                "-rw-r--r--"
            };
            lines.push(format!("{mode}  1 guest guest  0 {entry}"));
        }
        lines.join("\n")
    }

    fn change_dir(&self, cwd: &str, target: &str) -> CommandOutput {
        let next = match target {
            "" | "~" => DEFAULT_WORKING_DIRECTORY.to_string(),
            ".." => parent_dir(cwd),
            absolute if absolute.starts_with('/') => absolute.trim_end_matches('/').to_string(),
            relative => format!("{cwd}/{}", relative.trim_end_matches('/')),
        };
        if self.is_dir(&next) {
            CommandOutput::default().with_cwd(next)
        } else {
            CommandOutput::text(format!("cd: {target}: No such file or directory"))
        }
    }

    fn make_dir(&self, cwd: &str, name: &str) -> String {
        if name.is_empty() {
            return "mkdir: missing operand".to_string();
        }
        let path = format!("{cwd}/{name}");
        if self.is_dir(&path) {
            return format!("mkdir: cannot create directory '{name}': File exists");
        }
        {
            let mut tree = self.tree.borrow_mut();
            tree.insert(path, Vec::new());
            let entries = tree.entry(cwd.to_string()).or_default();
            if !entries.iter().any(|entry| entry == name) {
                entries.push(name.to_string());
            }
        }
        self.save();
        String::new()
    }

    fn touch(&self, cwd: &str, name: &str) -> String {
        if name.is_empty() {
            return "touch: missing file operand".to_string();
        }
        {
            let mut tree = self.tree.borrow_mut();
            let entries = tree.entry(cwd.to_string()).or_default();
            if !entries.iter().any(|entry| entry == name) {
                entries.push(name.to_string());
            }
        }
        self.save();
        String::new()
    }

    fn remove(&self, cwd: &str, name: &str) -> String {
        if name.is_empty() {
            return "rm: missing operand".to_string();
        }
        let removed = {
            let mut tree = self.tree.borrow_mut();
            let entries = tree.entry(cwd.to_string()).or_default();
            let before = entries.len();
            entries.retain(|entry| entry != name);
            before != entries.len()
        };
        if !removed {
            return format!("rm: cannot remove '{name}': No such file or directory");
        }
        self.save();
        String::new()
    }

    fn cat(&self, cwd: &str, name: &str) -> String {
        if !self.entries(cwd).iter().any(|entry| entry == name) {
            return format!("cat: {name}: No such file or directory");
        }
        if self.is_dir(&format!("{cwd}/{name}")) {
            return format!("cat: {name}: Is a directory");
        }
        file_contents(name)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{name}: This is a placeholder file."))
    }

    fn reset(&self) -> CommandOutput {
        *self.tree.borrow_mut() = default_tree();
        self.save();
        CommandOutput::text("Filesystem reset to defaults.").with_cwd(DEFAULT_WORKING_DIRECTORY)
    }
}

impl CommandExecutor for PortfolioShell {
    fn execute(&self, request: &ShellRequest) -> CommandOutput {
        let cwd = request.cwd.as_str();
        let (command, args) = split_command(request.line.as_str());
        match command {
            "help" => CommandOutput::text(HELP_TEXT),
            "whoami" => CommandOutput::text("guest"),
            "pwd" => CommandOutput::text(cwd),
            "hostname" => CommandOutput::text(HOSTNAME),
            "uname" if args == "-a" => {
                CommandOutput::text("Linux portfolio 6.1.0-portfolio #1 SMP wasm32 GNU/Linux")
            }
            "uname" => CommandOutput::text("Linux"),
            "ls" => CommandOutput::text(self.list(cwd, matches!(args, "-l" | "-la" | "-al"))),
            "cd" => self.change_dir(cwd, args),
            "echo" => CommandOutput::text(args),
            "cat" => CommandOutput::text(self.cat(cwd, args)),
            "mkdir" => CommandOutput::text(self.make_dir(cwd, args)),
            "touch" => CommandOutput::text(self.touch(cwd, args)),
            "rm" => CommandOutput::text(self.remove(cwd, args)),
            "man" => CommandOutput::text(
                manual_page(args)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("No manual entry for {args}")),
            ),
            "reset" => self.reset(),
            other => CommandOutput::text(format!("command not found: {other}")),
        }
    }
}
