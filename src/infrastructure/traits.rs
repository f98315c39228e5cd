//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use crate::domain::DeletePlan;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Rename/move a file.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Remove a file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

/// Asks the user to approve a subtree deletion.
pub trait Confirmer: Send + Sync {
    /// Returns true to commit the deletion, false to discard it.
    fn confirm_delete(&self, plan: &DeletePlan) -> io::Result<bool>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

/// Prompts on the terminal; anything but `y`/`yes` declines.
#[derive(Debug, Default)]
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm_delete(&self, plan: &DeletePlan) -> io::Result<bool> {
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", "Delete Team Member".red().bold())?;
        writeln!(stdout, "  {} ({})", plan.name, plan.title)?;
        if let Some(warning) = plan.warning() {
            writeln!(stdout, "{}: {}", "Warning".yellow(), warning)?;
            writeln!(
                stdout,
                "  All team members reporting to this person will also be removed."
            )?;
        }
        write!(stdout, "{} ", "This action cannot be undone. Continue? [y/N]".cyan())?;
        stdout.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

/// Approves every deletion (`--yes`, or prompts disabled in config).
#[derive(Debug, Default)]
pub struct AutoConfirmer;

impl Confirmer for AutoConfirmer {
    fn confirm_delete(&self, _plan: &DeletePlan) -> io::Result<bool> {
        Ok(true)
    }
}
