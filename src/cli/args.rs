//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Organization chart editor: reporting lines, safe reparenting, subtree deletion
#[derive(Parser, Debug)]
#[command(name = "orgtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Raise log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Org chart file (default: data_file from config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Directory holding .orgtree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the org chart as a tree
    Show,

    /// List members with their level and id
    List,

    /// Add a member
    Add {
        /// Full name
        #[arg(short, long)]
        name: String,
        /// Title / position
        #[arg(short, long)]
        title: String,
        /// Manager id (default: top level)
        #[arg(short, long)]
        parent: Option<String>,
    },

    /// Change name and/or title of a member
    Edit {
        /// Member id
        id: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Delete a member and everyone reporting to them
    Delete {
        /// Member id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Move a member (with their reports) under a new manager
    Move {
        /// Member id
        id: String,
        /// New manager id (omit to make top level)
        #[arg(long)]
        to: Option<String>,
    },

    /// Write a starter org chart
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}
