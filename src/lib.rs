//! orgtree: organization chart editor.
//!
//! The editor model lives in [`domain`]: a forest of [`domain::OrgNode`]s that
//! can be flattened, rebuilt and edited with add, edit, subtree delete and
//! cycle-safe move. [`application`] persists the forest as JSON and asks for
//! confirmation before deletions; [`cli`] exposes it as the `orgtree` binary.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
