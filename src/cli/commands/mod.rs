//! Command implementations, one module per command family.

pub mod add;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod filter;
pub mod init;
pub mod interaction;
pub mod list;
pub mod show;
pub mod stats;
