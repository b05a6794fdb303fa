//! Treedoc: directory trees as a single Markdown document
//!
//! `snapshot` walks a directory and writes every file as a heading plus a
//! fenced block into one document; `restore` parses such a document and writes
//! the files back out under a target directory.

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod ignore;
pub mod logging;
pub mod restore;
pub mod snapshot;
pub mod tree;
