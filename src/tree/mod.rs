//! Directory traversal and path handling shared by snapshot and restore.

pub mod path;
pub mod walker;
