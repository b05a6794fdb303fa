//! Relative path rendering and containment checks
//!
//! Paths inside a document are always `/`-separated and relative to the
//! snapshot root, whatever the host separator is.

use crate::error::StorageError;
use std::path::{Component, Path, PathBuf};

/// Render `path` relative to `root` with `/` separators.
///
/// When `path` is the root itself (a snapshot of a single file), the file's
/// base name is returned instead of an empty string.
pub fn relative_slash_path(root: &Path, path: &Path) -> Result<String, StorageError> {
    let relative = path.strip_prefix(root).map_err(|_| {
        StorageError::InvalidPath(format!(
            "{} is not under {}",
            path.display(),
            root.display()
        ))
    })?;

    let relative = if relative.as_os_str().is_empty() {
        match path.file_name() {
            Some(name) => Path::new(name),
            None => return Ok(String::new()),
        }
    } else {
        relative
    };

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => {
                let name = name.to_str().ok_or_else(|| {
                    StorageError::InvalidPath(format!(
                        "{} is not valid UTF-8",
                        path.display()
                    ))
                })?;
                parts.push(name);
            }
            Component::CurDir => {}
            other => {
                return Err(StorageError::InvalidPath(format!(
                    "unexpected component {:?} in {}",
                    other,
                    path.display()
                )))
            }
        }
    }
    Ok(parts.join("/"))
}

/// True when joining `relative` onto a root cannot leave that root.
///
/// Rejects `..` segments and anything carrying a root or drive prefix.
pub fn is_contained(relative: &str) -> bool {
    if relative.starts_with('/') {
        return false;
    }
    relative.split('/').all(|segment| {
        Path::new(segment)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    })
}

/// Join a document path onto `root`.
///
/// Leading slashes and drive prefixes are dropped so the result always starts
/// at `root`; `..` segments are kept as-is, so callers must check
/// [`is_contained`] first when escaping the root is not allowed.
pub fn join_relative(root: &Path, relative: &str) -> PathBuf {
    let mut out = root.to_path_buf();
    for segment in relative.split('/') {
        for component in Path::new(segment).components() {
            match component {
                Component::Normal(name) => out.push(name),
                Component::ParentDir => out.push(".."),
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            }
        }
    }
    out
}
