//! Source path resolution for `SF:` entries

use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Identifier of a record's source file.
///
/// `Relative` when the resolved path lies under the root, otherwise the
/// resolved absolute path is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedPath {
    Relative(PathBuf),
    Absolute(PathBuf),
}

impl ResolvedPath {
    /// Resolve a raw `SF:` value against `root`.
    ///
    /// `root` is expected to be absolute and already canonical.
    pub fn resolve(raw: &str, root: &Path) -> Self {
        let absolute = resolve_absolute(Path::new(raw), root);

        match absolute.strip_prefix(root) {
            Ok(rel) => ResolvedPath::Relative(rel.to_path_buf()),
            Err(_) => ResolvedPath::Absolute(absolute),
        }
    }

    pub fn as_path(&self) -> &Path {
        match self {
            ResolvedPath::Relative(p) | ResolvedPath::Absolute(p) => p,
        }
    }

    /// Textual prefix check on the identifier
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.as_path().to_string_lossy().starts_with(prefix)
    }

    pub fn is_relative(&self) -> bool {
        matches!(self, ResolvedPath::Relative(_))
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_path().display())
    }
}

/// Absolute form of `path` with symlinks followed as far as the path exists.
fn resolve_absolute(path: &Path, root: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };

    if let Ok(canonical) = fs::canonicalize(&joined) {
        return canonical;
    }

    let normalized = normalize(&joined);
    for ancestor in normalized.ancestors() {
        if let Ok(canonical) = fs::canonicalize(ancestor) {
            return match normalized.strip_prefix(ancestor) {
                Ok(rest) => canonical.join(rest),
                Err(_) => normalized.clone(),
            };
        }
    }
    normalized
}

/// Lexically drop `.` and fold `..` components
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
