//! Normalization helpers for paths and glob handling.
//!
//! Unit names in the forest must be stable across machines, because the
//! forest order decides the order of the generated text. Paths are therefore
//! made relative to the project root with `/` separators.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Repository-relative path of `p` with `/` separators.
///
/// # Example
/// ```
/// use std::path::Path;
/// use extgen_csharp::normalize::repo_rel_str;
///
/// let rel = repo_rel_str(Path::new("/repo"), Path::new("/repo/src/Util/MathOps.cs"));
/// assert_eq!(rel, "src/Util/MathOps.cs");
/// ```
pub fn repo_rel_str(root: &Path, p: &Path) -> String {
    let rel = p.strip_prefix(root).unwrap_or(p);
    to_unix_sep(rel.to_string_lossy())
}

/// Replace OS-specific separators with `/`.
///
/// # Example
/// ```
/// use extgen_csharp::normalize::to_unix_sep;
///
/// assert_eq!(to_unix_sep(r"src\Util\MathOps.cs"), "src/Util/MathOps.cs");
/// ```
pub fn to_unix_sep<S: AsRef<str>>(s: S) -> String {
    s.as_ref().replace('\\', "/")
}

/// True for `.cs` files (case-insensitive).
pub fn is_csharp(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("cs"))
}

/// Build a [`GlobSet`] from patterns, skipping invalid or empty ones.
///
/// Returns `None` for an empty list or when the set fails to build.
///
/// # Example
/// ```
/// use extgen_csharp::normalize::build_globset;
///
/// let gs = build_globset(&["**/*.g.cs".to_string()]).unwrap();
/// assert!(gs.is_match("Generated/ExtensionMethods.g.cs"));
/// ```
pub fn build_globset(patterns: &[String]) -> Option<GlobSet> {
    if patterns.is_empty() {
        return None;
    }
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        if pat.trim().is_empty() {
            continue;
        }
        if let Ok(g) = Glob::new(pat) {
            builder.add(g);
        }
    }
    builder.build().ok()
}

/// Return `true` if the repository-relative `rel` path matches `set`.
pub fn matches(rel: &str, set: Option<&GlobSet>) -> bool {
    set.is_some_and(|gs| gs.is_match(rel))
}
