//! `@path` references in a message.

use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

fn file_ref_pattern() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(r"(?:^|\s)@(\S+)").expect("file reference regex must compile")
    })
}

fn repeated_spaces() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(r" {2,}").expect("space run regex must compile")
    })
}

/// Resolves `@path` tokens against the current directory.
#[must_use]
pub fn extract_file_refs(message: &str) -> (String, Vec<PathBuf>) {
    match std::env::current_dir() {
        Ok(cwd) => extract_file_refs_in(message, &cwd),
        Err(_) => (message.to_string(), Vec::new()),
    }
}

/// Finds `@<non-whitespace>` tokens at the start of the message or after
/// whitespace. Tokens naming an existing path (relative to `base`) are
/// removed and returned as absolute paths in message order; all others, such
/// as e-mail addresses, stay in the text.
///
/// When nothing resolves the message is returned unchanged.
#[must_use]
pub fn extract_file_refs_in(message: &str, base: &Path) -> (String, Vec<PathBuf>) {
    let mut paths = Vec::new();
    let mut removals = Vec::new();

    for captures in file_ref_pattern().captures_iter(message) {
        let Some(candidate) = captures.get(1) else {
            continue;
        };
        let resolved = absolutize(base, Path::new(candidate.as_str()));
        if resolved.exists() {
            paths.push(resolved);
            // The removed span starts at '@', leaving the preceding whitespace.
            removals.push((candidate.start() - 1, candidate.end()));
        }
    }

    if removals.is_empty() {
        return (message.to_string(), Vec::new());
    }

    let mut fragments = Vec::with_capacity(removals.len() + 1);
    let mut previous = 0;
    for (start, end) in removals {
        fragments.push(&message[previous..start]);
        previous = end;
    }
    fragments.push(&message[previous..]);

    let joined = fragments.join(" ");
    let cleaned = repeated_spaces().replace_all(joined.trim(), " ").into_owned();
    (cleaned, paths)
}

/// Joins `path` onto `base` and normalizes `.` and `..` without touching the
/// filesystem, so symlinks are not followed.
fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
