//! Filesystem primitives used by every other module.
//!
//! Reads are forgiving (a missing file is `None`, not an error). Writes create
//! their parent directories first. None of the read-modify-write helpers lock:
//! concurrent hook invocations against the same file are last-writer-wins.

use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use fs_err as fs;
use regex::Regex;
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::error::{HookkitError, Result};

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Creates `dir` and all missing parents. Succeeds if it already exists.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| HookkitError::io("creating directory", e))
}

/// Reads a UTF-8 file, returning `None` when it is missing or unreadable.
pub fn read_file(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

/// Writes `content`, replacing the file and creating parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, content).map_err(|e| HookkitError::io("writing file", e))
}

/// Writes `content` through a temp file in the same directory, then renames
/// it over `path`. Readers never observe a half-written file.
pub fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = ensure_parent(path)?;
    let mut temp_file =
        NamedTempFile::new_in(&parent).map_err(|e| HookkitError::io("creating temp file", e))?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| HookkitError::io("writing temp file", e))?;
    temp_file
        .flush()
        .map_err(|e| HookkitError::io("flushing temp file", e))?;
    temp_file
        .persist(path)
        .map_err(|e| HookkitError::Persist {
            path: path.to_path_buf(),
            source: e.error,
        })?;
    Ok(())
}

/// Appends `content`, creating the file and its parent directories.
pub fn append_file(path: &Path, content: &str) -> Result<()> {
    ensure_parent(path)?;
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| HookkitError::io("opening file for append", e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| HookkitError::io("appending to file", e))
}

/// Replaces the first match of `pattern` in the file.
///
/// Returns `Ok(false)` if the file does not exist. Any other read failure,
/// including content that is not UTF-8, is an error and the file is left as is.
pub fn replace_in_file(path: &Path, pattern: &Regex, replacement: &str) -> Result<bool> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(HookkitError::io("reading file for replace", e)),
    };
    let updated = pattern.replacen(&content, 1, regex::NoExpand(replacement));
    write_file(path, &updated)?;
    Ok(true)
}

/// Byte-level [`replace_in_file`]. Bytes outside the match are written back
/// unchanged whatever their encoding.
pub fn replace_bytes_in_file(
    path: &Path,
    pattern: &regex::bytes::Regex,
    replacement: &[u8],
) -> Result<bool> {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(HookkitError::io("reading file for replace", e)),
    };
    let updated = pattern.replacen(&content, 1, regex::bytes::NoExpand(replacement));
    fs::write(path, &*updated).map_err(|e| HookkitError::io("writing file", e))?;
    Ok(true)
}

/// Counts non-overlapping matches of `pattern` in the file (0 when absent).
pub fn count_in_file(path: &Path, pattern: &Regex) -> usize {
    read_file(path)
        .map(|content| pattern.find_iter(&content).count())
        .unwrap_or(0)
}

/// Returns `(line_number, line)` for every matching line, 1-based.
pub fn grep_file(path: &Path, pattern: &Regex) -> Vec<(usize, String)> {
    let Some(content) = read_file(path) else {
        return Vec::new();
    };
    content
        .split('\n')
        .enumerate()
        .filter(|(_, line)| pattern.is_match(line))
        .map(|(idx, line)| (idx + 1, line.to_string()))
        .collect()
}

fn ensure_parent(path: &Path) -> Result<PathBuf> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    ensure_dir(&parent)?;
    Ok(parent)
}

// ═══════════════════════════════════════════════════════════════════════════════
// File Discovery
// ═══════════════════════════════════════════════════════════════════════════════

/// A file found by [`find_files`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMatch {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Options for [`find_files`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FindOptions {
    /// Only include files modified at most this many days ago.
    pub max_age_days: Option<u32>,
    /// Descend into subdirectories.
    pub recursive: bool,
}

impl FindOptions {
    pub fn max_age_days(days: u32) -> Self {
        Self {
            max_age_days: Some(days),
            recursive: false,
        }
    }
}

/// Translates a `*`/`?` glob into an anchored regex. Every other character
/// is matched literally.
pub fn glob_to_regex(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    let mut expr = String::with_capacity(pattern.len() + 8);
    expr.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => expr.push_str(".*"),
            '?' => expr.push('.'),
            other => expr.push_str(&regex::escape(&other.to_string())),
        }
    }
    expr.push('$');
    Regex::new(&expr)
}

/// Finds files in `dir` whose names match `pattern`, newest first.
///
/// A missing directory yields an empty list; unreadable entries are skipped.
pub fn find_files(dir: &Path, pattern: &str, options: FindOptions) -> Vec<FileMatch> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let regex = match glob_to_regex(pattern) {
        Ok(regex) => regex,
        Err(e) => {
            tracing::warn!(pattern, error = %e, "Invalid file pattern");
            return Vec::new();
        }
    };

    let max_age = options
        .max_age_days
        .map(|days| Duration::from_secs(u64::from(days) * SECS_PER_DAY));
    let now = SystemTime::now();
    let max_depth = if options.recursive { usize::MAX } else { 1 };

    let mut results: Vec<FileMatch> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| regex.is_match(&e.file_name().to_string_lossy()))
        .filter_map(|e| {
            let modified = e.metadata().ok()?.modified().ok()?;
            Some(FileMatch {
                path: e.into_path(),
                modified,
            })
        })
        .filter(|m| match max_age {
            // Future mtimes count as age zero.
            Some(limit) => now.duration_since(m.modified).unwrap_or_default() <= limit,
            None => true,
        })
        .collect();

    results.sort_by(|a, b| b.modified.cmp(&a.modified));
    results
}
