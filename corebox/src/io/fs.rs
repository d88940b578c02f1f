//! Small filesystem helpers: text load/save, init-if-missing, mkdir, ls and
//! glob expansion.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use tracing::debug;

use crate::error::CoreboxError;

/// Filters for [`ls`]. At most one may be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub only_dir: bool,
    pub only_file: bool,
}

impl ListOptions {
    pub fn validate(&self) -> Result<(), CoreboxError> {
        if self.only_dir && self.only_file {
            return Err(CoreboxError::ConflictingOptions {
                first: "only_dir",
                second: "only_file",
            });
        }
        Ok(())
    }
}

/// Read a UTF-8 text file.
pub fn load(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

/// Write a UTF-8 text file, creating parent directories as needed.
pub fn save(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        mkdir(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}

/// Write `make_contents()` to `path` only if nothing exists there yet.
///
/// Returns `true` when the file was created.
pub fn init_file<F>(path: &Path, make_contents: F) -> Result<bool>
where
    F: FnOnce() -> String,
{
    if path.exists() {
        debug!(path = %path.display(), "file exists, skipping init");
        return Ok(false);
    }
    save(path, &make_contents())?;
    Ok(true)
}

/// Create `path` and all missing parents.
pub fn mkdir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("create directory {}", path.display()))
}

/// File name of `path`, with or without its extension.
pub fn path_base(path: &Path, with_extension: bool) -> Option<String> {
    let base = if with_extension {
        path.file_name()
    } else {
        path.file_stem()
    };
    base.map(|name| name.to_string_lossy().into_owned())
}

/// Full paths of the entries in `dir`, sorted, filtered by `options`.
pub fn ls(dir: &Path, options: ListOptions) -> Result<Vec<PathBuf>> {
    options.validate()?;

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read directory {}", dir.display()))? {
        let entry = entry.with_context(|| format!("read entry in {}", dir.display()))?;
        let path = entry.path();
        let is_dir = fs::metadata(&path)
            .with_context(|| format!("stat {}", path.display()))?
            .is_dir();
        let selected = if options.only_dir {
            is_dir
        } else if options.only_file {
            !is_dir
        } else {
            true
        };
        if selected {
            entries.push(path);
        }
    }
    entries.sort();
    Ok(entries)
}

/// Expand glob `patterns` into the matching paths, sorted and deduplicated.
///
/// A pattern starting with `!` removes its matches from the result, whatever
/// its position in the list. Relative patterns resolve against the current
/// directory.
pub fn globify(patterns: &[&str]) -> Result<Vec<PathBuf>> {
    let mut excludes = Vec::new();
    let mut matches = Vec::new();
    for raw in patterns {
        if let Some(negated) = raw.strip_prefix('!') {
            let pattern =
                Pattern::new(negated).with_context(|| format!("invalid glob pattern {raw}"))?;
            excludes.push(pattern);
            continue;
        }
        let paths = glob::glob(raw).with_context(|| format!("invalid glob pattern {raw}"))?;
        for path in paths {
            matches.push(path.with_context(|| format!("expand {raw}"))?);
        }
    }
    matches.retain(|path| !excludes.iter().any(|pattern| pattern.matches_path(path)));
    matches.sort();
    matches.dedup();
    debug!(patterns = ?patterns, matched = matches.len(), "globify");
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated_dir() -> tempfile::TempDir {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::create_dir(temp.path().join("sub")).expect("mkdir");
        fs::write(temp.path().join("b.txt"), "b").expect("write");
        fs::write(temp.path().join("a.txt"), "a").expect("write");
        temp
    }

    #[test]
    fn save_then_load_round_trips_and_creates_parents() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("deep").join("dir").join("file.txt");
        save(&path, "fake file content").expect("save");
        assert_eq!(load(&path).expect("load"), "fake file content");
    }

    #[test]
    fn load_missing_file_reports_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = load(&temp.path().join("missing.txt")).expect_err("missing");
        assert!(format!("{err:#}").contains("missing.txt"));
    }

    #[test]
    fn init_file_only_writes_once() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("init.txt");

        assert!(init_file(&path, || "first".to_string()).expect("init"));
        assert!(!init_file(&path, || "second".to_string()).expect("init"));
        assert_eq!(load(&path).expect("load"), "first");
    }

    #[test]
    fn mkdir_is_recursive_and_idempotent() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("a").join("b");
        mkdir(&path).expect("mkdir");
        mkdir(&path).expect("mkdir again");
        assert!(path.is_dir());
    }

    #[test]
    fn path_base_with_and_without_extension() {
        assert_eq!(path_base(Path::new("/dir1/dir2/file.ext"), false).as_deref(), Some("file"));
        assert_eq!(
            path_base(Path::new("/dir1/dir2/file.ext"), true).as_deref(),
            Some("file.ext")
        );
        assert_eq!(path_base(Path::new("/dir1/dir2"), false).as_deref(), Some("dir2"));
        assert_eq!(path_base(Path::new("/"), true), None);
    }

    #[test]
    fn ls_lists_everything_sorted() {
        let temp = populated_dir();
        let listed = ls(temp.path(), ListOptions::default()).expect("ls");
        assert_eq!(
            listed,
            vec![
                temp.path().join("a.txt"),
                temp.path().join("b.txt"),
                temp.path().join("sub"),
            ]
        );
    }

    #[test]
    fn ls_filters_dirs_or_files() {
        let temp = populated_dir();
        let dirs = ls(
            temp.path(),
            ListOptions {
                only_dir: true,
                only_file: false,
            },
        )
        .expect("ls");
        assert_eq!(dirs, vec![temp.path().join("sub")]);

        let files = ls(
            temp.path(),
            ListOptions {
                only_dir: false,
                only_file: true,
            },
        )
        .expect("ls");
        assert_eq!(files, vec![temp.path().join("a.txt"), temp.path().join("b.txt")]);
    }

    fn pattern(temp: &tempfile::TempDir, tail: &str) -> String {
        let root = Pattern::escape(&temp.path().display().to_string());
        format!("{root}/{tail}")
    }

    #[test]
    fn globify_expands_sorted_and_deduplicated() {
        let temp = populated_dir();
        fs::write(temp.path().join("sub").join("c.txt"), "c").expect("write");

        let all_txt = pattern(&temp, "**/*.txt");
        let top_a = pattern(&temp, "a.*");
        let matched = globify(&[all_txt.as_str(), top_a.as_str()]).expect("globify");
        assert_eq!(
            matched,
            vec![
                temp.path().join("a.txt"),
                temp.path().join("b.txt"),
                temp.path().join("sub").join("c.txt"),
            ]
        );
    }

    #[test]
    fn globify_negated_patterns_exclude() {
        let temp = populated_dir();
        let all = pattern(&temp, "*");
        let not_b = format!("!{}", pattern(&temp, "b.*"));
        let matched = globify(&[not_b.as_str(), all.as_str()]).expect("globify");
        assert_eq!(matched, vec![temp.path().join("a.txt"), temp.path().join("sub")]);
    }

    #[test]
    fn globify_rejects_malformed_pattern() {
        let err = globify(&["[unclosed"]).expect_err("bad pattern");
        assert!(err.to_string().contains("invalid glob pattern [unclosed"));
    }

    #[test]
    fn globify_without_matches_is_empty() {
        let temp = tempfile::tempdir().expect("tempdir");
        let none = pattern(&temp, "*.json");
        assert!(globify(&[none.as_str()]).expect("globify").is_empty());
    }

    /// Conflicting filters fail before the directory is read.
    #[test]
    fn ls_rejects_both_filters() {
        let options = ListOptions {
            only_dir: true,
            only_file: true,
        };
        let err = ls(Path::new("/definitely/not/here"), options).expect_err("conflict");
        assert!(
            err.to_string()
                .contains("only_dir and only_file options can not be set together")
        );
        assert!(matches!(
            err.downcast_ref::<CoreboxError>(),
            Some(CoreboxError::ConflictingOptions { .. })
        ));
    }
}
