use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Serialize;

/// Parsed `org_archive_location`, written as `<file pattern>::<heading>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArchiveLocation {
    pub file: String,
    pub heading: Option<String>,
}

impl ArchiveLocation {
    pub fn parse(raw: &str) -> Self {
        let (file, heading) = match raw.split_once("::") {
            Some((f, h)) => (f, Some(h.trim())),
            None => (raw, None),
        };
        Self {
            file: file.trim().to_string(),
            heading: heading.filter(|h| !h.is_empty()).map(str::to_string),
        }
    }

    /// Archive file for `source`. Every `%s` expands to the source path; a pattern
    /// without it names one shared archive file, with a leading `~` expanded.
    pub fn resolve(&self, source: &Path) -> Result<PathBuf> {
        if self.file.contains("%s") {
            return Ok(PathBuf::from(
                self.file.replace("%s", &source.to_string_lossy()),
            ));
        }
        let path = expand_home(&self.file)?;
        if path.is_absolute() {
            return Ok(path);
        }
        let cwd = std::env::current_dir().context("resolving archive location")?;
        Ok(cwd.join(path))
    }
}

fn expand_home(file: &str) -> Result<PathBuf> {
    let rest = match file.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/'),
        // `~user/...` and plain names are left alone
        _ => return Ok(PathBuf::from(file)),
    };
    let dirs = BaseDirs::new().context("resolving home directory for archive location")?;
    Ok(dirs.home_dir().join(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_location() {
        let loc = ArchiveLocation::parse("%s_archive::");
        assert_eq!(loc.file, "%s_archive");
        assert_eq!(loc.heading, None);
    }

    #[test]
    fn parse_heading_part() {
        let loc = ArchiveLocation::parse(" archive.org :: * Archived");
        assert_eq!(loc.file, "archive.org");
        assert_eq!(loc.heading.as_deref(), Some("* Archived"));
    }

    #[test]
    fn resolve_substitutes_source() {
        let loc = ArchiveLocation::parse("%s_archive::");
        let out = loc.resolve(Path::new("/notes/todo.org")).unwrap();
        assert_eq!(out, PathBuf::from("/notes/todo.org_archive"));
    }

    #[test]
    fn resolve_absolute_pattern() {
        let loc = ArchiveLocation::parse("/srv/archive.org::");
        assert_eq!(
            loc.resolve(Path::new("/notes/todo.org")).unwrap(),
            PathBuf::from("/srv/archive.org")
        );
    }

    #[test]
    fn resolve_expands_home() {
        let home = BaseDirs::new().unwrap().home_dir().to_path_buf();
        let loc = ArchiveLocation::parse("~/org/archive.org::");
        assert_eq!(
            loc.resolve(Path::new("/n/a.org")).unwrap(),
            home.join("org/archive.org")
        );
        assert_eq!(ArchiveLocation::parse("~").resolve(Path::new("/n/a.org")).unwrap(), home);
    }

    #[test]
    fn resolve_keeps_tilde_inside_name() {
        let loc = ArchiveLocation::parse("~backup.org");
        let out = loc.resolve(Path::new("/n/a.org")).unwrap();
        assert!(out.ends_with("~backup.org"));
    }

    #[test]
    fn resolve_substitutes_every_placeholder() {
        let loc = ArchiveLocation::parse("%s.d/%s_archive");
        assert_eq!(
            loc.resolve(Path::new("a.org")).unwrap(),
            PathBuf::from("a.org.d/a.org_archive")
        );
    }

    #[test]
    fn resolve_relative_pattern_against_cwd() {
        let loc = ArchiveLocation::parse("archive.org");
        let out = loc.resolve(Path::new("/notes/todo.org")).unwrap();
        assert!(out.is_absolute());
        assert!(out.ends_with("archive.org"));
    }
}
