//! Org-style task configuration: defaults, user overlay, and derived values

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Result;
use parking_lot::RwLock;
use tracing::debug;

pub mod error;
pub use error::ConfigError;

// ACTIONS
pub mod actions;
pub use actions::{Action, MappingCategory};

// Keymap Configs
pub mod keymap;
pub use keymap::{Binding, BindingSink, KeySpec, Keymap, Mappings};

pub mod options;
pub use options::{CaptureTemplate, Options, UserOptions};

pub mod todo_keywords;
pub use todo_keywords::{FastAccessEntry, KeywordCategory, KeywordSpec, TodoKeywords};

pub mod agenda;
pub use agenda::{AgendaSpan, SpanSetting};

pub mod archive;
pub use archive::ArchiveLocation;

pub mod priorities;
pub use priorities::{Priorities, PriorityKind};

pub mod loader;
pub use loader::{default_config_path, load_config_from_file, load_config_from_user};

/// Resolved options plus the lazily derived keyword classification.
#[derive(Debug)]
pub struct Config {
    opts: Options,
    // cleared whenever `opts` is replaced; readers hold their own snapshot
    todo_keywords: RwLock<Option<Arc<TodoKeywords>>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_options(Options::default())
    }
}

impl Config {
    pub fn new(user: UserOptions) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        cfg.extend(user)?;
        Ok(cfg)
    }

    fn from_options(opts: Options) -> Self {
        Self {
            opts,
            todo_keywords: RwLock::new(None),
        }
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Overlay more user options. Nothing changes if the result is invalid.
    pub fn extend(&mut self, user: UserOptions) -> Result<&mut Self, ConfigError> {
        let mut opts = self.opts.clone();
        opts.overlay(user);
        validate(&opts)?;
        self.opts = opts;
        *self.todo_keywords.get_mut() = None;
        Ok(self)
    }

    pub fn todo_keywords(&self) -> Result<Arc<TodoKeywords>, ConfigError> {
        if let Some(kw) = self.todo_keywords.read().as_ref() {
            return Ok(Arc::clone(kw));
        }
        let mut slot = self.todo_keywords.write();
        // another reader may have filled it while we waited
        if let Some(kw) = slot.as_ref() {
            return Ok(Arc::clone(kw));
        }
        debug!(keywords = ?self.opts.org_todo_keywords, "classifying todo keywords");
        let kw = Arc::new(TodoKeywords::classify(&self.opts.org_todo_keywords)?);
        *slot = Some(Arc::clone(&kw));
        Ok(kw)
    }

    pub fn agenda_span(&self) -> AgendaSpan {
        AgendaSpan::from_setting(&self.opts.org_agenda_span)
    }

    pub fn archive_location(&self, location: Option<&str>) -> ArchiveLocation {
        ArchiveLocation::parse(location.unwrap_or(&self.opts.org_archive_location))
    }

    /// Archive file for `file`, using `location` instead of the configured one when given.
    pub fn archive_file(&self, file: &Path, location: Option<&str>) -> Result<PathBuf> {
        self.archive_location(location).resolve(file)
    }

    /// Tags a child heading inherits from a heading carrying `tags`.
    pub fn inheritable_tags<S: AsRef<str>>(&self, tags: &[S]) -> Vec<String> {
        if !self.opts.org_use_tag_inheritance {
            return vec![];
        }
        let excluded = &self.opts.org_tags_exclude_from_inheritance;
        tags.iter()
            .map(|t| t.as_ref())
            .filter(|t| !excluded.iter().any(|e| e == *t))
            .map(str::to_string)
            .collect()
    }

    pub fn priorities(&self) -> Result<Priorities, ConfigError> {
        Priorities::new(
            &self.opts.org_priority_highest,
            &self.opts.org_priority_default,
            &self.opts.org_priority_lowest,
        )
    }

    pub fn bindings(&self, category: MappingCategory) -> Vec<Binding> {
        self.opts.mappings.bindings(category)
    }

    /// Register every binding of `category` with the host.
    pub fn setup_mappings(&self, category: MappingCategory, sink: &mut dyn BindingSink) -> Result<usize> {
        let bindings = self.bindings(category);
        for b in &bindings {
            sink.bind(b)?;
        }
        debug!(category = %category, count = bindings.len(), "mappings registered");
        Ok(bindings.len())
    }

    /// Keymap with every category registered.
    pub fn keymap(&self) -> Result<Keymap> {
        let mut km = Keymap::default();
        for category in MappingCategory::ALL {
            self.setup_mappings(category, &mut km)?;
        }
        Ok(km)
    }
}

fn validate(opts: &Options) -> Result<(), ConfigError> {
    if !opts
        .org_todo_keywords
        .iter()
        .any(|k| k != todo_keywords::SEPARATOR)
    {
        return Err(ConfigError::invalid(
            "org_todo_keywords",
            "at least one keyword is required",
        ));
    }
    Priorities::new(
        &opts.org_priority_highest,
        &opts.org_priority_default,
        &opts.org_priority_lowest,
    )?;
    Ok(())
}
