//! Option model: built-in defaults plus the partial set a user config supplies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{agenda::SpanSetting, keymap::UserMappings, Mappings};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureTemplate {
    pub description: String,
    pub template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Options {
    pub org_agenda_files: Vec<String>,
    pub org_default_notes_file: String,
    pub org_todo_keywords: Vec<String>,
    pub org_deadline_warning_days: u32,
    pub org_agenda_span: SpanSetting,
    pub org_agenda_start_on_weekday: u8,
    pub org_priority_highest: String,
    pub org_priority_default: String,
    pub org_priority_lowest: String,
    pub org_archive_location: String,
    pub org_use_tag_inheritance: bool,
    pub org_tags_exclude_from_inheritance: Vec<String>,
    pub org_hide_leading_stars: bool,
    pub org_log_done: String,
    pub org_capture_templates: BTreeMap<String, CaptureTemplate>,
    pub mappings: Mappings,
}

impl Default for Options {
    fn default() -> Self {
        let mut templates = BTreeMap::new();
        templates.insert(
            "t".to_string(),
            CaptureTemplate {
                description: "Task".into(),
                template: "* TODO %?\n  %u".into(),
                target: None,
            },
        );
        Self {
            org_agenda_files: vec![],
            org_default_notes_file: String::new(),
            org_todo_keywords: vec!["TODO".into(), "NEXT".into(), "|".into(), "DONE".into()],
            org_deadline_warning_days: 14,
            org_agenda_span: SpanSetting::default(),
            org_agenda_start_on_weekday: 1,
            org_priority_highest: "A".into(),
            org_priority_default: "B".into(),
            org_priority_lowest: "C".into(),
            org_archive_location: "%s_archive::".into(),
            org_use_tag_inheritance: true,
            org_tags_exclude_from_inheritance: vec![],
            org_hide_leading_stars: false,
            org_log_done: "time".into(),
            org_capture_templates: templates,
            mappings: Mappings::default(),
        }
    }
}

/// Every field optional; unknown keys are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UserOptions {
    pub org_agenda_files: Option<AgendaFiles>,
    pub org_default_notes_file: Option<String>,
    pub org_todo_keywords: Option<Vec<String>>,
    pub org_deadline_warning_days: Option<u32>,
    pub org_agenda_span: Option<SpanSetting>,
    pub org_agenda_start_on_weekday: Option<u8>,
    pub org_priority_highest: Option<String>,
    pub org_priority_default: Option<String>,
    pub org_priority_lowest: Option<String>,
    pub org_archive_location: Option<String>,
    pub org_use_tag_inheritance: Option<bool>,
    pub org_tags_exclude_from_inheritance: Option<Vec<String>>,
    pub org_hide_leading_stars: Option<bool>,
    pub org_log_done: Option<String>,
    pub org_capture_templates: Option<BTreeMap<String, CaptureTemplate>>,
    pub mappings: Option<UserMappings>,
}

/// `org_agenda_files` accepts a single pattern or a list of them.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AgendaFiles {
    One(String),
    Many(Vec<String>),
}

impl From<AgendaFiles> for Vec<String> {
    fn from(files: AgendaFiles) -> Self {
        match files {
            AgendaFiles::One(s) if s.is_empty() => vec![],
            AgendaFiles::One(s) => vec![s],
            AgendaFiles::Many(v) => v,
        }
    }
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl Options {
    /// Apply user options on top: scalars and lists replace,
    /// capture templates and mappings merge per key.
    pub fn overlay(&mut self, user: UserOptions) {
        set(&mut self.org_agenda_files, user.org_agenda_files.map(Into::into));
        set(&mut self.org_default_notes_file, user.org_default_notes_file);
        set(&mut self.org_todo_keywords, user.org_todo_keywords);
        set(&mut self.org_deadline_warning_days, user.org_deadline_warning_days);
        set(&mut self.org_agenda_span, user.org_agenda_span);
        set(&mut self.org_agenda_start_on_weekday, user.org_agenda_start_on_weekday);
        set(&mut self.org_priority_highest, user.org_priority_highest);
        set(&mut self.org_priority_default, user.org_priority_default);
        set(&mut self.org_priority_lowest, user.org_priority_lowest);
        set(&mut self.org_archive_location, user.org_archive_location);
        set(&mut self.org_use_tag_inheritance, user.org_use_tag_inheritance);
        set(
            &mut self.org_tags_exclude_from_inheritance,
            user.org_tags_exclude_from_inheritance,
        );
        set(&mut self.org_hide_leading_stars, user.org_hide_leading_stars);
        set(&mut self.org_log_done, user.org_log_done);
        if let Some(templates) = user.org_capture_templates {
            self.org_capture_templates.extend(templates);
        }
        if let Some(m) = user.mappings {
            self.mappings.overlay(m);
        }
    }
}
