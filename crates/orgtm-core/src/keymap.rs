use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{Action, MappingCategory};

/// Keys bound to one action: a single key, several keys, or `false` to unbind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawKeySpec", into = "RawKeySpec")]
pub enum KeySpec {
    Keys(Vec<String>),
    Disabled,
}

impl KeySpec {
    pub fn keys(&self) -> &[String] {
        match self {
            KeySpec::Keys(k) => k,
            KeySpec::Disabled => &[],
        }
    }
}

impl From<&str> for KeySpec {
    fn from(key: &str) -> Self {
        KeySpec::Keys(vec![key.to_string()])
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RawKeySpec {
    Flag(bool),
    One(String),
    Many(Vec<String>),
}

impl From<RawKeySpec> for KeySpec {
    fn from(raw: RawKeySpec) -> Self {
        match raw {
            // `true` carries no key to bind, so it behaves like `false`
            RawKeySpec::Flag(_) => KeySpec::Disabled,
            RawKeySpec::One(k) => KeySpec::Keys(vec![k]),
            RawKeySpec::Many(k) => KeySpec::Keys(k),
        }
    }
}

impl From<KeySpec> for RawKeySpec {
    fn from(spec: KeySpec) -> Self {
        match spec {
            KeySpec::Disabled => RawKeySpec::Flag(false),
            KeySpec::Keys(mut k) if k.len() == 1 => RawKeySpec::One(k.remove(0)),
            KeySpec::Keys(k) => RawKeySpec::Many(k),
        }
    }
}

pub type MappingTable = BTreeMap<String, KeySpec>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Mappings {
    pub disable_all: bool,
    pub global: MappingTable,
    pub agenda: MappingTable,
    pub capture: MappingTable,
    pub org: MappingTable,
}

/// Partial mapping overrides from the user config.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UserMappings {
    pub disable_all: Option<bool>,
    #[serde(default)]
    pub global: MappingTable,
    #[serde(default)]
    pub agenda: MappingTable,
    #[serde(default)]
    pub capture: MappingTable,
    #[serde(default)]
    pub org: MappingTable,
}

impl Mappings {
    pub fn table(&self, category: MappingCategory) -> &MappingTable {
        match category {
            MappingCategory::Global => &self.global,
            MappingCategory::Agenda => &self.agenda,
            MappingCategory::Capture => &self.capture,
            MappingCategory::Org => &self.org,
        }
    }

    /// Per-action overlay: user entries replace or add, untouched defaults stay.
    pub fn overlay(&mut self, user: UserMappings) {
        if let Some(d) = user.disable_all {
            self.disable_all = d;
        }
        self.global.extend(user.global);
        self.agenda.extend(user.agenda);
        self.capture.extend(user.capture);
        self.org.extend(user.org);
    }

    pub fn bindings(&self, category: MappingCategory) -> Vec<Binding> {
        if self.disable_all {
            return vec![];
        }
        self.table(category)
            .iter()
            .flat_map(|(name, spec)| {
                spec.keys().iter().map(move |lhs| Binding {
                    lhs: lhs.clone(),
                    action: Action::new(category, name.clone()),
                })
            })
            .collect()
    }
}

fn table(entries: &[(&str, &str)]) -> MappingTable {
    entries
        .iter()
        .map(|(name, key)| (name.to_string(), KeySpec::from(*key)))
        .collect()
}

/// Built-in defaults
impl Default for Mappings {
    fn default() -> Self {
        let global = table(&[("org_agenda", "<Leader>oa"), ("org_capture", "<Leader>oc")]);

        let mut agenda = table(&[
            ("org_agenda_later", "f"),
            ("org_agenda_earlier", "b"),
            ("org_agenda_goto_today", "."),
            ("org_agenda_day_view", "vd"),
            ("org_agenda_week_view", "vw"),
            ("org_agenda_month_view", "vm"),
            ("org_agenda_year_view", "vy"),
            ("org_agenda_quit", "q"),
            ("org_agenda_switch_to", "<CR>"),
            ("org_agenda_goto_date", "J"),
            ("org_agenda_redo", "r"),
            ("org_agenda_todo", "t"),
            ("org_agenda_clock_in", "I"),
            ("org_agenda_clock_out", "O"),
            ("org_agenda_show_help", "?"),
        ]);
        agenda.insert("org_agenda_goto".into(), KeySpec::Keys(vec!["<TAB>".into()]));

        let capture = table(&[
            ("org_capture_finalize", "<C-c>"),
            ("org_capture_refile", "<Leader>or"),
            ("org_capture_kill", "<Leader>ok"),
            ("org_capture_show_help", "?"),
        ]);

        let org = table(&[
            ("org_refile", "<Leader>or"),
            ("org_timestamp_up", "<C-a>"),
            ("org_timestamp_down", "<C-x>"),
            ("org_change_date", "cid"),
            ("org_todo", "cit"),
            ("org_todo_prev", "ciT"),
            ("org_toggle_checkbox", "<C-Space>"),
            ("org_toggle_heading", "<Leader>o*"),
            ("org_open_at_point", "<Leader>oo"),
            ("org_cycle", "<TAB>"),
            ("org_global_cycle", "<S-TAB>"),
            ("org_archive_subtree", "<Leader>o$"),
            ("org_set_tags_command", "<Leader>ot"),
            ("org_toggle_archive_tag", "<Leader>oA"),
            ("org_do_promote", "<<"),
            ("org_do_demote", ">>"),
            ("org_promote_subtree", "<s"),
            ("org_demote_subtree", ">s"),
            ("org_meta_return", "<Leader><CR>"),
            ("org_insert_todo_heading", "<Leader>oiT"),
            ("org_move_subtree_up", "<Leader>oK"),
            ("org_move_subtree_down", "<Leader>oJ"),
            ("org_next_visible_heading", "}"),
            ("org_previous_visible_heading", "{"),
            ("org_deadline", "<Leader>oid"),
            ("org_schedule", "<Leader>ois"),
            ("org_show_help", "?"),
        ]);

        Mappings {
            disable_all: false,
            global,
            agenda,
            capture,
            org,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub lhs: String,
    pub action: Action,
}

/// Host seam: whatever registers bindings with the editor.
pub trait BindingSink {
    fn bind(&mut self, binding: &Binding) -> Result<()>;
}

/// In-process keymap: per-category token lookup, e.g. "cit" -> org/org_todo.
#[derive(Clone, Debug, Default)]
pub struct Keymap {
    pub categories: HashMap<MappingCategory, HashMap<String, Action>>,
}

impl Keymap {
    pub fn lookup(&self, category: MappingCategory, token: &str) -> Option<&Action> {
        self.categories.get(&category)?.get(token)
    }

    pub fn len(&self) -> usize {
        self.categories.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BindingSink for Keymap {
    fn bind(&mut self, binding: &Binding) -> Result<()> {
        self.categories
            .entry(binding.action.category)
            .or_default()
            .insert(binding.lhs.clone(), binding.action.clone());
        Ok(())
    }
}
