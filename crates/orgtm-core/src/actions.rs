use std::{fmt, str::FromStr};

use anyhow::bail;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingCategory {
    Global,  // editor-wide entry points
    Agenda,  // agenda buffer
    Capture, // capture buffer
    Org,     // org file buffers
}

impl MappingCategory {
    pub const ALL: [MappingCategory; 4] = [
        MappingCategory::Global,
        MappingCategory::Agenda,
        MappingCategory::Capture,
        MappingCategory::Org,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MappingCategory::Global => "global",
            MappingCategory::Agenda => "agenda",
            MappingCategory::Capture => "capture",
            MappingCategory::Org => "org",
        }
    }
}

impl fmt::Display for MappingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MappingCategory {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        Ok(match s {
            "global" => MappingCategory::Global,
            "agenda" => MappingCategory::Agenda,
            "capture" => MappingCategory::Capture,
            "org" => MappingCategory::Org,
            _ => bail!("unknown mapping category '{s}' (use: global|agenda|capture|org)"),
        })
    }
}

/// A named action in one mapping category, e.g. `org/org_todo`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Action {
    pub category: MappingCategory,
    pub name: String,
}

impl Action {
    pub fn new(category: MappingCategory, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
        }
    }

    /// Dispatch target the host invokes when the binding fires.
    pub fn command(&self) -> String {
        match (self.category, self.name.as_str()) {
            (MappingCategory::Global, "org_agenda") => "agenda.prompt".into(),
            (MappingCategory::Global, "org_capture") => "capture.prompt".into(),
            (MappingCategory::Global, name) => format!("global.{name}"),
            (MappingCategory::Agenda, name) => format!("agenda.{name}"),
            (MappingCategory::Capture, name) => format!("capture.{name}"),
            (MappingCategory::Org, name) => format!("org_mappings.{name}"),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.name)
    }
}
