use serde::Serialize;

use crate::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityKind {
    Highest,
    Default,
    Lowest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Priorities {
    pub highest: char,
    pub default: char,
    pub lowest: char,
}

fn letter(option: &str, value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_uppercase()),
        _ => Err(ConfigError::InvalidPriority {
            option: option.to_string(),
            value: value.to_string(),
        }),
    }
}

impl Priorities {
    pub fn new(highest: &str, default: &str, lowest: &str) -> Result<Self, ConfigError> {
        let p = Self {
            highest: letter("org_priority_highest", highest)?,
            default: letter("org_priority_default", default)?,
            lowest: letter("org_priority_lowest", lowest)?,
        };
        if !(p.highest <= p.default && p.default <= p.lowest) {
            return Err(ConfigError::invalid(
                "org_priority_default",
                format!(
                    "expected {} <= {} <= {}",
                    p.highest, p.default, p.lowest
                ),
            ));
        }
        Ok(p)
    }

    pub fn kind_of(&self, c: char) -> Option<PriorityKind> {
        let c = c.to_ascii_uppercase();
        if c == self.highest {
            Some(PriorityKind::Highest)
        } else if c == self.default {
            Some(PriorityKind::Default)
        } else if c == self.lowest {
            Some(PriorityKind::Lowest)
        } else {
            None
        }
    }

    /// Every valid priority letter, highest first.
    pub fn range(&self) -> Vec<char> {
        (self.highest..=self.lowest).collect()
    }
}
