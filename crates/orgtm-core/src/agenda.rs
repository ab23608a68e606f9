//! Agenda span: how many days the agenda view covers.

use serde::{Deserialize, Serialize};
use time::{util, Date};
use tracing::warn;

/// Raw `org_agenda_span` value as written in the config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpanSetting {
    Days(u32),
    Named(String),
    // negative, fractional or otherwise unusable; kept so the rest of the config still loads
    Other(serde_json::Value),
}

impl Default for SpanSetting {
    fn default() -> Self {
        SpanSetting::Named("week".into())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgendaSpan {
    Days(u32),
    Month,
    Year,
}

impl AgendaSpan {
    pub const WEEK: AgendaSpan = AgendaSpan::Days(7);

    /// Unknown names and a zero day count fall back to a week.
    pub fn from_setting(setting: &SpanSetting) -> Self {
        match setting {
            SpanSetting::Days(0) => {
                warn!("org_agenda_span must be at least one day, using week");
                Self::WEEK
            }
            SpanSetting::Days(n) => AgendaSpan::Days(*n),
            SpanSetting::Named(name) => match name.as_str() {
                "day" => AgendaSpan::Days(1),
                "week" => Self::WEEK,
                "month" => AgendaSpan::Month,
                "year" => AgendaSpan::Year,
                other => {
                    warn!(span = other, "invalid org_agenda_span, valid values are day/week/month/year or a number; using week");
                    Self::WEEK
                }
            },
            SpanSetting::Other(value) => {
                warn!(span = %value, "invalid org_agenda_span, using week");
                Self::WEEK
            }
        }
    }

    /// Days covered when the agenda starts at `start`.
    pub fn days_from(&self, start: Date) -> u32 {
        match self {
            AgendaSpan::Days(n) => *n,
            AgendaSpan::Month => u32::from(util::days_in_year_month(start.year(), start.month())),
            AgendaSpan::Year => u32::from(util::days_in_year(start.year())),
        }
    }
}
