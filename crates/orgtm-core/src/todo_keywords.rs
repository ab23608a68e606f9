//! TODO keyword classification.
//!
//! The raw `org_todo_keywords` option is an ordered list such as
//! `["TODO", "NEXT(n)", "|", "DONE(d)"]`. Keywords before the `|` separator are
//! active states, keywords after it are done states.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::ConfigError;

/// Literal token splitting active keywords from done keywords.
pub const SEPARATOR: &str = "|";

// NAME(x...) at the end of the token; only the first char inside the parens counts.
static SHORTCUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)\((.)[^)]*\)$").expect("shortcut pattern"));

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeywordSpec {
    pub value: String,
    pub shortcut: Option<char>,
    pub has_custom_shortcut: bool,
}

impl KeywordSpec {
    pub fn parse(token: &str) -> Self {
        if let Some(caps) = SHORTCUT_RE.captures(token) {
            return Self {
                value: caps[1].to_string(),
                shortcut: caps[2].chars().next(),
                has_custom_shortcut: true,
            };
        }
        Self {
            value: token.to_string(),
            shortcut: token
                .chars()
                .next()
                .and_then(|c| c.to_lowercase().next()),
            has_custom_shortcut: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordCategory {
    Active,
    Done,
}

impl KeywordCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordCategory::Active => "active",
            KeywordCategory::Done => "done",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FastAccessEntry {
    pub value: String,
    pub category: KeywordCategory,
    pub shortcut: Option<char>,
}

/// Classified view of the configured TODO keywords.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TodoKeywords {
    pub active: Vec<String>,
    pub done: Vec<String>,
    /// `active` followed by `done`.
    pub all: Vec<String>,
    pub fast_access: Vec<FastAccessEntry>,
    pub has_fast_access: bool,
}

impl TodoKeywords {
    /// Partition `tokens` around the separator.
    ///
    /// When nothing follows the separator (or there is none), the last active
    /// keyword becomes the only done keyword, so a terminal state always exists.
    pub fn classify<S: AsRef<str>>(tokens: &[S]) -> Result<Self, ConfigError> {
        let mut out = TodoKeywords::default();
        let mut category = KeywordCategory::Active;

        for token in tokens.iter().map(|t| t.as_ref()) {
            if token == SEPARATOR {
                category = KeywordCategory::Done;
                continue;
            }
            let spec = KeywordSpec::parse(token);
            out.has_fast_access |= spec.has_custom_shortcut;
            match category {
                KeywordCategory::Active => out.active.push(spec.value.clone()),
                KeywordCategory::Done => out.done.push(spec.value.clone()),
            }
            out.fast_access.push(FastAccessEntry {
                value: spec.value,
                category,
                shortcut: spec.shortcut,
            });
        }

        if out.done.is_empty() {
            let last = out.active.pop().ok_or_else(|| {
                ConfigError::invalid("org_todo_keywords", "at least one keyword is required")
            })?;
            // the demoted keyword is the last active entry pushed to fast_access
            if let Some(entry) = out
                .fast_access
                .iter_mut()
                .rev()
                .find(|e| e.category == KeywordCategory::Active)
            {
                entry.category = KeywordCategory::Done;
            }
            out.done.push(last);
        }

        out.all = out.active.iter().chain(out.done.iter()).cloned().collect();
        Ok(out)
    }

    pub fn by_shortcut(&self, c: char) -> Option<&FastAccessEntry> {
        self.fast_access.iter().find(|e| e.shortcut == Some(c))
    }

    pub fn category_of(&self, keyword: &str) -> Option<KeywordCategory> {
        if self.active.iter().any(|k| k == keyword) {
            Some(KeywordCategory::Active)
        } else if self.done.iter().any(|k| k == keyword) {
            Some(KeywordCategory::Done)
        } else {
            None
        }
    }

    pub fn is_done(&self, keyword: &str) -> bool {
        self.category_of(keyword) == Some(KeywordCategory::Done)
    }

    /// Step through `all`, passing through "no keyword" at both ends.
    /// An unknown `current` is treated like no keyword.
    pub fn cycle(&self, current: Option<&str>, direction: i8) -> Option<&str> {
        let pos = current.and_then(|c| self.all.iter().position(|k| k == c));
        let next = if direction >= 0 {
            match pos {
                None => Some(0),
                Some(i) if i + 1 < self.all.len() => Some(i + 1),
                Some(_) => None,
            }
        } else {
            match pos {
                None => self.all.len().checked_sub(1),
                Some(0) => None,
                Some(i) => Some(i - 1),
            }
        };
        next.map(|i| self.all[i].as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(tokens: &[&str]) -> TodoKeywords {
        TodoKeywords::classify(tokens).unwrap()
    }

    #[test]
    fn parse_custom_shortcut() {
        assert_eq!(
            KeywordSpec::parse("WAITING(w)"),
            KeywordSpec {
                value: "WAITING".into(),
                shortcut: Some('w'),
                has_custom_shortcut: true
            }
        );
    }

    #[test]
    fn parse_default_shortcut_is_lowercase_first_char() {
        assert_eq!(
            KeywordSpec::parse("TODO"),
            KeywordSpec {
                value: "TODO".into(),
                shortcut: Some('t'),
                has_custom_shortcut: false
            }
        );
    }

    #[test]
    fn parse_ignores_tail_inside_parens() {
        let spec = KeywordSpec::parse("A(a1)");
        assert_eq!(spec.value, "A");
        assert_eq!(spec.shortcut, Some('a'));
        assert!(spec.has_custom_shortcut);

        let spec = KeywordSpec::parse("WAIT(w@/!)");
        assert_eq!(spec.value, "WAIT");
        assert_eq!(spec.shortcut, Some('w'));
    }

    #[test]
    fn parse_malformed_falls_back() {
        let spec = KeywordSpec::parse("HOLD(");
        assert_eq!(spec.value, "HOLD(");
        assert_eq!(spec.shortcut, Some('h'));
        assert!(!spec.has_custom_shortcut);

        let spec = KeywordSpec::parse("NOPE()");
        assert_eq!(spec.value, "NOPE()");
        assert!(!spec.has_custom_shortcut);
    }

    #[test]
    fn parse_empty_token() {
        let spec = KeywordSpec::parse("");
        assert_eq!(spec.value, "");
        assert_eq!(spec.shortcut, None);
        assert!(!spec.has_custom_shortcut);
    }

    #[test]
    fn separator_splits_active_and_done() {
        let kw = classify(&["TODO", "NEXT", "|", "DONE"]);
        assert_eq!(kw.active, ["TODO", "NEXT"]);
        assert_eq!(kw.done, ["DONE"]);
        assert_eq!(kw.all, ["TODO", "NEXT", "DONE"]);
        let shortcuts: Vec<_> = kw.fast_access.iter().map(|e| e.shortcut).collect();
        assert_eq!(shortcuts, [Some('t'), Some('n'), Some('d')]);
        assert!(!kw.has_fast_access);
    }

    #[test]
    fn missing_separator_demotes_last_keyword() {
        let kw = classify(&["TODO", "DONE"]);
        assert_eq!(kw.active, ["TODO"]);
        assert_eq!(kw.done, ["DONE"]);
        assert_eq!(kw.fast_access[1].category, KeywordCategory::Done);
    }

    #[test]
    fn empty_done_side_demotes_last_active() {
        let kw = classify(&["TODO", "NEXT", "|"]);
        assert_eq!(kw.active, ["TODO"]);
        assert_eq!(kw.done, ["NEXT"]);
        assert_eq!(kw.all, ["TODO", "NEXT"]);
    }

    #[test]
    fn single_keyword_becomes_done() {
        let kw = classify(&["A(a1)"]);
        assert!(kw.active.is_empty());
        assert_eq!(kw.done, ["A"]);
        assert!(kw.has_fast_access);
    }

    #[test]
    fn multiple_done_keywords_keep_order() {
        let kw = classify(&["TODO(t)", "|", "DONE(d)", "CANCELLED(c)"]);
        assert_eq!(kw.active, ["TODO"]);
        assert_eq!(kw.done, ["DONE", "CANCELLED"]);
        assert!(kw.has_fast_access);
        assert_eq!(kw.by_shortcut('c').map(|e| e.value.as_str()), Some("CANCELLED"));
        assert_eq!(kw.by_shortcut('x'), None);
    }

    #[test]
    fn empty_list_is_rejected() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            TodoKeywords::classify(&empty),
            Err(ConfigError::InvalidConfiguration { .. })
        ));
        assert!(TodoKeywords::classify(&["|"]).is_err());
    }

    #[test]
    fn category_lookup() {
        let kw = classify(&["TODO", "NEXT", "|", "DONE"]);
        assert_eq!(kw.category_of("NEXT"), Some(KeywordCategory::Active));
        assert!(kw.is_done("DONE"));
        assert!(!kw.is_done("TODO"));
        assert_eq!(kw.category_of("WAITING"), None);
    }

    #[test]
    fn cycle_forward_and_back() {
        let kw = classify(&["TODO", "NEXT", "|", "DONE"]);
        assert_eq!(kw.cycle(None, 1), Some("TODO"));
        assert_eq!(kw.cycle(Some("TODO"), 1), Some("NEXT"));
        assert_eq!(kw.cycle(Some("DONE"), 1), None);
        assert_eq!(kw.cycle(None, -1), Some("DONE"));
        assert_eq!(kw.cycle(Some("TODO"), -1), None);
        assert_eq!(kw.cycle(Some("BOGUS"), 1), Some("TODO"));
    }
}
