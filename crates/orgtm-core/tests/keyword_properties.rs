//! Property-based tests for TODO keyword classification.

use orgtm_core::{KeywordCategory, TodoKeywords};
use proptest::prelude::*;

/// (token as written, value it parses to, uses the NAME(x) form)
fn keyword() -> impl Strategy<Value = (String, String, bool)> {
    let name = "[A-Z][A-Z_]{0,7}";
    prop_oneof![
        name.prop_map(|n| (n.clone(), n, false)),
        (name, "[a-z][a-z0-9@!/]{0,2}").prop_map(|(n, s)| (format!("{n}({s})"), n, true)),
    ]
}

fn tokens(words: &[(String, String, bool)]) -> Vec<String> {
    words.iter().map(|(t, _, _)| t.clone()).collect()
}

fn values(words: &[(String, String, bool)]) -> Vec<String> {
    words.iter().map(|(_, v, _)| v.clone()).collect()
}

proptest! {
    #[test]
    fn without_separator_last_keyword_is_done(words in prop::collection::vec(keyword(), 1..10)) {
        let kw = TodoKeywords::classify(&tokens(&words)).unwrap();
        let vals = values(&words);
        let (last, prefix) = vals.split_last().unwrap();

        prop_assert_eq!(&kw.active, &prefix.to_vec());
        prop_assert_eq!(&kw.done, &vec![last.clone()]);
        prop_assert_eq!(kw.all, vals);
    }

    #[test]
    fn separator_partitions_keywords(
        before in prop::collection::vec(keyword(), 0..6),
        after in prop::collection::vec(keyword(), 0..6),
    ) {
        prop_assume!(!before.is_empty() || !after.is_empty());
        let mut input = tokens(&before);
        input.push("|".to_string());
        input.extend(tokens(&after));

        let kw = TodoKeywords::classify(&input).unwrap();
        let (mut active, mut done) = (values(&before), values(&after));
        if done.is_empty() {
            done.push(active.pop().unwrap());
        }

        prop_assert_eq!(&kw.active, &active);
        prop_assert_eq!(&kw.done, &done);
        let joined: Vec<String> = active.iter().chain(done.iter()).cloned().collect();
        prop_assert_eq!(&kw.all, &joined);
    }

    #[test]
    fn fast_access_flag_tracks_custom_shortcuts(
        words in prop::collection::vec(keyword(), 1..10),
        separator_at in any::<prop::sample::Index>(),
    ) {
        let mut input = tokens(&words);
        input.insert(separator_at.index(input.len() + 1), "|".to_string());

        let kw = TodoKeywords::classify(&input).unwrap();
        prop_assert_eq!(kw.has_fast_access, words.iter().any(|(_, _, custom)| *custom));
        prop_assert_eq!(kw.fast_access.len(), words.len());
        prop_assert!(!kw.done.is_empty());

        // categories in fast access agree with the active/done split
        for entry in &kw.fast_access {
            let expected = if kw.done.contains(&entry.value) && !kw.active.contains(&entry.value) {
                KeywordCategory::Done
            } else if kw.active.contains(&entry.value) && !kw.done.contains(&entry.value) {
                KeywordCategory::Active
            } else {
                // same name on both sides; nothing to compare against
                continue;
            };
            prop_assert_eq!(entry.category, expected);
        }
    }
}
