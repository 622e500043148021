//! Name Matcher: finds the passage of the profile book most likely to describe a person.
//!
//! Heuristic only: every case-insensitive occurrence of six literal name variants is
//! turned into a context window, each window is scored by its length plus a flat
//! bonus for career keywords, and the best window wins. No stemming, no edit
//! distance, no disambiguation between people who share a name.

use regex::RegexBuilder;
use tracing::{debug, warn};

pub const DEFAULT_BEFORE_CHARS: usize = 500;
pub const DEFAULT_AFTER_CHARS: usize = 1000;
pub const DEFAULT_KEYWORD_BONUS: usize = 200;
pub const DEFAULT_KEYWORDS: [&str; 5] = ["education", "experience", "work", "position", "company"];

/// Tuning knobs for window extraction and scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct MatcherConfig {
    /// Characters kept before an occurrence.
    pub before_chars: usize,
    /// Characters kept after an occurrence.
    pub after_chars: usize,
    pub keyword_bonus: usize,
    pub keywords: Vec<String>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            before_chars: DEFAULT_BEFORE_CHARS,
            after_chars: DEFAULT_AFTER_CHARS,
            keyword_bonus: DEFAULT_KEYWORD_BONUS,
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// The winning context window for one name.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchWindow {
    pub text: String,
    pub score: usize,
    /// The name variant whose occurrence produced this window.
    pub variant: String,
    /// Byte offset of the window start in the document text.
    pub offset: usize,
}

#[derive(Debug, Clone, Default)]
pub struct NameMatcher {
    config: MatcherConfig,
}

impl NameMatcher {
    pub fn new(mut config: MatcherConfig) -> Self {
        for keyword in &mut config.keywords {
            *keyword = keyword.to_lowercase();
        }
        Self { config }
    }

    /// `First Last`, `FIRST LAST`, `Last, First`, `LAST, FIRST`, `First`, `Last`.
    ///
    /// Blank names drop out: a combined variant needs both parts and a bare variant
    /// needs its own part, otherwise an empty pattern would match everywhere.
    pub fn name_variants(first_name: &str, last_name: &str) -> Vec<String> {
        let first = first_name.trim();
        let last = last_name.trim();
        let mut variants = Vec::with_capacity(6);

        if !first.is_empty() && !last.is_empty() {
            variants.push(format!("{first} {last}"));
            variants.push(format!("{} {}", first.to_uppercase(), last.to_uppercase()));
            variants.push(format!("{last}, {first}"));
            variants.push(format!("{}, {}", last.to_uppercase(), first.to_uppercase()));
        }
        if !first.is_empty() {
            variants.push(first.to_string());
        }
        if !last.is_empty() {
            variants.push(last.to_string());
        }
        variants
    }

    /// Length in characters, plus the bonus when any keyword appears.
    pub fn score_window(&self, window: &str) -> usize {
        let lower = window.to_lowercase();
        let has_keyword = self
            .config
            .keywords
            .iter()
            .any(|k| lower.contains(k.as_str()));
        let bonus = if has_keyword {
            self.config.keyword_bonus
        } else {
            0
        };
        window.chars().count() + bonus
    }

    /// Scores every (variant, occurrence) pair once and keeps the running best.
    /// Ties keep the earlier candidate.
    pub fn find_best_window(
        &self,
        first_name: &str,
        last_name: &str,
        text: &str,
    ) -> Option<MatchWindow> {
        let mut best: Option<MatchWindow> = None;

        for variant in Self::name_variants(first_name, last_name) {
            let escaped = regex::escape(&variant);
            let pattern = match RegexBuilder::new(&escaped).case_insensitive(true).build() {
                Ok(p) => p,
                Err(e) => {
                    warn!("Skipping name variant {variant:?}: {e}");
                    continue;
                }
            };

            for occurrence in pattern.find_iter(text) {
                let start = back_chars(text, occurrence.start(), self.config.before_chars);
                let end = forward_chars(text, occurrence.end(), self.config.after_chars);
                let window = &text[start..end];
                let score = self.score_window(window);

                if best.as_ref().map_or(true, |b| score > b.score) {
                    best = Some(MatchWindow {
                        text: window.to_string(),
                        score,
                        variant: variant.clone(),
                        offset: start,
                    });
                }
            }
        }

        if let Some(b) = &best {
            debug!(
                "Best window for {first_name} {last_name}: variant={:?} score={} offset={}",
                b.variant, b.score, b.offset
            );
        }
        best
    }

    /// The trimmed best window, or a placeholder naming the person when nothing matched.
    pub fn find_person_context(&self, first_name: &str, last_name: &str, text: &str) -> String {
        match self.find_best_window(first_name, last_name, text) {
            Some(window) => window.text.trim().to_string(),
            None => no_match_placeholder(first_name, last_name),
        }
    }
}

pub fn no_match_placeholder(first_name: &str, last_name: &str) -> String {
    format!("No specific profile found for {first_name} {last_name} in the profile book.")
}

/// Byte index `n` characters before `from`, clamped to the start of `text`.
fn back_chars(text: &str, from: usize, n: usize) -> usize {
    if n == 0 {
        return from;
    }
    text[..from]
        .char_indices()
        .rev()
        .nth(n - 1)
        .map_or(0, |(i, _)| i)
}

/// Byte index `n` characters after `from`, clamped to the end of `text`.
fn forward_chars(text: &str, from: usize, n: usize) -> usize {
    text[from..]
        .char_indices()
        .nth(n)
        .map_or(text.len(), |(i, _)| from + i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SCENARIO_TEXT: &str = "JOHN SMITH worked in marketing for Acme Co. Education: MBA.";

    fn matcher() -> NameMatcher {
        NameMatcher::new(MatcherConfig::default())
    }

    #[test]
    fn test_name_variants_order() {
        let expected = [
            "John Smith",
            "JOHN SMITH",
            "Smith, John",
            "SMITH, JOHN",
            "John",
            "Smith",
        ];
        assert_eq!(NameMatcher::name_variants("John", "Smith"), expected);
    }

    #[test]
    fn test_name_variants_skip_blank_parts() {
        assert_eq!(NameMatcher::name_variants("", "Smith"), vec!["Smith"]);
        assert_eq!(NameMatcher::name_variants("John", "  "), vec!["John"]);
        assert!(NameMatcher::name_variants("", "").is_empty());
    }

    #[test]
    fn test_scenario_window_gets_keyword_bonus() {
        let window = matcher()
            .find_best_window("John", "Smith", SCENARIO_TEXT)
            .expect("name is present");

        assert!(window.text.contains("Education"));
        assert!(window.text.contains("marketing"));
        assert_eq!(window.text, SCENARIO_TEXT);
        assert_eq!(window.score, SCENARIO_TEXT.chars().count() + 200);
        assert_eq!(window.variant, "John Smith");
        assert_eq!(window.offset, 0);
    }

    #[test]
    fn test_window_clips_to_configured_sizes() {
        let text = format!("{}Ada Lovelace{}", "a".repeat(20), "b".repeat(20));
        let m = NameMatcher::new(MatcherConfig {
            before_chars: 5,
            after_chars: 7,
            ..MatcherConfig::default()
        });

        let window = m.find_best_window("Ada", "Lovelace", &text).unwrap();
        assert_eq!(window.text, "aaaaaAda Lovelacebbbbbbb");
        assert_eq!(window.offset, 15);
    }

    #[test]
    fn test_window_counts_characters_not_bytes() {
        let text = "ééééé Zoë Ørsted ñññññ";
        let m = NameMatcher::new(MatcherConfig {
            before_chars: 3,
            after_chars: 3,
            ..MatcherConfig::default()
        });

        let window = m.find_best_window("Zoë", "Ørsted", text).unwrap();
        assert_eq!(window.text, "éé Zoë Ørsted ññ");
        assert_eq!(window.score, window.text.chars().count());
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let text = "profile of jane doe, company founder";
        let window = matcher().find_best_window("Jane", "Doe", text).unwrap();
        assert_eq!(window.text, text);
        assert_eq!(window.score, text.chars().count() + 200);
    }

    #[test]
    fn test_keyword_window_beats_longer_plain_window() {
        let m = NameMatcher::new(MatcherConfig {
            before_chars: 10,
            after_chars: 20,
            ..MatcherConfig::default()
        });
        let text = format!("Doe {}{}Doe company", "x".repeat(40), "-".repeat(50));

        let plain = m.find_best_window("", "Doe", &text[..44]).unwrap();
        let window = m.find_best_window("", "Doe", &text).unwrap();
        assert_eq!(plain.score, 23);
        assert_eq!(window.text, format!("{}Doe company", "-".repeat(10)));
        assert_eq!(window.score, 21 + 200);
    }

    #[test]
    fn test_ties_keep_first_seen() {
        let m = NameMatcher::new(MatcherConfig {
            before_chars: 0,
            after_chars: 0,
            ..MatcherConfig::default()
        });
        let text = "Ann Lee and Lee Ann";
        let window = m.find_best_window("Ann", "Lee", text).unwrap();
        assert_eq!(window.variant, "Ann Lee");
        assert_eq!(window.offset, 0);
    }

    #[test]
    fn test_person_context_is_trimmed() {
        let text = "\n\n  Ann Lee  \n";
        let context = matcher().find_person_context("Ann", "Lee", text);
        assert_eq!(context, "Ann Lee");
    }

    #[test]
    fn test_no_match_returns_placeholder_with_both_names() {
        let context = matcher().find_person_context("Zed", "Quinn", SCENARIO_TEXT);
        assert_eq!(
            context,
            "No specific profile found for Zed Quinn in the profile book."
        );
    }

    #[test]
    fn test_blank_names_fall_back_to_placeholder() {
        let context = matcher().find_person_context("", "", SCENARIO_TEXT);
        assert_eq!(context, no_match_placeholder("", ""));
    }

    #[test]
    fn test_custom_keywords_are_case_insensitive() {
        let m = NameMatcher::new(MatcherConfig {
            keywords: vec!["MBA".to_string()],
            keyword_bonus: 50,
            ..MatcherConfig::default()
        });
        assert_eq!(m.score_window("holds an mba"), 12 + 50);
        assert_eq!(m.score_window("holds a phd"), 11);
    }

    proptest! {
        #[test]
        fn prop_matching_is_deterministic(
            first in "[A-Z][a-z]{1,8}",
            last in "[A-Z][a-z]{1,8}",
            text in "[a-zA-Z ,.]{0,400}",
        ) {
            let m = matcher();
            let doc = format!("{text} {first} {last} {text}");
            let a = m.find_best_window(&first, &last, &doc);
            let b = m.find_best_window(&first, &last, &doc);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_keyword_adds_exact_bonus(filler in "[xyz ]{0,300}") {
            let m = matcher();
            let with_keyword = format!("{filler}education");
            let without_keyword = format!("{filler}qqqqqqqqq");
            prop_assert_eq!(
                m.score_window(&with_keyword),
                m.score_window(&without_keyword) + DEFAULT_KEYWORD_BONUS
            );
        }

        #[test]
        fn prop_absent_name_yields_placeholder(
            first in "[A-Z][a-z]{2,8}",
            last in "[A-Z][a-z]{2,8}",
            text in "[0-9 .]{0,300}",
        ) {
            let context = matcher().find_person_context(&first, &last, &text);
            prop_assert!(context.contains(&first));
            prop_assert!(context.contains(&last));
            prop_assert!(context.starts_with("No specific profile found"));
        }
    }
}
