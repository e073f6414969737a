use std::collections::HashMap;
use std::time::Instant;

use regex::Regex;

use crate::config::LocaleConfig;
use crate::error::PatternError;
use crate::metrics::metrics_recorder;

/// An immutable, compiled language matcher.
///
/// Produced once by [`CompiledMatcher::compile`] and never mutated
/// afterward, so a shared matcher is safe for unlimited concurrent
/// lookups. Compiling the same configuration again simply builds an
/// independent value with identical behavior; there is no cached state
/// to invalidate.
#[derive(Debug)]
pub struct CompiledMatcher {
    default_language: String,
    rules: Vec<CompiledRule>,
    aliases: HashMap<String, String>,
}

#[derive(Debug)]
struct CompiledRule {
    name: String,
    patterns: Vec<Regex>,
}

impl CompiledMatcher {
    /// Compiles every rule pattern in `config` into anchored match
    /// expressions.
    ///
    /// Each raw pattern has `-` replaced with `\-` and `*` with `.*`,
    /// then is anchored as `^…$` so a pattern must cover the whole tag.
    /// The first pattern that fails to compile aborts the whole
    /// construction with a [`PatternError`]; no partial matcher is ever
    /// returned.
    pub fn compile(config: &LocaleConfig) -> Result<Self, PatternError> {
        let mut rules = Vec::with_capacity(config.rules.len());
        let mut pattern_count = 0usize;

        for rule in &config.rules {
            let mut patterns = Vec::with_capacity(rule.patterns.len());
            for raw in &rule.patterns {
                let regex = compile_pattern(raw).map_err(|source| PatternError {
                    language: rule.name.clone(),
                    pattern: raw.clone(),
                    source,
                })?;
                patterns.push(regex);
            }
            pattern_count += patterns.len();
            rules.push(CompiledRule {
                name: rule.name.clone(),
                patterns,
            });
        }

        tracing::debug!(languages = rules.len(), patterns = pattern_count, "matcher_compiled");

        Ok(Self {
            default_language: config.default_language.clone(),
            rules,
            aliases: config.aliases.clone(),
        })
    }

    /// Resolves an `Accept-Language` value to a language name or alias.
    ///
    /// The input is split on `,` into entries whose position is their
    /// priority (leftmost wins); anything from the first `;` onward in an
    /// entry is stripped without being parsed, so declared `q=` weights
    /// never influence the result. Each remaining tag is matched verbatim
    /// (byte-for-byte, case-sensitive, no whitespace trimming) against
    /// the rules in declaration order and each rule's patterns in order;
    /// the first full match resolves to the rule's alias when one is
    /// configured, otherwise to the rule's name.
    ///
    /// Total: falls back to the default language when nothing matches or
    /// when no rules are configured at all.
    pub fn lookup(&self, accept_language: &str) -> &str {
        let started = Instant::now();
        let (resolved, matched) = self.resolve(accept_language);

        if let Some(recorder) = metrics_recorder() {
            recorder.record_lookup(accept_language, resolved, matched, started.elapsed());
        }

        resolved
    }

    fn resolve(&self, accept_language: &str) -> (&str, bool) {
        if self.rules.is_empty() {
            return (&self.default_language, false);
        }

        for entry in accept_language.split(',') {
            let tag = match entry.split_once(';') {
                Some((tag, _quality)) => tag,
                None => entry,
            };

            for rule in &self.rules {
                for pattern in &rule.patterns {
                    if pattern.is_match(tag) {
                        let resolved = self
                            .aliases
                            .get(&rule.name)
                            .map(String::as_str)
                            .unwrap_or(&rule.name);
                        return (resolved, true);
                    }
                }
            }
        }

        (&self.default_language, false)
    }

    /// Language name returned when nothing matches.
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// True when a rule with exactly this name is configured.
    pub fn has_language(&self, name: &str) -> bool {
        self.rules.iter().any(|rule| rule.name == name)
    }

    /// Configured language names in declaration order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name.as_str())
    }
}

/// Expands one raw tag pattern into an anchored regular expression.
pub(crate) fn compile_pattern(raw: &str) -> Result<Regex, regex::Error> {
    let expanded = raw.replace('-', r"\-").replace('*', ".*");
    Regex::new(&format!("^{expanded}$"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, RwLock};
    use std::time::Duration;

    use crate::metrics::{LookupMetrics, set_lookup_metrics};

    fn base_config() -> LocaleConfig {
        LocaleConfig::new("ja")
            .with_rule("ja", ["ja"])
            .with_rule("en", ["en", "en-*"])
            .with_rule("zh", ["zh", "zh-*"])
            .with_rule("pt", ["pt", "pt-*"])
    }

    #[test]
    fn literal_pattern_matches_exact_tag() {
        let matcher = CompiledMatcher::compile(&base_config()).expect("patterns compile");
        assert_eq!(matcher.lookup("ja"), "ja");
        assert_eq!(matcher.lookup("en"), "en");
    }

    #[test]
    fn wildcard_requires_the_hyphen_segment() {
        let config = LocaleConfig::new("ja").with_rule("en", ["en-*"]);
        let matcher = CompiledMatcher::compile(&config).expect("patterns compile");

        assert_eq!(matcher.lookup("en-US"), "en");
        assert_eq!(matcher.lookup("en-GB"), "en");
        // "en" has no hyphen segment and "fr-FR" is another language.
        assert_eq!(matcher.lookup("en"), "ja");
        assert_eq!(matcher.lookup("fr-FR"), "ja");
    }

    #[test]
    fn priority_is_positional_not_quality_weighted() {
        let matcher = CompiledMatcher::compile(&base_config()).expect("patterns compile");

        // zh appears before ja in the input, so zh wins even though the
        // declared weights favor ja.
        assert_eq!(matcher.lookup("ar-DZ,zh;q=0.2,ja;q=0.9,en-US;q=0.4"), "zh");
        assert_eq!(matcher.lookup("en,ja;q=0.8,zh;q=0.6"), "en");
        assert_eq!(matcher.lookup("ar-DZ,en-US;q=0.8"), "en");
    }

    #[test]
    fn alias_replaces_rule_name_on_match() {
        let config = base_config().with_alias("zh", ".zh");
        let matcher = CompiledMatcher::compile(&config).expect("patterns compile");

        assert_eq!(matcher.lookup("ar-DZ,zh;q=0.8,ja;q=0.6"), ".zh");
        // Rules without an alias still return their name.
        assert_eq!(matcher.lookup("en-US"), "en");
    }

    #[test]
    fn default_returned_when_nothing_matches() {
        let matcher = CompiledMatcher::compile(&base_config()).expect("patterns compile");
        assert_eq!(matcher.lookup("xx,yy-ZZ;q=0.5"), "ja");
        assert_eq!(matcher.lookup(""), "ja");
    }

    #[test]
    fn empty_rule_set_short_circuits_to_default() {
        let matcher =
            CompiledMatcher::compile(&LocaleConfig::new("ja")).expect("empty config compiles");
        assert_eq!(matcher.lookup("en,zh,pt-BR"), "ja");
    }

    #[test]
    fn matching_is_case_sensitive() {
        let matcher = CompiledMatcher::compile(&base_config()).expect("patterns compile");
        assert_eq!(matcher.lookup("EN"), "ja");
        assert_eq!(matcher.lookup("Ja"), "ja");
        assert_eq!(matcher.lookup("ja"), "ja");
    }

    #[test]
    fn entries_are_matched_verbatim() {
        let matcher = CompiledMatcher::compile(&base_config()).expect("patterns compile");

        assert_eq!(matcher.lookup("xx,zh"), "zh");
        // A space after the comma is part of the entry and blocks the match.
        assert_eq!(matcher.lookup("xx, zh"), "ja");
    }

    #[test]
    fn overlapping_rules_resolve_in_declaration_order() {
        let config = LocaleConfig::new("ja")
            .with_rule("english-region", ["en-*"])
            .with_rule("english-us", ["en-US"]);
        let matcher = CompiledMatcher::compile(&config).expect("patterns compile");

        assert_eq!(matcher.lookup("en-US"), "english-region");
    }

    #[test]
    fn malformed_pattern_fails_compile() {
        let config = LocaleConfig::new("ja").with_rule("broken", ["d(^-^o"]);
        let err = CompiledMatcher::compile(&config).expect_err("pattern must not compile");

        assert_eq!(err.language, "broken");
        assert_eq!(err.pattern, "d(^-^o");
        let rendered = err.to_string();
        assert!(rendered.contains("broken"));
        assert!(rendered.contains("d(^-^o"));
    }

    #[test]
    fn recompiling_the_same_config_is_behaviorally_identical() {
        let config = base_config().with_alias("zh", ".zh");
        let first = CompiledMatcher::compile(&config).expect("first compile");
        let second = CompiledMatcher::compile(&config).expect("second compile");

        for input in ["ar-DZ,zh;q=0.8,ja;q=0.6", "en-GB", "xx", ""] {
            assert_eq!(first.lookup(input), second.lookup(input));
        }
    }

    #[test]
    fn accessors_reflect_configuration() {
        let matcher = CompiledMatcher::compile(&base_config()).expect("patterns compile");

        assert_eq!(matcher.default_language(), "ja");
        assert!(matcher.has_language("zh"));
        assert!(!matcher.has_language("fr"));
        let names: Vec<&str> = matcher.languages().collect();
        assert_eq!(names, vec!["ja", "en", "zh", "pt"]);
    }

    struct RecordingMetrics {
        events: Arc<RwLock<Vec<(String, String, bool)>>>,
    }

    impl RecordingMetrics {
        fn new() -> Self {
            Self {
                events: Arc::new(RwLock::new(Vec::new())),
            }
        }

        fn snapshot(&self) -> Vec<(String, String, bool)> {
            self.events.read().unwrap().clone()
        }
    }

    impl LookupMetrics for RecordingMetrics {
        fn record_lookup(
            &self,
            accept_language: &str,
            resolved: &str,
            matched: bool,
            _latency: Duration,
        ) {
            self.events.write().unwrap().push((
                accept_language.to_string(),
                resolved.to_string(),
                matched,
            ));
        }
    }

    #[test]
    fn metrics_recorder_observes_lookups() {
        let matcher = CompiledMatcher::compile(&base_config()).expect("patterns compile");
        let metrics = Arc::new(RecordingMetrics::new());
        set_lookup_metrics(Some(metrics.clone()));

        assert_eq!(matcher.lookup("zh;q=0.9"), "zh");
        assert_eq!(matcher.lookup("xx"), "ja");

        let events = metrics.snapshot();
        // Other tests may run lookups while the recorder is installed, so
        // assert on membership rather than exact counts.
        assert!(events
            .iter()
            .any(|(input, resolved, matched)| input == "zh;q=0.9" && resolved == "zh" && *matched));
        assert!(events
            .iter()
            .any(|(input, resolved, matched)| input == "xx" && resolved == "ja" && !*matched));

        set_lookup_metrics(None);
    }
}
