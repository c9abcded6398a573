//! Compound-unit autocompletion
//!
//! Turns free text such as `"mbps"`, `"km/h"` or `"meters squared per second"`
//! into ranked [`Measure`] candidates built from a corpus of measures,
//! prefixes and aliases.
//!
//! A query is split into levels (numerator, denominator). Each level is split
//! into whitespace tokens, and every token is parsed into all the ways it can
//! bind a prefix, a measure and an exponent. Token interpretations are
//! multiplied together within a level, and levels are divided. Scores
//! multiply along the way.
//!
//! ```
//! use metron_core::{AutoCompleter, Measure, Prefix, PrefixMask, StringFormatter, UnitSystem};
//!
//! let si = UnitSystem::new([("length", "m"), ("time", "s")]);
//! let si_prefixes = PrefixMask::new(["SI_SUBMULTIPLE"]);
//! let meters: Measure = Measure::dimension(&si, "length", ("meter", "meters", "m"), si_prefixes.clone()).unwrap();
//! let seconds = Measure::dimension(&si, "time", ("second", "seconds", "s"), si_prefixes).unwrap();
//! let milli = Prefix::new("milli", "m", 1e-3, PrefixMask::new(["SI_SUBMULTIPLE"]));
//!
//! let completer = AutoCompleter::new(vec![meters, seconds], vec![milli], vec![]);
//! let best = &completer.complete("mm/s")[0];
//! assert_eq!(best.measure.format(false, &StringFormatter::symbols()), "mm/s");
//! ```

mod exponent;

use std::collections::HashMap;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::format::StringFormatter;
use crate::measure::Measure;
use crate::numeric::Numeric;
use crate::prefix::Prefix;
use crate::trie::{Trie, TrieEntry, TrieHit};

/// Every tuned constant of the autocompleter.
///
/// Perfect scores apply to an alias that prefixes the query, scaled by how
/// much of the query it covers. Partial scores are the ceiling for a
/// truncated alias. Edit distances bound fuzzy matching of measure names
/// and symbols.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringConfig {
    pub measure_name_perfect: f64,
    pub measure_name_partial: f64,
    pub measure_name_edit_distance: f64,
    pub measure_symbol_perfect: f64,
    pub measure_symbol_partial: f64,
    pub measure_symbol_edit_distance: f64,
    pub alias_perfect: f64,
    pub alias_partial: f64,
    pub prefix_name_perfect: f64,
    pub prefix_name_partial: f64,
    pub prefix_symbol_perfect: f64,
    pub prefix_symbol_partial: f64,
    /// Shortest truncation of "squared"/"cubed" accepted as a partial match
    pub exponent_word_min_partial: usize,
    /// Applied when a token is only a prefix and lends it to the next token
    pub end_on_prefix_penalty: f64,
    pub case_mismatch_penalty: f64,
    /// Score of any explicit exponent
    pub power_match_score: f64,
    /// Multiplier for an alias, or the name of a measure, matching a whole
    /// level
    pub whole_alias_multiplier: f64,
    /// Candidates kept per level while combining tokens
    pub max_level_candidates: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            measure_name_perfect: 10.0,
            measure_name_partial: 2.0,
            measure_name_edit_distance: 1.0,
            measure_symbol_perfect: 5.0,
            measure_symbol_partial: 1.8,
            measure_symbol_edit_distance: 0.5,
            alias_perfect: 4.0,
            alias_partial: 1.5,
            prefix_name_perfect: 8.0,
            prefix_name_partial: 2.0,
            prefix_symbol_perfect: 4.0,
            prefix_symbol_partial: 1.5,
            exponent_word_min_partial: 2,
            end_on_prefix_penalty: 0.1,
            case_mismatch_penalty: 0.283,
            power_match_score: 1.5,
            whole_alias_multiplier: 10.0,
            max_level_candidates: 256,
        }
    }
}

/// Extra text that should complete to `measure`
#[derive(Debug, Clone)]
pub struct MeasureAlias<N: Numeric = f64> {
    pub measure: Measure<N>,
    pub text: Vec<String>,
}

impl<N: Numeric> MeasureAlias<N> {
    pub fn new<I, S>(measure: Measure<N>, text: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            measure,
            text: text.into_iter().map(Into::into).collect(),
        }
    }
}

/// A ranked suggestion
#[derive(Debug, Clone)]
pub struct Completion<N: Numeric = f64> {
    pub measure: Measure<N>,
    pub score: f64,
}

/// A trie hit reduced to what the parser needs
#[derive(Debug, Clone, Copy)]
struct Hit {
    target: usize,
    score: f64,
    consumed: usize,
}

impl From<TrieHit<'_, usize>> for Hit {
    fn from(hit: TrieHit<'_, usize>) -> Self {
        Self {
            target: *hit.payload,
            score: hit.score,
            consumed: hit.consumed,
        }
    }
}

/// One interpretation of a token: indices into the corpus plus a score
#[derive(Debug, Clone, Copy, PartialEq)]
struct Binding {
    score: f64,
    prefix: Option<usize>,
    measure: Option<usize>,
    exponent: Option<i32>,
}

impl Binding {
    const EMPTY: Binding = Binding {
        score: 1.0,
        prefix: None,
        measure: None,
        exponent: None,
    };

    fn key(&self) -> (Option<usize>, Option<usize>, Option<i32>) {
        (self.prefix, self.measure, self.exponent)
    }
}

/// A level being assembled token by token
#[derive(Debug, Clone)]
struct Running<N: Numeric> {
    measure: Option<Measure<N>>,
    pending_prefix: Option<usize>,
    score: f64,
}

/// Ranks compound measures for free-text queries.
///
/// The corpus is fixed at construction; [`AutoCompleter::complete`] only
/// reads it.
#[derive(Debug, Clone)]
pub struct AutoCompleter<N: Numeric = f64> {
    /// Corpus measures followed by alias measures
    measures: Vec<Measure<N>>,
    prefixes: Vec<Prefix<N>>,
    measure_names: Trie<usize>,
    measure_symbols: Trie<usize>,
    aliases: Trie<usize>,
    prefix_names: Trie<usize>,
    prefix_symbols: Trie<usize>,
    exponent_words: Trie<i32>,
    names: StringFormatter,
    config: ScoringConfig,
}

impl<N: Numeric> AutoCompleter<N> {
    pub fn new(measures: Vec<Measure<N>>, prefixes: Vec<Prefix<N>>, aliases: Vec<MeasureAlias<N>>) -> Self {
        Self::with_config(measures, prefixes, aliases, ScoringConfig::default())
    }

    pub fn with_config(
        measures: Vec<Measure<N>>,
        prefixes: Vec<Prefix<N>>,
        aliases: Vec<MeasureAlias<N>>,
        config: ScoringConfig,
    ) -> Self {
        let name_entries = measures
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let ids = m.identifiers();
                TrieEntry::new([ids.name_plural.clone(), ids.name_singular.clone()], i)
            })
            .collect();
        let symbol_entries = measures
            .iter()
            .enumerate()
            .map(|(i, m)| TrieEntry::new([m.identifiers().symbol.clone()], i))
            .collect();
        let prefix_name_entries = prefixes
            .iter()
            .enumerate()
            .map(|(i, p)| TrieEntry::new([p.name.clone()], i))
            .collect();
        let prefix_symbol_entries = prefixes
            .iter()
            .enumerate()
            .map(|(i, p)| TrieEntry::new([p.symbol.clone()], i))
            .collect();

        let mut all_measures = measures;
        let mut alias_entries = Vec::with_capacity(aliases.len());
        for alias in aliases {
            alias_entries.push(TrieEntry::new(alias.text, all_measures.len()));
            all_measures.push(alias.measure);
        }

        let c = &config;
        let completer = Self {
            measure_names: Trie::new(name_entries, c.measure_name_perfect, c.measure_name_partial),
            measure_symbols: Trie::new(symbol_entries, c.measure_symbol_perfect, c.measure_symbol_partial),
            aliases: Trie::new(alias_entries, c.alias_perfect, c.alias_partial),
            prefix_names: Trie::new(prefix_name_entries, c.prefix_name_perfect, c.prefix_name_partial),
            prefix_symbols: Trie::new(
                prefix_symbol_entries,
                c.prefix_symbol_perfect,
                c.prefix_symbol_partial,
            ),
            exponent_words: Trie::new(
                vec![TrieEntry::new(["squared"], 2), TrieEntry::new(["cubed"], 3)],
                c.power_match_score,
                c.power_match_score,
            ),
            measures: all_measures,
            prefixes,
            names: StringFormatter::names(),
            config,
        };

        trace!(
            "autocompleter corpus: {} measures ({} aliased), {} prefixes",
            completer.measure_names.len(),
            completer.aliases.len(),
            completer.prefixes.len()
        );
        completer
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Rank every compound measure the query could describe, best first.
    ///
    /// Never fails: a query that matches nothing yields an empty list.
    pub fn complete(&self, query: &str) -> Vec<Completion<N>> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<Completion<N>> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for levels in split_levels(query) {
            debug!("autocomplete '{}': levels {:?}", query, levels);
            for (measure, score) in self.complete_levels(&levels) {
                let key = measure.format(false, &self.names);
                match seen.get(&key) {
                    Some(&i) if ranked[i].score >= score => {}
                    Some(&i) => ranked[i] = Completion { measure, score },
                    None => {
                        seen.insert(key, ranked.len());
                        ranked.push(Completion { measure, score });
                    }
                }
            }
        }

        // stable, so equal scores keep discovery order
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        debug!("autocomplete '{}': {} candidates", query, ranked.len());
        ranked
    }

    /// Divide the candidates of each level by those of the next
    fn complete_levels(&self, levels: &[&str]) -> Vec<(Measure<N>, f64)> {
        let mut levels = levels.iter();
        let Some(first) = levels.next() else {
            return Vec::new();
        };

        let mut result = self.complete_level(first);
        for level in levels {
            let denominators = self.complete_level(level);
            let mut next = Vec::with_capacity(result.len() * denominators.len());
            for (numerator, score) in &result {
                for (denominator, denominator_score) in &denominators {
                    match numerator.checked_over(denominator) {
                        Some(quotient) => next.push((quotient, score * denominator_score)),
                        None => trace!("discarding quotient: overflow"),
                    }
                }
            }
            result = self.prune(next);
        }
        result
    }

    /// Every measure a single level could describe, with its score
    fn complete_level(&self, level: &str) -> Vec<(Measure<N>, f64)> {
        let mut states = vec![Running {
            measure: None,
            pending_prefix: None,
            score: 1.0,
        }];

        for token in level.split_whitespace() {
            let bindings = self.parse_token(token);
            trace!("token '{}': {} interpretations", token, bindings.len());

            let mut next = Vec::new();
            for state in &states {
                for binding in &bindings {
                    if let Some(combined) = self.combine(state, binding) {
                        next.push(combined);
                    }
                }
            }
            next.sort_by(|a, b| b.score.total_cmp(&a.score));
            next.truncate(self.config.max_level_candidates);
            states = next;
        }

        let mut candidates: Vec<(Measure<N>, f64)> = states
            .into_iter()
            .filter(|state| state.pending_prefix.is_none())
            .filter_map(|state| Some((state.measure?, state.score)))
            .collect();

        let whole = level.trim();
        let whole_len = whole.chars().count();
        for hit in self.whole_level_hits(whole) {
            if hit.consumed == whole_len {
                let score = hit.score * self.config.whole_alias_multiplier;
                candidates.push((self.measures[hit.target].clone(), score));
            }
        }

        self.prune(candidates)
    }

    /// Matches for a level taken as one phrase.
    ///
    /// Aliases always apply. A name containing a space can never match a
    /// single token, so a level of several words is also matched against
    /// measure names, and word by word against names and aliases so that
    /// `"deg C"` reaches `"degrees Celsius"`.
    fn whole_level_hits(&self, whole: &str) -> Vec<Hit> {
        let mut hits = self.alias_hits(whole);
        if whole.split_whitespace().nth(1).is_none() {
            return hits;
        }

        let penalty = self.config.case_mismatch_penalty;
        let names = self.measure_names.match_ignoring_case(whole, 0.0, 0, penalty);
        let abbreviated_names = self.measure_names.match_abbreviation(whole, penalty);
        let abbreviated_aliases = self.aliases.match_abbreviation(whole, penalty);
        hits.extend(
            names
                .into_iter()
                .chain(abbreviated_names)
                .chain(abbreviated_aliases)
                .map(Hit::from),
        );
        hits
    }

    /// Drop duplicates by rendered name and keep the best scoring few
    fn prune(&self, candidates: Vec<(Measure<N>, f64)>) -> Vec<(Measure<N>, f64)> {
        let mut unique: Vec<(Measure<N>, f64)> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();
        for (measure, score) in candidates {
            let key = measure.format(false, &self.names);
            match seen.get(&key) {
                Some(&i) if unique[i].1 >= score => {}
                Some(&i) => unique[i] = (measure, score),
                None => {
                    seen.insert(key, unique.len());
                    unique.push((measure, score));
                }
            }
        }
        unique.sort_by(|a, b| b.1.total_cmp(&a.1));
        unique.truncate(self.config.max_level_candidates);
        unique
    }

    /// Fold one token interpretation into a level under construction
    fn combine(&self, state: &Running<N>, binding: &Binding) -> Option<Running<N>> {
        let score = state.score * binding.score;

        let Some(measure_index) = binding.measure else {
            if let Some(prefix_index) = binding.prefix {
                // a bare prefix waits for the next token's measure
                if state.pending_prefix.is_some() || binding.exponent.is_some() {
                    return None;
                }
                return Some(Running {
                    measure: state.measure.clone(),
                    pending_prefix: Some(prefix_index),
                    score,
                });
            }

            // a bare exponent raises everything so far
            let power = binding.exponent?;
            if state.pending_prefix.is_some() {
                return None;
            }
            return Some(Running {
                measure: Some(raise(state.measure.as_ref()?, power)?),
                pending_prefix: None,
                score,
            });
        };

        let (prefix_index, score) = match (state.pending_prefix, binding.prefix) {
            (Some(_), Some(_)) => return None,
            (Some(pending), None) => (Some(pending), score * self.config.end_on_prefix_penalty),
            (None, own) => (own, score),
        };

        let base = &self.measures[measure_index];
        let assembled = match prefix_index {
            Some(i) => {
                let prefix = &self.prefixes[i];
                match prefix.apply(base) {
                    Ok(prefixed) => prefixed,
                    Err(e) => {
                        trace!("discarding {}: {}", prefix.name, e);
                        return None;
                    }
                }
            }
            None => base.clone(),
        };

        let mut measure = match &state.measure {
            Some(running) => match running.checked_times(&assembled) {
                Some(product) => product,
                None => {
                    trace!("discarding product: overflow");
                    return None;
                }
            },
            None => assembled,
        };
        if let Some(power) = binding.exponent {
            measure = raise(&measure, power)?;
        }

        Some(Running {
            measure: Some(measure),
            pending_prefix: None,
            score,
        })
    }

    /// All complete interpretations of one whitespace-free token
    fn parse_token(&self, token: &str) -> Vec<Binding> {
        let mut out = Vec::new();
        self.expand(Binding::EMPTY, token, &mut out);

        let mut unique: Vec<Binding> = Vec::new();
        for binding in out {
            match unique.iter().position(|b| b.key() == binding.key()) {
                Some(i) if unique[i].score >= binding.score => {}
                Some(i) => unique[i] = binding,
                None => unique.push(binding),
            }
        }
        unique
    }

    fn expand(&self, binding: Binding, leftovers: &str, out: &mut Vec<Binding>) {
        if leftovers.is_empty() {
            if binding != Binding::EMPTY {
                out.push(binding);
            }
            return;
        }

        // an exponent ends the token
        if binding.exponent.is_none() && binding.measure.is_none() {
            for hit in self.measure_hits(leftovers) {
                let next = Binding {
                    score: binding.score * hit.score,
                    measure: Some(hit.target),
                    ..binding
                };
                self.expand(next, skip_chars(leftovers, hit.consumed), out);
            }

            if binding.prefix.is_none() {
                for hit in self.prefix_hits(leftovers) {
                    let next = Binding {
                        score: binding.score * hit.score,
                        prefix: Some(hit.target),
                        ..binding
                    };
                    self.expand(next, skip_chars(leftovers, hit.consumed), out);
                }
            }
        }

        if binding.exponent.is_none() {
            if let Some((power, bytes)) = exponent::leading_exponent(leftovers) {
                let next = Binding {
                    score: binding.score * self.config.power_match_score,
                    exponent: Some(power),
                    ..binding
                };
                self.expand(next, &leftovers[bytes..], out);
            }

            let c = &self.config;
            for hit in self.exponent_words.match_ignoring_case(
                leftovers,
                0.0,
                c.exponent_word_min_partial,
                c.case_mismatch_penalty,
            ) {
                let next = Binding {
                    score: binding.score * hit.score,
                    exponent: Some(*hit.payload),
                    ..binding
                };
                self.expand(next, skip_chars(leftovers, hit.consumed), out);
            }
        }
    }

    fn measure_hits(&self, text: &str) -> Vec<Hit> {
        let c = &self.config;
        let penalty = c.case_mismatch_penalty;
        let mut hits: Vec<Hit> = self
            .measure_names
            .match_ignoring_case(text, c.measure_name_edit_distance, 0, penalty)
            .into_iter()
            .map(Hit::from)
            .collect();
        hits.extend(
            self.measure_symbols
                .match_ignoring_case(text, c.measure_symbol_edit_distance, 0, penalty)
                .into_iter()
                .map(Hit::from),
        );
        hits.extend(self.alias_hits(text));
        hits
    }

    fn alias_hits(&self, text: &str) -> Vec<Hit> {
        self.aliases
            .match_ignoring_case(text, 0.0, 0, self.config.case_mismatch_penalty)
            .into_iter()
            .map(Hit::from)
            .collect()
    }

    fn prefix_hits(&self, text: &str) -> Vec<Hit> {
        let penalty = self.config.case_mismatch_penalty;
        let mut hits: Vec<Hit> = self
            .prefix_names
            .match_ignoring_case(text, 0.0, 0, penalty)
            .into_iter()
            .map(Hit::from)
            .collect();
        hits.extend(
            self.prefix_symbols
                .match_ignoring_case(text, 0.0, 0, penalty)
                .into_iter()
                .map(Hit::from),
        );
        hits
    }
}

fn raise<N: Numeric>(measure: &Measure<N>, power: i32) -> Option<Measure<N>> {
    let raised = measure.checked_pow(power);
    if raised.is_none() {
        trace!("discarding power {}: overflow", power);
    }
    raised
}

/// Split a query into alternative level lists.
///
/// The first of `/`, `" per "` and a bare `p` present splits the query once.
/// A bare `p` also appears inside unit names, so that split is offered
/// alongside the unsplit query. Empty trailing levels are dropped so that
/// `"km/"` still completes while it is being typed.
fn split_levels(query: &str) -> Vec<Vec<&str>> {
    if let Some(parts) = query.split_once('/') {
        return vec![two_levels(parts)];
    }
    if let Some(parts) = query.split_once(" per ") {
        return vec![two_levels(parts)];
    }
    if let Some(parts) = query.split_once('p') {
        return vec![two_levels(parts), vec![query]];
    }
    vec![vec![query]]
}

fn two_levels<'a>((numerator, denominator): (&'a str, &'a str)) -> Vec<&'a str> {
    if denominator.trim().is_empty() {
        vec![numerator]
    } else {
        vec![numerator, denominator]
    }
}

fn skip_chars(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((i, _)) => &text[i..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PrefixMask, UnitSystem};
    use pretty_assertions::assert_eq;

    fn completer() -> AutoCompleter {
        let si = UnitSystem::new([("length", "m"), ("time", "s")]);
        let both = PrefixMask::new(["SI_SUBMULTIPLE", "SI_MULTIPLE"]);
        let meters = Measure::dimension(&si, "length", ("meter", "meters", "m"), both.clone()).unwrap();
        let seconds = Measure::dimension(&si, "time", ("second", "seconds", "s"), both).unwrap();
        let hours = Measure::of(3600.0, &seconds, ("hour", "hours", "hr"), PrefixMask::none());

        AutoCompleter::new(
            vec![meters, seconds, hours],
            vec![
                Prefix::new("kilo", "k", 1e3, PrefixMask::new(["SI_MULTIPLE"])),
                Prefix::new("milli", "m", 1e-3, PrefixMask::new(["SI_SUBMULTIPLE"])),
            ],
            vec![],
        )
    }

    fn top(completer: &AutoCompleter, query: &str) -> String {
        completer.complete(query)[0]
            .measure
            .format(true, &StringFormatter::names())
    }

    #[test]
    fn test_split_levels() {
        assert_eq!(split_levels("km/h"), vec![vec!["km", "h"]]);
        assert_eq!(split_levels("meters per second"), vec![vec!["meters", "second"]]);
        assert_eq!(split_levels("kph"), vec![vec!["k", "h"], vec!["kph"]]);
        assert_eq!(split_levels("km/"), vec![vec!["km"]]);
        assert_eq!(split_levels("meters"), vec![vec!["meters"]]);
    }

    #[test]
    fn test_skip_chars() {
        assert_eq!(skip_chars("µm", 1), "m");
        assert_eq!(skip_chars("m", 3), "");
    }

    #[test]
    fn test_empty_query() {
        assert!(completer().complete("").is_empty());
        assert!(completer().complete("   ").is_empty());
    }

    #[test]
    fn test_prefix_then_measure() {
        let completer = completer();
        let results = completer.complete("mm");
        assert_eq!(top(&completer, "mm"), "millimeters");
        assert!((results[0].score - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_results_sorted_and_unique() {
        let completer = completer();
        let results = completer.complete("m");
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));

        let names = StringFormatter::names();
        let mut rendered: Vec<String> = results.iter().map(|r| r.measure.format(false, &names)).collect();
        let total = rendered.len();
        rendered.sort();
        rendered.dedup();
        assert_eq!(rendered.len(), total);
    }

    #[test]
    fn test_exponents() {
        let completer = completer();
        assert_eq!(top(&completer, "meters squared"), "meters squared");
        assert_eq!(top(&completer, "m^2"), "meters squared");
        assert_eq!(top(&completer, "m³"), "meters cubed");
    }

    #[test]
    fn test_prefix_lent_to_next_token() {
        let completer = completer();
        let results = completer.complete("kilo meters");
        let names = StringFormatter::names();
        let kilometers = results
            .iter()
            .find(|r| r.measure.format(true, &names) == "kilometers")
            .unwrap();
        // perfect prefix name, perfect measure name, lent prefix penalty
        assert!((kilometers.score - 8.0 * 10.0 * 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_disallowed_prefix_dropped() {
        let completer = completer();
        let names = StringFormatter::names();
        assert!(completer
            .complete("khr")
            .iter()
            .all(|r| r.measure.format(true, &names) != "kilohours"));
    }

    #[test]
    fn test_custom_config() {
        let config = ScoringConfig {
            measure_name_perfect: 20.0,
            ..ScoringConfig::default()
        };
        let base = completer();
        let completer = AutoCompleter::with_config(
            base.measures.clone(),
            base.prefixes.clone(),
            vec![],
            config,
        );
        assert!((completer.complete("meters")[0].score - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_overflowing_exponents_are_dropped() {
        let completer = completer();

        let raised = completer.complete("m^999 ^999");
        assert_eq!(raised[0].measure.unit().exponents(), &[998_001, 0]);

        assert!(completer.complete("m^999 ^999 ^999 ^999").is_empty());
        assert!(completer.complete("m^65536 ^65536").is_empty());
    }

    #[test]
    fn test_single_word_level_not_matched_whole() {
        let completer = completer();
        assert!(completer.whole_level_hits("meters").is_empty());
        assert!((completer.complete("meters")[0].score - 10.0).abs() < 1e-9);
    }
}
