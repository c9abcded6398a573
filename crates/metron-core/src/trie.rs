//! Approximate prefix matching over aliased entries
//!
//! Each entry has one or more alias strings and a payload. A query is matched
//! against every alias three ways: as a perfect prefix, as a truncated
//! (partial) prefix, and by bounded edit distance over the whole query.
//! Lengths and offsets are counted in `char`s.

/// Aliases pointing at one payload
#[derive(Debug, Clone, PartialEq)]
pub struct TrieEntry<T> {
    pub text: Vec<String>,
    pub payload: T,
}

impl<T> TrieEntry<T> {
    pub fn new<I, S>(text: I, payload: T) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into_iter().map(Into::into).collect(),
            payload,
        }
    }
}

/// How a hit was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Perfect,
    Partial,
    Fuzzy,
}

/// One scored way the start of a query matches an entry
#[derive(Debug, Clone, PartialEq)]
pub struct TrieHit<'a, T> {
    /// Index of the entry in the trie
    pub entry: usize,
    pub payload: &'a T,
    pub score: f64,
    /// Number of query chars matched
    pub consumed: usize,
    pub kind: MatchKind,
}

#[derive(Debug, Clone)]
struct Alias {
    exact: Vec<char>,
    folded: Vec<char>,
}

#[derive(Debug, Clone)]
pub struct Trie<T> {
    entries: Vec<(Vec<Alias>, T)>,
    perfect_score: f64,
    partial_score: f64,
}

/// Lowercase char by char, keeping the char count
pub fn fold_case(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn map_linear(x: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

impl<T> Trie<T> {
    pub fn new(entries: Vec<TrieEntry<T>>, perfect_score: f64, partial_score: f64) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| {
                let aliases = entry
                    .text
                    .iter()
                    .filter(|text| !text.is_empty())
                    .map(|text| Alias {
                        exact: text.chars().collect(),
                        folded: fold_case(text),
                    })
                    .collect();
                (aliases, entry.payload)
            })
            .collect();

        Self {
            entries,
            perfect_score,
            partial_score,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Match `query` case-sensitively.
    ///
    /// Returns, per entry, the best hit for each distinct consumed length.
    /// Edit-distance matching is attempted only when `max_edit_distance` is
    /// positive and smaller than the query length.
    pub fn match_query(
        &self,
        query: &str,
        max_edit_distance: f64,
        min_partial_prefix_len: usize,
    ) -> Vec<TrieHit<'_, T>> {
        let query: Vec<char> = query.chars().collect();
        self.match_chars(&query, max_edit_distance, min_partial_prefix_len, false)
    }

    /// Match exactly, then again with both sides lowercased.
    ///
    /// Hits found only after folding are scaled by `case_penalty`; a folded
    /// hit never replaces an exact hit of the same entry and length.
    pub fn match_ignoring_case(
        &self,
        query: &str,
        max_edit_distance: f64,
        min_partial_prefix_len: usize,
        case_penalty: f64,
    ) -> Vec<TrieHit<'_, T>> {
        let exact: Vec<char> = query.chars().collect();
        let mut hits = self.match_chars(&exact, max_edit_distance, min_partial_prefix_len, false);

        let folded = fold_case(query);
        for mut hit in self.match_chars(&folded, max_edit_distance, min_partial_prefix_len, true) {
            let seen = hits
                .iter()
                .any(|h| h.entry == hit.entry && h.consumed == hit.consumed);
            if !seen {
                hit.score *= case_penalty;
                hits.push(hit);
            }
        }

        hits
    }

    /// Match a query of several words word by word.
    ///
    /// An alias qualifies when it has as many words as the query and each
    /// query word starts the alias word in the same position, so `"deg C"`
    /// abbreviates `"degrees Celsius"`. The score rises linearly from 1 to
    /// the partial score with the share of the alias the query spells out.
    /// A hit always consumes the whole query. Words that match only after
    /// folding scale the score by `case_penalty`.
    pub fn match_abbreviation(&self, query: &str, case_penalty: f64) -> Vec<TrieHit<'_, T>> {
        let exact: Vec<char> = query.chars().collect();
        let folded = fold_case(query);
        let exact_words = split_words(&exact);
        let folded_words = split_words(&folded);

        let mut hits = Vec::new();
        if exact_words.len() < 2 {
            return hits;
        }

        for (index, (aliases, payload)) in self.entries.iter().enumerate() {
            let mut entry_hits = Vec::new();
            for alias in aliases {
                let alias_exact = split_words(&alias.exact);
                let alias_folded = split_words(&alias.folded);
                if alias_exact.len() != exact_words.len() {
                    continue;
                }

                let exact_case = (0..exact_words.len()).all(|i| alias_exact[i].starts_with(exact_words[i]));
                let any_case = (0..folded_words.len()).all(|i| alias_folded[i].starts_with(folded_words[i]));
                if !any_case {
                    continue;
                }
                let penalty = if exact_case { 1.0 } else { case_penalty };
                let spelled: usize = exact_words.iter().map(|word| word.len()).sum();

                let alias_len = alias.exact.len() as f64;
                let score = map_linear(spelled as f64, 0.0, alias_len, 1.0, self.partial_score) * penalty;
                keep_best(
                    &mut entry_hits,
                    TrieHit {
                        entry: index,
                        payload,
                        score,
                        consumed: exact.len(),
                        kind: MatchKind::Partial,
                    },
                );
            }
            hits.extend(entry_hits);
        }

        hits
    }

    fn match_chars(
        &self,
        query: &[char],
        max_edit_distance: f64,
        min_partial_prefix_len: usize,
        folded: bool,
    ) -> Vec<TrieHit<'_, T>> {
        let mut hits = Vec::new();
        if query.is_empty() {
            return hits;
        }

        let query_len = query.len() as f64;
        let try_fuzzy = max_edit_distance > 0.0 && query_len > max_edit_distance;

        for (index, (aliases, payload)) in self.entries.iter().enumerate() {
            let mut entry_hits = Vec::new();
            let hit = |score: f64, consumed: usize, kind: MatchKind| TrieHit {
                entry: index,
                payload,
                score,
                consumed,
                kind,
            };

            for alias in aliases {
                let text = if folded { &alias.folded } else { &alias.exact };
                let len = text.len();

                let perfect = query.starts_with(text);
                if perfect {
                    let score = (len as f64 / query_len) * self.perfect_score;
                    keep_best(&mut entry_hits, hit(score, len, MatchKind::Perfect));
                }

                // longest strict truncation of the alias that prefixes the query
                let shortest = min_partial_prefix_len.max(1);
                if let Some(i) = (shortest..len).rev().find(|i| query.starts_with(&text[..*i])) {
                    let score = map_linear(i as f64, 0.0, len as f64, 1.0, self.partial_score);
                    keep_best(&mut entry_hits, hit(score, i, MatchKind::Partial));
                }

                if !try_fuzzy || (perfect && len == query.len()) {
                    continue;
                }
                let first_matches = matches!(
                    (query.first(), text.first()),
                    (Some(a), Some(b)) if fold_char(*a) == fold_char(*b)
                );
                if !first_matches {
                    continue;
                }
                if let Some(distance) = edit_distance(query, text, max_edit_distance) {
                    let score =
                        map_linear(distance, max_edit_distance, 0.0, 0.0, self.partial_score);
                    keep_best(&mut entry_hits, hit(score, query.len(), MatchKind::Fuzzy));
                    // a fuzzy match settles this entry
                    break;
                }
            }

            hits.extend(entry_hits);
        }

        hits
    }
}

fn split_words(text: &[char]) -> Vec<&[char]> {
    text.split(|c| c.is_whitespace())
        .filter(|word| !word.is_empty())
        .collect()
}

/// Record `hit` unless the entry already has a better one of the same length
fn keep_best<'a, T>(hits: &mut Vec<TrieHit<'a, T>>, hit: TrieHit<'a, T>) {
    if hit.score <= 0.0 {
        return;
    }
    match hits.iter().position(|h| h.consumed == hit.consumed) {
        Some(i) if hits[i].score >= hit.score => {}
        Some(i) => hits[i] = hit,
        None => hits.push(hit),
    }
}

/// Weighted optimal-string-alignment distance, or `None` once it must exceed
/// `max`.
///
/// Costs: insertion and deletion 1, substitution 1, substitution differing
/// only in case 0.25, adjacent transposition 0.5.
pub fn edit_distance(a: &[char], b: &[char], max: f64) -> Option<f64> {
    let width = b.len() + 1;
    let mut before: Vec<f64> = Vec::new();
    let mut previous: Vec<f64> = (0..width).map(|j| j as f64).collect();

    for i in 1..=a.len() {
        let mut current = vec![0.0; width];
        current[0] = i as f64;

        for j in 1..width {
            let substitution = if a[i - 1] == b[j - 1] {
                0.0
            } else if fold_char(a[i - 1]) == fold_char(b[j - 1]) {
                0.25
            } else {
                1.0
            };

            let mut best = (previous[j] + 1.0)
                .min(current[j - 1] + 1.0)
                .min(previous[j - 1] + substitution);

            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(before[j - 2] + 0.5);
            }
            current[j] = best;
        }

        let row_min = current.iter().copied().fold(f64::INFINITY, f64::min);
        if row_min > max {
            return None;
        }

        before = previous;
        previous = current;
    }

    previous.last().copied().filter(|d| *d <= max)
}
