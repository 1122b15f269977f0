//! Constitutional categories and the ranking over quiz answers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ayurvedic constitutional category
///
/// Declaration order is the enumeration order used to break ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dosha {
    Vata,
    Pitta,
    Kapha,
}

impl Dosha {
    /// All categories in enumeration order
    pub const ALL: [Dosha; 3] = [Dosha::Vata, Dosha::Pitta, Dosha::Kapha];

    /// Parse a raw answer token, `None` for anything outside the enumeration
    pub fn parse(token: &str) -> Option<Dosha> {
        match token {
            "vata" => Some(Dosha::Vata),
            "pitta" => Some(Dosha::Pitta),
            "kapha" => Some(Dosha::Kapha),
            _ => None,
        }
    }

    /// Wire token
    pub fn as_str(&self) -> &'static str {
        match self {
            Dosha::Vata => "vata",
            Dosha::Pitta => "pitta",
            Dosha::Kapha => "kapha",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Dosha::Vata => "Vata",
            Dosha::Pitta => "Pitta",
            Dosha::Kapha => "Kapha",
        }
    }

    fn index(&self) -> usize {
        match self {
            Dosha::Vata => 0,
            Dosha::Pitta => 1,
            Dosha::Kapha => 2,
        }
    }
}

impl fmt::Display for Dosha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ranked outcome of the constitutional quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Most frequent category
    pub primary: Dosha,

    /// Second most frequent category
    pub secondary: Dosha,

    /// Per-category tallies in enumeration order
    pub counts: Vec<(Dosha, usize)>,
}

impl Classification {
    /// Tally answers of the given count vector and rank them
    ///
    /// Ranking is a stable descending sort over `(dosha, count)` pairs laid
    /// out in enumeration order, so equal counts keep enumeration order.
    /// With no answers at all the result is Vata then Pitta.
    fn rank(tally: [usize; 3]) -> Self {
        let counts: Vec<(Dosha, usize)> = Dosha::ALL
            .iter()
            .map(|d| (*d, tally[d.index()]))
            .collect();

        let mut ranked = counts.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            primary: ranked[0].0,
            secondary: ranked[1].0,
            counts,
        }
    }

    /// Count for a single category
    pub fn count(&self, dosha: Dosha) -> usize {
        self.counts
            .iter()
            .find(|(d, _)| *d == dosha)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// Total answers that contributed to the tally
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, c)| c).sum()
    }
}

/// Classify typed quiz answers
pub fn classify(answers: &BTreeMap<String, Dosha>) -> Classification {
    let mut tally = [0usize; 3];
    for dosha in answers.values() {
        tally[dosha.index()] += 1;
    }
    Classification::rank(tally)
}

/// Classify raw answer tokens, silently skipping unknown ones
pub fn classify_tokens<'a, I>(tokens: I) -> Classification
where
    I: IntoIterator<Item = &'a str>,
{
    let mut tally = [0usize; 3];
    for dosha in tokens.into_iter().filter_map(Dosha::parse) {
        tally[dosha.index()] += 1;
    }
    Classification::rank(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, Dosha)]) -> BTreeMap<String, Dosha> {
        pairs.iter().map(|(q, d)| (q.to_string(), *d)).collect()
    }

    #[test]
    fn test_majority_wins() {
        let result = classify(&answers(&[
            ("q1", Dosha::Vata),
            ("q2", Dosha::Vata),
            ("q3", Dosha::Pitta),
        ]));
        assert_eq!(result.primary, Dosha::Vata);
        assert_eq!(result.secondary, Dosha::Pitta);
        assert_eq!(result.count(Dosha::Vata), 2);
        assert_eq!(result.count(Dosha::Kapha), 0);
    }

    #[test]
    fn test_empty_answers_are_deterministic() {
        let result = classify(&BTreeMap::new());
        assert_eq!(result.primary, Dosha::Vata);
        assert_eq!(result.secondary, Dosha::Pitta);
        assert_eq!(result.total(), 0);
    }

    #[test]
    fn test_ties_keep_enumeration_order() {
        let result = classify(&answers(&[("q1", Dosha::Kapha), ("q2", Dosha::Pitta)]));
        assert_eq!(result.primary, Dosha::Pitta);
        assert_eq!(result.secondary, Dosha::Kapha);
    }

    #[test]
    fn test_leader_with_tied_runners_up() {
        let result = classify(&answers(&[
            ("q1", Dosha::Kapha),
            ("q2", Dosha::Kapha),
            ("q3", Dosha::Pitta),
            ("q4", Dosha::Vata),
        ]));
        assert_eq!(result.primary, Dosha::Kapha);
        assert_eq!(result.secondary, Dosha::Vata);
    }

    #[test]
    fn test_unknown_tokens_ignored() {
        let result = classify_tokens(["pitta", "earth", "pitta", "", "kapha"]);
        assert_eq!(result.primary, Dosha::Pitta);
        assert_eq!(result.secondary, Dosha::Kapha);
        assert_eq!(result.total(), 3);
    }

    #[test]
    fn test_counts_in_enumeration_order() {
        let result = classify_tokens(["kapha", "kapha"]);
        let order: Vec<Dosha> = result.counts.iter().map(|(d, _)| *d).collect();
        assert_eq!(order, Dosha::ALL.to_vec());
    }

    #[test]
    fn test_parse_round_trip() {
        for dosha in Dosha::ALL {
            assert_eq!(Dosha::parse(dosha.as_str()), Some(dosha));
        }
        assert_eq!(Dosha::parse("Vata"), None);
    }
}
