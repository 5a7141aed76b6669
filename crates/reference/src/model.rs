//! Reference table construction.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ReferenceError;

/// Immutable token -> probability mapping.
///
/// Entries are kept in first-occurrence order of the corpus that produced
/// them, which keeps iteration and serialization deterministic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct ReferenceTable {
    probs: IndexMap<String, f64>,
}

impl ReferenceTable {
    /// Build a table from precomputed probabilities, preserving their order.
    ///
    /// Intended for loading persisted tables and for test fixtures; no
    /// normalization or validation is applied here.
    pub fn from_probabilities<I>(probs: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        Self {
            probs: probs.into_iter().collect(),
        }
    }

    /// Probability of `token`, or `None` when it is out of vocabulary.
    pub fn probability(&self, token: &str) -> Option<f64> {
        self.probs.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.probs.iter().map(|(token, prob)| (token.as_str(), *prob))
    }

    /// Sum of all stored probabilities, accumulated in entry order.
    pub fn probability_sum(&self) -> f64 {
        self.probs.values().sum()
    }
}

/// Build a smoothed unigram reference model from a token stream.
///
/// With `smoothing_k == 0` this is the maximum-likelihood estimate
/// `count / total`. With `smoothing_k > 0` it is the add-k estimate
/// `(count + k) / (total + k * vocabulary)`, which shifts probability mass
/// from frequent tokens toward rare ones while keeping every observed token
/// strictly positive. An empty token stream yields an empty table.
pub fn build_reference<S: AsRef<str>>(
    tokens: &[S],
    smoothing_k: f64,
) -> Result<ReferenceTable, ReferenceError> {
    if !smoothing_k.is_finite() || smoothing_k < 0.0 {
        return Err(ReferenceError::InvalidSmoothing { k: smoothing_k });
    }

    let mut counts: IndexMap<&str, u64> = IndexMap::new();
    for token in tokens {
        *counts.entry(token.as_ref()).or_insert(0) += 1;
    }

    let total = tokens.len();
    if total == 0 {
        return Ok(ReferenceTable::default());
    }

    let mut probs = IndexMap::with_capacity(counts.len());
    if smoothing_k == 0.0 {
        let total = total as f64;
        for (token, count) in counts {
            probs.insert(token.to_string(), count as f64 / total);
        }
    } else {
        let vocabulary = counts.len() as f64;
        let denominator = total as f64 + smoothing_k * vocabulary;
        for (token, count) in counts {
            probs.insert(token.to_string(), (count as f64 + smoothing_k) / denominator);
        }
    }

    Ok(ReferenceTable { probs })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<&'static str> {
        vec!["the", "cat", "sat", "on", "the", "mat", "the"]
    }

    #[test]
    fn empty_corpus_yields_empty_table() {
        let table = build_reference::<&str>(&[], 0.0).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.probability_sum(), 0.0);
    }

    #[test]
    fn maximum_likelihood_probabilities() {
        let table = build_reference(&corpus(), 0.0).unwrap();
        assert_eq!(table.probability("the"), Some(3.0 / 7.0));
        assert_eq!(table.probability("cat"), Some(1.0 / 7.0));
        assert_eq!(table.probability("dog"), None);
    }

    #[test]
    fn probabilities_sum_to_one_without_smoothing() {
        let table = build_reference(&corpus(), 0.0).unwrap();
        assert!((table.probability_sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn smoothing_applies_add_k_formula() {
        let table = build_reference(&corpus(), 0.5).unwrap();
        // 5 distinct tokens, 7 total: denominator = 7 + 0.5 * 5.
        assert_eq!(table.probability("the"), Some(3.5 / 9.5));
        assert_eq!(table.probability("cat"), Some(1.5 / 9.5));
    }

    #[test]
    fn smoothing_shifts_mass_away_from_frequent_tokens() {
        let mut previous = f64::INFINITY;
        for k in [0.0, 0.1, 0.5, 1.0, 2.0] {
            let table = build_reference(&corpus(), k).unwrap();
            let p_most_frequent = table.probability("the").unwrap();
            assert!(p_most_frequent > 0.0);
            assert!(
                p_most_frequent < previous,
                "probability of the most frequent token must decrease as k grows"
            );
            previous = p_most_frequent;
        }
    }

    #[test]
    fn negative_smoothing_is_rejected() {
        let err = build_reference(&corpus(), -0.1).err().unwrap();
        assert_eq!(err, ReferenceError::InvalidSmoothing { k: -0.1 });
    }

    #[test]
    fn non_finite_smoothing_is_rejected() {
        assert!(build_reference(&corpus(), f64::NAN).is_err());
        assert!(build_reference(&corpus(), f64::INFINITY).is_err());
    }

    #[test]
    fn entries_keep_first_occurrence_order() {
        let table = build_reference(&corpus(), 0.0).unwrap();
        let tokens: Vec<&str> = table.iter().map(|(token, _)| token).collect();
        assert_eq!(tokens, vec!["the", "cat", "sat", "on", "mat"]);
    }

    #[test]
    fn identical_multisets_yield_identical_tables() {
        let a = build_reference(&corpus(), 0.25).unwrap();
        let b = build_reference(&corpus(), 0.25).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
