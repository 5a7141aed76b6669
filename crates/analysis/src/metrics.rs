//! Pure per-window metric functions.
//!
//! Every function here is numerically defensive: probabilities are clipped
//! into `[EPSILON, 1]` before any logarithm, and summation order is fixed
//! (distinct tokens in first-occurrence order, per-token values in window
//! order) so repeated runs produce bit-identical floats.

use std::collections::HashSet;

use indexmap::IndexMap;
use reference::ReferenceTable;

use crate::error::AnalysisError;

/// Probability floor applied before any logarithm.
pub const EPSILON: f64 = 1e-10;

pub(crate) fn validate_log_base(log_base: f64) -> Result<(), AnalysisError> {
    if !log_base.is_finite() || log_base <= 0.0 || log_base == 1.0 {
        return Err(AnalysisError::InvalidLogBase { log_base });
    }
    Ok(())
}

pub(crate) fn validate_unknown_prob(unknown_prob: f64) -> Result<(), AnalysisError> {
    if !unknown_prob.is_finite() || unknown_prob <= 0.0 {
        return Err(AnalysisError::InvalidUnknownProb { unknown_prob });
    }
    Ok(())
}

#[inline]
fn clip(p: f64) -> f64 {
    p.clamp(EPSILON, 1.0)
}

/// Empirical unigram distribution over the window's own tokens, keyed in
/// first-occurrence order.
fn empirical_distribution<S: AsRef<str>>(tokens: &[S]) -> IndexMap<&str, f64> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for token in tokens {
        *counts.entry(token.as_ref()).or_insert(0) += 1;
    }
    let total = tokens.len() as f64;
    counts
        .into_iter()
        .map(|(token, count)| (token, count as f64 / total))
        .collect()
}

fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values
        .iter()
        .map(|value| {
            let d = value - mean;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64
}

/// Shannon entropy of the window's empirical distribution, in units of
/// `log_base`. Empty windows have entropy `0.0`.
pub fn shannon_entropy<S: AsRef<str>>(tokens: &[S], log_base: f64) -> Result<f64, AnalysisError> {
    validate_log_base(log_base)?;
    if tokens.is_empty() {
        return Ok(0.0);
    }
    let ln_base = log_base.ln();
    let mut entropy = 0.0;
    for (_, p) in empirical_distribution(tokens) {
        let p = clip(p);
        entropy -= p * (p.ln() / ln_base);
    }
    Ok(entropy)
}

/// Surprisal of a single token under a reference model.
pub fn token_surprisal(
    token: &str,
    reference: &ReferenceTable,
    log_base: f64,
    unknown_prob: f64,
) -> Result<f64, AnalysisError> {
    validate_log_base(log_base)?;
    validate_unknown_prob(unknown_prob)?;
    let p = clip(reference.probability(token).unwrap_or(unknown_prob));
    Ok(-(p.ln() / log_base.ln()))
}

/// Population variance of each token's self-information under the window's
/// own empirical distribution.
///
/// This is not the entropy: it measures how unevenly predictable the window
/// is internally, a burstiness-like signal.
pub fn entropy_variance<S: AsRef<str>>(tokens: &[S], log_base: f64) -> Result<f64, AnalysisError> {
    validate_log_base(log_base)?;
    if tokens.is_empty() {
        return Ok(0.0);
    }
    let probs = empirical_distribution(tokens);
    let ln_base = log_base.ln();
    let surprisals: Vec<f64> = tokens
        .iter()
        .map(|token| {
            let p = clip(probs.get(token.as_ref()).copied().unwrap_or(0.0));
            -(p.ln() / ln_base)
        })
        .collect();
    Ok(population_variance(&surprisals))
}

/// Mean and population variance of per-token surprisal against a reference
/// model.
///
/// Tokens missing from the reference fall back to `unknown_prob`. The
/// variance is computed from the same clipped values as the mean, so the two
/// statistics are always mutually consistent. Empty windows yield
/// `(0.0, 0.0)`.
pub fn surprisal_stats<S: AsRef<str>>(
    tokens: &[S],
    reference: &ReferenceTable,
    log_base: f64,
    unknown_prob: f64,
) -> Result<(f64, f64), AnalysisError> {
    validate_log_base(log_base)?;
    validate_unknown_prob(unknown_prob)?;
    if tokens.is_empty() {
        return Ok((0.0, 0.0));
    }
    let ln_base = log_base.ln();
    let surprisals: Vec<f64> = tokens
        .iter()
        .map(|token| {
            let p = clip(
                reference
                    .probability(token.as_ref())
                    .unwrap_or(unknown_prob),
            );
            -(p.ln() / ln_base)
        })
        .collect();
    let mean = surprisals.iter().sum::<f64>() / surprisals.len() as f64;
    Ok((mean, population_variance(&surprisals)))
}

/// Distinct-token share of the window; `0.0` for an empty window.
pub fn unique_ratio<S: AsRef<str>>(tokens: &[S]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let distinct: HashSet<&str> = tokens.iter().map(AsRef::as_ref).collect();
    distinct.len() as f64 / tokens.len() as f64
}
