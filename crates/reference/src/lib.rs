//! Smoothed unigram reference models.
//!
//! A [`ReferenceTable`] maps tokens to probabilities and anchors the diff-mode
//! surprisal metrics: the less probable a token is under the reference, the
//! more surprising it is. Tables are built once from a token corpus and never
//! mutated afterwards, so they can be shared freely across concurrent
//! analyses.
//!
//! ## Contract
//!
//! - Building is a pure function of `(tokens, smoothing_k)`.
//! - Tokens are counted in input order and probabilities are emitted in
//!   first-occurrence order, so an identical token multiset always yields a
//!   bit-identical table and byte-identical serialized output.
//! - `smoothing_k == 0` is the maximum-likelihood estimate; `smoothing_k > 0`
//!   applies add-k (Lidstone) smoothing over the observed vocabulary.
//!   Out-of-vocabulary probability is a consumer concern and is never stored
//!   in the table.

mod error;
mod model;
mod store;

pub use crate::error::ReferenceError;
pub use crate::model::{build_reference, ReferenceTable};
pub use crate::store::{load_reference, save_reference, StoreError};
