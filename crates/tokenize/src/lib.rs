//! Tokenizer strategies for entroscope.
//!
//! Window analysis treats tokens as opaque string units, so tokenization is a
//! pluggable seam rather than a fixed algorithm. This crate defines the
//! [`Tokenizer`] trait and two strategies selected explicitly by
//! configuration:
//!
//! - **legacy** — Unicode lowercasing, non-word characters treated as
//!   separators, whitespace split. Self-contained and deterministic.
//! - **external** — an adapter around a caller-supplied [`Tokenizer`]
//!   implementation (e.g. a subword encoder binding). Selecting `external`
//!   without supplying an implementation is a constructor-time error; there
//!   is no silent fallback to the legacy strategy.
//!
//! Both strategies are pure functions of `(text, config)` with no I/O and no
//! process-global state.

pub mod config;
mod legacy;
mod strategy;

pub use crate::config::{TokenizeConfig, TokenizeError, TokenizerKind};
pub use crate::legacy::LegacyTokenizer;
pub use crate::strategy::{build_tokenizer, Tokenizer};
