//! Configuration surface for tokenizer selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which tokenizer strategy to construct.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// Built-in lowercasing word tokenizer.
    #[default]
    Legacy,
    /// Caller-supplied tokenizer implementation.
    External,
}

impl fmt::Display for TokenizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerKind::Legacy => f.write_str("legacy"),
            TokenizerKind::External => f.write_str("external"),
        }
    }
}

impl FromStr for TokenizerKind {
    type Err = TokenizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legacy" => Ok(TokenizerKind::Legacy),
            "external" => Ok(TokenizerKind::External),
            other => Err(TokenizeError::UnknownMethod(other.to_string())),
        }
    }
}

/// Tokenization settings, constructed once at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TokenizeConfig {
    /// Strategy to use.
    pub method: TokenizerKind,
    /// Whether an external tokenizer sees punctuation. The legacy strategy
    /// always treats non-word characters as separators and ignores this flag.
    pub include_punctuation: bool,
    /// Apply NFKC normalization before tokenizing.
    pub normalize_unicode: bool,
}

impl TokenizeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: TokenizerKind) -> Self {
        self.method = method;
        self
    }

    pub fn with_include_punctuation(mut self, include_punctuation: bool) -> Self {
        self.include_punctuation = include_punctuation;
        self
    }

    pub fn with_normalize_unicode(mut self, normalize_unicode: bool) -> Self {
        self.normalize_unicode = normalize_unicode;
        self
    }
}

impl Default for TokenizeConfig {
    fn default() -> Self {
        Self {
            method: TokenizerKind::Legacy,
            include_punctuation: true,
            normalize_unicode: false,
        }
    }
}

/// Errors raised while selecting or constructing a tokenizer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("unknown tokenizer method: {0}")]
    UnknownMethod(String),

    #[error("external tokenizer selected but none was supplied")]
    ExternalUnavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let cfg = TokenizeConfig::default();
        assert_eq!(cfg.method, TokenizerKind::Legacy);
        assert!(cfg.include_punctuation);
        assert!(!cfg.normalize_unicode);
    }

    #[test]
    fn config_builder_chain() {
        let cfg = TokenizeConfig::new()
            .with_method(TokenizerKind::External)
            .with_include_punctuation(false)
            .with_normalize_unicode(true);
        assert_eq!(cfg.method, TokenizerKind::External);
        assert!(!cfg.include_punctuation);
        assert!(cfg.normalize_unicode);
    }

    #[test]
    fn kind_parses_known_names() {
        assert_eq!("legacy".parse::<TokenizerKind>(), Ok(TokenizerKind::Legacy));
        assert_eq!(
            "external".parse::<TokenizerKind>(),
            Ok(TokenizerKind::External)
        );
    }

    #[test]
    fn kind_rejects_unknown_name() {
        assert_eq!(
            "bpe".parse::<TokenizerKind>(),
            Err(TokenizeError::UnknownMethod("bpe".to_string()))
        );
    }

    #[test]
    fn kind_display_round_trips() {
        for kind in [TokenizerKind::Legacy, TokenizerKind::External] {
            assert_eq!(kind.to_string().parse::<TokenizerKind>(), Ok(kind));
        }
    }

    #[test]
    fn config_serde_round_trip() {
        let cfg = TokenizeConfig::new().with_normalize_unicode(true);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: TokenizeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn config_deserializes_missing_fields_from_defaults() {
        let cfg: TokenizeConfig = serde_json::from_str("{\"method\":\"external\"}").unwrap();
        assert_eq!(cfg.method, TokenizerKind::External);
        assert!(cfg.include_punctuation);
    }
}
