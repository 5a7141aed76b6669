//! Tokenizer trait and strategy construction.

use unicode_normalization::UnicodeNormalization;

use crate::config::{TokenizeConfig, TokenizeError, TokenizerKind};
use crate::legacy::{collapse_non_word, LegacyTokenizer};

/// A tokenizer turns raw text into an ordered token stream.
///
/// Implementations must be deterministic: identical input text always yields
/// an identical token sequence.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Adapter that applies the configured preprocessing before delegating to a
/// caller-supplied tokenizer.
struct ExternalAdapter {
    inner: Box<dyn Tokenizer>,
    include_punctuation: bool,
    normalize_unicode: bool,
}

impl Tokenizer for ExternalAdapter {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized;
        let text = if self.normalize_unicode {
            normalized = text.nfkc().collect::<String>();
            normalized.as_str()
        } else {
            text
        };
        if self.include_punctuation {
            self.inner.tokenize(text)
        } else {
            self.inner.tokenize(&collapse_non_word(text))
        }
    }
}

/// Construct the tokenizer the configuration asks for.
///
/// `external` carries the caller-supplied implementation used when
/// `cfg.method` is [`TokenizerKind::External`]. Selecting the external
/// strategy without supplying one fails with
/// [`TokenizeError::ExternalUnavailable`] instead of substituting the legacy
/// tokenizer, so a missing dependency is visible at construction time.
pub fn build_tokenizer(
    cfg: &TokenizeConfig,
    external: Option<Box<dyn Tokenizer>>,
) -> Result<Box<dyn Tokenizer>, TokenizeError> {
    match cfg.method {
        TokenizerKind::Legacy => Ok(Box::new(LegacyTokenizer::new(cfg.normalize_unicode))),
        TokenizerKind::External => {
            let inner = external.ok_or(TokenizeError::ExternalUnavailable)?;
            Ok(Box::new(ExternalAdapter {
                inner,
                include_punctuation: cfg.include_punctuation,
                normalize_unicode: cfg.normalize_unicode,
            }))
        }
    }
}
