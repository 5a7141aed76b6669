//! Fixed-size, fixed-stride window segmentation.
//!
//! Windows are produced lazily over a borrowed token slice. The segmenter is
//! restartable (clone the iterator) and purely positional: the windows for a
//! given `(len, window_size, step)` never depend on token content.

use crate::error::AnalysisError;

/// Lazy iterator over token windows.
///
/// Yields `&[S]` slices of exactly `window_size` tokens at offsets
/// `0, step, 2*step, ...`, dropping any trailing tokens that do not fill a
/// full window. A non-empty input shorter than `window_size` yields exactly
/// one window covering the whole input; an empty input yields none.
#[derive(Debug, Clone)]
pub struct Windows<'a, S> {
    tokens: &'a [S],
    window_size: usize,
    step: usize,
    offset: usize,
    done: bool,
}

/// Create a window iterator, validating the segmentation parameters.
pub fn windows<S>(
    tokens: &[S],
    window_size: usize,
    step: usize,
) -> Result<Windows<'_, S>, AnalysisError> {
    if window_size == 0 {
        return Err(AnalysisError::InvalidWindowSize { window_size });
    }
    if step == 0 {
        return Err(AnalysisError::InvalidStep { step });
    }
    Ok(Windows {
        tokens,
        window_size,
        step,
        offset: 0,
        done: false,
    })
}

impl<'a, S> Iterator for Windows<'a, S> {
    type Item = &'a [S];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let len = self.tokens.len();
        if len == 0 {
            self.done = true;
            return None;
        }
        if len < self.window_size {
            // Short-document policy: one window holding everything.
            self.done = true;
            return Some(self.tokens);
        }
        if self.offset + self.window_size > len {
            self.done = true;
            return None;
        }
        let window = &self.tokens[self.offset..self.offset + self.window_size];
        match self.offset.checked_add(self.step) {
            Some(next) => self.offset = next,
            None => self.done = true,
        }
        Some(window)
    }
}

/// Number of windows [`windows`] will yield for `token_count` tokens.
///
/// `floor((len - window_size) / step) + 1` for `len >= window_size`, `1` for
/// `0 < len < window_size`, `0` for an empty input.
pub fn window_count(
    token_count: usize,
    window_size: usize,
    step: usize,
) -> Result<usize, AnalysisError> {
    if window_size == 0 {
        return Err(AnalysisError::InvalidWindowSize { window_size });
    }
    if step == 0 {
        return Err(AnalysisError::InvalidStep { step });
    }
    Ok(if token_count == 0 {
        0
    } else if token_count < window_size {
        1
    } else {
        (token_count - window_size) / step + 1
    })
}
