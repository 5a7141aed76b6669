//! Window compression ratios.
//!
//! Compression ratio is a proxy for local lexical/structural redundancy:
//! lower ratio means more redundant, more predictable text. Four
//! general-purpose compressors of materially different strength are
//! supported so the ratio can be tuned against corpus size.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Supported window compressors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompressionAlgorithm {
    /// LZ77 + range coding (xz).
    Lzma,
    /// LZ77 + Huffman with gzip framing.
    Gzip,
    /// Burrows-Wheeler transform.
    Bz2,
    /// Raw deflate with zlib framing.
    Zlib,
}

impl CompressionAlgorithm {
    pub const ALL: [CompressionAlgorithm; 4] = [
        CompressionAlgorithm::Lzma,
        CompressionAlgorithm::Gzip,
        CompressionAlgorithm::Bz2,
        CompressionAlgorithm::Zlib,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CompressionAlgorithm::Lzma => "lzma",
            CompressionAlgorithm::Gzip => "gzip",
            CompressionAlgorithm::Bz2 => "bz2",
            CompressionAlgorithm::Zlib => "zlib",
        }
    }
}

impl Default for CompressionAlgorithm {
    fn default() -> Self {
        CompressionAlgorithm::Zlib
    }
}

impl fmt::Display for CompressionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompressionAlgorithm {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lzma" => Ok(CompressionAlgorithm::Lzma),
            "gzip" => Ok(CompressionAlgorithm::Gzip),
            "bz2" => Ok(CompressionAlgorithm::Bz2),
            "zlib" => Ok(CompressionAlgorithm::Zlib),
            other => Err(AnalysisError::UnknownCompression(other.to_string())),
        }
    }
}

/// Ratio of compressed to raw byte length for `text` encoded as UTF-8.
///
/// Empty input yields exactly `0.0`.
pub fn compression_ratio(
    text: &str,
    algorithm: CompressionAlgorithm,
) -> Result<f64, AnalysisError> {
    let raw = text.as_bytes();
    if raw.is_empty() {
        return Ok(0.0);
    }
    let compressed = compress(raw, algorithm)?;
    Ok(compressed.len() as f64 / raw.len() as f64)
}

fn compress(raw: &[u8], algorithm: CompressionAlgorithm) -> Result<Vec<u8>, AnalysisError> {
    match algorithm {
        CompressionAlgorithm::Lzma => {
            let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
            encoder.write_all(raw).map_err(to_error)?;
            encoder.finish().map_err(to_error)
        }
        CompressionAlgorithm::Gzip => {
            let mut encoder =
                flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(raw).map_err(to_error)?;
            encoder.finish().map_err(to_error)
        }
        CompressionAlgorithm::Bz2 => {
            let mut encoder =
                bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
            encoder.write_all(raw).map_err(to_error)?;
            encoder.finish().map_err(to_error)
        }
        CompressionAlgorithm::Zlib => {
            let mut encoder =
                flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(raw).map_err(to_error)?;
            encoder.finish().map_err(to_error)
        }
    }
}

fn to_error(err: std::io::Error) -> AnalysisError {
    AnalysisError::Compression(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_exactly_zero() {
        for algorithm in CompressionAlgorithm::ALL {
            assert_eq!(compression_ratio("", algorithm).unwrap(), 0.0);
        }
    }

    #[test]
    fn ratio_is_positive_for_non_empty_input() {
        for algorithm in CompressionAlgorithm::ALL {
            let ratio = compression_ratio("alpha beta gamma", algorithm).unwrap();
            assert!(ratio > 0.0, "{algorithm} produced ratio {ratio}");
        }
    }

    #[test]
    fn redundant_text_compresses_better_than_varied_text() {
        let redundant = "token ".repeat(400);
        let varied: String = (0..400).map(|i| format!("tok{i} ")).collect();
        for algorithm in CompressionAlgorithm::ALL {
            let r_redundant = compression_ratio(&redundant, algorithm).unwrap();
            let r_varied = compression_ratio(&varied, algorithm).unwrap();
            assert!(
                r_redundant < r_varied,
                "{algorithm}: {r_redundant} !< {r_varied}"
            );
        }
    }

    #[test]
    fn ratio_is_deterministic() {
        let text = "the quick brown fox jumps over the lazy dog";
        for algorithm in CompressionAlgorithm::ALL {
            let a = compression_ratio(text, algorithm).unwrap();
            let b = compression_ratio(text, algorithm).unwrap();
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn names_parse_and_display_round_trip() {
        for algorithm in CompressionAlgorithm::ALL {
            assert_eq!(
                algorithm.to_string().parse::<CompressionAlgorithm>().unwrap(),
                algorithm
            );
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!(matches!(
            "zstd".parse::<CompressionAlgorithm>(),
            Err(AnalysisError::UnknownCompression(ref name)) if name == "zstd"
        ));
    }
}
