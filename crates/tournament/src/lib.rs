//! Dual-reference tournament comparator.
//!
//! Runs the batch window analyzer twice per document — once against a
//! human-anchored reference model, once against a synthetic-anchored one —
//! over a single shared segmentation, and combines the two window-aligned
//! record streams into a signed delta and a burstiness value per window.
//!
//! ## Contract
//!
//! - Both reference evaluations share one segmentation, so their record
//!   sequences pair positionally. A window-count mismatch is a fatal
//!   integrity failure for that document, never silently truncated or
//!   padded.
//! - `delta_h = mean surprisal vs. human reference − mean surprisal vs.
//!   synthetic reference`: positive means the text is more surprising to the
//!   human-anchored model. The sign is emitted exactly as computed;
//!   classification thresholds are downstream policy.
//! - Documents are independent: the engine may process them on a rayon pool,
//!   and the concatenated output order (human set, then ai set, filenames
//!   sorted within each, windows positional) does not depend on execution
//!   order.

mod engine;
mod types;

pub use crate::engine::Tournament;
pub use crate::types::{DocLabel, Document, TournamentError, TournamentRecord};
