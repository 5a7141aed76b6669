//! Tournament engine.

use rayon::prelude::*;
use tracing::debug;

use analysis::{analyze_tokens_batch, AnalysisConfig, AnalysisMode, WindowRecord};
use reference::ReferenceTable;

use crate::types::{DocLabel, Document, TournamentError, TournamentRecord};

const HUMAN_REF: &str = "human";
const SYNTHETIC_REF: &str = "synthetic";

/// Dual-reference comparator over labeled document sets.
///
/// Holds the two reference models and the shared analysis configuration.
/// Reference tables are read-only after construction, so one engine can be
/// used from any number of threads.
pub struct Tournament {
    cfg: AnalysisConfig,
    human_ref: ReferenceTable,
    synthetic_ref: ReferenceTable,
    use_parallel: bool,
}

impl Tournament {
    /// Construct an engine. The analysis mode is forced to diff — the
    /// tournament is meaningless without references — and the remaining
    /// configuration is validated up front.
    pub fn new(
        cfg: AnalysisConfig,
        human_ref: ReferenceTable,
        synthetic_ref: ReferenceTable,
    ) -> Result<Self, TournamentError> {
        let cfg = cfg.with_mode(AnalysisMode::Diff);
        cfg.validate()?;
        Ok(Self {
            cfg,
            human_ref,
            synthetic_ref,
            use_parallel: false,
        })
    }

    /// Process documents on the rayon pool. Output is identical to the
    /// serial path; only wall-clock time changes.
    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Compare every document in both sets and concatenate the results:
    /// human set first, then ai set, filenames sorted within each set,
    /// windows in positional order.
    pub fn run(
        &self,
        human_docs: &[Document],
        ai_docs: &[Document],
    ) -> Result<Vec<TournamentRecord>, TournamentError> {
        let mut records = self.run_label(human_docs, DocLabel::Human)?;
        records.extend(self.run_label(ai_docs, DocLabel::Ai)?);
        Ok(records)
    }

    fn run_label(
        &self,
        docs: &[Document],
        label: DocLabel,
    ) -> Result<Vec<TournamentRecord>, TournamentError> {
        let mut ordered: Vec<&Document> = docs.iter().collect();
        ordered.sort_by(|a, b| a.filename.cmp(&b.filename));

        let per_doc: Result<Vec<Vec<TournamentRecord>>, TournamentError> = if self.use_parallel {
            ordered
                .par_iter()
                .map(|doc| self.compare_document(doc, label))
                .collect()
        } else {
            ordered
                .iter()
                .map(|doc| self.compare_document(doc, label))
                .collect()
        };
        Ok(per_doc?.into_iter().flatten().collect())
    }

    /// Compare one document against both references over a single shared
    /// segmentation.
    pub fn compare_document(
        &self,
        doc: &Document,
        label: DocLabel,
    ) -> Result<Vec<TournamentRecord>, TournamentError> {
        let mut by_ref = analyze_tokens_batch(
            &doc.tokens,
            &self.cfg,
            &[
                (HUMAN_REF, &self.human_ref),
                (SYNTHETIC_REF, &self.synthetic_ref),
            ],
        )?;
        // Batch output preserves input order: human first, synthetic second.
        let synthetic_rows = by_ref.pop().map(|(_, rows)| rows).unwrap_or_default();
        let human_rows = by_ref.pop().map(|(_, rows)| rows).unwrap_or_default();
        debug!(
            filename = %doc.filename,
            %label,
            windows = human_rows.len(),
            "compared document"
        );
        pair_window_records(&doc.filename, label, &human_rows, &synthetic_rows)
    }
}

/// Combine two window-aligned record streams into tournament records.
///
/// The streams must agree in length; a mismatch means the segmentations
/// diverged and positional pairing would silently corrupt the output.
fn pair_window_records(
    filename: &str,
    label: DocLabel,
    human_rows: &[WindowRecord],
    synthetic_rows: &[WindowRecord],
) -> Result<Vec<TournamentRecord>, TournamentError> {
    if human_rows.len() != synthetic_rows.len() {
        return Err(TournamentError::WindowCountMismatch {
            filename: filename.to_string(),
            human_windows: human_rows.len(),
            synthetic_windows: synthetic_rows.len(),
        });
    }
    Ok(human_rows
        .iter()
        .zip(synthetic_rows)
        .map(|(human, synthetic)| TournamentRecord {
            filename: filename.to_string(),
            window_id: human.window_id,
            label,
            delta_h: human.mean_entropy - synthetic.mean_entropy,
            burstiness: human.entropy_variance,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reference::build_reference;

    fn record(window_id: usize, mean_entropy: f64, entropy_variance: f64) -> WindowRecord {
        WindowRecord {
            window_id,
            mean_entropy,
            entropy_variance,
            compression_ratio: 0.5,
            unique_ratio: 1.0,
        }
    }

    fn small_cfg() -> AnalysisConfig {
        AnalysisConfig::new().with_window_size(4).with_step(2)
    }

    fn human_like_tokens() -> Vec<String> {
        (0..24).map(|i| format!("h{}", i % 6)).collect()
    }

    fn ai_like_tokens() -> Vec<String> {
        (0..24).map(|i| format!("a{}", i % 3)).collect()
    }

    fn engine() -> Tournament {
        let human_ref = build_reference(&human_like_tokens(), 0.5).unwrap();
        let synthetic_ref = build_reference(&ai_like_tokens(), 0.5).unwrap();
        Tournament::new(small_cfg(), human_ref, synthetic_ref).unwrap()
    }

    #[test]
    fn pairing_mismatch_is_an_integrity_error() {
        let human_rows = vec![record(0, 1.0, 0.1), record(1, 1.1, 0.2)];
        let synthetic_rows = vec![record(0, 0.9, 0.3)];
        let err =
            pair_window_records("doc.txt", DocLabel::Human, &human_rows, &synthetic_rows)
                .err()
                .unwrap();
        assert_eq!(
            err,
            TournamentError::WindowCountMismatch {
                filename: "doc.txt".to_string(),
                human_windows: 2,
                synthetic_windows: 1,
            }
        );
    }

    #[test]
    fn pairing_computes_delta_and_burstiness() {
        let human_rows = vec![record(0, 2.0, 0.7)];
        let synthetic_rows = vec![record(0, 0.5, 0.9)];
        let records =
            pair_window_records("doc.txt", DocLabel::Ai, &human_rows, &synthetic_rows).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].delta_h, 1.5);
        assert_eq!(records[0].burstiness, 0.7);
        assert_eq!(records[0].label, DocLabel::Ai);
        assert_eq!(records[0].window_id, 0);
    }

    #[test]
    fn compare_document_emits_one_record_per_window() {
        let doc = Document::new("sample.txt", human_like_tokens());
        let records = engine().compare_document(&doc, DocLabel::Human).unwrap();
        // 24 tokens, window 4, step 2 -> floor((24 - 4) / 2) + 1 = 11.
        assert_eq!(records.len(), 11);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.window_id, i);
            assert_eq!(record.filename, "sample.txt");
        }
    }

    #[test]
    fn delta_sign_tracks_which_reference_explains_the_text() {
        let engine = engine();
        // Human-vocabulary text is unsurprising to the human reference and
        // out-of-vocabulary for the synthetic one: delta_h is negative.
        let human_doc = Document::new("h.txt", human_like_tokens());
        let records = engine.compare_document(&human_doc, DocLabel::Human).unwrap();
        assert!(records.iter().all(|r| r.delta_h < 0.0));

        // And symmetrically for synthetic-vocabulary text.
        let ai_doc = Document::new("a.txt", ai_like_tokens());
        let records = engine.compare_document(&ai_doc, DocLabel::Ai).unwrap();
        assert!(records.iter().all(|r| r.delta_h > 0.0));
    }

    #[test]
    fn run_orders_output_by_label_then_filename() {
        let engine = engine();
        let human_docs = vec![
            Document::new("b.txt", human_like_tokens()),
            Document::new("a.txt", human_like_tokens()),
        ];
        let ai_docs = vec![Document::new("z.txt", ai_like_tokens())];
        let records = engine.run(&human_docs, &ai_docs).unwrap();

        let mut seen = Vec::new();
        for record in &records {
            let key = (record.label, record.filename.clone());
            if seen.last() != Some(&key) {
                seen.push(key);
            }
        }
        assert_eq!(
            seen,
            vec![
                (DocLabel::Human, "a.txt".to_string()),
                (DocLabel::Human, "b.txt".to_string()),
                (DocLabel::Ai, "z.txt".to_string()),
            ]
        );
    }

    #[test]
    fn parallel_and_serial_runs_are_identical() {
        let human_docs = vec![
            Document::new("a.txt", human_like_tokens()),
            Document::new("b.txt", ai_like_tokens()),
            Document::new("c.txt", human_like_tokens()),
        ];
        let ai_docs = vec![
            Document::new("x.txt", ai_like_tokens()),
            Document::new("y.txt", human_like_tokens()),
        ];
        let serial = engine().run(&human_docs, &ai_docs).unwrap();
        let parallel = engine()
            .with_parallel(true)
            .run(&human_docs, &ai_docs)
            .unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn empty_document_contributes_no_records() {
        let doc = Document::new("empty.txt", Vec::new());
        let records = engine().compare_document(&doc, DocLabel::Human).unwrap();
        assert!(records.is_empty());
    }
}
