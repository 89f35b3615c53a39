//! The external variant-function classifier seam.
//!
//! Variants that land in a gene window without a curated definition are
//! classified per distinct key on a small worker pool. The caller waits a
//! bounded amount of time; anything that has not come back by then is left
//! out and the resolver falls back to normal function for it.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{RecvTimeoutError, bounded, unbounded};
use fxhash::FxHashMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pgxr_annotate::AnnotatedVariant;
use pgxr_core::models::{FunctionClass, VariantKey};

use crate::models::{ClassificationMap, ExternalClassification};

pub const DEFAULT_CLASSIFIER_TIMEOUT: Duration = Duration::from_millis(5000);
pub const DEFAULT_CLASSIFIER_WORKERS: usize = 4;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Classification confidence for {key} must be within [0, 1], got {confidence}")]
    InvalidConfidence { key: VariantKey, confidence: f64 },

    #[error("Duplicate classification for {0}")]
    DuplicateKey(VariantKey),

    #[error("Failed to parse classification table: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

///
/// Anything that can give a functional verdict for a single variant key.
/// Returning `None` means "no opinion", which is never an error.
///
pub trait VariantFunctionClassifier: Send + Sync {
    fn classify(&self, key: &VariantKey) -> Option<ExternalClassification>;
}

impl<F> VariantFunctionClassifier for F
where
    F: Fn(&VariantKey) -> Option<ExternalClassification> + Send + Sync,
{
    fn classify(&self, key: &VariantKey) -> Option<ExternalClassification> {
        self(key)
    }
}

/// One row of a precomputed classification table on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationEntry {
    #[serde(flatten)]
    pub key: VariantKey,
    pub function_class: FunctionClass,
    pub confidence: f64,
}

///
/// A classifier backed by a precomputed key -> result table.
///
#[derive(Debug, Clone, Default)]
pub struct StaticClassifier {
    results: FxHashMap<VariantKey, ExternalClassification>,
}

impl StaticClassifier {
    pub fn from_entries<I>(entries: I) -> Result<Self, ClassifierError>
    where
        I: IntoIterator<Item = ClassificationEntry>,
    {
        let mut results = FxHashMap::default();
        for entry in entries {
            if !(0.0..=1.0).contains(&entry.confidence) {
                return Err(ClassifierError::InvalidConfidence {
                    key: entry.key,
                    confidence: entry.confidence,
                });
            }
            if results.contains_key(&entry.key) {
                return Err(ClassifierError::DuplicateKey(entry.key));
            }
            results.insert(
                entry.key,
                ExternalClassification {
                    function_class: entry.function_class,
                    confidence: entry.confidence,
                },
            );
        }
        Ok(StaticClassifier { results })
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl TryFrom<&Path> for StaticClassifier {
    type Error = ClassifierError;

    ///
    /// Load a JSON array of `{chrom, pos, ref, alt, function_class, confidence}`
    /// objects.
    ///
    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let reader = BufReader::new(File::open(path)?);
        let entries: Vec<ClassificationEntry> = serde_json::from_reader(reader)?;
        StaticClassifier::from_entries(entries)
    }
}

impl VariantFunctionClassifier for StaticClassifier {
    fn classify(&self, key: &VariantKey) -> Option<ExternalClassification> {
        self.results.get(key).copied()
    }
}

/// How long to wait for the classifier, and on how many threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectOptions {
    pub timeout: Duration,
    pub workers: usize,
}

impl Default for CollectOptions {
    fn default() -> Self {
        CollectOptions {
            timeout: DEFAULT_CLASSIFIER_TIMEOUT,
            workers: DEFAULT_CLASSIFIER_WORKERS,
        }
    }
}

/// Distinct keys of the variants flagged for external classification, sorted.
pub fn flagged_keys(annotated: &[AnnotatedVariant]) -> Vec<VariantKey> {
    annotated
        .iter()
        .filter(|v| v.needs_external_classification)
        .map(|v| v.key())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

///
/// Query the classifier for every distinct flagged key and collect whatever
/// arrives before the deadline.
///
/// Keys are fanned out to `options.workers` threads. The returned map only
/// holds keys the classifier answered for in time. Workers still running at
/// the deadline are left to finish on their own; their late results are
/// discarded.
///
pub fn collect_classifications(
    annotated: &[AnnotatedVariant],
    classifier: Arc<dyn VariantFunctionClassifier>,
    options: &CollectOptions,
) -> ClassificationMap {
    let keys = flagged_keys(annotated);
    let mut classifications = ClassificationMap::default();
    if keys.is_empty() {
        return classifications;
    }

    let deadline = Instant::now() + options.timeout;
    let expected = keys.len();
    let workers = options.workers.clamp(1, expected);

    let (job_tx, job_rx) = bounded::<VariantKey>(expected);
    let (result_tx, result_rx) = unbounded::<(VariantKey, Option<ExternalClassification>)>();

    for key in keys {
        // capacity equals the number of keys, so this never blocks
        if job_tx.send(key).is_err() {
            break;
        }
    }
    drop(job_tx);

    for _ in 0..workers {
        let job_rx = job_rx.clone();
        let result_tx = result_tx.clone();
        let classifier = Arc::clone(&classifier);
        thread::spawn(move || {
            for key in job_rx {
                if Instant::now() >= deadline {
                    break;
                }
                let result = classifier.classify(&key);
                if result_tx.send((key, result)).is_err() {
                    break;
                }
            }
        });
    }
    drop(result_tx);

    let mut received = 0;
    while received < expected {
        match result_rx.recv_deadline(deadline) {
            Ok((key, Some(result))) => {
                debug!("{} classified as {}", key, result.function_class);
                received += 1;
                classifications.insert(key, result);
            }
            Ok((key, None)) => {
                debug!("Classifier had no result for {}", key);
                received += 1;
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    "Classifier deadline of {:?} elapsed with {} of {} keys outstanding",
                    options.timeout,
                    expected - received,
                    expected
                );
                break;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    info!(
        "Collected {} external classifications for {} flagged keys",
        classifications.len(),
        expected
    );

    classifications
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pgxr_annotate::{ReferenceTables, annotate_variants};
    use pgxr_core::models::{Allele, ParsedVariantRecord, QcMetrics, Zygosity};
    use pretty_assertions::assert_eq;
    use rstest::*;
    use tempfile::NamedTempFile;

    fn flagged_record(pos: u64, gt: &str) -> ParsedVariantRecord {
        let (a, b) = gt.split_once('|').unwrap();
        let allele1 = Allele::from_token(a).unwrap();
        let allele2 = Allele::from_token(b).unwrap();
        ParsedVariantRecord {
            chrom: "chr6".to_string(),
            pos,
            id: ".".to_string(),
            ref_allele: "A".to_string(),
            alt_allele: "G".to_string(),
            gt_raw: gt.to_string(),
            phased: true,
            allele1,
            allele2,
            zygosity: Zygosity::from_alleles(allele1, allele2),
            qc: QcMetrics::default(),
        }
    }

    #[fixture]
    fn annotated() -> Vec<AnnotatedVariant> {
        let records = vec![
            flagged_record(18_130_000, "1|0"),
            flagged_record(18_140_000, "0|1"),
            // same key again, classified once
            flagged_record(18_130_000, "0|1"),
        ];
        annotate_variants(&records, &ReferenceTables::builtin())
    }

    fn no_function(_: &VariantKey) -> Option<ExternalClassification> {
        Some(ExternalClassification {
            function_class: FunctionClass::NoFunction,
            confidence: 0.9,
        })
    }

    #[rstest]
    fn test_flagged_keys_are_distinct(annotated: Vec<AnnotatedVariant>) {
        let keys = flagged_keys(&annotated);
        assert_eq!(
            keys,
            vec![
                VariantKey::new("chr6", 18_130_000, "A", "G"),
                VariantKey::new("chr6", 18_140_000, "A", "G"),
            ]
        );
    }

    #[rstest]
    fn test_collect_from_closure(annotated: Vec<AnnotatedVariant>) {
        let classifications =
            collect_classifications(&annotated, Arc::new(no_function), &CollectOptions::default());
        assert_eq!(classifications.len(), 2);
        for result in classifications.values() {
            assert_eq!(result.function_class, FunctionClass::NoFunction);
        }
    }

    #[rstest]
    fn test_each_key_queried_once(annotated: Vec<AnnotatedVariant>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let classifier = move |key: &VariantKey| {
            counter.fetch_add(1, Ordering::SeqCst);
            no_function(key)
        };

        collect_classifications(&annotated, Arc::new(classifier), &CollectOptions::default());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[rstest]
    fn test_no_result_is_not_recorded(annotated: Vec<AnnotatedVariant>) {
        let silent = |_: &VariantKey| -> Option<ExternalClassification> { None };
        let classifications =
            collect_classifications(&annotated, Arc::new(silent), &CollectOptions::default());
        assert!(classifications.is_empty());
    }

    #[rstest]
    fn test_slow_classifier_is_cut_off(annotated: Vec<AnnotatedVariant>) {
        let slow = |key: &VariantKey| {
            thread::sleep(Duration::from_secs(2));
            no_function(key)
        };
        let options = CollectOptions {
            timeout: Duration::from_millis(50),
            workers: 2,
        };

        let started = Instant::now();
        let classifications = collect_classifications(&annotated, Arc::new(slow), &options);

        assert!(classifications.is_empty());
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[rstest]
    fn test_nothing_flagged_skips_the_classifier() {
        let classifications = collect_classifications(
            &[],
            Arc::new(|_: &VariantKey| -> Option<ExternalClassification> {
                panic!("should not be called")
            }),
            &CollectOptions::default(),
        );
        assert!(classifications.is_empty());
    }

    #[rstest]
    fn test_static_classifier_from_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"chrom": "chr6", "pos": 18130000, "ref": "A", "alt": "G",
                  "function_class": "decreased_function", "confidence": 0.72}}
            ]"#
        )
        .unwrap();

        let classifier = StaticClassifier::try_from(file.path()).unwrap();
        assert_eq!(classifier.len(), 1);

        let result = classifier
            .classify(&VariantKey::new("chr6", 18130000, "A", "G"))
            .unwrap();
        assert_eq!(result.function_class, FunctionClass::DecreasedFunction);
        assert_eq!(result.confidence, 0.72);
        assert_eq!(
            classifier.classify(&VariantKey::new("chr6", 18130000, "A", "T")),
            None
        );
    }

    #[rstest]
    fn test_static_classifier_rejects_bad_confidence() {
        let entry = ClassificationEntry {
            key: VariantKey::new("chr6", 18130000, "A", "G"),
            function_class: FunctionClass::NoFunction,
            confidence: 1.5,
        };
        let result = StaticClassifier::from_entries([entry]);
        assert!(matches!(
            result,
            Err(ClassifierError::InvalidConfidence { .. })
        ));
    }
}
