//! Recognising overlap-constraint violations in store errors.

use crate::config::StoreConflictSignatures;
use crate::error::{AbsenceError, StoreError};

/// One way a store error can identify itself as an overlap violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictSignature {
    /// The error code equals this value.
    Code(String),
    /// The error message contains this text, ignoring case.
    MessageContains(String),
}

impl ConflictSignature {
    fn matches(&self, error: &StoreError) -> bool {
        match self {
            ConflictSignature::Code(code) => error.code.as_deref() == Some(code.as_str()),
            ConflictSignature::MessageContains(pattern) => error
                .message
                .to_lowercase()
                .contains(&pattern.to_lowercase()),
        }
    }
}

/// Reclassifies store errors that mean "these dates overlap".
///
/// A store error matching any signature becomes [`AbsenceError::Overlap`];
/// everything else stays a store error.
///
/// # Example
///
/// ```
/// use absence_engine::error::{AbsenceError, StoreError};
/// use absence_engine::store::{ConflictSignature, StoreConflictClassifier};
///
/// let classifier = StoreConflictClassifier::new(vec![
///     ConflictSignature::Code("23P01".to_string()),
/// ]);
///
/// let error = StoreError::with_code("23P01", "conflicting key value");
/// assert!(matches!(classifier.classify(error), AbsenceError::Overlap { .. }));
///
/// let error = StoreError::new("connection reset");
/// assert!(matches!(classifier.classify(error), AbsenceError::Store(_)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StoreConflictClassifier {
    signatures: Vec<ConflictSignature>,
}

impl StoreConflictClassifier {
    /// Creates a classifier from explicit signatures.
    pub fn new(signatures: Vec<ConflictSignature>) -> Self {
        Self { signatures }
    }

    /// Creates a classifier from the configured codes and message patterns.
    pub fn from_config(config: &StoreConflictSignatures) -> Self {
        let codes = config.codes.iter().cloned().map(ConflictSignature::Code);
        let patterns = config
            .message_patterns
            .iter()
            .cloned()
            .map(ConflictSignature::MessageContains);
        Self::new(codes.chain(patterns).collect())
    }

    /// Returns `true` if `error` matches any signature.
    pub fn is_overlap(&self, error: &StoreError) -> bool {
        self.signatures.iter().any(|s| s.matches(error))
    }

    /// Converts a store error into the engine error it stands for.
    ///
    /// Overlap violations come back with no conflicts attached; the caller
    /// reloads them if it can.
    pub fn classify(&self, error: StoreError) -> AbsenceError {
        if self.is_overlap(&error) {
            AbsenceError::Overlap {
                conflicts: Vec::new(),
            }
        } else {
            AbsenceError::Store(error)
        }
    }
}
