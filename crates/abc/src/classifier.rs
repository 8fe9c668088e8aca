use thiserror::Error;

use crate::engine::AbcEngine;
use crate::result::AbcReport;
use crate::usage::ItemUsage;

/// Error surface for classifier implementations.
///
/// The deterministic engine is total and never produces these; they exist for
/// remote/model-backed implementations and for scope checks at the service
/// boundary.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The implementation could not be reached (network, model offline, ...).
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    /// The implementation answered with something unusable.
    #[error("invalid classifier response: {0}")]
    InvalidResponse(String),

    /// The request's tenant is not allowed by the service scope.
    #[error("tenant scope violation")]
    ScopeViolation,

    /// The implementation ran but failed internally.
    #[error("classification failed: {0}")]
    Failed(String),
}

/// A classification strategy.
///
/// Hosts swap implementations behind this trait: the deterministic
/// [`AbcEngine`] in this crate, or a model-backed classifier the host brings
/// along. Implementations must not mutate the input records.
pub trait Classifier: Send + Sync {
    /// Stable implementation name, used in logs when composing classifiers.
    fn name(&self) -> &str;

    fn classify(&self, items: &[ItemUsage]) -> Result<AbcReport, ClassifierError>;
}

impl Classifier for AbcEngine {
    fn name(&self) -> &str {
        "abc.deterministic"
    }

    fn classify(&self, items: &[ItemUsage]) -> Result<AbcReport, ClassifierError> {
        Ok(AbcEngine::classify(self, items))
    }
}

/// Primary/fallback composition of two classifiers.
///
/// Production pattern: try the model-backed classifier first, and when it is
/// unavailable or answers garbage, degrade to the deterministic rule. The
/// degradation is logged, never surfaced as an error.
#[derive(Debug)]
pub struct FallbackClassifier<P, F = AbcEngine> {
    primary: P,
    fallback: F,
}

impl<P: Classifier> FallbackClassifier<P, AbcEngine> {
    /// Compose `primary` with the default deterministic engine.
    pub fn with_default_engine(primary: P) -> Self {
        Self {
            primary,
            fallback: AbcEngine::default(),
        }
    }
}

impl<P: Classifier, F: Classifier> FallbackClassifier<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: Classifier, F: Classifier> Classifier for FallbackClassifier<P, F> {
    fn name(&self) -> &str {
        "abc.fallback"
    }

    fn classify(&self, items: &[ItemUsage]) -> Result<AbcReport, ClassifierError> {
        match self.primary.classify(items) {
            Ok(report) => Ok(report),
            Err(error) => {
                tracing::warn!(
                    primary = self.primary.name(),
                    fallback = self.fallback.name(),
                    %error,
                    "primary classifier failed; degrading to fallback"
                );
                self.fallback.classify(items)
            }
        }
    }
}
