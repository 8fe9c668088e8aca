//! `stockwise-abc`
//!
//! **Responsibility:** ABC inventory classification (Pareto-style 80/15/5).
//!
//! This crate contains the deterministic classification engine plus the
//! boundary it is swapped behind in production:
//! - The engine is pure domain logic (no IO, no clock, no storage).
//! - Hosts that prefer a model-backed classifier plug it in through the
//!   [`Classifier`] trait and compose it with [`FallbackClassifier`].
//! - [`ClassificationService`] adds tenant scoping and tracing around a run.

pub mod classifier;
pub mod engine;
pub mod result;
pub mod service;
pub mod tier;
pub mod usage;

pub use classifier::{Classifier, ClassifierError, FallbackClassifier};
pub use engine::{AbcEngine, AbcThresholds};
pub use result::{AbcReport, TierAssignments};
pub use service::{ClassificationRequest, ClassificationService, TenantScope};
pub use tier::Tier;
pub use usage::ItemUsage;
