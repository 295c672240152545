//! User-agent compatibility classification.
//!
//! | Type | Responsibility |
//! |------|----------------|
//! | [`CompatibilityClassifier`] | Cached verdict per user agent |
//! | [`BrokenRule`] | Signature that disqualified an agent |
//! | [`VerdictCache`] | Pluggable verdict storage |

pub mod cache;
pub mod classifier;
pub mod rules;

pub use cache::{DashMapVerdictCache, VerdictCache};
pub use classifier::CompatibilityClassifier;
pub use rules::BrokenRule;
