//! Core domain logic
//!
//! Process records, importance tiers and the classifier.

pub mod classifier;
pub mod models;

pub use classifier::{classify, classify_owner, classify_record};
pub use models::{ImportanceTier, ProcessRecord, SessionContext};
