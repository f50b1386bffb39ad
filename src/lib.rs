//! Design My PC library
//!
//! Curated parts catalog, a resolver that maps a use-case and budget (or a
//! free-text requirement) onto a catalog build, per-slot customization,
//! JSON export, and the terminal wizard that drives them.

pub mod app;
pub mod catalog;
pub mod classifier;
pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod export;
pub mod logic;
pub mod session;
pub mod theme;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use catalog::{ComponentBundle, PerformanceSummary};
pub use classifier::{Classifier, ClassifierFailure, Completer, LabelScore};
pub use config::AppConfig;
pub use error::{BuildError, Recovery};
pub use export::BuildExport;
pub use logic::resolver::{Recommendation, ResolutionSource, StructuredRequest, TierPolicy};
pub use session::{BuildSelection, Session, SessionStage};
pub use types::{Slot, Tier, UseCase};
