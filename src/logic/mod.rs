//! Logic modules: translate user requirements into builds.
//!
//! # Modules
//!
//! - `resolver` - Requirement to catalog key resolution (structured and classified)
//! - `advisor` - Chat-completion review of a resolved build

pub mod advisor;
pub mod resolver;
