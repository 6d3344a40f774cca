//! fistest-core: assessment engine, attempt tracking and scoring.
//!
//! This crate defines the test definition model, the flattened question
//! sheet, the attempt state machine, and the scoring rule that the rest of
//! fistest builds on.

pub mod attempt;
pub mod document;
pub mod error;
pub mod model;
pub mod parser;
pub mod scoring;
pub mod sections;
pub mod session;
pub mod submission;
pub mod traits;
