//! platscore - Composite security scoring for platform images
//!
//! Combines locally-measured package quality metrics with a criticality
//! factor estimated from each package's upstream repository popularity,
//! optionally reconciled against the OSSF criticality_score tool.

pub mod cli;
pub mod config;
pub mod criticality;
pub mod github;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod scoring;
