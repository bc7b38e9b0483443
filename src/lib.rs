//! Chartify EDA - exploratory analysis of a CSV dataset
//!
//! Loads a CSV file, drops incomplete rows, reports the moments of one
//! column and draws relational, categorical, statistical and corner plots.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod pipeline;
pub mod stats;

pub use config::{AnalysisConfig, CornerMode};
pub use pipeline::{AnalysisPipeline, PipelineError, RunSummary};
