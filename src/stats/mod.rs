//! Stats module - moments, summaries and the console report

mod calculator;
mod report;

pub use calculator::{BoxStats, DescriptiveStats, Histogram, Moments, StatsCalculator, StatsError};
pub use report::Reporter;
