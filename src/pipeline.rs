//! Analysis pipeline: load, clean, select, plot, analyse, report.

use crate::charts::{
    Chart, ChartError, ChartPlotter, ChartRenderer, CATEGORICAL_SUFFIX, RELATIONAL_SUFFIX,
    STATISTICAL_SUFFIX,
};
use crate::config::{AnalysisConfig, CornerMode};
use crate::data::{
    ColumnResolver, ColumnSelector, DataLoader, DataProcessor, LoaderError, ProcessorError,
    SelectorError,
};
use crate::stats::{Moments, Reporter, StatsCalculator, StatsError};
use log::info;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Process(#[from] ProcessorError),
    #[error(transparent)]
    Select(#[from] SelectorError),
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error(transparent)]
    Chart(#[from] ChartError),
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub column: String,
    pub moments: Moments,
    /// Chart files written, in drawing order.
    pub written: Vec<PathBuf>,
    pub corner_rendered: bool,
}

pub struct AnalysisPipeline<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> AnalysisPipeline<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Run every step in order. Nothing is plotted or analysed when loading
    /// or column selection fails.
    pub fn run(
        &self,
        resolver: &mut dyn ColumnResolver,
        renderer: &mut dyn ChartRenderer,
    ) -> Result<RunSummary, PipelineError> {
        let raw = DataLoader::load_csv(&self.config.input)?;
        let dataset = DataProcessor::preprocess(raw)?;
        print!("{}", DataProcessor::overview(&dataset)?);

        let column = ColumnSelector::select(&dataset, &self.config.column, resolver)?;
        info!("Analysing column '{}'", column);

        fs::create_dir_all(&self.config.output_dir).map_err(ChartError::from)?;
        let charts = [
            (
                Chart::Scatter(ChartPlotter::relational(&dataset, &column)?),
                RELATIONAL_SUFFIX,
            ),
            (ChartPlotter::categorical(&dataset, &column)?, CATEGORICAL_SUFFIX),
            (
                Chart::Box(ChartPlotter::statistical(&dataset, &column)?),
                STATISTICAL_SUFFIX,
            ),
        ];

        let mut written = Vec::with_capacity(charts.len());
        for (chart, suffix) in &charts {
            let path = ChartPlotter::output_path(&self.config.output_dir, &column, suffix);
            renderer.save(chart, &path)?;
            written.push(path);
        }

        let moments = StatsCalculator::column_moments(&dataset, &column)?;
        Reporter::print(&moments, &column);

        let corner_rendered = match &self.config.corner {
            CornerMode::Off => false,
            mode => match ChartPlotter::corner(&dataset)? {
                Some(corner) => {
                    match mode {
                        CornerMode::Save(path) => renderer.save(&Chart::Corner(corner), path)?,
                        _ => renderer.show(&corner)?,
                    }
                    true
                }
                None => {
                    info!("Fewer than two numeric columns, skipping corner plot");
                    false
                }
            },
        };

        Ok(RunSummary {
            column,
            moments,
            written,
            corner_rendered,
        })
    }
}
