//! Chartify EDA - command line entry point.

use anyhow::{Context, Result};
use chartify_eda::charts::StaticChartRenderer;
use chartify_eda::data::{ColumnResolver, LoaderError, NoFallback, PromptResolver, SelectorError};
use chartify_eda::{AnalysisConfig, AnalysisPipeline, CornerMode, PipelineError};
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "chartify_eda",
    version,
    about = "Exploratory analysis of a CSV file: moments and distribution charts"
)]
struct Args {
    /// JSON configuration file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input CSV file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Pick the input CSV with a file dialog
    #[arg(long, conflicts_with = "input")]
    browse: bool,

    /// Column to analyse
    #[arg(long)]
    column: Option<String>,

    /// Directory for the chart images
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Save the corner plot to this file instead of opening a window
    #[arg(long)]
    corner_file: Option<PathBuf>,

    /// Skip the corner plot
    #[arg(long, conflicts_with = "corner_file")]
    no_corner: bool,

    /// Never prompt for a column name
    #[arg(long)]
    non_interactive: bool,

    /// Open the written charts with the system viewer
    #[arg(long)]
    open: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

impl Args {
    /// Layer the flags over the defaults or the config file.
    fn into_config(self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_file(path)?,
            None => AnalysisConfig::default(),
        };

        if self.browse {
            config.input = rfd::FileDialog::new()
                .add_filter("CSV Files", &["csv"])
                .pick_file()
                .context("No CSV file selected")?;
        } else if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(column) = self.column {
            config.column = column;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(path) = self.corner_file {
            config.corner = CornerMode::Save(path);
        }
        if self.no_corner {
            config.corner = CornerMode::Off;
        }
        if self.non_interactive {
            config.interactive = false;
        }
        if self.open {
            config.open_charts = true;
        }
        Ok(config)
    }
}

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(&args.log_level);
    let config = args.into_config()?;
    info!("Configuration: {:?}", config);

    let mut resolver: Box<dyn ColumnResolver> = if config.interactive {
        Box::new(PromptResolver::stdin())
    } else {
        Box::new(NoFallback)
    };
    let mut renderer = StaticChartRenderer::new();

    match AnalysisPipeline::new(&config).run(resolver.as_mut(), &mut renderer) {
        Ok(summary) => {
            if config.open_charts {
                for path in &summary.written {
                    if let Err(e) = open::that(path) {
                        warn!("Could not open {}: {}", path.display(), e);
                    }
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(PipelineError::Load(LoaderError::FileNotFound(path))) => {
            error!("Input file missing: {}", path.display());
            println!("Error: File '{}' not found!", path.display());
            Ok(ExitCode::FAILURE)
        }
        Err(PipelineError::Select(SelectorError::InvalidColumn(name))) => {
            error!("Invalid column '{}'", name);
            println!("Invalid column name. Exiting program.");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
