//! Column Selector
//! Validates the analysis column, falling back to a resolver when it is absent.

use crate::data::Dataset;
use log::{info, warn};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelectorError {
    #[error("Invalid column name '{0}'")]
    InvalidColumn(String),
    #[error("Failed to read column name: {0}")]
    Io(#[from] io::Error),
}

/// Supplies a replacement when the requested column does not exist.
pub trait ColumnResolver {
    /// Return a candidate column name, or `None` to give up.
    fn resolve(&mut self, available: &[String]) -> Result<Option<String>, SelectorError>;
}

/// Asks for the column name on a line-based reader (stdin by default).
pub struct PromptResolver<R, W> {
    input: R,
    output: W,
}

impl PromptResolver<io::StdinLock<'static>, io::Stdout> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> PromptResolver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> ColumnResolver for PromptResolver<R, W> {
    fn resolve(&mut self, _available: &[String]) -> Result<Option<String>, SelectorError> {
        write!(self.output, "Enter the column name to analyze: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Answers with a preset column name.
pub struct FixedResolver(pub String);

impl ColumnResolver for FixedResolver {
    fn resolve(&mut self, _available: &[String]) -> Result<Option<String>, SelectorError> {
        Ok(Some(self.0.trim().to_string()))
    }
}

/// Never resolves; for batch runs where blocking on input is not allowed.
pub struct NoFallback;

impl ColumnResolver for NoFallback {
    fn resolve(&mut self, _available: &[String]) -> Result<Option<String>, SelectorError> {
        Ok(None)
    }
}

/// `['a', 'b']` style listing; names holding `'` are wrapped in `"`.
fn display_list(names: &[String]) -> String {
    let quoted: Vec<String> = names
        .iter()
        .map(|name| {
            if name.contains('\'') && !name.contains('"') {
                format!("\"{name}\"")
            } else {
                format!("'{}'", name.replace('\'', "\\'"))
            }
        })
        .collect();
    format!("[{}]", quoted.join(", "))
}

pub struct ColumnSelector;

impl ColumnSelector {
    /// Return `requested` if the dataset has it, otherwise allow a single
    /// replacement from `resolver`.
    pub fn select(
        dataset: &Dataset,
        requested: &str,
        resolver: &mut dyn ColumnResolver,
    ) -> Result<String, SelectorError> {
        if dataset.has_column(requested) {
            return Ok(requested.to_string());
        }

        let available = dataset.column_names();
        warn!("Column '{}' not found", requested);
        println!("Error: The column '{requested}' does not exist in the dataset.");
        println!("Available columns: {}", display_list(&available));

        match resolver.resolve(&available)? {
            Some(name) if dataset.has_column(&name) => {
                info!("Using column '{}'", name);
                Ok(name)
            }
            Some(name) => Err(SelectorError::InvalidColumn(name)),
            None => Err(SelectorError::InvalidColumn(requested.to_string())),
        }
    }
}
