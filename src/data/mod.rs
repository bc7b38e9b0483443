//! Data module - CSV loading, cleaning and column selection

mod dataset;
mod loader;
mod processor;
mod selector;

pub use dataset::{is_numeric_dtype, ColumnValues, Dataset};
pub use loader::{DataLoader, LoaderError, MISSING_MARKERS};
pub use processor::{DataProcessor, Overview, ProcessorError, HEAD_ROWS};
pub use selector::{
    ColumnResolver, ColumnSelector, FixedResolver, NoFallback, PromptResolver, SelectorError,
};
