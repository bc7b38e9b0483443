//! GUI module - interactive chart windows

mod corner_viewer;

pub use corner_viewer::CornerViewer;
