//! Document export: options, progress reporting, output sinks and the
//! generation pipeline that ties them together.

pub mod config;
pub mod generator;
pub mod output;
pub mod progress;

pub use config::DocxOptions;
pub use generator::WordGenerator;
pub use output::{
    DOCX_MIME_TYPE, DirectoryOutput, MemoryOutput, OutputSink, SavedDocument, export_filename,
};
pub use progress::{NoProgress, ProgressSink, ProgressStep, ProgressUpdate};
