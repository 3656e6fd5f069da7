//! The generation pipeline: parse, resolve images, render, package, save.

use super::config::DocxOptions;
use super::output::{DOCX_MIME_TYPE, OutputSink};
use super::progress::{ProgressSink, ProgressStep, ProgressUpdate};
use crate::error::Result;
use crate::images::{ImageFetcher, resolve_images};
use crate::markdown::{collect_image_urls, parse_blocks};
use crate::ooxml::docx::package::{assemble, build_parts};
use crate::ooxml::opc::pkgwriter::ZipArchiveSink;
use log::{debug, error};

// Progress milestones, in percent.
const PARSE_PROGRESS: f64 = 5.0;
const DOWNLOAD_PROGRESS: f64 = 10.0;
const DOWNLOAD_SPAN: f64 = 40.0;
const ZIP_PROGRESS: f64 = 60.0;
const GENERATE_PROGRESS: f64 = 90.0;
const SAVE_PROGRESS: f64 = 95.0;
const COMPLETE_PROGRESS: f64 = 100.0;

/// Converts Markdown into a `.docx` and hands it to an [`OutputSink`].
///
/// One generator can serve any number of runs; runs share no state.
///
/// # Example
///
/// ```rust,no_run
/// # #[cfg(feature = "http")]
/// # async fn demo() -> markdocx::Result<()> {
/// use markdocx::export::{MemoryOutput, NoProgress, WordGenerator};
/// use markdocx::images::HttpImageFetcher;
///
/// let generator = WordGenerator::new(HttpImageFetcher::new());
/// let mut output = MemoryOutput::new();
/// generator
///     .generate("# Hello", "hello.docx", &mut NoProgress, &mut output)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WordGenerator<F> {
    fetcher: F,
    options: DocxOptions,
}

impl<F: ImageFetcher> WordGenerator<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            options: DocxOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DocxOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &DocxOptions {
        &self.options
    }

    /// Run the whole pipeline for one document.
    ///
    /// Unreachable or undecodable images degrade inside the document. Only
    /// invalid options, a packaging failure or an output failure is returned
    /// as an error, and in that case `output` has not received anything.
    pub async fn generate<P, O>(
        &self,
        markdown: &str,
        filename: &str,
        progress: &mut P,
        output: &mut O,
    ) -> Result<()>
    where
        P: ProgressSink,
        O: OutputSink,
    {
        let result = self.run(markdown, filename, progress, output).await;
        if let Err(ref e) = result {
            error!("failed to generate {filename}: {e}");
        }
        result
    }

    async fn run<P, O>(
        &self,
        markdown: &str,
        filename: &str,
        progress: &mut P,
        output: &mut O,
    ) -> Result<()>
    where
        P: ProgressSink,
        O: OutputSink,
    {
        self.options.validate()?;

        progress.report(&ProgressUpdate::new(
            ProgressStep::Parse,
            PARSE_PROGRESS,
            "Parsing document structure...",
        ));
        let blocks = parse_blocks(markdown);
        debug!("parsed {} blocks", blocks.len());

        let urls = collect_image_urls(&blocks);
        progress.report(&ProgressUpdate::new(
            ProgressStep::Download,
            DOWNLOAD_PROGRESS,
            format!("Found {} image(s)", urls.len()),
        ));

        let images = resolve_images(
            &self.fetcher,
            &urls,
            self.options.fallback_dimensions(),
            |index, total, _url| {
                progress.report(&ProgressUpdate::new(
                    ProgressStep::Download,
                    DOWNLOAD_PROGRESS + index as f64 / total as f64 * DOWNLOAD_SPAN,
                    format!("Downloading image {}/{}", index + 1, total),
                ));
            },
        )
        .await;
        debug!("resolved {} of {} images", images.len(), urls.len());

        progress.report(&ProgressUpdate::new(
            ProgressStep::Zip,
            ZIP_PROGRESS,
            "Building document package...",
        ));
        let parts = build_parts(&blocks, &images, &self.options)?;

        progress.report(&ProgressUpdate::new(
            ProgressStep::Generate,
            GENERATE_PROGRESS,
            "Generating file...",
        ));
        let bytes = assemble(&parts, ZipArchiveSink::new())?;
        debug!("assembled {filename}: {} bytes", bytes.len());

        progress.report(&ProgressUpdate::new(
            ProgressStep::Save,
            SAVE_PROGRESS,
            "Saving...",
        ));
        output.save(filename, DOCX_MIME_TYPE, &bytes)?;

        progress.report(&ProgressUpdate::new(
            ProgressStep::Complete,
            COMPLETE_PROGRESS,
            "Export complete",
        ));
        Ok(())
    }
}
