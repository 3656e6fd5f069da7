//! Convert a Markdown file into a `.docx` next to it (or into `--out-dir`).
//!
//! ```text
//! cargo run --example markdown_to_docx -- notes.md --title "Meeting notes"
//! ```

use clap::Parser;
use markdocx::export::{DirectoryOutput, DocxOptions, ProgressUpdate, WordGenerator, export_filename};
use markdocx::images::HttpImageFetcher;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Convert Markdown to a Word document")]
struct Args {
    /// Markdown file to convert
    input: PathBuf,

    /// Directory for the generated document
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Document title used in the file name (defaults to the input file stem)
    #[arg(short, long)]
    title: Option<String>,

    /// YAML file with rendering options
    #[arg(long)]
    options: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let markdown = std::fs::read_to_string(&args.input)?;
    let options = match &args.options {
        Some(path) => DocxOptions::from_yaml_str(&std::fs::read_to_string(path)?)?,
        None => DocxOptions::default(),
    };
    let title = args.title.clone().unwrap_or_else(|| {
        args.input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    let filename = export_filename(&title, chrono::Local::now().naive_local());

    let generator = WordGenerator::new(HttpImageFetcher::new()).with_options(options);
    let mut output = DirectoryOutput::new(&args.out_dir);
    generator
        .generate(
            &markdown,
            &filename,
            &mut |update: &ProgressUpdate| println!("{update}"),
            &mut output,
        )
        .await?;

    if let Some(path) = output.last_path() {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
