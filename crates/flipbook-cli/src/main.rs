use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use flip_reader::{
    CancelToken, DocumentBackend, PageImage, PdfiumBackend, Progress, ReaderOptions,
    RenderOutcome, SourceDocument, render,
};

#[derive(Parser)]
#[command(name = "flipb", about = "Flipbook reader tools", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show page count and per-page aspect ratios
    Info {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Rasterize the document and write the page sequence as PNG files
    Export {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for page images
        #[arg(short, long)]
        output: PathBuf,

        /// Rasterization scale factor
        #[arg(long, default_value = "2.0")]
        scale: f32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { input } => info(input),
        Commands::Export {
            input,
            output,
            scale,
        } => export(input, output, scale).await,
    }
}

fn info(input: PathBuf) -> Result<()> {
    let backend = PdfiumBackend::new().context("pdfium unavailable")?;
    let document = backend
        .open(&input)
        .with_context(|| format!("failed to open {}", input.display()))?;

    let total = document.page_count();
    println!("{}: {} pages", input.display(), total);
    for number in 1..=total {
        // A thumbnail-scale render is enough to report the aspect ratio.
        let raster = document
            .rasterize(number, 0.25)
            .with_context(|| format!("failed to rasterize page {}", number))?;
        println!("  page {:>4}  aspect {:.3}", number, raster.aspect_ratio);
    }
    Ok(())
}

async fn export(input: PathBuf, output: PathBuf, scale: f32) -> Result<()> {
    let options = ReaderOptions {
        scale_factor: scale,
        ..Default::default()
    };
    options.validate()?;

    std::fs::create_dir_all(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;

    let progress: Progress = Box::new(|current, total| {
        eprintln!("rendered page {}/{}", current, total);
    });
    let outcome = render(input.clone(), options, CancelToken::new(), Some(progress))
        .await
        .with_context(|| format!("failed to render {}", input.display()))?;

    let RenderOutcome::Complete(sequence) = outcome else {
        bail!("render was cancelled");
    };

    let mut written = 0usize;
    for page in sequence.pages() {
        match &page.image {
            PageImage::Rgba {
                data,
                width,
                height,
            } => {
                let image = image::RgbaImage::from_raw(*width, *height, data.clone())
                    .context("page buffer size mismatch")?;
                let path = output.join(format!("page-{:03}.png", page.ordinal));
                image
                    .save(&path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                written += 1;
            }
            PageImage::Asset(asset) => {
                // The synthetic cover carries a static asset reference, not
                // pixels; nothing to rasterize here.
                println!("page {} is the cover asset {:?}", page.ordinal, asset);
            }
        }
    }

    println!(
        "wrote {} of {} pages to {}",
        written,
        sequence.len(),
        output.display()
    );
    Ok(())
}
