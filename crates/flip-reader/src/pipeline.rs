use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::backend::{DocumentBackend, SourceDocument};
use crate::options::ReaderOptions;
use crate::page::{Page, PageImage, PageSequence, SequenceBuilder};
use crate::types::Result;

#[cfg(feature = "pdfium")]
use crate::backend::PdfiumBackend;

/// Cooperative cancellation flag, checked between page renders. Setting it
/// never interrupts a rasterization already in progress; it prevents further
/// pages from being scheduled and suppresses publication.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// How a render run ended. Cancellation is a normal outcome, not an error.
#[derive(Debug)]
pub enum RenderOutcome {
    Complete(PageSequence),
    Cancelled,
}

/// Per-page progress callback: (pages rendered so far, total pages).
pub type Progress = Box<dyn FnMut(usize, usize) + Send>;

/// Sequential render core: opens the document, rasterizes pages 1..N in
/// order, then prepends the synthetic cover and publishes. The document
/// handle is released on every exit path when it drops at the end of this
/// scope.
pub fn render_with_backend<B: DocumentBackend>(
    backend: &B,
    path: &Path,
    options: &ReaderOptions,
    cancel: &CancelToken,
    mut progress: Option<&mut dyn FnMut(usize, usize)>,
) -> Result<RenderOutcome> {
    let document = backend.open(path)?;
    let total = document.page_count();
    log::debug!("rendering {} pages from {}", total, path.display());

    let mut builder = SequenceBuilder::new();
    for number in 1..=total {
        if cancel.is_cancelled() {
            log::debug!(
                "render cancelled after {} of {} pages",
                builder.rendered_pages(),
                total
            );
            return Ok(RenderOutcome::Cancelled);
        }

        let raster = document.rasterize(number, options.scale_factor)?;
        builder.push(
            PageImage::Rgba {
                data: raster.rgba,
                width: raster.width,
                height: raster.height,
            },
            raster.aspect_ratio,
        );

        if let Some(report) = progress.as_mut() {
            report(number, total);
        }
    }

    // A flag set during the last page still suppresses publication.
    if cancel.is_cancelled() {
        return Ok(RenderOutcome::Cancelled);
    }

    let cover = synthesize_cover(&builder, options);
    Ok(RenderOutcome::Complete(builder.publish(cover)))
}

/// Cover page: ordinal 0, caller-supplied static image, aspect ratio copied
/// from page 1 (or the configured fallback for an empty document).
fn synthesize_cover(builder: &SequenceBuilder, options: &ReaderOptions) -> Page {
    Page {
        ordinal: 0,
        image: PageImage::Asset(options.cover_asset.clone()),
        aspect_ratio: builder
            .first_aspect()
            .unwrap_or(options.default_cover_aspect),
        is_cover: true,
    }
}

/// Async wrapper over `render_with_backend`. The backend is constructed
/// inside the blocking task, so backends whose documents borrow from them
/// never have to cross threads.
pub async fn render_with<B, F>(
    make_backend: F,
    path: PathBuf,
    options: ReaderOptions,
    cancel: CancelToken,
    mut progress: Option<Progress>,
) -> Result<RenderOutcome>
where
    B: DocumentBackend,
    F: FnOnce() -> Result<B> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let backend = make_backend()?;
        let report: Option<&mut dyn FnMut(usize, usize)> = match progress.as_mut() {
            Some(boxed) => Some(&mut **boxed),
            None => None,
        };
        render_with_backend(&backend, &path, &options, &cancel, report)
    })
    .await?
}

/// Renders a document through pdfium.
#[cfg(feature = "pdfium")]
pub async fn render(
    path: PathBuf,
    options: ReaderOptions,
    cancel: CancelToken,
    progress: Option<Progress>,
) -> Result<RenderOutcome> {
    render_with(PdfiumBackend::new, path, options, cancel, progress).await
}
