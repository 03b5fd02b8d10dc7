use std::path::Path;

use crate::types::Result;

#[cfg(feature = "pdfium")]
use crate::types::Error;
#[cfg(feature = "pdfium")]
use pdfium_render::prelude::*;

/// One rasterized page: pixels plus the aspect ratio of the rendered content.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedPage {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: f32,
}

/// An opened document. Dropping it releases the underlying handle.
pub trait SourceDocument {
    fn page_count(&self) -> usize;

    /// Rasterizes one page at the given scale over its natural point size.
    /// `number` is 1-based. Either a complete image is returned or an error;
    /// never partial pixels.
    fn rasterize(&self, number: usize, scale: f32) -> Result<RasterizedPage>;
}

/// Seam between the render pipeline and the rasterization library, so the
/// pipeline can be exercised without a pdfium build present.
pub trait DocumentBackend {
    type Document<'a>: SourceDocument
    where
        Self: 'a;

    fn open(&self, path: &Path) -> Result<Self::Document<'_>>;
}

/// Initialize Pdfium, trying the vendored library first, then falling back to system
#[cfg(feature = "pdfium")]
pub fn init_pdfium() -> std::result::Result<Pdfium, PdfiumError> {
    // Try to load from vendor directory (relative to workspace root)
    // When running from cargo, the working directory is the workspace root
    let vendor_path = std::env::current_dir().ok().and_then(|mut p| {
        p.push("vendor/pdfium/lib");
        if p.exists() { Some(p) } else { None }
    });

    if let Some(vendor_path) = vendor_path {
        if let Ok(binding) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&vendor_path))
        {
            return Ok(Pdfium::new(binding));
        }
    }

    // Fallback to system library or default search paths
    Pdfium::bind_to_system_library().map(Pdfium::new)
}

#[cfg(feature = "pdfium")]
pub struct PdfiumBackend {
    pdfium: Pdfium,
}

#[cfg(feature = "pdfium")]
impl PdfiumBackend {
    pub fn new() -> Result<Self> {
        let pdfium = init_pdfium()
            .map_err(|e| Error::Load(format!("Failed to initialize pdfium: {}", e)))?;
        Ok(Self { pdfium })
    }
}

#[cfg(feature = "pdfium")]
pub struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

#[cfg(feature = "pdfium")]
impl DocumentBackend for PdfiumBackend {
    type Document<'a> = PdfiumDocument<'a>;

    fn open(&self, path: &Path) -> Result<PdfiumDocument<'_>> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| Error::Load(format!("{}: {}", path.display(), e)))?;
        Ok(PdfiumDocument { document })
    }
}

#[cfg(feature = "pdfium")]
impl SourceDocument for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn rasterize(&self, number: usize, scale: f32) -> Result<RasterizedPage> {
        let render_error = |e: PdfiumError| Error::Render {
            page: number,
            reason: e.to_string(),
        };

        let page = self
            .document
            .pages()
            .get((number - 1) as u16)
            .map_err(render_error)?;

        // Drawing surface sized to the page's natural viewport times the
        // scale factor; it lives only for this call.
        let target_width = (page.width().value * scale) as i32;
        let max_height = (page.height().value * scale) as i32;
        let config = PdfRenderConfig::new()
            .set_target_width(target_width)
            .set_maximum_height(max_height);

        let bitmap = page.render_with_config(&config).map_err(render_error)?;
        let width = bitmap.width() as u32;
        let height = bitmap.height() as u32;
        let rgba = bitmap.as_rgba_bytes().to_vec();

        Ok(RasterizedPage {
            rgba,
            width,
            height,
            aspect_ratio: width as f32 / height as f32,
        })
    }
}
