pub mod backend;
pub mod navigation;
mod options;
mod page;
pub mod pipeline;
mod session;
mod types;

#[cfg(feature = "pdfium")]
pub use backend::{PdfiumBackend, init_pdfium};
pub use backend::{DocumentBackend, RasterizedPage, SourceDocument};
pub use navigation::{Direction, NavigationState};
pub use options::*;
pub use page::{Page, PageImage, PageSequence, SequenceBuilder};
#[cfg(feature = "pdfium")]
pub use pipeline::render;
pub use pipeline::{CancelToken, Progress, RenderOutcome, render_with, render_with_backend};
pub use session::{FAILURE_MESSAGE, ViewerSession};
pub use types::*;
