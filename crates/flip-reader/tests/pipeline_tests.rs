use flip_reader::*;
use std::path::Path;

/// Fake rasterization backend: one entry per page, holding the aspect ratio
/// that page should report.
struct FakeBackend {
    pages: Vec<f32>,
    fail_open: bool,
    fail_page: Option<usize>,
    /// Sets this token during the rasterization of the given page, modelling
    /// a viewer torn down mid-render.
    cancel_during: Option<(usize, CancelToken)>,
}

impl FakeBackend {
    fn with_pages(aspects: &[f32]) -> Self {
        Self {
            pages: aspects.to_vec(),
            fail_open: false,
            fail_page: None,
            cancel_during: None,
        }
    }
}

struct FakeDocument<'a> {
    backend: &'a FakeBackend,
}

impl DocumentBackend for FakeBackend {
    type Document<'a> = FakeDocument<'a>;

    fn open(&self, _path: &Path) -> Result<FakeDocument<'_>> {
        if self.fail_open {
            return Err(Error::Load("unreadable document".to_string()));
        }
        Ok(FakeDocument { backend: self })
    }
}

impl SourceDocument for FakeDocument<'_> {
    fn page_count(&self) -> usize {
        self.backend.pages.len()
    }

    fn rasterize(&self, number: usize, scale: f32) -> Result<RasterizedPage> {
        if self.backend.fail_page == Some(number) {
            return Err(Error::Render {
                page: number,
                reason: "damaged page".to_string(),
            });
        }
        if let Some((during, token)) = &self.backend.cancel_during {
            if number == *during {
                token.cancel();
            }
        }

        let aspect = self.backend.pages[number - 1];
        let width = (100.0 * scale) as u32;
        let height = (width as f32 / aspect) as u32;
        Ok(RasterizedPage {
            rgba: vec![0xff; (width * height * 4) as usize],
            width,
            height,
            aspect_ratio: aspect,
        })
    }
}

fn run(
    backend: &FakeBackend,
    options: &ReaderOptions,
    cancel: &CancelToken,
) -> Result<RenderOutcome> {
    render_with_backend(backend, Path::new("fake.pdf"), options, cancel, None)
}

#[test]
fn test_sequence_has_cover_plus_all_pages() {
    let backend = FakeBackend::with_pages(&[0.7, 0.8, 0.9]);
    let options = ReaderOptions::default();

    let outcome = run(&backend, &options, &CancelToken::new()).unwrap();
    let RenderOutcome::Complete(sequence) = outcome else {
        panic!("expected a published sequence");
    };

    assert_eq!(sequence.len(), 4);
    for (i, page) in sequence.pages().iter().enumerate() {
        assert_eq!(page.ordinal, i);
        assert_eq!(page.is_cover, i == 0);
    }
    assert!(matches!(sequence.get(0).unwrap().image, PageImage::Asset(_)));
    assert!(matches!(
        sequence.get(1).unwrap().image,
        PageImage::Rgba { .. }
    ));
}

#[test]
fn test_cover_copies_first_page_aspect() {
    let backend = FakeBackend::with_pages(&[0.68, 1.0]);
    let options = ReaderOptions::default();

    let RenderOutcome::Complete(sequence) =
        run(&backend, &options, &CancelToken::new()).unwrap()
    else {
        panic!("expected a published sequence");
    };

    assert_eq!(sequence.get(0).unwrap().aspect_ratio, 0.68);
}

#[test]
fn test_cover_falls_back_to_default_aspect_for_empty_document() {
    let backend = FakeBackend::with_pages(&[]);
    let options = ReaderOptions::default();

    let RenderOutcome::Complete(sequence) =
        run(&backend, &options, &CancelToken::new()).unwrap()
    else {
        panic!("expected a published sequence");
    };

    assert_eq!(sequence.len(), 1);
    assert_eq!(sequence.get(0).unwrap().aspect_ratio, DEFAULT_COVER_ASPECT);
    assert!(sequence.get(0).unwrap().is_cover);
}

#[test]
fn test_cancellation_mid_render_publishes_nothing() {
    let cancel = CancelToken::new();
    let backend = FakeBackend {
        cancel_during: Some((2, cancel.clone())),
        ..FakeBackend::with_pages(&[0.7; 5])
    };
    let options = ReaderOptions::default();

    let mut rendered = 0usize;
    let mut report = |_current: usize, _total: usize| rendered += 1;
    let outcome = render_with_backend(
        &backend,
        Path::new("fake.pdf"),
        &options,
        &cancel,
        Some(&mut report),
    )
    .unwrap();

    assert!(matches!(outcome, RenderOutcome::Cancelled));
    // The page whose render raced the flag still completed; nothing after it.
    assert_eq!(rendered, 2);
}

#[test]
fn test_pre_cancelled_token_stops_before_first_page() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let backend = FakeBackend::with_pages(&[0.7, 0.8]);
    let options = ReaderOptions::default();

    let mut rendered = 0usize;
    let mut report = |_current: usize, _total: usize| rendered += 1;
    let outcome = render_with_backend(
        &backend,
        Path::new("fake.pdf"),
        &options,
        &cancel,
        Some(&mut report),
    )
    .unwrap();

    assert!(matches!(outcome, RenderOutcome::Cancelled));
    assert_eq!(rendered, 0);
}

#[test]
fn test_open_failure_is_a_load_error() {
    let backend = FakeBackend {
        fail_open: true,
        ..FakeBackend::with_pages(&[0.7])
    };
    let options = ReaderOptions::default();

    let result = run(&backend, &options, &CancelToken::new());
    assert!(matches!(result, Err(Error::Load(_))));
}

#[test]
fn test_page_failure_is_a_render_error() {
    let backend = FakeBackend {
        fail_page: Some(2),
        ..FakeBackend::with_pages(&[0.7, 0.8, 0.9])
    };
    let options = ReaderOptions::default();

    let result = run(&backend, &options, &CancelToken::new());
    assert!(matches!(result, Err(Error::Render { page: 2, .. })));
}

#[test]
fn test_progress_reports_every_page_in_order() {
    let backend = FakeBackend::with_pages(&[0.7, 0.8, 0.9]);
    let options = ReaderOptions::default();

    let mut seen = Vec::new();
    let mut report = |current: usize, total: usize| seen.push((current, total));
    render_with_backend(
        &backend,
        Path::new("fake.pdf"),
        &options,
        &CancelToken::new(),
        Some(&mut report),
    )
    .unwrap();

    assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);
}

#[test]
fn test_scale_factor_reaches_the_rasterizer() {
    let backend = FakeBackend::with_pages(&[1.0]);
    let options = ReaderOptions {
        scale_factor: 3.0,
        ..Default::default()
    };

    let RenderOutcome::Complete(sequence) =
        run(&backend, &options, &CancelToken::new()).unwrap()
    else {
        panic!("expected a published sequence");
    };

    match &sequence.get(1).unwrap().image {
        PageImage::Rgba { width, .. } => assert_eq!(*width, 300),
        PageImage::Asset(_) => panic!("expected pixels"),
    }
}

#[tokio::test]
async fn test_async_wrapper_builds_the_same_sequence() {
    let progress_seen = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = std::sync::Arc::clone(&progress_seen);
    let progress: Progress = Box::new(move |_, _| {
        counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    });

    let outcome = render_with(
        || Ok(FakeBackend::with_pages(&[0.7, 0.8])),
        "fake.pdf".into(),
        ReaderOptions::default(),
        CancelToken::new(),
        Some(progress),
    )
    .await
    .unwrap();

    let RenderOutcome::Complete(sequence) = outcome else {
        panic!("expected a published sequence");
    };
    assert_eq!(sequence.len(), 3);
    assert_eq!(
        progress_seen.load(std::sync::atomic::Ordering::SeqCst),
        2
    );
}
