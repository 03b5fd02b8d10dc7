use std::time::{Duration, Instant};

use eframe::egui;
use flip_async_runtime::{
    CommandSender, PageImage, ReaderCommand, ReaderUpdate, UpdateReceiver,
};
use flip_reader::ReaderOptions;
use tokio::sync::mpsc;

use crate::logger::AppLogger;
use crate::views::{PageContent, ReaderViewState, Transition, show_reader};

#[derive(Clone)]
struct ProgressState {
    current: usize,
    total: usize,
}

pub struct FlipbookApp {
    options: ReaderOptions,
    status: String,
    logger: AppLogger,

    // Async infrastructure
    command_tx: CommandSender,
    update_rx: UpdateReceiver,

    // Render progress while the sequence is still loading
    progress: Option<ProgressState>,

    // Reader state, present while a book is open
    reader: Option<ReaderViewState>,

    _tokio_handle: tokio::runtime::Handle,
}

impl FlipbookApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        options: ReaderOptions,
        logger: AppLogger,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        // Spawn worker task
        tokio_handle.spawn(crate::worker::worker_task(
            command_rx,
            update_tx,
            options.clone(),
        ));

        Self {
            options,
            status: String::new(),
            logger,
            command_tx,
            update_rx,
            progress: None,
            reader: None,
            _tokio_handle: tokio_handle,
        }
    }

    fn set_page_content(&mut self, ctx: &egui::Context, index: usize, image: PageImage) {
        let Some(state) = &mut self.reader else {
            return;
        };
        state.index = index;
        state.transition = None;
        match image {
            PageImage::Rgba {
                data,
                width,
                height,
            } => {
                let color_image = egui::ColorImage::from_rgba_unmultiplied(
                    [width as usize, height as usize],
                    &data,
                );
                if let Some(PageContent::Texture(texture)) = &mut state.content {
                    texture.set(color_image, egui::TextureOptions::default());
                } else {
                    state.content = Some(PageContent::Texture(ctx.load_texture(
                        "flipbook_page",
                        color_image,
                        egui::TextureOptions::default(),
                    )));
                }
            }
            PageImage::Asset(asset) => {
                state.content = Some(PageContent::Asset(asset));
            }
        }
    }
}

impl eframe::App for FlipbookApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle drag-and-drop for PDF files
        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                for file in &i.raw.dropped_files {
                    if let Some(path) = &file.path {
                        if path.extension().and_then(|s| s.to_str()) == Some("pdf") {
                            let _ = self
                                .command_tx
                                .send(ReaderCommand::Open { path: path.clone() });
                            self.status = "Opening book...".to_string();
                        }
                    }
                }
            }
        });

        // Process all pending updates from worker
        while let Ok(update) = self.update_rx.try_recv() {
            match update {
                ReaderUpdate::Progress { current, total } => {
                    self.progress = Some(ProgressState { current, total });
                    ctx.request_repaint();
                }
                ReaderUpdate::Ready { page_count } => {
                    self.reader = Some(ReaderViewState::new(page_count));
                    self.status = format!("Loaded book with {} pages", page_count);
                    self.progress = None;
                }
                ReaderUpdate::PageChanged { index, page } => {
                    self.set_page_content(ctx, index, page.image);
                }
                ReaderUpdate::TransitionStarted { direction } => {
                    if let Some(state) = &mut self.reader {
                        state.transition = Some(Transition {
                            direction,
                            started: Instant::now(),
                        });
                    }
                    ctx.request_repaint();
                }
                ReaderUpdate::Failed { message } => {
                    self.status = message;
                    self.reader = None;
                    self.progress = None;
                }
                ReaderUpdate::Closed => {
                    self.reader = None;
                    self.progress = None;
                    self.status = "Closed book".to_string();
                }
            }
        }

        // Drive the page-turn timer: the index applies only once the fixed
        // duration has elapsed.
        let transition_ms = self.options.transition_ms;
        if let Some(state) = &mut self.reader {
            if let Some(transition) = &state.transition {
                if transition.started.elapsed() >= Duration::from_millis(transition_ms) {
                    let _ = self.command_tx.send(ReaderCommand::FinishTransition);
                    state.transition = None;
                } else {
                    ctx.request_repaint_after(Duration::from_millis(16));
                }
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            show_reader(
                ui,
                &mut self.reader,
                &self.command_tx,
                &mut self.status,
                &self.options,
                self.progress.is_some(),
            );

            if let Some(ref progress) = self.progress {
                ui.separator();
                ui.label("Rendering pages...");
                ui.add(
                    egui::ProgressBar::new(progress.current as f32 / progress.total.max(1) as f32)
                        .show_percentage(),
                );
                ctx.request_repaint();
            }

            let line = if self.status.is_empty() {
                self.logger.latest_message()
            } else {
                Some(self.status.clone())
            };
            if let Some(line) = line {
                ui.separator();
                ui.label(line);
            }
        });
    }
}
