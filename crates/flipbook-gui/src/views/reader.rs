use std::time::Instant;

use eframe::egui;
use flip_async_runtime::{CommandSender, Direction, ReaderCommand, ReaderOptions};

/// What the current page displays: uploaded pixels, or the opaque asset
/// reference carried by static pages (the cover).
pub enum PageContent {
    Texture(egui::TextureHandle),
    Asset(String),
}

/// A page-turn animation in flight. The index only moves once the fixed
/// duration has elapsed and the worker is told to finish the transition.
pub struct Transition {
    pub direction: Direction,
    pub started: Instant,
}

pub struct ReaderViewState {
    pub index: usize,
    pub page_count: usize,
    pub content: Option<PageContent>,
    pub transition: Option<Transition>,
}

impl ReaderViewState {
    pub fn new(page_count: usize) -> Self {
        Self {
            index: 0,
            page_count,
            content: None,
            transition: None,
        }
    }
}

pub fn show_reader(
    ui: &mut egui::Ui,
    reader: &mut Option<ReaderViewState>,
    command_tx: &CommandSender,
    status: &mut String,
    options: &ReaderOptions,
    loading: bool,
) {
    if let Some(state) = reader {
        ui.horizontal(|ui| {
            let idle = state.transition.is_none();
            let can_go_back = idle && state.index > 0;
            let can_go_forward = idle && state.index < state.page_count.saturating_sub(1);

            if ui
                .add_enabled(can_go_back, egui::Button::new("◀ Previous"))
                .clicked()
            {
                let _ = command_tx.send(ReaderCommand::StepBackward);
            }

            ui.label(format!("Page {} of {}", state.index + 1, state.page_count));

            if ui
                .add_enabled(can_go_forward, egui::Button::new("Next ▶"))
                .clicked()
            {
                let _ = command_tx.send(ReaderCommand::StepForward);
            }

            ui.separator();

            if ui.button("Close book").clicked() {
                let _ = command_tx.send(ReaderCommand::Close);
            }
        });

        ui.separator();

        match &state.content {
            Some(PageContent::Texture(texture)) => {
                let slide = slide_offset(&state.transition, options.transition_ms);
                egui::ScrollArea::both().show(ui, |ui| {
                    ui.centered_and_justified(|ui| {
                        let size = texture.size_vec2();
                        let (rect, _) =
                            ui.allocate_exact_size(size, egui::Sense::hover());
                        let rect = rect.translate(egui::vec2(slide, 0.0));
                        egui::Image::new((texture.id(), size)).paint_at(ui, rect);
                    });
                });
            }
            Some(PageContent::Asset(asset)) => {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.heading("📖");
                        ui.label(asset.clone());
                    });
                });
            }
            None => {
                // The page's pixels haven't arrived yet; show the loading
                // placeholder asset alongside the spinner.
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.spinner();
                    ui.add_space(10.0);
                    ui.label(options.loading_asset.clone());
                });
            }
        }
    } else if loading {
        // A book is being rendered but nothing is published yet.
        ui.vertical_centered(|ui| {
            ui.add_space(50.0);
            ui.spinner();
            ui.add_space(10.0);
            ui.label(options.loading_asset.clone());
        });
    } else {
        // No book open - show file loading UI
        ui.vertical_centered(|ui| {
            ui.add_space(50.0);
            ui.heading("Flipbook");
            ui.add_space(20.0);
            ui.label("Drop a PDF file here or click to open");
            ui.add_space(10.0);

            if ui.button("Open book...").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("PDF", &["pdf"])
                    .pick_file()
                {
                    let _ = command_tx.send(ReaderCommand::Open { path });
                    *status = "Opening book...".to_string();
                }
            }
        });
    }
}

/// Horizontal displacement of the page while a turn is animating: the page
/// slides toward the travel direction and settles as the duration elapses.
fn slide_offset(transition: &Option<Transition>, transition_ms: u64) -> f32 {
    const SLIDE_PX: f32 = 48.0;

    let Some(transition) = transition else {
        return 0.0;
    };
    let elapsed = transition.started.elapsed().as_millis() as f32;
    let fraction = (elapsed / transition_ms.max(1) as f32).clamp(0.0, 1.0);
    let sign = match transition.direction {
        Direction::Forward => -1.0,
        Direction::Backward => 1.0,
        Direction::None => return 0.0,
    };
    sign * fraction * SLIDE_PX
}
