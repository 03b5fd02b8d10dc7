use std::sync::Arc;

use crate::navigation::{Direction, NavigationState};
use crate::page::{Page, PageSequence};
use crate::types::{Error, RenderStatus};

/// The one message shown to the user for any failure cause. Load and render
/// failures collapse here; the structured cause goes to the log.
pub const FAILURE_MESSAGE: &str = "Could not open this book.";

/// Composes the render pipeline's output with the navigation state machine.
/// This is the surface the presentation layer talks to: current page, status,
/// and the two step commands.
#[derive(Debug, Default)]
pub struct ViewerSession {
    status: RenderStatus,
    sequence: Option<Arc<PageSequence>>,
    navigation: NavigationState,
}

impl ViewerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> RenderStatus {
        self.status
    }

    /// Installs a published sequence and re-bounds navigation. Navigation
    /// commands issued while the sequence was still empty stay consistent:
    /// the sequence only grows and the initial index is 0.
    pub fn publish(&mut self, sequence: PageSequence) -> Arc<PageSequence> {
        let sequence = Arc::new(sequence);
        self.navigation.set_len(sequence.len());
        self.sequence = Some(Arc::clone(&sequence));
        self.status = RenderStatus::Ready;
        sequence
    }

    /// Records a failed render. Whatever the cause, the session surfaces only
    /// the fixed message; no partial sequence survives.
    pub fn fail(&mut self, error: &Error) -> &'static str {
        log::error!("render failed: {}", error);
        self.status = RenderStatus::Failed;
        self.sequence = None;
        self.navigation.set_len(0);
        FAILURE_MESSAGE
    }

    pub fn sequence(&self) -> Option<&Arc<PageSequence>> {
        self.sequence.as_ref()
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.sequence
            .as_ref()
            .and_then(|sequence| sequence.get(self.navigation.index()))
    }

    pub fn page_count(&self) -> usize {
        self.navigation.len()
    }

    pub fn index(&self) -> usize {
        self.navigation.index()
    }

    pub fn direction(&self) -> Direction {
        self.navigation.direction()
    }

    pub fn is_transitioning(&self) -> bool {
        self.navigation.is_transitioning()
    }

    pub fn step_forward(&mut self) -> bool {
        self.navigation.step_forward()
    }

    pub fn step_backward(&mut self) -> bool {
        self.navigation.step_backward()
    }

    pub fn finish_transition(&mut self) -> usize {
        self.navigation.finish_transition()
    }
}
