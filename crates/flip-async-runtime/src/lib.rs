use std::path::PathBuf;

use tokio::sync::mpsc;

// Re-export types from the core library
pub use flip_reader::{
    Direction, Page, PageImage, PageSequence, ReaderOptions, RenderStatus,
};

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum ReaderCommand {
    /// Open a document and start rendering its page sequence
    Open { path: PathBuf },
    StepForward,
    StepBackward,
    /// Sent by the component driving the visible animation once the fixed
    /// transition duration has elapsed
    FinishTransition,
    /// Tear the session down, cancelling any render still in flight
    Close,
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum ReaderUpdate {
    Progress {
        current: usize,
        total: usize,
    },
    /// The page sequence (cover included) is published and navigable
    Ready {
        page_count: usize,
    },
    PageChanged {
        index: usize,
        page: Page,
    },
    TransitionStarted {
        direction: Direction,
    },
    Failed {
        message: String,
    },
    Closed,
}

pub type CommandSender = mpsc::UnboundedSender<ReaderCommand>;
pub type CommandReceiver = mpsc::UnboundedReceiver<ReaderCommand>;
pub type UpdateSender = mpsc::UnboundedSender<ReaderUpdate>;
pub type UpdateReceiver = mpsc::UnboundedReceiver<ReaderUpdate>;
