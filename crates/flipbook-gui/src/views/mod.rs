mod reader;

pub use reader::{PageContent, ReaderViewState, Transition, show_reader};
