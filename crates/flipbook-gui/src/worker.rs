use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use flip_async_runtime::{CommandReceiver, ReaderCommand, ReaderUpdate, UpdateSender};
use flip_reader::{
    CancelToken, Progress, ReaderOptions, RenderOutcome, Result, ViewerSession, render,
};
use tokio::sync::mpsc;

/// Outcome of a spawned render task, tagged with the generation it belongs
/// to so results from a superseded render are ignored.
struct RenderFinished {
    generation: u64,
    result: Result<RenderOutcome>,
}

type RenderFuture = Pin<Box<dyn Future<Output = Result<RenderOutcome>> + Send>>;

/// Async worker task owning the viewer session. Rendering runs as a spawned
/// task reporting back over an internal channel, so commands — `Close` in
/// particular, which cancels the render — keep being serviced while pages
/// are still being rasterized.
pub async fn worker_task(
    command_rx: CommandReceiver,
    update_tx: UpdateSender,
    options: ReaderOptions,
) {
    run_worker(
        command_rx,
        update_tx,
        options,
        |path, options, cancel, progress| -> RenderFuture {
            Box::pin(render(path, options, cancel, progress))
        },
    )
    .await
}

async fn run_worker<F>(
    mut command_rx: CommandReceiver,
    update_tx: UpdateSender,
    options: ReaderOptions,
    start_render: F,
) where
    F: Fn(PathBuf, ReaderOptions, CancelToken, Option<Progress>) -> RenderFuture
        + Clone
        + Send
        + 'static,
{
    let mut session = ViewerSession::new();
    let mut active_render: Option<CancelToken> = None;
    let mut generation: u64 = 0;
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderFinished>();

    loop {
        tokio::select! {
            // A completed render is applied before the next command, so a
            // step arriving with the publish already queued lands on the
            // published sequence.
            biased;
            finished = render_rx.recv() => {
                let Some(finished) = finished else { break };
                if finished.generation != generation {
                    log::debug!("discarding result of superseded render");
                    continue;
                }
                active_render = None;
                match finished.result {
                    Ok(RenderOutcome::Complete(sequence)) => {
                        session.publish(sequence);
                        let _ = update_tx.send(ReaderUpdate::Ready {
                            page_count: session.page_count(),
                        });
                        if let Some(page) = session.current_page() {
                            let _ = update_tx.send(ReaderUpdate::PageChanged {
                                index: session.index(),
                                page: page.clone(),
                            });
                        }
                    }
                    Ok(RenderOutcome::Cancelled) => {
                        log::debug!("render cancelled before completion");
                    }
                    Err(e) => {
                        let message = session.fail(&e);
                        let _ = update_tx.send(ReaderUpdate::Failed {
                            message: message.to_string(),
                        });
                    }
                }
            }
            cmd = command_rx.recv() => {
                let Some(cmd) = cmd else { break };
                match cmd {
                    ReaderCommand::Open { path } => {
                        if let Some(cancel) = active_render.take() {
                            cancel.cancel();
                        }
                        session = ViewerSession::new();
                        generation += 1;

                        let cancel = CancelToken::new();
                        active_render = Some(cancel.clone());

                        let render_tx = render_tx.clone();
                        let progress_tx = update_tx.clone();
                        let render_options = options.clone();
                        let render_generation = generation;
                        let start_render = start_render.clone();
                        tokio::spawn(async move {
                            let progress: Progress = Box::new(move |current, total| {
                                let _ = progress_tx.send(ReaderUpdate::Progress { current, total });
                            });
                            let result =
                                start_render(path, render_options, cancel, Some(progress)).await;
                            let _ = render_tx.send(RenderFinished {
                                generation: render_generation,
                                result,
                            });
                        });
                    }
                    ReaderCommand::StepForward => {
                        if session.step_forward() {
                            let _ = update_tx.send(ReaderUpdate::TransitionStarted {
                                direction: session.direction(),
                            });
                        }
                    }
                    ReaderCommand::StepBackward => {
                        if session.step_backward() {
                            let _ = update_tx.send(ReaderUpdate::TransitionStarted {
                                direction: session.direction(),
                            });
                        }
                    }
                    ReaderCommand::FinishTransition => {
                        // Stale timers from an already-finished transition
                        // fall through the machine's idle no-op.
                        if session.is_transitioning() {
                            let index = session.finish_transition();
                            if let Some(page) = session.current_page() {
                                let _ = update_tx.send(ReaderUpdate::PageChanged {
                                    index,
                                    page: page.clone(),
                                });
                            }
                        }
                    }
                    ReaderCommand::Close => {
                        if let Some(cancel) = active_render.take() {
                            cancel.cancel();
                        }
                        // The cancel flag can land after the render's final
                        // check; bumping the generation makes such a late
                        // completion stale instead of publishing into the
                        // torn-down session.
                        generation += 1;
                        session = ViewerSession::new();
                        let _ = update_tx.send(ReaderUpdate::Closed);
                    }
                }
            }
        }
    }
}
