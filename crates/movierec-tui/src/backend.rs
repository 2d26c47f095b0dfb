use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use movierec_core::{
    Debouncer, MovieApi, ReleaseHook, debounce, fetch_recommendations, load_poster,
};

use crate::model::poster::PosterTarget;
use crate::tui_event::{BackendCommand, BackendEvent};

/// Executes [`BackendCommand`]s off the UI loop and reports results as
/// [`BackendEvent`]s. Each network command runs in its own task so a slow
/// request never holds up the next command.
pub struct Backend {
    api: Arc<dyn MovieApi>,
    tx: mpsc::UnboundedSender<BackendEvent>,
    search: Debouncer<String>,
    top_k: u32,
    cancel: CancellationToken,
}

impl Backend {
    pub fn new(
        api: Arc<dyn MovieApi>,
        tx: mpsc::UnboundedSender<BackendEvent>,
        search_debounce: Duration,
        top_k: u32,
        cancel: CancellationToken,
    ) -> Self {
        let search_tx = tx.clone();
        let search = debounce(
            move |term: String| {
                let _ = search_tx.send(BackendEvent::SearchSettled { term });
            },
            search_debounce,
        );

        Self {
            api,
            tx,
            search,
            top_k,
            cancel,
        }
    }

    pub fn handle(&self, cmd: BackendCommand) {
        match cmd {
            BackendCommand::FetchCatalog(request) => {
                let api = Arc::clone(&self.api);
                let tx = self.tx.clone();
                self.spawn(async move {
                    let result = api.list_movies(&request.query).await;
                    let _ = tx.send(BackendEvent::CatalogLoaded {
                        generation: request.generation,
                        result,
                    });
                });
            }
            BackendCommand::SearchChanged(term) => {
                self.search.call(term);
            }
            BackendCommand::FetchPoster {
                target,
                generation,
                movie_id,
            } => {
                let api = Arc::clone(&self.api);
                let tx = self.tx.clone();
                let hook = self.release_hook(target);
                self.spawn(async move {
                    let poster = load_poster(api.as_ref(), movie_id, Some(hook)).await;
                    let _ = tx.send(BackendEvent::PosterLoaded {
                        target,
                        generation,
                        poster,
                    });
                });
            }
            BackendCommand::Recommend { generation, ids } => {
                let api = Arc::clone(&self.api);
                let tx = self.tx.clone();
                let top_k = self.top_k;
                self.spawn(async move {
                    let result = fetch_recommendations(api.as_ref(), &ids, top_k).await;
                    if let Err(e) = &result {
                        warn!(error = %e, ?ids, "Recommendation run failed");
                    }
                    let _ = tx.send(BackendEvent::RecommendationsLoaded { generation, result });
                });
            }
        }
    }

    /// Hook that reports a freed poster back to the pane that loaded it.
    fn release_hook(&self, target: PosterTarget) -> ReleaseHook {
        let tx = self.tx.clone();
        Arc::new(move |movie_id| {
            let _ = tx.send(BackendEvent::PosterReleased { target, movie_id });
        })
    }

    /// Run `task` until it finishes or the app shuts down.
    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = task => {}
            }
        });
    }
}

/// Backend command listener: runs until the command channel closes or the
/// app is cancelled.
pub async fn run(backend: Backend, mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>) {
    loop {
        tokio::select! {
            _ = backend.cancel.cancelled() => break,
            cmd = cmd_rx.recv() => match cmd {
                Some(cmd) => backend.handle(cmd),
                None => break,
            },
        }
    }
}
