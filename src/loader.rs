//! Background loading and empty-state selection.
//!
//! [`NewsLoader`] runs one pipeline fetch at a time on a spawned task and
//! publishes its progress as a [`LoadState`] over a `tokio::sync::watch`
//! channel. Front ends subscribe, wait for [`LoadState::Completed`], then
//! call [`present`] to decide what to show.

use crate::api::{Connectivity, FetchAsync};
use crate::error::FetchErrorKind;
use crate::models::Article;
use crate::pipeline::NewsPipeline;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// What a finished load produced.
pub type LoadOutcome = Result<Vec<Article>, FetchErrorKind>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Completed(LoadOutcome),
}

/// Owns the pipeline and the published state of the current load.
#[derive(Debug)]
pub struct NewsLoader<F> {
    pipeline: Arc<NewsPipeline<F>>,
    state: Arc<watch::Sender<LoadState>>,
}

impl<F> NewsLoader<F>
where
    F: FetchAsync + Send + Sync + 'static,
{
    pub fn new(pipeline: NewsPipeline<F>) -> Self {
        let (state, _) = watch::channel(LoadState::Idle);
        Self {
            pipeline: Arc::new(pipeline),
            state: Arc::new(state),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Start loading `request_url` in the background.
    ///
    /// Returns `None` without starting anything if a load is already in
    /// flight. The previous outcome, if any, is replaced once this one
    /// completes.
    pub fn load(&self, request_url: String) -> Option<JoinHandle<()>> {
        let started = self.state.send_if_modified(|state| {
            if *state == LoadState::Loading {
                false
            } else {
                *state = LoadState::Loading;
                true
            }
        });
        if !started {
            warn!("Load requested while another is in flight; ignoring");
            return None;
        }

        let pipeline = Arc::clone(&self.pipeline);
        let state = Arc::clone(&self.state);
        Some(tokio::spawn(async move {
            let outcome = pipeline.fetch(&request_url).await.map_err(|e| e.kind());
            debug!(ok = outcome.is_ok(), "Load finished");
            state.send_replace(LoadState::Completed(outcome));
        }))
    }

    /// Drop the current outcome and return to [`LoadState::Idle`].
    pub fn reset(&self) {
        self.state.send_replace(LoadState::Idle);
    }
}

/// Wait until `rx` reports a completed load and return its outcome.
///
/// Returns `None` if the loader is dropped first.
pub async fn wait_completed(rx: &mut watch::Receiver<LoadState>) -> Option<LoadOutcome> {
    let state = rx
        .wait_for(|state| matches!(state, LoadState::Completed(_)))
        .await
        .ok()?;
    match &*state {
        LoadState::Completed(outcome) => Some(outcome.clone()),
        _ => None,
    }
}

/// What the front end should display after a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    NoInternet,
    NoNews,
    Articles(Vec<Article>),
}

/// Pick the display for `outcome`.
///
/// Connectivity is checked first, so an offline device shows "no internet"
/// even if the load somehow succeeded. Failed and empty loads both show
/// "no news".
pub fn present(outcome: &LoadOutcome, connectivity: Connectivity) -> Presentation {
    match (connectivity, outcome) {
        (Connectivity::Offline, _) => Presentation::NoInternet,
        (Connectivity::Online, Ok(articles)) if !articles.is_empty() => {
            Presentation::Articles(articles.clone())
        }
        _ => Presentation::NoNews,
    }
}
