//! Submission orchestration.
//!
//! A [`Studio`] owns the result store and the synthesis policy, talks to a
//! [`ContentApi`], and is the only writer of the store. One submission runs
//! at a time; a second concurrent one is rejected with
//! [`ContentError::Busy`].

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::client::{ContentApi, HttpContentApi};
use crate::config::ClientConfig;
use crate::error::ContentError;
use crate::normalize;
use crate::request::{ContentForm, ContentRequest};
use crate::result::ContentResult;
use crate::sequencer::StepSequencer;
use crate::state::{ContentStore, Snapshot, StoreReader};
use crate::synthesis::SynthesisPolicy;
use crate::wire::CreateContentBody;

/// How the workflow animation and the request are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinPolicy {
    /// Settle only when both the animation and the request are done.
    #[default]
    AwaitLonger,
    /// Settle as soon as the request is done, skipping remaining stages.
    CapToRequest,
}

/// Content creation front end: validation, request, normalization, state.
pub struct Studio {
    api: Arc<dyn ContentApi>,
    store: ContentStore,
    policy: Mutex<SynthesisPolicy>,
    join: JoinPolicy,
}

impl std::fmt::Debug for Studio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Studio")
            .field("join", &self.join)
            .finish_non_exhaustive()
    }
}

impl Studio {
    /// Studio over `api` with an empty store and the default join policy.
    pub fn new(api: Arc<dyn ContentApi>) -> Self {
        Self {
            api,
            store: ContentStore::new(),
            policy: Mutex::new(SynthesisPolicy::new()),
            join: JoinPolicy::default(),
        }
    }

    /// Studio backed by the HTTP content API.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Config`] if the configuration has no base URL.
    pub fn http(config: &ClientConfig) -> Result<Self, ContentError> {
        Ok(Self::new(Arc::new(HttpContentApi::new(config)?)))
    }

    #[must_use]
    pub fn with_policy(mut self, policy: SynthesisPolicy) -> Self {
        self.policy = Mutex::new(policy);
        self
    }

    #[must_use]
    pub fn with_join_policy(mut self, join: JoinPolicy) -> Self {
        self.join = join;
        self
    }

    /// Read-only view of the shared state.
    pub fn subscribe(&self) -> StoreReader {
        self.store.subscribe()
    }

    /// Copy of the shared state.
    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    /// The current result, if any.
    pub fn current(&self) -> Option<Arc<ContentResult>> {
        self.store.get()
    }

    /// Forget the current result and error.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Validate `form`, then run the workflow animation beside the request.
    ///
    /// The sequencer is reset to idle before this returns, whatever the
    /// outcome. If `cancel` flips to `true` first, both the animation and
    /// the request are abandoned and the current result is left untouched.
    ///
    /// # Errors
    ///
    /// - [`ContentError::Validation`] before anything starts.
    /// - [`ContentError::Cancelled`] if cancelled mid-flight.
    /// - Any error [`normalize`](Self::normalize) propagates.
    pub async fn submit(
        &self,
        form: &ContentForm,
        sequencer: &StepSequencer,
        cancel: Option<watch::Receiver<bool>>,
    ) -> Result<Arc<ContentResult>, ContentError> {
        let request = form.validate()?;

        let work = self.animate_and_normalize(&request, sequencer);
        let outcome = match cancel {
            Some(mut rx) => tokio::select! {
                out = work => out,
                () = cancelled(&mut rx) => {
                    info!(topic = %request.topic, "content submission cancelled");
                    Err(ContentError::Cancelled)
                }
            },
            None => work.await,
        };

        sequencer.reset();
        outcome
    }

    /// Send one request and store the canonical result.
    ///
    /// An unreachable backend yields a demo result instead of an error.
    ///
    /// # Errors
    ///
    /// - [`ContentError::Busy`] if another request is in flight.
    /// - [`ContentError::Application`] or [`ContentError::Decode`] when the
    ///   backend answered with a failure; the message is also recorded in
    ///   the shared error state.
    pub async fn normalize(
        &self,
        request: &ContentRequest,
    ) -> Result<Arc<ContentResult>, ContentError> {
        if !self.store.begin_request() {
            return Err(ContentError::Busy);
        }
        let _loading = LoadingGuard(&self.store);

        info!(
            topic = %request.topic,
            content_type = %request.content_type,
            platforms = request.platforms.len(),
            "creating content"
        );

        let started = Instant::now();
        let body = CreateContentBody::from(request);
        let reply = self
            .api
            .create_content(&body)
            .await
            .and_then(normalize::unwrap_envelope);

        let result = match reply {
            Ok(data) => normalize::from_backend(request, data, started.elapsed(), &mut self.policy()),
            Err(err) if err.is_unreachable() => {
                warn!(error = %err, "content API unavailable, using fallback demo data");
                normalize::demo(request, &mut self.policy())
            }
            Err(err) => {
                warn!(error = %err, "content creation failed");
                self.store.fail(err.to_string());
                return Err(err);
            }
        };

        info!(
            origin = ?result.origin,
            words = result.word_count,
            versions = result.platform_versions.len(),
            "content ready"
        );
        Ok(self.store.set(result))
    }

    async fn animate_and_normalize(
        &self,
        request: &ContentRequest,
        sequencer: &StepSequencer,
    ) -> Result<Arc<ContentResult>, ContentError> {
        match self.join {
            JoinPolicy::AwaitLonger => {
                let ((), outcome) = tokio::join!(sequencer.run(), self.normalize(request));
                outcome
            }
            JoinPolicy::CapToRequest => {
                let animation = sequencer.run();
                tokio::pin!(animation);
                let request_done = self.normalize(request);
                tokio::pin!(request_done);
                let outcome = tokio::select! {
                    out = &mut request_done => out,
                    () = &mut animation => request_done.await,
                };
                sequencer.finish();
                outcome
            }
        }
    }

    fn policy(&self) -> std::sync::MutexGuard<'_, SynthesisPolicy> {
        self.policy.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the loading flag even if the request future is dropped.
struct LoadingGuard<'a>(&'a ContentStore);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.finish_request();
    }
}

/// Resolves once the signal reads `true`. Never resolves if the sender is
/// dropped without cancelling.
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
