//! Shared session handle

use super::{QuoteSession, SessionState};
use crate::booking::SubmitReceipt;
use crate::core::EngineResult;
use shared::Actor;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// A quote session shared across tasks
///
/// All operations are serialized through one async mutex. Cancellation
/// bypasses the lock so a caller can abandon a session while a submission
/// holds it.
#[derive(Debug, Clone)]
pub struct SharedQuoteSession {
    id: Uuid,
    inner: Arc<Mutex<QuoteSession>>,
    cancel: CancellationToken,
}

impl SharedQuoteSession {
    pub fn new(session: QuoteSession) -> Self {
        Self {
            id: session.id(),
            cancel: session.cancellation_token(),
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Exclusive access to the session
    pub async fn lock(&self) -> MutexGuard<'_, QuoteSession> {
        self.inner.lock().await
    }

    pub async fn state(&self) -> SessionState {
        self.inner.lock().await.state()
    }

    pub async fn submit(&self, actor: &Actor) -> EngineResult<SubmitReceipt> {
        self.inner.lock().await.submit(actor).await
    }

    pub async fn retry(&self, actor: &Actor) -> EngineResult<SubmitReceipt> {
        self.inner.lock().await.retry(actor).await
    }

    /// Abandon the session without waiting for the lock
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl From<QuoteSession> for SharedQuoteSession {
    fn from(session: QuoteSession) -> Self {
        Self::new(session)
    }
}
