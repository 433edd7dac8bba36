//! QuoteSession - one booking attempt from draft to submitted booking
//!
//! # Submission Flow
//!
//! ```text
//! submit(actor)
//!     ├─ 1. Already submitted? return the stored receipt
//!     ├─ 2. Require Confirmed
//!     ├─ 3. Attempt via BookingSubmitter (session idempotency key)
//!     ├─ 4. Transient → backoff (cancellable) and retry while budget remains
//!     ├─ 5. Rejected → back to Draft, quote discarded
//!     ├─ 6. Unauthorized / Forbidden → back to Confirmed
//!     └─ 7. Success → Submitted, receipt stored
//! ```
//!
//! Every attempt of one session carries the same idempotency key, so at most
//! one booking is created per session however often the request reaches the
//! server.

mod handle;
mod retry;
mod state;

pub use handle::SharedQuoteSession;
pub use retry::{DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_DELAY_MS, DEFAULT_MAX_RETRIES, RetryPolicy};
pub use state::SessionState;

use crate::booking::{BookingSubmitter, SubmitFailure, SubmitReceipt};
use crate::core::{EngineError, EngineResult};
use crate::pricing::PricingPolicy;
use shared::{Actor, Booking, IdempotencyKey, ParcelDraft, Quote, TrackingId};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Quote session state machine
pub struct QuoteSession {
    id: Uuid,
    state: SessionState,
    draft: ParcelDraft,
    quote: Option<Quote>,
    receipt: Option<SubmitReceipt>,

    /// Generated once; survives draft edits and rejections
    idempotency_key: IdempotencyKey,
    proposed_tracking_id: Option<TrackingId>,

    policy: PricingPolicy,
    submitter: BookingSubmitter,
    retry: RetryPolicy,
    /// Retries consumed since the last confirmed quote
    retries_used: u32,
    last_failure: Option<SubmitFailure>,
    cancel: CancellationToken,
}

impl std::fmt::Debug for QuoteSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteSession")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("quote", &self.quote.as_ref().map(|q| q.amount()))
            .field("retries_used", &self.retries_used)
            .finish()
    }
}

impl QuoteSession {
    pub fn new(draft: ParcelDraft, policy: PricingPolicy, submitter: BookingSubmitter) -> Self {
        let proposed_tracking_id = submitter
            .proposes_tracking_id()
            .then(TrackingId::candidate);

        let session = Self {
            id: Uuid::new_v4(),
            state: SessionState::Draft,
            draft,
            quote: None,
            receipt: None,
            idempotency_key: IdempotencyKey::generate(),
            proposed_tracking_id,
            policy,
            submitter,
            retry: RetryPolicy::default(),
            retries_used: 0,
            last_failure: None,
            cancel: CancellationToken::new(),
        };
        tracing::debug!(session_id = %session.id, "Quote session created");
        session
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Use an external cancellation token (e.g. tied to the caller's lifetime)
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn draft(&self) -> &ParcelDraft {
        &self.draft
    }

    /// Current quote, present in Priced / Confirmed / Submitting / Failed / Submitted
    pub fn quote(&self) -> Option<&Quote> {
        self.quote.as_ref()
    }

    pub fn booking(&self) -> Option<&Booking> {
        self.receipt.as_ref().map(|r| &r.booking)
    }

    pub fn receipt(&self) -> Option<&SubmitReceipt> {
        self.receipt.as_ref()
    }

    pub fn idempotency_key(&self) -> &IdempotencyKey {
        &self.idempotency_key
    }

    pub fn proposed_tracking_id(&self) -> Option<&TrackingId> {
        self.proposed_tracking_id.as_ref()
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn retries_used(&self) -> u32 {
        self.retries_used
    }

    pub fn last_failure(&self) -> Option<&SubmitFailure> {
        self.last_failure.as_ref()
    }

    /// Whether `retry()` would start another attempt
    pub fn can_retry(&self) -> bool {
        self.state == SessionState::Failed
            && !self.cancel.is_cancelled()
            && self.retries_used < self.retry.max_retries
            && self.last_failure.as_ref().is_some_and(SubmitFailure::is_retryable)
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Abandon the session: pending backoff ends and no further attempt starts
    ///
    /// A booking the server already created is kept.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    // ========================================================================
    // Draft and pricing
    // ========================================================================

    /// Mutate the draft; any actual change discards the quote and returns
    /// the session to Draft
    ///
    /// Refused once a submission failed: the request may have been stored
    /// under this session's idempotency key, so the draft is frozen from then
    /// on and a different parcel needs a new session.
    pub fn edit_draft<F>(&mut self, edit: F) -> EngineResult<()>
    where
        F: FnOnce(&mut ParcelDraft),
    {
        if !self.state.is_editable() {
            return Err(EngineError::invalid_state("edit the draft", self.state));
        }

        let before = self.draft.clone();
        edit(&mut self.draft);
        if self.draft != before {
            self.reset_to_draft("draft edited");
        }
        Ok(())
    }

    /// Replace the whole draft
    pub fn replace_draft(&mut self, draft: ParcelDraft) -> EngineResult<()> {
        self.edit_draft(|current| *current = draft)
    }

    /// Price the draft (Draft → Priced)
    ///
    /// On an invalid draft the state is unchanged.
    pub fn price(&mut self) -> EngineResult<&Quote> {
        match self.state {
            SessionState::Draft | SessionState::Priced => {}
            state => return Err(EngineError::invalid_state("price", state)),
        }

        let quote = self.policy.price(&self.draft)?;
        tracing::info!(
            session_id = %self.id,
            amount = %quote.amount(),
            "Session priced"
        );
        self.state = SessionState::Priced;
        Ok(self.quote.insert(quote))
    }

    /// Accept the displayed quote (Priced → Confirmed)
    pub fn confirm(&mut self) -> EngineResult<&Quote> {
        if self.state != SessionState::Priced {
            return Err(EngineError::invalid_state("confirm", self.state));
        }
        match self.quote {
            Some(ref quote) if quote.is_current_for(&self.draft) => {}
            _ => {
                self.reset_to_draft("quote out of date");
                return Err(EngineError::invalid_state("confirm", self.state));
            }
        }

        self.state = SessionState::Confirmed;
        self.retries_used = 0;
        self.last_failure = None;
        tracing::info!(session_id = %self.id, "Quote confirmed");

        self.quote
            .as_ref()
            .ok_or_else(|| EngineError::invalid_state("confirm", SessionState::Draft))
    }

    fn reset_to_draft(&mut self, reason: &str) {
        if self.state != SessionState::Draft {
            tracing::debug!(
                session_id = %self.id,
                from = %self.state,
                reason,
                "Session reset to draft"
            );
        }
        self.state = SessionState::Draft;
        self.quote = None;
        self.retries_used = 0;
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Submit the confirmed quote (Confirmed → Submitting → Submitted)
    ///
    /// With an automatic retry policy, transient failures are retried with
    /// backoff until the budget is spent. On an already submitted session the
    /// stored receipt is returned without contacting the Parcel API.
    pub async fn submit(&mut self, actor: &Actor) -> EngineResult<SubmitReceipt> {
        match self.state {
            SessionState::Submitted => return self.stored_receipt(),
            SessionState::Confirmed => {}
            state => return Err(EngineError::invalid_state("submit", state)),
        }
        self.run_attempts(actor, false).await
    }

    /// Retry after a transient failure (Failed → Submitting)
    pub async fn retry(&mut self, actor: &Actor) -> EngineResult<SubmitReceipt> {
        match self.state {
            SessionState::Submitted => return self.stored_receipt(),
            SessionState::Failed => {}
            state => return Err(EngineError::invalid_state("retry", state)),
        }
        if self.cancel.is_cancelled() {
            return Err(EngineError::Cancelled);
        }

        let last = match &self.last_failure {
            Some(failure) if failure.is_retryable() => failure.clone(),
            _ => return Err(EngineError::invalid_state("retry", self.state)),
        };
        if self.retries_used >= self.retry.max_retries {
            return Err(EngineError::RetriesExhausted {
                attempts: self.retries_used + 1,
                last,
            });
        }

        self.run_attempts(actor, true).await
    }

    fn stored_receipt(&self) -> EngineResult<SubmitReceipt> {
        self.receipt
            .clone()
            .ok_or_else(|| EngineError::invalid_state("read the receipt", self.state))
    }

    async fn run_attempts(
        &mut self,
        actor: &Actor,
        mut backoff_first: bool,
    ) -> EngineResult<SubmitReceipt> {
        let quote = match self.quote.clone() {
            Some(quote) => quote,
            None => {
                self.reset_to_draft("no quote");
                return Err(EngineError::invalid_state("submit", self.state));
            }
        };

        loop {
            if backoff_first {
                let retry_no = self.retries_used + 1;
                let delay = self.retry.delay_for(retry_no);
                tracing::warn!(
                    session_id = %self.id,
                    retry = retry_no,
                    max_retries = self.retry.max_retries,
                    delay = ?delay,
                    "Submission failed, retrying"
                );
                self.state = SessionState::Submitting;
                if !self.backoff(delay).await {
                    return self.abandon();
                }
                self.retries_used = retry_no;
            }

            if self.cancel.is_cancelled() {
                return self.abandon();
            }

            self.state = SessionState::Submitting;
            let attempt = self.retries_used + 1;
            tracing::debug!(
                session_id = %self.id,
                attempt,
                idempotency_key = %self.idempotency_key,
                "Submitting booking"
            );

            let result = self
                .submitter
                .submit(
                    &quote,
                    &self.draft,
                    &self.idempotency_key,
                    self.proposed_tracking_id.as_ref(),
                    actor,
                )
                .await;

            let failure = match result {
                Ok(receipt) => {
                    self.state = SessionState::Submitted;
                    self.last_failure = None;
                    tracing::info!(
                        session_id = %self.id,
                        attempt,
                        parcel_id = %receipt.booking.id,
                        tracking_id = %receipt.booking.tracking_id,
                        "Session submitted"
                    );
                    self.receipt = Some(receipt.clone());
                    return Ok(receipt);
                }
                Err(EngineError::Submit(failure)) => failure,
                Err(err @ (EngineError::BookingMismatch { .. } | EngineError::InvalidRecord(_))) => {
                    // The server holds a booking for this key; only a new session may book again
                    tracing::error!(session_id = %self.id, "Submission unusable: {err}");
                    self.state = SessionState::Failed;
                    self.last_failure = None;
                    return Err(err);
                }
                Err(other) => {
                    // Local precondition failed before any request was sent
                    self.reset_to_draft("submission precondition failed");
                    return Err(other);
                }
            };

            self.last_failure = Some(failure.clone());
            match failure {
                SubmitFailure::Transient(_) => {
                    self.state = SessionState::Failed;
                    if self.retries_used >= self.retry.max_retries {
                        tracing::error!(
                            session_id = %self.id,
                            attempts = attempt,
                            "Submission failed permanently: {failure}"
                        );
                        return Err(EngineError::RetriesExhausted {
                            attempts: attempt,
                            last: failure,
                        });
                    }
                    if !self.retry.automatic {
                        tracing::warn!(session_id = %self.id, attempt, "Submission failed: {failure}");
                        return Err(EngineError::Submit(failure));
                    }
                    backoff_first = true;
                }
                SubmitFailure::Rejected { .. } => {
                    tracing::warn!(session_id = %self.id, "Submission rejected: {failure}");
                    self.reset_to_draft("rejected by parcel api");
                    return Err(EngineError::Submit(failure));
                }
                SubmitFailure::Unauthorized(_) | SubmitFailure::Forbidden(_) => {
                    tracing::warn!(session_id = %self.id, "Submission not authorized: {failure}");
                    self.state = SessionState::Confirmed;
                    return Err(EngineError::Submit(failure));
                }
                SubmitFailure::Fatal(_) => {
                    tracing::error!(session_id = %self.id, "Submission failed: {failure}");
                    self.state = SessionState::Failed;
                    return Err(EngineError::Submit(failure));
                }
            }
        }
    }

    /// Sleep for `delay`; false if the session was cancelled meanwhile
    async fn backoff(&self, delay: Duration) -> bool {
        tokio::select! {
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(delay) => true,
        }
    }

    fn abandon(&mut self) -> EngineResult<SubmitReceipt> {
        tracing::info!(session_id = %self.id, "Session abandoned, retries stopped");
        self.state = SessionState::Failed;
        Err(EngineError::Cancelled)
    }
}
