use crate::collection::LeadCollection;
use crate::consent::{self, ConsentDecision};
use crate::draft::LeadDraft;
use crate::errors::{AppError, ResultExt};
use crate::models::{Lead, ScoreRequest};
use crate::scoring_client::ScoringClient;

/// Submission lifecycle of the session.
///
/// `Idle` is both the initial state and the state reached after a successful
/// submission. `Failed` is "idle with a surfaced error": a new submission may
/// be started from it exactly as from `Idle`, and its message is the
/// user-visible error slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Failed(String),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    /// The surfaced error message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Outcome of [`LeadSession::begin_submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStart {
    /// The gate and draft validation passed; the payload must be sent and
    /// the outcome fed back through `complete_submit`.
    Started(ScoreRequest),
    /// Consent or a required field was missing; the state now holds the
    /// surfaced message and no request may be sent.
    Rejected,
    /// A scoring request is already outstanding; this attempt is suppressed.
    InFlight,
}

/// One user session: the draft being edited, the ordered scored-lead
/// collection, and the submission state machine that ties them together.
///
/// The session is exclusively owned, so every mutation is serialized through
/// `&mut self`; the only suspension points are the fetch and scoring calls.
pub struct LeadSession {
    client: ScoringClient,
    draft: LeadDraft,
    leads: LeadCollection,
    state: SubmissionState,
    loaded: bool,
}

impl LeadSession {
    pub fn new(client: ScoringClient) -> Self {
        Self {
            client,
            draft: LeadDraft::default(),
            leads: LeadCollection::new(),
            state: SubmissionState::Idle,
            loaded: false,
        }
    }

    pub fn draft(&self) -> &LeadDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut LeadDraft {
        &mut self.draft
    }

    pub fn leads(&self) -> &LeadCollection {
        &self.leads
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// The user-visible error, if one is surfaced.
    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    /// One-shot startup load: fetches the existing lead list and replaces
    /// the collection with it, preserving server order.
    ///
    /// The attempt happens at most once per session; later calls are no-ops.
    /// A failure is logged and returned to the caller but never touches the
    /// submission state or its error slot, so frontends decide whether to
    /// surface it.
    pub async fn load_leads(&mut self) -> Result<(), AppError> {
        if self.loaded {
            tracing::debug!("Lead list already loaded, skipping fetch");
            return Ok(());
        }
        self.loaded = true;

        match self
            .client
            .fetch_leads()
            .await
            .context("loading existing scored leads")
        {
            Ok(leads) => {
                self.leads.replace_all(leads);
                Ok(())
            }
            Err(e) => {
                tracing::error!("{}", e);
                Err(e)
            }
        }
    }

    /// Starts one submission attempt.
    ///
    /// Runs the consent gate and the required-field checks before anything
    /// else; only a `Started` outcome transitions to `Submitting`, and while
    /// `Submitting` every further call is a no-op (single-flight).
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.state.is_submitting() {
            tracing::debug!("Submission already in flight, suppressing");
            return SubmitStart::InFlight;
        }

        if let ConsentDecision::Blocked(reason) = consent::check(&self.draft) {
            self.state = SubmissionState::Failed(reason.to_string());
            return SubmitStart::Rejected;
        }

        match self.draft.to_request() {
            Ok(request) => {
                self.state = SubmissionState::Submitting;
                SubmitStart::Started(request)
            }
            Err(e) => {
                self.state = SubmissionState::Failed(e.user_message());
                SubmitStart::Rejected
            }
        }
    }

    /// Applies the scoring outcome for the in-flight submission.
    ///
    /// Success appends the scored lead at the tail, resets the draft, and
    /// returns to `Idle` (clearing any prior error). Failure surfaces the
    /// message and leaves the draft untouched so the user can correct and
    /// resubmit.
    pub fn complete_submit(&mut self, result: Result<Lead, AppError>) {
        if !self.state.is_submitting() {
            tracing::warn!("Ignoring scoring outcome: no submission in flight");
            return;
        }

        match result {
            Ok(lead) => {
                self.leads.push(lead);
                self.draft.reset();
                self.state = SubmissionState::Idle;
            }
            Err(e) => {
                tracing::warn!("Submission failed: {}", e);
                self.state = SubmissionState::Failed(e.user_message());
            }
        }
    }

    /// Full submission attempt: gate, scoring call, append-or-report.
    pub async fn submit(&mut self) -> &SubmissionState {
        if let SubmitStart::Started(request) = self.begin_submit() {
            let result = self.client.score(&request).await;
            self.complete_submit(result);
        }
        &self.state
    }
}
