use std::sync::Arc;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use super::Notifier;
use crate::matching::MatchId;
use crate::run_id;
use crate::schema::{MatchInsert, MatchStatus, ProposerType};
use crate::store::{MarketStore, StoreError};
use crate::{JobPost, TalentProfile};

#[derive(Debug, Error, PartialEq)]
pub enum ProposalError {
    /// The current user may not propose for this pair: they are not
    /// signed in, or they own one side (self-proposals are forbidden).
    /// The GUI never renders the propose action in either state, so
    /// reaching this is a caller bug.
    #[error("current user may not propose for this pair")]
    NotAllowed,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Local state of the proposal dialog. Preserved across a failed
/// submission so the user can retry without retyping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProposalForm {
    pub open: bool,
    pub message: String,
}

impl ProposalForm {
    pub fn opened() -> Self {
        ProposalForm {
            open: true,
            message: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The match row was stored and the form was reset.
    Submitted,
    /// The owning view went away mid-flight; the result was discarded and
    /// no local state was touched.
    Discarded,
}

/// Orchestrates identity derivation and record building for a proposal,
/// gated by the single authorization rule (no self-proposals).
pub struct ProposalFlow {
    store: Arc<dyn MarketStore>,
    notifier: Arc<dyn Notifier>,
    cancel: CancellationToken,
}

impl ProposalFlow {
    pub fn new(store: Arc<dyn MarketStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            cancel: CancellationToken::new(),
        }
    }

    /// Cancel any in-flight submission. Called when the owning view is
    /// torn down; a store result arriving afterwards is dropped.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// 提案ボタンを表示してよいかの判定。未ログイン、または自分が
    /// 案件側・人材側いずれかの所有者なら不可。
    pub fn can_propose(
        current_user_id: Option<&str>,
        job: &JobPost,
        talent: &TalentProfile,
    ) -> bool {
        match current_user_id {
            Some(user) if !user.is_empty() => user != job.user_id && user != talent.user_id,
            _ => false,
        }
    }

    /// `Client` when the proposer owns the job post. Unreachable while
    /// [`Self::can_propose`] blocks owners, kept because the backend
    /// schema carries both values.
    pub fn proposer_type(current_user_id: &str, job: &JobPost) -> ProposerType {
        if current_user_id == job.user_id {
            ProposerType::Client
        } else {
            ProposerType::Talent
        }
    }

    /// Build the row to submit. Pure; whitespace-only messages normalize
    /// to absent.
    pub fn build_record(
        current_user_id: &str,
        job: &JobPost,
        talent: &TalentProfile,
        message: &str,
    ) -> MatchInsert {
        let trimmed = message.trim();
        let mut pending = vec![job.user_id.clone(), talent.user_id.clone()];
        pending.dedup();

        MatchInsert {
            id: MatchId::derive(&job.id, &talent.id).into_string(),
            job_id: job.id.clone(),
            talent_id: talent.id.clone(),
            status: MatchStatus::Pending,
            proposer_id: current_user_id.to_string(),
            proposer_type: Self::proposer_type(current_user_id, job),
            message: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            approved_by: vec![],
            pending_approval_from: pending,
        }
    }

    /// Submit the proposal currently sitting in `form`.
    ///
    /// Success clears and closes the form and runs `on_complete`. A store
    /// failure surfaces a notice and leaves the form untouched for retry.
    /// Cancellation discards the call with no side effects.
    #[instrument(
        skip(self, job, talent, form, on_complete),
        fields(
            job_id = %job.id,
            talent_id = %talent.id,
            session_id = run_id::get(),
            request_id = %run_id::generate(),
        )
    )]
    pub async fn submit(
        &self,
        current_user_id: &str,
        job: &JobPost,
        talent: &TalentProfile,
        form: &mut ProposalForm,
        on_complete: impl FnOnce(),
    ) -> Result<SubmitOutcome, ProposalError> {
        if !Self::can_propose(Some(current_user_id), job, talent) {
            return Err(ProposalError::NotAllowed);
        }

        let record = Self::build_record(current_user_id, job, talent, &form.message);

        let result = tokio::select! {
            _ = self.cancel.cancelled() => {
                info!("proposal submission discarded after view teardown");
                return Ok(SubmitOutcome::Discarded);
            }
            result = self.store.create_match(&record) => result,
        };

        match result {
            Ok(()) => {
                info!(match_id = %record.id, "proposal submitted");
                form.message.clear();
                form.open = false;
                on_complete();
                Ok(SubmitOutcome::Submitted)
            }
            Err(err) => {
                warn!(error = %err, "proposal submission failed");
                self.notifier.failure("提案の送信に失敗しました。もう一度お試しください。");
                Err(err.into())
            }
        }
    }
}
