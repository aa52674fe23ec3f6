//! Evaluation Simulator
//!
//! A submitted draft walks the status ladder on its own task:
//!
//! ```text
//! Submitted ──review delay──▶ UnderReview ──decision delay──▶ Shortlisted
//!                                                        └──▶ NotSelected
//! ```
//!
//! Nothing here is persisted. Dropping the [`Evaluation`] handle stops the task.

use crate::notify::{Notice, Notifier, TracingNotifier};
use crate::submission::draft::SubmissionDraft;
use crate::submission::error::SubmissionResult;
use crate::submission::status::SubmissionStatus;
use crate::timing::{Delay, Latency};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Picks the outcome of a review
pub trait Decider: Send + Sync {
    /// True to shortlist the team
    fn shortlist(&self) -> bool;
}

/// Unweighted coin flip
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDecider;

impl Decider for RandomDecider {
    fn shortlist(&self) -> bool {
        rand::random::<bool>()
    }
}

/// Always returns the same outcome
#[derive(Debug, Clone, Copy)]
pub struct FixedDecider(pub bool);

impl Decider for FixedDecider {
    fn shortlist(&self) -> bool {
        self.0
    }
}

/// Handle to one running evaluation
pub struct Evaluation {
    status: watch::Receiver<SubmissionStatus>,
    task: JoinHandle<()>,
}

impl Evaluation {
    /// Current status
    pub fn status(&self) -> SubmissionStatus {
        *self.status.borrow()
    }

    /// Receiver that sees every status change
    pub fn subscribe(&self) -> watch::Receiver<SubmissionStatus> {
        self.status.clone()
    }

    /// Wait for the terminal status
    pub async fn finished(&mut self) -> SubmissionStatus {
        let decided = self.status.wait_for(|s| s.is_terminal()).await.map(|s| *s);
        // Task ended without a decision; report the last status seen
        decided.unwrap_or_else(|_| *self.status.borrow())
    }
}

impl Drop for Evaluation {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Starts evaluations for submitted drafts
pub struct EvaluationSimulator {
    delay: Arc<dyn Delay>,
    latency: Latency,
    decider: Arc<dyn Decider>,
    notifier: Arc<dyn Notifier>,
}

impl EvaluationSimulator {
    pub fn new(delay: Arc<dyn Delay>, latency: Latency) -> Self {
        Self {
            delay,
            latency,
            decider: Arc::new(RandomDecider),
            notifier: Arc::new(TracingNotifier),
        }
    }

    pub fn with_decider(mut self, decider: Arc<dyn Decider>) -> Self {
        self.decider = decider;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Hand in a draft and start its review
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, draft: &SubmissionDraft) -> SubmissionResult<Evaluation> {
        if let Err(e) = draft.ensure_submittable() {
            self.notifier.notify(Notice::destructive(
                "Required field missing",
                "Please upload your abstract PDF before submitting.",
            ));
            return Err(e);
        }

        let (tx, rx) = watch::channel(SubmissionStatus::Submitted);
        self.notifier.notify(Notice::info(
            "Submission successful!",
            "Your project has been submitted for evaluation.",
        ));
        info!(progress = draft.progress(), "Submission received");

        let delay = Arc::clone(&self.delay);
        let decider = Arc::clone(&self.decider);
        let latency = self.latency;

        let task = tokio::spawn(async move {
            delay.wait(latency.review_after).await;
            tx.send_replace(SubmissionStatus::UnderReview);
            debug!("Submission under review");

            delay.wait(latency.decision_after).await;
            let outcome = if decider.shortlist() {
                SubmissionStatus::Shortlisted
            } else {
                SubmissionStatus::NotSelected
            };
            tx.send_replace(outcome);
            info!(status = %outcome, "Submission decided");
        });

        Ok(Evaluation { status: rx, task })
    }
}
