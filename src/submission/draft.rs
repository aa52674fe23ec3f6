//! Project submission draft
//!
//! Artifacts are referenced by file name only; nothing is uploaded.

use crate::submission::error::{SubmissionError, SubmissionResult};
use serde::{Deserialize, Serialize};

/// What a team has prepared so far
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDraft {
    pub project_description: String,
    /// Abstract PDF, required to submit
    pub abstract_file: Option<String>,
    pub prototype_video: Option<String>,
    pub github_link: Option<String>,
}

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl SubmissionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the project description
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.project_description = text.into();
        self
    }

    /// Builder method: attach the abstract
    pub fn abstract_file(mut self, name: impl Into<String>) -> Self {
        self.abstract_file = Some(name.into());
        self
    }

    /// Builder method: attach a prototype video
    pub fn prototype_video(mut self, name: impl Into<String>) -> Self {
        self.prototype_video = Some(name.into());
        self
    }

    /// Builder method: link the repository
    pub fn github_link(mut self, url: impl Into<String>) -> Self {
        self.github_link = Some(url.into());
        self
    }

    /// Completion percentage shown next to the submission deadline
    ///
    /// Description 25, abstract 50, video or GitHub link 25.
    pub fn progress(&self) -> u8 {
        let mut progress = 0;
        if !self.project_description.trim().is_empty() {
            progress += 25;
        }
        if filled(&self.abstract_file) {
            progress += 50;
        }
        if filled(&self.prototype_video) || filled(&self.github_link) {
            progress += 25;
        }
        progress
    }

    /// Check the draft can be submitted
    pub fn ensure_submittable(&self) -> SubmissionResult<()> {
        if !filled(&self.abstract_file) {
            return Err(SubmissionError::MissingAbstract);
        }
        Ok(())
    }
}
