//! Submission errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Please upload your abstract PDF before submitting")]
    MissingAbstract,
}

pub type SubmissionResult<T> = Result<T, SubmissionError>;
