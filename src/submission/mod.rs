//! Project submission and the simulated evaluation that follows it

pub mod certificate;
pub mod deadline;
pub mod draft;
pub mod error;
pub mod evaluation;
pub mod status;

pub use certificate::{participation_certificate, Certificate};
pub use deadline::{countdown, end_of_day};
pub use draft::SubmissionDraft;
pub use error::{SubmissionError, SubmissionResult};
pub use evaluation::{Decider, Evaluation, EvaluationSimulator, FixedDecider, RandomDecider};
pub use status::SubmissionStatus;
